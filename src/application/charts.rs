// Chart builders shared by the view services
use crate::domain::aggregation::{column_has_data, low_soc_bins, LOW_SOC_THRESHOLD};
use crate::domain::status::StatusSignal;
use crate::domain::telemetry::{SocBin, StatusRecord, TelemetryRecord};
use crate::domain::view::{
    BandData, ChartData, ChartKind, Notice, Section, SeriesData, SeriesStyle, TimeSeriesPoint,
};

/// Average SOC line, min/max band and a marker overlay on low-SOC bins.
/// Bins are expected in chronological order; statistics a bin lacks are
/// left out of the matching series.
pub fn soc_chart(bins: &[SocBin]) -> ChartData {
    let average_point =
        |b: &SocBin| Some(TimeSeriesPoint::new(b.interval_start.timestamp_millis(), b.avg_soc?));

    let average = bins.iter().filter_map(average_point).collect();
    let low = low_soc_bins(bins).into_iter().filter_map(average_point).collect();

    let band = BandData {
        id: "soc-range".to_string(),
        name: "SOC min/max".to_string(),
        fill: Some("rgba(0,100,80,0.2)".to_string()),
        points: bins
            .iter()
            .filter_map(|b| Some((b.interval_start.timestamp_millis(), b.min_soc?, b.max_soc?)))
            .collect(),
    };

    let series = vec![
        SeriesData::new("avg-soc", "Average SOC", Some("blue"), SeriesStyle::Line, average),
        SeriesData::new(
            "low-soc",
            &format!("Low SOC (below {LOW_SOC_THRESHOLD}%)"),
            Some("red"),
            SeriesStyle::Markers,
            low,
        ),
    ];

    ChartData::new("soc", "SOC during the day", ChartKind::MultiLine, series)
        .with_unit("%")
        .with_range(0.0, 100.0)
        .with_band(band)
}

/// Plot one categorical signal. Rows without a timestamp or whose value
/// is outside the lookup table are left out of this chart only.
pub fn status_chart<S, F>(
    id: &str,
    title: &str,
    color: &str,
    records: &[StatusRecord],
    signal: F,
) -> Section
where
    S: StatusSignal,
    F: Fn(&StatusRecord) -> &S,
{
    let points: Vec<TimeSeriesPoint> = records
        .iter()
        .filter_map(|r| {
            let time = r.time?;
            let code = signal(r).code()?;
            Some(TimeSeriesPoint::new(time.timestamp_millis(), f64::from(code)))
        })
        .collect();

    if points.is_empty() {
        return Section::Notice(Notice::warning(format!("No data to plot for {title}.")));
    }

    let series = vec![SeriesData::new(id, id, Some(color), SeriesStyle::LineMarkers, points)];
    Section::Chart(ChartData::new(id, title, ChartKind::Status, series).with_ticks(S::ticks()))
}

/// Single-series line chart over one numeric telemetry column, or an
/// inline notice if the column carries no data for the window.
pub fn series_chart<F>(
    id: &str,
    title: &str,
    unit: &str,
    records: &[TelemetryRecord],
    column: F,
) -> Section
where
    F: Fn(&TelemetryRecord) -> Option<f64>,
{
    if !column_has_data(records, &column) {
        return Section::Notice(Notice::warning(format!("No data for {}.", title.to_lowercase())));
    }

    let points = records
        .iter()
        .filter_map(|r| {
            let time = r.time?;
            let value = column(r)?;
            Some(TimeSeriesPoint::new(time.timestamp_millis(), value))
        })
        .collect();

    let series = vec![SeriesData::new(id, title, None, SeriesStyle::Line, points)];
    Section::Chart(ChartData::new(id, title, ChartKind::Line, series).with_unit(unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::{ChargeStatus, GearboxStatus, VehicleStatus};
    use chrono::{TimeZone, Utc};

    fn status(minute: u32, gearbox: &str, charge: &str) -> StatusRecord {
        StatusRecord {
            time: Some(Utc.with_ymd_and_hms(2025, 3, 4, 9, minute, 0).unwrap()),
            gearbox: GearboxStatus::from_wire(gearbox),
            charge: ChargeStatus::from_wire(charge),
            vehicle: VehicleStatus::from_wire("Active"),
        }
    }

    #[test]
    fn test_soc_chart_marks_only_low_bins() {
        let bins: Vec<SocBin> = [42.0, 20.0, 19.0]
            .iter()
            .enumerate()
            .map(|(i, avg)| SocBin {
                interval_start: Utc.with_ymd_and_hms(2025, 3, 4, 9, i as u32 * 5, 0).unwrap(),
                min_soc: Some(avg - 2.0),
                avg_soc: Some(*avg),
                max_soc: Some(avg + 2.0),
                sample_count: 10,
            })
            .collect();

        let chart = soc_chart(&bins);
        assert_eq!(chart.series[0].points.len(), 3);
        assert_eq!(chart.series[1].points.len(), 1);
        assert_eq!(chart.series[1].points[0].value, 19.0);
        let second = bins[1].interval_start.timestamp_millis();
        assert_eq!(
            chart.band.as_ref().map(|b| b.points[1]),
            Some((second, 18.0, 22.0))
        );
    }

    #[test]
    fn test_status_chart_drops_unknown_rows_only() {
        let records = vec![
            status(0, "Start", "Charging"),
            status(1, "Reverse", "Charging"),
            status(2, "Idle", "Plugged"),
        ];

        let section = status_chart("gbStatus", "Gearbox", "blue", &records, |r| &r.gearbox);
        let Section::Chart(gearbox) = section else {
            panic!("expected a chart");
        };
        let values: Vec<f64> = gearbox.series[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 3.0]);
        assert_eq!(gearbox.y_ticks.len(), 3);

        let section = status_chart("gbCharge", "Charge", "green", &records, |r| &r.charge);
        let Section::Chart(charge) = section else {
            panic!("expected a chart");
        };
        assert_eq!(charge.series[0].points.len(), 2);
    }

    #[test]
    fn test_status_chart_without_mappable_rows_is_suppressed() {
        let records = vec![status(0, "Parked", "Charging")];
        let section = status_chart("gbStatus", "Gearbox", "blue", &records, |r| &r.gearbox);
        assert!(matches!(section, Section::Notice(_)));
    }

    #[test]
    fn test_series_chart_suppressed_for_missing_column() {
        let records = vec![TelemetryRecord {
            time: Some(Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap()),
            speed: Some(30.0),
            ..Default::default()
        }];

        assert!(matches!(
            series_chart("speed", "Vehicle speed", "km/h", &records, |r| r.speed),
            Section::Chart(_)
        ));
        assert_eq!(
            series_chart("insideTemp", "Inside temperature", "°C", &records, |r| r.inside_temp),
            Section::Notice(Notice::warning("No data for inside temperature."))
        );
    }
}
