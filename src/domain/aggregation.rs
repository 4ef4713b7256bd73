// Aggregation rules: low-SOC flagging and trip metrics
use super::telemetry::{SocBin, TelemetryRecord};

/// Average SOC (%) below which a vehicle must return to the depot.
pub const LOW_SOC_THRESHOLD: f64 = 20.0;

/// Strictly below the threshold; a bin sitting exactly on it is not low.
pub fn is_low_soc(avg_soc: f64) -> bool {
    avg_soc < LOW_SOC_THRESHOLD
}

/// Sort bins chronologically by interval start.
pub fn sort_bins(bins: &mut [SocBin]) {
    bins.sort_by_key(|b| b.interval_start);
}

/// Bins whose average SOC is low, in input order. A bin without an
/// average is never flagged.
pub fn low_soc_bins(bins: &[SocBin]) -> Vec<&SocBin> {
    bins.iter()
        .filter(|b| b.avg_soc.is_some_and(is_low_soc))
        .collect()
}

/// Distance and efficiency derived from one day of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TripMetrics {
    /// km, `max(mileage) - min(mileage)`.
    pub distance_km: Option<f64>,
    pub mean_consumption: Option<f64>,
    /// kWh/100km. `None` means "not available" (no distance covered).
    pub efficiency_kwh_per_100km: Option<f64>,
    pub initial_soc: Option<f64>,
}

impl TripMetrics {
    pub fn from_records(records: &[TelemetryRecord]) -> Self {
        let distance_km = spread(records.iter().filter_map(|r| r.mileage));
        let mean_consumption = mean(records.iter().filter_map(|r| r.energy_consumption_ave));
        let efficiency_kwh_per_100km = efficiency(mean_consumption, distance_km);
        let initial_soc = records.first().and_then(|r| r.soc);

        Self {
            distance_km,
            mean_consumption,
            efficiency_kwh_per_100km,
            initial_soc,
        }
    }
}

fn efficiency(mean_consumption: Option<f64>, distance_km: Option<f64>) -> Option<f64> {
    match (mean_consumption, distance_km) {
        (Some(consumption), Some(distance)) if distance > 0.0 => {
            let value = consumption / distance * 100.0;
            value.is_finite().then_some(value)
        }
        _ => None,
    }
}

fn spread(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;
    Some(max - min)
}

pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// True if at least one record carries a value for the column.
pub fn column_has_data<F>(records: &[TelemetryRecord], column: F) -> bool
where
    F: Fn(&TelemetryRecord) -> Option<f64>,
{
    records.iter().any(|r| column(r).is_some())
}
