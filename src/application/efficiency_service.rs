// Efficiency service - Distance, consumption and sensor charts for one vehicle and day
use crate::application::charts::series_chart;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::application::vehicle_service::VehicleService;
use crate::domain::aggregation::TripMetrics;
use crate::domain::telemetry::{DailyMaxima, TelemetryRecord};
use crate::domain::view::{GaugeData, Notice, Section, View, ViewKind};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EfficiencyQuery {
    pub date: NaiveDate,
    pub search: String,
    pub registration: Option<String>,
}

type Column = fn(&TelemetryRecord) -> Option<f64>;

const CHARTS: [(&str, &str, &str, Column); 6] = [
    (
        "energyConsumption_ave",
        "Energy efficiency (average)",
        "kWh/100km",
        |r| r.energy_consumption_ave,
    ),
    (
        "energyConsumption_rt",
        "Energy efficiency (real time)",
        "kWh/100km",
        |r| r.energy_consumption_rt,
    ),
    ("speed", "Vehicle speed", "km/h", |r| r.speed),
    ("soc", "Battery level (SOC)", "%", |r| r.soc),
    ("outsideTemp", "Outside temperature", "°C", |r| r.outside_temp),
    ("insideTemp", "Inside temperature", "°C", |r| r.inside_temp),
];

#[derive(Clone)]
pub struct EfficiencyService {
    repository: Arc<dyn TelemetryRepository>,
    vehicles: VehicleService,
}

impl EfficiencyService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self {
            vehicles: VehicleService::new(repository.clone()),
            repository,
        }
    }

    pub async fn efficiency_view(&self, query: &EfficiencyQuery) -> View {
        let mut view = View::new(ViewKind::Efficiency, "Vehicle efficiency analysis");
        let Some(registration) = self
            .vehicles
            .select_vehicle(&query.search, query.registration.as_deref(), &mut view.notices)
            .await
        else {
            return view;
        };

        view.notify(Notice::info(format!(
            "Querying data for {} on {}...",
            registration, query.date
        )));

        let records = match self.repository.efficiency_series(query.date, &registration).await {
            Ok(Some(records)) if !records.is_empty() => records,
            Ok(Some(_)) => {
                view.notify(Notice::warning("No data found for that day."));
                return view;
            }
            Ok(None) => {
                view.notify(Notice::info(format!(
                    "No efficiency records exist for {registration} on {}.",
                    query.date
                )));
                return view;
            }
            Err(e) => {
                tracing::error!("Efficiency query for {} failed: {}", registration, e);
                view.notify(Notice::error(format!("Error querying the API: {e}")));
                return view;
            }
        };

        let metrics = TripMetrics::from_records(&records);
        tracing::debug!("Trip metrics for {} on {}: {:?}", registration, query.date, metrics);

        let maxima = self.daily_maxima(&mut view, query.date).await;
        view.push(Section::Heading(
            "General metrics (compared with the fleet maxima for the day)".to_string(),
        ));
        for gauge in gauges(&metrics, &maxima) {
            view.push(Section::Gauge(gauge));
        }

        for (id, title, unit, column) in CHARTS {
            view.push(series_chart(id, title, unit, &records, column));
        }

        view
    }

    async fn daily_maxima(&self, view: &mut View, date: NaiveDate) -> DailyMaxima {
        match self.repository.daily_maxima(date).await {
            Ok(Some(maxima)) => maxima,
            Ok(None) => DailyMaxima::default(),
            Err(e) => {
                tracing::warn!("Daily maxima for {} unavailable: {}", date, e);
                view.notify(Notice::error(format!("Error fetching the day's maxima: {e}")));
                DailyMaxima::default()
            }
        }
    }
}

fn gauges(metrics: &TripMetrics, maxima: &DailyMaxima) -> [GaugeData; 3] {
    [
        GaugeData::new("initial-soc", "Initial SOC", "%", metrics.initial_soc, 0.0, Some(100.0), 0),
        GaugeData::new(
            "efficiency",
            "Energy efficiency",
            "kWh/100km",
            metrics.efficiency_kwh_per_100km,
            0.0,
            maxima.max_energy_consumption_ave,
            2,
        ),
        GaugeData::new(
            "distance",
            "Distance travelled",
            "km",
            metrics.distance_km,
            0.0,
            maxima.max_distance,
            2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_repository::{Canned, FakeRepository};
    use crate::domain::view::NoticeLevel;
    use chrono::{TimeZone, Utc};

    fn query() -> EfficiencyQuery {
        EfficiencyQuery {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            search: "aaa".to_string(),
            registration: None,
        }
    }

    fn sample(minute: u32, mileage: f64, ave: f64) -> TelemetryRecord {
        TelemetryRecord {
            time: Some(Utc.with_ymd_and_hms(2025, 6, 2, 10, minute, 0).unwrap()),
            soc: Some(90.0 - f64::from(minute)),
            mileage: Some(mileage),
            energy_consumption_ave: Some(ave),
            speed: Some(40.0),
            ..Default::default()
        }
    }

    fn gauge<'a>(view: &'a View, id: &str) -> &'a GaugeData {
        view.sections
            .iter()
            .find_map(|s| match s {
                Section::Gauge(g) if g.id == id => Some(g),
                _ => None,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_metrics_and_missing_columns() {
        let repository = FakeRepository {
            efficiency: Canned::Data(vec![
                sample(0, 100.0, 10.0),
                sample(1, 100.0, 12.0),
                sample(2, 140.0, 14.0),
            ]),
            maxima: Canned::Data(DailyMaxima {
                max_distance: Some(210.0),
                max_energy_consumption_ave: Some(45.0),
            }),
            ..FakeRepository::with_fleet(&["1111-AAA", "2222-BBB"])
        };
        let service = EfficiencyService::new(Arc::new(repository));

        let view = service.efficiency_view(&query()).await;

        assert!(!view.has_errors());
        assert_eq!(gauge(&view, "distance").value, Some(40.0));
        assert_eq!(gauge(&view, "distance").max, Some(210.0));
        assert_eq!(gauge(&view, "efficiency").value, Some(30.0));
        assert_eq!(gauge(&view, "initial-soc").value, Some(90.0));

        let charts: Vec<&str> = view.charts().map(|c| c.id.as_str()).collect();
        assert_eq!(charts, vec!["energyConsumption_ave", "speed", "soc"]);
        let suppressed = view
            .sections
            .iter()
            .filter(|s| matches!(s, Section::Notice(_)))
            .count();
        assert_eq!(suppressed, 3);
    }

    #[tokio::test]
    async fn test_stationary_vehicle_efficiency_not_available() {
        let repository = FakeRepository {
            efficiency: Canned::Data(vec![sample(0, 500.0, 10.0), sample(5, 500.0, 11.0)]),
            ..FakeRepository::with_fleet(&["1111-AAA"])
        };
        let service = EfficiencyService::new(Arc::new(repository));

        let view = service.efficiency_view(&query()).await;

        assert_eq!(gauge(&view, "efficiency").value, None);
        assert_eq!(gauge(&view, "efficiency").max, None);
        assert_eq!(gauge(&view, "distance").value, Some(0.0));
    }

    #[tokio::test]
    async fn test_empty_day_stops_before_maxima() {
        let repository = Arc::new(FakeRepository {
            efficiency: Canned::Data(Vec::new()),
            ..FakeRepository::with_fleet(&["1111-AAA"])
        });
        let service = EfficiencyService::new(repository.clone());

        let view = service.efficiency_view(&query()).await;

        assert_eq!(view.notices.last(), Some(&Notice::warning("No data found for that day.")));
        assert!(view.sections.is_empty());
        // directory + efficiency series
        assert_eq!(repository.calls(), 2);
    }

    #[tokio::test]
    async fn test_maxima_failure_keeps_the_view() {
        let repository = FakeRepository {
            efficiency: Canned::Data(vec![sample(0, 10.0, 8.0), sample(1, 30.0, 8.0)]),
            maxima: Canned::Status(503),
            ..FakeRepository::with_fleet(&["1111-AAA"])
        };
        let service = EfficiencyService::new(Arc::new(repository));

        let view = service.efficiency_view(&query()).await;

        assert_eq!(view.notices.last().map(|n| n.level), Some(NoticeLevel::Error));
        assert_eq!(gauge(&view, "efficiency").value, Some(40.0));
        assert_eq!(view.charts().count(), 3);
    }
}
