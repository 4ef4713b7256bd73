// SOC service - SOC evolution and vehicle status for one vehicle and day
use crate::application::charts::{soc_chart, status_chart};
use crate::application::error::ViewError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::application::vehicle_service::VehicleService;
use crate::domain::aggregation::{low_soc_bins, sort_bins};
use crate::domain::telemetry::{SocBin, StatusRecord};
use crate::domain::view::{Cell, Notice, Section, TableData, View, ViewKind};
use chrono::NaiveDate;
use std::sync::Arc;

pub const MIN_BIN_MINUTES: u32 = 1;
pub const MAX_BIN_MINUTES: u32 = 60;

#[derive(Debug, Clone)]
pub struct SocQuery {
    pub date: NaiveDate,
    pub search: String,
    pub registration: Option<String>,
    pub bin_minutes: u32,
}

#[derive(Clone)]
pub struct SocService {
    repository: Arc<dyn TelemetryRepository>,
    vehicles: VehicleService,
}

impl SocService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self {
            vehicles: VehicleService::new(repository.clone()),
            repository,
        }
    }

    pub async fn soc_view(&self, query: &SocQuery) -> Result<View, ViewError> {
        if !(MIN_BIN_MINUTES..=MAX_BIN_MINUTES).contains(&query.bin_minutes) {
            return Err(ViewError::InvalidBinSize(query.bin_minutes));
        }

        let mut view = View::new(ViewKind::Soc, "SOC evolution by vehicle");
        let Some(registration) = self
            .vehicles
            .select_vehicle(&query.search, query.registration.as_deref(), &mut view.notices)
            .await
        else {
            return Ok(view);
        };

        view.push(Section::Text(format!(
            "Vehicle {} on {} ({}-minute bins)",
            registration, query.date, query.bin_minutes
        )));

        self.push_soc(&mut view, query, &registration).await;
        self.push_status(&mut view, query.date, &registration).await;

        Ok(view)
    }

    async fn push_soc(&self, view: &mut View, query: &SocQuery, registration: &str) {
        let result = self
            .repository
            .soc_bins(query.date, registration, query.bin_minutes)
            .await;

        match result {
            Ok(Some(mut bins)) if !bins.is_empty() => {
                sort_bins(&mut bins);
                let low = low_soc_bins(&bins).len();
                tracing::debug!(
                    "{} SOC bins for {} on {}, {} low",
                    bins.len(),
                    registration,
                    query.date,
                    low
                );

                if bins.iter().any(|b| b.avg_soc.is_some()) {
                    view.push(Section::Chart(soc_chart(&bins)));
                } else {
                    view.push(Section::Notice(Notice::warning(
                        "No average SOC values to plot for this day.",
                    )));
                }
                if low > 0 {
                    view.notify(Notice::warning(
                        "Alert! The vehicle is below 20% SOC and must return to the depot.",
                    ));
                }
                view.push(Section::Table(bins_table(&bins)));
            }
            Ok(Some(_)) => {
                view.notify(Notice::warning("No SOC data found."));
            }
            Ok(None) => {
                view.notify(Notice::info(format!(
                    "No SOC records exist for {registration} on {}.",
                    query.date
                )));
            }
            Err(e) => {
                tracing::error!("SOC query for {} failed: {}", registration, e);
                view.notify(Notice::error(format!("Error querying the API: {e}")));
            }
        }
    }

    async fn push_status(&self, view: &mut View, date: NaiveDate, registration: &str) {
        view.push(Section::Heading("Vehicle status".to_string()));

        match self.repository.status_series(date, registration).await {
            Ok(Some(records)) if !records.is_empty() => {
                view.push(Section::Table(status_table(&records)));
                view.push(status_chart(
                    "gbStatus",
                    "Vehicle status (gbStatus) during the day",
                    "blue",
                    &records,
                    |r| &r.gearbox,
                ));
                view.push(status_chart(
                    "gbCharge",
                    "Charge status (gbCharge) during the day",
                    "green",
                    &records,
                    |r| &r.charge,
                ));
                view.push(status_chart(
                    "evStatus",
                    "Vehicle status (evStatus) during the day",
                    "orange",
                    &records,
                    |r| &r.vehicle,
                ));
            }
            Ok(_) => {
                view.push(Section::Notice(Notice::warning(
                    "No status records found for this vehicle.",
                )));
            }
            Err(e) => {
                tracing::error!("Status query for {} failed: {}", registration, e);
                view.push(Section::Notice(Notice::error(format!(
                    "Error querying the vehicle status: {e}"
                ))));
            }
        }
    }
}

fn bins_table(bins: &[SocBin]) -> TableData {
    let rows = bins
        .iter()
        .map(|b| {
            vec![
                Cell::Timestamp(b.interval_start.timestamp_millis()),
                Cell::from(b.min_soc),
                Cell::from(b.avg_soc),
                Cell::from(b.max_soc),
                Cell::Integer(i64::try_from(b.sample_count).unwrap_or(i64::MAX)),
            ]
        })
        .collect();

    TableData::new(
        "soc-bins",
        "Data table",
        &["timestamp", "minSOC", "avgSOC", "maxSOC", "count"],
        rows,
    )
}

fn status_table(records: &[StatusRecord]) -> TableData {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.time
                    .map(|t| Cell::Timestamp(t.timestamp_millis()))
                    .unwrap_or(Cell::Empty),
                Cell::Text(r.charge.as_str().to_string()),
                Cell::Text(r.gearbox.as_str().to_string()),
                Cell::Text(r.vehicle.as_str().to_string()),
            ]
        })
        .collect();

    TableData::new(
        "vehicle-status",
        "Vehicle status",
        &["evTime", "gbCharge", "gbStatus", "evStatus"],
        rows,
    )
}
