// Low-SOC service - Scan a date range for vehicles that ran low
use crate::application::error::ViewError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::LowSocRecord;
use crate::domain::view::{Cell, Notice, Section, TableData, View, ViewKind};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct LowSocService {
    repository: Arc<dyn TelemetryRepository>,
}

impl LowSocService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self { repository }
    }

    pub async fn scan(&self, start: NaiveDate, end: NaiveDate) -> Result<View, ViewError> {
        if start > end {
            return Err(ViewError::InvalidDateRange { start, end });
        }

        let mut view = View::new(ViewKind::LowSoc, ViewKind::LowSoc.label());
        view.push(Section::Text(format!("Records from {start} to {end}")));

        match self.repository.low_soc_records(start, end).await {
            Ok(None) => {
                view.notify(Notice::success(
                    "No vehicles with low SOC were found in the selected date range.",
                ));
            }
            Ok(Some(records)) if records.is_empty() => {
                view.notify(Notice::success(
                    "There are no low-SOC records in the selected range.",
                ));
            }
            Ok(Some(mut records)) => {
                tracing::info!(
                    "Low-SOC scan {}..{} found {} records",
                    start,
                    end,
                    records.len()
                );
                view.notify(Notice::warning(format!(
                    "Found {} records with low SOC.",
                    records.len()
                )));
                sort_records(&mut records);
                view.push(Section::Table(records_table(&records)));
            }
            Err(e) => {
                tracing::error!("Low-SOC scan failed: {}", e);
                view.notify(Notice::error(format!("Error calling the API: {e}")));
            }
        }

        Ok(view)
    }
}

fn sort_records(records: &mut [LowSocRecord]) {
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.registration.cmp(&b.registration))
    });
}

fn records_table(records: &[LowSocRecord]) -> TableData {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                Cell::Text(r.date.clone()),
                Cell::Text(r.registration.clone()),
                Cell::from(r.min_soc),
            ]
        })
        .collect();

    TableData::new(
        "low-soc-records",
        "Low-SOC records",
        &["date", "registration", "minSoc"],
        rows,
    )
}
