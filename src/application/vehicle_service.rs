// Vehicle service - Use case for listing and selecting fleet vehicles
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::vehicle::{filter_registrations, Vehicle};
use crate::domain::view::Notice;
use std::sync::Arc;

#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn TelemetryRepository>,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the fleet directory. Never fails: on any upstream error the
    /// list is empty and an error notice is recorded instead.
    pub async fn list_vehicles(&self, notices: &mut Vec<Notice>) -> Vec<Vehicle> {
        match self.repository.list_vehicles().await {
            Ok(Some(vehicles)) => {
                tracing::debug!("Fleet directory returned {} vehicles", vehicles.len());
                vehicles
            }
            Ok(None) => {
                tracing::info!("Fleet directory is empty (404)");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Error fetching vehicles: {}", e);
                notices.push(Notice::error(format!("Error fetching the vehicles: {e}")));
                Vec::new()
            }
        }
    }

    /// Fetch the directory and pick one registration out of it.
    ///
    /// `search` narrows the directory; `requested` must be one of the
    /// narrowed registrations, and defaults to the first of them.
    pub async fn select_vehicle(
        &self,
        search: &str,
        requested: Option<&str>,
        notices: &mut Vec<Notice>,
    ) -> Option<String> {
        let vehicles = self.list_vehicles(notices).await;
        if vehicles.is_empty() {
            notices.push(Notice::warning("No vehicles found."));
            return None;
        }

        match select_registration(&vehicles, search, requested) {
            Ok(registration) => Some(registration),
            Err(notice) => {
                notices.push(notice);
                None
            }
        }
    }
}

pub fn select_registration(
    vehicles: &[Vehicle],
    search: &str,
    requested: Option<&str>,
) -> Result<String, Notice> {
    let candidates = filter_registrations(vehicles, search);
    let Some(first) = candidates.first() else {
        return Err(Notice::warning("No vehicles match that text."));
    };

    match requested.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(first.to_string()),
        Some(registration) if candidates.contains(&registration) => Ok(registration.to_string()),
        Some(registration) => Err(Notice::warning(format!(
            "Vehicle {registration} is not in the fleet directory."
        ))),
    }
}
