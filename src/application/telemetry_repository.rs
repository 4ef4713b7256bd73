// Repository trait for the planner statistics API
use crate::application::error::ApiError;
use crate::domain::telemetry::{DailyMaxima, LowSocRecord, SocBin, StatusRecord, TelemetryRecord};
use crate::domain::vehicle::Vehicle;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Every query answers `Ok(None)` when the API reports 404 (no data for
/// the query), `Ok(Some(..))` on success and `Err` on any other failure.
#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// List the vehicles known to the fleet directory
    async fn list_vehicles(&self) -> Result<Option<Vec<Vehicle>>, ApiError>;

    /// Raw efficiency samples for one vehicle on one day
    async fn efficiency_series(
        &self,
        date: NaiveDate,
        registration: &str,
    ) -> Result<Option<Vec<TelemetryRecord>>, ApiError>;

    /// SOC statistics binned upstream into `bin_minutes` intervals
    async fn soc_bins(
        &self,
        date: NaiveDate,
        registration: &str,
        bin_minutes: u32,
    ) -> Result<Option<Vec<SocBin>>, ApiError>;

    /// Gearbox, charge and vehicle status samples for one vehicle on one day
    async fn status_series(
        &self,
        date: NaiveDate,
        registration: &str,
    ) -> Result<Option<Vec<StatusRecord>>, ApiError>;

    /// Fleet-wide maxima (distance, average consumption) for one day
    async fn daily_maxima(&self, date: NaiveDate) -> Result<Option<DailyMaxima>, ApiError>;

    /// Days on which any vehicle dropped below the low-SOC threshold
    async fn low_soc_records(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<LowSocRecord>>, ApiError>;
}
