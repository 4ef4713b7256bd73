// In-memory repository used by the service tests
use crate::application::error::ApiError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::{DailyMaxima, LowSocRecord, SocBin, StatusRecord, TelemetryRecord};
use crate::domain::vehicle::Vehicle;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
pub enum Canned<T> {
    Data(T),
    NotFound,
    Status(u16),
}

impl<T: Clone> Canned<T> {
    fn answer(&self, endpoint: &str) -> Result<Option<T>, ApiError> {
        match self {
            Canned::Data(data) => Ok(Some(data.clone())),
            Canned::NotFound => Ok(None),
            Canned::Status(status) => Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: *status,
            }),
        }
    }
}

pub struct FakeRepository {
    pub vehicles: Canned<Vec<Vehicle>>,
    pub efficiency: Canned<Vec<TelemetryRecord>>,
    pub bins: Canned<Vec<SocBin>>,
    pub statuses: Canned<Vec<StatusRecord>>,
    pub maxima: Canned<DailyMaxima>,
    pub low_soc: Canned<Vec<LowSocRecord>>,
    pub calls: AtomicUsize,
}

impl Default for FakeRepository {
    fn default() -> Self {
        Self {
            vehicles: Canned::Data(Vec::new()),
            efficiency: Canned::NotFound,
            bins: Canned::NotFound,
            statuses: Canned::NotFound,
            maxima: Canned::NotFound,
            low_soc: Canned::NotFound,
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeRepository {
    pub fn with_fleet(registrations: &[&str]) -> Self {
        Self {
            vehicles: Canned::Data(
                registrations
                    .iter()
                    .map(|r| Vehicle::new(r.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Number of upstream calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TelemetryRepository for FakeRepository {
    async fn list_vehicles(&self) -> Result<Option<Vec<Vehicle>>, ApiError> {
        self.hit();
        self.vehicles.answer("/vehiculos")
    }

    async fn efficiency_series(
        &self,
        _date: NaiveDate,
        _registration: &str,
    ) -> Result<Option<Vec<TelemetryRecord>>, ApiError> {
        self.hit();
        self.efficiency.answer("/BI/vehiculoiot-eficiencia")
    }

    async fn soc_bins(
        &self,
        _date: NaiveDate,
        _registration: &str,
        _bin_minutes: u32,
    ) -> Result<Option<Vec<SocBin>>, ApiError> {
        self.hit();
        self.bins.answer("/BI/vehiculoiot-socbin")
    }

    async fn status_series(
        &self,
        _date: NaiveDate,
        _registration: &str,
    ) -> Result<Option<Vec<StatusRecord>>, ApiError> {
        self.hit();
        self.statuses.answer("/BI/vehiculoiot-status")
    }

    async fn daily_maxima(&self, _date: NaiveDate) -> Result<Option<DailyMaxima>, ApiError> {
        self.hit();
        self.maxima.answer("/BI/vehiculoiot-maxdia")
    }

    async fn low_soc_records(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Option<Vec<LowSocRecord>>, ApiError> {
        self.hit();
        self.low_soc.answer("/BI/vehiculoiot-low-soc")
    }
}
