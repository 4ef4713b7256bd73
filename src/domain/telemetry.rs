// Telemetry data domain models
use super::status::{ChargeStatus, GearboxStatus, VehicleStatus};
use chrono::{DateTime, Utc};

/// One efficiency sample. Numeric fields are `None` when the gateway
/// omitted them or sent something that is not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryRecord {
    pub time: Option<DateTime<Utc>>,
    pub soc: Option<f64>,
    pub mileage: Option<f64>,
    pub energy_consumption_ave: Option<f64>,
    pub energy_consumption_rt: Option<f64>,
    pub outside_temp: Option<f64>,
    pub inside_temp: Option<f64>,
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    pub time: Option<DateTime<Utc>>,
    pub gearbox: GearboxStatus,
    pub charge: ChargeStatus,
    pub vehicle: VehicleStatus,
}

/// SOC statistics for one fixed-width interval, aggregated upstream.
/// A statistic is `None` when the gateway sent no usable number for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SocBin {
    pub interval_start: DateTime<Utc>,
    pub min_soc: Option<f64>,
    pub avg_soc: Option<f64>,
    pub max_soc: Option<f64>,
    pub sample_count: u64,
}

/// A day on which a vehicle dropped below the low-SOC threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct LowSocRecord {
    /// Day as reported upstream (`YYYY-MM-DD`), so it sorts lexically.
    pub date: String,
    pub registration: String,
    pub min_soc: Option<f64>,
}

/// Fleet-wide maxima for one day, used as gauge ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyMaxima {
    pub max_distance: Option<f64>,
    pub max_energy_consumption_ave: Option<f64>,
}
