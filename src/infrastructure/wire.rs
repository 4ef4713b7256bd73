// JSON payloads of the planner statistics API and their domain mapping
use crate::domain::status::{ChargeStatus, GearboxStatus, VehicleStatus};
use crate::domain::telemetry::{DailyMaxima, LowSocRecord, SocBin, StatusRecord, TelemetryRecord};
use crate::domain::vehicle::Vehicle;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct VehicleDto {
    matricula: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyDto {
    #[serde(default)]
    ev_time: Option<String>,
    #[serde(default)]
    soc: Option<Value>,
    #[serde(default)]
    mileage: Option<Value>,
    #[serde(default)]
    energy_consumption: Option<Value>,
    #[serde(default)]
    outside_temp: Option<Value>,
    #[serde(default)]
    inside_temp: Option<Value>,
    #[serde(default)]
    speed: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SocBinDto {
    #[serde(rename = "_id")]
    id: SocBinIdDto,
    #[serde(rename = "minSOC", default)]
    min_soc: Option<Value>,
    #[serde(rename = "avgSOC", default)]
    avg_soc: Option<Value>,
    #[serde(rename = "maxSOC", default)]
    max_soc: Option<Value>,
    #[serde(default)]
    count: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SocBinIdDto {
    interval: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    #[serde(default)]
    ev_time: Option<String>,
    #[serde(default)]
    gb_charge: Option<String>,
    #[serde(default)]
    gb_status: Option<String>,
    #[serde(default)]
    ev_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMaximaDto {
    #[serde(default)]
    max_distance: Option<Value>,
    #[serde(default)]
    max_energy_consumption_ave: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowSocDto {
    fecha: String,
    matricula: String,
    #[serde(default)]
    min_soc: Option<Value>,
}

impl From<VehicleDto> for Vehicle {
    fn from(dto: VehicleDto) -> Self {
        Vehicle::new(dto.matricula)
    }
}

impl From<EfficiencyDto> for TelemetryRecord {
    fn from(dto: EfficiencyDto) -> Self {
        let consumption = |key: &str| {
            dto.energy_consumption
                .as_ref()
                .and_then(|c| c.get(key))
                .and_then(coerce_f64)
        };

        TelemetryRecord {
            time: dto.ev_time.as_deref().and_then(parse_timestamp),
            soc: dto.soc.as_ref().and_then(coerce_f64),
            mileage: dto.mileage.as_ref().and_then(coerce_f64),
            energy_consumption_ave: consumption("ave"),
            energy_consumption_rt: consumption("rt"),
            outside_temp: dto.outside_temp.as_ref().and_then(coerce_f64),
            inside_temp: dto.inside_temp.as_ref().and_then(coerce_f64),
            speed: dto.speed.as_ref().and_then(coerce_f64),
        }
    }
}

impl TryFrom<SocBinDto> for SocBin {
    type Error = String;

    fn try_from(dto: SocBinDto) -> Result<Self, Self::Error> {
        let interval_start = parse_timestamp(&dto.id.interval)
            .ok_or_else(|| format!("invalid bin interval {:?}", dto.id.interval))?;

        Ok(SocBin {
            interval_start,
            min_soc: dto.min_soc.as_ref().and_then(coerce_f64),
            avg_soc: dto.avg_soc.as_ref().and_then(coerce_f64),
            max_soc: dto.max_soc.as_ref().and_then(coerce_f64),
            sample_count: dto.count.as_ref().and_then(coerce_count).unwrap_or(0),
        })
    }
}

impl From<StatusDto> for StatusRecord {
    fn from(dto: StatusDto) -> Self {
        StatusRecord {
            time: dto.ev_time.as_deref().and_then(parse_timestamp),
            gearbox: GearboxStatus::from_wire(dto.gb_status.as_deref().unwrap_or_default()),
            charge: ChargeStatus::from_wire(dto.gb_charge.as_deref().unwrap_or_default()),
            vehicle: VehicleStatus::from_wire(dto.ev_status.as_deref().unwrap_or_default()),
        }
    }
}

impl From<DailyMaximaDto> for DailyMaxima {
    fn from(dto: DailyMaximaDto) -> Self {
        DailyMaxima {
            max_distance: dto.max_distance.as_ref().and_then(coerce_f64),
            max_energy_consumption_ave: dto
                .max_energy_consumption_ave
                .as_ref()
                .and_then(coerce_f64),
        }
    }
}

impl From<LowSocDto> for LowSocRecord {
    fn from(dto: LowSocDto) -> Self {
        LowSocRecord {
            date: dto.fecha,
            registration: dto.matricula,
            min_soc: dto.min_soc.as_ref().and_then(coerce_f64),
        }
    }
}

/// Numbers and numeric strings become values; anything else is missing.
fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Non-negative whole counts; fractions are truncated.
fn coerce_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    coerce_f64(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.trunc() as u64)
}

/// RFC 3339, or a naive ISO-8601 date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
