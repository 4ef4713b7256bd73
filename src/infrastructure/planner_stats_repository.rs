// Planner statistics API repository implementation
use crate::application::error::ApiError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::{DailyMaxima, LowSocRecord, SocBin, StatusRecord, TelemetryRecord};
use crate::domain::vehicle::Vehicle;
use crate::infrastructure::config::ApiSettings;
use crate::infrastructure::wire::{
    DailyMaximaDto, EfficiencyDto, LowSocDto, SocBinDto, StatusDto, VehicleDto,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";
const DATE_FORMAT: &str = "%Y-%m-%d";

const VEHICLES_PATH: &str = "/vehiculos";
const EFFICIENCY_PATH: &str = "/BI/vehiculoiot-eficiencia";
const SOC_BIN_PATH: &str = "/BI/vehiculoiot-socbin";
const STATUS_PATH: &str = "/BI/vehiculoiot-status";
const DAILY_MAX_PATH: &str = "/BI/vehiculoiot-maxdia";
const LOW_SOC_PATH: &str = "/BI/vehiculoiot-low-soc";

#[derive(Debug, Clone)]
pub struct PlannerStatsRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlannerStatsRepository {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.key.clone(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body. 404 is `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        let url = self.build_url(path);
        tracing::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("{} answered 404, no data", path);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| ApiError::Transport {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ApiError::Decode {
                endpoint: path.to_string(),
                message: e.to_string(),
            })
    }

    async fn get_list<D, T>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Vec<T>>, ApiError>
    where
        D: DeserializeOwned,
        T: From<D>,
    {
        let items: Option<Vec<D>> = self.get_json(path, params).await?;
        Ok(items.map(|items| items.into_iter().map(T::from).collect()))
    }
}

fn date_param(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[async_trait]
impl TelemetryRepository for PlannerStatsRepository {
    async fn list_vehicles(&self) -> Result<Option<Vec<Vehicle>>, ApiError> {
        self.get_list::<VehicleDto, Vehicle>(VEHICLES_PATH, &[]).await
    }

    async fn efficiency_series(
        &self,
        date: NaiveDate,
        registration: &str,
    ) -> Result<Option<Vec<TelemetryRecord>>, ApiError> {
        let params = [
            ("fecha", date_param(date)),
            ("matricula", registration.to_string()),
        ];
        self.get_list::<EfficiencyDto, TelemetryRecord>(EFFICIENCY_PATH, &params)
            .await
    }

    async fn soc_bins(
        &self,
        date: NaiveDate,
        registration: &str,
        bin_minutes: u32,
    ) -> Result<Option<Vec<SocBin>>, ApiError> {
        let params = [
            ("fecha", date_param(date)),
            ("matricula", registration.to_string()),
            ("bin", bin_minutes.to_string()),
        ];
        let Some(dtos) = self.get_json::<Vec<SocBinDto>>(SOC_BIN_PATH, &params).await? else {
            return Ok(None);
        };

        dtos.into_iter()
            .map(SocBin::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(|message| ApiError::Decode {
                endpoint: SOC_BIN_PATH.to_string(),
                message,
            })
    }

    async fn status_series(
        &self,
        date: NaiveDate,
        registration: &str,
    ) -> Result<Option<Vec<StatusRecord>>, ApiError> {
        let params = [
            ("fecha", date_param(date)),
            ("matricula", registration.to_string()),
        ];
        self.get_list::<StatusDto, StatusRecord>(STATUS_PATH, &params)
            .await
    }

    async fn daily_maxima(&self, date: NaiveDate) -> Result<Option<DailyMaxima>, ApiError> {
        let params = [("fecha", date_param(date))];
        let maxima: Option<DailyMaximaDto> = self.get_json(DAILY_MAX_PATH, &params).await?;
        Ok(maxima.map(DailyMaxima::from))
    }

    async fn low_soc_records(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<LowSocRecord>>, ApiError> {
        let params = [
            ("fechaInicio", date_param(start)),
            ("fechaFin", date_param(end)),
        ];
        self.get_list::<LowSocDto, LowSocRecord>(LOW_SOC_PATH, &params)
            .await
    }
}
