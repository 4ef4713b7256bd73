// HTTP request handlers
use crate::application::efficiency_service::EfficiencyQuery;
use crate::application::error::ViewError;
use crate::application::home::landing_view;
use crate::application::soc_service::SocQuery;
use crate::domain::vehicle::filter_registrations;
use crate::domain::view::{Notice, View, ViewKind};
use crate::infrastructure::view_mapper::{notice_to_document, view_to_document, NoticeDocument};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct VehicleQuery {
    pub date: Option<NaiveDate>,
    pub search: Option<String>,
    pub registration: Option<String>,
    pub bin: Option<u32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct MenuEntry {
    pub slug: &'static str,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct VehicleListing {
    pub registrations: Vec<String>,
    pub notices: Vec<NoticeDocument>,
}

/// Views default to the previous day
fn default_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.pred_opt().unwrap_or(today)
}

fn view_response(view: View) -> Response {
    if view.has_errors() {
        tracing::warn!("{} view rendered with upstream errors", view.kind.slug());
    }
    tracing::debug!(
        "{} view: {} charts, {} tables",
        view.kind.slug(),
        view.charts().count(),
        view.tables().count()
    );
    Json(view_to_document(view)).into_response()
}

fn rejected(kind: ViewKind, title: &str, error: ViewError) -> Response {
    tracing::info!("Rejected {} request: {}", kind.slug(), error);
    let mut view = View::new(kind, title);
    view.notify(Notice::error(error.to_string()));
    (StatusCode::BAD_REQUEST, Json(view_to_document(view))).into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Sidebar entries
pub async fn list_views() -> Json<Vec<MenuEntry>> {
    Json(
        ViewKind::ALL
            .iter()
            .map(|kind| MenuEntry {
                slug: kind.slug(),
                label: kind.label(),
            })
            .collect(),
    )
}

pub async fn home_view() -> Response {
    view_response(landing_view())
}

/// Registrations matching `search`, for the vehicle picker
pub async fn list_vehicles(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<VehicleListing> {
    let mut notices = Vec::new();
    let vehicles = state.vehicle_service.list_vehicles(&mut notices).await;
    let search = query.search.unwrap_or_default();

    let registrations = filter_registrations(&vehicles, &search)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(VehicleListing {
        registrations,
        notices: notices.into_iter().map(notice_to_document).collect(),
    })
}

pub async fn low_soc_view(
    query: Result<Query<DateRangeQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let title = ViewKind::LowSoc.label();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(ViewKind::LowSoc, title, invalid_query(rejection)),
    };
    let start = query.start.unwrap_or_else(default_date);
    let end = query.end.unwrap_or_else(default_date);

    match state.low_soc_service.scan(start, end).await {
        Ok(view) => view_response(view),
        Err(e) => rejected(ViewKind::LowSoc, title, e),
    }
}

pub async fn soc_view(
    query: Result<Query<VehicleQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return rejected(ViewKind::Soc, "SOC evolution by vehicle", invalid_query(rejection));
        }
    };
    let soc_query = SocQuery {
        date: query.date.unwrap_or_else(default_date),
        search: query.search.unwrap_or_default(),
        registration: query.registration,
        bin_minutes: query.bin.unwrap_or(state.default_bin_minutes),
    };

    match state.soc_service.soc_view(&soc_query).await {
        Ok(view) => view_response(view),
        Err(e) => rejected(ViewKind::Soc, "SOC evolution by vehicle", e),
    }
}

pub async fn efficiency_view(
    query: Result<Query<VehicleQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return rejected(
                ViewKind::Efficiency,
                "Vehicle efficiency analysis",
                invalid_query(rejection),
            );
        }
    };
    let efficiency_query = EfficiencyQuery {
        date: query.date.unwrap_or_else(default_date),
        search: query.search.unwrap_or_default(),
        registration: query.registration,
    };

    view_response(state.efficiency_service.efficiency_view(&efficiency_query).await)
}

fn invalid_query(rejection: QueryRejection) -> ViewError {
    ViewError::InvalidQuery(rejection.body_text())
}
