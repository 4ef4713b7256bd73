// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::efficiency_service::EfficiencyService;
use crate::application::low_soc_service::LowSocService;
use crate::application::soc_service::SocService;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::application::vehicle_service::VehicleService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::planner_stats_repository::PlannerStatsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn TelemetryRepository> =
        Arc::new(PlannerStatsRepository::new(&config.api)?);

    // Create services (application layer)
    let state = Arc::new(AppState {
        vehicle_service: VehicleService::new(repository.clone()),
        low_soc_service: LowSocService::new(repository.clone()),
        soc_service: SocService::new(repository.clone()),
        efficiency_service: EfficiencyService::new(repository),
        default_bin_minutes: config.views.default_bin_minutes,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting fleet-soc-telemetry on {} (upstream {})",
        addr,
        config.api.base_url
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
