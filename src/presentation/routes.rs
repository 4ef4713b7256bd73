// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    efficiency_view, health_check, home_view, list_vehicles, list_views, low_soc_view, soc_view,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/views", get(list_views))
        .route("/views/home", get(home_view))
        .route("/views/low-soc", get(low_soc_view))
        .route("/views/soc", get(soc_view))
        .route("/views/efficiency", get(efficiency_view))
        .route("/vehicles", get(list_vehicles))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::efficiency_service::EfficiencyService;
    use crate::application::fake_repository::{Canned, FakeRepository};
    use crate::application::low_soc_service::LowSocService;
    use crate::application::soc_service::SocService;
    use crate::application::vehicle_service::VehicleService;
    use serde_json::Value;

    async fn serve(repository: Arc<FakeRepository>) -> String {
        let state = Arc::new(AppState {
            vehicle_service: VehicleService::new(repository.clone()),
            low_soc_service: LowSocService::new(repository.clone()),
            soc_service: SocService::new(repository.clone()),
            efficiency_service: EfficiencyService::new(repository),
            default_bin_minutes: 5,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn get_json(url: String) -> (u16, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_inverted_range_is_bad_request() {
        let repository = Arc::new(FakeRepository::default());
        let base = serve(repository.clone()).await;

        let (status, body) =
            get_json(format!("{base}/views/low-soc?start=2025-05-10&end=2025-05-09")).await;

        assert_eq!(status, 400);
        assert_eq!(body["view"], "low-soc");
        assert_eq!(body["notices"][0]["level"], "error");
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_bin_size_out_of_range_is_bad_request() {
        let repository = Arc::new(FakeRepository::with_fleet(&["1111-AAA"]));
        let base = serve(repository.clone()).await;

        let (status, body) = get_json(format!("{base}/views/soc?date=2025-05-10&bin=90")).await;

        assert_eq!(status, 400);
        assert!(body["notices"][0]["text"].as_str().unwrap().contains("90"));
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_bin_is_bad_request() {
        let repository = Arc::new(FakeRepository::with_fleet(&["1111-AAA"]));
        let base = serve(repository.clone()).await;

        let (status, body) = get_json(format!("{base}/views/soc?date=2025-05-10&bin=")).await;

        assert_eq!(status, 400);
        assert_eq!(body["view"], "soc");
        assert_eq!(body["notices"][0]["level"], "error");
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let repository = Arc::new(FakeRepository::with_fleet(&["1111-AAA"]));
        let base = serve(repository.clone()).await;

        let (status, body) = get_json(format!("{base}/views/low-soc?start=not-a-date")).await;
        assert_eq!(status, 400);
        assert_eq!(body["view"], "low-soc");
        assert_eq!(body["title"], "Vehicles with low SOC (<20%)");
        assert_eq!(body["notices"][0]["level"], "error");

        let (status, body) = get_json(format!("{base}/views/efficiency?date=10/05/2025")).await;
        assert_eq!(status, 400);
        assert_eq!(body["view"], "efficiency");
        assert_eq!(body["notices"][0]["level"], "error");

        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_still_answers_ok() {
        let repository = Arc::new(FakeRepository {
            vehicles: Canned::Status(500),
            ..Default::default()
        });
        let base = serve(repository).await;

        let (status, body) = get_json(format!("{base}/views/efficiency?date=2025-05-10")).await;
        assert_eq!(status, 200);
        assert_eq!(body["notices"][0]["level"], "error");
        assert_eq!(body["notices"][1]["text"], "No vehicles found.");

        let (status, listing) = get_json(format!("{base}/vehicles")).await;
        assert_eq!(status, 200);
        assert_eq!(listing["registrations"], serde_json::json!([]));
        assert_eq!(listing["notices"][0]["level"], "error");
    }

    #[tokio::test]
    async fn test_menu_and_home() {
        let base = serve(Arc::new(FakeRepository::with_fleet(&["1111-AAA", "2222-BBB"]))).await;

        let (_, menu) = get_json(format!("{base}/views")).await;
        assert_eq!(menu.as_array().map(Vec::len), Some(4));
        assert_eq!(menu[1]["slug"], "low-soc");

        let (status, home) = get_json(format!("{base}/views/home")).await;
        assert_eq!(status, 200);
        assert_eq!(home["view"], "home");

        let (_, listing) = get_json(format!("{base}/vehicles?search=bbb")).await;
        assert_eq!(listing["registrations"], serde_json::json!(["2222-BBB"]));
    }
}
