// Import modules
mod handlers;
mod model;
mod shutdown;
mod validation;

use axum::{routing::get, Router};
use miette::IntoDiagnostic;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use vacation_planner::startup;

use crate::handlers::{
    create_vacation_handler, health_handler, list_employees_handler, list_vacations_handler,
};
use crate::model::{InMemoryStore, VacationStore};

const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct AppState {
    /// Employee and vacation storage
    pub store: Arc<dyn VacationStore>,
}

/// Build the router with all routes and middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/employees", get(list_employees_handler))
        .route(
            "/vacation-requests",
            get(list_vacations_handler).post(create_vacation_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn bind_address() -> SocketAddr {
    let ip = match std::env::var("BIND_ADDR") {
        Ok(raw) => raw.parse::<IpAddr>().unwrap_or_else(|_| {
            warn!("Ignoring invalid BIND_ADDR {}", raw);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }),
        Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
    };
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::new(ip, port)
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    startup::init_logging("info,tower_http=debug")?;

    info!("Starting vacation request server");

    let state = AppState {
        store: Arc::new(InMemoryStore::seeded()),
    };

    let addr = bind_address();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.into_diagnostic()?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .into_diagnostic()?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState {
            store: Arc::new(InMemoryStore::seeded()),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_post_vacation_requests_route() {
        let payload = json!({
            "employee_id": 3,
            "dates": [{"date": "2024-07-01", "start_time": "19:00", "end_time": "20:00"}]
        });
        let response = test_app()
            .oneshot(
                Request::post("/vacation-requests")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["requests"][0]["employee_name"], "Charlie");
        assert_eq!(body["requests"][0]["start_time"], "19:00");
    }

    #[tokio::test]
    async fn test_validation_error_route() {
        let response = test_app()
            .oneshot(
                Request::post("/vacation-requests")
                    .body(Body::from(r#"{"dates": ["2024-07-01"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "employee_id is required"})
        );
    }
}
