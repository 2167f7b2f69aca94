//! Shared test helper functions for building SIM and device fixtures.
//!
//! There is no HTTP endpoint to create records, so fixtures go straight
//! through the services layer.

use crate::devices::models::{Device, NewDevice, READY_STATUS};
use crate::devices::services::create_device;
use crate::sims::models::{Sim, SimStatus};
use crate::sims::services::insert_sims;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Extract response body as JSON for testing. An empty body reads as `Null`.
pub async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    use axum::body::to_bytes;

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({"error": "Invalid JSON response"}));
    (status, body)
}

/// Send a request with an optional JSON body through the router
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    extract_response_body(response).await
}

pub fn sim(id: i64, operator_code: i32, country: &str, status: SimStatus) -> Sim {
    Sim {
        id,
        operator_code,
        country: country.to_string(),
        status,
    }
}

/// Store a SIM and return it
pub async fn create_test_sim(
    db: &DatabaseConnection,
    id: i64,
    operator_code: i32,
    country: &str,
    status: SimStatus,
) -> Sim {
    let sim = sim(id, operator_code, country, status);
    insert_sims(db, vec![sim.clone()], 1)
        .await
        .expect("Failed to create test sim");
    sim
}

/// Store a device with the given fields
pub async fn create_test_device(
    db: &DatabaseConnection,
    status: Option<&str>,
    temperature: Option<f32>,
    sim_id: Option<i64>,
) -> Device {
    create_device(
        db,
        NewDevice {
            status: status.map(ToString::to_string),
            temperature,
            sim_id,
        },
    )
    .await
    .expect("Failed to create test device")
}

/// Store a READY device at `temperature` holding `sim_id`
pub async fn create_ready_device(db: &DatabaseConnection, temperature: f32, sim_id: i64) -> Device {
    create_test_device(db, Some(READY_STATUS), Some(temperature), Some(sim_id)).await
}
