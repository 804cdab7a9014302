//! Endpoint tests exercising the router in-process with stubbed external
//! collaborators, so nothing touches the network.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use slotyard::config::Config;
use slotyard::create_router;
use slotyard::error::{ApiError, ApiResult};
use slotyard::services::features::FeatureRecord;
use slotyard::services::insights::GenerativeClient;
use slotyard::services::predictor::{Predictor, Tensor};
use slotyard::services::AppState;

struct StubPredictor {
    distribution: Vec<f64>,
}

#[async_trait]
impl Predictor for StubPredictor {
    async fn transform(&self, record: &FeatureRecord) -> ApiResult<Tensor> {
        assert_eq!(record.len(), 107, "pipeline contract is 107 columns");
        Ok(Tensor(vec![0.0; 8]))
    }

    async fn predict(&self, _tensor: &Tensor) -> ApiResult<Vec<f64>> {
        Ok(self.distribution.clone())
    }
}

struct StubGenerative {
    reply: String,
}

#[async_trait]
impl GenerativeClient for StubGenerative {
    async fn generate(&self, prompt: &str) -> ApiResult<String> {
        assert!(prompt.contains("cargo arrival schedule"));
        Ok(self.reply.clone())
    }
}

struct FailingGenerative;

#[async_trait]
impl GenerativeClient for FailingGenerative {
    async fn generate(&self, _prompt: &str) -> ApiResult<String> {
        Err(ApiError::upstream("Gemini", "connection refused"))
    }
}

fn test_config() -> Config {
    Config {
        port: 0,
        inference_url: "http://127.0.0.1:9".to_string(),
        gemini_api_key: "test-key".to_string(),
        gemini_url: "http://127.0.0.1:9".to_string(),
        gemini_model: "gemini-2.0-flash-exp".to_string(),
        request_timeout_secs: 5,
    }
}

fn app_with(
    predictor: Arc<dyn Predictor>,
    generative: Arc<dyn GenerativeClient>,
) -> axum::Router {
    let state = Arc::new(AppState::with_clients(test_config(), predictor, generative));
    create_router(state)
}

fn default_app(distribution: Vec<f64>, reply: &str) -> axum::Router {
    app_with(
        Arc::new(StubPredictor { distribution }),
        Arc::new(StubGenerative {
            reply: reply.to_string(),
        }),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn cargo_request(matrix: Value) -> Value {
    json!({
        "Cargo_ID": "C00001",
        "Size_Category": "Medium",
        "Weight": 50.0,
        "Hazardous": 0,
        "Stackable": 1,
        "Duration": 2,
        "Transport_Type": "Forklift",
        "Slot_Matrix": matrix
    })
}

fn full_matrix() -> Value {
    json!(vec![vec![0u8; 10]; 10])
}

fn distribution_with_max(idx: usize) -> Vec<f64> {
    let mut dist = vec![0.0; 100];
    dist[idx] = 0.9;
    dist
}

#[tokio::test]
async fn health_probe_answers() {
    let app = default_app(distribution_with_max(0), "[]");

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn optimum_slots_decodes_argmax_to_slot_code() {
    let app = default_app(distribution_with_max(1), "[]");

    let request = post_json("/get-optimum-slots", json!([cargo_request(full_matrix())]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["slots"][0]["Cargo_ID"], "C00001");
    assert_eq!(body["slots"][0]["optimum_slot"], "A2");
}

#[tokio::test]
async fn optimum_slots_handles_a_batch() {
    let app = default_app(distribution_with_max(99), "[]");

    let request = post_json(
        "/get-optimum-slots",
        json!([cargo_request(full_matrix()), cargo_request(full_matrix())]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["slots"].as_array().unwrap().len(), 2);
    assert_eq!(body["slots"][1]["optimum_slot"], "J10");
}

#[tokio::test]
async fn short_slot_matrix_is_rejected_with_the_fixed_message() {
    let app = default_app(distribution_with_max(0), "[]");

    // 99 cells: last row only has 9 entries
    let mut rows = vec![vec![0u8; 10]; 9];
    rows.push(vec![0u8; 9]);
    let request = post_json("/get-optimum-slots", json!([cargo_request(json!(rows))]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Slot_Matrix must be a 10x10 matrix"));
}

#[tokio::test]
async fn one_bad_record_aborts_the_whole_batch() {
    let app = default_app(distribution_with_max(0), "[]");

    let request = post_json(
        "/get-optimum-slots",
        json!([
            cargo_request(full_matrix()),
            cargo_request(json!([[1, 0]]))
        ]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    // No partial results alongside the error
    assert!(body.get("slots").is_none());
}

#[tokio::test]
async fn insights_returns_three_suggestions_from_fenced_reply() {
    let app = default_app(
        distribution_with_max(0),
        "```json\n[\"Unload C1 first\",\"Pair forklifts\",\"Stagger arrivals\"]\n```",
    );

    let request = post_json(
        "/get-insights",
        json!([
            { "cargo_id": "C1", "expected_arrival_time": "09:30", "transport_type": "manual" },
            { "cargo_id": "C2", "expected_arrival_time": "08:15", "transport_type": "forklift" }
        ]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["suggestions"],
        json!(["Unload C1 first", "Pair forklifts", "Stagger arrivals"])
    );
}

#[tokio::test]
async fn unparseable_model_reply_gets_the_retry_message() {
    let app = default_app(distribution_with_max(0), "Here are some thoughts...");

    let request = post_json(
        "/get-insights",
        json!([{ "cargo_id": "C1", "expected_arrival_time": "09:30", "transport_type": "manual" }]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Error parsing Gemini response. Try again.");
}

#[tokio::test]
async fn empty_arrival_schedule_is_rejected() {
    let app = default_app(distribution_with_max(0), "[]");

    let request = post_json("/get-insights", json!([]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_arrival_time_is_rejected() {
    let app = default_app(distribution_with_max(0), "[]");

    let request = post_json(
        "/get-insights",
        json!([{ "cargo_id": "C1", "expected_arrival_time": "half past nine", "transport_type": "manual" }]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generative_transport_failure_maps_to_bad_gateway() {
    let app = app_with(
        Arc::new(StubPredictor {
            distribution: distribution_with_max(0),
        }),
        Arc::new(FailingGenerative),
    );

    let request = post_json(
        "/get-insights",
        json!([{ "cargo_id": "C1", "expected_arrival_time": "09:30", "transport_type": "manual" }]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    // Internal detail is not echoed to the client
    assert!(!body["detail"].as_str().unwrap().contains("connection refused"));
}
