use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "slotyard is up" }))
}
