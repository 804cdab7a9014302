use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::arrival::CargoArrivalRecord;
use crate::services::insights::{build_insight_prompt, parse_insight_response};
use crate::services::AppState;

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub suggestions: Vec<String>,
}

/// Turn the day's arrival schedule into three unloading suggestions from
/// the generative collaborator.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Json(records): Json<Vec<CargoArrivalRecord>>,
) -> ApiResult<Json<InsightsResponse>> {
    let prompt = build_insight_prompt(&records)?;
    let reply = state.generative.generate(&prompt).await?;
    let suggestions = parse_insight_response(&reply)?;
    tracing::debug!(count = suggestions.len(), "insights generated");

    Ok(Json(InsightsResponse { suggestions }))
}
