use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::cargo::{CargoSlotRequest, PredictionResult};
use crate::services::predictor::predict_slot;
use crate::services::AppState;

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<PredictionResult>,
}

/// Predict the best storage slot for each cargo in the batch. The batch
/// is all-or-nothing: the first failing record aborts the request and no
/// partial results are returned.
pub async fn get_optimum_slots(
    State(state): State<Arc<AppState>>,
    Json(requests): Json<Vec<CargoSlotRequest>>,
) -> ApiResult<Json<SlotsResponse>> {
    let mut slots = Vec::with_capacity(requests.len());
    for request in &requests {
        let result = predict_slot(state.predictor.as_ref(), request).await?;
        tracing::debug!(cargo_id = %result.cargo_id, slot = %result.optimum_slot, "slot predicted");
        slots.push(result);
    }

    Ok(Json(SlotsResponse { slots }))
}
