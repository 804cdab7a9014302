use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};
use crate::models::cargo::{CargoSlotRequest, PredictionResult};
use crate::services::features::{build_feature_record, FeatureRecord};
use crate::services::slots::{index_to_slot, SLOT_COUNT};

/// Output of the preprocessing pipeline, opaque to this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tensor(pub Vec<f64>);

/// Narrow interface over the externally trained model artifacts. The
/// service never sees how or where they are hosted.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Run the fitted preprocessing pipeline over one feature record.
    async fn transform(&self, record: &FeatureRecord) -> ApiResult<Tensor>;

    /// Score a preprocessed tensor into a probability distribution over
    /// the 100 slots.
    async fn predict(&self, tensor: &Tensor) -> ApiResult<Vec<f64>>;
}

/// Predict the best slot for one cargo request: build the feature row,
/// let the external pipeline and classifier score it, then decode the
/// arg-max index back to a slot code.
pub async fn predict_slot(
    predictor: &dyn Predictor,
    req: &CargoSlotRequest,
) -> ApiResult<PredictionResult> {
    let record = build_feature_record(req)?;
    let tensor = predictor.transform(&record).await?;
    let distribution = predictor.predict(&tensor).await?;

    if distribution.len() != SLOT_COUNT {
        return Err(ApiError::upstream(
            "inference",
            format!(
                "expected {} class probabilities, got {}",
                SLOT_COUNT,
                distribution.len()
            ),
        ));
    }

    let idx = argmax(&distribution)
        .ok_or_else(|| ApiError::upstream("inference", "empty probability vector"))?;
    let slot = index_to_slot(idx)
        .ok_or_else(|| ApiError::upstream("inference", format!("slot index {idx} out of range")))?;

    Ok(PredictionResult {
        cargo_id: req.cargo_id.clone(),
        optimum_slot: slot.to_string(),
    })
}

/// Index of the largest value; the first maximal element wins ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best = *values.first()?;
    let mut best_idx = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best {
            best = v;
            best_idx = i;
        }
    }
    Some(best_idx)
}

/// `Predictor` backed by a remote inference service that holds the model
/// artifacts. Every call carries the configured timeout.
pub struct HttpPredictor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictor {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TransformResponse {
    tensor: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    probabilities: Vec<f64>,
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn transform(&self, record: &FeatureRecord) -> ApiResult<Tensor> {
        let url = format!("{}/transform", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ApiError::upstream("inference", e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::upstream(
                "inference",
                format!("transform returned {}", response.status()),
            ));
        }

        let body: TransformResponse = response
            .json()
            .await
            .map_err(|e| ApiError::upstream("inference", e.to_string()))?;
        Ok(Tensor(body.tensor))
    }

    async fn predict(&self, tensor: &Tensor) -> ApiResult<Vec<f64>> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "tensor": tensor.0 }))
            .send()
            .await
            .map_err(|e| ApiError::upstream("inference", e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::upstream(
                "inference",
                format!("predict returned {}", response.status()),
            ));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ApiError::upstream("inference", e.to_string()))?;
        Ok(body.probabilities)
    }
}
