use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::cargo::CargoSlotRequest;
use crate::services::slots::{SLOT_COUNT, SLOT_NAMES};

/// Scalar feature columns, in the exact order and spelling the external
/// preprocessing pipeline was fitted on. Renaming or reordering anything
/// here silently produces wrong predictions, not an error.
pub const SCALAR_COLUMNS: [&str; 7] = [
    "Cargo_ID",
    "Size_Category",
    "Weight (kg)",
    "Hazardous",
    "Stackable",
    "Duration (days)",
    "Transport Type",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Float(f64),
    Int(i64),
}

/// One cargo request as an ordered, named feature row. Serialized in
/// split orientation (parallel `columns` and `values` arrays) so column
/// order survives JSON, which has no ordered-map guarantee.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRecord {
    pub columns: Vec<String>,
    pub values: Vec<FeatureValue>,
}

impl FeatureRecord {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the 107-column feature row for one request: the 7 scalars
/// followed by the flattened slot matrix, row-major, each flag labeled by
/// its slot code.
pub fn build_feature_record(req: &CargoSlotRequest) -> ApiResult<FeatureRecord> {
    if req.weight_kg <= 0.0 {
        return Err(ApiError::validation("Weight must be positive."));
    }
    if req.duration_days <= 0 {
        return Err(ApiError::validation("Duration must be positive."));
    }

    let flat: Vec<u8> = req.slot_matrix.iter().flatten().copied().collect();
    if flat.len() != SLOT_COUNT {
        return Err(ApiError::validation("Slot_Matrix must be a 10x10 matrix."));
    }

    let mut columns = Vec::with_capacity(SCALAR_COLUMNS.len() + SLOT_COUNT);
    let mut values = Vec::with_capacity(SCALAR_COLUMNS.len() + SLOT_COUNT);

    columns.extend(SCALAR_COLUMNS.iter().map(|c| c.to_string()));
    values.push(FeatureValue::Text(req.cargo_id.clone()));
    values.push(FeatureValue::Text(req.size_category.as_str().to_string()));
    values.push(FeatureValue::Float(req.weight_kg));
    values.push(FeatureValue::Int(i64::from(req.hazardous)));
    values.push(FeatureValue::Int(i64::from(req.stackable)));
    values.push(FeatureValue::Int(req.duration_days));
    values.push(FeatureValue::Text(req.transport_type.as_str().to_string()));

    for (name, flag) in SLOT_NAMES.iter().zip(flat) {
        columns.push(name.clone());
        values.push(FeatureValue::Int(i64::from(flag)));
    }

    Ok(FeatureRecord { columns, values })
}
