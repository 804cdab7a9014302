use serde::{Deserialize, Serialize};

/// Cargo size bucket used by the fitted pipeline's categorical encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    Oversized,
}

impl SizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
            SizeCategory::Large => "Large",
            SizeCategory::Oversized => "Oversized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportType {
    Manual,
    Forklift,
}

impl TransportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Manual => "Manual",
            TransportType::Forklift => "Forklift",
        }
    }
}

/// One slot-prediction request. Wire field names follow the schema the
/// classifier was trained against, hence the capitalized renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoSlotRequest {
    #[serde(rename = "Cargo_ID")]
    pub cargo_id: String,
    #[serde(rename = "Size_Category")]
    pub size_category: SizeCategory,
    #[serde(rename = "Weight")]
    pub weight_kg: f64,
    #[serde(rename = "Hazardous")]
    pub hazardous: u8,
    #[serde(rename = "Stackable")]
    pub stackable: u8,
    #[serde(rename = "Duration")]
    pub duration_days: i64,
    #[serde(rename = "Transport_Type")]
    pub transport_type: TransportType,
    /// 10x10 grid of 0/1 availability flags, row-major.
    #[serde(rename = "Slot_Matrix")]
    pub slot_matrix: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(rename = "Cargo_ID")]
    pub cargo_id: String,
    pub optimum_slot: String,
}
