use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalTransport {
    Manual,
    Forklift,
}

impl ArrivalTransport {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrivalTransport::Manual => "manual",
            ArrivalTransport::Forklift => "forklift",
        }
    }
}

/// One line of the day's arrival schedule, consumed by the insights
/// endpoint and discarded after the prompt is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoArrivalRecord {
    pub cargo_id: String,
    /// Time of day in "HH:MM" form.
    pub expected_arrival_time: String,
    pub transport_type: ArrivalTransport,
}
