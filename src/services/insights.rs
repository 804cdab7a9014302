use async_trait::async_trait;
use chrono::NaiveTime;
use std::fmt::Write as _;

use crate::error::{ApiError, ApiResult};
use crate::models::arrival::CargoArrivalRecord;

/// The prompt asks for exactly this many suggestions and the response
/// parser holds the model to it.
pub const SUGGESTION_COUNT: usize = 3;

/// Narrow interface over the generative-language collaborator.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> ApiResult<String>;
}

/// Render the arrival schedule, sorted by arrival time, into the fixed
/// unloading-advice prompt. Sorting is stable, so records with equal
/// times keep their submitted order.
pub fn build_insight_prompt(records: &[CargoArrivalRecord]) -> ApiResult<String> {
    if records.is_empty() {
        return Err(ApiError::validation(
            "At least one arrival record is required.",
        ));
    }

    let mut parsed = records
        .iter()
        .map(|record| {
            let time = NaiveTime::parse_from_str(&record.expected_arrival_time, "%H:%M")
                .map_err(|_| {
                    ApiError::validation(format!(
                        "expected_arrival_time '{}' is not in HH:MM form",
                        record.expected_arrival_time
                    ))
                })?;
            Ok((time, record))
        })
        .collect::<ApiResult<Vec<_>>>()?;
    parsed.sort_by_key(|(time, _)| *time);

    let mut schedule = String::new();
    let _ = writeln!(
        schedule,
        "{:<12} {:<21} {:<14}",
        "cargo_id", "expected_arrival_time", "transport_type"
    );
    for (_, record) in &parsed {
        let _ = writeln!(
            schedule,
            "{:<12} {:<21} {:<14}",
            record.cargo_id,
            record.expected_arrival_time,
            record.transport_type.as_str()
        );
    }

    Ok(format!(
        "You are an AI assistant helping the management of ICD Patparganj, India's first dry port.\n\
         \n\
         Here is today's cargo arrival schedule:\n\
         {schedule}\n\
         Suggest **exactly 3 actionable steps** to efficiently unload the cargos without congestion.\n\
         Make sure to:\n\
         - Identify which cargos should be unloaded in parallel.\n\
         - Consider workforce balance between manual labor and forklifts.\n\
         - Prioritize cargo based on arrival time to avoid delays.\n\
         \n\
         Respond strictly in **JSON list format**, without markdown or any extra formatting:\n\
         [\"Suggestion 1\", \"Suggestion 2\", \"Suggestion 3\"]\n"
    ))
}

/// Parse the collaborator's reply into the three suggestions. Models
/// routinely wrap JSON in markdown fences despite instructions, so those
/// are stripped first. Anything that is not a 3-element JSON string list
/// is reported as the retry-suggesting parse error.
pub fn parse_insight_response(raw: &str) -> ApiResult<Vec<String>> {
    let cleaned = strip_code_fences(raw);
    let suggestions: Vec<String> =
        serde_json::from_str(cleaned).map_err(|_| ApiError::InsightParse)?;

    if suggestions.len() != SUGGESTION_COUNT {
        return Err(ApiError::InsightParse);
    }
    Ok(suggestions)
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}
