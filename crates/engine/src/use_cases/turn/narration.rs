//! Narration client: one chat completion per turn, parsed leniently.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use questscribe_domain::NarrationResult;

use crate::infrastructure::ports::{ChatMessage, LlmPort, LlmRequest, ResponseFormat};

/// Sampling temperature for narration calls.
pub const NARRATION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrationParseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Response JSON is not an object")]
    NotAnObject,
}

/// Talks to the narration model. `narrate` always yields a result.
pub struct Narrator {
    llm: Option<Arc<dyn LlmPort>>,
    timeout: Duration,
}

impl Narrator {
    pub fn new(llm: Arc<dyn LlmPort>, timeout: Duration) -> Self {
        Self {
            llm: Some(llm),
            timeout,
        }
    }

    /// Narrator for deployments without a service credential.
    pub fn disabled() -> Self {
        Self {
            llm: None,
            timeout: Duration::ZERO,
        }
    }

    pub async fn narrate(&self, system: &str, user: &str) -> NarrationResult {
        let Some(llm) = &self.llm else {
            return NarrationResult::missing_credentials();
        };

        let request = LlmRequest::new(vec![ChatMessage::user(user)])
            .with_system_prompt(system)
            .with_temperature(NARRATION_TEMPERATURE)
            .with_response_format(ResponseFormat::JsonObject);

        let response = match tokio::time::timeout(self.timeout, llm.generate(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Narration request failed");
                return NarrationResult::fallback();
            }
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.timeout.as_secs(),
                    "Narration request timed out"
                );
                return NarrationResult::fallback();
            }
        };

        match parse_narration(strip_code_fence(&response.content)) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Unusable narration response");
                NarrationResult::fallback()
            }
        }
    }
}

/// Remove a Markdown code fence wrapped around the whole response.
///
/// The opening line (```` ``` ```` or ```` ```json ````) is dropped, and the
/// last line too when it is a bare closing fence.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }

    let Some((_, body)) = text.split_once('\n') else {
        return "";
    };
    match body.rsplit_once('\n') {
        Some((inner, last)) if last.trim() == "```" => inner,
        None if body.trim() == "```" => "",
        _ => body,
    }
}

/// Parse model output into a [`NarrationResult`].
///
/// The text must be a JSON object. Inside it, a missing or wrong-typed field
/// becomes its neutral default, and non-string `new_items` elements are dropped.
pub fn parse_narration(text: &str) -> Result<NarrationResult, NarrationParseError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| NarrationParseError::InvalidJson(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(NarrationParseError::NotAnObject);
    };

    Ok(NarrationResult {
        narrative: fields
            .get("narrative")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        hp_change: delta(&fields, "hp_change"),
        xp_change: delta(&fields, "xp_change"),
        gold_change: delta(&fields, "gold_change"),
        new_items: fields
            .get("new_items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

/// Integer delta; whole-valued floats like `5.0` are accepted too.
fn delta(fields: &Map<String, Value>, key: &str) -> i64 {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
                .unwrap_or(0)
        }),
        _ => 0,
    }
}
