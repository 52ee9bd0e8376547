//! Structural validation of provider payloads.
//!
//! Adapters only guarantee "parses as JSON". Before the orchestrator accepts a
//! provider's answer, the value must match the shape its request kind expects.
//! Fails closed: any missing or mistyped field rejects the whole payload.
//! Text fields are trimmed; unknown fields are dropped.

use serde_json::Value;

use crate::generation::request::{CareerDetails, GenerationPayload, QuizQuestion, RequestKind};

/// Every quiz question must offer at least this many options.
const MIN_QUIZ_OPTIONS: usize = 2;
/// Upper bound on suggested career titles.
const MAX_CAREER_TITLES: usize = 5;

/// Converts `payload` into the typed payload for `kind`, or explains why not.
pub fn validate(kind: RequestKind, payload: Value) -> Result<GenerationPayload, String> {
    match kind {
        RequestKind::Quiz => validate_quiz(&payload).map(GenerationPayload::Quiz),
        RequestKind::Titles => validate_titles(&payload).map(GenerationPayload::Titles),
        RequestKind::Details => validate_details(&payload).map(GenerationPayload::Details),
    }
}

fn validate_quiz(payload: &Value) -> Result<Vec<QuizQuestion>, String> {
    let items = payload
        .as_array()
        .ok_or_else(|| format!("quiz must be an array, got {}", type_name(payload)))?;
    if items.is_empty() {
        return Err("quiz contains no questions".to_string());
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(format!("quiz item {i} is not an object"));
            }
            let question = non_blank_text(item.get("question"))
                .ok_or_else(|| format!("quiz item {i}: `question` missing or empty"))?;
            let options = text_list(item.get("options"))
                .ok_or_else(|| format!("quiz item {i}: `options` must be a list of text"))?;
            if options.len() < MIN_QUIZ_OPTIONS {
                return Err(format!(
                    "quiz item {i}: needs at least {MIN_QUIZ_OPTIONS} options, got {}",
                    options.len()
                ));
            }
            Ok(QuizQuestion { question, options })
        })
        .collect()
}

fn validate_titles(payload: &Value) -> Result<Vec<String>, String> {
    let titles = text_list(Some(payload))
        .ok_or_else(|| "career titles must be an array of non-empty text".to_string())?;
    if titles.is_empty() || titles.len() > MAX_CAREER_TITLES {
        return Err(format!(
            "expected 1-{MAX_CAREER_TITLES} career titles, got {}",
            titles.len()
        ));
    }
    Ok(titles)
}

fn validate_details(payload: &Value) -> Result<CareerDetails, String> {
    if !payload.is_object() {
        return Err(format!(
            "career details must be an object, got {}",
            type_name(payload)
        ));
    }

    let description = payload
        .get("description")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or("`description` missing or not text")?;
    let degree_programs = non_empty_text_list(payload, "degree_programs")?;
    let course_to_career_mapping = non_empty_text_list(payload, "course_to_career_mapping")?;
    let mermaid_code =
        non_blank_text(payload.get("mermaid_code")).ok_or("`mermaid_code` missing or empty")?;

    Ok(CareerDetails {
        description,
        degree_programs,
        course_to_career_mapping,
        mermaid_code,
    })
}

fn non_empty_text_list(payload: &Value, key: &str) -> Result<Vec<String>, String> {
    match text_list(payload.get(key)) {
        Some(list) if !list.is_empty() => Ok(list),
        Some(_) => Err(format!("`{key}` is empty")),
        None => Err(format!("`{key}` missing or not a list of text")),
    }
}

/// Trimmed text, `None` unless `value` is a non-blank string.
fn non_blank_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `None` unless `value` is an array whose every element is non-blank text.
fn text_list(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|v| non_blank_text(Some(v)))
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
