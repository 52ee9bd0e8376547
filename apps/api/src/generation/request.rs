//! Generation requests and the typed payloads each request kind produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The student's completed schooling level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Qualification {
    #[serde(rename = "10")]
    Tenth,
    #[serde(rename = "12")]
    Twelfth,
}

impl Qualification {
    pub fn as_str(self) -> &'static str {
        match self {
            Qualification::Tenth => "10",
            Qualification::Twelfth => "12",
        }
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Qualification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "10" => Ok(Qualification::Tenth),
            "12" => Ok(Qualification::Twelfth),
            other => Err(format!("qualification must be \"10\" or \"12\", got \"{other}\"")),
        }
    }
}

/// One answered quiz question. Wire form: `{"q": 1, "a": "Math"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    #[serde(rename = "q", alias = "question_id")]
    pub question_id: u32,
    #[serde(rename = "a", alias = "selected_option")]
    pub selected_option: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Quiz,
    Titles,
    Details,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestKind::Quiz => "quiz",
            RequestKind::Titles => "career titles",
            RequestKind::Details => "career details",
        };
        f.write_str(label)
    }
}

/// One inbound generation call. Built per request, consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Quiz {
        qualification: Qualification,
    },
    Titles {
        qualification: Qualification,
        answers: Vec<QuizAnswer>,
    },
    Details {
        qualification: Qualification,
        career_title: String,
    },
}

impl GenerationRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            GenerationRequest::Quiz { .. } => RequestKind::Quiz,
            GenerationRequest::Titles { .. } => RequestKind::Titles,
            GenerationRequest::Details { .. } => RequestKind::Details,
        }
    }

    pub fn qualification(&self) -> Qualification {
        match self {
            GenerationRequest::Quiz { qualification }
            | GenerationRequest::Titles { qualification, .. }
            | GenerationRequest::Details { qualification, .. } => *qualification,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// Roadmap for one career title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerDetails {
    pub description: String,
    pub degree_programs: Vec<String>,
    pub course_to_career_mapping: Vec<String>,
    /// mermaid.js flowchart source, without code fences.
    pub mermaid_code: String,
}

/// A validated provider payload. Serializes as the bare JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenerationPayload {
    Quiz(Vec<QuizQuestion>),
    Titles(Vec<String>),
    Details(CareerDetails),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qualification_parses_trimmed_values() {
        assert_eq!(" 10 ".parse::<Qualification>(), Ok(Qualification::Tenth));
        assert_eq!("12".parse::<Qualification>(), Ok(Qualification::Twelfth));
        assert!("11".parse::<Qualification>().is_err());
        assert!("tenth".parse::<Qualification>().is_err());
    }

    #[test]
    fn test_qualification_serde_uses_digits() {
        let q: Qualification = serde_json::from_str(r#""12""#).unwrap();
        assert_eq!(q, Qualification::Twelfth);
        assert_eq!(serde_json::to_string(&Qualification::Tenth).unwrap(), r#""10""#);
    }

    #[test]
    fn test_quiz_answer_accepts_short_and_long_keys() {
        let short: QuizAnswer = serde_json::from_value(json!({"q": 1, "a": "Math"})).unwrap();
        let long: QuizAnswer =
            serde_json::from_value(json!({"question_id": 1, "selected_option": "Math"})).unwrap();
        assert_eq!(short, long);
        assert_eq!(serde_json::to_value(&short).unwrap(), json!({"q": 1, "a": "Math"}));
    }

    #[test]
    fn test_request_kind_and_qualification() {
        let request = GenerationRequest::Details {
            qualification: Qualification::Twelfth,
            career_title: "Architect".to_string(),
        };
        assert_eq!(request.kind(), RequestKind::Details);
        assert_eq!(request.qualification(), Qualification::Twelfth);
    }

    #[test]
    fn test_payload_serializes_untagged() {
        let payload = GenerationPayload::Titles(vec!["Pilot".to_string()]);
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!(["Pilot"]));
    }
}
