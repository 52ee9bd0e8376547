// Prompt templates and the prompt builder for the Generation module.
// Reuses the JSON-only fragment from llm_client::prompts.

use serde_json::{json, Value};

use crate::generation::request::{GenerationRequest, Qualification, QuizAnswer};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Quiz prompt. Replace: {qualification}, {stage_guidance}, {json_only}
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate a short aptitude and interest quiz (3-5 questions, each with 3-5 options) for an Indian student who has just passed class {qualification}.
{stage_guidance}
- Include 1-3 questions about preferred subjects/interests for stream selection, and 1-2 questions about broader career or field interests.

Return a JSON ARRAY with this EXACT schema (no extra fields):
[
  {"question": "Which subjects do you enjoy the most?", "options": ["Mathematics", "Science", "Art"]}
]

{json_only}"#;

/// Career titles prompt. Replace: {qualification}, {answers_json}, {json_only}
pub const TITLES_PROMPT_TEMPLATE: &str = r#"A student who passed class {qualification} answered the following quiz ("q" is the question number, "a" the option they selected):
{answers_json}

Suggest the career titles that best suit this student, best match first.

Return a JSON ARRAY of 1 to 5 career titles as plain strings:
["Software Engineer", "Chartered Accountant"]

{json_only}"#;

/// Career details prompt. Replace: {qualification}, {career_title_json}, {json_only}
pub const DETAILS_PROMPT_TEMPLATE: &str = r#"Create a detailed career roadmap for the career {career_title_json} for an Indian student who has passed class {qualification}.

Return ONE JSON OBJECT with EXACTLY these keys:
{
  "description": "What the career involves and why it can suit the student",
  "degree_programs": ["B.Tech Computer Science", "BCA"],
  "course_to_career_mapping": ["Class 11-12 Science (PCM) -> B.Tech CSE -> Software Engineer"],
  "mermaid_code": "graph TD\n  A[Class 12] --> B[B.Tech]\n  B --> C[Software Engineer]"
}

Rules:
1. "degree_programs" and "course_to_career_mapping" must each list at least one entry
2. "mermaid_code" is a mermaid.js flowchart of the step-by-step roadmap from class {qualification} to the job, with key courses, degrees and milestones
3. Do NOT wrap "mermaid_code" in a code fence

{json_only}"#;

fn stage_guidance(qualification: Qualification) -> &'static str {
    match qualification {
        Qualification::Tenth => {
            "- The student finished class 10: focus on identifying interests to suggest Class 11/12 streams (Science, Commerce, Arts)."
        }
        Qualification::Twelfth => {
            "- The student finished class 12: focus on suggesting suitable undergraduate degree streams, but allow flexibility."
        }
    }
}

/// Answers as compact JSON, e.g. `[{"a":"Math","q":1}]`.
fn answers_json(answers: &[QuizAnswer]) -> String {
    Value::Array(
        answers
            .iter()
            .map(|a| json!({"q": a.question_id, "a": a.selected_option}))
            .collect(),
    )
    .to_string()
}

/// Renders the provider-agnostic prompt for `request`. Pure and deterministic.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::Quiz { qualification } => QUIZ_PROMPT_TEMPLATE
            .replace("{qualification}", qualification.as_str())
            .replace("{stage_guidance}", stage_guidance(*qualification))
            .replace("{json_only}", JSON_ONLY_INSTRUCTION),
        GenerationRequest::Titles {
            qualification,
            answers,
        } => TITLES_PROMPT_TEMPLATE
            .replace("{qualification}", qualification.as_str())
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
            .replace("{answers_json}", &answers_json(answers)),
        GenerationRequest::Details {
            qualification,
            career_title,
        } => DETAILS_PROMPT_TEMPLATE
            .replace("{qualification}", qualification.as_str())
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
            // User text goes in last, quoted and escaped, so it is never re-scanned.
            .replace(
                "{career_title_json}",
                &Value::String(career_title.clone()).to_string(),
            ),
    }
}
