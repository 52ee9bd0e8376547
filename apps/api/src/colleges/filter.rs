//! District allow-list and program-name filtering for college lookups.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// Districts the directory covers.
pub const SUPPORTED_DISTRICTS: &[&str] = &["Kalaburagi", "Koppal"];

/// Common shorthand → term searched for in a college's `programs`.
const PROGRAM_ALIASES: &[(&str, &str)] = &[
    ("puc", "PUC"),
    ("commerce", "Commerce"),
    ("science", "Science"),
    ("arts", "Arts"),
    ("iti", "ITI"),
    ("diploma", "Diploma"),
    ("cs", "Computer Science"),
    ("cse", "Computer Science"),
];

pub fn is_supported_district(district: &str) -> bool {
    SUPPORTED_DISTRICTS.contains(&district)
}

/// Case-insensitive literal matcher for a user-supplied program term.
/// Returns `Ok(None)` when the term is blank (no filtering).
pub fn program_matcher(program: &str) -> Result<Option<Regex>, regex::Error> {
    let term = program.trim().to_lowercase();
    if term.is_empty() {
        return Ok(None);
    }

    let effective = PROGRAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == term)
        .map(|(_, expanded)| (*expanded).to_string())
        .unwrap_or(term);

    RegexBuilder::new(&regex::escape(&effective))
        .case_insensitive(true)
        .build()
        .map(Some)
}

/// Keeps colleges with at least one entry in `programs` matching `matcher`.
/// Records without a `programs` array are dropped.
pub fn filter_by_program(colleges: Vec<Value>, matcher: &Regex) -> Vec<Value> {
    colleges
        .into_iter()
        .filter(|college| {
            college
                .get("programs")
                .and_then(Value::as_array)
                .is_some_and(|programs| {
                    programs
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|p| matcher.is_match(p))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colleges() -> Vec<Value> {
        vec![
            json!({"name": "A", "programs": ["PUC Science", "PUC Commerce"]}),
            json!({"name": "B", "programs": ["B.E. Computer Science"]}),
            json!({"name": "C", "programs": ["ITI Fitter", "Diploma (Civil)"]}),
            json!({"name": "D"}),
        ]
    }

    fn names(colleges: &[Value]) -> Vec<&str> {
        colleges.iter().filter_map(|c| c["name"].as_str()).collect()
    }

    fn filtered(program: &str) -> Vec<Value> {
        let matcher = program_matcher(program).unwrap().unwrap();
        filter_by_program(colleges(), &matcher)
    }

    #[test]
    fn test_supported_districts() {
        assert!(is_supported_district("Kalaburagi"));
        assert!(is_supported_district("Koppal"));
        assert!(!is_supported_district("Bengaluru"));
        assert!(!is_supported_district("koppal"));
    }

    #[test]
    fn test_partial_case_insensitive_match() {
        assert_eq!(names(&filtered("science")), vec!["A", "B"]);
    }

    #[test]
    fn test_alias_expands_before_matching() {
        assert_eq!(names(&filtered(" CSE ")), vec!["B"]);
        assert_eq!(names(&filtered("iti")), vec!["C"]);
    }

    #[test]
    fn test_special_characters_match_literally() {
        assert_eq!(names(&filtered("(civil)")), vec!["C"]);
        assert_eq!(names(&filtered("B.E.")), vec!["B"]);
        assert!(filtered(".*").is_empty());
    }

    #[test]
    fn test_blank_program_means_no_filter() {
        assert!(program_matcher("   ").unwrap().is_none());
    }
}
