//! Answer validation and grading.

use serde::Serialize;

use crate::distractor::{MultipleChoice, CHOICE_LETTERS};
use crate::model::Level;

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Grade {
    pub correct: bool,
    /// The synonym the answer matched, when it did not match the response itself.
    pub matched_synonym: Option<String>,
}

/// Normalize text for comparison: lowercase, drop whitespace and hyphen/dash characters.
pub fn standardize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '\u{2013}' | '\u{2014}'))
        .collect()
}

fn parse_letter(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Whether `input` may be graded at all. Invalid input should be re-prompted.
///
/// Multiple-choice input must be one of the offered letters; free-entry input
/// must be non-empty after trimming.
pub fn is_valid_input(level: Level, input: &str, choices: Option<&MultipleChoice>) -> bool {
    if level.is_free_entry() {
        return !input.trim().is_empty();
    }
    match (parse_letter(input), choices) {
        (Some(letter), Some(mc)) => mc.text_for(letter).is_some(),
        (Some(letter), None) => CHOICE_LETTERS.contains(&letter),
        (None, _) => false,
    }
}

/// Grade an answer against the response and its synonyms.
///
/// In multiple-choice mode the letter is resolved through `choices` and the
/// resulting text compared case-insensitively; a letter that resolves to
/// nothing is incorrect. Free-entry answers are compared after
/// [`standardize`], first to the response and then to each synonym in order.
pub fn grade(
    level: Level,
    input: &str,
    response: &str,
    synonyms: &[&str],
    choices: Option<&MultipleChoice>,
) -> Grade {
    if !level.is_free_entry() {
        let chosen = parse_letter(input).and_then(|l| choices.and_then(|mc| mc.text_for(l)));
        return Grade {
            correct: chosen.is_some_and(|text| text.to_lowercase() == response.to_lowercase()),
            matched_synonym: None,
        };
    }

    let answer = standardize(input);
    if answer == standardize(response) {
        return Grade {
            correct: true,
            matched_synonym: None,
        };
    }

    match synonyms.iter().find(|s| standardize(s) == answer) {
        Some(synonym) => Grade {
            correct: true,
            matched_synonym: Some(synonym.to_string()),
        },
        None => Grade::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardize_strips_case_space_and_dashes() {
        assert_eq!(standardize("Hong-Kong"), standardize("hong kong"));
        assert_eq!(standardize(" New\tYork "), "newyork");
        assert_eq!(standardize("A\u{2013}B\u{2014}C"), "abc");
    }

    #[test]
    fn free_entry_matches_response() {
        let grade = grade(Level::Unassisted, "paris", "Paris", &[], None);
        assert!(grade.correct);
        assert!(grade.matched_synonym.is_none());
    }

    #[test]
    fn free_entry_matches_first_synonym() {
        let grade = grade(
            Level::Hinted,
            "bombay",
            "Mumbai",
            &["Bombay", "bom-bay"],
            None,
        );
        assert!(grade.correct);
        assert_eq!(grade.matched_synonym.as_deref(), Some("Bombay"));
    }

    #[test]
    fn free_entry_wrong_answer() {
        let grade = grade(Level::Unassisted, "Pariss", "Paris", &["Lutetia"], None);
        assert_eq!(grade, Grade::default());
    }

    #[test]
    fn validity_rules() {
        assert!(!is_valid_input(Level::Unassisted, "   ", None));
        assert!(is_valid_input(Level::Hinted, "x", None));
        assert!(is_valid_input(Level::MultipleChoice, "B", None));
        assert!(!is_valid_input(Level::MultipleChoice, "e", None));
        assert!(!is_valid_input(Level::MultipleChoice, "ab", None));
        assert!(!is_valid_input(Level::MultipleChoice, "", None));
    }
}
