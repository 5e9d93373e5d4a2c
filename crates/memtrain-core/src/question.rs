//! Per-question render data and answer feedback.

use serde::Serialize;

use crate::grader::Grade;
use crate::model::{CueId, Level, ResponseId};

/// Replacement for a blank that is not being asked about.
pub const BLANK: &str = "_________";

/// Render cue placeholders for the given placement.
///
/// `{{}}` always becomes a plain blank. `{{1}}`, `{{2}}` and `{{3}}` become
/// `___(n)___` when `n` is the placement being asked, a plain blank otherwise.
pub fn render_cue(cue: &str, placement: u32) -> String {
    let mut out = cue.replace("{{}}", BLANK);
    for n in 1..=3u32 {
        let marker = format!("{{{{{n}}}}}");
        if n == placement {
            out = out.replace(&marker, &format!("___({n})___"));
        } else {
            out = out.replace(&marker, BLANK);
        }
    }
    out
}

/// Everything a front end needs to ask one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub cue_id: CueId,
    pub response_id: ResponseId,
    /// Cue text with placeholders rendered.
    pub cue: String,
    pub response: String,
    pub placement: u32,
    pub synonyms: Vec<String>,
    pub hints: Vec<String>,
    pub mixing_tags: Vec<String>,
    pub level: Level,
}

/// Verdict lines shown after an answer is graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub verdict: String,
    pub other_responses: Option<String>,
}

impl Question {
    pub fn synonym_refs(&self) -> Vec<&str> {
        self.synonyms.iter().map(String::as_str).collect()
    }

    /// Hints worth showing (non-empty).
    pub fn visible_hints(&self) -> impl Iterator<Item = &str> {
        self.hints
            .iter()
            .map(String::as_str)
            .filter(|h| !h.trim().is_empty())
    }

    pub fn feedback(&self, grade: &Grade) -> Feedback {
        let (verdict, others): (String, Vec<&str>) = match (&grade.matched_synonym, grade.correct) {
            (Some(used), true) => (
                format!("Correct. Default answer: {}", self.response),
                self.synonyms
                    .iter()
                    .map(String::as_str)
                    .filter(|s| *s != used.as_str())
                    .collect(),
            ),
            (None, true) => ("Correct.".to_string(), self.synonym_refs()),
            (_, false) => (
                format!("Incorrect. Answer: {}", self.response),
                self.synonym_refs(),
            ),
        };

        Feedback {
            verdict,
            other_responses: (!others.is_empty())
                .then(|| format!("Other correct responses: {}", others.join(", "))),
        }
    }
}
