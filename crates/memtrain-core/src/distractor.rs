//! Multiple-choice option building.
//!
//! Wrong answers are drawn from three tiers, each shuffled independently:
//! responses sharing a mixing-tag, then responses of the same plurality, then
//! responses of the opposite plurality. A tier is only consulted once every
//! tier before it is exhausted.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::{MemtrainError, Result};
use crate::model::ResponseId;
use crate::store::Store;

/// Letters offered for multiple-choice questions, in display order.
pub const CHOICE_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Four lettered options, exactly one of which is the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipleChoice {
    options: Vec<(char, String)>,
    correct: char,
}

impl MultipleChoice {
    /// (letter, display text) pairs in letter order.
    pub fn options(&self) -> &[(char, String)] {
        &self.options
    }

    pub fn correct_letter(&self) -> char {
        self.correct
    }

    /// Display text behind a letter.
    pub fn text_for(&self, letter: char) -> Option<&str> {
        self.options
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, t)| t.as_str())
    }
}

/// A response is plural when its text ends in `s`.
pub fn is_plural(text: &str) -> bool {
    text.ends_with('s')
}

/// Uppercase the first character, leaving the rest unchanged.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds multiple-choice options from a store's responses.
#[derive(Debug, Clone, Copy)]
pub struct DistractorGenerator<'s> {
    store: &'s Store,
}

impl<'s> DistractorGenerator<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// The three candidate tiers for `response`, already shuffled.
    fn tiers<R: Rng + ?Sized>(&self, response: ResponseId, rng: &mut R) -> Result<[Vec<ResponseId>; 3]> {
        let plural = is_plural(self.store.response(response)?);

        let mut same_mtag: Vec<ResponseId> = Vec::new();
        for mtag in self.store.mixing_tag_ids(response) {
            for candidate in self.store.response_ids_by_mixing_tag(mtag) {
                if candidate != response && !same_mtag.contains(&candidate) {
                    same_mtag.push(candidate);
                }
            }
        }

        let mut same_plurality = Vec::new();
        let mut other_plurality = Vec::new();
        for (id, text) in self.store.responses() {
            if same_mtag.contains(&id) {
                continue;
            }
            if is_plural(text) == plural {
                if id != response {
                    same_plurality.push(id);
                }
            } else {
                other_plurality.push(id);
            }
        }

        same_mtag.shuffle(rng);
        same_plurality.shuffle(rng);
        other_plurality.shuffle(rng);

        tracing::debug!(
            response = %response,
            same_mtag = same_mtag.len(),
            same_plurality = same_plurality.len(),
            other_plurality = other_plurality.len(),
            "distractor tiers"
        );
        Ok([same_mtag, same_plurality, other_plurality])
    }

    /// Build four options for `response`, the correct letter chosen at random.
    ///
    /// Fails with [`MemtrainError::InsufficientData`] when fewer than three
    /// other responses exist across all tiers.
    pub fn choices<R: Rng + ?Sized>(&self, response: ResponseId, rng: &mut R) -> Result<MultipleChoice> {
        let response_text = self.store.response(response)?;
        let mut tiers = self.tiers(response, rng)?;
        let correct = CHOICE_LETTERS[rng.gen_range(0..CHOICE_LETTERS.len())];

        let mut options = Vec::with_capacity(CHOICE_LETTERS.len());
        for letter in CHOICE_LETTERS {
            let text = if letter == correct {
                response_text
            } else {
                let id = tiers
                    .iter_mut()
                    .find_map(Vec::pop)
                    .ok_or_else(|| MemtrainError::InsufficientData(response_text.to_string()))?;
                self.store.response(id)?
            };
            options.push((letter, capitalize_first(text)));
        }

        Ok(MultipleChoice { options, correct })
    }
}
