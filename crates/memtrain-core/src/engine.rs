//! Central quiz engine.
//!
//! An [`Engine`] is built once from table rows plus front-end options and then
//! handed to whichever front end runs the session. It owns the settings, the
//! store, the alias index and the ordered list of questions to ask.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::alias::{build_aliases, AliasIndex};
use crate::distractor::{DistractorGenerator, MultipleChoice};
use crate::error::{MemtrainError, Result};
use crate::grader::{self, Grade};
use crate::model::{CueId, Level, ResponseId};
use crate::question::{render_cue, Question};
use crate::settings::Settings;
use crate::statistics::SessionStatistics;
use crate::store::{ingest, Store};

/// Options a front end supplies when building an engine.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Restrict the session to one level: `"1"`, `"2"` or `"3"`.
    pub level: Option<String>,
    /// Explicit number of questions; must be non-negative.
    pub question_count: Option<i64>,
    /// Comma-separated tags; keep only responses carrying any of them.
    pub tags: Option<String>,
    /// Comma-separated tags; drop responses carrying any of them.
    pub not_tags: Option<String>,
}

/// The quiz engine.
#[derive(Debug, Clone)]
pub struct Engine {
    settings: Settings,
    store: Store,
    aliases: AliasIndex,
    pairs: Vec<(CueId, ResponseId)>,
    level: Level,
}

impl Engine {
    /// Ingest `rows`, apply `options`, and prepare the question order.
    pub fn new<R: Rng + ?Sized>(
        rows: &[Vec<String>],
        options: &EngineOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let (mut settings, store) = ingest(rows)?;
        settings.apply_overrides(options.level.as_deref(), options.question_count)?;
        let level = settings
            .level()
            .ok_or_else(|| MemtrainError::Configuration("every level is disabled".into()))?;

        let mut pairs = store.pairs();
        if let Some(tags) = &options.tags {
            let keep = tagged_responses(&store, tags)?;
            pairs.retain(|(_, r)| keep.contains(r));
        }
        if let Some(tags) = &options.not_tags {
            let drop = tagged_responses(&store, tags)?;
            pairs.retain(|(_, r)| !drop.contains(r));
        }
        if pairs.is_empty() {
            return Err(MemtrainError::NoQuestionsAvailable);
        }

        let pairs = reconcile_count(pairs, settings.nquestions, rng);
        let aliases = build_aliases(store.responses().map(|(_, text)| text));

        tracing::info!(
            title = %settings.title,
            level = level.number(),
            total = pairs.len(),
            "engine ready"
        );

        Ok(Self {
            settings,
            store,
            aliases,
            pairs,
            level,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn aliases(&self) -> &AliasIndex {
        &self.aliases
    }

    /// The questions to ask, in order.
    pub fn pairs(&self) -> &[(CueId, ResponseId)] {
        &self.pairs
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn total(&self) -> usize {
        self.pairs.len()
    }

    /// Fresh statistics for a session over [`Engine::pairs`].
    pub fn session(&self) -> SessionStatistics {
        SessionStatistics::new(self.total())
    }

    /// Look up everything needed to ask about one cue/response pair.
    pub fn question(&self, cue_id: CueId, response_id: ResponseId) -> Result<Question> {
        let placement = self.store.placement(cue_id, response_id)?;
        Ok(Question {
            cue_id,
            response_id,
            cue: render_cue(self.store.cue(cue_id)?, placement),
            response: self.store.response(response_id)?.to_string(),
            placement,
            synonyms: to_owned(self.store.synonyms_of(response_id)),
            hints: to_owned(self.store.hints_of(response_id)),
            mixing_tags: to_owned(self.store.mixing_tags_of(response_id)),
            level: self.level,
        })
    }

    /// Multiple-choice options for a question.
    pub fn choices<R: Rng + ?Sized>(&self, question: &Question, rng: &mut R) -> Result<MultipleChoice> {
        DistractorGenerator::new(&self.store).choices(question.response_id, rng)
    }

    /// Grade an answer to `question`.
    ///
    /// With aliases enabled, a wrong free-entry answer that is an alias key is
    /// expanded to its response and graded again.
    pub fn grade(&self, question: &Question, input: &str, choices: Option<&MultipleChoice>) -> Grade {
        let synonyms = question.synonym_refs();
        let grade = grader::grade(self.level, input, &question.response, &synonyms, choices);
        if grade.correct || !self.level.is_free_entry() || !self.settings.alias {
            return grade;
        }
        match self.aliases.resolve(input) {
            Some(expanded) => {
                tracing::debug!(input, expanded, "expanded alias");
                grader::grade(self.level, expanded, &question.response, &synonyms, None)
            }
            None => grade,
        }
    }
}

fn to_owned(texts: Vec<&str>) -> Vec<String> {
    texts.into_iter().map(str::to_string).collect()
}

/// Union of responses carrying any of the comma-separated tags.
fn tagged_responses(store: &Store, tags: &str) -> Result<HashSet<ResponseId>> {
    let mut out = HashSet::new();
    for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        out.extend(store.response_ids_by_tag(tag)?);
    }
    Ok(out)
}

/// Pad or trim `pairs` to `count`, then shuffle. A count of 0 keeps every pair.
///
/// Padding samples with replacement from the original pairs; trimming
/// shuffles first and keeps the head.
pub fn reconcile_count<T: Copy, R: Rng + ?Sized>(mut pairs: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    if count != 0 && !pairs.is_empty() {
        if count > pairs.len() {
            let original = pairs.clone();
            while pairs.len() < count {
                if let Some(&pick) = original.choose(rng) {
                    pairs.push(pick);
                }
            }
        } else if count < pairs.len() {
            pairs.shuffle(rng);
            pairs.truncate(count);
        }
    }
    pairs.shuffle(rng);
    pairs
}
