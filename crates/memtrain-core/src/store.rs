//! Relational store built once from a raw table.
//!
//! Ingestion scans leading settings/title rows, locates the header row,
//! resolves column roles, then registers every data row's cue, responses,
//! synonyms, hints, tags and mixing-tags. The resulting [`Store`] is read-only.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{MemtrainError, Result};
use crate::model::{
    CueId, CueResponseLink, HintId, MixingTagId, ResponseId, SynonymId, TagId,
};
use crate::settings::{self, Settings};

/// Highest number of responses (blanks) a single row may carry.
pub const MAX_PLACEMENTS: usize = 3;

/// Texts deduplicated by exact content, indexed by first-seen order.
#[derive(Debug, Default, Clone)]
struct Vocabulary {
    texts: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn intern(&mut self, text: &str) -> usize {
        if let Some(&i) = self.index.get(text) {
            return i;
        }
        let i = self.texts.len();
        self.texts.push(text.to_string());
        self.index.insert(text.to_string(), i);
        i
    }

    fn get(&self, i: usize) -> Option<&str> {
        self.texts.get(i).map(String::as_str)
    }

    fn find(&self, text: &str) -> Option<usize> {
        self.index.get(text).copied()
    }

    fn len(&self) -> usize {
        self.texts.len()
    }
}

/// Many-to-many association from responses to another entity, both directions.
#[derive(Debug, Default, Clone)]
struct Relation {
    forward: HashMap<usize, Vec<usize>>,
    reverse: HashMap<usize, Vec<usize>>,
}

impl Relation {
    fn insert(&mut self, left: usize, right: usize) {
        let rights = self.forward.entry(left).or_default();
        if rights.contains(&right) {
            return;
        }
        rights.push(right);
        self.reverse.entry(right).or_default().push(left);
    }

    fn right_of(&self, left: usize) -> &[usize] {
        self.forward.get(&left).map(Vec::as_slice).unwrap_or(&[])
    }

    fn left_of(&self, right: usize) -> &[usize] {
        self.reverse.get(&right).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Columns that belong to one placement (response, synonym, hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotColumns {
    response: usize,
    synonym: Option<usize>,
    hint: Option<usize>,
}

/// Resolved column roles of the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMap {
    cue: usize,
    slots: Vec<SlotColumns>,
    tags: Vec<usize>,
    mtags: Vec<usize>,
}

const SLOT_HEADERS: [(&str, &str, &str); MAX_PLACEMENTS] = [
    ("response", "synonym", "hint"),
    ("response2", "synonym2", "hint2"),
    ("response3", "synonym3", "hint3"),
];

/// Lowercase a cell and remove all whitespace.
fn normalize_cell(cell: &str) -> String {
    cell.split_whitespace().collect::<String>().to_lowercase()
}

fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

fn is_header_row(row: &[String]) -> bool {
    let normalized: Vec<String> = row.iter().map(|c| normalize_cell(c)).collect();
    normalized.iter().any(|c| c == "cue") && normalized.iter().any(|c| c == "response")
}

impl ColumnMap {
    fn resolve(header: &[String]) -> Result<Self> {
        let normalized: Vec<String> = header.iter().map(|c| normalize_cell(c)).collect();
        let first = |token: &str| normalized.iter().position(|c| c == token);
        let all = |token: &str| -> Vec<usize> {
            normalized
                .iter()
                .enumerate()
                .filter(|(_, c)| *c == token)
                .map(|(i, _)| i)
                .collect()
        };
        let mandatory = |token: &str| {
            first(token).ok_or_else(|| {
                MemtrainError::TableFormat(format!("the mandatory column '{token}' is missing"))
            })
        };

        let cue = mandatory("cue")?;
        mandatory("response")?;
        mandatory("synonym")?;

        let slots = SLOT_HEADERS
            .iter()
            .filter_map(|&(response, synonym, hint)| {
                first(response).map(|r| SlotColumns {
                    response: r,
                    synonym: first(synonym),
                    hint: first(hint),
                })
            })
            .collect();

        Ok(Self {
            cue,
            slots,
            tags: all("tag"),
            mtags: all("mtag"),
        })
    }
}

/// Entity counts, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub cues: usize,
    pub responses: usize,
    pub links: usize,
    pub synonyms: usize,
    pub hints: usize,
    pub tags: usize,
    pub mixing_tags: usize,
}

/// Normalized cues, responses and their associations.
#[derive(Debug, Default, Clone)]
pub struct Store {
    cues: Vocabulary,
    responses: Vocabulary,
    synonyms: Vocabulary,
    hints: Vocabulary,
    tags: Vocabulary,
    mtags: Vocabulary,
    links: Vec<CueResponseLink>,
    links_per_cue: HashMap<CueId, u32>,
    response_synonyms: Relation,
    response_hints: Relation,
    response_tags: Relation,
    response_mtags: Relation,
}

/// Ingest a raw table into file settings and a populated store.
///
/// Fails with [`MemtrainError::Configuration`] for a bad directive and with
/// [`MemtrainError::TableFormat`] when the header row or a mandatory column
/// is missing. Nothing is returned on failure.
pub fn ingest(rows: &[Vec<String>]) -> Result<(Settings, Store)> {
    let settings = read_leading_settings(rows)?;

    let header_row = rows
        .iter()
        .position(|row| is_header_row(row))
        .ok_or_else(|| MemtrainError::TableFormat("no header row".into()))?;
    let columns = ColumnMap::resolve(&rows[header_row])?;
    tracing::debug!(header_row, ?columns, "resolved column roles");

    let mut store = Store::default();
    for (offset, row) in rows[header_row + 1..].iter().enumerate() {
        store.add_row(row, &columns, header_row + 2 + offset);
    }

    tracing::debug!(counts = ?store.counts(), "ingested table");
    Ok((settings, store))
}

/// Consume single-cell rows before the first multi-cell row.
fn read_leading_settings(rows: &[Vec<String>]) -> Result<Settings> {
    let mut settings = Settings::default();
    for row in rows {
        let mut filled = row.iter().filter(|c| !is_blank(c));
        match (filled.next(), filled.next()) {
            (Some(cell), None) => {
                if settings::is_directive(cell) {
                    settings.apply_directive(cell)?;
                } else {
                    settings.set_title(cell_at(row, 0));
                }
            }
            (Some(_), Some(_)) => break,
            (None, _) => {}
        }
    }
    Ok(settings)
}

fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn filled_cell(row: &[String], index: Option<usize>) -> Option<&str> {
    index.map(|i| cell_at(row, i)).filter(|c| !is_blank(c))
}

impl Store {
    fn add_row(&mut self, row: &[String], columns: &ColumnMap, line: usize) {
        if row.iter().all(|c| is_blank(c)) {
            return;
        }
        let cue_text = cell_at(row, columns.cue);
        if is_blank(cue_text) {
            tracing::warn!(line, "skipping row with an empty cue");
            return;
        }
        let cue_id = CueId::from_index(self.cues.intern(cue_text));

        let tags: Vec<usize> = columns
            .tags
            .iter()
            .filter_map(|&i| filled_cell(row, Some(i)))
            .map(|t| self.tags.intern(t))
            .collect();
        let mtags: Vec<usize> = columns
            .mtags
            .iter()
            .filter_map(|&i| filled_cell(row, Some(i)))
            .map(|t| self.mtags.intern(t))
            .collect();

        for slot in &columns.slots {
            let Some(response_text) = filled_cell(row, Some(slot.response)) else {
                continue;
            };
            let response = self.responses.intern(response_text);
            let response_id = ResponseId::from_index(response);

            let count = self.links_per_cue.entry(cue_id).or_insert(0);
            *count += 1;
            self.links.push(CueResponseLink {
                cue_id,
                response_id,
                placement: *count,
            });

            if let Some(synonym) = filled_cell(row, slot.synonym) {
                let synonym = self.synonyms.intern(synonym);
                self.response_synonyms.insert(response, synonym);
            }
            if let Some(hint) = filled_cell(row, slot.hint) {
                let hint = self.hints.intern(hint);
                self.response_hints.insert(response, hint);
            }
            for &tag in &tags {
                self.response_tags.insert(response, tag);
            }
            for &mtag in &mtags {
                self.response_mtags.insert(response, mtag);
            }
        }
    }

    /// All distinct response texts in id order.
    pub fn responses(&self) -> impl Iterator<Item = (ResponseId, &str)> {
        self.responses
            .texts
            .iter()
            .enumerate()
            .map(|(i, t)| (ResponseId::from_index(i), t.as_str()))
    }

    /// Every cue/response link in insertion order.
    pub fn links(&self) -> &[CueResponseLink] {
        &self.links
    }

    /// Every (cue, response) pair in insertion order.
    pub fn pairs(&self) -> Vec<(CueId, ResponseId)> {
        self.links
            .iter()
            .map(|l| (l.cue_id, l.response_id))
            .collect()
    }

    /// Response ids tagged with `tag`.
    pub fn response_ids_by_tag(&self, tag: &str) -> Result<Vec<ResponseId>> {
        let tag_id = self
            .tags
            .find(tag)
            .ok_or_else(|| MemtrainError::Lookup(format!("no tag named '{tag}'")))?;
        Ok(self
            .response_tags
            .left_of(tag_id)
            .iter()
            .map(|&r| ResponseId::from_index(r))
            .collect())
    }

    /// Response ids carrying the given mixing-tag.
    pub fn response_ids_by_mixing_tag(&self, mtag: MixingTagId) -> Vec<ResponseId> {
        self.response_mtags
            .left_of(mtag.index())
            .iter()
            .map(|&r| ResponseId::from_index(r))
            .collect()
    }

    pub fn response_id(&self, text: &str) -> Option<ResponseId> {
        self.responses.find(text).map(ResponseId::from_index)
    }

    pub fn cue(&self, id: CueId) -> Result<&str> {
        self.cues.get(id.index()).ok_or_else(|| missing("cue", id))
    }

    pub fn response(&self, id: ResponseId) -> Result<&str> {
        self.responses
            .get(id.index())
            .ok_or_else(|| missing("response", id))
    }

    pub fn synonym(&self, id: SynonymId) -> Result<&str> {
        self.synonyms
            .get(id.index())
            .ok_or_else(|| missing("synonym", id))
    }

    pub fn hint(&self, id: HintId) -> Result<&str> {
        self.hints.get(id.index()).ok_or_else(|| missing("hint", id))
    }

    pub fn tag(&self, id: TagId) -> Result<&str> {
        self.tags.get(id.index()).ok_or_else(|| missing("tag", id))
    }

    pub fn mixing_tag(&self, id: MixingTagId) -> Result<&str> {
        self.mtags
            .get(id.index())
            .ok_or_else(|| missing("mixing-tag", id))
    }

    /// Synonym ids of a response, in first-seen order.
    pub fn synonym_ids(&self, response: ResponseId) -> Vec<SynonymId> {
        self.response_synonyms
            .right_of(response.index())
            .iter()
            .map(|&s| SynonymId::from_index(s))
            .collect()
    }

    pub fn hint_ids(&self, response: ResponseId) -> Vec<HintId> {
        self.response_hints
            .right_of(response.index())
            .iter()
            .map(|&h| HintId::from_index(h))
            .collect()
    }

    pub fn tag_ids(&self, response: ResponseId) -> Vec<TagId> {
        self.response_tags
            .right_of(response.index())
            .iter()
            .map(|&t| TagId::from_index(t))
            .collect()
    }

    pub fn mixing_tag_ids(&self, response: ResponseId) -> Vec<MixingTagId> {
        self.response_mtags
            .right_of(response.index())
            .iter()
            .map(|&m| MixingTagId::from_index(m))
            .collect()
    }

    /// Synonym texts of a response.
    pub fn synonyms_of(&self, response: ResponseId) -> Vec<&str> {
        self.response_synonyms
            .right_of(response.index())
            .iter()
            .filter_map(|&s| self.synonyms.get(s))
            .collect()
    }

    /// Hint texts of a response.
    pub fn hints_of(&self, response: ResponseId) -> Vec<&str> {
        self.response_hints
            .right_of(response.index())
            .iter()
            .filter_map(|&h| self.hints.get(h))
            .collect()
    }

    /// Mixing-tag texts of a response.
    pub fn mixing_tags_of(&self, response: ResponseId) -> Vec<&str> {
        self.response_mtags
            .right_of(response.index())
            .iter()
            .filter_map(|&m| self.mtags.get(m))
            .collect()
    }

    /// Placement of the first link between `cue` and `response`.
    pub fn placement(&self, cue: CueId, response: ResponseId) -> Result<u32> {
        self.links
            .iter()
            .find(|l| l.cue_id == cue && l.response_id == response)
            .map(|l| l.placement)
            .ok_or_else(|| {
                MemtrainError::Lookup(format!("no link between cue {cue} and response {response}"))
            })
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            cues: self.cues.len(),
            responses: self.responses.len(),
            links: self.links.len(),
            synonyms: self.synonyms.len(),
            hints: self.hints.len(),
            tags: self.tags.len(),
            mixing_tags: self.mtags.len(),
        }
    }
}

fn missing(entity: &str, id: impl std::fmt::Display) -> MemtrainError {
    MemtrainError::Lookup(format!("no {entity} with id {id}"))
}
