//! Shortest-unambiguous-prefix aliases for responses.
//!
//! Each response starts at a one-character lowercase prefix. When two
//! responses meet on the same prefix, the occupant is evicted and both are
//! pushed back onto the worklist one character longer; the contested prefix
//! stays blocked so neither can ever reclaim it. The final keys are therefore
//! prefix-free and independent of insertion order.

use std::collections::{BTreeMap, HashSet};

/// Mapping from lowercase prefix to the canonical response text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasIndex {
    aliases: BTreeMap<String, String>,
    unaliased: Vec<String>,
}

fn prefix(lowered: &str, len: usize) -> Option<String> {
    if len == 0 || len > lowered.chars().count() {
        return None;
    }
    Some(lowered.chars().take(len).collect())
}

/// Build aliases for a set of distinct responses.
///
/// A response whose text runs out before it finds an uncontested prefix
/// (because it is itself a prefix of another response) is left unaliased.
pub fn build_aliases<'a, I>(responses: I) -> AliasIndex
where
    I: IntoIterator<Item = &'a str>,
{
    let mut texts: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for response in responses {
        if seen.insert(response) {
            texts.push(response);
        }
    }
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();

    let mut occupied: BTreeMap<String, usize> = BTreeMap::new();
    let mut blocked: HashSet<String> = HashSet::new();
    let mut unaliased = Vec::new();
    let mut worklist: Vec<(usize, usize)> = (0..texts.len()).rev().map(|i| (i, 1)).collect();

    while let Some((i, len)) = worklist.pop() {
        let Some(key) = prefix(&lowered[i], len) else {
            unaliased.push(texts[i].to_string());
            continue;
        };
        if blocked.contains(&key) {
            worklist.push((i, len + 1));
            continue;
        }
        match occupied.remove(&key) {
            Some(occupant) => {
                worklist.push((occupant, len + 1));
                worklist.push((i, len + 1));
                blocked.insert(key);
            }
            None => {
                occupied.insert(key, i);
            }
        }
    }

    unaliased.sort();
    tracing::debug!(
        aliased = occupied.len(),
        unaliased = unaliased.len(),
        "built alias index"
    );

    AliasIndex {
        aliases: occupied
            .into_iter()
            .map(|(key, i)| (key, texts[i].to_string()))
            .collect(),
        unaliased,
    }
}

impl AliasIndex {
    /// The response aliased by `input`, compared trimmed and lowercased.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        self.aliases
            .get(&input.trim().to_lowercase())
            .map(String::as_str)
    }

    /// The alias key of a response, if it has one.
    pub fn key_for(&self, response: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, r)| r.as_str() == response)
            .map(|(k, _)| k.as_str())
    }

    /// All (key, response) entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, r)| (k.as_str(), r.as_str()))
    }

    /// Responses that could not be given a key.
    pub fn unaliased(&self) -> &[String] {
        &self.unaliased
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
