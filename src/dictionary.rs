use include_dir::{include_dir, Dir};
use log::debug;
use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

/// One dictionary entry: a lowercase word (letters/digits only) and a short
/// definition shown when the word is revealed.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    pub definition: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Dictionary {
    pub name: String,
    pub entries: Vec<Entry>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("word list `{0}` is not embedded in this build")]
    UnknownList(String),
    #[error("word list `{0}` could not be parsed")]
    Malformed(String),
    #[error("dictionary `{0}` has no entries")]
    Empty(String),
}

impl Dictionary {
    /// Load an embedded word list by name (e.g. "english").
    pub fn load(name: &str) -> Result<Self, DictionaryError> {
        let file = WORDS_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| DictionaryError::UnknownList(name.to_string()))?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| DictionaryError::Malformed(name.to_string()))?;
        serde_json::from_str(text).map_err(|_| DictionaryError::Malformed(name.to_string()))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|entry| entry.word == word)
    }

    /// Resolve a requested word length into one the dictionary can serve:
    /// the request itself when any entry has that length, otherwise the
    /// closest available length, ties broken toward the shorter word.
    /// `None` when the dictionary is empty.
    pub fn nearest_length(&self, requested: usize) -> Option<usize> {
        let mut nearest: Option<usize> = None;
        for entry in &self.entries {
            let len = entry.word.chars().count();
            if len == requested {
                return Some(requested);
            }
            nearest = match nearest {
                None => Some(len),
                Some(best) => {
                    let best_dist = best.abs_diff(requested);
                    let dist = len.abs_diff(requested);
                    if dist < best_dist || (dist == best_dist && len < best) {
                        Some(len)
                    } else {
                        Some(best)
                    }
                }
            };
        }
        nearest
    }

    /// Pick a secret word of (as close as possible to) the requested length,
    /// uniformly at random, avoiding `exclude` until every word of that
    /// length has been used. Returns the entry and the effective length,
    /// which becomes the authoritative word length for the round.
    pub fn pick(
        &self,
        requested_len: usize,
        exclude: &[String],
    ) -> Result<(Entry, usize), DictionaryError> {
        let len = self
            .nearest_length(requested_len)
            .ok_or_else(|| DictionaryError::Empty(self.name.clone()))?;

        let fresh: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.word.chars().count() == len && !exclude.contains(&entry.word))
            .collect();

        // Every word of this length already played: allow repeats so the
        // game can continue.
        let pool: Vec<&Entry> = if fresh.is_empty() {
            self.entries
                .iter()
                .filter(|entry| entry.word.chars().count() == len)
                .collect()
        } else {
            fresh
        };

        let entry = pool
            .choose(&mut rand::thread_rng())
            .copied()
            .cloned()
            .ok_or_else(|| DictionaryError::Empty(self.name.clone()))?;
        debug!(
            "picked `{}` (len {len}, requested {requested_len}, pool {})",
            entry.word,
            pool.len()
        );
        Ok((entry, len))
    }
}
