//! Editable header list used by the request composer.
//!
//! Pairs are kept in display order. Order carries no meaning once the list is
//! folded into a mapping with [`HeaderList::to_map`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single key/value row in the header editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

impl HeaderPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A pair is usable only when both key and value are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Which half of a [`HeaderPair`] an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Key,
    Value,
}

/// Ordered, mutable list of candidate request headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderList {
    pairs: Vec<HeaderPair>,
}

impl Default for HeaderList {
    /// The composer starts with one blank row.
    fn default() -> Self {
        Self {
            pairs: vec![HeaderPair::default()],
        }
    }
}

impl HeaderList {
    /// Creates a list with no rows at all.
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn from_pairs(pairs: Vec<HeaderPair>) -> Self {
        Self { pairs }
    }

    /// Appends a blank row and returns its index.
    pub fn add(&mut self) -> usize {
        self.pairs.push(HeaderPair::default());
        self.pairs.len() - 1
    }

    /// Appends a filled-in row.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push(HeaderPair::new(key, value));
    }

    /// Edits one field of the row at `index`.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn update(&mut self, index: usize, field: HeaderField, text: impl Into<String>) -> bool {
        match self.pairs.get_mut(index) {
            Some(pair) => {
                match field {
                    HeaderField::Key => pair.key = text.into(),
                    HeaderField::Value => pair.value = text.into(),
                }
                true
            }
            None => false,
        }
    }

    /// Removes the row at `index`, returning it if it existed.
    pub fn remove(&mut self, index: usize) -> Option<HeaderPair> {
        if index < self.pairs.len() {
            Some(self.pairs.remove(index))
        } else {
            None
        }
    }

    pub fn pairs(&self) -> &[HeaderPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Folds the rows into a header mapping.
    ///
    /// Rows with an empty key or value are skipped. A later row with the same
    /// key overwrites an earlier one.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.pairs
            .iter()
            .filter(|pair| pair.is_complete())
            .fold(HashMap::new(), |mut acc, pair| {
                acc.insert(pair.key.clone(), pair.value.clone());
                acc
            })
    }
}
