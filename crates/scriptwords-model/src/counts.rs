use crate::text::Token;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Occurrence counts keyed by token, iterated in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    entries: Vec<(Token, usize)>,
    index: HashMap<Token, usize>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`, appending it if it has not been seen yet.
    pub fn record(&mut self, token: &Token) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(token.clone(), self.entries.len());
                self.entries.push((token.clone(), 1));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        let slot = self.index.get(word)?;
        Some(self.entries[*slot].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, equal to the number of tokens recorded.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, usize)> {
        self.entries.iter().map(|(token, count)| (token, *count))
    }
}

impl<'a> FromIterator<&'a Token> for WordCounts {
    fn from_iter<I: IntoIterator<Item = &'a Token>>(iter: I) -> Self {
        let mut counts = WordCounts::new();
        for token in iter {
            counts.record(token);
        }
        counts
    }
}

impl Serialize for WordCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, count) in &self.entries {
            map.serialize_entry(token.as_str(), count)?;
        }
        map.end()
    }
}
