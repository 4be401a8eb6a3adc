//! First-letter search among a control's options.

use std::collections::HashMap;

use crate::control::ControlId;

/// Pick the option a type-ahead keypress should land on.
///
/// Repeated presses of the same character cycle through the run of
/// consecutive options starting with it, wrapping back to the first match.
pub fn next_match(cache: &[String], current: Option<usize>, c: char) -> Option<usize> {
    let needle: String = c.to_lowercase().collect();
    let matching: Vec<usize> = cache
        .iter()
        .enumerate()
        .filter(|(_, text)| text.starts_with(&needle))
        .map(|(i, _)| i)
        .collect();

    let first = *matching.first()?;
    match current {
        Some(i) if matching.contains(&i) => {
            if matching.contains(&(i + 1)) {
                Some(i + 1)
            } else {
                Some(first)
            }
        }
        _ => Some(first),
    }
}

/// Lowercase option texts per control.
#[derive(Debug, Default)]
pub struct TypeAheadIndex {
    lists: HashMap<ControlId, Vec<String>>,
}

impl TypeAheadIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache for a control.
    pub fn insert(&mut self, id: ControlId, texts: Vec<String>) {
        self.lists.insert(id, texts);
    }

    pub fn remove(&mut self, id: ControlId) {
        self.lists.remove(&id);
    }

    pub fn get(&self, id: ControlId) -> Option<&[String]> {
        self.lists.get(&id).map(Vec::as_slice)
    }

    pub fn find(&self, id: ControlId, current: Option<usize>, c: char) -> Option<usize> {
        next_match(self.get(id)?, current, c)
    }
}
