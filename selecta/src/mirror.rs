//! Option mirror: the ordered shadow copy of a native control's entries.

/// Display text used for options whose text is empty after trimming.
pub const EMPTY_TEXT_PLACEHOLDER: &str = "\u{a0}";

/// An entry as reported by the native control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
    pub disabled: bool,
}

impl NativeOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
            disabled: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// One mirrored, selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub index: usize,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    /// Lowercased `text`, used for type-ahead matching.
    pub search_text: String,
}

/// Trim, collapse internal whitespace runs, and substitute the placeholder
/// for empty text.
pub fn normalize_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        EMPTY_TEXT_PLACEHOLDER.to_string()
    } else {
        collapsed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMirror {
    entries: Vec<OptionEntry>,
    initial: Option<usize>,
}

impl OptionMirror {
    /// Mirror the native entries in order. The last entry flagged `selected`
    /// becomes the initial selection.
    pub fn build(native: impl IntoIterator<Item = NativeOption>) -> Self {
        let mut entries = Vec::new();
        let mut initial = None;

        for (index, option) in native.into_iter().enumerate() {
            let text = normalize_text(&option.text);
            if option.selected {
                initial = Some(index);
            }
            entries.push(OptionEntry {
                index,
                search_text: text.to_lowercase(),
                text,
                value: option.value,
                disabled: option.disabled,
            });
        }

        log::debug!(
            "OptionMirror::build entries={} initial={:?}",
            entries.len(),
            initial
        );

        Self { entries, initial }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OptionEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter()
    }

    pub fn initial_selection(&self) -> Option<usize> {
        self.initial
    }

    pub fn first_index(&self) -> Option<usize> {
        if self.entries.is_empty() { None } else { Some(0) }
    }

    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Index after `index`, or `None` at the end.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.entries.len()).then_some(next)
    }

    /// Index before `index`, or `None` at the start.
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).filter(|i| *i < self.entries.len())
    }

    /// The ordered lowercase text cache for type-ahead.
    pub fn search_texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.search_text.clone()).collect()
    }
}
