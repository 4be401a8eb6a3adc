//! Per-control records.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::adapter::ControlParts;
use crate::mirror::{OptionEntry, OptionMirror};

/// Unique identifier for a managed control.
///
/// Stable across rebuilds of the same native element: re-processing a control
/// keeps its id, so anything keyed by it (registry, type-ahead cache) never
/// goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(usize);

impl ControlId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__selecta_{}", self.0)
    }
}

/// One native select being shadowed by a trigger and popup.
#[derive(Debug, Clone)]
pub struct Control<H> {
    pub(crate) id: ControlId,
    pub(crate) native: H,
    /// `<label for=...>` pointing at the native element, if any.
    pub(crate) label: Option<H>,
    pub(crate) parts: ControlParts<H>,
    pub(crate) mirror: OptionMirror,
    /// Currently selected (and highlighted) option.
    pub(crate) selected: Option<usize>,
    /// Option selected before the last hover or commit.
    pub(crate) previous: Option<usize>,
}

impl<H> Control<H> {
    pub fn new(
        native: H,
        label: Option<H>,
        parts: ControlParts<H>,
        mirror: OptionMirror,
    ) -> Self {
        let selected = mirror.initial_selection();
        Self {
            id: ControlId::new(),
            native,
            label,
            parts,
            mirror,
            selected,
            previous: None,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn native(&self) -> &H {
        &self.native
    }

    pub fn label(&self) -> Option<&H> {
        self.label.as_ref()
    }

    pub fn trigger(&self) -> &H {
        &self.parts.trigger
    }

    pub fn popup(&self) -> &H {
        &self.parts.popup
    }

    pub fn parts(&self) -> &ControlParts<H> {
        &self.parts
    }

    pub fn mirror(&self) -> &OptionMirror {
        &self.mirror
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&OptionEntry> {
        self.selected.and_then(|i| self.mirror.get(i))
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    /// Handle of the rendered option at `index`.
    pub(crate) fn option_handle(&self, index: usize) -> Option<&H> {
        self.parts.options.get(index)
    }
}
