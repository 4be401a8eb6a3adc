//! Notifications and handler results.

use crate::control::ControlId;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, let the host continue with it.
    Ignored,
    /// Event was handled by a control.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Observable state changes, queued on the manager until the host drains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    /// A popup became visible.
    Opened(ControlId),
    /// A popup was hidden.
    Closed(ControlId),
    /// A selection was committed to the native control.
    Changed {
        control: ControlId,
        index: usize,
        value: String,
    },
}

/// Direction for keyboard highlight movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}
