//! Document-level key routing for the open control.

use selecta_dom::{Cancellable, Key, KeyboardEvent};

use crate::adapter::RenderAdapter;
use crate::control::ControlId;
use crate::error::SelectaError;
use crate::events::{Direction, EventResult};
use crate::manager::{DropdownManager, log_failure};

/// Which end of the option list a jump goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

/// Character a type-ahead keypress searches for.
fn search_char(event: &KeyboardEvent) -> Option<char> {
    match event.key {
        Key::Char(c) if c != '\0' => Some(c),
        _ => u8::try_from(event.code)
            .ok()
            .map(char::from)
            .filter(char::is_ascii_alphanumeric),
    }
}

impl<A: RenderAdapter> DropdownManager<A> {
    /// Handle a keydown anywhere on the page.
    ///
    /// Does nothing unless a popup is open. While one is open, navigation
    /// keys drive it, allow-listed keys search it, Tab closes it and every
    /// other key is swallowed.
    pub fn handle_key(&mut self, event: &mut KeyboardEvent) -> EventResult {
        let Some(id) = self.focused else {
            return EventResult::Ignored;
        };
        log::trace!("handle_key: control={} key={:?} code={}", id, event.key, event.code);

        match event.key {
            Key::Down => {
                event.stop();
                log_failure("down", self.move_highlight(id, Direction::Next));
            }
            Key::Up => {
                event.stop();
                log_failure("up", self.move_highlight(id, Direction::Previous));
            }
            Key::Enter => {
                event.stop();
                log_failure("enter", self.commit_selected(id));
            }
            Key::Tab | Key::BackTab => {
                // Focus moves on; only make sure nothing stays open.
                log_failure("tab", self.close(id));
                return EventResult::Ignored;
            }
            Key::PageDown | Key::End => {
                event.stop();
                log_failure("end", self.jump(id, Edge::Last));
            }
            Key::PageUp | Key::Home => {
                event.stop();
                log_failure("home", self.jump(id, Edge::First));
            }
            _ if self.config.is_type_ahead_key(event.code) => {
                event.stop();
                if let Some(c) = search_char(event) {
                    log_failure("type-ahead", self.type_ahead(id, c));
                }
            }
            _ => event.stop(),
        }
        EventResult::Consumed
    }

    /// Commit the first or last option, then hand focus back to the native
    /// control so the popup stays up for further navigation.
    pub fn jump(&mut self, id: ControlId, edge: Edge) -> Result<(), SelectaError> {
        let control = self
            .controls
            .get_mut(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        control.previous = None;
        let target = match edge {
            Edge::First => control.mirror.first_index(),
            Edge::Last => control.mirror.last_index(),
        };

        if let Some(index) = target {
            log_failure("jump", self.select_option(id, index));
        }
        self.restore_focus(id)
    }

    /// Select the next option whose text starts with `c`, cycling through
    /// consecutive matches on repeated presses.
    ///
    /// Returns the committed index, or `None` if nothing matched or the match
    /// was refused (a disabled option).
    pub fn type_ahead(&mut self, id: ControlId, c: char) -> Result<Option<usize>, SelectaError> {
        let current = self.control_ref(id)?.selected;
        let Some(index) = self.type_ahead.find(id, current, c) else {
            log::trace!("type_ahead: control={} no match for {:?}", id, c);
            return Ok(None);
        };

        log::debug!("type_ahead: control={} {:?} -> {}", id, c, index);
        let result = self.select_option(id, index);
        let committed = result.is_ok().then_some(index);
        log_failure("type-ahead select", result);
        self.restore_focus(id)?;
        Ok(committed)
    }
}
