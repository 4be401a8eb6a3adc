//! Per-control open/closed transitions and selection.

use crate::adapter::RenderAdapter;
use crate::control::ControlId;
use crate::error::SelectaError;
use crate::events::{Direction, DropdownEvent};
use crate::manager::DropdownManager;

impl<A: RenderAdapter> DropdownManager<A> {
    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Show a control's popup, closing any other open control first.
    pub fn open(&mut self, id: ControlId) -> Result<(), SelectaError> {
        self.control_ref(id)?;

        if let Some(other) = self.focused {
            if other != id {
                self.close(other)?;
            }
        }
        self.focused = Some(id);

        let control = self
            .controls
            .get(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        let was_visible = self.adapter.is_popup_visible(&control.parts.popup);
        self.adapter.set_popup_visible(&control.parts.popup, true)?;
        self.refresh_highlight(id)?;
        self.clear_text_selection();

        if !was_visible {
            log::debug!("open: control={}", id);
            self.events.push(DropdownEvent::Opened(id));
        }
        Ok(())
    }

    /// Hide a control's popup.
    pub fn close(&mut self, id: ControlId) -> Result<(), SelectaError> {
        let control = self
            .controls
            .get(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        let was_visible = self.adapter.is_popup_visible(&control.parts.popup);
        self.adapter.set_popup_visible(&control.parts.popup, false)?;

        if self.focused == Some(id) {
            self.focused = None;
        }
        if was_visible {
            log::debug!("close: control={}", id);
            self.events.push(DropdownEvent::Closed(id));
        }
        Ok(())
    }

    /// Toggle the popup open/closed.
    pub fn toggle(&mut self, id: ControlId) -> Result<(), SelectaError> {
        if self.is_open(id) {
            self.close(id)
        } else {
            self.open(id)
        }
    }

    /// Reset option highlighting to just the selected option and scroll to it.
    fn refresh_highlight(&mut self, id: ControlId) -> Result<(), SelectaError> {
        let control = self
            .controls
            .get(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        for option in &control.parts.options {
            self.adapter.highlight_option(option, false)?;
        }
        if let Some(index) = control.selected {
            if let Some(option) = control.option_handle(index) {
                self.adapter.highlight_option(option, true)?;
                self.adapter
                    .scroll_popup_to(&control.parts.popup, option, index)?;
            }
        }
        Ok(())
    }

    fn clear_text_selection(&mut self) {
        if self.config.allow_text_select {
            return;
        }
        if let Err(e) = self.adapter.clear_text_selection() {
            log::debug!("clear_text_selection: ignored: {}", e);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Commit an option: update the trigger, push the value into the native
    /// control, raise one change notification, then toggle the popup.
    ///
    /// Disabled options are refused with `OptionDisabled` and nothing changes.
    ///
    /// The trailing toggle means a call on a closed control opens its popup,
    /// closing any other open control and clearing the text selection.
    pub fn select_option(&mut self, id: ControlId, index: usize) -> Result<(), SelectaError> {
        let control = self
            .controls
            .get_mut(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        let entry = control
            .mirror
            .get(index)
            .ok_or(SelectaError::OptionOutOfRange { control: id, index })?;
        if entry.disabled {
            return Err(SelectaError::OptionDisabled { control: id, index });
        }
        let text = entry.text.clone();
        let value = entry.value.clone();

        if let Some(option) = control.selected.and_then(|i| control.parts.options.get(i)) {
            self.adapter.highlight_option(option, false)?;
        }
        control.previous = control.selected;
        control.selected = Some(index);

        if let Some(option) = control.parts.options.get(index) {
            self.adapter.highlight_option(option, true)?;
        }
        self.adapter.set_trigger_text(&control.parts.trigger, &text)?;
        self.adapter.set_native_value(&control.native, &value)?;
        self.adapter.notify_change(&control.native)?;

        log::debug!("select_option: control={} index={} value={:?}", id, index, value);
        self.events.push(DropdownEvent::Changed {
            control: id,
            index,
            value,
        });

        self.toggle(id)
    }

    /// Commit whatever option is currently selected.
    pub fn commit_selected(&mut self, id: ControlId) -> Result<(), SelectaError> {
        match self.control_ref(id)?.selected {
            Some(index) => self.select_option(id, index),
            None => Ok(()),
        }
    }

    /// Move the selection one step without committing it to the native
    /// control. Stops at either end; with nothing selected the first option
    /// is taken.
    ///
    /// Returns true if the selection moved.
    pub fn move_highlight(
        &mut self,
        id: ControlId,
        direction: Direction,
    ) -> Result<bool, SelectaError> {
        let control = self
            .controls
            .get_mut(&id)
            .ok_or(SelectaError::UnknownControl(id))?;

        let target = match (control.selected, direction) {
            (Some(i), Direction::Next) => control.mirror.next_index(i),
            (Some(i), Direction::Previous) => control.mirror.previous_index(i),
            (None, _) => control.mirror.first_index(),
        };
        let Some(target) = target else {
            return Ok(false);
        };

        control.previous = None;
        if let Some(option) = control.selected.and_then(|i| control.parts.options.get(i)) {
            self.adapter.highlight_option(option, false)?;
        }
        control.selected = Some(target);
        if let Some(option) = control.parts.options.get(target) {
            self.adapter.highlight_option(option, true)?;
            self.adapter
                .scroll_popup_to(&control.parts.popup, option, target)?;
        }

        log::trace!("move_highlight: control={} {:?} -> {}", id, direction, target);
        Ok(true)
    }

    /// Pointer entered an option: it becomes the selected, highlighted one.
    pub fn hover_option(&mut self, id: ControlId, index: usize) -> Result<(), SelectaError> {
        let control = self
            .controls
            .get_mut(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        let option = control
            .parts
            .options
            .get(index)
            .ok_or(SelectaError::OptionOutOfRange { control: id, index })?;

        if let Some(current) = control.selected.and_then(|i| control.parts.options.get(i)) {
            self.adapter.highlight_option(current, false)?;
        }
        control.previous = control.selected;
        control.selected = Some(index);
        self.adapter.highlight_option(option, true)?;
        self.adapter.hover_option(option, true)?;
        Ok(())
    }

    /// Pointer left an option: drop its highlight, keep the selection.
    pub fn leave_option(&mut self, id: ControlId, index: usize) -> Result<(), SelectaError> {
        let control = self
            .controls
            .get(&id)
            .ok_or(SelectaError::UnknownControl(id))?;
        let option = control
            .option_handle(index)
            .ok_or(SelectaError::OptionOutOfRange { control: id, index })?;
        self.adapter.highlight_option(option, false)?;
        self.adapter.hover_option(option, false)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Native focus
    // -------------------------------------------------------------------------

    /// The native control gained focus: hide everything else and open it.
    pub fn on_native_focus(&mut self, id: ControlId) -> Result<(), SelectaError> {
        self.control_ref(id)?;
        if self.focused == Some(id) && self.is_open(id) {
            return Ok(());
        }
        if self.focused.is_some() {
            self.close_all();
        }
        self.open(id)
    }

    /// The native control lost focus: close it if it is the open one.
    pub fn on_native_blur(&mut self, id: ControlId) -> Result<(), SelectaError> {
        self.control_ref(id)?;
        if self.focused == Some(id) {
            self.close(id)?;
        }
        Ok(())
    }

    /// A click on the trigger toggles through the focus/blur path.
    pub fn click_trigger(&mut self, id: ControlId) -> Result<(), SelectaError> {
        if self.focused == Some(id) {
            self.on_native_blur(id)
        } else {
            self.on_native_focus(id)
        }
    }

    /// Give input focus back to the native control and reopen its popup.
    pub(crate) fn restore_focus(&mut self, id: ControlId) -> Result<(), SelectaError> {
        let native = self.control_ref(id)?.native.clone();
        self.adapter.focus_native(&native)?;
        self.on_native_focus(id)
    }
}
