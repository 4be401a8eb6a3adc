//! Registry of managed controls and the global focus pointer.

use std::collections::BTreeMap;

use selecta_dom::Cancellable;

use crate::adapter::RenderAdapter;
use crate::config::SelectaConfig;
use crate::control::{Control, ControlId};
use crate::error::SelectaError;
use crate::events::{DropdownEvent, EventResult};
use crate::mirror::OptionMirror;
use crate::typeahead::TypeAheadIndex;

/// Owns every managed control plus the process-wide interaction state.
///
/// The manager tracks:
/// - All managed controls (keyed by [`ControlId`])
/// - The single open control, if any (global focus pointer)
/// - The type-ahead cache per control
/// - Queued [`DropdownEvent`]s for the host
///
/// At most one popup is visible at any time; every public entry point leaves
/// that invariant intact before returning.
pub struct DropdownManager<A: RenderAdapter> {
    pub(crate) config: SelectaConfig,
    pub(crate) adapter: A,
    pub(crate) controls: BTreeMap<ControlId, Control<A::Handle>>,
    pub(crate) focused: Option<ControlId>,
    pub(crate) type_ahead: TypeAheadIndex,
    pub(crate) events: Vec<DropdownEvent>,
}

impl<A: RenderAdapter> DropdownManager<A> {
    /// Create a manager with no controls.
    pub fn new(mut adapter: A, config: SelectaConfig) -> Self {
        adapter.configure(&config);
        Self {
            config,
            adapter,
            controls: BTreeMap::new(),
            focused: None,
            type_ahead: TypeAheadIndex::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SelectaConfig {
        &self.config
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    // -------------------------------------------------------------------------
    // Building
    // -------------------------------------------------------------------------

    /// Convert every native control matching the configured selector.
    ///
    /// Returns the managed ids in document order. Finding nothing is not
    /// fatal: `NoMatchingControls` is returned and no state is touched.
    pub fn init(&mut self) -> Result<Vec<ControlId>, SelectaError> {
        let natives = self.adapter.find_controls(&self.config.selector)?;
        if natives.is_empty() {
            log::debug!("init: selector '{}' matched nothing", self.config.selector);
            return Err(SelectaError::NoMatchingControls {
                selector: self.config.selector.clone(),
            });
        }

        natives
            .into_iter()
            .map(|native| self.replace(native))
            .collect()
    }

    /// Build (or rebuild) the trigger and popup for one native control.
    ///
    /// Processing the same element again tears the old parts down first and
    /// keeps the control's id.
    pub fn replace(&mut self, native: A::Handle) -> Result<ControlId, SelectaError> {
        let existing = self.find_by_native(&native);
        if let Some(id) = existing {
            self.teardown(id)?;
        }

        let mirror = OptionMirror::build(self.adapter.native_options(&native)?);
        let parts = self.adapter.build_parts(&native, &self.config, &mirror)?;
        let label = self.adapter.find_label(&native);

        let mut control = Control::new(native, label, parts, mirror);
        if let Some(id) = existing {
            control.id = id;
        }

        if let Some(entry) = control.selected() {
            self.adapter.set_trigger_text(&control.parts.trigger, &entry.text)?;
        }
        if let Some(option) = control.selected.and_then(|i| control.option_handle(i)) {
            self.adapter.highlight_option(option, true)?;
        }
        self.adapter.set_popup_visible(&control.parts.popup, false)?;

        log::debug!(
            "replace: control={} options={} selected={:?} rebuilt={}",
            control.id,
            control.mirror.len(),
            control.selected,
            existing.is_some()
        );

        Ok(self.register(control))
    }

    /// Add a built control to the registry and index its options for search.
    pub fn register(&mut self, control: Control<A::Handle>) -> ControlId {
        let id = control.id;
        self.type_ahead.insert(id, control.mirror.search_texts());
        self.controls.insert(id, control);
        id
    }

    fn teardown(&mut self, id: ControlId) -> Result<(), SelectaError> {
        if !self.controls.contains_key(&id) {
            return Ok(());
        }
        // An open popup reports its close before the parts go away.
        self.close(id)?;
        let Some(old) = self.controls.remove(&id) else {
            return Ok(());
        };
        self.type_ahead.remove(id);
        self.adapter.destroy_parts(&old.native, &old.parts)?;
        log::debug!("teardown: control={}", id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn control(&self, id: ControlId) -> Option<&Control<A::Handle>> {
        self.controls.get(&id)
    }

    pub(crate) fn control_ref(&self, id: ControlId) -> Result<&Control<A::Handle>, SelectaError> {
        self.controls.get(&id).ok_or(SelectaError::UnknownControl(id))
    }

    pub fn control_ids(&self) -> Vec<ControlId> {
        self.controls.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn find_by_native(&self, native: &A::Handle) -> Option<ControlId> {
        self.controls
            .values()
            .find(|c| &c.native == native)
            .map(|c| c.id)
    }

    /// The control whose popup is open, if any.
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub fn is_open(&self, id: ControlId) -> bool {
        self.controls
            .get(&id)
            .map(|c| self.adapter.is_popup_visible(&c.parts.popup))
            .unwrap_or(false)
    }

    /// Ids of every control whose popup is currently visible.
    pub fn open_controls(&self) -> Vec<ControlId> {
        self.controls
            .values()
            .filter(|c| self.adapter.is_popup_visible(&c.parts.popup))
            .map(|c| c.id)
            .collect()
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<DropdownEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Dismissal
    // -------------------------------------------------------------------------

    /// Close every visible popup, then force-hide all of them.
    ///
    /// Returns how many popups were open.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        for id in self.open_controls() {
            if let Err(e) = self.close(id) {
                log::warn!("close_all: closing {} failed: {}", id, e);
            }
            closed += 1;
        }

        for control in self.controls.values() {
            if let Err(e) = self.adapter.set_popup_visible(&control.parts.popup, false) {
                log::warn!("close_all: hiding {} failed: {}", control.id, e);
            }
        }
        self.focused = None;

        if closed > 0 {
            log::debug!("close_all: closed {} popup(s)", closed);
        }
        closed
    }

    /// Route a click anywhere on the page.
    ///
    /// Clicks on a label, trigger or option are handled by that control and
    /// stopped. Anything else counts as an outside click and closes all
    /// popups, when the click listener is enabled.
    pub fn handle_click(
        &mut self,
        target: Option<&A::Handle>,
        event: &mut impl Cancellable,
    ) -> EventResult {
        if let Some(target) = target {
            if let Some(id) = self.label_at(target) {
                event.stop();
                log_failure("label click", self.on_native_focus(id));
                return EventResult::Consumed;
            }
            if let Some(id) = self.trigger_at(target) {
                event.stop();
                log_failure("trigger click", self.click_trigger(id));
                return EventResult::Consumed;
            }
            if let Some((id, index)) = self.option_at(target) {
                event.stop();
                log_failure("option click", self.select_option(id, index));
                return EventResult::Consumed;
            }
        }

        if self.config.use_click_listener {
            self.close_all();
        }
        EventResult::Ignored
    }

    /// Route pointer movement; hovering an option of the open control
    /// moves the highlight to it.
    pub fn handle_mouse_move(&mut self, target: &A::Handle) -> EventResult {
        match self.option_at(target) {
            Some((id, index)) if self.is_open(id) => {
                log_failure("hover", self.hover_option(id, index));
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    pub fn handle_mouse_leave(&mut self, target: &A::Handle) -> EventResult {
        match self.option_at(target) {
            Some((id, index)) => {
                log_failure("leave", self.leave_option(id, index));
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// The native control received focus (tab order, label, script).
    pub fn handle_focus(&mut self, native: &A::Handle) -> EventResult {
        match self.find_by_native(native) {
            Some(id) => {
                log_failure("focus", self.on_native_focus(id));
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// The native control lost focus.
    pub fn handle_blur(&mut self, native: &A::Handle) -> EventResult {
        match self.find_by_native(native) {
            Some(id) => {
                log_failure("blur", self.on_native_blur(id));
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    fn label_at(&self, target: &A::Handle) -> Option<ControlId> {
        self.controls
            .values()
            .find(|c| c.label.as_ref() == Some(target))
            .map(|c| c.id)
    }

    fn trigger_at(&self, target: &A::Handle) -> Option<ControlId> {
        self.controls
            .values()
            .find(|c| self.adapter.contains(&c.parts.trigger, target))
            .map(|c| c.id)
    }

    fn option_at(&self, target: &A::Handle) -> Option<(ControlId, usize)> {
        self.controls.values().find_map(|c| {
            c.parts
                .options
                .iter()
                .position(|option| self.adapter.contains(option, target))
                .map(|index| (c.id, index))
        })
    }
}

/// Handlers never surface failures to the host; a disabled option is an
/// expected no-op, anything else is worth a warning.
pub(crate) fn log_failure<T>(context: &str, result: Result<T, SelectaError>) {
    match result {
        Ok(_) => {}
        Err(e @ SelectaError::OptionDisabled { .. }) => {
            log::debug!("{}: ignored: {}", context, e);
        }
        Err(e) => log::warn!("{}: {}", context, e),
    }
}
