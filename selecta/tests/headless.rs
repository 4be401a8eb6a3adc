//! The manager against a minimal host that only records what it is told.

use std::collections::HashSet;

use selecta::{
    AdapterError, ControlParts, DropdownEvent, DropdownManager, NativeOption, OptionMirror,
    RenderAdapter, SelectaConfig,
};
use selecta_dom::{Cancellable, Key, KeyboardEvent, MouseEvent};

/// Handles are plain integers; natives are 1, 2, ... and parts are
/// allocated from 100 upwards.
#[derive(Default)]
struct Recorder {
    natives: Vec<(usize, Vec<NativeOption>)>,
    next_handle: usize,
    visible: HashSet<usize>,
    values: Vec<(usize, String)>,
    changes: Vec<usize>,
    focused: Option<usize>,
    trigger_text: Vec<(usize, String)>,
}

impl Recorder {
    fn with(natives: Vec<(usize, Vec<NativeOption>)>) -> Self {
        Self {
            natives,
            next_handle: 100,
            ..Default::default()
        }
    }

    fn alloc(&mut self) -> usize {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderAdapter for Recorder {
    type Handle = usize;

    fn find_controls(&self, _selector: &str) -> Result<Vec<usize>, AdapterError> {
        Ok(self.natives.iter().map(|(h, _)| *h).collect())
    }

    fn native_options(&self, native: &usize) -> Result<Vec<NativeOption>, AdapterError> {
        Ok(self
            .natives
            .iter()
            .find(|(h, _)| h == native)
            .map(|(_, opts)| opts.clone())
            .unwrap_or_default())
    }

    fn build_parts(
        &mut self,
        _native: &usize,
        _config: &SelectaConfig,
        mirror: &OptionMirror,
    ) -> Result<ControlParts<usize>, AdapterError> {
        let trigger = self.alloc();
        let popup = self.alloc();
        let options = (0..mirror.len()).map(|_| self.alloc()).collect();
        self.visible.insert(popup);
        Ok(ControlParts {
            trigger,
            popup,
            options,
            decoration: None,
        })
    }

    fn destroy_parts(
        &mut self,
        _native: &usize,
        parts: &ControlParts<usize>,
    ) -> Result<(), AdapterError> {
        self.visible.remove(&parts.popup);
        Ok(())
    }

    fn set_popup_visible(&mut self, popup: &usize, visible: bool) -> Result<(), AdapterError> {
        if visible {
            self.visible.insert(*popup);
        } else {
            self.visible.remove(popup);
        }
        Ok(())
    }

    fn is_popup_visible(&self, popup: &usize) -> bool {
        self.visible.contains(popup)
    }

    fn scroll_popup_to(&mut self, _: &usize, _: &usize, _: usize) -> Result<(), AdapterError> {
        Ok(())
    }

    fn set_trigger_text(&mut self, trigger: &usize, text: &str) -> Result<(), AdapterError> {
        self.trigger_text.push((*trigger, text.to_string()));
        Ok(())
    }

    fn highlight_option(&mut self, _: &usize, _: bool) -> Result<(), AdapterError> {
        Ok(())
    }

    fn set_native_value(&mut self, native: &usize, value: &str) -> Result<(), AdapterError> {
        self.values.push((*native, value.to_string()));
        Ok(())
    }

    fn notify_change(&mut self, native: &usize) -> Result<(), AdapterError> {
        self.changes.push(*native);
        Ok(())
    }

    fn focus_native(&mut self, native: &usize) -> Result<(), AdapterError> {
        self.focused = Some(*native);
        Ok(())
    }

    fn contains(&self, ancestor: &usize, node: &usize) -> bool {
        ancestor == node
    }
}

fn manager() -> DropdownManager<Recorder> {
    let recorder = Recorder::with(vec![
        (
            1,
            vec![
                NativeOption::new("one", "One").selected(),
                NativeOption::new("two", "Two"),
            ],
        ),
        (2, vec![NativeOption::new("x", "X")]),
    ]);
    let mut manager = DropdownManager::new(recorder, SelectaConfig::default());
    manager.init().unwrap();
    manager
}

// ============================================================================
// Generic host
// ============================================================================

#[test]
fn test_init_hides_every_popup() {
    let m = manager();
    assert_eq!(m.len(), 2);
    assert!(m.adapter().visible.is_empty());
    assert!(m.open_controls().is_empty());
}

#[test]
fn test_initial_trigger_text_only_for_selection() {
    let m = manager();
    let first = m.find_by_native(&1).unwrap();
    let trigger = *m.control(first).unwrap().trigger();
    assert_eq!(m.adapter().trigger_text, vec![(trigger, "One".to_string())]);
}

#[test]
fn test_open_without_text_selection_support() {
    let mut m = manager();
    let id = m.find_by_native(&1).unwrap();
    m.open(id).unwrap();
    assert!(m.is_open(id));
    assert_eq!(m.take_events(), vec![DropdownEvent::Opened(id)]);
}

#[test]
fn test_commit_reaches_host() {
    let mut m = manager();
    let id = m.find_by_native(&1).unwrap();
    m.open(id).unwrap();

    let mut event = KeyboardEvent::new(Key::Down);
    m.handle_key(&mut event);
    assert!(event.is_stopped());
    m.handle_key(&mut KeyboardEvent::new(Key::Enter));

    let host = m.adapter();
    assert_eq!(host.values, vec![(1, "two".to_string())]);
    assert_eq!(host.changes, vec![1]);
    assert!(host.visible.is_empty());
}

#[test]
fn test_type_ahead_restores_host_focus() {
    let mut m = manager();
    let id = m.find_by_native(&1).unwrap();
    m.open(id).unwrap();

    m.handle_key(&mut KeyboardEvent::new(Key::Char('t')));
    assert_eq!(m.control(id).unwrap().selected_index(), Some(1));
    assert_eq!(m.adapter().focused, Some(1));
    assert!(m.is_open(id));
}

#[test]
fn test_outside_click_on_generic_host() {
    let mut m = manager();
    let id = m.find_by_native(&2).unwrap();
    m.open(id).unwrap();

    let mut event = MouseEvent::new(None);
    m.handle_click(Some(&999), &mut event);
    assert!(!event.is_stopped());
    assert!(m.open_controls().is_empty());
}

#[test]
fn test_into_adapter_returns_host() {
    let m = manager();
    let host = m.into_adapter();
    assert_eq!(host.natives.len(), 2);
}
