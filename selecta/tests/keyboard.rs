use selecta::prelude::*;
use selecta::{ControlId, Edge};
use selecta_dom::Cancellable;

fn fruit_page(config: SelectaConfig) -> (DomDropdowns, ControlId) {
    let mut doc = Document::new();
    let body = doc.body();
    doc.add_select(
        body,
        Some("fruit"),
        &["selecta"],
        [
            OptionSpec::new("apple", "Apple"),
            OptionSpec::new("apricot", "Apricot"),
            OptionSpec::new("banana", "Banana"),
            OptionSpec::new("blueberry", "Blueberry"),
        ],
    )
    .unwrap();

    let mut dropdowns = DomDropdowns::with_document(doc, config);
    let id = dropdowns.init().unwrap()[0];
    dropdowns.take_events();
    (dropdowns, id)
}

fn press(dropdowns: &mut DomDropdowns, key: Key) -> (EventResult, bool) {
    let mut event = KeyboardEvent::new(key);
    let result = dropdowns.handle_key(&mut event);
    (result, event.is_stopped())
}

fn selected(dropdowns: &DomDropdowns, id: ControlId) -> Option<usize> {
    dropdowns.control(id).unwrap().selected_index()
}

fn native(dropdowns: &DomDropdowns, id: ControlId) -> NodeId {
    *dropdowns.control(id).unwrap().native()
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_keys_pass_through_when_nothing_open() {
    let (mut d, id) = fruit_page(SelectaConfig::default());

    for key in [Key::Down, Key::Enter, Key::Char('a'), Key::Escape] {
        let (result, stopped) = press(&mut d, key);
        assert_eq!(result, EventResult::Ignored);
        assert!(!stopped);
    }
    assert_eq!(selected(&d, id), None);
    assert!(d.document().changes().is_empty());
}

#[test]
fn test_unhandled_key_is_swallowed_while_open() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let (result, stopped) = press(&mut d, Key::Escape);
    assert_eq!(result, EventResult::Consumed);
    assert!(stopped);
    assert!(d.is_open(id));
    assert_eq!(selected(&d, id), None);
}

#[test]
fn test_tab_closes_without_stopping() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let (result, stopped) = press(&mut d, Key::Tab);
    assert_eq!(result, EventResult::Ignored);
    assert!(!stopped);
    assert!(!d.is_open(id));
    assert_eq!(d.focused(), None);
}

// ============================================================================
// Arrows and Enter
// ============================================================================

#[test]
fn test_arrows_move_and_enter_commits() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let (result, stopped) = press(&mut d, Key::Down);
    assert!(result.is_handled());
    assert!(stopped);
    assert_eq!(selected(&d, id), Some(0));

    press(&mut d, Key::Down);
    press(&mut d, Key::Down);
    press(&mut d, Key::Up);
    assert_eq!(selected(&d, id), Some(1));
    assert!(d.document().changes().is_empty());

    press(&mut d, Key::Enter);
    let native = native(&d, id);
    assert_eq!(d.document().value(native).as_deref(), Some("apricot"));
    assert_eq!(d.document().changes().len(), 1);
    assert!(!d.is_open(id));
}

#[test]
fn test_enter_without_selection_does_nothing() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let (_, stopped) = press(&mut d, Key::Enter);
    assert!(stopped);
    assert!(d.document().changes().is_empty());
    assert!(d.is_open(id));
}

#[test]
fn test_down_at_end_stays() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();
    for _ in 0..10 {
        press(&mut d, Key::Down);
    }
    assert_eq!(selected(&d, id), Some(3));
}

// ============================================================================
// Jumps
// ============================================================================

#[test]
fn test_page_down_commits_last_and_keeps_focus() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let (_, stopped) = press(&mut d, Key::PageDown);
    assert!(stopped);

    let native = native(&d, id);
    assert_eq!(selected(&d, id), Some(3));
    assert_eq!(d.document().value(native).as_deref(), Some("blueberry"));
    assert_eq!(d.document().focused(), Some(native));
    assert!(d.is_open(id));
    assert_eq!(d.focused(), Some(id));
    assert_eq!(d.control(id).unwrap().previous_index(), None);
}

#[test]
fn test_home_commits_first_and_keeps_focus() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();
    press(&mut d, Key::End);
    assert_eq!(selected(&d, id), Some(3));

    press(&mut d, Key::Home);
    let native = native(&d, id);
    assert_eq!(selected(&d, id), Some(0));
    assert_eq!(d.document().value(native).as_deref(), Some("apple"));
    assert_eq!(d.document().focused(), Some(native));
    assert!(d.is_open(id));
}

#[test]
fn test_jump_to_disabled_edge_keeps_selection() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.add_select(
        body,
        None,
        &["selecta"],
        [
            OptionSpec::new("1", "One").selected(),
            OptionSpec::new("2", "Two").disabled(),
        ],
    )
    .unwrap();
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];
    d.open(id).unwrap();

    d.jump(id, Edge::Last).unwrap();
    assert_eq!(selected(&d, id), Some(0));
    assert!(d.document().changes().is_empty());
    assert!(d.is_open(id));
}

// ============================================================================
// Type-ahead
// ============================================================================

#[test]
fn test_type_ahead_cycles_consecutive_matches() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let mut seen = Vec::new();
    for _ in 0..3 {
        let (_, stopped) = press(&mut d, Key::Char('a'));
        assert!(stopped);
        seen.push(selected(&d, id));
    }
    assert_eq!(seen, vec![Some(0), Some(1), Some(0)]);
    assert!(d.is_open(id));
    assert_eq!(d.document().changes().len(), 3);
}

#[test]
fn test_type_ahead_is_case_insensitive() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    press(&mut d, Key::Char('B'));
    assert_eq!(selected(&d, id), Some(2));
    press(&mut d, Key::Char('b'));
    assert_eq!(selected(&d, id), Some(3));
}

#[test]
fn test_type_ahead_no_match_keeps_selection() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();
    press(&mut d, Key::Char('b'));

    let (result, stopped) = press(&mut d, Key::Char('z'));
    assert!(result.is_handled());
    assert!(stopped);
    assert_eq!(selected(&d, id), Some(2));
}

#[test]
fn test_type_ahead_on_disabled_match_commits_nothing() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.add_select(
        body,
        None,
        &["selecta"],
        [
            OptionSpec::new("apple", "Apple").disabled(),
            OptionSpec::new("banana", "Banana"),
        ],
    )
    .unwrap();
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];
    d.open(id).unwrap();

    assert_eq!(d.type_ahead(id, 'a').unwrap(), None);
    assert_eq!(selected(&d, id), None);
    assert!(d.document().changes().is_empty());
    assert!(d.is_open(id));

    assert_eq!(d.type_ahead(id, 'b').unwrap(), Some(1));
    assert_eq!(selected(&d, id), Some(1));
}

#[test]
fn test_type_ahead_uses_key_code_without_char() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    d.open(id).unwrap();

    let mut event = KeyboardEvent::new(Key::Char('\0')).with_code(66);
    d.handle_key(&mut event);
    assert_eq!(selected(&d, id), Some(2));
}

#[test]
fn test_disallowed_code_is_swallowed_without_search() {
    let config = SelectaConfig::default().allowed_keyboard_codes(48..=57);
    let (mut d, id) = fruit_page(config);
    d.open(id).unwrap();

    let (result, stopped) = press(&mut d, Key::Char('a'));
    assert!(result.is_handled());
    assert!(stopped);
    assert_eq!(selected(&d, id), None);
}

#[test]
fn test_type_ahead_after_rebuild() {
    let (mut d, id) = fruit_page(SelectaConfig::default());
    let native = native(&d, id);
    let cherry = d.document_mut().create_element("option");
    d.document_mut().set_attr(cherry, "value", "cherry").unwrap();
    d.document_mut().set_text(cherry, "Cherry").unwrap();
    d.document_mut().append_child(native, cherry).unwrap();

    assert_eq!(d.replace(native).unwrap(), id);
    d.open(id).unwrap();
    press(&mut d, Key::Char('c'));
    assert_eq!(selected(&d, id), Some(4));
}
