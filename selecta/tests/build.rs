use selecta::prelude::*;
use selecta::{RenderAdapter, SelectaError};
use selecta_dom::Position;

fn single(options: Vec<OptionSpec>) -> (Document, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let native = doc
        .add_select(body, Some("pick"), &["selecta"], options)
        .unwrap();
    (doc, native)
}

fn colours() -> Vec<OptionSpec> {
    vec![
        OptionSpec::new("red", "Red"),
        OptionSpec::new("green", "Green").selected(),
        OptionSpec::new("blue", "Blue"),
    ]
}

fn count_class(doc: &Document, class: &str) -> usize {
    doc.query_all(&format!(".{class}")).unwrap().len()
}

// ============================================================================
// Initialisation
// ============================================================================

#[test]
fn test_init_without_matches_is_an_error() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.add_select(body, None, &["plain"], [OptionSpec::new("a", "A")])
        .unwrap();
    let nodes_before = doc.len();

    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let result = d.init();
    assert!(matches!(
        result,
        Err(SelectaError::NoMatchingControls { ref selector }) if selector == "select.selecta"
    ));
    assert!(d.is_empty());
    assert_eq!(d.document().len(), nodes_before);
}

#[test]
fn test_init_skips_non_select_matches() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.create_element("div");
    doc.add_class(div, "selecta").unwrap();
    doc.append_child(body, div).unwrap();
    doc.add_select(body, None, &["selecta"], [OptionSpec::new("a", "A")])
        .unwrap();

    let mut d = DomDropdowns::with_document(doc, SelectaConfig::new().selector(".selecta"));
    assert_eq!(d.init().unwrap().len(), 1);
}

#[test]
fn test_init_builds_hidden_parts() {
    let (doc, native) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];

    let control = d.control(id).unwrap();
    let doc = d.document();
    assert_eq!(control.native(), &native);
    assert_eq!(control.parts().options.len(), 3);
    assert!(!doc.is_visible(*control.popup()));
    assert_eq!(d.focused(), None);

    // Trigger sits right after the native control, popup right after it.
    let siblings = doc.children(doc.body()).unwrap();
    let at = siblings.iter().position(|n| *n == native).unwrap();
    assert_eq!(siblings[at + 1], *control.trigger());
    assert_eq!(siblings[at + 2], *control.popup());

    let options = &control.parts().options;
    assert_eq!(doc.text_content(options[0]), "Red");
    assert_eq!(doc.attr(options[2], "data-value").as_deref(), Some("blue"));
    assert_eq!(doc.attr(options[2], "data-index").as_deref(), Some("2"));
    assert!(doc.has_class(options[1], "selectaOption"));
}

#[test]
fn test_initial_selection_sets_trigger_text() {
    let (doc, _) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];

    let control = d.control(id).unwrap();
    assert_eq!(control.selected_index(), Some(1));
    assert_eq!(control.selected().unwrap().value, "green");
    let doc = d.document();
    assert_eq!(doc.get(*control.trigger()).unwrap().text, "Green");
    assert!(doc.has_class(control.parts().options[1], "selectaOptionSelected"));
    assert!(doc.changes().is_empty());
}

#[test]
fn test_disabled_option_gets_class() {
    let (doc, _) = single(vec![
        OptionSpec::new("a", "A"),
        OptionSpec::new("b", "B").disabled(),
    ]);
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];

    let options = &d.control(id).unwrap().parts().options;
    assert!(!d.document().has_class(options[0], "selectaDisabled"));
    assert!(d.document().has_class(options[1], "selectaDisabled"));
    assert!(d.control(id).unwrap().mirror().get(1).unwrap().disabled);
}

#[test]
fn test_native_parked_offscreen() {
    let (doc, native) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    d.init().unwrap();

    let style = &d.document().get(native).unwrap().style;
    assert_eq!(style.position, Position::Absolute);
    assert!(style.left.unwrap() < 0);
    assert!(style.top.unwrap() < 0);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_trigger_and_popup_widths() {
    let (mut doc, native) = single(colours());
    doc.get_mut(native).unwrap().style.width = Some(40);
    let config = SelectaConfig::new().wrapper_width_adjustment(3);
    let mut d = DomDropdowns::with_document(doc, config);
    let id = d.init().unwrap()[0];

    let control = d.control(id).unwrap();
    let doc = d.document();
    assert_eq!(doc.outer_width(*control.trigger()), 40 - 35);
    assert_eq!(doc.outer_width(*control.popup()), 5 - 2 + 3);
}

fn panel_doc() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    let panel = doc.create_element("div");
    doc.add_class(panel, "panel").unwrap();
    doc.set_style(panel, selecta_dom::Style::new().left(10).top(4))
        .unwrap();
    doc.append_child(body, panel).unwrap();
    doc.add_select(panel, None, &["selecta"], colours()).unwrap();
    doc
}

#[test]
fn test_popup_positioned_below_trigger() {
    let mut d = DomDropdowns::with_document(panel_doc(), SelectaConfig::default());
    let id = d.init().unwrap()[0];
    let popup = *d.control(id).unwrap().popup();

    let style = &d.document().get(popup).unwrap().style;
    assert_eq!(style.position, Position::Absolute);
    assert_eq!((style.left, style.top), (Some(10), Some(5)));
    assert_eq!(style.z_index, 10000);
}

#[test]
fn test_popup_positioned_relative_to_ancestor() {
    let config = SelectaConfig::new().position_relative_to(".panel");
    let mut d = DomDropdowns::with_document(panel_doc(), config);
    let id = d.init().unwrap()[0];
    let popup = *d.control(id).unwrap().popup();

    let style = &d.document().get(popup).unwrap().style;
    assert_eq!((style.left, style.top), (Some(0), Some(1)));
}

#[test]
fn test_wrapper_height_clamps_popup() {
    let (doc, _) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::new().wrapper_height(2));
    let id = d.init().unwrap()[0];
    let popup = *d.control(id).unwrap().popup();
    assert_eq!(d.document().get(popup).unwrap().style.height, Some(2));

    let (doc, _) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::new().wrapper_height(10));
    let id = d.init().unwrap()[0];
    let popup = *d.control(id).unwrap().popup();
    assert_eq!(d.document().get(popup).unwrap().style.height, None);
}

#[test]
fn test_before_image_decoration() {
    let (doc, _) = single(colours());
    let config = SelectaConfig::new().trigger_before_image("arrow.png", 3, 1);
    let mut d = DomDropdowns::with_document(doc, config);
    let id = d.init().unwrap()[0];

    let parts = d.control(id).unwrap().parts().clone();
    let decoration = parts.decoration.unwrap();
    let doc = d.document();
    assert_eq!(doc.previous_sibling(parts.trigger), Some(decoration));
    assert_eq!(
        doc.get(decoration).unwrap().style.background_image.as_deref(),
        Some("arrow.png")
    );
}

// ============================================================================
// Rebuild
// ============================================================================

#[test]
fn test_rebuild_replaces_parts_and_keeps_id() {
    let (doc, native) = single(colours());
    let config = SelectaConfig::new().trigger_before_image("arrow.png", 3, 1);
    let mut d = DomDropdowns::with_document(doc, config);
    let id = d.init().unwrap()[0];
    let old_parts = d.control(id).unwrap().parts().clone();

    let extra = d.document_mut().create_element("option");
    d.document_mut().set_attr(extra, "value", "violet").unwrap();
    d.document_mut().set_text(extra, "Violet").unwrap();
    d.document_mut().append_child(native, extra).unwrap();

    let rebuilt = d.init().unwrap();
    assert_eq!(rebuilt, vec![id]);
    assert_eq!(d.len(), 1);

    let doc = d.document();
    assert_eq!(count_class(doc, "selectaTrigger"), 1);
    assert_eq!(count_class(doc, "selectaWrapper"), 1);
    assert!(!doc.exists(old_parts.trigger));
    assert!(!doc.exists(old_parts.popup));
    assert!(!doc.exists(old_parts.decoration.unwrap()));
    assert_eq!(d.control(id).unwrap().mirror().len(), 4);
}

#[test]
fn test_rebuild_of_open_control_clears_focus() {
    let (doc, native) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];
    d.open(id).unwrap();

    d.replace(native).unwrap();
    assert_eq!(d.focused(), None);
    assert!(!d.is_open(id));
}

#[test]
fn test_rebuild_of_open_control_reports_close() {
    let (doc, native) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];
    d.open(id).unwrap();
    d.take_events();

    d.replace(native).unwrap();
    assert_eq!(d.take_events(), vec![DropdownEvent::Closed(id)]);

    // A closed control rebuilds quietly.
    d.replace(native).unwrap();
    assert!(d.take_events().is_empty());
}

#[test]
fn test_adapter_reports_visibility() {
    let (doc, _) = single(colours());
    let mut d = DomDropdowns::with_document(doc, SelectaConfig::default());
    let id = d.init().unwrap()[0];
    let popup = *d.control(id).unwrap().popup();

    d.open(id).unwrap();
    assert!(d.adapter().is_popup_visible(&popup));
    d.close(id).unwrap();
    assert!(!d.adapter().is_popup_visible(&popup));
}
