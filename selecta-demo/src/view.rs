//! Flattens the page into terminal rows.
//!
//! Native selects are parked off-screen by the widget, so only labels,
//! triggers, open popups and plain text are drawn. Open popups are laid out
//! inline below their trigger rather than overlaid.

use std::collections::HashMap;

use selecta::DomDropdowns;
use selecta_dom::{Document, NodeId};

const TITLE: &str = "selecta demo  (Tab: next field, Enter/Down: open, Ctrl+Q: quit)";
const ARROW: &str = "\u{25be}";
const OPTION_INDENT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Title,
    Label,
    Trigger { focused: bool },
    Option { highlighted: bool, disabled: bool },
}

#[derive(Debug, Clone)]
pub struct Row {
    /// Element a click on this row lands on.
    pub node: Option<NodeId>,
    pub indent: u16,
    pub text: String,
    pub emphasis: Emphasis,
}

/// One rendered screen.
#[derive(Debug, Default)]
pub struct Frame {
    rows: Vec<Row>,
}

impl Frame {
    pub fn build(dropdowns: &DomDropdowns) -> Self {
        let doc = dropdowns.document();
        let config = dropdowns.config();

        // trigger -> native, to mark the focused field
        let natives: HashMap<NodeId, NodeId> = dropdowns
            .control_ids()
            .into_iter()
            .filter_map(|id| dropdowns.control(id))
            .map(|c| (*c.trigger(), *c.native()))
            .collect();

        let mut frame = Frame::default();
        frame.push(None, 0, TITLE.to_string(), Emphasis::Title);
        frame.push(None, 0, String::new(), Emphasis::Plain);

        let Ok(children) = doc.children(doc.body()) else {
            return frame;
        };
        for node_id in children {
            let Ok(node) = doc.get(node_id) else {
                continue;
            };
            if !node.is_visible() {
                continue;
            }
            if node.tag == "select" {
                // Managed natives are parked off-screen; anything else is shown as-is.
                if !natives.values().any(|native| *native == node_id) {
                    let value = doc.value(node_id).unwrap_or_default();
                    frame.push(Some(node_id), 0, format!("<select> {value}"), Emphasis::Plain);
                }
            } else if node.has_class(&config.trigger_class) {
                let focused = natives
                    .get(&node_id)
                    .is_some_and(|native| doc.focused() == Some(*native));
                let text = trigger_text(doc, node_id);
                frame.push(Some(node_id), 0, text, Emphasis::Trigger { focused });
            } else if node.has_class(&config.wrapper_class) {
                frame.push_popup(doc, node_id, &config.option_class_selected, &config.option_disabled_class);
            } else if node.tag == "label" {
                frame.push(Some(node_id), 0, node.text.clone(), Emphasis::Label);
            } else if !node.text.is_empty() {
                frame.push(Some(node_id), 0, node.text.clone(), Emphasis::Plain);
            }
        }
        frame
    }

    fn push(&mut self, node: Option<NodeId>, indent: u16, text: String, emphasis: Emphasis) {
        self.rows.push(Row {
            node,
            indent,
            text,
            emphasis,
        });
    }

    /// Options visible through the popup's scroll window.
    fn push_popup(&mut self, doc: &Document, popup: NodeId, selected: &str, disabled: &str) {
        let Ok(node) = doc.get(popup) else {
            return;
        };
        let options = doc.children(popup).unwrap_or_default();
        let start = node.scroll_top.max(0) as usize;
        let window = node
            .style
            .height
            .map(|h| h.max(1) as usize)
            .unwrap_or(options.len());
        // Keep the window full when scrolled near the end.
        let start = start.min(options.len().saturating_sub(window));

        for option in options.into_iter().skip(start).take(window) {
            let emphasis = Emphasis::Option {
                highlighted: doc.has_class(option, selected),
                disabled: doc.has_class(option, disabled),
            };
            self.push(Some(option), OPTION_INDENT, doc.text_content(option), emphasis);
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Element under screen row `y`, if any.
    pub fn node_at(&self, y: u16) -> Option<NodeId> {
        self.rows.get(y as usize).and_then(|row| row.node)
    }
}

fn trigger_text(doc: &Document, trigger: NodeId) -> String {
    let text = doc.text_content(trigger);
    let width = doc
        .get(trigger)
        .ok()
        .and_then(|n| n.style.width)
        .unwrap_or(0)
        .max(text.chars().count() as i32) as usize;
    format!("[ {text:<width$} {ARROW} ]")
}
