//! [`RenderAdapter`] over an in-memory [`Document`].

use selecta_dom::{Display, Document, MouseEvent, NodeId, Position, Style};

use crate::adapter::{ControlParts, RenderAdapter};
use crate::config::SelectaConfig;
use crate::error::AdapterError;
use crate::events::EventResult;
use crate::manager::DropdownManager;
use crate::mirror::{NativeOption, OptionMirror};

/// Class that gives an element a clickable cursor.
const CURSOR_CLASS: &str = "cur";
/// Stacking order of open popups.
const POPUP_Z_INDEX: i32 = 10000;
/// Native controls are parked here: off-screen but still focusable.
const OFFSCREEN: i32 = -1000;

/// Renders triggers and popups as plain `div`s in a [`Document`].
#[derive(Debug)]
pub struct DomAdapter {
    doc: Document,
    config: SelectaConfig,
}

impl DomAdapter {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            config: SelectaConfig::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Origin the popup is positioned against.
    fn offset_parent_origin(&self, native: NodeId) -> (i32, i32) {
        let Some(selector) = &self.config.position_relative_selector else {
            return (0, 0);
        };
        let Ok(candidates) = self.doc.query_all(selector) else {
            log::warn!("invalid positionRelativeSelector '{}'", selector);
            return (0, 0);
        };
        let mut current = self.doc.parent(native);
        while let Some(id) = current {
            if candidates.contains(&id) {
                return self.doc.position(id);
            }
            current = self.doc.parent(id);
        }
        (0, 0)
    }

    fn div(&mut self, classes: &[&str]) -> Result<NodeId, AdapterError> {
        let node = self.doc.create_element("div");
        for class in classes.iter().filter(|c| !c.is_empty()) {
            self.doc.add_class(node, class)?;
        }
        Ok(node)
    }
}

impl RenderAdapter for DomAdapter {
    type Handle = NodeId;

    fn configure(&mut self, config: &SelectaConfig) {
        self.config = config.clone();
    }

    fn find_controls(&self, selector: &str) -> Result<Vec<NodeId>, AdapterError> {
        Ok(self
            .doc
            .query_all(selector)?
            .into_iter()
            .filter(|id| self.doc.get(*id).map(|n| n.tag == "select").unwrap_or(false))
            .collect())
    }

    fn native_options(&self, native: &NodeId) -> Result<Vec<NativeOption>, AdapterError> {
        let mut options = Vec::new();
        for child in self.doc.children(*native)? {
            let node = self.doc.get(child)?;
            if node.tag != "option" {
                continue;
            }
            let text = self.doc.text_content(child);
            options.push(NativeOption {
                value: node.attr("value").map(str::to_string).unwrap_or_else(|| text.clone()),
                text,
                selected: node.has_attr("selected"),
                disabled: node.has_attr("disabled"),
            });
        }
        Ok(options)
    }

    fn find_label(&self, native: &NodeId) -> Option<NodeId> {
        let html_id = self.doc.attr(*native, "id")?;
        self.doc
            .query(&format!("label[for={html_id}]"))
            .ok()
            .flatten()
    }

    fn build_parts(
        &mut self,
        native: &NodeId,
        config: &SelectaConfig,
        mirror: &OptionMirror,
    ) -> Result<ControlParts<NodeId>, AdapterError> {
        let native = *native;
        let width = self.doc.outer_width(native);

        let trigger = self.div(&[config.trigger_class.as_str(), CURSOR_CLASS])?;
        self.doc
            .set_style(trigger, Style::new().width(width - config.trigger_padding))?;
        self.doc.insert_after(native, trigger)?;

        // Popup matches the trigger as actually rendered.
        let popup_width = self.doc.outer_width(trigger) - 2 - config.trigger_before_image_width
            + config.wrapper_width_adjustment;

        let decoration = if config.has_before_image() {
            let image = self.div(&[])?;
            self.doc.set_style(
                image,
                Style::new()
                    .float_left()
                    .position(Position::Relative)
                    .background_image(config.trigger_before_image.as_str())
                    .width(config.trigger_before_image_width)
                    .height(config.trigger_before_image_height),
            )?;
            self.doc.insert_before(trigger, image)?;
            Some(image)
        } else {
            None
        };

        let (x, y) = self.doc.position(native);
        let (origin_x, origin_y) = self.offset_parent_origin(native);
        let popup = self.div(&[config.wrapper_class.as_str(), config.wrapper_shadow.as_str()])?;
        self.doc.set_style(
            popup,
            Style::new()
                .position(Position::Absolute)
                .width(popup_width)
                .z_index(POPUP_Z_INDEX)
                .left(x - origin_x - config.trigger_before_image_width)
                .top(y - origin_y + self.doc.outer_height(trigger)),
        )?;
        self.doc.insert_after(trigger, popup)?;

        let mut options = Vec::with_capacity(mirror.len());
        for entry in mirror.iter() {
            let option = self.div(&[config.option_class.as_str(), CURSOR_CLASS])?;
            self.doc.set_text(option, entry.text.as_str())?;
            self.doc.set_attr(option, "data-value", entry.value.as_str())?;
            self.doc.set_attr(option, "data-index", entry.index.to_string())?;
            if entry.disabled {
                self.doc.add_class(option, &config.option_disabled_class)?;
            }
            self.doc.append_child(popup, option)?;
            options.push(option);
        }

        if config.wrapper_height > 0 && self.doc.outer_height(popup) > config.wrapper_height {
            self.doc.get_mut(popup)?.style.height = Some(config.wrapper_height);
        }

        // Park the native control off-screen; it keeps tab order and labels.
        self.doc.set_style(
            native,
            Style::new()
                .position(Position::Absolute)
                .left(OFFSCREEN)
                .top(OFFSCREEN),
        )?;

        Ok(ControlParts {
            trigger,
            popup,
            options,
            decoration,
        })
    }

    fn destroy_parts(
        &mut self,
        native: &NodeId,
        parts: &ControlParts<NodeId>,
    ) -> Result<(), AdapterError> {
        if let Some(decoration) = parts.decoration {
            self.doc.remove(decoration)?;
        }
        self.doc.remove(parts.trigger)?;
        self.doc.remove(parts.popup)?;
        self.doc.set_style(
            *native,
            Style::new().position(Position::Relative).left(0).top(0),
        )?;
        Ok(())
    }

    fn set_popup_visible(&mut self, popup: &NodeId, visible: bool) -> Result<(), AdapterError> {
        let display = if visible { Display::Block } else { Display::None };
        self.doc.set_display(*popup, display)?;
        Ok(())
    }

    fn is_popup_visible(&self, popup: &NodeId) -> bool {
        self.doc.is_visible(*popup)
    }

    fn scroll_popup_to(
        &mut self,
        popup: &NodeId,
        option: &NodeId,
        index: usize,
    ) -> Result<(), AdapterError> {
        let row = self.doc.outer_height(*option);
        self.doc.scroll_to(*popup, row * index as i32)?;
        Ok(())
    }

    fn set_trigger_text(&mut self, trigger: &NodeId, text: &str) -> Result<(), AdapterError> {
        self.doc.set_text(*trigger, text)?;
        Ok(())
    }

    fn highlight_option(&mut self, option: &NodeId, on: bool) -> Result<(), AdapterError> {
        if on {
            self.doc.add_class(*option, &self.config.option_class_selected)?;
        } else {
            self.doc.remove_class(*option, &self.config.option_class_selected)?;
        }
        Ok(())
    }

    fn hover_option(&mut self, option: &NodeId, on: bool) -> Result<(), AdapterError> {
        if on {
            self.doc.add_class(*option, &self.config.option_class_over)?;
        } else {
            self.doc.remove_class(*option, &self.config.option_class_over)?;
        }
        Ok(())
    }

    fn set_native_value(&mut self, native: &NodeId, value: &str) -> Result<(), AdapterError> {
        self.doc.set_value(*native, value)?;
        Ok(())
    }

    fn notify_change(&mut self, native: &NodeId) -> Result<(), AdapterError> {
        self.doc.dispatch_change(*native)?;
        Ok(())
    }

    fn focus_native(&mut self, native: &NodeId) -> Result<(), AdapterError> {
        self.doc.focus(*native)?;
        Ok(())
    }

    fn clear_text_selection(&mut self) -> Result<(), AdapterError> {
        self.doc.clear_selection()?;
        Ok(())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.doc.contains(*ancestor, *node)
    }
}

/// A manager driving an in-memory page.
pub type DomDropdowns = DropdownManager<DomAdapter>;

impl DropdownManager<DomAdapter> {
    /// Convenience constructor over a document.
    pub fn with_document(doc: Document, config: SelectaConfig) -> Self {
        Self::new(DomAdapter::new(doc), config)
    }

    pub fn document(&self) -> &Document {
        self.adapter().document()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.adapter_mut().document_mut()
    }

    /// Route a page click carrying its own target.
    pub fn dispatch_click(&mut self, event: &mut MouseEvent) -> EventResult {
        let target = event.target;
        self.handle_click(target.as_ref(), event)
    }
}
