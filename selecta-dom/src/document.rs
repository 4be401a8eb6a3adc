use unicode_width::UnicodeWidthStr;

use crate::error::DomError;
use crate::event::ChangeEvent;
use crate::node::{Display, Node, NodeId, OptionSpec, Style};
use crate::selector::Selector;

/// The node a text selection is anchored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSelection {
    pub anchor: NodeId,
    /// A locked selection refuses to be cleared (restricted or hidden range).
    pub locked: bool,
}

/// An arena-backed page: a tree of nodes rooted at `body`, plus the bits of
/// document state the widget layer reads and writes (focus, text selection and
/// the log of `change` notifications).
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    body: NodeId,
    focused: Option<NodeId>,
    selection: Option<TextSelection>,
    changes: Vec<ChangeEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new("body"))],
            body: NodeId(0),
            focused: None,
            selection: None,
            changes: Vec::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // -------------------------------------------------------------------------
    // Node access
    // -------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Some(Node::new(tag)));
        NodeId(self.nodes.len() - 1)
    }

    pub fn exists(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(DomError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::UnknownNode(id))
    }

    /// Number of live nodes, including `body`.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        Ok(self.get(id)?.children.clone())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).ok().and_then(|n| n.parent)
    }

    /// True if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True if the node is reachable from `body`.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.exists(id) && self.contains(self.body, id)
    }

    /// Pre-order list of `root` and all of its descendants.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.get(id)?.parent {
            self.get_mut(parent)?.children.retain(|c| *c != id);
        }
        self.get_mut(id)?.parent = None;
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.get(parent)?;
        self.detach(child)?;
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn insert_sibling(
        &mut self,
        reference: NodeId,
        node: NodeId,
        after: bool,
    ) -> Result<(), DomError> {
        let parent = self.get(reference)?.parent.ok_or(DomError::Detached(reference))?;
        self.detach(node)?;
        let siblings = &mut self.get_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|c| *c == reference)
            .ok_or(DomError::Detached(reference))?;
        siblings.insert(if after { pos + 1 } else { pos }, node);
        self.get_mut(node)?.parent = Some(parent);
        Ok(())
    }

    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        self.insert_sibling(reference, node, true)
    }

    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        self.insert_sibling(reference, node, false)
    }

    /// Destroy a node and its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.detach(id)?;
        for node in self.descendants(id) {
            if self.focused == Some(node) {
                self.focused = None;
            }
            if self.selection.map(|s| s.anchor) == Some(node) {
                self.selection = None;
            }
            self.nodes[node.0] = None;
        }
        log::trace!("[dom] removed {}", id);
        Ok(())
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = &self.get(parent).ok()?.children;
        let pos = siblings.iter().position(|c| *c == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    // -------------------------------------------------------------------------
    // Attributes, classes, text
    // -------------------------------------------------------------------------

    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.get_mut(id)?.attrs.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.get_mut(id)?.attrs.remove(name);
        Ok(())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.get(id).ok()?.attr(name).map(str::to_string)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let node = self.get_mut(id)?;
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        self.get_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id).map(|n| n.has_class(class)).unwrap_or(false)
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.get_mut(id)?.text = text.into();
        Ok(())
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.get(n).ok())
            .map(|n| n.text.as_str())
            .collect()
    }

    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), DomError> {
        self.get_mut(id)?.style = style;
        Ok(())
    }

    pub fn set_display(&mut self, id: NodeId, display: Display) -> Result<(), DomError> {
        self.get_mut(id)?.style.display = display;
        Ok(())
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.get(id).map(Node::is_visible).unwrap_or(false)
    }

    pub fn scroll_to(&mut self, id: NodeId, top: i32) -> Result<(), DomError> {
        self.get_mut(id)?.scroll_top = top.max(0);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All attached nodes under `root` matching `selector`, in document order.
    pub fn query_all_in(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(root)
            .into_iter()
            .filter(|id| *id != root)
            .filter(|id| self.get(*id).map(|n| selector.matches(n)).unwrap_or(false))
            .collect())
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.query_all_in(self.body, selector)
    }

    pub fn query(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    pub fn element_by_id(&self, html_id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|id| self.get(*id).ok().and_then(Node::html_id) == Some(html_id))
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Rendered width in columns: explicit style width, else intrinsic.
    pub fn outer_width(&self, id: NodeId) -> i32 {
        let Ok(node) = self.get(id) else {
            return 0;
        };
        if let Some(width) = node.style.width {
            return width;
        }
        if node.tag == "select" {
            // Widest option plus room for the native arrow box.
            let widest = node
                .children
                .iter()
                .map(|c| self.text_content(*c).trim().width() as i32)
                .max()
                .unwrap_or(0);
            return widest + 4;
        }
        let own = node.text.width() as i32;
        node.children
            .iter()
            .map(|c| self.outer_width(*c))
            .fold(own, i32::max)
    }

    /// Rendered height in rows: explicit style height, else stacked children.
    pub fn outer_height(&self, id: NodeId) -> i32 {
        let Ok(node) = self.get(id) else {
            return 0;
        };
        if let Some(height) = node.style.height {
            return height;
        }
        if node.tag == "select" || node.children.is_empty() {
            return 1;
        }
        node.children
            .iter()
            .filter(|c| self.is_visible(**c))
            .map(|c| self.outer_height(*c))
            .sum()
    }

    /// Absolute position, summing `left`/`top` offsets up the tree.
    pub fn position(&self, id: NodeId) -> (i32, i32) {
        let mut x = 0;
        let mut y = 0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Ok(node) = self.get(node_id) else {
                break;
            };
            x += node.style.left.unwrap_or(0);
            y += node.style.top.unwrap_or(0);
            current = node.parent;
        }
        (x, y)
    }

    // -------------------------------------------------------------------------
    // Focus and text selection
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Returns true if focus changed.
    pub fn focus(&mut self, id: NodeId) -> Result<bool, DomError> {
        self.get(id)?;
        if self.focused == Some(id) {
            return Ok(false);
        }
        self.focused = Some(id);
        Ok(true)
    }

    /// Returns true if something was focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    pub fn select_text(&mut self, anchor: NodeId) -> Result<(), DomError> {
        self.get(anchor)?;
        self.selection = Some(TextSelection {
            anchor,
            locked: false,
        });
        Ok(())
    }

    pub fn lock_selection(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            selection.locked = true;
        }
    }

    pub fn selection(&self) -> Option<TextSelection> {
        self.selection
    }

    pub fn clear_selection(&mut self) -> Result<(), DomError> {
        match self.selection {
            Some(TextSelection { locked: true, .. }) => Err(DomError::SelectionLocked),
            _ => {
                self.selection = None;
                Ok(())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Native form controls
    // -------------------------------------------------------------------------

    /// Append a native `<select>` with the given options to `parent`.
    pub fn add_select(
        &mut self,
        parent: NodeId,
        html_id: Option<&str>,
        classes: &[&str],
        options: impl IntoIterator<Item = OptionSpec>,
    ) -> Result<NodeId, DomError> {
        let select = self.create_element("select");
        if let Some(html_id) = html_id {
            self.set_attr(select, "id", html_id)?;
        }
        for class in classes {
            self.add_class(select, class)?;
        }
        self.append_child(parent, select)?;

        let mut value = None;
        for spec in options {
            let option = self.create_element("option");
            self.set_attr(option, "value", spec.value.as_str())?;
            self.set_text(option, spec.text.as_str())?;
            if spec.selected {
                self.set_attr(option, "selected", "selected")?;
                value = Some(spec.value.clone());
            }
            if spec.disabled {
                self.set_attr(option, "disabled", "disabled")?;
            }
            if value.is_none() {
                value = Some(spec.value.clone());
            }
            self.append_child(select, option)?;
        }
        if let Some(value) = value {
            self.set_attr(select, "value", value)?;
        }
        Ok(select)
    }

    pub fn add_label(
        &mut self,
        parent: NodeId,
        for_id: &str,
        text: &str,
    ) -> Result<NodeId, DomError> {
        let label = self.create_element("label");
        self.set_attr(label, "for", for_id)?;
        self.set_text(label, text)?;
        self.append_child(parent, label)?;
        Ok(label)
    }

    /// Current value of a form control.
    pub fn value(&self, id: NodeId) -> Option<String> {
        self.attr(id, "value")
    }

    /// Set a form control's value. For selects the matching option becomes
    /// the only one flagged `selected`.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.set_attr(id, "value", value)?;
        if self.get(id)?.tag == "select" {
            for option in self.children(id)? {
                if self.attr(option, "value").as_deref() == Some(value) {
                    self.set_attr(option, "selected", "selected")?;
                } else {
                    self.remove_attr(option, "selected")?;
                }
            }
        }
        Ok(())
    }

    /// Raise a `change` notification on a control, carrying its current value.
    pub fn dispatch_change(&mut self, target: NodeId) -> Result<(), DomError> {
        let value = self.value(target).unwrap_or_default();
        log::debug!("[dom] change on {} value={:?}", target, value);
        self.changes.push(ChangeEvent { target, value });
        Ok(())
    }

    pub fn changes(&self) -> &[ChangeEvent] {
        &self.changes
    }

    pub fn take_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.changes)
    }
}
