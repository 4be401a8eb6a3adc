use std::collections::HashMap;

/// Handle to a node in a [`Document`](crate::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

/// Inline style of a node. Only the properties the widget glue touches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub display: Display,
    pub position: Position,
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub z_index: i32,
    pub float_left: bool,
    pub background_image: Option<String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn left(mut self, left: i32) -> Self {
        self.left = Some(left);
        self
    }

    pub fn top(mut self, top: i32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    pub fn float_left(mut self) -> Self {
        self.float_left = true;
        self
    }

    pub fn background_image(mut self, url: impl Into<String>) -> Self {
        self.background_image = Some(url.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub style: Style,
    /// Vertical scroll offset in rows.
    pub scroll_top: i32,
    pub focusable: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        let focusable = matches!(tag.as_str(), "select" | "input" | "button" | "a");
        Self {
            tag,
            attrs: HashMap::new(),
            classes: Vec::new(),
            text: String::new(),
            style: Style::default(),
            scroll_top: 0,
            focusable,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn html_id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn is_visible(&self) -> bool {
        self.style.display != Display::None
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Description of a native `<option>` used when building fixture pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub value: String,
    pub text: String,
    pub selected: bool,
    pub disabled: bool,
}

impl OptionSpec {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
            disabled: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl<V: Into<String>, T: Into<String>> From<(V, T)> for OptionSpec {
    fn from((value, text): (V, T)) -> Self {
        Self::new(value, text)
    }
}
