use crate::node::NodeId;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

impl Key {
    /// Legacy DOM `keyCode` for this key.
    ///
    /// Letters map to their uppercase ASCII code and digits to their ASCII
    /// code, which is what browsers report for the main keyboard block.
    pub fn code(&self) -> u16 {
        match self {
            Key::Char(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase() as u16,
            Key::Char(c) if c.is_ascii_digit() => *c as u16,
            Key::Char(' ') => 32,
            Key::Char(_) => 0,
            Key::Enter => 13,
            Key::Backspace => 8,
            Key::Delete => 46,
            Key::Tab | Key::BackTab => 9,
            Key::Escape => 27,
            Key::Up => 38,
            Key::Down => 40,
            Key::Left => 37,
            Key::Right => 39,
            Key::Home => 36,
            Key::End => 35,
            Key::PageUp => 33,
            Key::PageDown => 34,
            Key::Insert => 45,
            Key::F(n) => 111 + *n as u16,
        }
    }
}

/// Events whose propagation and default action can always be cancelled.
pub trait Cancellable {
    /// Stop propagation and prevent the default action.
    fn stop(&mut self);

    fn is_stopped(&self) -> bool;
}

/// A keydown delivered to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub code: u16,
    stopped: bool,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            code: key.code(),
            stopped: false,
        }
    }

    /// Override the reported key code (non-ISO layouts, synthetic events).
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }
}

impl Cancellable for KeyboardEvent {
    fn stop(&mut self) {
        self.stopped = true;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// A mouse event targeted at a node, or at nothing in particular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub target: Option<NodeId>,
    stopped: bool,
}

impl MouseEvent {
    pub fn new(target: Option<NodeId>) -> Self {
        Self {
            target,
            stopped: false,
        }
    }

    pub fn on(target: NodeId) -> Self {
        Self::new(Some(target))
    }
}

impl Cancellable for MouseEvent {
    fn stop(&mut self) {
        self.stopped = true;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// A `change` notification raised on a native control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target: NodeId,
    pub value: String,
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}
