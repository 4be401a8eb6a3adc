pub mod document;
pub mod error;
pub mod event;
pub mod node;
pub mod selector;

pub use document::{Document, TextSelection};
pub use error::DomError;
pub use event::{Cancellable, ChangeEvent, Key, KeyboardEvent, MouseEvent};
pub use node::{Display, Node, NodeId, OptionSpec, Position, Style};
pub use selector::Selector;
