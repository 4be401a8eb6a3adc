//! Custom-styled dropdowns that shadow native select controls.
//!
//! A [`DropdownManager`] owns every converted control and the single global
//! "open" pointer. Hosts feed it page input (`handle_key`, `handle_click`,
//! `handle_focus`, ...) and it drives the visuals through a
//! [`RenderAdapter`], keeping the native control's value and `change`
//! notifications in sync with what the user picks.

pub mod adapter;
pub mod config;
pub mod control;
pub mod dom_adapter;
pub mod error;
pub mod events;
pub mod keyboard;
mod machine;
pub mod manager;
pub mod mirror;
pub mod typeahead;

pub use adapter::{ControlParts, RenderAdapter};
pub use config::SelectaConfig;
pub use control::{Control, ControlId};
pub use dom_adapter::{DomAdapter, DomDropdowns};
pub use error::{AdapterError, SelectaError};
pub use events::{Direction, DropdownEvent, EventResult};
pub use keyboard::Edge;
pub use manager::DropdownManager;
pub use mirror::{NativeOption, OptionEntry, OptionMirror};
pub use typeahead::TypeAheadIndex;

pub mod prelude {
    pub use crate::config::SelectaConfig;
    pub use crate::control::ControlId;
    pub use crate::dom_adapter::{DomAdapter, DomDropdowns};
    pub use crate::events::{Direction, DropdownEvent, EventResult};
    pub use crate::manager::DropdownManager;

    pub use selecta_dom::{Document, Key, KeyboardEvent, MouseEvent, NodeId, OptionSpec};
}
