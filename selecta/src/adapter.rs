//! The rendering seam between the state machine and the host page.
//!
//! The manager never touches elements directly. Everything visual (element
//! creation, classes, geometry, scrolling, focus) goes through a
//! [`RenderAdapter`], which keeps the state machine testable against any host.

use std::fmt::Debug;

use crate::config::SelectaConfig;
use crate::error::AdapterError;
use crate::mirror::{NativeOption, OptionMirror};

/// Elements an adapter built for one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlParts<H> {
    /// Always-visible element showing the current selection.
    pub trigger: H,
    /// Container listing the mirrored options.
    pub popup: H,
    /// One rendered element per mirrored option, in mirror order.
    pub options: Vec<H>,
    /// Decorative element placed before the trigger, if configured.
    pub decoration: Option<H>,
}

/// Host operations consumed by the dropdown manager.
pub trait RenderAdapter {
    /// Reference to a host element.
    type Handle: Clone + PartialEq + Debug;

    /// Called once when the manager is created.
    fn configure(&mut self, _config: &SelectaConfig) {}

    // -------------------------------------------------------------------------
    // Discovery and construction
    // -------------------------------------------------------------------------

    /// Native controls matching `selector`, in document order.
    fn find_controls(&self, selector: &str) -> Result<Vec<Self::Handle>, AdapterError>;

    /// The native control's entries, in order.
    fn native_options(&self, native: &Self::Handle) -> Result<Vec<NativeOption>, AdapterError>;

    /// Label element that targets the native control.
    fn find_label(&self, _native: &Self::Handle) -> Option<Self::Handle> {
        None
    }

    /// Create trigger, popup and option elements for a native control.
    fn build_parts(
        &mut self,
        native: &Self::Handle,
        config: &SelectaConfig,
        mirror: &OptionMirror,
    ) -> Result<ControlParts<Self::Handle>, AdapterError>;

    /// Destroy previously built parts and restore the native control.
    fn destroy_parts(
        &mut self,
        native: &Self::Handle,
        parts: &ControlParts<Self::Handle>,
    ) -> Result<(), AdapterError>;

    // -------------------------------------------------------------------------
    // Visual state
    // -------------------------------------------------------------------------

    fn set_popup_visible(&mut self, popup: &Self::Handle, visible: bool)
        -> Result<(), AdapterError>;

    fn is_popup_visible(&self, popup: &Self::Handle) -> bool;

    /// Scroll the popup so the option at `index` is in view.
    fn scroll_popup_to(
        &mut self,
        popup: &Self::Handle,
        option: &Self::Handle,
        index: usize,
    ) -> Result<(), AdapterError>;

    fn set_trigger_text(&mut self, trigger: &Self::Handle, text: &str) -> Result<(), AdapterError>;

    fn highlight_option(&mut self, option: &Self::Handle, on: bool) -> Result<(), AdapterError>;

    /// Mark an option as under the pointer.
    fn hover_option(&mut self, _option: &Self::Handle, _on: bool) -> Result<(), AdapterError> {
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Native control
    // -------------------------------------------------------------------------

    fn set_native_value(&mut self, native: &Self::Handle, value: &str) -> Result<(), AdapterError>;

    /// Raise the host `change` notification on the native control.
    fn notify_change(&mut self, native: &Self::Handle) -> Result<(), AdapterError>;

    fn focus_native(&mut self, native: &Self::Handle) -> Result<(), AdapterError>;

    // -------------------------------------------------------------------------
    // Page
    // -------------------------------------------------------------------------

    /// Clear any host text selection. Best effort.
    fn clear_text_selection(&mut self) -> Result<(), AdapterError> {
        Err(AdapterError::Unsupported("clearing text selection"))
    }

    /// True if `node` is `ancestor` or nested inside it.
    fn contains(&self, ancestor: &Self::Handle, node: &Self::Handle) -> bool;
}
