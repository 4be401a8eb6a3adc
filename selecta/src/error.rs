//! Error types.

use selecta_dom::DomError;
use thiserror::Error;

use crate::control::ControlId;

/// Failures reported by a rendering adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The host cannot perform this operation at all.
    #[error("{0} is not supported by this host")]
    Unsupported(&'static str),
}

/// Errors returned by [`DropdownManager`](crate::DropdownManager) operations.
///
/// None of these are fatal: each one means the operation was a no-op.
#[derive(Debug, Error)]
pub enum SelectaError {
    /// Initialisation found nothing to convert.
    #[error("no controls match selector '{selector}'")]
    NoMatchingControls { selector: String },

    #[error("unknown control {0}")]
    UnknownControl(ControlId),

    #[error("control {control} has no option at index {index}")]
    OptionOutOfRange { control: ControlId, index: usize },

    /// Disabled options cannot be selected.
    #[error("option {index} of control {control} is disabled")]
    OptionDisabled { control: ControlId, index: usize },

    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<DomError> for SelectaError {
    fn from(err: DomError) -> Self {
        Self::Adapter(AdapterError::Dom(err))
    }
}
