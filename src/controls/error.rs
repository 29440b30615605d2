//! Control error types

use thiserror::Error;

/// Errors surfaced by controls
///
/// Touches disappearing without an Ended phase are not errors; controls
/// treat absence as a normal release.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The queried axis name is empty, unset, or matches neither configured
    /// axis. Fatal to the query, not to the control.
    #[error("input axis {axis:?} is not set up")]
    AxisNotConfigured { axis: String },

    /// A required visual sub-part was never attached. Fatal at enable time;
    /// the control refuses to function without it.
    #[error("control {control:?} is missing its {part:?} visual")]
    AssetMissing { control: String, part: String },

    /// A per-variant option is outside its valid range
    #[error("control {control:?}: {message}")]
    InvalidOption { control: String, message: String },
}
