//! Widget error types

use thiserror::Error;

/// Failures inside the chat widget. None of these propagate past the
/// widget: every one ends as a user-visible chat line or prompt.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Onboarding form submitted with an empty field
    #[error("Please fill in all fields.")]
    IncompleteProfile,

    /// Relay could not be reached or the connection dropped
    #[error("relay unreachable: {0}")]
    Transport(String),

    /// Relay answered with something that is not a chat response
    #[error("unexpected relay response: {0}")]
    Decode(String),

    /// Capability missing in the running environment
    #[error("{0}")]
    Unsupported(&'static str),

    /// Client-side profile storage failed
    #[error("profile storage failed: {0}")]
    Storage(String),
}
