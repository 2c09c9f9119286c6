//! Capabilities the widget drives but does not own
//!
//! A browser binds these to the DOM and the Web Speech API; the terminal
//! client binds them to stdout. Tests use the recorders in `testing`.

use super::session::ChatMessage;
use super::WidgetError;
use crate::directive::ScrollDirection;
use async_trait::async_trait;

/// Renders the chat transcript
pub trait ChatView: Send + Sync {
    /// A message was appended to the transcript
    fn appended(&self, message: &ChatMessage);

    /// The trailing message was taken back (the "working" placeholder)
    fn retracted(&self, message: &ChatMessage);
}

/// The page hosting the widget
pub trait PageSurface: Send + Sync {
    fn has_anchor(&self, anchor: &str) -> bool;

    /// Smooth-scroll the anchor into view
    fn scroll_into_view(&self, anchor: &str);

    fn scroll_by(&self, direction: ScrollDirection);
}

/// Text-to-speech
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str);
}

/// Speech-to-text
#[async_trait]
pub trait Recognizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Capture one utterance and return its transcript
    async fn transcribe(&self) -> Result<String, WidgetError>;
}

/// Recognizer for environments with no speech input
pub struct NoRecognizer;

#[async_trait]
impl Recognizer for NoRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn transcribe(&self) -> Result<String, WidgetError> {
        Err(WidgetError::Unsupported("speech recognition is not available"))
    }
}
