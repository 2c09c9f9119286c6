//! Session context: the profile, the session id and the transcript
//!
//! Built once at startup from a complete profile and passed explicitly to
//! the dispatcher and navigator.

use super::profile::UserProfile;
use super::surface::{ChatView, Speaker};
use super::WidgetError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Text shown while the relay call is pending
pub const THINKING_PLACEHOLDER: &str = "⏳ Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            at: Utc::now(),
        }
    }

    fn is_placeholder(&self) -> bool {
        self.sender == Sender::Bot && self.text == THINKING_PLACEHOLDER
    }
}

pub struct Session {
    id: Uuid,
    profile: UserProfile,
    transcript: Mutex<Vec<ChatMessage>>,
    view: Arc<dyn ChatView>,
}

impl Session {
    /// Open a chat session. Fails unless onboarding is complete.
    pub fn start(profile: UserProfile, view: Arc<dyn ChatView>) -> Result<Self, WidgetError> {
        if !profile.is_complete() {
            return Err(WidgetError::IncompleteProfile);
        }
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, name = %profile.name, "Chat session started");
        Ok(Self {
            id,
            profile,
            transcript: Mutex::new(Vec::new()),
            view,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a message and render it
    pub fn post(&self, sender: Sender, text: impl Into<String>) {
        let message = ChatMessage::new(sender, text);
        self.lock().push(message.clone());
        self.view.appended(&message);
    }

    /// Append a bot message and speak it
    pub fn bot_says(&self, speaker: &dyn Speaker, text: &str) {
        self.post(Sender::Bot, text);
        speaker.speak(text);
    }

    pub fn post_placeholder(&self) {
        self.post(Sender::Bot, THINKING_PLACEHOLDER);
    }

    /// Remove the trailing placeholder, if it is still the last message
    pub fn retract_placeholder(&self) -> bool {
        let removed = {
            let mut transcript = self.lock();
            if transcript.last().is_some_and(ChatMessage::is_placeholder) {
                transcript.pop()
            } else {
                None
            }
        };
        match removed {
            Some(message) => {
                self.view.retracted(&message);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the transcript
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }
}
