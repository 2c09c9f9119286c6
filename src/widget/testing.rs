//! Mock implementations for testing
//!
//! Recorders for every capability the widget drives, plus a relay whose
//! replies can be queued and held back.

use super::profile::UserProfile;
use super::relay::RelayClient;
use super::session::{ChatMessage, Sender};
use super::surface::{ChatView, PageSurface, Recognizer, Speaker};
use super::WidgetError;
use crate::api::{ChatRequest, ChatResponse};
use crate::directive::ScrollDirection;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn complete_profile() -> UserProfile {
    UserProfile {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        phone: "555-0100".to_string(),
    }
}

// ============================================================================
// Chat view
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Appended(Sender, String),
    Retracted(String),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ChatView for RecordingView {
    fn appended(&self, message: &ChatMessage) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Appended(message.sender, message.text.clone()));
    }

    fn retracted(&self, message: &ChatMessage) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Retracted(message.text.clone()));
    }
}

// ============================================================================
// Speech
// ============================================================================

#[derive(Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

pub struct MockRecognizer {
    transcript: Option<String>,
}

impl MockRecognizer {
    pub fn saying(text: &str) -> Self {
        Self {
            transcript: Some(text.to_string()),
        }
    }

    pub fn unavailable() -> Self {
        Self { transcript: None }
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    fn is_available(&self) -> bool {
        self.transcript.is_some()
    }

    async fn transcribe(&self) -> Result<String, WidgetError> {
        self.transcript
            .clone()
            .ok_or(WidgetError::Unsupported("no recognizer"))
    }
}

// ============================================================================
// Page
// ============================================================================

pub struct MockPage {
    anchors: HashSet<String>,
    scrolled_to: Mutex<Vec<String>>,
    scrolls: Mutex<Vec<ScrollDirection>>,
}

impl MockPage {
    pub fn with_anchors(anchors: &[&str]) -> Self {
        Self {
            anchors: anchors.iter().map(ToString::to_string).collect(),
            scrolled_to: Mutex::new(Vec::new()),
            scrolls: Mutex::new(Vec::new()),
        }
    }

    pub fn scrolled_to(&self) -> Vec<String> {
        self.scrolled_to.lock().unwrap().clone()
    }

    pub fn scrolls(&self) -> Vec<ScrollDirection> {
        self.scrolls.lock().unwrap().clone()
    }
}

impl PageSurface for MockPage {
    fn has_anchor(&self, anchor: &str) -> bool {
        self.anchors.contains(anchor)
    }

    fn scroll_into_view(&self, anchor: &str) {
        self.scrolled_to.lock().unwrap().push(anchor.to_string());
    }

    fn scroll_by(&self, direction: ScrollDirection) {
        self.scrolls.lock().unwrap().push(direction);
    }
}

// ============================================================================
// Relay
// ============================================================================

/// Relay returning queued replies; with nothing queued it fails like an
/// unreachable server.
#[derive(Default)]
pub struct MockRelay {
    replies: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
    saved: Mutex<Vec<UserProfile>>,
    fail_save: AtomicBool,
    hold: AtomicBool,
    gate: Notify,
}

impl MockRelay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn queue_reply(&self, reply: ChatResponse) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Make every chat call wait for [`MockRelay::release`]
    pub fn hold_replies(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    /// Let one held chat call complete
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn fail_save_user(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    pub fn chat_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn saved_users(&self) -> Vec<UserProfile> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for MockRelay {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError> {
        self.requests.lock().unwrap().push(request.clone());
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.hold.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| WidgetError::Transport("connection refused".to_string()))
    }

    async fn save_user(&self, profile: &UserProfile) -> Result<(), WidgetError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(WidgetError::Transport("connection refused".to_string()));
        }
        self.saved.lock().unwrap().push(profile.clone());
        Ok(())
    }
}
