//! Message dispatch: the single entry point for every user utterance
//!
//! Typed and transcribed text both land in [`MessageDispatcher::handle`].
//! Navigation commands are resolved locally; everything else makes exactly
//! one relay round-trip. One utterance is processed at a time.

use super::commands::CommandTable;
use super::navigator::SectionNavigator;
use super::relay::RelayClient;
use super::session::{Sender, Session};
use super::surface::{PageSurface, Recognizer, Speaker};
use crate::api::ChatRequest;
use crate::directive::PageDirective;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const EMPTY_REPLY: &str = "Sorry, I couldn’t understand that.";
const CONNECTION_ERROR: &str = "⚠️ Error connecting to the server.";
const VOICE_UNSUPPORTED: &str = "Speech recognition not supported in this environment.";

/// How an utterance was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Empty or whitespace-only input
    Ignored,
    /// Another utterance is still being processed
    Busy,
    /// Resolved locally to a page anchor
    Navigated { anchor: String },
    /// The relay answered with text
    Replied,
    /// The relay answered with a page directive
    Directed(PageDirective),
    /// The relay could not be reached
    Failed,
    /// Voice input is not available
    Unsupported,
}

pub struct MessageDispatcher {
    session: Arc<Session>,
    commands: Arc<CommandTable>,
    navigator: SectionNavigator,
    relay: Arc<dyn RelayClient>,
    speaker: Arc<dyn Speaker>,
    in_flight: Mutex<()>,
    voice_enabled: AtomicBool,
}

impl MessageDispatcher {
    pub fn new(
        session: Arc<Session>,
        commands: Arc<CommandTable>,
        page: Arc<dyn PageSurface>,
        speaker: Arc<dyn Speaker>,
        relay: Arc<dyn RelayClient>,
    ) -> Self {
        let navigator = SectionNavigator::new(session.clone(), page, speaker.clone());
        Self {
            session,
            commands,
            navigator,
            relay,
            speaker,
            in_flight: Mutex::new(()),
            voice_enabled: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn with_brief_delay(mut self, delay: Duration) -> Self {
        self.navigator = self.navigator.with_brief_delay(delay);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Welcome the user into the chat
    pub fn greet(&self) {
        let name = &self.session.profile().name;
        self.session.post(
            Sender::Bot,
            format!("👋 Hello {name}! I'm Eva, your AI assistant. How can I help you today?"),
        );
        self.speaker
            .speak(&format!("Hello {name}, I'm Eva, your assistant. How can I help you today?"));
    }

    /// Handle one utterance
    pub async fn handle(&self, text: &str) -> DispatchOutcome {
        let text = text.trim();
        if text.is_empty() {
            return DispatchOutcome::Ignored;
        }

        // Held only across the relay round-trip
        let Ok(guard) = self.in_flight.try_lock() else {
            tracing::debug!(session = %self.session.id(), "Dropping utterance while a reply is pending");
            return DispatchOutcome::Busy;
        };

        self.session.post(Sender::User, text);

        if let Some(intent) = self.commands.resolve(text) {
            drop(guard);
            self.navigator.navigate(&intent).await;
            return DispatchOutcome::Navigated {
                anchor: intent.anchor,
            };
        }

        self.session.post_placeholder();
        let request = ChatRequest::new(text, self.session.profile().name.clone());
        let result = self.relay.chat(&request).await;
        self.session.retract_placeholder();
        drop(guard);

        match result {
            Ok(response) => {
                if let Some(directive) = response.directive {
                    self.execute(&directive).await;
                    return DispatchOutcome::Directed(directive);
                }
                let reply = if response.reply.trim().is_empty() {
                    EMPTY_REPLY
                } else {
                    response.reply.as_str()
                };
                self.session.bot_says(self.speaker.as_ref(), reply);
                DispatchOutcome::Replied
            }
            Err(e) => {
                tracing::warn!(session = %self.session.id(), error = %e, "Chat request failed");
                self.session.post(Sender::Bot, CONNECTION_ERROR);
                DispatchOutcome::Failed
            }
        }
    }

    /// Capture one spoken utterance and handle it
    pub async fn listen(&self, recognizer: &dyn Recognizer) -> DispatchOutcome {
        if !self.voice_enabled.load(Ordering::Relaxed) {
            return DispatchOutcome::Unsupported;
        }
        if !recognizer.is_available() {
            self.voice_enabled.store(false, Ordering::Relaxed);
            self.session.post(Sender::Bot, VOICE_UNSUPPORTED);
            return DispatchOutcome::Unsupported;
        }

        match recognizer.transcribe().await {
            Ok(transcript) => self.handle(&transcript).await,
            Err(e) => {
                tracing::error!(error = %e, "Speech recognition error");
                DispatchOutcome::Ignored
            }
        }
    }

    async fn execute(&self, directive: &PageDirective) {
        match directive {
            PageDirective::Navigate { target } => {
                let intent = self.commands.intent_for_anchor(target);
                self.navigator.navigate(&intent).await;
            }
            PageDirective::Scroll { direction } => {
                self.navigator.scroll(*direction);
                self.session
                    .bot_says(self.speaker.as_ref(), &directive.describe());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatResponse;
    use crate::directive::ScrollDirection;
    use crate::widget::session::THINKING_PLACEHOLDER;
    use crate::widget::testing::{
        complete_profile, MockPage, MockRecognizer, MockRelay, RecordingSpeaker, RecordingView,
        ViewEvent,
    };
    use crate::widget::DEFAULT_PAGE_SECTIONS;

    struct Harness {
        dispatcher: Arc<MessageDispatcher>,
        relay: Arc<MockRelay>,
        page: Arc<MockPage>,
        speaker: Arc<RecordingSpeaker>,
        view: Arc<RecordingView>,
    }

    fn harness() -> Harness {
        harness_with_brief_delay(Duration::ZERO)
    }

    fn harness_with_brief_delay(delay: Duration) -> Harness {
        let view = Arc::new(RecordingView::default());
        let session = Arc::new(Session::start(complete_profile(), view.clone()).unwrap());
        let page = Arc::new(MockPage::with_anchors(DEFAULT_PAGE_SECTIONS));
        let speaker = Arc::new(RecordingSpeaker::default());
        let relay = MockRelay::new();
        let dispatcher = MessageDispatcher::new(
            session,
            Arc::new(CommandTable::default()),
            page.clone(),
            speaker.clone(),
            relay.clone(),
        )
        .with_brief_delay(delay);
        Harness {
            dispatcher: Arc::new(dispatcher),
            relay,
            page,
            speaker,
            view,
        }
    }

    fn texts(h: &Harness) -> Vec<String> {
        h.dispatcher
            .session()
            .messages()
            .into_iter()
            .map(|m| m.text)
            .collect()
    }

    #[tokio::test]
    async fn test_whitespace_is_ignored() {
        let h = harness();
        for input in ["", "   ", "\n\t "] {
            assert_eq!(h.dispatcher.handle(input).await, DispatchOutcome::Ignored);
        }
        assert!(h.dispatcher.session().messages().is_empty());
        assert_eq!(h.relay.chat_calls(), 0);
    }

    #[tokio::test]
    async fn test_navigation_command_stays_local() {
        let h = harness();
        let outcome = h.dispatcher.handle("Go to the Careers section").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Navigated {
                anchor: "careers".to_string()
            }
        );
        assert_eq!(h.relay.chat_calls(), 0);
        assert_eq!(h.page.scrolled_to(), vec!["careers".to_string()]);
        assert_eq!(
            texts(&h),
            vec!["Go to the Careers section", "Navigating to careers section."]
        );
    }

    #[tokio::test]
    async fn test_general_query_relays_once() {
        let h = harness();
        h.relay.queue_reply(ChatResponse::reply("We are open 9 to 5."));

        let outcome = h.dispatcher.handle("  what are your hours? ").await;

        assert_eq!(outcome, DispatchOutcome::Replied);
        let requests = h.relay.chat_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "what are your hours?");
        assert_eq!(requests[0].name.as_deref(), Some("Ana"));
        assert_eq!(texts(&h), vec!["what are your hours?", "We are open 9 to 5."]);
        assert_eq!(h.speaker.spoken(), vec!["We are open 9 to 5.".to_string()]);

        // Placeholder shown then replaced
        let events = h.view.events();
        assert!(events.contains(&ViewEvent::Appended(Sender::Bot, THINKING_PLACEHOLDER.to_string())));
        assert!(events.contains(&ViewEvent::Retracted(THINKING_PLACEHOLDER.to_string())));
    }

    #[tokio::test]
    async fn test_empty_reply_gets_fallback() {
        let h = harness();
        h.relay.queue_reply(ChatResponse::reply("  "));

        assert_eq!(h.dispatcher.handle("hello?").await, DispatchOutcome::Replied);
        assert_eq!(texts(&h)[1], EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_relay_failure_shows_apology() {
        let h = harness();
        // Nothing queued: the mock fails with a transport error

        assert_eq!(h.dispatcher.handle("hello?").await, DispatchOutcome::Failed);
        assert_eq!(texts(&h), vec!["hello?", CONNECTION_ERROR]);
        assert!(h.speaker.spoken().is_empty());
        assert_eq!(h.relay.chat_calls(), 1);
    }

    #[tokio::test]
    async fn test_server_error_reply_is_displayed() {
        let h = harness();
        h.relay.queue_reply(ChatResponse {
            reply: "⚠️ LM Studio connection failed.".to_string(),
            details: Some("boom".to_string()),
            directive: None,
        });

        assert_eq!(h.dispatcher.handle("hello?").await, DispatchOutcome::Replied);
        assert_eq!(texts(&h)[1], "⚠️ LM Studio connection failed.");
    }

    #[tokio::test]
    async fn test_navigate_directive_is_executed() {
        let h = harness();
        let directive = PageDirective::Navigate {
            target: "#client-portal".to_string(),
        };
        h.relay.queue_reply(ChatResponse {
            reply: directive.describe(),
            details: None,
            directive: Some(directive.clone()),
        });

        let outcome = h.dispatcher.handle("where do I log in?").await;

        assert_eq!(outcome, DispatchOutcome::Directed(directive));
        assert_eq!(h.page.scrolled_to(), vec!["client-portal".to_string()]);
        assert_eq!(
            texts(&h),
            vec!["where do I log in?", "Navigating to client-portal section."]
        );
    }

    #[tokio::test]
    async fn test_scroll_directive_is_executed() {
        let h = harness();
        let directive = PageDirective::Scroll {
            direction: ScrollDirection::Down,
        };
        h.relay.queue_reply(ChatResponse {
            reply: directive.describe(),
            details: None,
            directive: Some(directive),
        });

        h.dispatcher.handle("scroll down a bit").await;

        assert_eq!(h.page.scrolls(), vec![ScrollDirection::Down]);
        assert_eq!(texts(&h)[1], "Scrolling down.");
    }

    #[tokio::test]
    async fn test_single_flight_rejects_concurrent_utterance() {
        let h = harness();
        h.relay.hold_replies();
        h.relay.queue_reply(ChatResponse::reply("First answer"));

        let first = {
            let dispatcher = h.dispatcher.clone();
            tokio::spawn(async move { dispatcher.handle("first question").await })
        };
        while h.relay.chat_calls() == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(h.dispatcher.handle("second question").await, DispatchOutcome::Busy);
        assert_eq!(h.relay.chat_calls(), 1);

        h.relay.release();
        assert_eq!(first.await.unwrap(), DispatchOutcome::Replied);
        assert_eq!(
            texts(&h),
            vec!["first question", "First answer"]
        );

        // Free again afterwards
        h.relay.queue_reply(ChatResponse::reply("Second answer"));
        h.relay.release();
        assert_eq!(h.dispatcher.handle("second question").await, DispatchOutcome::Replied);
    }

    #[tokio::test]
    async fn test_pending_brief_does_not_block_next_utterance() {
        let h = harness_with_brief_delay(Duration::from_secs(30));
        h.relay.queue_reply(ChatResponse::reply("We are open 9 to 5."));

        let navigating = {
            let dispatcher = h.dispatcher.clone();
            tokio::spawn(async move { dispatcher.handle("tell me about the team").await })
        };
        while h.page.scrolled_to().is_empty() {
            tokio::task::yield_now().await;
        }

        assert_eq!(h.dispatcher.handle("what are your hours?").await, DispatchOutcome::Replied);
        assert_eq!(h.relay.chat_calls(), 1);
        assert_eq!(
            texts(&h),
            vec!["tell me about the team", "what are your hours?", "We are open 9 to 5."]
        );
        navigating.abort();
    }

    #[tokio::test]
    async fn test_voice_input_goes_through_handle() {
        let h = harness();
        let recognizer = MockRecognizer::saying("tell me about the team");

        let outcome = h.dispatcher.listen(&recognizer).await;

        assert_eq!(
            outcome,
            DispatchOutcome::Navigated {
                anchor: "about".to_string()
            }
        );
        assert_eq!(texts(&h)[0], "tell me about the team");
    }

    #[tokio::test]
    async fn test_voice_unsupported_alerts_once_and_disables() {
        let h = harness();
        let recognizer = MockRecognizer::unavailable();

        assert_eq!(h.dispatcher.listen(&recognizer).await, DispatchOutcome::Unsupported);
        assert_eq!(h.dispatcher.listen(&recognizer).await, DispatchOutcome::Unsupported);
        assert_eq!(texts(&h), vec![VOICE_UNSUPPORTED]);
    }

    #[tokio::test]
    async fn test_greeting_uses_profile_name() {
        let h = harness();
        h.dispatcher.greet();
        assert_eq!(
            texts(&h),
            vec!["👋 Hello Ana! I'm Eva, your AI assistant. How can I help you today?"]
        );
        assert_eq!(
            h.speaker.spoken(),
            vec!["Hello Ana, I'm Eva, your assistant. How can I help you today?".to_string()]
        );
    }
}
