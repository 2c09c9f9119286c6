//! Property-based tests for command matching and dispatch
//!
//! - Any utterance with "about" (and no earlier built-in keyword) resolves to #about
//! - Matching ignores ASCII case
//! - Whitespace-only input never reaches the transcript or the relay
//! - Utterances matching no rule always go to the relay exactly once

use super::commands::CommandTable;
use super::dispatcher::{DispatchOutcome, MessageDispatcher};
use super::session::Session;
use super::testing::{complete_profile, MockPage, MockRelay, RecordingSpeaker, RecordingView};
use super::DEFAULT_PAGE_SECTIONS;
use crate::api::ChatResponse;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const ALL_KEYWORDS: &[&str] = &[
    "home", "about", "service", "contact", "course", "training", "career", "job", "client",
    "portal",
];

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn dispatcher(relay: Arc<MockRelay>) -> MessageDispatcher {
    let session = Arc::new(Session::start(complete_profile(), Arc::new(RecordingView::default())).unwrap());
    MessageDispatcher::new(
        session,
        Arc::new(CommandTable::default()),
        Arc::new(MockPage::with_anchors(DEFAULT_PAGE_SECTIONS)),
        Arc::new(RecordingSpeaker::default()),
        relay,
    )
    .with_brief_delay(Duration::ZERO)
}

fn mixed_case_about() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), 5).prop_map(|upper| {
        "about"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_about_resolves_to_about(
        prefix in "[a-zA-Z ,.?!]{0,30}",
        suffix in "[a-zA-Z ,.?!]{0,30}",
        about in mixed_case_about(),
    ) {
        let text = format!("{prefix}{about}{suffix}");
        prop_assume!(!text.to_lowercase().contains("home"));

        let intent = CommandTable::default().resolve(&text);
        prop_assert_eq!(intent.map(|i| i.anchor), Some("about".to_string()));
    }

    #[test]
    fn prop_matching_ignores_ascii_case(text in "[a-zA-Z ]{0,40}") {
        let table = CommandTable::default();
        prop_assert_eq!(
            table.resolve(&text.to_ascii_uppercase()),
            table.resolve(&text.to_ascii_lowercase())
        );
    }

    #[test]
    fn prop_whitespace_is_a_no_op(text in "[ \t\r\n]{0,20}") {
        let relay = MockRelay::new();
        let d = dispatcher(relay.clone());

        let outcome = runtime().block_on(d.handle(&text));

        prop_assert_eq!(outcome, DispatchOutcome::Ignored);
        prop_assert!(d.session().messages().is_empty());
        prop_assert_eq!(relay.chat_calls(), 0);
    }

    #[test]
    fn prop_unmatched_text_relays_once(text in "[a-zA-Z0-9 ?]{1,40}") {
        let folded = text.to_lowercase();
        prop_assume!(!text.trim().is_empty());
        prop_assume!(!ALL_KEYWORDS.iter().any(|k| folded.contains(k)));

        let relay = MockRelay::new();
        relay.queue_reply(ChatResponse::reply("ok"));
        let d = dispatcher(relay.clone());

        let outcome = runtime().block_on(d.handle(&text));

        prop_assert_eq!(outcome, DispatchOutcome::Replied);
        prop_assert_eq!(relay.chat_calls(), 1);
        prop_assert_eq!(d.session().messages().len(), 2);
    }
}
