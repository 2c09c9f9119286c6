//! Chat widget core
//!
//! Everything the browser widget does between a user utterance and the page,
//! expressed against capability traits so it runs the same under the DOM,
//! the terminal client, or tests.

mod commands;
mod dispatcher;
mod error;
mod navigator;
mod profile;
mod relay;
mod session;
mod surface;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod testing;

pub use commands::{Announcement, CommandTable, NavigationIntent, NavigationRule};
pub use dispatcher::{DispatchOutcome, MessageDispatcher};
pub use error::WidgetError;
pub use navigator::{SectionNavigator, DEFAULT_BRIEF_DELAY};
pub use profile::{FileProfileStore, MemoryProfileStore, OnboardingForm, ProfileStore, Startup, UserProfile};
pub use relay::{HttpRelayClient, RelayClient};
pub use session::{ChatMessage, Sender, Session, THINKING_PLACEHOLDER};
pub use surface::{ChatView, NoRecognizer, PageSurface, Recognizer, Speaker};

/// Anchors on the stock landing page
pub const DEFAULT_PAGE_SECTIONS: &[&str] = &[
    "home",
    "about",
    "services",
    "contact",
    "courses",
    "careers",
    "client-portal",
];
