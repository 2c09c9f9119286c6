//! Section navigation: scroll to an anchor and tell the user where they are

use super::commands::{Announcement, NavigationIntent};
use super::session::Session;
use super::surface::{PageSurface, Speaker};
use crate::directive::ScrollDirection;
use std::sync::Arc;
use std::time::Duration;

/// Time for the scroll animation to finish before the brief is spoken
pub const DEFAULT_BRIEF_DELAY: Duration = Duration::from_millis(800);

const SECTION_NOT_FOUND: &str = "Sorry, I couldn't find that section.";

pub struct SectionNavigator {
    session: Arc<Session>,
    page: Arc<dyn PageSurface>,
    speaker: Arc<dyn Speaker>,
    brief_delay: Duration,
}

impl SectionNavigator {
    pub fn new(session: Arc<Session>, page: Arc<dyn PageSurface>, speaker: Arc<dyn Speaker>) -> Self {
        Self {
            session,
            page,
            speaker,
            brief_delay: DEFAULT_BRIEF_DELAY,
        }
    }

    #[must_use]
    pub fn with_brief_delay(mut self, delay: Duration) -> Self {
        self.brief_delay = delay;
        self
    }

    /// Best effort: a missing anchor ends in an apology, never an error.
    pub async fn navigate(&self, intent: &NavigationIntent) {
        if !self.page.has_anchor(&intent.anchor) {
            tracing::info!(anchor = %intent.anchor, "Navigation target not on page");
            self.session.bot_says(self.speaker.as_ref(), SECTION_NOT_FOUND);
            return;
        }

        self.page.scroll_into_view(&intent.anchor);
        tracing::debug!(anchor = %intent.anchor, "Scrolled to section");

        match &intent.announcement {
            Announcement::Brief(brief) => {
                tokio::time::sleep(self.brief_delay).await;
                self.session.bot_says(self.speaker.as_ref(), brief);
            }
            Announcement::Confirm(text) => {
                self.session.bot_says(self.speaker.as_ref(), text);
            }
        }
    }

    pub fn scroll(&self, direction: ScrollDirection) {
        self.page.scroll_by(direction);
    }
}
