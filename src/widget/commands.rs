//! Navigation command matching
//!
//! An ordered rule list evaluated first-match-wins against the case-folded
//! utterance. Built-in sections come first and carry a spoken brief; keyword
//! groups follow and announce themselves with a short confirmation.

use serde::Serialize;

/// A single navigation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationRule {
    /// Built-in page section, described aloud after scrolling
    Section {
        keyword: String,
        anchor: String,
        brief: String,
    },
    /// Any of the keywords selects the anchor
    KeywordGroup { keywords: Vec<String>, anchor: String },
}

impl NavigationRule {
    pub fn section(keyword: &str, anchor: &str, brief: &str) -> Self {
        Self::Section {
            keyword: keyword.to_string(),
            anchor: anchor.to_string(),
            brief: brief.to_string(),
        }
    }

    pub fn keyword_group(keywords: &[&str], anchor: &str) -> Self {
        Self::KeywordGroup {
            keywords: keywords.iter().map(ToString::to_string).collect(),
            anchor: anchor.to_string(),
        }
    }

    pub fn anchor(&self) -> &str {
        match self {
            Self::Section { anchor, .. } | Self::KeywordGroup { anchor, .. } => anchor,
        }
    }

    /// `folded` must already be lowercase
    fn matches(&self, folded: &str) -> bool {
        match self {
            Self::Section { keyword, .. } => folded.contains(keyword.as_str()),
            Self::KeywordGroup { keywords, .. } => {
                keywords.iter().any(|k| folded.contains(k.as_str()))
            }
        }
    }

    fn intent(&self) -> NavigationIntent {
        match self {
            Self::Section { anchor, brief, .. } => NavigationIntent {
                anchor: anchor.clone(),
                announcement: Announcement::Brief(brief.clone()),
            },
            Self::KeywordGroup { anchor, .. } => NavigationIntent::confirm(anchor),
        }
    }
}

/// What to tell the user once the page has moved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Spoken after the scroll animation settles
    Brief(String),
    /// Spoken immediately
    Confirm(String),
}

/// A resolved decision to scroll to an anchor instead of querying the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub anchor: String,
    pub announcement: Announcement,
}

impl NavigationIntent {
    fn confirm(anchor: &str) -> Self {
        Self {
            anchor: anchor.to_string(),
            announcement: Announcement::Confirm(format!("Navigating to {anchor} section.")),
        }
    }
}

/// Static, ordered navigation rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandTable {
    rules: Vec<NavigationRule>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(vec![
            NavigationRule::section(
                "home",
                "home",
                "You are on the Home page, where we introduce our AI innovations.",
            ),
            NavigationRule::section(
                "about",
                "about",
                "You are on the About page. Here we explain our mission and values.",
            ),
            NavigationRule::section(
                "service",
                "services",
                "You are on the Services page, showcasing our AI and automation tools.",
            ),
            NavigationRule::section(
                "contact",
                "contact",
                "You are on the Contact page. You can reach us or send your inquiries here.",
            ),
            NavigationRule::keyword_group(&["course", "training"], "courses"),
            NavigationRule::keyword_group(&["career", "job"], "careers"),
            NavigationRule::keyword_group(&["client", "portal"], "client-portal"),
        ])
    }
}

impl CommandTable {
    pub fn new(rules: Vec<NavigationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[NavigationRule] {
        &self.rules
    }

    /// Resolve an utterance to a navigation intent. First matching rule wins.
    pub fn resolve(&self, text: &str) -> Option<NavigationIntent> {
        let folded = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&folded))
            .map(NavigationRule::intent)
    }

    /// Intent for an anchor named elsewhere (e.g. a model directive)
    pub fn intent_for_anchor(&self, anchor: &str) -> NavigationIntent {
        let anchor = anchor.trim_start_matches('#');
        self.rules
            .iter()
            .find(|rule| rule.anchor() == anchor)
            .map_or_else(|| NavigationIntent::confirm(anchor), NavigationRule::intent)
    }
}
