//! Page directives: structured navigation instructions the model may answer with
//!
//! The relay detects them in the model's reply and hands them to the client
//! as data instead of prose.

use serde::{Deserialize, Serialize};

/// Scroll direction for [`PageDirective::Scroll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// A page action requested by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PageDirective {
    Navigate { target: String },
    Scroll { direction: ScrollDirection },
}

impl PageDirective {
    /// Anchor id without the leading `#`
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::Navigate { target } => Some(target.trim_start_matches('#')),
            Self::Scroll { .. } => None,
        }
    }

    /// Human-readable confirmation sent alongside the directive
    pub fn describe(&self) -> String {
        match self {
            Self::Navigate { .. } => {
                format!("Navigating to {} section.", self.anchor().unwrap_or_default())
            }
            Self::Scroll { direction: ScrollDirection::Up } => "Scrolling up.".to_string(),
            Self::Scroll { direction: ScrollDirection::Down } => "Scrolling down.".to_string(),
        }
    }
}

/// Parse a model reply as a directive. Accepts bare JSON or JSON wrapped in a
/// Markdown code fence; anything else is ordinary prose.
pub fn parse_directive(reply: &str) -> Option<PageDirective> {
    let body = strip_code_fence(reply.trim());
    if !body.starts_with('{') {
        return None;
    }
    let directive: PageDirective = serde_json::from_str(body).ok()?;
    match &directive {
        PageDirective::Navigate { target } if target.trim_start_matches('#').is_empty() => None,
        _ => Some(directive),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
