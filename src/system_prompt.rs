//! System prompt construction for the relay
//!
//! The prompt gives the model its identity, a short rule set, and the page
//! directive contract the client knows how to execute.

use std::fmt::Write;

/// Name used when the caller did not send one
pub const DEFAULT_USER_NAME: &str = "User";

const NO_PAGE_CONTEXT: &str = "No extra content provided.";

/// Base system prompt establishing the assistant's role
const BASE_PROMPT: &str = r##"You are Eva, a friendly AI assistant for the "HTI" website.
You help users with information, navigation, and questions.
Keep answers short and conversational; they are read aloud.

If the user asks to navigate to a specific section
(Home, About, Services, Courses, Careers, Client Portal, Contact),
respond only with JSON in this exact format:
{"action":"navigate","target":"#section-id"}

Examples:
- "Go to the Careers section" -> {"action":"navigate","target":"#careers"}
- "Scroll down" -> {"action":"scroll","direction":"down"}
- "Scroll up" -> {"action":"scroll","direction":"up"}

For all other queries, respond naturally as Eva."##;

/// Build the system prompt for one request
pub fn build_system_prompt(user_name: &str, page_content: &str) -> String {
    let name = match user_name.trim() {
        "" => DEFAULT_USER_NAME,
        name => name,
    };
    let page = match page_content.trim() {
        "" => NO_PAGE_CONTEXT,
        page => page,
    };

    let mut prompt = String::from(BASE_PROMPT);
    let _ = write!(prompt, "\n\nThe user's name is {name}.\nCurrent page context: {page}");
    prompt
}
