//! Eva - website chat assistant
//!
//! A relay server that forwards chat to a local completion API, and the
//! widget core that decides between page navigation and a relay round-trip.

pub mod api;
pub mod config;
pub mod directive;
pub mod llm;
pub mod system_prompt;
pub mod widget;
