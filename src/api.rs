//! HTTP API for the Eva relay

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::llm::LlmService;
use crate::widget::CommandTable;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmService>,
    pub temperature: f32,
    pub commands: Arc<CommandTable>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmService>, temperature: f32) -> Self {
        Self {
            llm,
            temperature,
            commands: Arc::new(CommandTable::default()),
        }
    }
}
