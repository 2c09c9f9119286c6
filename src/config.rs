//! Environment configuration for the relay server and the terminal client

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LLM_URL: &str = "http://localhost:1234/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3-8b-instruct";
const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
const COMPLETIONS_PATH: &str = "/chat/completions";

/// Configuration for the upstream completion API
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Either the full `chat/completions` endpoint or the API base (e.g. `http://host:1234/v1`)
    pub base_url: String,
    pub model: String,
    /// Optional bearer token; LM Studio ignores it
    pub api_key: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: 0.7,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("LMSTUDIO_URL").unwrap_or(defaults.base_url),
            model: std::env::var("MODEL_NAME").unwrap_or(defaults.model),
            api_key: std::env::var("LMSTUDIO_API_KEY").ok(),
            temperature: defaults.temperature,
        }
    }

    /// Resolve the URL requests are posted to
    pub fn endpoint_url(&self) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.ends_with(COMPLETIONS_PATH) {
            trimmed.to_string()
        } else {
            format!("{trimmed}{COMPLETIONS_PATH}")
        }
    }
}

/// Relay server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            llm: LlmConfig::from_env(),
        }
    }
}

/// Terminal client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub profile_path: PathBuf,
    /// Anchors present on the page the client drives
    pub page_sections: Vec<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let server_url =
            std::env::var("EVA_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        let profile_path = std::env::var("EVA_PROFILE_PATH").map_or_else(
            |_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".eva").join("profile.json")
            },
            PathBuf::from,
        );

        let page_sections = std::env::var("EVA_PAGE_SECTIONS").map_or_else(
            |_| {
                crate::widget::DEFAULT_PAGE_SECTIONS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            },
            |raw| parse_sections(&raw),
        );

        Self {
            server_url,
            profile_path,
            page_sections,
        }
    }
}

fn parse_sections(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('#'))
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
