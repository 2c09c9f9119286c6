//! User profile, onboarding form and client-side profile storage

use super::relay::RelayClient;
use super::WidgetError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Contact details captured once per client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl UserProfile {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Persistent storage for the profile
pub trait ProfileStore: Send + Sync {
    fn load(&self) -> Result<Option<UserProfile>, WidgetError>;

    fn save(&self, profile: &UserProfile) -> Result<(), WidgetError>;
}

/// Profile kept as a JSON file
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Option<UserProfile>, WidgetError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(WidgetError::Storage(e.to_string())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| WidgetError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, profile: &UserProfile) -> Result<(), WidgetError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WidgetError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| WidgetError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| WidgetError::Storage(e.to_string()))
    }
}

/// In-memory store for tests and embedders without persistence
#[derive(Default)]
pub struct MemoryProfileStore {
    profile: Mutex<Option<UserProfile>>,
}

impl MemoryProfileStore {
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<UserProfile>, WidgetError> {
        Ok(self
            .profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, profile: &UserProfile) -> Result<(), WidgetError> {
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        Ok(())
    }
}

/// What the widget shows at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// Show the onboarding form; chat stays blocked
    Onboarding,
    /// Go straight to chat
    Resume(UserProfile),
}

impl Startup {
    pub fn decide(store: &dyn ProfileStore) -> Self {
        match store.load() {
            Ok(Some(profile)) if profile.is_complete() => Self::Resume(profile),
            Ok(_) => Self::Onboarding,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored profile");
                Self::Onboarding
            }
        }
    }
}

/// The onboarding form as submitted
#[derive(Debug, Clone, Default)]
pub struct OnboardingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl OnboardingForm {
    /// Validate, persist locally, then notify the relay. The relay call is
    /// best-effort and never blocks onboarding.
    pub async fn submit(
        self,
        store: &dyn ProfileStore,
        relay: &dyn RelayClient,
    ) -> Result<UserProfile, WidgetError> {
        let profile = UserProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        if !profile.is_complete() {
            return Err(WidgetError::IncompleteProfile);
        }

        store.save(&profile)?;

        if let Err(e) = relay.save_user(&profile).await {
            tracing::warn!(error = %e, "Could not connect to backend to save user");
        }

        Ok(profile)
    }
}
