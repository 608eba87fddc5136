//! Configuration for the fraction tutor.
//!
//! Configuration is read from `tutor.json` next to the binary's working
//! directory. Every field has a sensible default, so a missing file simply
//! yields the default configuration; a present-but-invalid file is an error.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyTier;
use crate::error::{Result, TutorError};

/// The default config file name.
const CONFIG_FILE_NAME: &str = "tutor.json";

/// Default delay between positive feedback and the step advance.
const fn default_feedback_delay_ms() -> u64 {
    900
}

/// Default timeout before an external content provider is abandoned in
/// favor of the local catalog.
const fn default_provider_timeout_secs() -> u64 {
    8
}

/// Default base URL for generated share links.
fn default_share_base_url() -> String {
    "https://fractionfriends.app/".to_string()
}

/// Default value for boolean options that default to true.
const fn default_true() -> bool {
    true
}

/// Main configuration for the tutor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorConfig {
    /// Tier used for the first generated exercise of a session.
    #[serde(default)]
    pub start_tier: DifficultyTier,

    /// Milliseconds to let positive feedback render before the guided
    /// session advances to its next step.
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,

    /// Whether numerator input in the addition exercise is clamped to the
    /// remaining capacity (`true`) or rejected outright (`false`).
    #[serde(default = "default_true")]
    pub clamp_addition_input: bool,

    /// Seconds to wait on an external content provider before substituting
    /// the local catalog.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Base URL that share links are built on.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            start_tier: DifficultyTier::default(),
            feedback_delay_ms: default_feedback_delay_ms(),
            clamp_addition_input: default_true(),
            provider_timeout_secs: default_provider_timeout_secs(),
            share_base_url: default_share_base_url(),
        }
    }
}

impl TutorConfig {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `tutor.json`; if the file is absent, returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON or
    /// invalid values.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            TutorError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from a specific directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `tutor.json` exists there but is invalid.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::ConfigParseError` for unreadable or invalid
    /// JSON and `TutorError::ConfigValidationError` for invalid values.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(TutorError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| TutorError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::ConfigValidationError` if any check fails.
    pub fn validate(&self) -> Result<()> {
        if self.feedback_delay_ms == 0 {
            return Err(TutorError::config_validation(
                "feedbackDelayMs must be greater than 0",
                "Set feedbackDelayMs to at least 1 in your tutor.json",
            ));
        }

        if self.provider_timeout_secs == 0 {
            return Err(TutorError::config_validation(
                "providerTimeoutSecs must be greater than 0",
                "Set providerTimeoutSecs to at least 1 in your tutor.json",
            ));
        }

        if self.share_base_url.trim().is_empty() {
            return Err(TutorError::config_validation(
                "shareBaseUrl must not be empty",
                "Provide a base URL for share links in your tutor.json",
            ));
        }

        Ok(())
    }

    /// The feedback delay as a [`Duration`].
    #[must_use]
    pub const fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    /// The provider timeout as a [`Duration`].
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
