//! Runtime settings read from `.donkeyshot/config.yaml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Only an unreadable or malformed file is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    API_KEY_VARS, DEFAULT_SEARCH_MODEL, DEFAULT_STANDARD_MODEL, DEFAULT_THINKING_MODEL, GEMINI_API_BASE,
    REQUEST_TIMEOUT_SECS, REVEAL_INTERVAL_MS, SETTINGS_FILE, STORE_DIR, THINKING_BUDGET_TOKENS,
};
use crate::llm_types::ChatMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Model identifier per chat mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub standard: String,
    pub thinking: String,
    pub search: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            standard: DEFAULT_STANDARD_MODEL.to_string(),
            thinking: DEFAULT_THINKING_MODEL.to_string(),
            search: DEFAULT_SEARCH_MODEL.to_string(),
        }
    }
}

impl ModelSettings {
    pub fn for_mode(&self, mode: ChatMode) -> &str {
        match mode {
            ChatMode::Standard => &self.standard,
            ChatMode::Thinking => &self.thinking,
            ChatMode::Search => &self.search,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between two reveal timer firings
    pub reveal_interval_ms: u64,
    /// Mode selected at startup
    pub default_mode: ChatMode,
    pub api_base: String,
    pub request_timeout_secs: u64,
    /// Reasoning budget (tokens) for thinking mode
    pub thinking_budget: u32,
    pub models: ModelSettings,
    /// Environment variables searched for the API key, first non-empty wins
    pub api_key_vars: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_interval_ms: REVEAL_INTERVAL_MS,
            default_mode: ChatMode::default(),
            api_base: GEMINI_API_BASE.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            thinking_budget: THINKING_BUDGET_TOKENS,
            models: ModelSettings::default(),
            api_key_vars: API_KEY_VARS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_interval_ms == 0 {
            return Err(ConfigError::Invalid { field: "reveal_interval_ms", reason: "must be greater than zero" });
        }
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "api_base", reason: "must not be empty" });
        }
        if self.api_key_vars.is_empty() {
            return Err(ConfigError::Invalid { field: "api_key_vars", reason: "must name at least one variable" });
        }
        Ok(())
    }
}

/// Default location of the settings file, relative to the working directory.
pub fn settings_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(SETTINGS_FILE)
}

/// Load settings from `path`. A missing or empty file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
    };

    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    settings.validate()?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reveal_interval(), Duration::from_millis(20));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_settings("  \n");
        assert_eq!(load_settings(file.path()).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_settings("reveal_interval_ms: 5\nmodels:\n  thinking: my-model\n");
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.reveal_interval_ms, 5);
        assert_eq!(settings.models.thinking, "my-model");
        assert_eq!(settings.models.standard, DEFAULT_STANDARD_MODEL);
        assert_eq!(settings.thinking_budget, THINKING_BUDGET_TOKENS);
    }

    #[test]
    fn default_mode_reads_lowercase_name() {
        let file = write_settings("default_mode: search\n");
        assert_eq!(load_settings(file.path()).unwrap().default_mode, ChatMode::Search);

        let file = write_settings("default_mode: Search\n");
        assert!(matches!(load_settings(file.path()).unwrap_err(), ConfigError::Parse { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let file = write_settings("reveal_interval_ms: [oops");
        let err = load_settings(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_interval_rejected() {
        let file = write_settings("reveal_interval_ms: 0\n");
        let err = load_settings(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "reveal_interval_ms", .. }));
    }

    #[test]
    fn model_for_mode() {
        let models = ModelSettings::default();
        assert_eq!(models.for_mode(ChatMode::Standard), DEFAULT_STANDARD_MODEL);
        assert_eq!(models.for_mode(ChatMode::Thinking), DEFAULT_THINKING_MODEL);
        assert_eq!(models.for_mode(ChatMode::Search), DEFAULT_SEARCH_MODEL);
    }
}
