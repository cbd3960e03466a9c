//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/tabshift/config.json`.
//! Each concern lives under its own top-level key so the file can be
//! extended later without breaking backward compatibility.
//!
//! # Example
//!
//! ```json
//! {
//!   "arranger": {
//!     "focus_new_window": true,
//!     "focus_target_window": false
//!   },
//!   "startup": {
//!     "check_shortcuts": true
//!   }
//! }
//! ```

use crate::arranger::ArrangerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Focus behavior of detach/attach.
    #[serde(default)]
    pub arranger: ArrangerConfig,

    /// One-shot checks run when the host starts.
    #[serde(default)]
    pub startup: StartupConfig,
}

/// One-shot checks run when the host starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Warn about extension commands that the browser left without a
    /// key binding.
    pub check_shortcuts: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            check_shortcuts: true,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "arranger": {
                "focus_new_window": false,
                "focus_target_window": false
            },
            "startup": {
                "check_shortcuts": false
            }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert!(!cfg.arranger.focus_new_window);
        assert!(!cfg.arranger.focus_target_window);
        assert!(!cfg.startup.check_shortcuts);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.arranger, ArrangerConfig::default());
        assert!(cfg.arranger.focus_new_window);
        assert!(cfg.arranger.focus_target_window);
        assert!(cfg.startup.check_shortcuts);
    }

    #[test]
    fn deserialize_partial_arranger() {
        let json = r#"{ "arranger": { "focus_target_window": false } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert!(!cfg.arranger.focus_target_window);
        assert!(cfg.arranger.focus_new_window);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "arranger": {}, "future_section": { "key": 42 } }"#;
        // Should not fail — unknown keys are silently ignored.
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join(format!(
            "tabshift-missing-{}.json",
            std::process::id()
        ));
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "tabshift-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "startup": { "check_shortcuts": false } }"#).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert!(!cfg.startup.check_shortcuts);
        let _ = std::fs::remove_file(&path);
    }
}
