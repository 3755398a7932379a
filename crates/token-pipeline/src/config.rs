//! Build configuration
//!
//! Read from `token-config.json`. Every field is optional; a missing file
//! means all defaults. Unknown keys are rejected so typos surface early.
//!
//! ```json
//! {
//!   "inputFile": "input/design-tokens.json",
//!   "buildPath": "build",
//!   "includeKeys": ["Themes/ZRH", "Themes/DXN"],
//!   "themes": [
//!     { "id": "dxn-default", "set": "Themes/DXN" },
//!     { "id": "zrh-default", "set": "Themes/ZRH" }
//!   ],
//!   "platforms": ["ios", "ios-swift", "compose"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use token_core::SetSelection;
use token_emit::EmitOptions;
use token_output::OutputConfig;

/// Default configuration file name
pub const CONFIG_FILE: &str = "token-config.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        /// Configuration path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid
    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        /// Configuration path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Explicit theme id for a theme set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeBinding {
    /// Theme id, used as the build directory name
    pub id: String,
    /// Top-level set key in the token source
    pub set: String,
}

impl ThemeBinding {
    /// Create a binding
    pub fn new(id: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            set: set.into(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Token source document
    pub input_file: PathBuf,
    /// Build directory
    pub build_path: PathBuf,
    /// Set holding the base tokens
    pub base_set: String,
    /// Only these sets become themes
    pub include_keys: Vec<String>,
    /// Every set except these becomes a theme
    pub exclude_keys: Vec<String>,
    /// Explicit theme ids
    pub themes: Vec<ThemeBinding>,
    /// Restrict the build to these theme ids
    pub only_themes: Vec<String>,
    /// Platforms to build
    pub platforms: Vec<String>,
    /// Pixel size of `1rem`
    pub base_px_font_size: f64,
    /// Write through temp files
    pub atomic_writes: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("input/design-tokens.json"),
            build_path: PathBuf::from("build"),
            base_set: "global".to_string(),
            include_keys: Vec::new(),
            exclude_keys: Vec::new(),
            themes: Vec::new(),
            only_themes: Vec::new(),
            platforms: vec!["css".to_string(), "js".to_string(), "json".to_string()],
            base_px_font_size: 16.0,
            atomic_writes: true,
        }
    }
}

impl BuildConfig {
    /// Load configuration from a file, falling back to defaults when it is absent
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No configuration file found at {}, using defaults",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from JSON text
    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Keep the input file name but look for it in `dir`
    pub fn apply_source_prefix(&mut self, dir: impl AsRef<Path>) {
        let file_name = self
            .input_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("design-tokens.json"));
        self.input_file = dir.as_ref().join(file_name);
    }

    /// Check that the configuration can drive a build
    pub fn validate(&self) -> Result<()> {
        self.selection()
            .check()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.base_set.trim().is_empty() {
            return Err(ConfigError::Invalid("baseSet cannot be empty".to_string()));
        }

        if self.platforms.is_empty() {
            return Err(ConfigError::Invalid("At least one platform is required".to_string()));
        }

        if !(self.base_px_font_size.is_finite() && self.base_px_font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "basePxFontSize must be positive, got {}",
                self.base_px_font_size
            )));
        }

        for (i, binding) in self.themes.iter().enumerate() {
            if binding.id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Theme binding for set '{}' has an empty id",
                    binding.set
                )));
            }
            if self.themes[..i].iter().any(|b| b.id == binding.id) {
                return Err(ConfigError::Invalid(format!(
                    "Theme id '{}' is bound twice",
                    binding.id
                )));
            }
            if self.themes[..i].iter().any(|b| b.set == binding.set) {
                return Err(ConfigError::Invalid(format!(
                    "Set '{}' is bound to more than one theme",
                    binding.set
                )));
            }
        }

        Ok(())
    }

    /// Theme set selection described by `includeKeys` / `excludeKeys`
    pub fn selection(&self) -> SetSelection {
        SetSelection::new(self.include_keys.clone(), self.exclude_keys.clone())
    }

    /// Theme id bound to a set, if any
    pub fn binding_for(&self, set: &str) -> Option<&str> {
        self.themes
            .iter()
            .find(|b| b.set == set)
            .map(|b| b.id.as_str())
    }

    /// Emitter options derived from this configuration
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            base_px_font_size: self.base_px_font_size,
        }
    }

    /// Writer configuration derived from this configuration
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(&self.build_path).atomic_writes(self.atomic_writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.input_file, PathBuf::from("input/design-tokens.json"));
        assert_eq!(config.build_path, PathBuf::from("build"));
        assert_eq!(config.base_set, "global");
        assert_eq!(config.platforms, vec!["css", "js", "json"]);
        assert_eq!(config.base_px_font_size, 16.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BuildConfig::from_json(
            r#"{
                "includeKeys": ["Themes/ZRH", "Themes/DXN"],
                "themes": [{ "id": "zrh-default", "set": "Themes/ZRH" }],
                "platforms": ["ios"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.include_keys, vec!["Themes/ZRH", "Themes/DXN"]);
        assert_eq!(config.binding_for("Themes/ZRH"), Some("zrh-default"));
        assert_eq!(config.binding_for("Themes/DXN"), None);
        assert_eq!(config.base_set, "global");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(BuildConfig::from_json(r#"{ "brands": ["dxn-default"] }"#).is_err());
    }

    #[test]
    fn test_validate_include_and_exclude() {
        let config = BuildConfig {
            include_keys: vec!["Themes/ZRH".into()],
            exclude_keys: vec!["global".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(message)) if message.contains("Cannot specify both includeKeys and excludeKeys")
        ));
        assert_eq!(config.selection().include_keys, vec!["Themes/ZRH"]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = BuildConfig {
            platforms: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BuildConfig {
            base_px_font_size: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BuildConfig {
            themes: vec![
                ThemeBinding::new("dxn-default", "Themes/DXN"),
                ThemeBinding::new("dxn-default", "Themes/ZRH"),
            ],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_source_prefix() {
        let mut config = BuildConfig::default();
        config.apply_source_prefix("tokens");
        assert_eq!(config.input_file, PathBuf::from("tokens/design-tokens.json"));
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::load(dir.path().join(CONFIG_FILE)).await.unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[tokio::test]
    async fn test_load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        tokio::fs::write(&path, "{ not json").await.unwrap();

        assert!(matches!(
            BuildConfig::load(&path).await,
            Err(ConfigError::Parse { .. })
        ));
    }
}
