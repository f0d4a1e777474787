//! # Cipher Config
//!
//! Settings for the surfaces around the encoder: where the last input is
//! stored, input cap, terminal color and SVG size.
//!
//! Load order:
//! 1. explicit path (`--config`)
//! 2. `$CIPHER_CONFIG`
//! 3. `~/.config/cipher/config.yaml` if it exists
//! 4. built-in defaults
//!
//! Environment overrides are applied on top: `CIPHER_STATE_PATH`,
//! `CIPHER_NO_PERSIST`, `NO_COLOR`.
//!
//! The digest path is never configurable. It is decided by probing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors from loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Input length cap of the original input box
pub const DEFAULT_MAX_INPUT_CHARS: usize = 44;

pub const ENV_CONFIG: &str = "CIPHER_CONFIG";
pub const ENV_STATE_PATH: &str = "CIPHER_STATE_PATH";
pub const ENV_NO_PERSIST: &str = "CIPHER_NO_PERSIST";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// SVG canvas size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self { width: 520, height: 84 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// Where the last input is stored. `None` = config dir default.
    pub state_path: Option<PathBuf>,
    /// Store the last applied input
    pub persist: bool,
    /// Truncate submitted text to this many characters. `None` = no cap.
    pub max_input_chars: Option<usize>,
    /// ANSI color in terminal output
    pub color: bool,
    pub svg: SvgConfig,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            state_path: None,
            persist: true,
            max_input_chars: Some(DEFAULT_MAX_INPUT_CHARS),
            color: true,
            svg: SvgConfig::default(),
        }
    }
}

impl CipherConfig {
    /// `~/.config/cipher`
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cipher")
    }

    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Resolved last-input file location
    pub fn state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("last.json"))
    }

    /// Load from the process environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Load with an injected environment lookup
    pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit
            .map(Path::to_path_buf)
            .or_else(|| env(ENV_CONFIG).map(PathBuf::from))
        {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(env)?;
        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env(ENV_STATE_PATH).filter(|p| !p.is_empty()) {
            self.state_path = Some(PathBuf::from(path));
        }

        if let Some(value) = env(ENV_NO_PERSIST) {
            if parse_flag(ENV_NO_PERSIST, &value)? {
                self.persist = false;
            }
        }

        // https://no-color.org: any non-empty value disables color
        if env(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }

        Ok(())
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CipherConfig::default();
        assert!(config.persist);
        assert!(config.color);
        assert_eq!(config.max_input_chars, Some(44));
        assert_eq!(config.svg, SvgConfig { width: 520, height: 84 });
        assert!(config.state_path().ends_with("cipher/last.json"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CipherConfig::from_yaml("persist: false\nsvg:\n  height: 120\n").unwrap();
        assert!(!config.persist);
        assert_eq!(config.svg.height, 120);
        assert_eq!(config.svg.width, 520);
        assert_eq!(config.max_input_chars, Some(44));
    }

    #[test]
    fn test_null_cap_disables_truncation() {
        let config = CipherConfig::from_yaml("max_input_chars: null\n").unwrap();
        assert_eq!(config.max_input_chars, None);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(CipherConfig::from_yaml("").unwrap(), CipherConfig::default());
    }

    #[test]
    fn test_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "state_path: /tmp/cipher-test/last.json\ncolor: false").unwrap();

        let config = CipherConfig::load_with(Some(file.path()), env_of(&[])).unwrap();
        assert_eq!(config.state_path(), PathBuf::from("/tmp/cipher-test/last.json"));
        assert!(!config.color);
    }

    #[test]
    fn test_config_from_env_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_input_chars: 10").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = CipherConfig::load_with(None, env_of(&[(ENV_CONFIG, &path)])).unwrap();
        assert_eq!(config.max_input_chars, Some(10));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = CipherConfig::load_with(Some(Path::new("/nonexistent/cipher.yaml")), env_of(&[]));
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "persist: [not, a, bool]").unwrap();

        let err = CipherConfig::load_with(Some(file.path()), env_of(&[]));
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "persist: true").unwrap();

        let config = CipherConfig::load_with(
            Some(file.path()),
            env_of(&[
                (ENV_STATE_PATH, "/var/tmp/last.json"),
                (ENV_NO_PERSIST, "1"),
                (ENV_NO_COLOR, "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.state_path(), PathBuf::from("/var/tmp/last.json"));
        assert!(!config.persist);
        assert!(!config.color);
    }

    #[test]
    fn test_empty_no_color_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "color: true").unwrap();

        let config =
            CipherConfig::load_with(Some(file.path()), env_of(&[(ENV_NO_COLOR, "")])).unwrap();
        assert!(config.color);
    }

    #[test]
    fn test_bad_flag_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "persist: true").unwrap();

        let err = CipherConfig::load_with(Some(file.path()), env_of(&[(ENV_NO_PERSIST, "maybe")]));
        assert!(matches!(err, Err(ConfigError::InvalidEnv { key: ENV_NO_PERSIST, .. })));
    }
}
