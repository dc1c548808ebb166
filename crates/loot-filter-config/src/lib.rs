use loot_filter_engine::{DecodeOptions, LineMatching};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_WORKSPACE_PATH: &str = "~/loot-filters";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that exported filters are written to.
    pub workspace_path: PathBuf,
    #[serde(default)]
    pub line_matching: LineMatching,
    /// Default log level; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_path: expanded(PathBuf::from(DEFAULT_WORKSPACE_PATH)),
            line_matching: LineMatching::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.workspace_path = expanded(config.workspace_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/loot-filter");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            line_matching: self.line_matching,
        }
    }
}

/// Expands `~` and `$VARS` in a configured path; an unset variable leaves the
/// path as written.
fn expanded(path: PathBuf) -> PathBuf {
    let expanded = shellexpand::full(&path.to_string_lossy())
        .map(|expanded| PathBuf::from(expanded.as_ref()));
    expanded.unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/loot-filter/config.toml"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(!config.workspace_path.to_string_lossy().starts_with('~'));
        assert!(config.workspace_path.ends_with("loot-filters"));
        assert_eq!(config.line_matching, LineMatching::Substring);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            workspace_path: PathBuf::from("/tmp/test-filters"),
            line_matching: LineMatching::LeadingToken,
            log_level: "debug".to_string(),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_optional_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str(r#"workspace_path = "/tmp/filters""#).unwrap();

        assert_eq!(config.line_matching, LineMatching::Substring);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_line_matching_is_kebab_case() {
        let config: Config = toml::from_str(
            r#"
workspace_path = "/tmp/filters"
line_matching = "leading-token"
"#,
        )
        .unwrap();

        assert_eq!(config.line_matching, LineMatching::LeadingToken);
        assert_eq!(
            config.decode_options().line_matching,
            LineMatching::LeadingToken
        );
    }

    #[test]
    fn test_unknown_line_matching_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "workspace_path = \"/tmp\"\nline_matching = \"fuzzy\"\n",
        )
        .unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_unset_variable_keeps_path_as_written() {
        let path = PathBuf::from("$LOOT_FILTER_UNSET_VAR/filters");
        assert_eq!(expanded(path.clone()), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            workspace_path: PathBuf::from("/tmp/test-filters"),
            line_matching: LineMatching::LeadingToken,
            log_level: "warn".to_string(),
        };

        test_config.save_to_path(&config_file).unwrap();
        assert!(config_file.exists(), "Config file should exist");

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("LOOT_FILTER_ROOT", "/custom/filters");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "workspace_path = \"$LOOT_FILTER_ROOT/league\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.workspace_path, PathBuf::from("/custom/filters/league"));

        unsafe {
            env::remove_var("LOOT_FILTER_ROOT");
        }
    }
}
