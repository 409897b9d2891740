//! Playground configuration
//!
//! Read from `$XDG_CONFIG_HOME/momonga-playground/config.toml` (or the path
//! given with `--config`). Every field has a default, so a missing file or a
//! partial file is fine:
//!
//! ```toml
//! [interpreter]
//! program = "momonga"
//! run_args = []
//! check_args = ["--check"]
//! check_timeout_ms = 500
//!
//! [ui]
//! narrow_width = 100
//! tab_width = 4
//!
//! [output]
//! max_lines = 10000
//! ```

use crate::interpreter::process::ProcessConfig;
use crate::output::DEFAULT_MAX_LINES;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub ui: UiConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    pub program: String,
    pub run_args: Vec<String>,
    /// Omit or set to an empty list to turn off live syntax checks
    pub check_args: Option<Vec<String>>,
    /// A check still running after this long is killed and treated as clean
    pub check_timeout_ms: u64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            program: "momonga".to_string(),
            run_args: Vec::new(),
            check_args: Some(vec!["--check".to_string()]),
            check_timeout_ms: 500,
        }
    }
}

impl InterpreterConfig {
    pub fn process_config(&self) -> ProcessConfig {
        ProcessConfig {
            program: self.program.clone(),
            run_args: self.run_args.clone(),
            check_args: self.check_args.clone().filter(|args| !args.is_empty()),
            check_timeout: Duration::from_millis(self.check_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Terminal width (columns) below which panes are stacked
    pub narrow_width: u16,
    pub tab_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            narrow_width: 100,
            tab_width: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Lines kept per stream and run
    pub max_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("momonga-playground").join("config.toml"))
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("", Path::new("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ui.narrow_width, 100);
        assert_eq!(config.output.max_lines, DEFAULT_MAX_LINES);
        assert_eq!(
            config.interpreter.process_config().check_timeout,
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_partial_config() {
        let text = r#"
            [interpreter]
            program = "/opt/momonga/bin/momonga"
            check_args = []
            check_timeout_ms = 2000

            [ui]
            tab_width = 2
        "#;
        let config = Config::parse(text, Path::new("config.toml")).unwrap();

        assert_eq!(config.interpreter.program, "/opt/momonga/bin/momonga");
        assert_eq!(config.interpreter.process_config().check_args, None);
        assert_eq!(
            config.interpreter.process_config().check_timeout,
            Duration::from_secs(2)
        );
        assert_eq!(config.ui.tab_width, 2);
        assert_eq!(config.ui.narrow_width, 100);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::parse("[ui]\ncolour = 3\n", Path::new("config.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
