// Chunk: docs/chunks/panel_config - Panel configuration persistence
//!
//! Panel configuration: what to run and how to lay cells out.
//!
//! The config file lives at `<config_dir>/replpad/config.json`. Loading is
//! deliberately forgiving: a missing file, unparseable JSON, or a schema
//! version from a different build all fall back to defaults rather than
//! failing panel construction - a panel with default settings beats no panel.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::LayoutMetrics;

/// Current schema version for the config file.
///
/// Increment this when making breaking changes to the config format.
const SCHEMA_VERSION: u32 = 1;

/// Application name used for the config directory.
const APP_NAME: &str = "replpad";

/// Config file name.
const CONFIG_FILENAME: &str = "config.json";

/// Panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Program the session runs.
    pub command: String,
    /// Arguments for the program.
    pub args: Vec<String>,
    /// Working directory; `None` means the host's current directory.
    pub cwd: Option<PathBuf>,
    /// Text seeded into the first output cell.
    pub banner: String,
    /// Idle poll interval for hosts that drive the panel without a wakeup.
    pub poll_interval_ms: u64,
    /// Maximum lines retained per output cell (0 = unlimited).
    pub scrollback_lines: usize,
    /// When true, plain Return submits and Shift+Return inserts a newline.
    /// When false, Return always inserts a newline and submission happens
    /// only through the externally bound submit command.
    pub submit_on_plain_return: bool,
    /// Shared cell layout metrics.
    pub metrics: LayoutMetrics,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            command: "python3".to_string(),
            args: vec!["-i".to_string(), "-q".to_string()],
            cwd: None,
            banner: "replpad interactive session".to_string(),
            poll_interval_ms: 50,
            scrollback_lines: 5000,
            submit_on_plain_return: true,
            metrics: LayoutMetrics::default(),
        }
    }
}

impl PanelConfig {
    /// Creates a config for the given command with default everything else.
    pub fn for_command(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            ..Default::default()
        }
    }

    /// Loads the config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads a config from `path`, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        let Ok(data) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<PanelConfig>(&data) {
            Ok(config) if config.schema_version == SCHEMA_VERSION => config,
            Ok(config) => {
                debug!(
                    found = config.schema_version,
                    expected = SCHEMA_VERSION,
                    "discarding config with mismatched schema version"
                );
                Self::default()
            }
            Err(err) => {
                debug!(%err, "discarding unparseable config");
                Self::default()
            }
        }
    }

    /// Saves the config to the standard location.
    pub fn save(&self) -> io::Result<()> {
        let path = config_path()
            .ok_or_else(|| io::Error::other("no config directory on this platform"))?;
        self.save_to(&path)
    }

    /// Saves the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, data)
    }
}

/// Resolves the config file path for this platform.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PanelConfig::for_command("bash", vec!["-i".to_string()]);
        config.scrollback_lines = 123;
        config.save_to(&path).unwrap();

        let loaded = PanelConfig::load_from(&path);
        assert_eq!(loaded.command, "bash");
        assert_eq!(loaded.args, vec!["-i"]);
        assert_eq!(loaded.scrollback_lines, 123);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = PathBuf::from("/nonexistent/replpad/config.json");
        let config = PanelConfig::load_from(&path);
        assert_eq!(config.command, PanelConfig::default().command);
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let config = PanelConfig::load_from(&path);
        assert_eq!(config.command, PanelConfig::default().command);
    }

    #[test]
    fn schema_mismatch_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PanelConfig::for_command("zsh", vec![]);
        config.schema_version = 999;
        config.save_to(&path).unwrap();

        let loaded = PanelConfig::load_from(&path);
        assert_eq!(loaded.command, PanelConfig::default().command);
    }
}
