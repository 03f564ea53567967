//! Application settings loaded from `config.toml`
//!
//! Every field has a default, so a missing file, a missing table or a
//! missing key all fall back to stock behavior.

use std::path::{Path, PathBuf};

use formwork_core::prelude::*;
use formwork_core::{InputKey, KeyBinding};
use formwork_form::{FormKeyMap, SelectKeyMap};
use serde::{Deserialize, Serialize};

pub const CONFIG_DIR: &str = "formwork";
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub form: FormKeyMap,
    pub select: SelectKeyMap,
    pub app: AppKeyMap,
}

/// Bindings handled by the application shell rather than the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppKeyMap {
    pub exit: KeyBinding,
    pub help: KeyBinding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            exit: KeyBinding::new([InputKey::CharCtrl('c')], "Exit"),
            help: KeyBinding::new([InputKey::Char('?')], "Help"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Lay out short selects (like the auth method) on one line
    pub inline_select: bool,
    /// Disable colors and attributes
    pub plain: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            inline_select: true,
            plain: false,
        }
    }
}

/// `<config_dir>/formwork/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILENAME)
}

/// Parse settings from TOML text
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings> {
    toml::from_str(content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from `config_path`, falling back to defaults
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match parse_settings(&content, config_path) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("{}", e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config to `config_path` unless one exists
pub fn init_config(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    info!("Wrote default config to {:?}", config_path);
    Ok(true)
}

const DEFAULT_CONFIG: &str = r#"# formwork configuration

[keys.form]
retreat = { keys = ["shift+tab"], help = "Previous" }
advance = { keys = ["enter", "tab"], help = "Next" }

[keys.select]
previous = { keys = ["left", "up"], help = "Previous selection" }
next = { keys = ["right", "down"], help = "Next selection" }

[keys.app]
exit = { keys = ["ctrl+c"], help = "Exit" }
help = { keys = ["?"], help = "Help" }

[ui]
inline_select = true
plain = false
"#;
