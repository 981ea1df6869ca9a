//! Editor configuration
//!
//! Stored in `~/.config/form-editor/config.yaml`; every key is optional.
//! Logs go to the `logs/` directory next to it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

const APP_DIR: &str = "form-editor";

/// Environment variable naming the config directory outright
pub const HOME_VAR: &str = "FORM_EDITOR_HOME";

/// Where the editor keeps its config file and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub dir: PathBuf,
}

impl ConfigPaths {
    pub fn from_env() -> Option<Self> {
        Self::resolve(|name| env::var_os(name), dirs::home_dir())
    }

    /// `FORM_EDITOR_HOME` wins. Otherwise `%APPDATA%\form-editor` on Windows,
    /// and `$XDG_CONFIG_HOME/form-editor` or `~/.config/form-editor` elsewhere.
    pub fn resolve(
        var: impl Fn(&str) -> Option<OsString>,
        home: Option<PathBuf>,
    ) -> Option<Self> {
        let set = |name: &str| var(name).filter(|value| !value.is_empty());
        if let Some(dir) = set(HOME_VAR) {
            return Some(Self {
                dir: PathBuf::from(dir),
            });
        }

        let base = if cfg!(windows) {
            set("APPDATA").map(PathBuf::from)
        } else {
            set("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|| home.map(|home| home.join(".config")))
        };
        base.map(|base| Self {
            dir: base.join(APP_DIR),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join("config.yaml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir.join("logs")
    }

    /// Create the logs directory if needed and return it
    pub fn ensure_logs_dir(&self) -> io::Result<PathBuf> {
        let logs = self.logs_dir();
        fs::create_dir_all(&logs)?;
        Ok(logs)
    }
}

/// Class names toggled on field elements to reflect field state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationClasses {
    #[serde(default = "default_focus_class")]
    pub focus: String,
    #[serde(default = "default_placeholder_class")]
    pub placeholder: String,
    #[serde(default = "default_invalid_class")]
    pub invalid: String,
    #[serde(default = "default_require_class")]
    pub require: String,
}

fn default_focus_class() -> String {
    "focus".to_string()
}

fn default_placeholder_class() -> String {
    "placeholder".to_string()
}

fn default_invalid_class() -> String {
    "invalid".to_string()
}

fn default_require_class() -> String {
    "require".to_string()
}

impl Default for PresentationClasses {
    fn default() -> Self {
        Self {
            focus: default_focus_class(),
            placeholder: default_placeholder_class(),
            invalid: default_invalid_class(),
            require: default_require_class(),
        }
    }
}

/// Editor configuration shared by every field of one editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Block element rich fields wrap their lines in (e.g., "p", "div")
    #[serde(default = "default_block_element")]
    pub block_element: String,

    /// Prefix of the metadata attributes fields are declared with
    #[serde(default = "default_attribute_prefix")]
    pub attribute_prefix: String,

    #[serde(default)]
    pub classes: PresentationClasses,

    /// How many ancestors the enclosing-block lookup climbs before giving up
    #[serde(default = "default_max_block_depth")]
    pub max_block_depth: usize,
}

fn default_block_element() -> String {
    "p".to_string()
}

fn default_attribute_prefix() -> String {
    "data-".to_string()
}

fn default_max_block_depth() -> usize {
    32
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            block_element: default_block_element(),
            attribute_prefix: default_attribute_prefix(),
            classes: PresentationClasses::default(),
            max_block_depth: default_max_block_depth(),
        }
    }
}

impl EditorConfig {
    /// Load config from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(paths) = ConfigPaths::from_env() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&paths.config_file())
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}
