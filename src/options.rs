//! Options for locating, extracting and the copy control
//!
//! All fields have defaults, so a config file only needs the keys it changes.

use serde::{Deserialize, Serialize};

/// Default bound on the ancestor walk
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Options shared by the locator, the extractor and the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabOptions {
    /// How many nodes (starting with the target itself) the locator inspects
    /// Default: 20
    pub max_depth: usize,

    /// Attributes read by the attribute strategy, in priority order
    /// Default: `data-latex`, `data-tex`, `title`
    pub latex_attributes: Vec<String>,

    /// Fall back to converting rendered Unicode glyphs into LaTeX
    /// Default: true
    pub unicode_fallback: bool,

    /// Copy control placement and timing
    pub button: ButtonOptions,
}

impl Default for GrabOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            latex_attributes: vec![
                "data-latex".to_string(),
                "data-tex".to_string(),
                "title".to_string(),
            ],
            unicode_fallback: true,
            button: ButtonOptions::default(),
        }
    }
}

impl GrabOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Only report authoritative sources; rendered text is returned as is
    pub fn strict() -> Self {
        Self {
            unicode_fallback: false,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Placement, labels and timers of the floating copy control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonOptions {
    /// Horizontal offset from the formula's right edge
    pub offset_x: f64,
    /// Vertical offset from the formula's top edge
    pub offset_y: f64,
    /// How long the copied/failed label stays before reverting
    pub feedback_ms: f64,
    /// Grace period before hiding after the pointer leaves a formula
    pub hide_delay_ms: f64,
    pub label_idle: String,
    pub label_copied: String,
    pub label_failed: String,
    /// Tooltip of the control
    pub tooltip: String,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            offset_x: -30.0,
            offset_y: 2.0,
            feedback_ms: 1500.0,
            hide_delay_ms: 100.0,
            label_idle: "Copy".to_string(),
            label_copied: "Copied".to_string(),
            label_failed: "Failed".to_string(),
            tooltip: "Copy LaTeX source".to_string(),
        }
    }
}

#[cfg(feature = "config")]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::GrabOptions;
    use crate::utils::error::{GrabError, GrabResult};

    impl GrabOptions {
        /// Load options from the user config directory, defaults when absent
        pub fn load() -> GrabResult<Self> {
            match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            }
        }

        /// Load options from an explicit TOML file
        pub fn load_from(path: &Path) -> GrabResult<Self> {
            let content = fs::read_to_string(path)?;
            Self::from_toml(&content)
        }

        pub fn from_toml(content: &str) -> GrabResult<Self> {
            toml::from_str(content).map_err(|e| GrabError::config(e.to_string()))
        }

        pub fn to_toml(&self) -> GrabResult<String> {
            toml::to_string_pretty(self).map_err(|e| GrabError::config(e.to_string()))
        }

        /// Write these options to `path`, creating parent directories
        pub fn save_to(&self, path: &Path) -> GrabResult<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, self.to_toml()?)?;
            Ok(())
        }

        /// Get the path to the config file
        pub fn config_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("texgrab").join("config.toml"))
        }
    }
}
