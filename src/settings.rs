//! Persisted plugin settings
//!
//! A flat record of everything the user can configure, stored as YAML in the
//! gridline config directory. Every field carries a serde default so files
//! written by older versions keep loading, and [`PluginSettings::save`]
//! rewrites the full record so the on-disk shape stays current.
//!
//! Settings are a snapshot: the dispatcher resolves them into a fresh
//! [`Options`] on every command via [`PluginSettings::resolve`], never
//! holding mutable settings state on the hot path.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::options::{
    options_with_defaults, DefaultAlignment, FormatType, HeaderAlignment, Options,
    OptionsOverride, TextWidthOverride,
};

/// User configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Table format mode: full realignment or weak trimming
    #[serde(default = "default_format_type")]
    pub format_type: FormatType,

    /// Alignment for columns without an explicit one
    #[serde(default = "default_alignment")]
    pub default_alignment: DefaultAlignment,

    /// Alignment policy for header cells
    #[serde(default = "default_header_alignment")]
    pub header_alignment: HeaderAlignment,

    /// Minimum width of delimiter cells
    #[serde(default = "default_min_delimiter_width")]
    pub min_delimiter_width: usize,

    /// Normalize text before measuring widths
    #[serde(default = "default_true")]
    pub normalize_text: bool,

    /// Characters always measured as wide
    #[serde(default)]
    pub wide_chars: Vec<char>,

    /// Characters always measured as narrow
    #[serde(default)]
    pub narrow_chars: Vec<char>,

    /// Measure East Asian Ambiguous characters as wide
    #[serde(default)]
    pub ambiguous_as_wide: bool,

    /// Enable the engine's "smart cursor" behavior
    #[serde(default)]
    pub smart_cursor: bool,

    /// Show the toolbar icon in the host UI
    #[serde(default = "default_true")]
    pub show_toolbar_icon: bool,

    /// Intercept Tab / Shift+Tab for cell navigation
    #[serde(default = "default_true")]
    pub bind_tab: bool,

    /// Intercept Enter / Shift+Enter for row navigation
    #[serde(default = "default_true")]
    pub bind_enter: bool,

    /// Preferred monospace font for table editing, if the host honors it
    #[serde(default)]
    pub preferred_font: Option<String>,

    /// Sentinel line that, placed immediately above a table, opts it out of
    /// management; `None` disables the check
    #[serde(default = "default_opt_out_marker")]
    pub opt_out_marker: Option<String>,
}

fn default_format_type() -> FormatType {
    FormatType::Normal
}

fn default_alignment() -> DefaultAlignment {
    DefaultAlignment::Left
}

fn default_header_alignment() -> HeaderAlignment {
    HeaderAlignment::Follow
}

fn default_min_delimiter_width() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_opt_out_marker() -> Option<String> {
    Some("-tx-".to_string())
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            format_type: default_format_type(),
            default_alignment: default_alignment(),
            header_alignment: default_header_alignment(),
            min_delimiter_width: default_min_delimiter_width(),
            normalize_text: true,
            wide_chars: Vec::new(),
            narrow_chars: Vec::new(),
            ambiguous_as_wide: false,
            smart_cursor: false,
            show_toolbar_icon: true,
            bind_tab: true,
            bind_enter: true,
            preferred_font: None,
            opt_out_marker: default_opt_out_marker(),
        }
    }
}

impl PluginSettings {
    /// Load settings from the default location, or return defaults if the
    /// file is missing or unreadable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::settings_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings and write the record back so the on-disk shape always
    /// has every current field
    pub fn load_or_init() -> Self {
        let settings = Self::load();
        if let Err(e) = settings.save() {
            tracing::warn!("Could not write settings back: {}", e);
        }
        settings
    }

    /// Save settings to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::settings_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        crate::config_paths::ensure_config_dir()?;
        self.save_to(&path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings to {}: {}", path.display(), e))?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Resolve this record into a fresh engine [`Options`]
    ///
    /// Pure merge over the built-in defaults; called on every dispatched
    /// command so concurrent commands never observe partial updates.
    pub fn resolve(&self) -> Options {
        options_with_defaults(&OptionsOverride {
            format_type: Some(self.format_type),
            min_delimiter_width: Some(self.min_delimiter_width),
            default_alignment: Some(self.default_alignment),
            header_alignment: Some(self.header_alignment),
            smart_cursor: Some(self.smart_cursor),
            text_width: Some(TextWidthOverride {
                normalize: Some(self.normalize_text),
                wide_chars: Some(self.wide_chars.iter().copied().collect()),
                narrow_chars: Some(self.narrow_chars.iter().copied().collect()),
                ambiguous_as_wide: Some(self.ambiguous_as_wide),
            }),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = PluginSettings::default();
        assert_eq!(settings.format_type, FormatType::Normal);
        assert_eq!(settings.min_delimiter_width, 3);
        assert!(settings.bind_tab);
        assert!(settings.bind_enter);
        assert!(settings.show_toolbar_icon);
        assert_eq!(settings.opt_out_marker.as_deref(), Some("-tx-"));
    }

    #[test]
    fn partial_yaml_fills_missing_fields_with_defaults() {
        let settings: PluginSettings = serde_yaml::from_str("format_type: weak\n").unwrap();
        assert_eq!(settings.format_type, FormatType::Weak);
        assert_eq!(settings.min_delimiter_width, 3);
        assert!(settings.bind_enter);
    }

    #[test]
    fn resolve_produces_engine_options() {
        let settings = PluginSettings {
            format_type: FormatType::Weak,
            min_delimiter_width: 5,
            ambiguous_as_wide: true,
            ..Default::default()
        };
        let options = settings.resolve();
        assert_eq!(options.format_type, FormatType::Weak);
        assert_eq!(options.min_delimiter_width, 5);
        assert!(options.text_width_options.ambiguous_as_wide);
        // Unrelated text-width defaults survive.
        assert!(options.text_width_options.normalize);
    }

    #[test]
    fn resolve_builds_a_fresh_record_each_call() {
        let settings = PluginSettings::default();
        assert_eq!(settings.resolve(), settings.resolve());
    }
}
