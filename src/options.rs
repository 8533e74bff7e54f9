//! Engine configuration and the per-invocation resolver
//!
//! Every dispatched command builds a fresh [`Options`] by layering persisted
//! settings over built-in defaults. The merge is a pure function: nothing is
//! cached and nothing is mutated in place, so a command never observes a
//! partially updated configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// How the engine realigns a table when formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    /// Full realignment: cells padded so delimiters line up across rows
    Normal,
    /// Weak formatting: rows are trimmed independently, nothing is aligned
    Weak,
}

/// Default alignment applied to columns without an explicit one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAlignment {
    Left,
    Right,
    Center,
}

/// How header cells are aligned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAlignment {
    /// Follow the column's own alignment
    Follow,
    Left,
    Right,
    Center,
}

/// Options for computing text widths (wide/narrow character handling)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWidthOptions {
    /// Normalize text before measuring
    pub normalize: bool,
    /// Characters always treated as wide
    pub wide_chars: HashSet<char>,
    /// Characters always treated as narrow
    pub narrow_chars: HashSet<char>,
    /// Treat East Asian Ambiguous characters as wide
    pub ambiguous_as_wide: bool,
}

impl Default for TextWidthOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            wide_chars: HashSet::new(),
            narrow_chars: HashSet::new(),
            ambiguous_as_wide: false,
        }
    }
}

/// The full configuration record handed to every engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Additional characters accepted as left margin before a table row
    pub left_margin_chars: HashSet<char>,
    /// Format type, normal or weak
    pub format_type: FormatType,
    /// Minimum width of delimiter cells
    pub min_delimiter_width: usize,
    /// Default alignment of columns
    pub default_alignment: DefaultAlignment,
    /// Alignment of header cells
    pub header_alignment: HeaderAlignment,
    /// Text width measurement options
    pub text_width_options: TextWidthOptions,
    /// Enables the "smart cursor" behavior
    pub smart_cursor: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            left_margin_chars: HashSet::new(),
            format_type: FormatType::Normal,
            min_delimiter_width: 3,
            default_alignment: DefaultAlignment::Left,
            header_alignment: HeaderAlignment::Follow,
            text_width_options: TextWidthOptions::default(),
            smart_cursor: false,
        }
    }
}

/// Partial text-width overrides; unset fields keep their defaults
#[derive(Debug, Clone, Default)]
pub struct TextWidthOverride {
    pub normalize: Option<bool>,
    pub wide_chars: Option<HashSet<char>>,
    pub narrow_chars: Option<HashSet<char>>,
    pub ambiguous_as_wide: Option<bool>,
}

/// Partial configuration overrides layered over the defaults
///
/// The text-width sub-record is merged independently, so overriding one of
/// its fields does not discard the defaults of the others.
#[derive(Debug, Clone, Default)]
pub struct OptionsOverride {
    pub left_margin_chars: Option<HashSet<char>>,
    pub format_type: Option<FormatType>,
    pub min_delimiter_width: Option<usize>,
    pub default_alignment: Option<DefaultAlignment>,
    pub header_alignment: Option<HeaderAlignment>,
    pub text_width: Option<TextWidthOverride>,
    pub smart_cursor: Option<bool>,
}

/// Merge user overrides over the built-in defaults into a fresh [`Options`]
///
/// Deterministic, no I/O, safe (and intended) to call on every command.
pub fn options_with_defaults(overrides: &OptionsOverride) -> Options {
    let defaults = Options::default();

    let text_width_options = match &overrides.text_width {
        Some(tw) => {
            let tw_defaults = TextWidthOptions::default();
            TextWidthOptions {
                normalize: tw.normalize.unwrap_or(tw_defaults.normalize),
                wide_chars: tw.wide_chars.clone().unwrap_or(tw_defaults.wide_chars),
                narrow_chars: tw.narrow_chars.clone().unwrap_or(tw_defaults.narrow_chars),
                ambiguous_as_wide: tw
                    .ambiguous_as_wide
                    .unwrap_or(tw_defaults.ambiguous_as_wide),
            }
        }
        None => TextWidthOptions::default(),
    };

    Options {
        left_margin_chars: overrides
            .left_margin_chars
            .clone()
            .unwrap_or(defaults.left_margin_chars),
        format_type: overrides.format_type.unwrap_or(defaults.format_type),
        min_delimiter_width: overrides
            .min_delimiter_width
            .unwrap_or(defaults.min_delimiter_width),
        default_alignment: overrides
            .default_alignment
            .unwrap_or(defaults.default_alignment),
        header_alignment: overrides
            .header_alignment
            .unwrap_or(defaults.header_alignment),
        text_width_options,
        smart_cursor: overrides.smart_cursor.unwrap_or(defaults.smart_cursor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = Options::default();
        assert_eq!(opts.format_type, FormatType::Normal);
        assert_eq!(opts.min_delimiter_width, 3);
        assert_eq!(opts.default_alignment, DefaultAlignment::Left);
        assert_eq!(opts.header_alignment, HeaderAlignment::Follow);
        assert!(!opts.smart_cursor);
        assert!(opts.text_width_options.normalize);
        assert!(!opts.text_width_options.ambiguous_as_wide);
    }

    #[test]
    fn override_single_field_keeps_other_defaults() {
        let opts = options_with_defaults(&OptionsOverride {
            format_type: Some(FormatType::Weak),
            ..Default::default()
        });
        assert_eq!(opts.format_type, FormatType::Weak);
        assert_eq!(opts.min_delimiter_width, 3);
        assert_eq!(opts.header_alignment, HeaderAlignment::Follow);
    }

    #[test]
    fn partial_text_width_override_merges_independently() {
        let opts = options_with_defaults(&OptionsOverride {
            text_width: Some(TextWidthOverride {
                ambiguous_as_wide: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        });
        // The overridden field took, the sibling defaults survived.
        assert!(opts.text_width_options.ambiguous_as_wide);
        assert!(opts.text_width_options.normalize);
        assert!(opts.text_width_options.wide_chars.is_empty());
    }

    #[test]
    fn resolver_is_pure() {
        let overrides = OptionsOverride {
            min_delimiter_width: Some(5),
            ..Default::default()
        };
        let a = options_with_defaults(&overrides);
        let b = options_with_defaults(&overrides);
        assert_eq!(a, b);
    }
}
