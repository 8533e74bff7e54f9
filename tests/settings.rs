//! Settings persistence tests
//!
//! Round-trips the YAML settings file through a temp directory and checks
//! the degraded paths: missing file, corrupt file, and files written by
//! older versions that lack newer fields.

use gridline::options::{DefaultAlignment, FormatType, HeaderAlignment};
use gridline::settings::PluginSettings;

#[test]
fn save_then_load_round_trips_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");

    let settings = PluginSettings {
        format_type: FormatType::Weak,
        default_alignment: DefaultAlignment::Center,
        header_alignment: HeaderAlignment::Right,
        min_delimiter_width: 5,
        normalize_text: false,
        wide_chars: vec!['△'],
        narrow_chars: vec!['…'],
        ambiguous_as_wide: true,
        smart_cursor: true,
        show_toolbar_icon: false,
        bind_tab: false,
        bind_enter: false,
        preferred_font: Some("Iosevka".to_string()),
        opt_out_marker: Some("<!-- raw -->".to_string()),
    };

    settings.save_to(&path).unwrap();
    assert_eq!(PluginSettings::load_from(&path), settings);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.yaml");
    assert_eq!(PluginSettings::load_from(&path), PluginSettings::default());
}

#[test]
fn corrupt_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "format_type: [not, a, scalar\n").unwrap();
    assert_eq!(PluginSettings::load_from(&path), PluginSettings::default());
}

#[test]
fn older_file_without_newer_fields_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    std::fs::write(
        &path,
        "format_type: weak\nmin_delimiter_width: 4\nbind_tab: false\n",
    )
    .unwrap();

    let settings = PluginSettings::load_from(&path);
    assert_eq!(settings.format_type, FormatType::Weak);
    assert_eq!(settings.min_delimiter_width, 4);
    assert!(!settings.bind_tab);
    // Absent fields fall back to their defaults.
    assert!(settings.bind_enter);
    assert_eq!(settings.header_alignment, HeaderAlignment::Follow);
    assert_eq!(settings.opt_out_marker.as_deref(), Some("-tx-"));
}

#[test]
fn saved_file_records_every_current_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    PluginSettings::default().save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    for field in [
        "format_type",
        "default_alignment",
        "header_alignment",
        "min_delimiter_width",
        "bind_tab",
        "bind_enter",
        "opt_out_marker",
    ] {
        assert!(content.contains(field), "missing field {field}");
    }
}

#[test]
fn disabling_the_opt_out_marker_survives_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");

    let settings = PluginSettings {
        opt_out_marker: None,
        ..Default::default()
    };
    settings.save_to(&path).unwrap();
    assert_eq!(PluginSettings::load_from(&path).opt_out_marker, None);
}
