//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_without_sources() {
    let settings = Settings::from_toml_str("").expect("defaults are valid");

    assert_eq!(
        settings.scheduling.max_expansion_count,
        DEFAULT_MAX_EXPANSION_COUNT
    );
    assert_eq!(
        settings.scheduling.default_expansion_count,
        DEFAULT_EXPANSION_COUNT
    );
    assert_eq!(settings.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_toml_overrides_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        [scheduling]
        max_expansion_count = 500
        default_expansion_count = 12

        [logging]
        level = "cadence_schedule=trace"
        "#,
    )
    .expect("valid configuration");

    assert_eq!(settings.scheduling.max_expansion_count, 500);
    assert_eq!(settings.scheduling.default_expansion_count, 12);
    assert_eq!(settings.logging.level, "cadence_schedule=trace");
}

#[test]
fn test_partial_section_keeps_remaining_defaults() {
    let settings = Settings::from_toml_str(
        r"
        [scheduling]
        default_expansion_count = 4
        ",
    )
    .expect("valid configuration");

    assert_eq!(
        settings.scheduling.max_expansion_count,
        DEFAULT_MAX_EXPANSION_COUNT
    );
    assert_eq!(settings.scheduling.default_expansion_count, 4);
}

#[test]
fn test_zero_max_count_rejected() {
    let result = Settings::from_toml_str(
        r"
        [scheduling]
        max_expansion_count = 0
        default_expansion_count = 0
        ",
    );

    assert!(matches!(result, Err(CoreError::InvalidConfiguration(_))));
}

#[test]
fn test_default_count_above_max_rejected() {
    let result = Settings::from_toml_str(
        r"
        [scheduling]
        max_expansion_count = 10
        default_expansion_count = 11
        ",
    );

    let Err(CoreError::InvalidConfiguration(message)) = result else {
        panic!("expected invalid configuration, got {result:?}");
    };
    assert!(message.contains("default_expansion_count"));
}

#[test]
fn test_malformed_value_is_config_error() {
    let result = Settings::from_toml_str(
        r#"
        [scheduling]
        max_expansion_count = "lots"
        "#,
    );

    assert!(matches!(result, Err(CoreError::ConfigError(_))));
}

#[test]
fn test_settings_debug() {
    let settings = Settings::default();

    let debug_str = format!("{settings:?}");
    assert!(debug_str.contains("Settings"));
    assert!(debug_str.contains("scheduling"));
    assert!(debug_str.contains("logging"));
}
