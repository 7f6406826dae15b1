use super::*;

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.time_fraction, 0.02);
    assert_eq!(config.quiescence_threshold, 0.90);
    assert!(config.history_short_circuit);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = EngineConfig::from_toml_str("max_depth = 6\nhistory_short_circuit = false\n")
        .unwrap();
    assert_eq!(config.max_depth, 6);
    assert!(!config.history_short_circuit);
    assert_eq!(config.max_recursion_depth, 48);
}

#[test]
fn test_out_of_range_fraction_is_rejected() {
    let err = EngineConfig::from_toml_str("time_fraction = 1.5").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "time_fraction",
            ..
        }
    ));

    let err = EngineConfig::from_toml_str("quiescence_threshold = 0.0").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "quiescence_threshold",
            ..
        }
    ));
}

#[test]
fn test_zero_depth_is_rejected() {
    let err = EngineConfig::from_toml_str("max_recursion_depth = 0").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "max_recursion_depth",
            ..
        }
    ));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = EngineConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = EngineConfig::load(Path::new("/nonexistent/engine.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
