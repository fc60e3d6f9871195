use super::*;

#[test]
fn defaults_match_documented_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.scaling.mobile_padding_px, 12);
    assert_eq!(cfg.resize.debounce(), Duration::from_millis(150));
    assert_eq!(cfg.icon.max_svg_attempts, 3);
    assert_eq!(cfg.icon.backoff_ms, 1000);
    assert_eq!(cfg.icon.floor_size(), 16);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = EngineConfig::from_json_str(r#"{"resize": {"debounceMs": 80}}"#).unwrap();
    assert_eq!(cfg.resize.debounce_ms, 80);
    assert_eq!(cfg.resize.jitter_px, 1);
    assert_eq!(cfg.scaling, ScalingConfig::default());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EngineConfig::from_json_str(r#"{"resise": {}}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn ladder_must_descend() {
    let err = EngineConfig::from_json_str(r#"{"icon": {"sizeLadder": [16, 32]}}"#).unwrap_err();
    assert!(err.to_string().contains("strictly descending"));
}

#[test]
fn endpoints_must_be_absolute() {
    let err =
        EngineConfig::from_json_str(r#"{"preview": {"baseUrl": "example.com"}}"#).unwrap_err();
    assert!(err.to_string().contains("baseUrl"));
}

#[test]
fn missing_file_is_config_error() {
    let err = EngineConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, BioframeError::Config(_)));
}
