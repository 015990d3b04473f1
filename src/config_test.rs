use super::*;

#[test]
fn from_values_all_absent_uses_defaults() {
    let cfg = SettingsConfig::from_values(RawSettings::default()).unwrap();
    assert_eq!(cfg, SettingsConfig::default());
    assert_eq!(cfg.api_base, "/api");
    assert_eq!(cfg.user_storage_key, "user");
    assert_eq!(cfg.avatar_max_bytes, 819_200);
    assert_eq!(cfg.log_level, log::Level::Info);
}

#[test]
fn from_values_trims_trailing_slash_on_api_base() {
    let cfg = SettingsConfig::from_values(RawSettings {
        api_base: Some("https://api.example.com/v1/"),
        ..RawSettings::default()
    })
    .unwrap();
    assert_eq!(cfg.api_base, "https://api.example.com/v1");
}

#[test]
fn from_values_parses_avatar_limit_and_log_level() {
    let cfg = SettingsConfig::from_values(RawSettings {
        avatar_max_bytes: Some(" 2048 "),
        log_level: Some("debug"),
        ..RawSettings::default()
    })
    .unwrap();
    assert_eq!(cfg.avatar_max_bytes, 2048);
    assert_eq!(cfg.log_level, log::Level::Debug);
}

#[test]
fn from_values_rejects_zero_avatar_limit() {
    let err = SettingsConfig::from_values(RawSettings { avatar_max_bytes: Some("0"), ..RawSettings::default() })
        .unwrap_err();
    assert_eq!(err.error_code(), "E_CONFIG");
}

#[test]
fn from_values_rejects_non_numeric_avatar_limit() {
    let result =
        SettingsConfig::from_values(RawSettings { avatar_max_bytes: Some("800K"), ..RawSettings::default() });
    assert!(matches!(result, Err(SettingsError::Config(_))));
}

#[test]
fn from_values_rejects_unknown_log_level() {
    let result = SettingsConfig::from_values(RawSettings { log_level: Some("loud"), ..RawSettings::default() });
    assert!(matches!(result, Err(SettingsError::Config(_))));
}

#[test]
fn from_values_rejects_blank_user_key() {
    let result =
        SettingsConfig::from_values(RawSettings { user_storage_key: Some("  "), ..RawSettings::default() });
    assert!(matches!(result, Err(SettingsError::Config(_))));
}
