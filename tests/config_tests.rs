use std::path::PathBuf;

use shiftgrid::config::{AppConfig, ConfigError, OUTPUT_ENV, ROSTER_ENV};
use shiftgrid::state::assignment::AssignmentStatus;

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.notice_seconds, 3);
}

#[test]
fn test_partial_config_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "roster_path = \"/srv/roster.json\"\ndefault_status = \"confirmed\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.roster_path, Some(PathBuf::from("/srv/roster.json")));
    assert_eq!(config.default_status, AssignmentStatus::Confirmed);
    assert_eq!(config.header_date_format, AppConfig::default().header_date_format);
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "notice_seconds = \"soon\"").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_env_overrides_paths() {
    let mut config = AppConfig::default();
    config.apply_env(|key| match key {
        ROSTER_ENV => Some("/tmp/roster.json".to_string()),
        OUTPUT_ENV => Some("/tmp/out.json".to_string()),
        _ => None,
    });

    assert_eq!(config.roster_path, Some(PathBuf::from("/tmp/roster.json")));
    assert_eq!(config.resolved_output_path(), PathBuf::from("/tmp/out.json"));
}

#[test]
fn test_blank_env_value_is_ignored() {
    let mut config = AppConfig {
        roster_path: Some(PathBuf::from("/srv/roster.json")),
        ..AppConfig::default()
    };
    config.apply_env(|key| (key == ROSTER_ENV).then(|| "  ".to_string()));
    assert_eq!(config.roster_path, Some(PathBuf::from("/srv/roster.json")));
}
