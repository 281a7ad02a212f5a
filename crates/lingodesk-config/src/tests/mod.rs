use super::*;

#[test]
fn default_config_has_expected_tick_rate() {
    let config = AppConfig::default();
    assert_eq!(config.tick_rate_ms(), 250);
}

#[test]
fn default_config_has_all_general_fields() {
    let config = AppConfig::default();
    assert_eq!(config.general.default_view, "vocabularies");
    assert_eq!(config.general.log_filter, "info");
}

#[test]
fn default_api_section_matches_struct_defaults() {
    let config = AppConfig::default();
    let defaults = ApiConfig::default();
    assert_eq!(config.api.base_url, defaults.base_url);
    assert_eq!(config.api.page_size, defaults.page_size);
    assert_eq!(config.api.sort, "id,asc");
    assert_eq!(config.api.timeout_secs, 15);
}

#[test]
fn embedded_defaults_parse() {
    let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
    assert!(!config.keybindings.global.is_empty());
    assert!(!config.keybindings.navigation.is_empty());
    assert!(!config.keybindings.browse.is_empty());
    assert!(!config.keybindings.mutate.is_empty());
}

#[test]
fn embedded_keybindings_are_valid_and_unique() {
    let config = AppConfig::default();
    assert!(validate_keybindings(&config.keybindings).is_empty());
    assert!(check_collisions(&config.keybindings).is_empty());
}

#[test]
fn kebab_case_aliases_are_accepted() {
    let raw = r#"
[api]
base-url = "https://example.test/admin"
page-size = 25
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.api.base_url, "https://example.test/admin");
    assert_eq!(config.api.page_size, 25);
    assert_eq!(config.api.sort, "id,asc");
}

#[test]
fn partial_toml_only_api_merges_with_defaults() {
    let base = AppConfig::from_toml(
        r#"
[api]
page_size = 5
"#,
    )
    .unwrap();

    assert_eq!(base.api.page_size, 5);
    assert_eq!(base.general.tick_rate_ms, 250);
    assert_eq!(base.keybindings.global.get("quit").unwrap(), "q");
}

#[test]
fn user_keybinding_overrides_single_key() {
    let base = AppConfig::from_toml(
        r#"
[keybindings.mutate]
delete = "x"
"#,
    )
    .unwrap();

    assert_eq!(base.keybindings.mutate.get("delete").unwrap(), "x");
    assert_eq!(base.keybindings.mutate.get("edit").unwrap(), "e");
}

#[test]
fn explicit_token_wins_over_environment() {
    let auth = AuthConfig { token: Some("  abc  ".into()), token_env: "LINGODESK_TEST_UNUSED_ENV".into() };
    assert_eq!(auth.resolve_token().as_deref(), Some("abc"));
}

#[test]
fn blank_token_without_env_resolves_to_none() {
    let auth = AuthConfig { token: Some("   ".into()), token_env: String::new() };
    assert_eq!(auth.resolve_token(), None);
}

#[test]
fn save_then_load_from_round_trips_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.api.page_size = 42;
    config.general.default_view = "articles".into();
    config.save(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.api.page_size, 42);
    assert_eq!(loaded.general.default_view, "articles");
}

#[test]
fn init_default_at_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    AppConfig::init_default_at(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

    let err = AppConfig::init_default_at(&path).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn load_from_reports_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\npage_size = ").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}

#[test]
fn embedded_defaults_have_no_problems() {
    assert!(AppConfig::default().problems().is_empty());
}

#[test]
fn problems_name_each_unusable_api_value() {
    let config = AppConfig::from_toml(
        r#"
[api]
base_url = "localhost:8080/api"
page_size = 0
timeout_secs = 0
"#,
    )
    .unwrap();
    let problems = config.problems();
    assert_eq!(problems.len(), 3);
    assert!(problems[0].starts_with("api.base_url"));
    assert!(problems[1].contains("between 1 and 500"));
    assert!(problems[2].starts_with("api.timeout_secs"));
    assert_eq!(config.api_timeout(), std::time::Duration::from_secs(1));
}

#[test]
fn resolve_with_explicit_path_reports_file_and_problems() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\npage_size = 900\n").unwrap();

    let loaded = AppConfig::resolve(Some(&path)).unwrap();
    assert_eq!(loaded.source, ConfigSource::File(path.clone()));
    assert_eq!(loaded.config.api.page_size, 900);
    assert_eq!(loaded.warnings.len(), 1);
}

#[test]
fn resolve_with_missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::resolve(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn broken_user_file_falls_back_to_defaults_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general\n").unwrap();

    let (config, source, warnings) = AppConfig::resolve_user_file(&path);
    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(config.general.default_view, "vocabularies");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("ignoring "));
}

#[test]
fn absent_user_file_means_defaults_without_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let (_, source, warnings) = AppConfig::resolve_user_file(&dir.path().join("config.toml"));
    assert_eq!(source, ConfigSource::Defaults);
    assert!(warnings.is_empty());
}

#[test]
fn theme_section_selects_preset_and_overrides() {
    let config = AppConfig::from_toml(
        r##"
[theme]
preset = "light"
selection = "#dddddd"
"##,
    )
    .unwrap();
    assert_eq!(config.theme.preset, ThemePreset::Light);
    let palette = config.theme.palette();
    assert_eq!(palette.selection_bg, "#dddddd");
    assert_eq!(palette.fg, "#4c4f69");
}
