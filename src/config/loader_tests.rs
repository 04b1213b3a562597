//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Write `contents` to a per-test file in the temp dir.
fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("swipedeck_test_{}.toml", name));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

/// RAII guard removing an environment variable on creation and drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
fn default_config_path_points_into_swipedeck_dir() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("swipedeck") && path_str.ends_with("config.toml"),
        "got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_swipedeck_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("swipedeck.log"), "got: {:?}", path);
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_top_level_and_swipe_table() {
    let path = temp_config(
        "full",
        r#"
deck_path = "/tmp/cards.json"
demo_card_count = 12

[swipe]
throwing_threshold = 600.0
snap_duration_ms = 120
allow_vertical_swipes = true
max_rendered_cards = 3
visible_origin = { x = 0.0, y = 16.0 }
"#,
    );

    let config = load_config_file(&path)
        .expect("Should parse valid TOML")
        .expect("File exists");

    assert_eq!(config.deck_path, Some(PathBuf::from("/tmp/cards.json")));
    assert_eq!(config.demo_card_count, Some(12));
    let swipe = config.swipe.expect("swipe table present");
    assert_eq!(swipe.throwing_threshold, Some(600.0));
    assert_eq!(swipe.snap_duration_ms, Some(120));
    assert_eq!(swipe.allow_vertical_swipes, Some(true));
    assert_eq!(swipe.max_rendered_cards, Some(3));
    assert_eq!(swipe.visible_origin, Some(Point::new(0.0, 16.0)));
    assert_eq!(swipe.refill_threshold, None);

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = temp_config("invalid", "demo_card_count = = 3");

    let result = load_config_file(&path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "got: {:?}",
        result
    );

    fs::remove_file(path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("shuffle = true");
    assert!(result.is_err());

    let result: Result<ConfigFile, _> = toml::from_str("[swipe]\nspring = 0.5");
    assert!(result.is_err());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overlays_swipe_keys_onto_defaults() {
    let file = ConfigFile {
        swipe: Some(SwipeSection {
            dismiss_animation_duration_ms: Some(400),
            freeze_interaction_while_dismissing: Some(true),
            ..SwipeSection::default()
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = SwipeOptions::default();

    assert_eq!(resolved.swipe.dismiss_animation_duration, Duration::from_millis(400));
    assert!(resolved.swipe.freeze_interaction_while_dismissing);
    assert_eq!(resolved.swipe.snap_duration, defaults.snap_duration);
    assert_eq!(resolved.swipe.throwing_threshold, defaults.throwing_threshold);
    assert_eq!(resolved.demo_card_count, DEFAULT_DEMO_CARD_COUNT);
}

#[test]
fn merge_config_takes_log_path_from_file() {
    let custom = PathBuf::from("/custom/path/to/app.log");
    let file = ConfigFile {
        log_file_path: Some(custom.clone()),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(file)).log_file_path, custom);
}

#[test]
#[serial(swipedeck_env)]
fn apply_env_overrides_respects_deck_and_log_vars() {
    let _deck = EnvGuard::new("SWIPEDECK_DECK");
    let _log = EnvGuard::new("SWIPEDECK_LOG_FILE");
    env::set_var("SWIPEDECK_DECK", "/env/deck.json");
    env::set_var("SWIPEDECK_LOG_FILE", "/env/swipedeck.log");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(resolved.deck_path, Some(PathBuf::from("/env/deck.json")));
    assert_eq!(resolved.log_file_path, PathBuf::from("/env/swipedeck.log"));
    assert_eq!(resolved.swipe, SwipeOptions::default());
}

#[test]
#[serial(swipedeck_env)]
fn apply_env_overrides_no_change_when_unset() {
    let _deck = EnvGuard::new("SWIPEDECK_DECK");
    let _log = EnvGuard::new("SWIPEDECK_LOG_FILE");

    let defaults = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(defaults.clone()), defaults);
}

#[test]
#[serial(swipedeck_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new("SWIPEDECK_CONFIG");
    let explicit = temp_config("explicit", "demo_card_count = 1");
    let from_env = temp_config("from_env", "demo_card_count = 2");
    env::set_var("SWIPEDECK_CONFIG", &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("loads")
        .expect("exists");
    assert_eq!(config.demo_card_count, Some(1));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(swipedeck_config)]
fn load_config_with_precedence_uses_env_var_without_explicit_path() {
    let _guard = EnvGuard::new("SWIPEDECK_CONFIG");
    let from_env = temp_config("env_only", "demo_card_count = 2");
    env::set_var("SWIPEDECK_CONFIG", &from_env);

    let config = load_config_with_precedence(None)
        .expect("loads")
        .expect("exists");
    assert_eq!(config.demo_card_count, Some(2));

    fs::remove_file(from_env).ok();
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let resolved = apply_cli_overrides(
        ResolvedConfig::default(),
        CliOverrides {
            max_rendered_cards: Some(2),
            vertical: true,
            ..CliOverrides::default()
        },
    );

    assert_eq!(resolved.swipe.max_rendered_cards, 2);
    assert!(resolved.swipe.allow_vertical_swipes);
    assert!(resolved.swipe.allow_horizontal_swipes);
    assert!(!resolved.swipe.freeze_interaction_while_dismissing);
    assert_eq!(resolved.swipe.refill_threshold, 10);
    assert_eq!(resolved.deck_path, None);
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let defaults = ResolvedConfig::default();
    assert_eq!(
        apply_cli_overrides(defaults.clone(), CliOverrides::default()),
        defaults
    );
}

#[test]
#[serial(swipedeck_env)]
fn precedence_chain_file_then_env_then_cli() {
    let _deck = EnvGuard::new("SWIPEDECK_DECK");
    let _log = EnvGuard::new("SWIPEDECK_LOG_FILE");
    env::set_var("SWIPEDECK_DECK", "/env/deck.json");

    let file = ConfigFile {
        deck_path: Some(PathBuf::from("/file/deck.json")),
        demo_card_count: Some(7),
        swipe: Some(SwipeSection {
            refill_threshold: Some(3),
            ..SwipeSection::default()
        }),
        ..ConfigFile::default()
    };

    let merged = merge_config(Some(file));
    assert_eq!(merged.deck_path, Some(PathBuf::from("/file/deck.json")));

    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.deck_path, Some(PathBuf::from("/env/deck.json")));

    let resolved = apply_cli_overrides(
        with_env,
        CliOverrides {
            deck_path: Some(PathBuf::from("/cli/deck.json")),
            refill_threshold: Some(4),
            ..CliOverrides::default()
        },
    );
    assert_eq!(resolved.deck_path, Some(PathBuf::from("/cli/deck.json")));
    assert_eq!(resolved.swipe.refill_threshold, 4);
    assert_eq!(resolved.demo_card_count, 7);
}
