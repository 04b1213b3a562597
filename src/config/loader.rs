//! Configuration file loading with precedence handling.

use crate::model::{Point, SwipeOptions};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Number of generated cards when no deck file is given.
pub const DEFAULT_DEMO_CARD_COUNT: usize = 20;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; missing ones keep their defaults.
/// Corresponds to `~/.config/swipedeck/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// JSON deck to load cards from.
    #[serde(default)]
    pub deck_path: Option<PathBuf>,

    /// Number of generated cards per batch when no deck is given.
    #[serde(default)]
    pub demo_card_count: Option<usize>,

    /// Swipe stack tuning.
    #[serde(default)]
    pub swipe: Option<SwipeSection>,
}

/// `[swipe]` table, mirroring [`SwipeOptions`].
///
/// ```toml
/// [swipe]
/// throwing_threshold = 600.0
/// snap_duration_ms = 120
/// allow_vertical_swipes = true
/// visible_origin = { x = 0.0, y = 16.0 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SwipeSection {
    /// Release speed, in points per second, that always dismisses.
    #[serde(default)]
    pub throwing_threshold: Option<f64>,
    /// Snap-back animation length.
    #[serde(default)]
    pub snap_duration_ms: Option<u64>,
    /// Dismiss animation length.
    #[serde(default)]
    pub dismiss_animation_duration_ms: Option<u64>,
    /// Accept left/right drags.
    #[serde(default)]
    pub allow_horizontal_swipes: Option<bool>,
    /// Accept up/down drags.
    #[serde(default)]
    pub allow_vertical_swipes: Option<bool>,
    /// Fraction of the width a slow drag must travel to dismiss.
    #[serde(default)]
    pub horizontal_pan_threshold: Option<f64>,
    /// Fraction of the height a slow drag must travel to dismiss.
    #[serde(default)]
    pub vertical_pan_threshold: Option<f64>,
    /// Cards materialized at once.
    #[serde(default)]
    pub max_rendered_cards: Option<usize>,
    /// Remaining count at or below which a refill is requested.
    #[serde(default)]
    pub refill_threshold: Option<usize>,
    /// Ignore drags until a dismissal finishes.
    #[serde(default)]
    pub freeze_interaction_while_dismissing: Option<bool>,
    /// Keep the last undoable card.
    #[serde(default)]
    pub allow_undo: Option<bool>,
    /// Resting origin of the top card, in points.
    #[serde(default)]
    pub visible_origin: Option<Point>,
}

impl SwipeSection {
    /// Overlay the keys present in this table onto `options`.
    pub fn apply_to(self, options: SwipeOptions) -> SwipeOptions {
        SwipeOptions {
            throwing_threshold: self.throwing_threshold.unwrap_or(options.throwing_threshold),
            snap_duration: self
                .snap_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(options.snap_duration),
            dismiss_animation_duration: self
                .dismiss_animation_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(options.dismiss_animation_duration),
            allow_horizontal_swipes: self
                .allow_horizontal_swipes
                .unwrap_or(options.allow_horizontal_swipes),
            allow_vertical_swipes: self
                .allow_vertical_swipes
                .unwrap_or(options.allow_vertical_swipes),
            horizontal_pan_threshold: self
                .horizontal_pan_threshold
                .unwrap_or(options.horizontal_pan_threshold),
            vertical_pan_threshold: self
                .vertical_pan_threshold
                .unwrap_or(options.vertical_pan_threshold),
            max_rendered_cards: self.max_rendered_cards.unwrap_or(options.max_rendered_cards),
            refill_threshold: self.refill_threshold.unwrap_or(options.refill_threshold),
            freeze_interaction_while_dismissing: self
                .freeze_interaction_while_dismissing
                .unwrap_or(options.freeze_interaction_while_dismissing),
            allow_undo: self.allow_undo.unwrap_or(options.allow_undo),
            visible_origin: self.visible_origin.unwrap_or(options.visible_origin),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Options handed to the engine.
    pub swipe: SwipeOptions,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Deck file, or `None` for generated cards.
    pub deck_path: Option<PathBuf>,
    /// Generated cards per batch.
    pub demo_card_count: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            swipe: SwipeOptions::default(),
            log_file_path: default_log_path(),
            deck_path: None,
            demo_card_count: DEFAULT_DEMO_CARD_COUNT,
        }
    }
}

/// Overrides collected from the command line.
///
/// `None` / `false` means "not given" and leaves the resolved value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Positional deck path.
    pub deck_path: Option<PathBuf>,
    /// `--count`
    pub demo_card_count: Option<usize>,
    /// `--max-rendered`
    pub max_rendered_cards: Option<usize>,
    /// `--refill-threshold`
    pub refill_threshold: Option<usize>,
    /// `--vertical`
    pub vertical: bool,
    /// `--freeze`
    pub freeze: bool,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/swipedeck/swipedeck.log` on Unix-like systems.
/// Falls back to the current directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("swipedeck").join("swipedeck.log")
    } else {
        PathBuf::from("swipedeck.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (use defaults).
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path, `~/.config/swipedeck/config.toml` on Unix.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("swipedeck").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SWIPEDECK_CONFIG` environment variable
/// 3. Default path `~/.config/swipedeck/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("SWIPEDECK_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// - `SWIPEDECK_DECK`: deck file path
/// - `SWIPEDECK_LOG_FILE`: log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(deck) = std::env::var("SWIPEDECK_DECK") {
        config.deck_path = Some(PathBuf::from(deck));
    }

    if let Ok(log_file) = std::env::var("SWIPEDECK_LOG_FILE") {
        config.log_file_path = PathBuf::from(log_file);
    }

    config
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        swipe: match config.swipe {
            Some(section) => section.apply_to(defaults.swipe),
            None => defaults.swipe,
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        deck_path: config.deck_path.or(defaults.deck_path),
        demo_card_count: config.demo_card_count.unwrap_or(defaults.demo_card_count),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(deck) = cli.deck_path {
        config.deck_path = Some(deck);
    }

    if let Some(count) = cli.demo_card_count {
        config.demo_card_count = count;
    }

    if let Some(max) = cli.max_rendered_cards {
        config.swipe.max_rendered_cards = max;
    }

    if let Some(threshold) = cli.refill_threshold {
        config.swipe.refill_threshold = threshold;
    }

    if cli.vertical {
        config.swipe.allow_vertical_swipes = true;
    }

    if cli.freeze {
        config.swipe.freeze_interaction_while_dismissing = true;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
