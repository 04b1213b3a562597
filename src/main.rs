//! swipedeck - Entry Point

use clap::Parser;
use std::path::PathBuf;
use swipedeck::config::{self, CliOverrides};
use swipedeck::model::AppError;
use tracing::info;

/// swipedeck - swipe through a stack of cards in the terminal
#[derive(Parser, Debug)]
#[command(name = "swipedeck")]
#[command(version)]
#[command(about = "Drag cards left or right (or up and down) to dismiss them")]
pub struct Args {
    /// JSON deck of cards (generated cards if not provided)
    pub deck: Option<PathBuf>,

    /// Cards per generated batch
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Most cards materialized at once
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_rendered: Option<u64>,

    /// Ask for more cards once this many or fewer are left
    #[arg(long)]
    pub refill_threshold: Option<usize>,

    /// Also allow swiping up and down
    #[arg(long)]
    pub vertical: bool,

    /// Ignore input while a card is flying out
    #[arg(long)]
    pub freeze: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            deck_path: self.deck.clone(),
            demo_card_count: self.count.map(|count| count as usize),
            max_rendered_cards: self.max_rendered.map(|max| max as usize),
            refill_threshold: self.refill_threshold,
            vertical: self.vertical,
            freeze: self.freeze,
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.overrides())
    };

    swipedeck::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = swipedeck::source::detect_card_source(
        config.deck_path.clone(),
        config.demo_card_count,
    )?;

    swipedeck::view::run_with_source(source, config.swipe)?;

    info!("Exiting");
    Ok(())
}
