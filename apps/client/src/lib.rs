pub mod cli;
pub mod config;
pub mod fetcher;
pub mod game;
pub mod terminal;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trivia_core::GameSettings;

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::fetcher::{HttpTransport, QuestionFetcher, MAX_AMOUNT};
use crate::game::Game;
use crate::terminal::Terminal;

pub use game::{LoadOutcome, PresentedQuestion};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they stay out of the game on stdout. With no `-v`
/// flags the filter comes from `RUST_LOG`, falling back to `warn`.
pub fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        1 => "info".into(),
        2 => "debug".into(),
        _ => "trace".into(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let config = cli.apply(ClientConfig::from_env()?);
    anyhow::ensure!(
        (1..=MAX_AMOUNT).contains(&config.amount),
        "amount must be between 1 and {}, got {}",
        MAX_AMOUNT,
        config.amount
    );
    tracing::info!(api_url = %config.api_url, amount = config.amount, "starting trivia");

    let transport = HttpTransport::new(config.timeout).context("failed to build HTTP client")?;
    let fetcher = QuestionFetcher::new(Arc::new(transport), config.api_url.clone())
        .with_amount(config.amount);

    let game = Game::with_settings(fetcher, GameSettings::new(cli.category, cli.difficulty));

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut terminal =
        Terminal::new(game, input, std::io::stdout()).with_reveal_delay(config.reveal_delay);
    terminal.run().await
}
