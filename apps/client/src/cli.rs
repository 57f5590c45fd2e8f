//! Command line arguments

use clap::Parser;
use trivia_core::Difficulty;

use crate::config::ClientConfig;

/// CLI arguments for the trivia game
#[derive(Parser, Debug, Default)]
#[command(name = "trivia")]
#[command(author, version, about = "Terminal trivia game backed by the Open Trivia Database")]
#[command(long_about = r#"
Play a round of trivia questions in the terminal.

Questions are fetched from the Open Trivia Database. Settings can be given
on the command line, through environment variables, or in a .env file:

  TRIVIA_API_URL          API endpoint
  TRIVIA_AMOUNT           Questions per game (1-50)
  TRIVIA_TIMEOUT_SECS     HTTP request timeout
  TRIVIA_REVEAL_DELAY_MS  Pause after each answer

Example:
  trivia
  trivia --category 18 --difficulty hard --amount 5
"#)]
pub struct Cli {
    /// Number of questions per game
    #[arg(short, long, value_name = "N")]
    pub amount: Option<u32>,

    /// Category id (e.g. 9 = General Knowledge, 18 = Computers)
    #[arg(short, long, value_name = "ID")]
    pub category: Option<u32>,

    /// Difficulty: easy, medium or hard
    #[arg(short, long, value_name = "LEVEL", value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Trivia API endpoint
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply command line overrides on top of `config`.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(amount) = self.amount {
            config.amount = amount;
        }
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        config
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(&s.to_lowercase())
        .ok_or_else(|| format!("unknown difficulty '{}', expected easy, medium or hard", s))
}
