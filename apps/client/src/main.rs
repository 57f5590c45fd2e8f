use clap::Parser;
use trivia_client::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trivia_client::run(Cli::parse()).await
}
