//! Worduel - server binary
//!
//! Serves solo, adversarial and two-player word-duel games over WebSocket.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use worduel::server::Server;
use worduel::words::WordSet;

#[derive(Parser)]
#[command(
    name = "worduel",
    about = "Word-duel game server: solo, adversarial and head-to-head play over WebSocket",
    version
)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3001")]
    addr: String,

    /// Path to a custom word list (one five-letter word per line);
    /// defaults to the embedded list
    #[arg(short = 'w', long)]
    wordlist: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worduel=info")),
        )
        .init();

    let cli = Cli::parse();

    let words = match &cli.wordlist {
        Some(path) => WordSet::from_file(path)?,
        None => WordSet::embedded(),
    };
    tracing::info!(words = words.len(), "word list loaded");

    let server = Server::bind(&cli.addr, words).await?;
    server.run().await?;
    Ok(())
}
