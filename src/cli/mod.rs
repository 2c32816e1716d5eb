//! CLI module: command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod chat;
pub mod common;
pub mod inspect;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vitae")]
#[command(version)]
#[command(about = "Career conversation agent backed by a live profile page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the persona agent
    Chat {
        /// Client identity to chat as (defaults to "unknown")
        #[arg(long)]
        identity: Option<String>,
        /// Direct message to process (non-interactive mode)
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Acquire the profile text and print it with its source tier
    Knowledge,
    /// Print the composed agent instructions
    Prompt,
    /// Print the effective configuration (secrets redacted)
    Config,
}

pub async fn run() -> Result<()> {
    // Respect the configured logging settings; defaults if the config is unusable.
    let logging_cfg = vitae::config::Config::load()
        .map(|c| c.logging)
        .unwrap_or_default();
    vitae::utils::logging::init_logging(&logging_cfg)?;

    let cli = Cli::parse();

    match cli.command {
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
        }
        Some(Commands::Chat { identity, message }) => {
            chat::cmd_chat(identity, message).await?;
        }
        Some(Commands::Knowledge) => {
            inspect::cmd_knowledge().await?;
        }
        Some(Commands::Prompt) => {
            inspect::cmd_prompt().await?;
        }
        Some(Commands::Config) => {
            inspect::cmd_config()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_chat() {
        let cli = Cli::try_parse_from(["vitae", "chat", "--identity", "203.0.113.5", "-m", "hi"])
            .unwrap();
        match cli.command {
            Some(Commands::Chat { identity, message }) => {
                assert_eq!(identity.as_deref(), Some("203.0.113.5"));
                assert_eq!(message.as_deref(), Some("hi"));
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn test_cli_parses_inspection_commands() {
        assert!(matches!(
            Cli::try_parse_from(["vitae", "knowledge"]).unwrap().command,
            Some(Commands::Knowledge)
        ));
        assert!(matches!(
            Cli::try_parse_from(["vitae", "prompt"]).unwrap().command,
            Some(Commands::Prompt)
        ));
        assert!(matches!(
            Cli::try_parse_from(["vitae", "config"]).unwrap().command,
            Some(Commands::Config)
        ));
    }

    #[test]
    fn test_cli_verifies() {
        Cli::command().debug_assert();
    }
}
