//! Chat command handler (interactive + one-shot).

use std::io::{self, BufRead, Write};

use anyhow::Result;

use vitae::session::ClientIdentity;

use super::common::{bootstrap_knowledge, create_handler, load_config};

/// Interactive or single-message chat as `identity`.
pub(crate) async fn cmd_chat(identity: Option<String>, message: Option<String>) -> Result<()> {
    let config = load_config()?;

    let scheduler = bootstrap_knowledge(&config).await;
    let handler = create_handler(&config, scheduler.store().clone())?;
    scheduler.start().await?;

    let identity = identity
        .map(ClientIdentity::new)
        .unwrap_or_else(ClientIdentity::unknown);

    if let Some(msg) = message {
        match handler.handle(&identity, &msg).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    println!("Chatting with {}", config.persona.name);
    println!("Type your message and press Enter. Type 'quit' or 'exit' to stop.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "quit" || input == "exit" {
                    println!("Goodbye!");
                    break;
                }

                match handler.handle(&identity, input).await {
                    Ok(reply) => {
                        println!();
                        println!("{}", reply);
                        println!();
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        eprintln!();
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }

    scheduler.stop().await;
    Ok(())
}
