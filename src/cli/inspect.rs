//! Read-only inspection commands: knowledge, prompt, config.

use anyhow::{Context, Result};

use vitae::agent::PromptComposer;

use super::common::{bootstrap_knowledge, load_config};

/// Print the acquired knowledge text and the tier that produced it.
pub(crate) async fn cmd_knowledge() -> Result<()> {
    let config = load_config()?;
    let scheduler = bootstrap_knowledge(&config).await;
    let store = scheduler.store();

    if let Some(tier) = store.tier() {
        println!("Source: {}", tier);
    }
    if let Some(at) = store.last_updated() {
        println!("Acquired: {}", at.format("%Y-%m-%d %H:%M:%S"));
    }
    println!();
    println!("{}", store.get());
    Ok(())
}

/// Print the composed agent instructions.
pub(crate) async fn cmd_prompt() -> Result<()> {
    let config = load_config()?;
    let scheduler = bootstrap_knowledge(&config).await;
    let composer = PromptComposer::from_config(&config.persona, scheduler.store().clone());
    println!("{}", composer.compose());
    Ok(())
}

/// Print the effective configuration with secrets masked.
pub(crate) fn cmd_config() -> Result<()> {
    let config = load_config()?;
    let json = serde_json::to_string_pretty(&config.redacted())
        .with_context(|| "Failed to serialize configuration")?;
    println!("# {}", vitae::config::Config::path().display());
    println!("{}", json);
    Ok(())
}
