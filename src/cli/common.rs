//! Shared wiring for CLI commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use vitae::agent::{Agent, PromptComposer, TurnHandler};
use vitae::config::Config;
use vitae::knowledge::{KnowledgePipeline, KnowledgeStore, RefreshScheduler};
use vitae::notify;
use vitae::providers::OpenAIResponsesProvider;
use vitae::session::SessionRegistry;
use vitae::tools::persona_tools;

/// Load configuration, with context for the CLI.
pub(crate) fn load_config() -> Result<Config> {
    Config::load().with_context(|| format!("Failed to load configuration from {:?}", Config::path()))
}

/// Build the scheduler and run the first acquisition.
///
/// The returned scheduler's store is populated but its loop is not started.
pub(crate) async fn bootstrap_knowledge(config: &Config) -> RefreshScheduler {
    let scheduler = RefreshScheduler::new(
        KnowledgePipeline::from_config(config),
        KnowledgeStore::new(),
        Duration::from_secs(config.knowledge.refresh_interval_secs),
    );
    scheduler.bootstrap().await;
    scheduler
}

/// Wire a turn handler around an already bootstrapped store.
pub(crate) fn create_handler(config: &Config, store: KnowledgeStore) -> Result<TurnHandler> {
    let notifier = notify::from_config(&config.notify);
    let tools = Arc::new(persona_tools(Arc::clone(&notifier)));

    let provider = OpenAIResponsesProvider::from_config(&config.provider)
        .with_context(|| "Failed to configure the OpenAI provider")?
        .with_tools(tools);

    let composer = PromptComposer::from_config(&config.persona, store);
    let agent = Arc::new(Agent::new(
        &config.persona.agent_name,
        provider.model(),
        &composer.compose(),
    ));

    info!(
        agent = %agent.name(),
        model = %agent.model(),
        "Agent ready"
    );

    Ok(TurnHandler::new(
        agent,
        composer,
        SessionRegistry::from_config(&config.sessions),
        Arc::new(provider),
        notifier,
    ))
}
