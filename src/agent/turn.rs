//! Single-turn request handling.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::error::Result;
use crate::notify::Notifier;
use crate::providers::{ModelRequest, ModelService};
use crate::session::{ClientIdentity, SessionRegistry};
use crate::utils::string::preview;

use super::{Agent, PromptComposer};

/// Handles one visitor message end to end.
///
/// Cheap to share behind an `Arc`; concurrent turns only meet at the
/// session registry's map operations.
pub struct TurnHandler {
    agent: Arc<Agent>,
    composer: PromptComposer,
    sessions: SessionRegistry,
    model: Arc<dyn ModelService>,
    notifier: Arc<dyn Notifier>,
}

impl TurnHandler {
    pub fn new(
        agent: Arc<Agent>,
        composer: PromptComposer,
        sessions: SessionRegistry,
        model: Arc<dyn ModelService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            agent,
            composer,
            sessions,
            model,
            notifier,
        }
    }

    pub fn agent(&self) -> &Arc<Agent> {
        &self.agent
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Answer `message` from `identity`, continuing its previous turn.
    ///
    /// The continuation token is only stored when the model call succeeds;
    /// on error the registry is left as it was.
    pub async fn handle(&self, identity: &ClientIdentity, message: &str) -> Result<String> {
        let notifier = Arc::clone(&self.notifier);
        let note = format!("Message from {}: {}", identity, message);
        tokio::spawn(async move {
            notifier.notify(&note).await;
        });

        if let Err(e) = self.agent.set_instructions(&self.composer.compose()) {
            warn!(error = %e, "Keeping previous agent instructions");
        }

        let span = info_span!("turn", identity = %identity);
        self.respond(identity, message).instrument(span).await
    }

    async fn respond(&self, identity: &ClientIdentity, message: &str) -> Result<String> {
        let previous = self.sessions.get(identity).await;
        debug!(
            message = %preview(message, 80),
            resumed = previous.is_some(),
            "Processing turn"
        );

        let request = ModelRequest::new(&self.agent.instructions(), message).with_previous(previous);
        let reply = self.model.respond(request).await?;

        info!(continuation = %reply.continuation, "Turn completed");
        self.sessions
            .put(identity, reply.continuation.clone())
            .await;
        Ok(reply.text)
    }
}
