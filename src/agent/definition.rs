//! The agent definition handed to the model service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::{Result, VitaeError};

/// Name, model and current instructions of the conversational agent.
///
/// Instructions are replaced before every turn. An agent can be frozen,
/// after which it keeps its last instructions and rejects updates.
#[derive(Debug)]
pub struct Agent {
    name: String,
    model: String,
    instructions: RwLock<String>,
    frozen: AtomicBool,
}

impl Agent {
    pub fn new(name: &str, model: &str, instructions: &str) -> Self {
        Self {
            name: name.to_string(),
            model: model.to_string(),
            instructions: RwLock::new(instructions.to_string()),
            frozen: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Current instruction text.
    pub fn instructions(&self) -> String {
        self.instructions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the instructions.
    ///
    /// # Errors
    /// Returns [`VitaeError::Agent`] once the agent has been frozen.
    pub fn set_instructions(&self, text: &str) -> Result<()> {
        if self.is_frozen() {
            return Err(VitaeError::Agent(format!(
                "Instructions of agent '{}' are locked",
                self.name
            )));
        }
        *self
            .instructions
            .write()
            .unwrap_or_else(PoisonError::into_inner) = text.to_string();
        Ok(())
    }

    /// Lock the instructions at their current value.
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::SeqCst);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }
}
