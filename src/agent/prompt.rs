//! Instruction composer for the persona agent.
//!
//! Renders fixed persona rules followed by the current knowledge snapshot.

use crate::config::PersonaConfig;
use crate::knowledge::KnowledgeStore;

const ALLOWED_TOPICS: &str = r#"# Allowed Topics
- Career journey, roles, and professional growth
- Project outcomes, business impact, and delivered value
- Achievements, awards, and recognition
- Education, certifications, and credentials
- High-level skills and technology expertise (what you've worked with, not how)
- Work interests, availability, and engagement preferences
- Contact information and next steps for opportunities

"#;

const STRICT_BOUNDARIES: &str = r#"# Strict Boundaries: Politely Decline These
- **Technical how-to**: Code snippets, debugging, commands, configurations, API usage, implementation details
- **Architecture walkthroughs**: System designs, component diagrams, data flows, repository tours, file structures
- **Technical tutorials**: Step-by-step guides, library comparisons, tool configurations
- **Generic advice**: Career guidance unrelated to your own experience

"#;

const OUT_OF_SCOPE: &str = r#"# Handling Out-of-Scope Requests
When asked about restricted topics:
1. Acknowledge the topic gracefully without providing restricted content
2. Pivot to relevant career context: "I've delivered solutions using [technology], for example [outcome/impact]"
3. Offer to connect: "For deeper technical discussions, I'd welcome a conversation. Feel free to reach out."
4. Use `record_unknown_question` tool to log the query
5. Use `record_user_details` tool when contact follow-up is appropriate

"#;

const COMMUNICATION_STYLE: &str = r#"# Communication Style
- **Professional & confident**: Senior-level presence without arrogance
- **Concise & impactful**: Lead with outcomes and business value
- **Engaging**: Build rapport while maintaining focus
- **Action-oriented**: Naturally guide toward opportunities and contact when relevant
"#;

/// Builds the agent's instruction text.
///
/// # Example
///
/// ```rust
/// use vitae::agent::PromptComposer;
/// use vitae::knowledge::KnowledgeStore;
///
/// let store = KnowledgeStore::new();
/// store.set("Ten years of Rust.");
///
/// let composer = PromptComposer::new("Ada Lovelace", store);
/// let prompt = composer.compose();
/// assert!(prompt.starts_with("# Identity\nYou ARE Ada Lovelace"));
/// assert!(prompt.contains("# Professional Summary\nTen years of Rust."));
/// ```
#[derive(Debug, Clone)]
pub struct PromptComposer {
    name: String,
    store: KnowledgeStore,
}

impl PromptComposer {
    pub fn new(name: &str, store: KnowledgeStore) -> Self {
        Self {
            name: name.to_string(),
            store,
        }
    }

    pub fn from_config(persona: &PersonaConfig, store: KnowledgeStore) -> Self {
        Self::new(&persona.name, store)
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Render the full instructions from the persona and current knowledge.
    ///
    /// Reads the store once; composing again without a refresh in between
    /// gives the same string.
    pub fn compose(&self) -> String {
        let summary = self.store.get();

        let mut prompt = String::with_capacity(2048 + summary.len());
        prompt.push_str(&format!(
            "# Identity\nYou ARE {}, speaking in first person. You represent yourself \
             authentically to recruiters, hiring managers, and potential clients.\n\n",
            self.name
        ));
        prompt.push_str(ALLOWED_TOPICS);
        prompt.push_str(STRICT_BOUNDARIES);
        prompt.push_str(OUT_OF_SCOPE);
        prompt.push_str(COMMUNICATION_STYLE);
        prompt.push_str(&format!("\n\n# Professional Summary\n{}\n\n", summary));
        prompt.push_str(&format!(
            "---\nEngage with visitors as {}, staying fully in character throughout the conversation.",
            self.name
        ));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer(summary: &str) -> PromptComposer {
        let store = KnowledgeStore::new();
        store.set(summary);
        PromptComposer::new("Rajeswaran Dhandapani", store)
    }

    #[test]
    fn test_compose_block_order() {
        let prompt = composer("Full stack developer.").compose();

        let order = [
            "# Identity",
            "# Allowed Topics",
            "# Strict Boundaries",
            "# Handling Out-of-Scope Requests",
            "# Communication Style",
            "# Professional Summary",
            "---\nEngage with visitors as Rajeswaran Dhandapani",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|marker| prompt.find(marker).unwrap_or_else(|| panic!("missing {}", marker)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_compose_names_tools() {
        let prompt = composer("x").compose();
        assert!(prompt.contains("`record_unknown_question`"));
        assert!(prompt.contains("`record_user_details`"));
    }

    #[test]
    fn test_compose_is_idempotent_without_refresh() {
        let composer = composer("Stable summary.");
        assert_eq!(composer.compose(), composer.compose());
    }

    #[test]
    fn test_compose_reflects_refresh() {
        let composer = composer("Old summary.");
        let before = composer.compose();

        composer.store().set("New summary.");
        let after = composer.compose();

        assert_ne!(before, after);
        assert!(after.contains("# Professional Summary\nNew summary.\n\n---"));
        assert!(!after.contains("Old summary."));
    }

    #[test]
    fn test_from_config_uses_persona_name() {
        let persona = PersonaConfig {
            name: "Grace Hopper".into(),
            ..Default::default()
        };
        let composer = PromptComposer::from_config(&persona, KnowledgeStore::new());
        assert!(composer.compose().contains("You ARE Grace Hopper"));
    }
}
