//! Configuration type definitions for Vitae
//!
//! This module defines all configuration structs used throughout the crate.
//! All types implement serde traits for JSON serialization and have sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration struct for Vitae
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Who the agent speaks as and where its profile lives
    pub persona: PersonaConfig,
    /// Knowledge acquisition and refresh settings
    pub knowledge: KnowledgeConfig,
    /// Continuation-token registry bounds
    pub sessions: SessionsConfig,
    /// Model service configuration
    pub provider: ProviderConfig,
    /// Side-channel notification configuration
    pub notify: NotifyConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

// ============================================================================
// Persona Configuration
// ============================================================================

/// The persona the agent represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Display name used in the identity block of the instructions
    pub name: String,
    /// Public profile page the knowledge text is derived from
    pub website_url: String,
    /// Name of the agent definition reported to the model service
    pub agent_name: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Rajeswaran Dhandapani".to_string(),
            website_url: "https://rajeswarandhandapani.com/".to_string(),
            agent_name: "Career Conversation Agent".to_string(),
        }
    }
}

// ============================================================================
// Knowledge Configuration
// ============================================================================

/// Knowledge pipeline and refresh scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Backup profile text file. Defaults to `~/.vitae/profile/summary.txt`.
    pub backup_path: Option<String>,
    /// Timeout for the live page fetch, in seconds
    pub fetch_timeout_secs: u64,
    /// Interval between background refreshes, in seconds
    pub refresh_interval_secs: u64,
    /// Maximum bytes read from the live page body
    pub max_fetch_bytes: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            backup_path: None,
            fetch_timeout_secs: 10,
            refresh_interval_secs: 3600,
            max_fetch_bytes: 2 * 1024 * 1024,
        }
    }
}

// ============================================================================
// Sessions Configuration
// ============================================================================

/// Optional bounds on the continuation-token registry.
///
/// Both default to `None`: entries live for the whole process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Forget a client's token this many seconds after it was written
    pub ttl_secs: Option<u64>,
    /// Evict the oldest-written entry once this many clients are tracked
    pub max_entries: Option<usize>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Model service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key for the model service
    pub api_key: Option<String>,
    /// API base URL
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Upper bound on tool-call round trips within one turn
    pub max_tool_iterations: u32,
    /// Request timeout, in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-5-mini".to_string(),
            max_tool_iterations: 10,
            timeout_secs: 120,
        }
    }
}

// ============================================================================
// Notify Configuration
// ============================================================================

/// Pushover notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// When false, notifications are only written to the log
    pub enabled: bool,
    /// Pushover application token
    pub pushover_token: Option<String>,
    /// Pushover user key
    pub pushover_user: Option<String>,
    /// Request timeout, in seconds
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pushover_token: None,
            pushover_user: None,
            timeout_secs: 10,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, coloured
    Pretty,
    /// Compact single-line text with a `component` field where tagged
    #[default]
    Component,
    /// JSON lines for log aggregators
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Append JSON logs to this file instead of stderr
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Component,
            level: "info".to_string(),
            file: None,
        }
    }
}
