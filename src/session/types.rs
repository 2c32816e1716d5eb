//! Session key and token types.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Identity used when the transport reveals nothing about the client.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Who is talking, as far as the transport can tell.
///
/// Only ever used as a registry key; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derive an identity from request metadata.
    ///
    /// Prefers the `X-Forwarded-For` header value as sent (the whole value,
    /// proxies included), then the direct peer address, then
    /// [`UNKNOWN_IDENTITY`].
    ///
    /// # Example
    /// ```
    /// use vitae::session::ClientIdentity;
    ///
    /// let id = ClientIdentity::from_transport(Some("203.0.113.5"), Some("10.0.0.1".parse().unwrap()));
    /// assert_eq!(id.as_str(), "203.0.113.5");
    ///
    /// assert_eq!(ClientIdentity::from_transport(None, None).as_str(), "unknown");
    /// ```
    pub fn from_transport(forwarded_for: Option<&str>, peer: Option<IpAddr>) -> Self {
        if let Some(forwarded) = forwarded_for.map(str::trim).filter(|v| !v.is_empty()) {
            return Self(forwarded.to_string());
        }
        match peer {
            Some(addr) => Self(addr.to_string()),
            None => Self::unknown(),
        }
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_IDENTITY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque handle issued by the model service that resumes a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContinuationToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_header_wins() {
        let id = ClientIdentity::from_transport(
            Some(" 203.0.113.5, 198.51.100.7 "),
            Some("10.0.0.1".parse().unwrap()),
        );
        assert_eq!(id.as_str(), "203.0.113.5, 198.51.100.7");
    }

    #[test]
    fn test_blank_header_falls_back_to_peer() {
        let id = ClientIdentity::from_transport(Some("  "), Some("10.0.0.1".parse().unwrap()));
        assert_eq!(id.as_str(), "10.0.0.1");
    }

    #[test]
    fn test_ipv6_peer() {
        let id = ClientIdentity::from_transport(None, Some("::1".parse().unwrap()));
        assert_eq!(id.as_str(), "::1");
    }

    #[test]
    fn test_nothing_known() {
        assert_eq!(ClientIdentity::from_transport(None, None), ClientIdentity::unknown());
        assert_eq!(ClientIdentity::unknown().to_string(), UNKNOWN_IDENTITY);
    }

    #[test]
    fn test_token_display() {
        let token = ContinuationToken::from("resp_123");
        assert_eq!(token.to_string(), "resp_123");
        assert_eq!(token.as_str(), "resp_123");
    }
}
