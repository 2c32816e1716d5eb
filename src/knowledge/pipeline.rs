//! Knowledge acquisition with an ordered fallback chain.
//!
//! Each tier is a [`KnowledgeSource`]. The pipeline tries them in order and
//! falls back to the compiled-in [`DEFAULT_PROFILE`], so acquisition itself
//! never fails.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, VitaeError};

use super::extract::extract_profile_text;

const FETCH_USER_AGENT: &str = concat!("vitae/", env!("CARGO_PKG_VERSION"));

/// Compiled-in profile used when neither the live page nor the backup file
/// can be read.
pub const DEFAULT_PROFILE: &str = "My name is Rajeswaran Dhandapani. I'm a Full stack developer with 12+ years of experience developing and designing web applications. Proficient in various programming languages and frameworks, including Java, JavaScript, Angular, Spring Boot and Kafka. Robust front-end and back-end development skills, focusing on creating intuitive and user-friendly interfaces. Experienced in agile environments, collaborating with crossfunctional teams, and overseeing code reviews.
I love all foods, particularly Indian food and desserts. I enjoy playing cricket and badminton, and I am a fan of the Chennai Super Kings IPL team.
My current goal is to become an AI application developer by leveraging my existing skills and experience. I am actively working towards this goal, and one example of my progress is this AI-enabled chatbot.";

/// Where a piece of knowledge text came from, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTier {
    /// Fetched and normalized from the live profile page
    LiveFetch,
    /// Read verbatim from the backup file
    LocalFile,
    /// The compiled-in default profile
    HardcodedDefault,
}

impl fmt::Display for FallbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiveFetch => write!(f, "live_fetch"),
            Self::LocalFile => write!(f, "local_file"),
            Self::HardcodedDefault => write!(f, "hardcoded_default"),
        }
    }
}

/// Knowledge text together with the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    pub tier: FallbackTier,
    pub text: String,
}

/// One step of the fallback chain.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Tier reported when this source succeeds.
    fn tier(&self) -> FallbackTier;

    /// Produce knowledge text, or an error to fall through to the next tier.
    async fn acquire(&self) -> Result<String>;
}

// ============================================================================
// Live fetch
// ============================================================================

/// Fetches the profile page over HTTP and normalizes it to one line of text.
pub struct LiveFetchSource {
    url: String,
    client: Client,
    max_bytes: usize,
}

impl LiveFetchSource {
    /// Create a live source with the given request timeout.
    pub fn new(url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .user_agent(FETCH_USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            url: url.to_string(),
            client,
            max_bytes: 2 * 1024 * 1024,
        }
    }

    /// Cap the number of body bytes read from the page.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes.max(1);
        self
    }
}

#[async_trait]
impl KnowledgeSource for LiveFetchSource {
    fn tier(&self) -> FallbackTier {
        FallbackTier::LiveFetch
    }

    async fn acquire(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = read_body_limited(response, self.max_bytes).await?;

        let text = extract_profile_text(&body);
        if text.is_empty() {
            return Err(VitaeError::Acquisition(format!(
                "page at {} contained no text",
                self.url
            )));
        }
        Ok(text)
    }
}

/// Read a response body in chunks, stopping once `max_bytes` are buffered.
///
/// The body is decoded as UTF-8 whatever charset the response declares;
/// invalid sequences (including a multi-byte character cut by the limit)
/// become U+FFFD.
async fn read_body_limited(mut response: reqwest::Response, max_bytes: usize) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        let remaining = max_bytes.saturating_sub(buf.len());
        let take = chunk.len().min(remaining);
        buf.extend_from_slice(&chunk[..take]);
        if buf.len() >= max_bytes {
            debug!(max_bytes, "Profile page truncated at byte limit");
            break;
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ============================================================================
// Local file
// ============================================================================

/// Reads the backup profile file verbatim.
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KnowledgeSource for LocalFileSource {
    fn tier(&self) -> FallbackTier {
        FallbackTier::LocalFile
    }

    async fn acquire(&self) -> Result<String> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Err(VitaeError::Acquisition(format!(
                "backup file {} is empty",
                self.path.display()
            )));
        }
        Ok(content)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Ordered fallback chain ending in a compiled-in default.
pub struct KnowledgePipeline {
    sources: Vec<Box<dyn KnowledgeSource>>,
    default_text: String,
}

impl KnowledgePipeline {
    /// An empty chain: acquisition yields the default profile.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            default_text: DEFAULT_PROFILE.to_string(),
        }
    }

    /// The standard chain: live page, then backup file, then default.
    pub fn from_config(config: &Config) -> Self {
        let live = LiveFetchSource::new(
            &config.persona.website_url,
            Duration::from_secs(config.knowledge.fetch_timeout_secs),
        )
        .with_max_bytes(config.knowledge.max_fetch_bytes);

        Self::new()
            .with_source(Box::new(live))
            .with_source(Box::new(LocalFileSource::new(config.backup_path())))
    }

    /// Append a source to the end of the chain.
    pub fn with_source(mut self, source: Box<dyn KnowledgeSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Replace the terminal default text.
    pub fn with_default_text(mut self, text: &str) -> Self {
        self.default_text = text.to_string();
        self
    }

    /// Number of fallible tiers before the default.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Run the chain. Never fails.
    pub async fn acquire(&self) -> Acquired {
        for source in &self.sources {
            match source.acquire().await {
                Ok(text) => {
                    info!(tier = %source.tier(), chars = text.len(), "Knowledge acquired");
                    return Acquired {
                        tier: source.tier(),
                        text,
                    };
                }
                Err(e) => {
                    warn!(tier = %source.tier(), error = %e, "Knowledge tier failed, falling back");
                }
            }
        }

        info!(tier = %FallbackTier::HardcodedDefault, "Knowledge acquired");
        Acquired {
            tier: FallbackTier::HardcodedDefault,
            text: self.default_text.clone(),
        }
    }
}

impl Default for KnowledgePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct FixedSource {
        tier: FallbackTier,
        result: std::result::Result<&'static str, &'static str>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl KnowledgeSource for FixedSource {
        fn tier(&self) -> FallbackTier {
            self.tier
        }

        async fn acquire(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .map(str::to_string)
                .map_err(|e| VitaeError::Acquisition(e.to_string()))
        }
    }

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/", addr)
    }

    /// A URL on a port nothing listens on.
    async fn dead_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/", addr)
    }

    #[test]
    fn test_tier_order_and_display() {
        assert!(FallbackTier::LiveFetch < FallbackTier::LocalFile);
        assert!(FallbackTier::LocalFile < FallbackTier::HardcodedDefault);
        assert_eq!(FallbackTier::LiveFetch.to_string(), "live_fetch");
        assert_eq!(
            FallbackTier::HardcodedDefault.to_string(),
            "hardcoded_default"
        );
    }

    #[tokio::test]
    async fn test_first_success_wins_and_later_tiers_untouched() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let pipeline = KnowledgePipeline::new()
            .with_source(Box::new(FixedSource {
                tier: FallbackTier::LiveFetch,
                result: Ok("live text"),
                calls: Arc::new(AtomicUsize::new(0)),
            }))
            .with_source(Box::new(FixedSource {
                tier: FallbackTier::LocalFile,
                result: Ok("file text"),
                calls: Arc::clone(&later_calls),
            }));

        let acquired = pipeline.acquire().await;
        assert_eq!(acquired.tier, FallbackTier::LiveFetch);
        assert_eq!(acquired.text, "live text");
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_in_order() {
        let pipeline = KnowledgePipeline::new()
            .with_source(Box::new(FixedSource {
                tier: FallbackTier::LiveFetch,
                result: Err("timeout"),
                calls: Arc::new(AtomicUsize::new(0)),
            }))
            .with_source(Box::new(FixedSource {
                tier: FallbackTier::LocalFile,
                result: Ok("file text"),
                calls: Arc::new(AtomicUsize::new(0)),
            }));

        let acquired = pipeline.acquire().await;
        assert_eq!(acquired.tier, FallbackTier::LocalFile);
        assert_eq!(acquired.text, "file text");
    }

    #[tokio::test]
    async fn test_empty_chain_yields_default() {
        let acquired = KnowledgePipeline::new().acquire().await;
        assert_eq!(acquired.tier, FallbackTier::HardcodedDefault);
        assert_eq!(acquired.text, DEFAULT_PROFILE);
    }

    #[tokio::test]
    async fn test_live_fetch_normalizes_page() {
        let url = serve_once(
            "200 OK",
            "<html><body>\n<h1>Jane  Doe</h1>\n<p>Work: <a href=\"https://x.com\">Portfolio</a></p>\n<script>var a = 1;</script></body></html>",
        )
        .await;

        let text = LiveFetchSource::new(&url, Duration::from_secs(5))
            .acquire()
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe Work: Portfolio (https://x.com)");
    }

    #[tokio::test]
    async fn test_live_fetch_decodes_utf8_text() {
        let url = serve_once(
            "200 OK",
            "<html><body><h1>Zoë Müller</h1><p>Based in Zürich, café regular</p></body></html>",
        )
        .await;

        let text = LiveFetchSource::new(&url, Duration::from_secs(5))
            .acquire()
            .await
            .unwrap();
        assert_eq!(text, "Zoë Müller Based in Zürich, café regular");
    }

    #[tokio::test]
    async fn test_live_fetch_error_status_fails() {
        let url = serve_once("503 Service Unavailable", "<p>down</p>").await;
        let result = LiveFetchSource::new(&url, Duration::from_secs(5))
            .acquire()
            .await;
        assert!(matches!(result, Err(VitaeError::Http(_))));
    }

    #[tokio::test]
    async fn test_live_fetch_blank_page_fails() {
        let url = serve_once("200 OK", "<html><body>   </body></html>").await;
        let result = LiveFetchSource::new(&url, Duration::from_secs(5))
            .acquire()
            .await;
        assert!(matches!(result, Err(VitaeError::Acquisition(_))));
    }

    #[tokio::test]
    async fn test_local_file_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        let content = "Line one\n\n  indented   line two\n";
        std::fs::write(&path, content).unwrap();

        let text = LocalFileSource::new(&path).acquire().await.unwrap();
        assert_eq!(text, content);
    }

    #[tokio::test]
    async fn test_local_file_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocalFileSource::new(dir.path().join("absent.txt"))
            .acquire()
            .await;
        assert!(matches!(result, Err(VitaeError::Io(_))));
    }

    #[tokio::test]
    async fn test_dead_host_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        std::fs::write(&path, "backup profile\nsecond line").unwrap();

        let pipeline = KnowledgePipeline::new()
            .with_source(Box::new(LiveFetchSource::new(
                &dead_url().await,
                Duration::from_secs(2),
            )))
            .with_source(Box::new(LocalFileSource::new(&path)));

        let acquired = pipeline.acquire().await;
        assert_eq!(acquired.tier, FallbackTier::LocalFile);
        assert_eq!(acquired.text, "backup profile\nsecond line");
    }

    #[tokio::test]
    async fn test_dead_host_and_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = KnowledgePipeline::new()
            .with_source(Box::new(LiveFetchSource::new(
                &dead_url().await,
                Duration::from_secs(2),
            )))
            .with_source(Box::new(LocalFileSource::new(dir.path().join("none.txt"))))
            .with_default_text("built-in bio");

        let acquired = pipeline.acquire().await;
        assert_eq!(acquired.tier, FallbackTier::HardcodedDefault);
        assert_eq!(acquired.text, "built-in bio");
    }

    #[test]
    fn test_from_config_builds_two_tiers() {
        let pipeline = KnowledgePipeline::from_config(&Config::default());
        assert_eq!(pipeline.len(), 2);
        assert!(!pipeline.is_empty());
    }
}
