use serde::Deserialize;

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Route-Sounder
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Discovery strategy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Maximum link depth when falling back to crawling
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Extra seed paths appended to the built-in seed list
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Whether TLS certificates are verified
    #[serde(default = "default_true")]
    pub verify_tls: bool,

    /// Skip crawl targets that robots.txt disallows
    #[serde(default)]
    pub respect_robots: bool,

    /// Delay between seed worklist fetches (milliseconds)
    #[serde(default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    /// Upper bound on pages fetched by the seed worklist
    #[serde(default = "default_max_worklist_pages")]
    pub max_worklist_pages: usize,
}

/// HTTP fetch behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// Per-attempt timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per URL, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between attempts (milliseconds)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File to write endpoints to; printed to stdout when absent
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            seeds: Vec::new(),
            verify_tls: true,
            respect_robots: false,
            politeness_delay_ms: default_politeness_delay_ms(),
            max_worklist_pages: default_max_worklist_pages(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_politeness_delay_ms() -> u64 {
    500
}

fn default_max_worklist_pages() -> usize {
    1000
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
