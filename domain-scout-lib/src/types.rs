//! Core data types for registrar availability checks.
//!
//! This module defines the result record produced for every (name, extension)
//! pair, the check configuration and the small enums used across the library.

use crate::classify::PhraseRules;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Extensions the checker knows about, in canonical checking order.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".com", ".dev", ".ai", ".org"];

/// Registrar search page used when no template is configured.
pub const DEFAULT_SEARCH_URL: &str =
    "https://www.godaddy.com/domainsearch/find?checkAvail=1&domainToCheck={domain}";

/// Desktop Chrome user agent sent by both engines.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Placeholder substituted with the full domain in search URL templates.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// Availability outcome of a single check.
///
/// Serialized exactly as it appears in exported files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Availability {
    /// The registrar offered the domain for registration
    Yes,
    /// The registrar reported the domain as registered
    No,
    /// Nothing recognizable was found, or the check failed
    Unknown,
}

impl Availability {
    /// All outcomes in display order.
    pub const ALL: [Availability; 3] = [Availability::Yes, Availability::No, Availability::Unknown];

    /// Human label that leads the status text of a classified page.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Yes => "Available",
            Availability::No => "Taken",
            Availability::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Yes => write!(f, "Yes"),
            Availability::No => write!(f, "No"),
            Availability::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    /// Accepts both the exported values (`yes`/`no`) and the labels
    /// (`available`/`taken`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "available" => Ok(Availability::Yes),
            "no" | "taken" => Ok(Availability::No),
            "unknown" => Ok(Availability::Unknown),
            other => Err(format!(
                "Unknown availability '{}', expected available, taken or unknown",
                other
            )),
        }
    }
}

/// Result of checking one base name against one extension.
///
/// Created once by the checker and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    /// Base name without extension (e.g., "example")
    pub domain_name: String,

    /// Extension including the leading dot (e.g., ".com")
    pub extension: String,

    /// `domain_name` followed by `extension`
    pub full_domain: String,

    /// Classified outcome
    pub available: Availability,

    /// Matched phrase, "could not determine" message, or error text
    pub status: String,
}

impl CheckResult {
    /// Build a result, deriving `full_domain` from the two parts.
    pub fn new<S: Into<String>>(
        domain_name: &str,
        extension: &str,
        available: Availability,
        status: S,
    ) -> Self {
        Self {
            domain_name: domain_name.to_string(),
            extension: extension.to_string(),
            full_domain: format!("{}{}", domain_name, extension),
            available,
            status: status.into(),
        }
    }

    /// Build an Unknown result carrying the given status text.
    pub fn unknown<S: Into<String>>(domain_name: &str, extension: &str, status: S) -> Self {
        Self::new(domain_name, extension, Availability::Unknown, status)
    }
}

/// Which engine loads the registrar page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Headless (or visible) Chrome via the DevTools protocol
    Chrome,
    /// Plain HTTP GET of the page source, no JavaScript
    Http,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Engine::Chrome => write!(f, "chrome"),
            Engine::Http => write!(f, "http"),
        }
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chrome" | "browser" => Ok(Engine::Chrome),
            "http" => Ok(Engine::Http),
            other => Err(format!("Unknown engine '{}', expected chrome or http", other)),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown format '{}', expected csv or json", other)),
        }
    }
}

/// Options for launching the browser engine.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserOptions {
    /// Run without a visible window
    /// Default: true
    pub headless: bool,

    /// User agent sent with every navigation
    pub user_agent: String,

    /// Explicit Chrome/Chromium binary; auto-detected when None
    pub chrome_executable: Option<PathBuf>,

    /// Browser window size in pixels
    pub window_size: Option<(u32, u32)>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            window_size: None,
        }
    }
}

/// Configuration for a checking run.
///
/// Timing values are plain configuration so tests can run with zero delays.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Selected extensions, kept in canonical order
    /// Default: all of [`SUPPORTED_EXTENSIONS`]
    pub extensions: Vec<String>,

    /// Search URL template containing `{domain}`
    pub search_url: String,

    /// Wait after navigation before reading the page
    /// Default: 3 seconds
    pub settle_delay: Duration,

    /// Pause after every check, whatever the outcome
    /// Default: 2 seconds
    pub throttle_delay: Duration,

    /// Upper bound for a single navigation
    /// Default: 30 seconds
    pub nav_timeout: Duration,

    /// Which engine loads pages
    /// Default: Chrome
    pub engine: Engine,

    /// Browser launch options
    pub browser: BrowserOptions,

    /// Phrase lists used by the default classifier
    pub phrase_rules: PhraseRules,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            settle_delay: Duration::from_secs(3),
            throttle_delay: Duration::from_secs(2),
            nav_timeout: Duration::from_secs(30),
            engine: Engine::Chrome,
            browser: BrowserOptions::default(),
            phrase_rules: PhraseRules::default(),
        }
    }
}

impl CheckConfig {
    /// Set the extensions to check. Callers normalize them first
    /// (see [`crate::order_extensions`]).
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the search URL template.
    pub fn with_search_url<S: Into<String>>(mut self, search_url: S) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Set the page settle interval.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the inter-request throttle delay.
    pub fn with_throttle_delay(mut self, delay: Duration) -> Self {
        self.throttle_delay = delay;
        self
    }

    /// Set the navigation timeout.
    pub fn with_nav_timeout(mut self, timeout: Duration) -> Self {
        self.nav_timeout = timeout;
        self
    }

    /// Choose the page engine.
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Run the browser with a visible window.
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.browser.headless = headless;
        self
    }

    /// Replace the phrase rules.
    pub fn with_phrase_rules(mut self, rules: PhraseRules) -> Self {
        self.phrase_rules = rules;
        self
    }

    /// Total number of pairs a batch over `name_count` names will check.
    pub fn pair_count(&self, name_count: usize) -> usize {
        name_count * self.extensions.len()
    }
}

/// Progress notification emitted after every pair.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// Pairs finished so far, including this one
    pub completed: usize,

    /// Pairs in the whole batch
    pub total: usize,

    /// Result just produced
    pub result: &'a CheckResult,
}
