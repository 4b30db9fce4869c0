//! # Domain Scout Library
//!
//! Bulk domain availability checks by reading a registrar's public search
//! page, the way a person would: open the page for each candidate domain,
//! wait for it to settle, read the visible text and decide whether the
//! domain is available, taken, or unclear.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_scout_lib::{AvailabilityChecker, CheckConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = AvailabilityChecker::new(CheckConfig::default());
//!     let names = vec!["example".to_string()];
//!     let report = checker.run(&names, |_| {}).await?;
//!
//!     for result in &report.results {
//!         println!("{} - {}", result.full_domain, result.available);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Chrome engine** (`chrome` feature): drives a real browser over CDP
//! - **HTTP engine**: fetches the raw page, for registrars that render server-side
//! - **Phrase classification**: configurable taken/available wording
//! - **CSV and JSON export**

// Re-export main public API types and functions
pub use checker::AvailabilityChecker;
pub use classify::{
    extract_visible_text, fold_text, Classification, PageClassifier, PhraseClassifier,
    PhraseRules, RenderedPage, UNDETERMINED_STATUS,
};
pub use config::{
    load_env_config, load_env_config_from, parse_delay, parse_duration_string,
    parse_nav_timeout, BrowserConfigSection, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig, RegistrarConfig,
};
pub use error::ScoutError;
pub use export::{
    export_to_file, to_csv_string, to_json_string, write_csv, write_json, CSV_HEADER,
    DEFAULT_OUTPUT_FILE,
};
pub use report::{BatchReport, BatchSummary, ExtensionCounts, ResultFilter};
pub use session::{launcher_for, BrowserSession, HttpLauncher, HttpSession, SessionLauncher};
pub use types::{
    Availability, BatchProgress, BrowserOptions, CheckConfig, CheckResult, Engine, OutputFormat,
    DEFAULT_SEARCH_URL, DEFAULT_USER_AGENT, DOMAIN_PLACEHOLDER, SUPPORTED_EXTENSIONS,
};
pub use utils::{
    build_search_url, normalize_extension, normalize_name, normalize_names, order_extensions,
    parse_name_list, plan_pairs, validate_search_url, NormalizedNames,
};

#[cfg(feature = "chrome")]
pub use browser::{ChromeLauncher, ChromeSession};

// Internal modules - these are not part of the public API
#[cfg(feature = "chrome")]
mod browser;
mod checker;
mod classify;
mod config;
mod error;
mod export;
mod report;
mod session;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ScoutError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Get library information for debugging or display purposes.
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        author: AUTHOR,
        engines: available_engines(),
    }
}

/// Information about the library build and features
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub version: &'static str,
    pub author: &'static str,
    pub engines: Vec<Engine>,
}

/// Engines compiled into this build.
pub fn available_engines() -> Vec<Engine> {
    let mut engines = vec![Engine::Http];

    #[cfg(feature = "chrome")]
    engines.insert(0, Engine::Chrome);

    engines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_lists_http_engine() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert!(info.engines.contains(&Engine::Http));
    }
}
