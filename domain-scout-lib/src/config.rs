//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and `DS_*`
//! environment variables, and merging them with proper precedence rules:
//! CLI flags > environment > local file > home file > XDG file > defaults.

use crate::classify::PhraseRules;
use crate::error::ScoutError;
use crate::types::{CheckConfig, Engine, OutputFormat};
use crate::utils::{order_extensions, validate_search_url};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest accepted settle or throttle delay.
const MAX_DELAY: Duration = Duration::from_secs(60);

/// Longest accepted navigation timeout.
const MAX_NAV_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Browser launch options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<BrowserConfigSection>,

    /// Registrar URL and wording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<RegistrarConfig>,

    /// Export preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DefaultsConfig {
    /// Extensions to check, e.g. ["com", "ai"]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Settle wait after navigation ("3s", "500ms")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_delay: Option<String>,

    /// Pause between checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle_delay: Option<String>,

    /// Navigation timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_timeout: Option<String>,

    /// "chrome" or "http"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Run Chrome without a window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
}

/// `[browser]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BrowserConfigSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<u32>,
}

/// `[registrar]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RegistrarConfig {
    /// Search URL template with a `{domain}` placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_phrases: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_phrases: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_cues: Option<Vec<String>>,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Export file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// "csv" or "json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FileConfig {
    /// Layer this file's settings over `config`.
    pub fn apply_to(&self, mut config: CheckConfig) -> Result<CheckConfig, ScoutError> {
        if let Some(defaults) = &self.defaults {
            if let Some(extensions) = &defaults.extensions {
                config.extensions = order_extensions(extensions)?;
            }
            if let Some(value) = &defaults.settle_delay {
                config.settle_delay = parse_delay("settle_delay", value)?;
            }
            if let Some(value) = &defaults.throttle_delay {
                config.throttle_delay = parse_delay("throttle_delay", value)?;
            }
            if let Some(value) = &defaults.nav_timeout {
                config.nav_timeout = parse_nav_timeout(value)?;
            }
            if let Some(engine) = &defaults.engine {
                config.engine = engine.parse::<Engine>().map_err(ScoutError::config)?;
            }
            if let Some(headless) = defaults.headless {
                config.browser.headless = headless;
            }
        }

        if let Some(browser) = &self.browser {
            if let Some(user_agent) = &browser.user_agent {
                config.browser.user_agent = user_agent.clone();
            }
            if let Some(path) = &browser.chrome_executable {
                config.browser.chrome_executable = Some(path.clone());
            }
            if let (Some(w), Some(h)) = (browser.window_width, browser.window_height) {
                config.browser.window_size = Some((w, h));
            }
        }

        if let Some(registrar) = &self.registrar {
            if let Some(url) = &registrar.search_url {
                validate_search_url(url)?;
                config.search_url = url.clone();
            }
            let rules: &mut PhraseRules = &mut config.phrase_rules;
            if let Some(phrases) = &registrar.taken_phrases {
                rules.taken = phrases.clone();
            }
            if let Some(phrases) = &registrar.available_phrases {
                rules.available = phrases.clone();
            }
            if let Some(phrases) = &registrar.purchase_cues {
                rules.purchase_cues = phrases.clone();
            }
        }

        Ok(config)
    }

    /// Export path from `[output]`, if set.
    pub fn output_path(&self) -> Option<String> {
        self.output.as_ref().and_then(|o| o.path.clone())
    }

    /// Export format from `[output]`, if set and valid.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .and_then(|f| f.parse().ok())
    }
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to report which files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, ScoutError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ScoutError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ScoutError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;
        debug!(path = %path.display(), "loaded config file");

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    pub fn discover_and_load(&self) -> Result<FileConfig, ScoutError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        // Lowest precedence first
        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring config file"),
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            for (i, path) in loaded_files.iter().enumerate() {
                let role = if i == loaded_files.len() - 1 {
                    "highest precedence"
                } else {
                    "overridden where set above"
                };
                debug!(path = %path.display(), role, "config file");
            }
        }

        Ok(merged_config)
    }

    /// Config file in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domain-scout.toml", "./.domain-scout.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Config file in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let path = Path::new(&home).join(".domain-scout.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// `$XDG_CONFIG_HOME/domain-scout/config.toml`, falling back to `~/.config`.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-scout").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations; values from `higher` win.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower), Some(higher)) => Some(DefaultsConfig {
                    extensions: higher.extensions.or(lower.extensions),
                    settle_delay: higher.settle_delay.or(lower.settle_delay),
                    throttle_delay: higher.throttle_delay.or(lower.throttle_delay),
                    nav_timeout: higher.nav_timeout.or(lower.nav_timeout),
                    engine: higher.engine.or(lower.engine),
                    headless: higher.headless.or(lower.headless),
                }),
                (lower, higher) => higher.or(lower),
            },
            browser: match (lower.browser, higher.browser) {
                (Some(lower), Some(higher)) => Some(BrowserConfigSection {
                    user_agent: higher.user_agent.or(lower.user_agent),
                    chrome_executable: higher.chrome_executable.or(lower.chrome_executable),
                    window_width: higher.window_width.or(lower.window_width),
                    window_height: higher.window_height.or(lower.window_height),
                }),
                (lower, higher) => higher.or(lower),
            },
            registrar: match (lower.registrar, higher.registrar) {
                (Some(lower), Some(higher)) => Some(RegistrarConfig {
                    search_url: higher.search_url.or(lower.search_url),
                    taken_phrases: higher.taken_phrases.or(lower.taken_phrases),
                    available_phrases: higher.available_phrases.or(lower.available_phrases),
                    purchase_cues: higher.purchase_cues.or(lower.purchase_cues),
                }),
                (lower, higher) => higher.or(lower),
            },
            output: match (lower.output, higher.output) {
                (Some(lower), Some(higher)) => Some(OutputConfig {
                    path: higher.path.or(lower.path),
                    format: higher.format.or(lower.format),
                }),
                (lower, higher) => higher.or(lower),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), ScoutError> {
        // apply_to performs every value check
        config.apply_to(CheckConfig::default())?;

        if let Some(output) = &config.output {
            if let Some(format) = &output.format {
                format.parse::<OutputFormat>().map_err(ScoutError::config)?;
            }
        }

        if let Some(browser) = &config.browser {
            if browser.window_width.is_some() != browser.window_height.is_some() {
                return Err(ScoutError::config(
                    "Set both window_width and window_height, or neither",
                ));
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via DS_* environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub extensions: Option<Vec<String>>,
    pub settle_delay: Option<Duration>,
    pub throttle_delay: Option<Duration>,
    pub nav_timeout: Option<Duration>,
    pub engine: Option<Engine>,
    pub headless: Option<bool>,
    pub search_url: Option<String>,
    pub output: Option<String>,
    pub format: Option<OutputFormat>,
    pub file: Option<String>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Layer environment settings over `config`.
    pub fn apply_to(&self, mut config: CheckConfig) -> Result<CheckConfig, ScoutError> {
        if let Some(extensions) = &self.extensions {
            config.extensions = order_extensions(extensions)?;
        }
        if let Some(delay) = self.settle_delay {
            config.settle_delay = delay;
        }
        if let Some(delay) = self.throttle_delay {
            config.throttle_delay = delay;
        }
        if let Some(timeout) = self.nav_timeout {
            config.nav_timeout = timeout;
        }
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        if let Some(headless) = self.headless {
            config.browser.headless = headless;
        }
        if let Some(url) = &self.search_url {
            config.search_url = url.clone();
        }
        Ok(config)
    }
}

/// Load configuration from `DS_*` environment variables.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok(), verbose)
}

/// Same as [`load_env_config`], reading variables through `lookup`.
pub fn load_env_config_from<F>(lookup: F, verbose: bool) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();
    let note = |key: &str, value: &str| {
        if verbose {
            debug!("Using {}={}", key, value);
        }
    };

    // DS_EXTENSIONS - comma-separated extension list
    if let Some(value) = lookup("DS_EXTENSIONS") {
        match order_extensions(&split_list(&value)) {
            Ok(extensions) => {
                env_config.extensions = Some(extensions);
                note("DS_EXTENSIONS", &value);
            }
            Err(e) => warn!("Ignoring DS_EXTENSIONS='{}': {}", value, e),
        }
    }

    for (key, slot) in [
        ("DS_SETTLE", &mut env_config.settle_delay),
        ("DS_DELAY", &mut env_config.throttle_delay),
    ] {
        if let Some(value) = lookup(key) {
            match parse_delay(key, &value) {
                Ok(delay) => {
                    *slot = Some(delay);
                    note(key, &value);
                }
                Err(e) => warn!("Ignoring {}='{}': {}", key, value, e),
            }
        }
    }

    // DS_TIMEOUT - navigation timeout
    if let Some(value) = lookup("DS_TIMEOUT") {
        match parse_nav_timeout(&value) {
            Ok(timeout) => {
                env_config.nav_timeout = Some(timeout);
                note("DS_TIMEOUT", &value);
            }
            Err(e) => warn!("Ignoring DS_TIMEOUT='{}': {}", value, e),
        }
    }

    // DS_ENGINE - chrome or http
    if let Some(value) = lookup("DS_ENGINE") {
        match value.parse::<Engine>() {
            Ok(engine) => {
                env_config.engine = Some(engine);
                note("DS_ENGINE", &value);
            }
            Err(e) => warn!("Ignoring DS_ENGINE: {}", e),
        }
    }

    // DS_HEADLESS - true/false
    if let Some(value) = lookup("DS_HEADLESS") {
        match parse_bool_flag(&value) {
            Some(headless) => {
                env_config.headless = Some(headless);
                note("DS_HEADLESS", &value);
            }
            None => warn!("Ignoring DS_HEADLESS='{}', use true/false", value),
        }
    }

    // DS_SEARCH_URL - registrar URL template
    if let Some(value) = lookup("DS_SEARCH_URL") {
        match validate_search_url(&value) {
            Ok(()) => {
                env_config.search_url = Some(value.clone());
                note("DS_SEARCH_URL", &value);
            }
            Err(e) => warn!("Ignoring DS_SEARCH_URL: {}", e),
        }
    }

    // DS_FORMAT - csv or json
    if let Some(value) = lookup("DS_FORMAT") {
        match value.parse::<OutputFormat>() {
            Ok(format) => {
                env_config.format = Some(format);
                note("DS_FORMAT", &value);
            }
            Err(e) => warn!("Ignoring DS_FORMAT: {}", e),
        }
    }

    // Plain paths
    for (key, slot) in [
        ("DS_OUTPUT", &mut env_config.output),
        ("DS_FILE", &mut env_config.file),
        ("DS_CONFIG", &mut env_config.config),
    ] {
        if let Some(value) = lookup(key) {
            if !value.trim().is_empty() {
                note(key, &value);
                *slot = Some(value);
            }
        }
    }

    env_config
}

/// Parse a duration like "500ms", "2s", "1m" or a bare number of seconds.
pub fn parse_duration_string(value: &str) -> Option<Duration> {
    let value = value.trim().to_lowercase();

    if let Some(ms) = value.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = value.strip_suffix('s') {
        secs.trim().parse::<f64>().ok().and_then(secs_to_duration)
    } else if let Some(mins) = value.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        // Assume seconds if no unit
        value.parse::<f64>().ok().and_then(secs_to_duration)
    }
}

fn secs_to_duration(secs: f64) -> Option<Duration> {
    if secs >= 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// Parse and bound a settle or throttle delay.
pub fn parse_delay(name: &str, value: &str) -> Result<Duration, ScoutError> {
    let delay = parse_duration_string(value).ok_or_else(|| {
        ScoutError::config(format!(
            "Invalid {} '{}'. Use format like '500ms', '2s', '1m'",
            name, value
        ))
    })?;
    if delay > MAX_DELAY {
        return Err(ScoutError::config(format!(
            "{} must be at most {}s",
            name,
            MAX_DELAY.as_secs()
        )));
    }
    Ok(delay)
}

/// Parse and bound a navigation timeout.
pub fn parse_nav_timeout(value: &str) -> Result<Duration, ScoutError> {
    let timeout = parse_duration_string(value).ok_or_else(|| {
        ScoutError::config(format!(
            "Invalid timeout '{}'. Use format like '10s', '1m'",
            value
        ))
    })?;
    if timeout < Duration::from_secs(1) || timeout > MAX_NAV_TIMEOUT {
        return Err(ScoutError::config(format!(
            "Timeout must be between 1s and {}s",
            MAX_NAV_TIMEOUT.as_secs()
        )));
    }
    Ok(timeout)
}

fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_parse_duration_string() {
        assert_eq!(parse_duration_string("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration_string("2s"), Some(Duration::from_secs(2)));
        assert_eq!(parse_duration_string("1.5s"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_duration_string("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration_string("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration_string("soon"), None);
        assert_eq!(parse_duration_string("-1s"), None);
    }

    #[test]
    fn test_delay_bounds() {
        assert!(parse_delay("throttle_delay", "61s").is_err());
        assert!(parse_delay("throttle_delay", "0").is_ok());
        assert!(parse_nav_timeout("0s").is_err());
        assert!(parse_nav_timeout("10m").is_err());
        assert_eq!(parse_nav_timeout("45s").unwrap(), Duration::from_secs(45));
    }

    #[test]
    fn test_oversized_durations_are_config_errors() {
        assert_eq!(parse_duration_string("1e30"), None);
        assert_eq!(parse_duration_string("inf"), None);
        assert_eq!(parse_duration_string("NaN"), None);
        assert_eq!(parse_duration_string("307445734561825861m"), None);

        assert!(matches!(
            parse_delay("--delay", "1e30"),
            Err(ScoutError::ConfigError { .. })
        ));
        assert!(matches!(
            parse_nav_timeout("307445734561825861m"),
            Err(ScoutError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_oversized_env_duration_is_ignored() {
        let env_config = load_env_config_from(
            |k| match k {
                "DS_DELAY" => Some("1e300".to_string()),
                "DS_TIMEOUT" => Some("307445734561825861m".to_string()),
                _ => None,
            },
            false,
        );
        assert_eq!(env_config.throttle_delay, None);
        assert_eq!(env_config.nav_timeout, None);
    }

    #[test]
    fn test_oversized_file_duration_rejected() {
        let temp_file = write_config("[defaults]\nsettle_delay = \"1e30s\"\n");
        let manager = ConfigManager::new(false);
        assert!(matches!(
            manager.load_file(temp_file.path()),
            Err(ScoutError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_file = write_config(
            r#"
[defaults]
extensions = ["org", "com"]
settle_delay = "1s"
throttle_delay = "500ms"
engine = "http"

[registrar]
search_url = "https://registrar.test/search?q={domain}"
taken_phrases = ["registered by someone else"]

[output]
path = "out.json"
format = "json"
"#,
        );

        let manager = ConfigManager::new(false);
        let file_config = manager.load_file(temp_file.path()).unwrap();
        assert_eq!(file_config.output_path(), Some("out.json".to_string()));
        assert_eq!(file_config.output_format(), Some(OutputFormat::Json));

        let config = file_config.apply_to(CheckConfig::default()).unwrap();
        assert_eq!(config.extensions, vec![".com", ".org"]);
        assert_eq!(config.settle_delay, Duration::from_secs(1));
        assert_eq!(config.throttle_delay, Duration::from_millis(500));
        assert_eq!(config.engine, Engine::Http);
        assert_eq!(config.search_url, "https://registrar.test/search?q={domain}");
        assert_eq!(config.phrase_rules.taken, vec!["registered by someone else"]);
        // Untouched lists keep their defaults
        assert_eq!(config.phrase_rules.available, PhraseRules::default().available);
    }

    #[test]
    fn test_invalid_extension_rejected() {
        let temp_file = write_config("[defaults]\nextensions = [\"io\"]\n");
        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_search_url_without_placeholder_rejected() {
        let temp_file = write_config("[registrar]\nsearch_url = \"https://registrar.test/\"\n");
        let manager = ConfigManager::new(false);
        let err = manager.load_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("{domain}"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let temp_file = write_config("[defaults\nengine = ");
        let manager = ConfigManager::new(false);
        assert!(matches!(
            manager.load_file(temp_file.path()),
            Err(ScoutError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                settle_delay: Some("5s".to_string()),
                engine: Some("http".to_string()),
                ..Default::default()
            }),
            output: Some(OutputConfig {
                path: Some("lower.csv".to_string()),
                format: None,
            }),
            ..Default::default()
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                settle_delay: Some("1s".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.settle_delay, Some("1s".to_string())); // Higher wins
        assert_eq!(defaults.engine, Some("http".to_string())); // Lower preserved
        assert_eq!(merged.output.unwrap().path, Some("lower.csv".to_string()));
    }

    #[test]
    fn test_env_config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("DS_EXTENSIONS", "ai, com"),
            ("DS_DELAY", "0"),
            ("DS_SETTLE", "banana"),
            ("DS_ENGINE", "http"),
            ("DS_HEADLESS", "off"),
            ("DS_FORMAT", "json"),
            ("DS_OUTPUT", "results.json"),
        ]
        .into_iter()
        .collect();

        let env_config = load_env_config_from(|k| vars.get(k).map(|v| v.to_string()), false);
        assert_eq!(
            env_config.extensions,
            Some(vec![".com".to_string(), ".ai".to_string()])
        );
        assert_eq!(env_config.throttle_delay, Some(Duration::ZERO));
        assert_eq!(env_config.settle_delay, None); // invalid value ignored
        assert_eq!(env_config.engine, Some(Engine::Http));
        assert_eq!(env_config.headless, Some(false));
        assert_eq!(env_config.format, Some(OutputFormat::Json));
        assert_eq!(env_config.output, Some("results.json".to_string()));

        let config = env_config.apply_to(CheckConfig::default()).unwrap();
        assert_eq!(config.extensions, vec![".com", ".ai"]);
        assert!(!config.browser.headless);
    }
}
