//! Domain Scout CLI Application
//!
//! A command-line interface for bulk domain availability checks against a
//! registrar's public search page. This binary provides a user-friendly
//! interface to the domain-scout-lib library.

mod input;
mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_scout_lib::{
    export_to_file, load_env_config, normalize_names, order_extensions, parse_delay,
    parse_nav_timeout, plan_pairs, validate_search_url, Availability, AvailabilityChecker,
    CheckConfig, ConfigManager, Engine, EnvConfig, FileConfig, OutputFormat, ResultFilter,
    DEFAULT_OUTPUT_FILE, SUPPORTED_EXTENSIONS,
};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-scout
#[derive(Parser, Debug)]
#[command(name = "domain-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sai Dutt G.V <gvs46@protonmail.com>")]
#[command(about = "Check domain availability by reading a registrar's search page")]
#[command(
    long_about = "Check domain availability by loading a registrar's search page for every name and extension, reading the visible wording and classifying it as available, taken or unknown.\n\nResults are checked one at a time, shown as they complete and saved to CSV or JSON."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Base names to check (extensions are stripped)
    #[arg(value_name = "NAMES", help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// Input file with names (one per line, # comments)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Domain Selection"
    )]
    pub file: Option<String>,

    /// Extensions to check: com, dev, ai, org (comma-separated or repeated)
    #[arg(short = 'e', long = "ext", value_name = "EXT", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Domain Selection")]
    pub extensions: Option<Vec<String>>,

    /// Check every supported extension
    #[arg(long = "all-extensions", help_heading = "Domain Selection")]
    pub all_extensions: bool,

    /// List the planned domains without checking them
    #[arg(long = "dry-run", help_heading = "Domain Selection")]
    pub dry_run: bool,

    /// Wait after each page load before reading it (e.g. 3s, 500ms)
    #[arg(long = "settle", value_name = "DURATION", help_heading = "Browser")]
    pub settle: Option<String>,

    /// Pause between checks (e.g. 2s)
    #[arg(long = "delay", value_name = "DURATION", help_heading = "Browser")]
    pub delay: Option<String>,

    /// Navigation timeout per page (e.g. 30s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Browser")]
    pub timeout: Option<String>,

    /// Page engine: chrome or http
    #[arg(long = "engine", value_name = "ENGINE", help_heading = "Browser")]
    pub engine: Option<Engine>,

    /// Show the browser window instead of running headless
    #[arg(long = "show-browser", help_heading = "Browser")]
    pub show_browser: bool,

    /// Registrar search URL with a {domain} placeholder
    #[arg(long = "search-url", value_name = "URL", help_heading = "Browser")]
    pub search_url: Option<String>,

    /// Export file path (default: domain_check_results.csv)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help_heading = "Output"
    )]
    pub output: Option<String>,

    /// Export format: csv or json
    #[arg(long = "format", value_name = "FORMAT", help_heading = "Output")]
    pub format: Option<OutputFormat>,

    /// Do not write an export file
    #[arg(long = "no-save", help_heading = "Output")]
    pub no_save: bool,

    /// Only show results with these outcomes: available, taken, unknown
    #[arg(
        long = "only",
        value_name = "OUTCOME",
        value_delimiter = ',',
        help_heading = "Output"
    )]
    pub only: Option<Vec<Availability>>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information, including browser traffic
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Where and how results are exported.
#[derive(Debug, Clone, PartialEq)]
struct OutputTarget {
    path: PathBuf,
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_logging(&args);
    debug!("domain-scout v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_scout(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.extensions.is_some() && args.all_extensions {
        return Err("Cannot use both -e/--ext and --all-extensions".to_string());
    }

    if args.no_save && (args.output.is_some() || args.format.is_some()) {
        return Err("Cannot use --no-save with --output or --format".to_string());
    }

    if let Some(only) = &args.only {
        if only.is_empty() {
            return Err("--only needs at least one of: available, taken, unknown".to_string());
        }
    }

    Ok(())
}

/// Route tracing output to stderr. `RUST_LOG` wins over the flags.
fn init_logging(args: &Args) {
    let default_filter = if args.debug {
        "debug"
    } else if args.verbose {
        "domain_scout=debug,domain_scout_lib=debug"
    } else {
        "error"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main checking logic
async fn run_scout(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let env_config = load_env_config(args.verbose);
    let file_config = load_file_config(&args, &env_config)?;
    let config = build_config(&args, &file_config, &env_config)?;
    let output = resolve_output(&args, &file_config, &env_config);

    // Collect and clean up names
    let file = args.file.clone().or_else(|| env_config.file.clone());
    let (raw, source) = input::collect_raw_names(&args.domains, file.as_deref())?;
    debug!(?source, inputs = raw.len(), "collected names");

    let normalized = normalize_names(&raw);
    ui::print_rejected(&normalized.rejected);
    if normalized.names.is_empty() {
        return Err("No valid domain names to check".into());
    }
    let names = normalized.names;

    // Dry-run: print planned domains and exit without launching anything
    if args.dry_run {
        for (name, extension) in plan_pairs(&names, &config.extensions) {
            println!("{}{}", name, extension);
        }
        eprintln!("{} checks would be run", config.pair_count(names.len()));
        return Ok(());
    }

    ui::print_header(names.len(), &config);

    let filter = match &args.only {
        Some(outcomes) => ResultFilter::only(outcomes.iter().copied()),
        None => ResultFilter::default(),
    };

    let checker = AvailabilityChecker::new(config);
    let batch = checker.run(&names, |progress| {
        if filter.matches(progress.result) {
            ui::print_progress(&progress);
        }
    });

    // Dropping the batch future on Ctrl-C closes the browser session
    let report = tokio::select! {
        report = batch => report?,
        _ = tokio::signal::ctrl_c() => {
            return Err("Interrupted; no results were saved".into());
        }
    };

    println!();
    let summary = report.summary();
    ui::print_summary(&summary, report.elapsed);
    ui::print_breakdown(&summary);
    if args.only.is_some() {
        ui::print_filtered(&filter.apply(&report.results), report.results.len());
    }

    if let Some(message) = &report.session_error {
        ui::print_session_warning(message);
    }

    if !args.no_save {
        export_to_file(&report.results, &output.path, output.format)?;
        ui::print_saved(&output.path, report.results.len());
    }

    Ok(())
}

/// Load the config file named by `--config` or `DS_CONFIG`, or discover one.
fn load_file_config(
    args: &Args,
    env_config: &EnvConfig,
) -> Result<FileConfig, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    let explicit = args
        .config
        .as_ref()
        .map(|path| (path, "CLI --config"))
        .or_else(|| env_config.config.as_ref().map(|path| (path, "DS_CONFIG")));

    match explicit {
        Some((path, origin)) => {
            debug!(path = %path, origin, "using explicit config file");
            config_manager
                .load_file(path)
                .map_err(|e| format!("Failed to load config file '{}': {}", path, e).into())
        }
        None => Ok(config_manager.discover_and_load().unwrap_or_default()),
    }
}

/// Build CheckConfig with full precedence.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (DS_*)
/// 3. Config files (local, then home, then XDG)
/// 4. Built-in defaults
fn build_config(
    args: &Args,
    file_config: &FileConfig,
    env_config: &EnvConfig,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let config = file_config.apply_to(CheckConfig::default())?;
    let config = env_config.apply_to(config)?;
    apply_cli_args_to_config(config, args)
}

/// Apply CLI arguments to config (highest precedence).
fn apply_cli_args_to_config(
    mut config: CheckConfig,
    args: &Args,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    if let Some(extensions) = &args.extensions {
        config.extensions = order_extensions(extensions)?;
    } else if args.all_extensions {
        config.extensions = SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    }

    if let Some(settle) = &args.settle {
        config.settle_delay = parse_delay("--settle", settle)?;
    }
    if let Some(delay) = &args.delay {
        config.throttle_delay = parse_delay("--delay", delay)?;
    }
    if let Some(timeout) = &args.timeout {
        config.nav_timeout = parse_nav_timeout(timeout)?;
    }

    if let Some(engine) = args.engine {
        config.engine = engine;
    }
    // Only override when the flag is passed, so config/env values survive
    if args.show_browser {
        config.browser.headless = false;
    }

    if let Some(url) = &args.search_url {
        validate_search_url(url)?;
        config.search_url = url.clone();
    }

    Ok(config)
}

/// Pick the export path and format: CLI, then env, then config file.
fn resolve_output(args: &Args, file_config: &FileConfig, env_config: &EnvConfig) -> OutputTarget {
    let path = args
        .output
        .clone()
        .or_else(|| env_config.output.clone())
        .or_else(|| file_config.output_path())
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
    let path = PathBuf::from(path);

    let inferred = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Csv,
    };

    let format = args
        .format
        .or(env_config.format)
        .or_else(|| file_config.output_format())
        .unwrap_or(inferred);

    OutputTarget { path, format }
}
