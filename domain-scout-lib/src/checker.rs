//! Availability checker and batch orchestration.
//!
//! [`AvailabilityChecker::check`] turns one (name, extension) pair into one
//! [`CheckResult`], folding every failure into Unknown.
//! [`AvailabilityChecker::check_batch`] opens a session, walks all pairs in
//! order and always closes the session again.

use crate::classify::{PageClassifier, PhraseClassifier};
use crate::error::ScoutError;
use crate::report::BatchReport;
use crate::session::{launcher_for, BrowserSession, SessionLauncher};
use crate::types::{BatchProgress, CheckConfig, CheckResult};
use crate::utils::{build_search_url, plan_pairs, validate_search_url};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Checks domain availability by scraping the registrar's search page.
///
/// # Example
///
/// ```rust,no_run
/// use domain_scout_lib::{AvailabilityChecker, CheckConfig, Engine};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = CheckConfig::default().with_engine(Engine::Chrome);
///     let checker = AvailabilityChecker::new(config);
///     let names = vec!["example".to_string()];
///     let report = checker
///         .run(&names, |p| println!("{}/{} {}", p.completed, p.total, p.result.full_domain))
///         .await?;
///     println!("{} available", report.summary().available);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AvailabilityChecker {
    config: CheckConfig,
    classifier: Arc<dyn PageClassifier>,
}

impl AvailabilityChecker {
    /// Create a checker using the phrase rules from `config`.
    pub fn new(config: CheckConfig) -> Self {
        let classifier = Arc::new(PhraseClassifier::new(config.phrase_rules.clone()));
        Self { config, classifier }
    }

    /// Create a checker with a custom page classifier.
    pub fn with_classifier(config: CheckConfig, classifier: Arc<dyn PageClassifier>) -> Self {
        Self { config, classifier }
    }

    /// Get the configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check one pair on an already open session.
    ///
    /// Never fails: navigation and extraction errors come back as Unknown
    /// with the error text as status. The throttle delay is applied before
    /// returning.
    pub async fn check(
        &self,
        session: &mut dyn BrowserSession,
        domain_name: &str,
        extension: &str,
    ) -> CheckResult {
        self.check_pair(session, domain_name, extension).await.0
    }

    /// Like [`check`](Self::check), also handing back the error when it
    /// ended the session.
    async fn check_pair(
        &self,
        session: &mut dyn BrowserSession,
        domain_name: &str,
        extension: &str,
    ) -> (CheckResult, Option<ScoutError>) {
        let full_domain = format!("{}{}", domain_name, extension);

        let outcome = match self.load_and_classify(session, &full_domain).await {
            Ok(classification) => {
                debug!(domain = %full_domain, outcome = %classification.availability(), "classified");
                (
                    CheckResult::new(
                        domain_name,
                        extension,
                        classification.availability(),
                        classification.status(),
                    ),
                    None,
                )
            }
            Err(e) => {
                warn!(domain = %full_domain, error = %e, "check failed");
                let result = CheckResult::unknown(domain_name, extension, format!("Error: {}", e));
                let fatal = if e.is_session_fatal() { Some(e) } else { None };
                (result, fatal)
            }
        };

        pause(self.config.throttle_delay).await;
        outcome
    }

    async fn load_and_classify(
        &self,
        session: &mut dyn BrowserSession,
        full_domain: &str,
    ) -> Result<crate::classify::Classification, ScoutError> {
        let url = build_search_url(&self.config.search_url, full_domain)?;
        debug!(url = %url, engine = session.engine_name(), "navigating");

        session.navigate(&url, self.config.nav_timeout).await?;
        pause(self.config.settle_delay).await;
        let page = session.snapshot().await?;

        Ok(self.classifier.classify(&page, full_domain))
    }

    /// Check every pair for `names` using a session from the configured
    /// engine.
    pub async fn run<F>(&self, names: &[String], on_progress: F) -> Result<BatchReport, ScoutError>
    where
        F: FnMut(BatchProgress<'_>),
    {
        let launcher = launcher_for(&self.config)?;
        self.check_batch(launcher.as_ref(), names, on_progress).await
    }

    /// Check every pair for `names`, in order, on one session.
    ///
    /// # Errors
    ///
    /// Fails before any check when the configuration is unusable or the
    /// session cannot be started. Once checking begins the batch always
    /// completes with one result per pair.
    pub async fn check_batch<F>(
        &self,
        launcher: &dyn SessionLauncher,
        names: &[String],
        on_progress: F,
    ) -> Result<BatchReport, ScoutError>
    where
        F: FnMut(BatchProgress<'_>),
    {
        validate_search_url(&self.config.search_url)?;
        if self.config.extensions.is_empty() {
            return Err(ScoutError::config("Select at least one extension"));
        }

        let mut session = launcher.launch().await?;
        info!(
            names = names.len(),
            pairs = self.config.pair_count(names.len()),
            engine = session.engine_name(),
            "batch started"
        );

        let report = self
            .check_batch_with_session(session.as_mut(), names, on_progress)
            .await;

        if let Err(e) = session.close().await {
            warn!(error = %e, "closing session failed");
        }

        info!(
            checked = report.results.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "batch finished"
        );
        Ok(report)
    }

    /// Walk all pairs on a session the caller owns and closes.
    ///
    /// After a session-fatal error the remaining pairs are recorded as
    /// Unknown without touching the session.
    pub async fn check_batch_with_session<F>(
        &self,
        session: &mut dyn BrowserSession,
        names: &[String],
        mut on_progress: F,
    ) -> BatchReport
    where
        F: FnMut(BatchProgress<'_>),
    {
        let pairs = plan_pairs(names, &self.config.extensions);
        let total = pairs.len();
        let start = Instant::now();
        let mut results = Vec::with_capacity(total);
        let mut session_error: Option<ScoutError> = None;

        for (index, (name, extension)) in pairs.iter().enumerate() {
            let result = match &session_error {
                Some(err) => CheckResult::unknown(name, extension, format!("Skipped: {}", err)),
                None => {
                    let (result, fatal) = self.check_pair(session, name, extension).await;
                    if let Some(err) = fatal {
                        warn!(error = %err, remaining = total - index - 1, "session unusable, skipping remaining checks");
                        session_error = Some(err);
                    }
                    result
                }
            };

            on_progress(BatchProgress {
                completed: index + 1,
                total,
                result: &result,
            });
            results.push(result);
        }

        BatchReport {
            results,
            session_error: session_error.map(|e| e.to_string()),
            elapsed: start.elapsed(),
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
