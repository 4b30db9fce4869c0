//! Headless Chrome engine built on chromiumoxide.
//!
//! One Chrome process and one tab per batch. The DevTools event handler runs
//! on its own task; when it ends the connection is gone and every later
//! navigation reports [`ScoutError::SessionLost`].

use crate::classify::RenderedPage;
use crate::error::ScoutError;
use crate::session::{BrowserSession, SessionLauncher};
use crate::types::BrowserOptions;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

const BODY_TEXT_SCRIPT: &str = "document.body ? document.body.innerText : ''";

/// Launches [`ChromeSession`]s.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    options: BrowserOptions,
    request_timeout: Duration,
}

impl ChromeLauncher {
    pub fn new(options: BrowserOptions, request_timeout: Duration) -> Self {
        Self {
            options,
            request_timeout,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScoutError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.request_timeout)
            .args(launch_args(&self.options));

        if !self.options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if let Some((width, height)) = self.options.window_size {
            builder = builder.window_size(width, height);
        }

        builder.build().map_err(ScoutError::browser_launch)
    }
}

/// Extra Chrome switches, on top of chromiumoxide's defaults.
pub(crate) fn launch_args(options: &BrowserOptions) -> Vec<String> {
    vec![
        "--disable-dev-shm-usage".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        format!("--user-agent={}", options.user_agent),
    ]
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScoutError> {
        let config = self.browser_config()?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScoutError::browser_launch(e.to_string()))?;

        let alive = Arc::new(AtomicBool::new(true));
        let alive_flag = alive.clone();
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler error");
                }
            }
            alive_flag.store(false, Ordering::Relaxed);
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(ScoutError::browser_launch(format!(
                    "Could not open a tab: {}",
                    e
                )));
            }
        };

        debug!(headless = self.options.headless, "chrome session started");
        Ok(Box::new(ChromeSession {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler_task),
            alive,
            request_timeout: self.request_timeout,
        }))
    }
}

/// A running Chrome instance with a single tab.
pub struct ChromeSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    alive: Arc<AtomicBool>,
    request_timeout: Duration,
}

impl ChromeSession {
    fn page(&self) -> Result<&Page, ScoutError> {
        if !self.alive.load(Ordering::Relaxed) {
            return Err(ScoutError::session_lost("DevTools connection closed"));
        }
        self.page
            .as_ref()
            .ok_or_else(|| ScoutError::session_lost("Chrome session already closed"))
    }

    fn map_cdp_error(&self, url: &Url, err: CdpError) -> ScoutError {
        if !self.alive.load(Ordering::Relaxed) {
            return ScoutError::session_lost(err.to_string());
        }
        if matches!(err, CdpError::Timeout) {
            return ScoutError::timeout(format!("loading {}", url), self.request_timeout);
        }
        match ScoutError::from(err) {
            ScoutError::Internal { message } => ScoutError::navigation(url.as_str(), message),
            other => other,
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<(), ScoutError> {
        let page = self.page()?;
        match tokio::time::timeout(timeout, page.goto(url.as_str())).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(self.map_cdp_error(url, e)),
            Err(_) => Err(ScoutError::timeout(format!("loading {}", url), timeout)),
        }
    }

    async fn snapshot(&mut self) -> Result<RenderedPage, ScoutError> {
        let page = self.page()?;
        let current = page.url().await.ok().flatten().unwrap_or_default();
        let url = Url::parse(&current).or_else(|_| Url::parse("about:blank"))?;

        let html = page
            .content()
            .await
            .map_err(|e| self.map_cdp_error(&url, e))?;
        let text: String = page
            .evaluate(BODY_TEXT_SCRIPT)
            .await
            .map_err(|e| self.map_cdp_error(&url, e))?
            .into_value()
            .map_err(ScoutError::from)?;

        Ok(RenderedPage {
            url: current,
            html,
            text,
        })
    }

    async fn close(&mut self) -> Result<(), ScoutError> {
        self.page = None;
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let result = browser.close().await;
        if result.is_err() {
            let _ = browser.kill().await;
        }
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "waiting for chrome to exit failed");
        }
        if let Some(handle) = self.handler.take() {
            handle.abort();
        }

        result
            .map(|_| ())
            .map_err(|e| ScoutError::internal(format!("Failed to close browser: {}", e)))
    }

    fn engine_name(&self) -> &'static str {
        "chrome"
    }
}

impl Drop for ChromeSession {
    // Browser's own Drop kills the child process; the handler task would
    // otherwise outlive it.
    fn drop(&mut self) {
        if let Some(handle) = self.handler.take() {
            handle.abort();
        }
    }
}
