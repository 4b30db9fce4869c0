//! Page sessions.
//!
//! A session is the single resource a batch holds while it loads registrar
//! pages: a Chrome instance, or an HTTP client for registrars that render
//! their results server-side. Sessions are opened through a
//! [`SessionLauncher`] and closed exactly once by whoever opened them.

use crate::classify::RenderedPage;
use crate::error::ScoutError;
use crate::types::{CheckConfig, Engine};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// An open page-loading session.
#[async_trait]
pub trait BrowserSession: Send {
    /// Load `url`, giving up after `timeout`.
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<(), ScoutError>;

    /// Read the page currently loaded.
    async fn snapshot(&mut self) -> Result<RenderedPage, ScoutError>;

    /// Release the session. Calling it again is a no-op.
    async fn close(&mut self) -> Result<(), ScoutError>;

    /// Short engine name for logs.
    fn engine_name(&self) -> &'static str;
}

/// Opens sessions for a batch.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScoutError>;
}

/// Pick the launcher matching `config.engine`.
pub fn launcher_for(config: &CheckConfig) -> Result<Box<dyn SessionLauncher>, ScoutError> {
    match config.engine {
        Engine::Http => Ok(Box::new(HttpLauncher::new(
            config.browser.user_agent.clone(),
            config.nav_timeout,
        ))),
        #[cfg(feature = "chrome")]
        Engine::Chrome => Ok(Box::new(crate::browser::ChromeLauncher::new(
            config.browser.clone(),
            config.nav_timeout,
        ))),
        #[cfg(not(feature = "chrome"))]
        Engine::Chrome => Err(ScoutError::config(
            "This build does not include the chrome engine; use the http engine",
        )),
    }
}

/// Launches [`HttpSession`]s.
#[derive(Debug, Clone)]
pub struct HttpLauncher {
    user_agent: String,
    request_timeout: Duration,
}

impl HttpLauncher {
    pub fn new<S: Into<String>>(user_agent: S, request_timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            request_timeout,
        }
    }
}

#[async_trait]
impl SessionLauncher for HttpLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScoutError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.request_timeout + Duration::from_secs(2))
            .build()
            .map_err(|e| ScoutError::browser_launch(format!("HTTP client: {}", e)))?;

        Ok(Box::new(HttpSession {
            client,
            page: None,
            closed: false,
        }))
    }
}

/// Static page fetcher. Reads the HTML the server returns, without running
/// any JavaScript.
pub struct HttpSession {
    client: reqwest::Client,
    page: Option<RenderedPage>,
    closed: bool,
}

#[async_trait]
impl BrowserSession for HttpSession {
    async fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<(), ScoutError> {
        if self.closed {
            return Err(ScoutError::session_lost("HTTP session already closed"));
        }
        self.page = None;

        let request = async {
            let response = self.client.get(url.clone()).send().await.map_err(|e| {
                if e.is_timeout() {
                    ScoutError::timeout(format!("loading {}", url), timeout)
                } else {
                    ScoutError::from(e)
                }
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScoutError::navigation(
                    url.as_str(),
                    format!("HTTP {}", status.as_u16()),
                ));
            }
            Ok(response.text().await?)
        };

        let body = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ScoutError::timeout(format!("loading {}", url), timeout))??;

        debug!(url = %url, bytes = body.len(), "fetched page");
        self.page = Some(RenderedPage::from_html(url.as_str(), body));
        Ok(())
    }

    async fn snapshot(&mut self) -> Result<RenderedPage, ScoutError> {
        self.page.clone().ok_or_else(|| ScoutError::ParseError {
            message: "No page loaded".to_string(),
        })
    }

    async fn close(&mut self) -> Result<(), ScoutError> {
        self.closed = true;
        self.page = None;
        Ok(())
    }

    fn engine_name(&self) -> &'static str {
        "http"
    }
}
