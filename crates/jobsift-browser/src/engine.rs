use crate::cdp::CdpDriver;
use crate::error::{BrowserError, Result};
use crate::identity::SessionIdentity;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::stream::StreamExt;
use std::path::PathBuf;

/// Find the chromium binary.
///
/// Checks `JOBSIFT_CHROMIUM_PATH`, then common binary names on `PATH`.
pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("JOBSIFT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    for name in ["google-chrome", "chromium", "chromium-browser", "chrome"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    None
}

/// One browser session: owns the launched browser process and its event
/// handler task. A session drives exactly one query to completion.
pub struct BrowserSession {
    browser: Browser,
    identity: SessionIdentity,
}

impl BrowserSession {
    /// Launch a browser with the given identity.
    ///
    /// Launch options mirror what the results site tolerates: maximized
    /// window, no extensions, certificate errors ignored, and the pooled
    /// user agent. Headless is opt-in.
    pub async fn launch(identity: SessionIdentity, headless: bool) -> Result<Self> {
        let chrome_path = find_chromium().ok_or(BrowserError::ChromiumNotFound)?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .no_sandbox()
            .arg("--start-maximized")
            .arg("--disable-extensions")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--ignore-ssl-errors")
            .arg("--ignore-certificate-errors")
            .arg(format!("--user-agent={}", identity.user_agent));

        if let Some(proxy) = &identity.proxy {
            builder = builder.arg(format!("--proxy-server={proxy}"));
        }
        if !headless {
            builder = builder.with_head();
        }

        let config = builder
            .build()
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Drain browser events for the lifetime of the session
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        tracing::debug!("Browser launched (user agent: {})", identity.user_agent);

        Ok(Self { browser, identity })
    }

    /// The identity this session was launched with.
    #[must_use]
    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// Open a fresh page and wrap it in a [`CdpDriver`].
    pub async fn new_driver(&self) -> Result<CdpDriver> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(CdpDriver::new(page))
    }

    /// Close the browser process.
    ///
    /// Teardown failures are reported to the caller, who is expected to log
    /// and swallow them; a dying browser must not abort the run.
    pub async fn shutdown(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        self.browser
            .wait()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }
}
