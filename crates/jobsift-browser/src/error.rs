use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("chromium binary not found (set JOBSIFT_CHROMIUM_PATH or install chromium)")]
    ChromiumNotFound,

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    #[error("timeout waiting for: {0}")]
    Timeout(String),

    #[error("script evaluation failed: {0}")]
    EvalError(String),

    #[error("identity pool error: {0}")]
    IdentityError(String),
}
