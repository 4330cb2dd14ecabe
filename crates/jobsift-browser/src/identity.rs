use crate::error::{BrowserError, Result};
use rand::Rng;
use std::fs;
use std::path::Path;

/// Built-in desktop user agents, used when no pool file is provided.
const FALLBACK_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Browser identity for one session: a user agent and an optional proxy,
/// each drawn randomly from a line-delimited pool file at construction.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl SessionIdentity {
    /// Draw an identity from the pool files.
    ///
    /// A missing or empty user-agent file falls back to a built-in pool.
    /// The proxy pool is only consulted when `use_proxy` is set; a missing
    /// proxy file is then an error, since the caller asked for one.
    pub fn from_files(
        user_agents_file: &Path,
        proxies_file: &Path,
        use_proxy: bool,
    ) -> Result<Self> {
        let user_agent = match random_line(user_agents_file) {
            Some(ua) => ua,
            None => {
                tracing::debug!(
                    "No user-agent pool at {}, using built-in pool",
                    user_agents_file.display()
                );
                let idx = rand::thread_rng().gen_range(0..FALLBACK_USER_AGENTS.len());
                FALLBACK_USER_AGENTS[idx].to_string()
            }
        };

        let proxy = if use_proxy {
            let picked = random_line(proxies_file).ok_or_else(|| {
                BrowserError::IdentityError(format!(
                    "proxy requested but no proxies in {}",
                    proxies_file.display()
                ))
            })?;
            Some(picked)
        } else {
            None
        };

        Ok(Self { user_agent, proxy })
    }
}

/// Pick a random non-empty line from a file, if the file has any.
fn random_line(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }
    let idx = rand::thread_rng().gen_range(0..lines.len());
    Some(lines[idx].to_string())
}
