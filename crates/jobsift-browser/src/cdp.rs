use crate::driver::PageDriver;
use crate::error::{BrowserError, Result};
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Quote a string as a JS string literal, escaping as JSON.
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Root expression for queries: the outer document, or the content document
/// of the active embedded frame.
fn script_root(frame: Option<&str>) -> String {
    match frame {
        None => "document".to_string(),
        Some(f) => format!(
            "(document.querySelector({sel}) ? document.querySelector({sel}).contentDocument : null)",
            sel = js_str(f)
        ),
    }
}

fn text_at_script(root: &str, selector: &str, index: usize) -> String {
    format!(
        "(function() {{ \
            const root = {root}; if (!root) return null; \
            const els = root.querySelectorAll({sel}); \
            if (els.length <= {index}) return null; \
            return els[{index}].innerText; \
        }})()",
        sel = js_str(selector)
    )
}

fn text_within_script(root: &str, selector: &str, index: usize, child: &str) -> String {
    format!(
        "(function() {{ \
            const root = {root}; if (!root) return null; \
            const els = root.querySelectorAll({sel}); \
            if (els.length <= {index}) return null; \
            const c = els[{index}].querySelector({child}); \
            return c ? c.innerText : null; \
        }})()",
        sel = js_str(selector),
        child = js_str(child)
    )
}

fn attribute_at_script(root: &str, selector: &str, index: usize, name: &str) -> String {
    format!(
        "(function() {{ \
            const root = {root}; if (!root) return null; \
            const els = root.querySelectorAll({sel}); \
            if (els.length <= {index}) return null; \
            return els[{index}].getAttribute({name}); \
        }})()",
        sel = js_str(selector),
        name = js_str(name)
    )
}

fn count_script(root: &str, selector: &str) -> String {
    format!(
        "(function() {{ \
            const root = {root}; if (!root) return 0; \
            return root.querySelectorAll({sel}).length; \
        }})()",
        sel = js_str(selector)
    )
}

fn visible_script(root: &str, selector: &str) -> String {
    format!(
        "(function() {{ \
            const root = {root}; if (!root) return false; \
            const el = root.querySelector({sel}); if (!el) return false; \
            const r = el.getBoundingClientRect(); \
            return r.width > 0 && r.height > 0; \
        }})()",
        sel = js_str(selector)
    )
}

/// [`PageDriver`] implementation over a chromiumoxide page.
///
/// Reads run as script evaluations so they can resolve inside the embedded
/// detail frame; pointer actions use the CDP element API and always target
/// the outer document, which is the only context the pipeline clicks in.
pub struct CdpDriver {
    page: Page,
    frame: RwLock<Option<String>>,
}

impl CdpDriver {
    /// Wrap an open page.
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            frame: RwLock::new(None),
        }
    }

    async fn current_root(&self) -> String {
        let frame = self.frame.read().await;
        script_root(frame.as_deref())
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> Result<T> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvalError(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| BrowserError::EvalError(format!("{e:?}")))
    }
}

#[async_trait::async_trait]
impl PageDriver for CdpDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        // A fresh document always starts in the outer context.
        *self.frame.write().await = None;
        let _ = self.page.wait_for_navigation().await;
        Ok(())
    }

    async fn wait_until_visible(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let root = self.current_root().await;
            if self.eval::<bool>(visible_script(&root, selector)).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(selector.to_string()));
            }
            tokio::time::sleep(poll).await;
        }
    }

    async fn element_count(&self, selector: &str) -> Result<usize> {
        let root = self.current_root().await;
        self.eval::<usize>(count_script(&root, selector)).await
    }

    async fn text_at(&self, selector: &str, index: usize) -> Result<String> {
        let root = self.current_root().await;
        let text: Option<String> = self.eval(text_at_script(&root, selector, index)).await?;
        text.ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))
    }

    async fn text_within(&self, selector: &str, index: usize, child: &str) -> Result<String> {
        let root = self.current_root().await;
        let text: Option<String> = self
            .eval(text_within_script(&root, selector, index, child))
            .await?;
        text.ok_or_else(|| BrowserError::SelectorNotFound(child.to_string()))
    }

    async fn attribute_at(&self, selector: &str, index: usize, name: &str) -> Result<String> {
        let root = self.current_root().await;
        let value: Option<String> = self
            .eval(attribute_at_script(&root, selector, index, name))
            .await?;
        value.ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))
    }

    async fn hover_and_click(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let element = elements
            .get(index)
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .hover()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn hover_and_click_within(
        &self,
        selector: &str,
        index: usize,
        child: &str,
    ) -> Result<()> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let element = elements
            .get(index)
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))?;
        let target = element
            .find_element(child)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(child.to_string()))?;
        target
            .hover()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        target
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn scroll_into_view_at(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let element = elements
            .get(index)
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn enter_frame(&self, selector: &str) -> Result<()> {
        // The frame element must exist in the outer document before the
        // read context can move into it.
        let exists: bool = self
            .eval(format!(
                "document.querySelector({}) !== null",
                js_str(selector)
            ))
            .await?;
        if !exists {
            return Err(BrowserError::SelectorNotFound(selector.to_string()));
        }
        *self.frame.write().await = Some(selector.to_string());
        Ok(())
    }

    async fn exit_frame(&self) -> Result<()> {
        *self.frame.write().await = None;
        Ok(())
    }
}
