use crate::error::Result;
use std::time::Duration;

/// Capability surface the extraction pipeline needs from a rendered page.
///
/// Element reads are indexed: a selector addresses the list of matching
/// elements in DOM order and `index` picks one, mirroring how result cards
/// repeat the same class names down the page. Card-scoped reads
/// (`text_within`) search only inside the addressed element.
///
/// Frame context is interior state of the implementation: after
/// [`enter_frame`](Self::enter_frame), reads resolve inside the embedded
/// sub-document until [`exit_frame`](Self::exit_frame) restores the outer
/// document. `exit_frame` must be safe to call when no frame is active.
#[async_trait::async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL and wait for the load to commit.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Poll until the first element matching `selector` is visible.
    async fn wait_until_visible(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<()>;

    /// Number of elements matching `selector`.
    async fn element_count(&self, selector: &str) -> Result<usize>;

    /// Rendered text of the `index`-th element matching `selector`.
    async fn text_at(&self, selector: &str, index: usize) -> Result<String>;

    /// Rendered text of the first `child` element inside the `index`-th
    /// element matching `selector`.
    async fn text_within(&self, selector: &str, index: usize, child: &str) -> Result<String>;

    /// Attribute value of the `index`-th element matching `selector`.
    async fn attribute_at(&self, selector: &str, index: usize, name: &str) -> Result<String>;

    /// Move the pointer onto the element, then click it.
    async fn hover_and_click(&self, selector: &str, index: usize) -> Result<()>;

    /// Move the pointer onto the first `child` element inside the
    /// `index`-th element matching `selector`, then click it.
    async fn hover_and_click_within(&self, selector: &str, index: usize, child: &str)
        -> Result<()>;

    /// Scroll the element into the viewport.
    async fn scroll_into_view_at(&self, selector: &str, index: usize) -> Result<()>;

    /// Switch the read context into the embedded frame matching `selector`.
    async fn enter_frame(&self, selector: &str) -> Result<()>;

    /// Restore the outer document context. Never fails if already outside.
    async fn exit_frame(&self) -> Result<()>;
}
