use pageflow_model::Page;

/// Host-facing paging notifications. Every method has an empty default so
/// observers implement only what they need.
///
/// `page_did_scroll` fires on every scroll update with no backpressure;
/// implementations must return quickly.
pub trait PagingObserver {
    /// A page change has been decided; the transition is still running.
    fn will_scroll_to(&mut self, _index: usize, _page: &Page) {}

    /// The transition to `index` has settled.
    fn did_scroll_to(&mut self, _index: usize, _page: &Page) {}

    /// Signed offset of the viewport relative to the focused page, in page
    /// widths.
    fn page_did_scroll(&mut self, _offset_ratio: f32) {}

    fn page_selected(&mut self, _index: usize, _page: &Page) {}
}
