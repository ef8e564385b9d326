//! PageDeck: ordered pages, the focused index, and page-snap arithmetic
//!
//! Everything here is pure: no collaborators, no timers. The surface feeds
//! offsets and gesture motion in and applies the returned [`SnapTarget`].

use pageflow_contracts::indicator::PageStep;
use pageflow_model::{Page, PageId, PagerError, PagerResult};
use std::time::Duration;

use crate::config::{PagingConfig, TieBreak};

/// Card geometry along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckGeometry {
    pub page_width: f32,
    pub gutter: f32,
    pub viewport_width: f32,
    /// Gutters subtracted from the viewport when the page width is derived.
    /// `None` when the page width was given explicitly.
    pub inset_gutters: Option<f32>,
}

impl DeckGeometry {
    /// Geometry with an explicit page width.
    pub fn new(page_width: f32, gutter: f32, viewport_width: f32) -> Self {
        Self {
            page_width: page_width.max(1.0),
            gutter: gutter.max(0.0),
            viewport_width,
            inset_gutters: None,
        }
    }

    /// Derive the page width from the viewport: cards leave
    /// `inset_gutters * gutter` of the viewport uncovered.
    pub fn from_viewport(viewport_width: f32, gutter: f32, inset_gutters: f32) -> Self {
        let gutter = gutter.max(0.0);
        Self {
            page_width: (viewport_width - inset_gutters * gutter).max(1.0),
            gutter,
            viewport_width,
            inset_gutters: Some(inset_gutters),
        }
    }

    #[inline]
    pub fn stride(&self) -> f32 {
        self.page_width + self.gutter
    }

    /// Resting content offset of page `index`.
    #[inline]
    pub fn canonical_offset(&self, index: usize) -> f32 {
        index as f32 * self.stride() - self.gutter
    }
}

/// How a gesture was moving when it ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMotion {
    /// Instantaneous velocity in units/s, as reported by the host.
    Velocity(f32),
    /// Time between drag start and release; speed is derived from the
    /// distance travelled.
    Elapsed(Duration),
}

impl GestureMotion {
    pub const AT_REST: GestureMotion = GestureMotion::Velocity(0.0);

    /// Absolute speed for a gesture that travelled `delta`.
    pub fn speed(self, delta: f32) -> f32 {
        match self {
            GestureMotion::Velocity(v) => v.abs(),
            GestureMotion::Elapsed(elapsed) => {
                let secs = elapsed.as_secs_f32();
                if secs > 0.0 {
                    delta.abs() / secs
                } else if delta != 0.0 {
                    f32::INFINITY
                } else {
                    0.0
                }
            }
        }
    }
}

/// One gesture's worth of input for a snap decision. Consumed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollIntent {
    pub offset: f32,
    pub motion: GestureMotion,
}

/// Where the surface should settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub index: usize,
    pub offset: f32,
}

/// Decision thresholds for [`PageDeck::compute_snap_target`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPolicy {
    pub crossing_fraction: f32,
    pub fast_swipe: bool,
    pub swipe_speed_threshold: f32,
    pub tie_break: TieBreak,
}

impl Default for SnapPolicy {
    fn default() -> Self {
        Self::from(&PagingConfig::default())
    }
}

impl From<&PagingConfig> for SnapPolicy {
    fn from(config: &PagingConfig) -> Self {
        Self {
            crossing_fraction: config.crossing_fraction,
            fast_swipe: config.fast_swipe,
            swipe_speed_threshold: config.swipe_speed_threshold,
            tie_break: config.tie_break,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageDeck {
    pages: Vec<Page>,
    focus: Option<usize>,
    geometry: DeckGeometry,
    policy: SnapPolicy,
}

impl PageDeck {
    pub fn new(geometry: DeckGeometry, policy: SnapPolicy) -> Self {
        Self {
            pages: Vec::new(),
            focus: None,
            geometry,
            policy,
        }
    }

    /// Deck for a viewport of `viewport_width`, with geometry and thresholds
    /// taken from `config`.
    pub fn from_config(viewport_width: f32, config: &PagingConfig) -> Self {
        Self::new(
            DeckGeometry::from_viewport(
                viewport_width,
                config.gutter,
                config.viewport_inset_gutters,
            ),
            SnapPolicy::from(config),
        )
    }

    /// Replace every page. Focus resets to the first page, or to `None` for
    /// an empty list.
    pub fn load(&mut self, pages: Vec<Page>) {
        self.pages = pages;
        self.focus = if self.pages.is_empty() { None } else { Some(0) };
        tracing::debug!(count = self.pages.len(), "deck loaded");
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
        self.clamp_focus();
    }

    pub fn remove(&mut self, index: usize) -> PagerResult<Page> {
        self.check_index(index)?;
        let page = self.pages.remove(index);
        self.clamp_focus();
        Ok(page)
    }

    fn clamp_focus(&mut self) {
        self.focus = match (self.focus, self.last_index()) {
            (_, None) => None,
            (None, Some(_)) => Some(0),
            (Some(focus), Some(last)) => Some(focus.min(last)),
        };
    }

    fn check_index(&self, index: usize) -> PagerResult<()> {
        if index < self.pages.len() {
            Ok(())
        } else {
            Err(PagerError::OutOfRange {
                index,
                count: self.pages.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.pages.len().checked_sub(1)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|page| page.id() == id)
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused(&self) -> Option<&Page> {
        self.focus.and_then(|i| self.pages.get(i))
    }

    /// Move focus directly (programmatic jumps, indicator taps). Rejected
    /// indices leave the focus untouched.
    pub fn set_focus(&mut self, index: usize) -> PagerResult<()> {
        self.check_index(index)?;
        self.focus = Some(index);
        Ok(())
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) -> PagerResult<&Page> {
        self.check_index(index)?;
        let page = &mut self.pages[index];
        page.set_selected(selected);
        Ok(page)
    }

    pub fn set_looping(&mut self, index: usize, looping: bool) -> PagerResult<()> {
        self.check_index(index)?;
        self.pages[index].set_looping(looping);
        Ok(())
    }

    /// Neighbour of the focused page in `step` direction, if one exists.
    pub fn step_target(&self, step: PageStep) -> Option<usize> {
        let focus = self.focus?;
        let last = self.last_index()?;
        focus
            .checked_add_signed(step.delta())
            .filter(|&target| target <= last)
    }

    pub fn geometry(&self) -> &DeckGeometry {
        &self.geometry
    }

    pub fn policy(&self) -> &SnapPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: SnapPolicy) {
        self.policy = policy;
    }

    /// Recompute the page width after a viewport resize. Geometry with an
    /// explicit page width keeps it.
    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        self.geometry = match self.geometry.inset_gutters {
            Some(inset) => {
                DeckGeometry::from_viewport(viewport_width, self.geometry.gutter, inset)
            }
            None => DeckGeometry {
                viewport_width,
                ..self.geometry
            },
        };
    }

    pub fn canonical_offset(&self, index: usize) -> f32 {
        self.geometry.canonical_offset(index)
    }

    /// Signed distance of `offset` from the focused page's resting offset,
    /// in page widths. Unclamped, so overscroll reads beyond ±1.
    pub fn offset_ratio(&self, offset: f32) -> Option<f32> {
        let focus = self.focus?;
        Some((offset - self.canonical_offset(focus)) / self.geometry.page_width)
    }

    /// Decide which page a gesture ending at `current_offset` settles on,
    /// measured from `current_focus`.
    pub fn compute_snap_target(
        &self,
        current_offset: f32,
        motion: GestureMotion,
        current_focus: usize,
    ) -> PagerResult<SnapTarget> {
        let last = self.last_index().ok_or(PagerError::EmptyDeck)?;
        self.check_index(current_focus)?;

        let page_width = self.geometry.page_width;
        let delta = current_offset - self.canonical_offset(current_focus);

        // Rubber-band: nothing lies beyond the first and last pages.
        let at_leading_edge = current_focus == 0 && delta < 0.0;
        let at_trailing_edge = current_focus == last && delta > 0.0;

        let target = if at_leading_edge || at_trailing_edge {
            current_focus as isize
        } else if delta.abs() > page_width * self.policy.crossing_fraction {
            // Bounded by the deck so huge or infinite ratios cannot overflow.
            let span = last as f32;
            let pages = self
                .policy
                .tie_break
                .round(delta / page_width)
                .clamp(-span, span);
            current_focus as isize + pages as isize
        } else if self.policy.fast_swipe
            && delta != 0.0
            && motion.speed(delta) > self.policy.swipe_speed_threshold
        {
            current_focus as isize + if delta > 0.0 { 1 } else { -1 }
        } else {
            current_focus as isize
        };

        let index = target.clamp(0, last as isize) as usize;
        Ok(SnapTarget {
            index,
            offset: self.canonical_offset(index),
        })
    }

    /// [`Self::compute_snap_target`] from the current focus.
    pub fn decide(&self, intent: ScrollIntent) -> PagerResult<SnapTarget> {
        let focus = self.focus.ok_or(PagerError::EmptyDeck)?;
        self.compute_snap_target(intent.offset, intent.motion, focus)
    }
}
