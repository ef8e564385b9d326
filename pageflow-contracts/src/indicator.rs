/// Direction requested by a tap on the indicator strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStep {
    Previous,
    Next,
}

impl PageStep {
    pub fn delta(self) -> isize {
        match self {
            PageStep::Previous => -1,
            PageStep::Next => 1,
        }
    }
}

/// Page indicator widget (dot strip).
pub trait PageIndicator {
    /// Rebuild for `count` pages; highlight resets to the first dot.
    fn set_count(&mut self, count: usize);

    /// Discrete, animated highlight swap.
    fn jump_to(&mut self, index: usize);

    /// Sub-page drag feedback. Called at scroll-event frequency; must not
    /// block.
    fn update_continuous(&mut self, offset_ratio: f32);
}
