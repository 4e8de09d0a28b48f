//! Scroll-driven prefetch policy.

/// How many items from the end the trigger item sits.
pub const DEFAULT_LOOKBACK: usize = 5;

/// Rendered result layout, in the host's length unit (terminal rows here).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Geometry {
    /// Top offset of each rendered item, in render order.
    pub item_tops: Vec<usize>,
    pub scroll_top: usize,
    pub viewport_height: usize,
}

impl Geometry {
    /// Geometry of items stacked without gaps, given their heights.
    pub fn stacked(heights: &[usize], scroll_top: usize, viewport_height: usize) -> Self {
        let item_tops = heights
            .iter()
            .scan(0usize, |top, height| {
                let this = *top;
                *top += height;
                Some(this)
            })
            .collect();

        Self {
            item_tops,
            scroll_top,
            viewport_height,
        }
    }
}

/// Fires the next page request once the item `lookback` positions from the
/// end scrolls into view, so loading starts before the user hits the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPrefetcher {
    lookback: usize,
}

impl ScrollPrefetcher {
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback: lookback.max(1),
        }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Whether the next page should be requested. Fewer rendered items than
    /// the lookback never trigger.
    pub fn should_load_more(
        &self,
        item_tops: &[usize],
        scroll_top: usize,
        viewport_height: usize,
    ) -> bool {
        let Some(trigger_index) = item_tops.len().checked_sub(self.lookback) else {
            return false;
        };
        item_tops[trigger_index] <= scroll_top + viewport_height
    }

    pub fn should_load_more_in(&self, geometry: &Geometry) -> bool {
        self.should_load_more(
            &geometry.item_tops,
            geometry.scroll_top,
            geometry.viewport_height,
        )
    }
}

impl Default for ScrollPrefetcher {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK)
    }
}
