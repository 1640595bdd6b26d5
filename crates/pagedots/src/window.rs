use crate::style::{ScalePolicy, ScaleSteps};
use std::ops::Range;

/// The inputs that decide which pages are on screen.
///
/// `max_visible` and `center_dots` are expected to be normalized already:
/// both odd, `center_dots <= max_visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub page_count: usize,
    pub max_visible: usize,
    pub center_dots: usize,
}

impl WindowSpec {
    pub fn new(page_count: usize, max_visible: usize, center_dots: usize) -> Self {
        Self {
            page_count,
            max_visible,
            center_dots,
        }
    }

    /// Whether the pages overflow the window and it has to slide at all.
    pub fn scrolls(&self) -> bool {
        self.page_count > self.max_visible
    }

    pub fn max_offset(&self) -> usize {
        if self.scrolls() {
            self.page_count - self.center_dots
        } else {
            0
        }
    }

    /// Pages the selection can move between without sliding the window.
    pub fn stable_range(&self, offset: usize) -> Range<usize> {
        offset..offset + self.center_dots
    }

    pub fn visible_range(&self, offset: usize) -> Range<usize> {
        let end = (offset + self.max_visible).min(self.page_count);
        offset.min(end)..end
    }

    /// Offset that keeps `selected` inside the stable window.
    ///
    /// The current offset is kept whenever it is still in bounds and the
    /// selection sits inside its stable window. Otherwise the selection is
    /// recentred.
    pub fn follow(&self, offset: usize, selected: Option<usize>) -> usize {
        if !self.scrolls() {
            return 0;
        }

        let max_offset = self.max_offset();
        let offset = offset.min(max_offset);

        match selected {
            Some(page) if !self.stable_range(offset).contains(&page) => page
                .saturating_sub(self.center_dots / 2)
                .min(max_offset),
            _ => offset,
        }
    }

    /// Scale tier of `page` for a window starting at `offset`, or `None`
    /// when the page is off screen.
    pub fn tier(&self, offset: usize, page: usize, policy: ScalePolicy) -> Option<usize> {
        if !self.visible_range(offset).contains(&page) {
            return None;
        }

        let more_before = offset > 0;
        let more_after = offset + self.max_visible < self.page_count;

        let tier = match policy {
            ScalePolicy::EdgeOnly => {
                let last = offset + self.max_visible - 1;
                let left_edge = page == offset && more_before;
                let right_edge = page == last && more_after;
                usize::from(left_edge || right_edge)
            }
            ScalePolicy::DistanceTiers => {
                let center = offset + self.max_visible / 2;
                let pages_beyond = if page < center {
                    more_before
                } else {
                    more_after
                };
                if pages_beyond {
                    page.abs_diff(center)
                        .saturating_sub(self.center_dots / 2)
                        .min(ScaleSteps::TIERS - 1)
                } else {
                    0
                }
            }
        };

        Some(tier)
    }
}
