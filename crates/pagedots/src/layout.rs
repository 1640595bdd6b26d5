use crate::geometry::{Point, Rect, Size};
use crate::style::{DotMetrics, ScalePolicy, ScaleSteps};
use crate::window::WindowSpec;
use std::ops::Range;

/// Geometry of one visible dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotFrame {
    pub page: usize,
    pub frame: Rect,
    pub scale: f64,
    pub selected: bool,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorLayout {
    pub visible: Range<usize>,
    pub dots: Vec<DotFrame>,
    /// The pill-shaped band behind the dots, centred in the bounds.
    pub content: Rect,
    pub corner_radius: f64,
}

impl IndicatorLayout {
    /// Zero-sized content at the centre of `bounds`.
    pub fn empty(bounds: Size) -> Self {
        Self {
            visible: 0..0,
            dots: Vec::new(),
            content: Rect::centered(
                Point::new(bounds.width / 2.0, bounds.height / 2.0),
                Size::default(),
            ),
            corner_radius: 0.0,
        }
    }

    pub fn dot(&self, page: usize) -> Option<&DotFrame> {
        self.dots.iter().find(|d| d.page == page)
    }

    pub fn is_visible(&self, page: usize) -> bool {
        self.visible.contains(&page)
    }
}

/// Everything a layout pass reads from the indicator state.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub spec: WindowSpec,
    pub offset: usize,
    pub selected: Option<usize>,
    pub metrics: &'a DotMetrics,
    pub steps: &'a ScaleSteps,
    pub policy: ScalePolicy,
}

impl LayoutInput<'_> {
    pub fn compute(&self, bounds: Size) -> IndicatorLayout {
        let visible = self.spec.visible_range(self.offset);
        if visible.is_empty() {
            return IndicatorLayout::empty(bounds);
        }

        let m = self.metrics;
        let sized: Vec<(usize, Size, f64)> = visible
            .clone()
            .map(|page| {
                let tier = self.spec.tier(self.offset, page, self.policy).unwrap_or(0);
                let scale = self.steps.scale(tier);
                let base = if Some(page) == self.selected {
                    m.selected_dot_size
                } else {
                    m.dot_size
                };
                (page, Size::new(base * scale, m.dot_size * scale), scale)
            })
            .collect();

        let dots_width: f64 = sized.iter().map(|(_, size, _)| size.width).sum();
        let gaps = (sized.len() - 1) as f64 * m.spacing;
        let width = dots_width + gaps + 2.0 * m.horizontal_padding;
        let height = m.band_height();

        let content = Rect::new(
            (bounds.width - width) / 2.0,
            (bounds.height - height) / 2.0,
            width,
            height,
        );
        let center_y = content.center().y;

        let mut x = content.origin.x + m.horizontal_padding;
        let dots = sized
            .into_iter()
            .map(|(page, size, scale)| {
                let frame = Rect::new(x, center_y - size.height / 2.0, size.width, size.height);
                x = frame.max_x() + m.spacing;
                DotFrame {
                    page,
                    frame,
                    scale,
                    selected: Some(page) == self.selected,
                }
            })
            .collect();

        IndicatorLayout {
            visible,
            dots,
            content,
            corner_radius: height / 2.0,
        }
    }
}

/// Preferred size: a full window of dots with one at selected size.
pub fn intrinsic_size(spec: &WindowSpec, metrics: &DotMetrics) -> Size {
    let count = spec.page_count.min(spec.max_visible);
    let height = metrics.band_height();
    if count == 0 {
        return Size::new(0.0, height);
    }

    let gaps = (count - 1) as f64;
    let width = gaps * metrics.dot_size
        + metrics.selected_dot_size
        + gaps * metrics.spacing
        + 2.0 * metrics.horizontal_padding;
    Size::new(width, height)
}
