use crate::animation::{Animator, Immediate, Transition};
use crate::geometry::Size;
use crate::layout::{self, IndicatorLayout, LayoutInput};
use crate::placeholder::{DotPool, DotProvider};
use crate::style::{DotMetrics, DotStyle, ScalePolicy, ScaleSteps, Tint};
use crate::window::WindowSpec;
use crate::{MIN_CENTER_DOTS, MIN_DOT_SIZE, MIN_MAX_VISIBLE_DOTS};
use std::fmt::Debug;
use std::ops::Range;
use std::time::Duration;

/// What a setter did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The effective value did not change; nothing was recomputed.
    NoOp,
    Applied,
    /// Applied after adjusting the input to the nearest valid value.
    Normalized,
}

impl SetOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

fn settle<T: PartialEq + Debug>(field: &str, requested: T, effective: T) -> SetOutcome {
    if requested == effective {
        SetOutcome::Applied
    } else {
        log::debug!("{} normalized from {:?} to {:?}", field, requested, effective);
        SetOutcome::Normalized
    }
}

fn unchanged(field: &str) -> SetOutcome {
    log::trace!("{} unchanged, skipping", field);
    SetOutcome::NoOp
}

fn odd_at_least(n: usize, min: usize) -> usize {
    let n = n.max(min);
    if n % 2 == 0 { n + 1 } else { n }
}

fn length_at_least(value: f64, min: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { min }
}

/// A row of page dots.
///
/// Every setter validates its input, returns early when the effective value
/// is unchanged, and otherwise runs the recompute pipeline explicitly:
/// window, then tints, then layout. Only a change of window offset animates.
pub struct PageIndicator {
    page_count: usize,
    selected: usize,
    offset: usize,
    max_visible: usize,
    center_dots: usize,
    metrics: DotMetrics,
    steps: ScaleSteps,
    policy: ScalePolicy,
    page_tint: Tint,
    current_page_tint: Tint,
    transition_duration: Duration,
    hides_for_single_page: bool,
    bounds: Size,
    dots: DotPool,
    animator: Box<dyn Animator>,
    layout: IndicatorLayout,
    last_transition: Transition,
    needs_resize: bool,
}

impl PageIndicator {
    pub fn new(style: &DotStyle) -> Self {
        let mut indicator = Self {
            page_count: 0,
            selected: 0,
            offset: 0,
            max_visible: MIN_MAX_VISIBLE_DOTS,
            center_dots: MIN_CENTER_DOTS,
            metrics: DotMetrics::default(),
            steps: ScaleSteps::default(),
            policy: ScalePolicy::default(),
            page_tint: style.page_tint,
            current_page_tint: style.current_page_tint,
            transition_duration: style.transition_duration,
            hides_for_single_page: false,
            bounds: Size::default(),
            dots: DotPool::new(None),
            animator: Box::new(Immediate),
            layout: IndicatorLayout::default(),
            last_transition: Transition::Immediate,
            needs_resize: true,
        };
        indicator.apply_style(style);
        indicator
    }

    /// Replaces the placeholder source. Existing placeholders are detached,
    /// dropped and rebuilt through the new provider.
    pub fn with_provider(mut self, provider: Box<dyn DotProvider>) -> Self {
        self.dots.replace_provider(Some(provider));
        self.dots.reconcile(self.page_count);
        self.recolor();
        self.apply_layout(Transition::Immediate);
        self
    }

    pub fn with_animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.animator = animator;
        self
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// `None` while there are no pages.
    pub fn selected_page(&self) -> Option<usize> {
        (self.page_count > 0).then_some(self.selected)
    }

    pub fn window_offset(&self) -> usize {
        self.offset
    }

    pub fn max_visible_dots(&self) -> usize {
        self.max_visible
    }

    pub fn center_dots(&self) -> usize {
        self.center_dots
    }

    pub fn metrics(&self) -> &DotMetrics {
        &self.metrics
    }

    pub fn scale_steps(&self) -> &ScaleSteps {
        &self.steps
    }

    pub fn scale_policy(&self) -> ScalePolicy {
        self.policy
    }

    pub fn transition_duration(&self) -> Duration {
        self.transition_duration
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn window_spec(&self) -> WindowSpec {
        WindowSpec::new(self.page_count, self.max_visible, self.center_dots)
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.layout.visible.clone()
    }

    /// The geometry most recently handed to the placeholders.
    pub fn layout(&self) -> &IndicatorLayout {
        &self.layout
    }

    /// How the most recent layout reached the placeholders.
    pub fn last_transition(&self) -> Transition {
        self.last_transition
    }

    pub fn dots(&self) -> &DotPool {
        &self.dots
    }

    pub fn intrinsic_size(&self) -> Size {
        layout::intrinsic_size(&self.window_spec(), &self.metrics)
    }

    /// Whether the intrinsic size changed since the last call.
    pub fn take_needs_resize(&mut self) -> bool {
        std::mem::take(&mut self.needs_resize)
    }

    pub fn set_page_count(&mut self, count: usize) -> SetOutcome {
        if count == self.page_count {
            return unchanged("page_count");
        }

        self.dots.reconcile(count);
        self.page_count = count;
        self.selected = self.selected.min(count.saturating_sub(1));
        self.needs_resize = true;

        let slid = self.rewindow();
        self.recolor();
        self.apply_layout(self.transition_for(slid));
        SetOutcome::Applied
    }

    pub fn set_selected_page(&mut self, page: usize) -> SetOutcome {
        let Some(last) = self.page_count.checked_sub(1) else {
            return unchanged("selected_page");
        };
        let value = page.min(last);
        if value == self.selected {
            return unchanged("selected_page");
        }

        self.selected = value;
        let slid = self.rewindow();
        self.recolor();
        self.apply_layout(self.transition_for(slid));
        settle("selected_page", page, value)
    }

    pub fn select_next(&mut self) -> SetOutcome {
        self.set_selected_page(self.selected.saturating_add(1))
    }

    pub fn select_previous(&mut self) -> SetOutcome {
        self.set_selected_page(self.selected.saturating_sub(1))
    }

    pub fn set_max_visible_dots(&mut self, count: usize) -> SetOutcome {
        let value = odd_at_least(count, MIN_MAX_VISIBLE_DOTS);
        if value == self.max_visible {
            return unchanged("max_visible_dots");
        }

        self.max_visible = value;
        self.center_dots = self.center_dots.min(value);
        self.needs_resize = true;

        let slid = self.rewindow();
        self.apply_layout(self.transition_for(slid));
        settle("max_visible_dots", count, value)
    }

    pub fn set_center_dots(&mut self, count: usize) -> SetOutcome {
        let value = odd_at_least(count, MIN_CENTER_DOTS).min(self.max_visible);
        if value == self.center_dots {
            return unchanged("center_dots");
        }

        self.center_dots = value;
        let slid = self.rewindow();
        self.apply_layout(self.transition_for(slid));
        settle("center_dots", count, value)
    }

    pub fn set_dot_size(&mut self, size: f64) -> SetOutcome {
        let value = length_at_least(size, MIN_DOT_SIZE);
        self.set_metric("dot_size", size, value, |m| &mut m.dot_size)
    }

    pub fn set_selected_dot_size(&mut self, size: f64) -> SetOutcome {
        let value = length_at_least(size, MIN_DOT_SIZE);
        self.set_metric("selected_dot_size", size, value, |m| &mut m.selected_dot_size)
    }

    pub fn set_spacing(&mut self, spacing: f64) -> SetOutcome {
        let value = length_at_least(spacing, 0.0);
        self.set_metric("spacing", spacing, value, |m| &mut m.spacing)
    }

    pub fn set_horizontal_padding(&mut self, padding: f64) -> SetOutcome {
        let value = length_at_least(padding, 0.0);
        self.set_metric("horizontal_padding", padding, value, |m| &mut m.horizontal_padding)
    }

    fn set_metric(
        &mut self,
        field: &str,
        requested: f64,
        value: f64,
        slot: impl FnOnce(&mut DotMetrics) -> &mut f64,
    ) -> SetOutcome {
        let current = slot(&mut self.metrics);
        if *current == value {
            return unchanged(field);
        }
        *current = value;

        self.needs_resize = true;
        self.apply_layout(Transition::Immediate);
        if requested.is_nan() {
            log::debug!("{} normalized from NaN to {}", field, value);
            return SetOutcome::Normalized;
        }
        settle(field, requested, value)
    }

    pub fn set_transition_duration(&mut self, duration: Duration) -> SetOutcome {
        if duration == self.transition_duration {
            return unchanged("transition_duration");
        }
        self.transition_duration = duration;
        SetOutcome::Applied
    }

    pub fn set_colors(&mut self, page_tint: Tint, current_page_tint: Tint) -> SetOutcome {
        if page_tint == self.page_tint && current_page_tint == self.current_page_tint {
            return unchanged("colors");
        }
        self.page_tint = page_tint;
        self.current_page_tint = current_page_tint;
        self.recolor();
        SetOutcome::Applied
    }

    pub fn set_scale_steps(&mut self, steps: ScaleSteps) -> SetOutcome {
        let value = steps.normalized();
        if value == self.steps {
            return unchanged("scale_steps");
        }
        self.steps = value;
        self.apply_layout(Transition::Immediate);
        if steps.iter().zip(value.iter()).all(|(a, b)| a == b) {
            SetOutcome::Applied
        } else {
            log::debug!("scale_steps normalized to {:?}", *value);
            SetOutcome::Normalized
        }
    }

    pub fn set_scale_policy(&mut self, policy: ScalePolicy) -> SetOutcome {
        if policy == self.policy {
            return unchanged("scale_policy");
        }
        self.policy = policy;
        self.apply_layout(Transition::Immediate);
        SetOutcome::Applied
    }

    pub fn set_hides_for_single_page(&mut self, hides: bool) -> SetOutcome {
        if hides == self.hides_for_single_page {
            return unchanged("hides_for_single_page");
        }
        self.hides_for_single_page = hides;
        self.apply_layout(Transition::Immediate);
        SetOutcome::Applied
    }

    /// Host entry point for a change of available space.
    pub fn set_bounds(&mut self, bounds: Size) -> SetOutcome {
        if bounds == self.bounds {
            return unchanged("bounds");
        }
        self.bounds = bounds;
        self.apply_layout(Transition::Immediate);
        SetOutcome::Applied
    }

    /// Lays out again with the current state, without animating.
    pub fn relayout(&mut self) {
        self.apply_layout(Transition::Immediate);
    }

    /// Runs every setter with the values from `style`. Returns whether
    /// anything changed.
    pub fn apply_style(&mut self, style: &DotStyle) -> bool {
        [
            self.set_max_visible_dots(style.max_visible_dots),
            self.set_center_dots(style.center_dots),
            self.set_dot_size(style.dot_size),
            self.set_selected_dot_size(style.selected_dot_size),
            self.set_spacing(style.spacing),
            self.set_horizontal_padding(style.horizontal_padding),
            self.set_scale_steps(style.scale_steps),
            self.set_scale_policy(style.scale_policy),
            self.set_transition_duration(style.transition_duration),
            self.set_colors(style.page_tint, style.current_page_tint),
            self.set_hides_for_single_page(style.hides_for_single_page),
        ]
        .iter()
        .any(SetOutcome::changed)
    }

    fn transition_for(&self, slid: bool) -> Transition {
        if slid {
            Transition::slide(self.transition_duration)
        } else {
            Transition::Immediate
        }
    }

    /// Moves the window to follow the selection. Returns whether it moved.
    fn rewindow(&mut self) -> bool {
        let offset = self
            .window_spec()
            .follow(self.offset, self.selected_page());
        if offset == self.offset {
            return false;
        }
        log::debug!("Window offset {} -> {}", self.offset, offset);
        self.offset = offset;
        true
    }

    fn recolor(&mut self) {
        let selected = self.selected_page();
        let (page_tint, current_page_tint) = (self.page_tint, self.current_page_tint);
        for (page, dot) in self.dots.iter_mut() {
            dot.set_tint(if Some(page) == selected {
                current_page_tint
            } else {
                page_tint
            });
        }
    }

    fn layout_input(&self) -> LayoutInput<'_> {
        LayoutInput {
            spec: self.window_spec(),
            offset: self.offset,
            selected: self.selected_page(),
            metrics: &self.metrics,
            steps: &self.steps,
            policy: self.policy,
        }
    }

    fn apply_layout(&mut self, transition: Transition) {
        let layout = if self.hides_for_single_page && self.page_count == 1 {
            IndicatorLayout::empty(self.bounds)
        } else {
            self.layout_input().compute(self.bounds)
        };

        let dots = &mut self.dots;
        let mut apply = || {
            for (page, dot) in dots.iter_mut() {
                match layout.dot(page) {
                    Some(d) => {
                        dot.set_frame(d.frame);
                        dot.set_hidden(false);
                    }
                    None => dot.set_hidden(true),
                }
            }
        };

        match transition {
            Transition::Immediate => apply(),
            Transition::Animated { duration, curve } => {
                self.animator.animate(duration, curve, &mut apply)
            }
        }

        self.layout = layout;
        self.last_transition = transition;
    }
}

impl Default for PageIndicator {
    fn default() -> Self {
        Self::new(&DotStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Curve;
    use crate::geometry::Rect;
    use crate::placeholder::DotPlaceholder;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Frame(Rect),
        Hidden(bool),
        Tint(Tint),
        Attach,
        Detach,
    }

    type Log = Rc<RefCell<Vec<(usize, Call)>>>;

    struct RecordingDot {
        id: usize,
        log: Log,
    }

    impl DotPlaceholder for RecordingDot {
        fn set_frame(&mut self, frame: Rect) {
            self.log.borrow_mut().push((self.id, Call::Frame(frame)));
        }

        fn set_hidden(&mut self, hidden: bool) {
            self.log.borrow_mut().push((self.id, Call::Hidden(hidden)));
        }

        fn set_tint(&mut self, tint: Tint) {
            self.log.borrow_mut().push((self.id, Call::Tint(tint)));
        }

        fn attach(&mut self) {
            self.log.borrow_mut().push((self.id, Call::Attach));
        }

        fn detach(&mut self) {
            self.log.borrow_mut().push((self.id, Call::Detach));
        }
    }

    struct RecordingProvider {
        log: Log,
    }

    impl DotProvider for RecordingProvider {
        fn provide_dot(&mut self, index: usize) -> Option<Box<dyn DotPlaceholder>> {
            Some(Box::new(RecordingDot {
                id: index,
                log: self.log.clone(),
            }))
        }
    }

    struct CountingAnimator {
        count: Rc<Cell<usize>>,
        last: Rc<Cell<Option<(Duration, Curve)>>>,
    }

    impl Animator for CountingAnimator {
        fn animate(&mut self, duration: Duration, curve: Curve, changes: &mut dyn FnMut()) {
            self.count.set(self.count.get() + 1);
            self.last.set(Some((duration, curve)));
            changes();
        }
    }

    struct Harness {
        indicator: PageIndicator,
        log: Log,
        animations: Rc<Cell<usize>>,
        last_animation: Rc<Cell<Option<(Duration, Curve)>>>,
    }

    impl Harness {
        fn new(style: DotStyle, pages: usize) -> Self {
            let log = Log::default();
            let animations = Rc::new(Cell::new(0));
            let last_animation = Rc::new(Cell::new(None));
            let mut indicator = PageIndicator::new(&style)
                .with_provider(Box::new(RecordingProvider { log: log.clone() }))
                .with_animator(Box::new(CountingAnimator {
                    count: animations.clone(),
                    last: last_animation.clone(),
                }));
            indicator.set_bounds(Size::new(200.0, 40.0));
            indicator.set_page_count(pages);
            log.borrow_mut().clear();
            Self {
                indicator,
                log,
                animations,
                last_animation,
            }
        }

        fn calls(&self) -> Vec<(usize, Call)> {
            self.log.borrow().clone()
        }

        fn scale(&self, page: usize) -> Option<f64> {
            self.indicator.layout().dot(page).map(|d| d.scale)
        }
    }

    fn ten_pages() -> Harness {
        let style = DotStyle {
            max_visible_dots: 5,
            center_dots: 3,
            ..DotStyle::default()
        };
        Harness::new(style, 10)
    }

    #[test]
    fn test_first_page_window() {
        let h = ten_pages();
        let ind = &h.indicator;

        assert_eq!(ind.selected_page(), Some(0));
        assert_eq!(ind.window_offset(), 0);
        assert_eq!(ind.visible_range(), 0..5);
        assert_eq!(h.scale(0), Some(1.0));
        assert_eq!(h.scale(3), Some(1.0));
        assert_eq!(h.scale(4), Some(0.66));
        assert_eq!(h.scale(5), None);
    }

    #[test]
    fn test_selecting_last_page_slides_window() {
        let mut h = ten_pages();

        assert_eq!(h.indicator.set_selected_page(9), SetOutcome::Applied);
        assert_eq!(h.indicator.window_offset(), 7);
        assert_eq!(h.indicator.visible_range(), 7..10);
        assert_eq!(h.scale(7), Some(0.66));
        assert_eq!(h.scale(9), Some(1.0));
        assert_eq!(h.animations.get(), 1);
        assert_eq!(
            h.last_animation.get(),
            Some((DotStyle::default().transition_duration, Curve::EaseInOut))
        );

        let hidden: Vec<usize> = h
            .calls()
            .into_iter()
            .filter_map(|(id, call)| (call == Call::Hidden(true)).then_some(id))
            .collect();
        assert_eq!(hidden, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_selection_inside_stable_window_does_not_slide() {
        let mut h = ten_pages();

        h.indicator.set_selected_page(1);
        h.indicator.set_selected_page(2);
        assert_eq!(h.indicator.window_offset(), 0);
        assert_eq!(h.animations.get(), 0);

        let style = DotStyle::default();
        let tints: Vec<(usize, Call)> = h
            .calls()
            .into_iter()
            .filter(|(_, c)| matches!(c, Call::Tint(_)))
            .collect();
        assert!(tints.contains(&(2, Call::Tint(style.current_page_tint))));
        assert!(tints.contains(&(1, Call::Tint(style.page_tint))));
    }

    #[test]
    fn test_few_pages_never_slide_or_shrink() {
        let style = DotStyle {
            max_visible_dots: 7,
            center_dots: 3,
            ..DotStyle::default()
        };
        let mut h = Harness::new(style, 3);

        for page in [2, 0, 1, 2] {
            h.indicator.set_selected_page(page);
            assert_eq!(h.indicator.window_offset(), 0);
            assert_eq!(h.indicator.visible_range(), 0..3);
            assert!((0..3).all(|p| h.scale(p) == Some(1.0)));
        }
        assert_eq!(h.animations.get(), 0);
    }

    #[test]
    fn test_repeated_values_are_noops() {
        let mut h = ten_pages();
        h.indicator.set_selected_page(4);
        h.log.borrow_mut().clear();
        let animations = h.animations.get();
        let style = DotStyle::default();

        let ind = &mut h.indicator;
        assert_eq!(ind.set_page_count(10), SetOutcome::NoOp);
        assert_eq!(ind.set_selected_page(4), SetOutcome::NoOp);
        assert_eq!(ind.set_max_visible_dots(4), SetOutcome::NoOp);
        assert_eq!(ind.set_center_dots(2), SetOutcome::NoOp);
        assert_eq!(ind.set_dot_size(style.dot_size), SetOutcome::NoOp);
        assert_eq!(ind.set_spacing(style.spacing), SetOutcome::NoOp);
        assert_eq!(ind.set_horizontal_padding(style.horizontal_padding), SetOutcome::NoOp);
        assert_eq!(ind.set_colors(style.page_tint, style.current_page_tint), SetOutcome::NoOp);
        assert_eq!(ind.set_scale_steps(style.scale_steps), SetOutcome::NoOp);
        assert_eq!(ind.set_scale_policy(style.scale_policy), SetOutcome::NoOp);
        assert_eq!(ind.set_bounds(Size::new(200.0, 40.0)), SetOutcome::NoOp);
        assert!(!ind.apply_style(&style));

        assert!(h.calls().is_empty());
        assert_eq!(h.animations.get(), animations);
        assert_eq!(h.indicator.dots().spare_len(), 0);
    }

    #[test]
    fn test_window_sizes_forced_odd_and_ordered() {
        let mut h = ten_pages();
        let ind = &mut h.indicator;

        assert_eq!(ind.set_max_visible_dots(6), SetOutcome::Normalized);
        assert_eq!(ind.max_visible_dots(), 7);
        assert_eq!(ind.set_center_dots(7), SetOutcome::Applied);

        assert_eq!(ind.set_max_visible_dots(1), SetOutcome::Normalized);
        assert_eq!(ind.max_visible_dots(), 3);
        assert_eq!(ind.center_dots(), 3);

        assert_eq!(ind.set_center_dots(0), SetOutcome::Normalized);
        assert_eq!(ind.center_dots(), 1);
        assert_eq!(ind.set_center_dots(12), SetOutcome::Normalized);
        assert_eq!(ind.center_dots(), 3);
    }

    #[test]
    fn test_selection_clamped_to_page_count() {
        let mut h = ten_pages();
        let ind = &mut h.indicator;

        assert_eq!(ind.set_selected_page(99), SetOutcome::Normalized);
        assert_eq!(ind.selected_page(), Some(9));

        ind.set_page_count(4);
        assert_eq!(ind.selected_page(), Some(3));
        assert_eq!(ind.window_offset(), 0);
        assert_eq!(ind.visible_range(), 0..4);

        ind.set_page_count(0);
        assert_eq!(ind.selected_page(), None);
        assert_eq!(ind.set_selected_page(2), SetOutcome::NoOp);
        assert!(ind.layout().dots.is_empty());
        assert_eq!(ind.layout().content.size, Size::default());
    }

    #[test]
    fn test_shrinking_and_regrowing_reuses_default_dots() {
        let mut ind = PageIndicator::default();
        ind.set_page_count(10);
        assert_eq!(ind.dots().constructed(), 10);

        ind.set_page_count(3);
        assert_eq!(ind.dots().spare_len(), 7);

        ind.set_page_count(10);
        assert_eq!(ind.dots().spare_len(), 0);
        assert_eq!(ind.dots().constructed(), 10);
        assert_eq!(ind.dots().len(), 10);
    }

    #[test]
    fn test_shrinking_detaches_surplus_dots() {
        let mut h = ten_pages();
        h.indicator.set_page_count(8);

        let detached: Vec<usize> = h
            .calls()
            .into_iter()
            .filter_map(|(id, call)| (call == Call::Detach).then_some(id))
            .collect();
        assert_eq!(detached, vec![9, 8]);
    }

    #[test]
    fn test_new_dots_start_attached_and_hidden() {
        let mut h = ten_pages();
        h.indicator.set_page_count(11);

        let calls: Vec<Call> = h
            .calls()
            .into_iter()
            .filter_map(|(id, call)| (id == 10).then_some(call))
            .collect();
        assert_eq!(calls[..2], [Call::Attach, Call::Hidden(true)]);
    }

    #[test]
    fn test_metrics_clamped_and_mark_resize() {
        let mut ind = PageIndicator::default();
        ind.set_page_count(3);
        ind.take_needs_resize();

        assert_eq!(ind.set_dot_size(-4.0), SetOutcome::Normalized);
        assert_eq!(ind.metrics().dot_size, MIN_DOT_SIZE);
        assert!(ind.take_needs_resize());
        assert!(!ind.take_needs_resize());

        assert_eq!(ind.set_spacing(f64::NAN), SetOutcome::Normalized);
        assert_eq!(ind.metrics().spacing, 0.0);
        assert_eq!(ind.set_horizontal_padding(f64::INFINITY), SetOutcome::Normalized);
        assert_eq!(ind.metrics().horizontal_padding, 0.0);
        assert_eq!(ind.set_selected_dot_size(20.0), SetOutcome::Applied);
        assert_eq!(ind.intrinsic_size().height, 20.0);
    }

    #[test]
    fn test_default_style_draws_selected_pill() {
        let mut ind = PageIndicator::default();
        ind.set_bounds(Size::new(200.0, 40.0));
        ind.set_page_count(3);

        let layout = ind.layout();
        let selected = layout.dot(0).unwrap().frame.size;
        let other = layout.dot(1).unwrap().frame.size;
        assert!(selected.width > other.width);
        assert_eq!(selected.height, other.height);
    }

    #[test]
    fn test_geometry_sum_for_any_configuration() {
        for pages in 0..14 {
            for max_visible in [3, 5, 9] {
                for selected in 0..pages.max(1) {
                    let mut ind = PageIndicator::default();
                    ind.set_bounds(Size::new(300.0, 30.0));
                    ind.set_selected_dot_size(14.0);
                    ind.set_max_visible_dots(max_visible);
                    ind.set_page_count(pages);
                    ind.set_selected_page(selected);

                    let layout = ind.layout();
                    let m = ind.metrics();
                    let n = layout.dots.len();
                    let widths: f64 = layout.dots.iter().map(|d| d.frame.size.width).sum();
                    let expected = if n == 0 {
                        0.0
                    } else {
                        widths + (n - 1) as f64 * m.spacing + 2.0 * m.horizontal_padding
                    };
                    assert_eq!(layout.content.size.width, expected);
                    let center = layout.content.center();
                    assert!((center.x - 150.0).abs() < 1e-9);
                    assert_eq!(center.y, 15.0);
                }
            }
        }
    }

    #[test]
    fn test_invariants_hold_across_mutations() {
        let mut ind = PageIndicator::default();
        let steps: [(usize, usize, usize, usize); 8] = [
            (10, 9, 4, 2),
            (3, 7, 8, 6),
            (0, 2, 3, 1),
            (25, 24, 6, 5),
            (25, 11, 11, 11),
            (6, 40, 3, 9),
            (1, 0, 0, 0),
            (17, 16, 5, 3),
        ];

        for (pages, selected, max_visible, center) in steps {
            ind.set_page_count(pages);
            ind.set_max_visible_dots(max_visible);
            ind.set_center_dots(center);
            ind.set_selected_page(selected);

            let max = ind.max_visible_dots();
            let center = ind.center_dots();
            assert_eq!(max % 2, 1);
            assert_eq!(center % 2, 1);
            assert!(center <= max);
            assert!(ind.window_offset() <= ind.window_spec().max_offset());
            match ind.selected_page() {
                Some(page) => {
                    assert!(page < pages);
                    assert!(ind.visible_range().contains(&page));
                }
                None => assert_eq!(pages, 0),
            }
        }
    }

    #[test]
    fn test_hides_for_single_page() {
        let mut h = Harness::new(DotStyle::default(), 1);
        assert_eq!(h.indicator.visible_range(), 0..1);

        h.indicator.set_hides_for_single_page(true);
        assert!(h.indicator.layout().dots.is_empty());
        assert_eq!(h.calls().last(), Some(&(0, Call::Hidden(true))));

        h.indicator.set_page_count(2);
        assert_eq!(h.indicator.visible_range(), 0..2);
    }

    #[test]
    fn test_scale_steps_refresh_geometry_without_sliding() {
        let mut h = ten_pages();
        let outcome = h
            .indicator
            .set_scale_steps(ScaleSteps::new([1.0, 0.5, 0.25, 2.0]));

        assert_eq!(outcome, SetOutcome::Normalized);
        assert_eq!(h.scale(4), Some(0.5));
        assert_eq!(h.indicator.window_offset(), 0);
        assert_eq!(h.animations.get(), 0);
    }

    #[test]
    fn test_shrinking_window_reclamps_offset_with_slide() {
        let mut h = ten_pages();
        h.indicator.set_selected_page(9);
        assert_eq!(h.animations.get(), 1);

        h.indicator.set_page_count(6);
        assert_eq!(h.indicator.selected_page(), Some(5));
        assert_eq!(h.indicator.window_offset(), 3);
        assert_eq!(h.indicator.visible_range(), 3..6);
        assert_eq!(h.animations.get(), 2);
    }

    #[test]
    fn test_window_size_changes_that_move_offset_slide() {
        let mut h = ten_pages();
        h.indicator.set_selected_page(9);
        assert_eq!(h.animations.get(), 1);

        assert_eq!(h.indicator.set_center_dots(5), SetOutcome::Applied);
        assert_eq!(h.indicator.window_offset(), 5);
        assert_eq!(h.animations.get(), 2);

        assert_eq!(h.indicator.set_max_visible_dots(11), SetOutcome::Applied);
        assert_eq!(h.indicator.window_offset(), 0);
        assert_eq!(h.indicator.visible_range(), 0..10);
        assert_eq!(h.animations.get(), 3);
        assert!(matches!(h.indicator.last_transition(), Transition::Animated { .. }));

        assert_eq!(h.indicator.set_center_dots(3), SetOutcome::Applied);
        assert_eq!(h.indicator.window_offset(), 0);
        assert_eq!(h.animations.get(), 3);
        assert_eq!(h.indicator.last_transition(), Transition::Immediate);
    }

    #[test]
    fn test_page_and_window_changes_mark_resize() {
        let mut h = ten_pages();
        h.indicator.take_needs_resize();

        h.indicator.set_page_count(11);
        assert!(h.indicator.take_needs_resize());
        assert!(!h.indicator.take_needs_resize());

        h.indicator.set_max_visible_dots(7);
        assert!(h.indicator.take_needs_resize());

        h.indicator.set_selected_page(3);
        assert!(!h.indicator.take_needs_resize());
    }

    #[test]
    fn test_provided_dots_reused_after_shrinking() {
        let mut h = ten_pages();
        for _ in 0..4 {
            h.indicator.set_page_count(3);
            h.indicator.set_page_count(10);
        }

        assert_eq!(h.indicator.dots().len(), 10);
        assert_eq!(h.indicator.dots().spare_len(), 0);
        assert_eq!(h.indicator.dots().constructed(), 0);

        // the page 9 dot came back through the pool, not the provider
        let page_nine: Vec<Call> = h
            .calls()
            .into_iter()
            .filter_map(|(id, call)| (id == 9).then_some(call))
            .filter(|call| matches!(call, Call::Attach | Call::Detach))
            .collect();
        assert_eq!(page_nine.len(), 8);
    }

    #[test]
    fn test_replacing_provider_detaches_live_dots() {
        let mut h = ten_pages();
        let fresh = Log::default();

        let indicator = std::mem::take(&mut h.indicator)
            .with_provider(Box::new(RecordingProvider { log: fresh.clone() }));

        let detached: Vec<usize> = h
            .calls()
            .into_iter()
            .filter_map(|(id, call)| (call == Call::Detach).then_some(id))
            .collect();
        assert_eq!(detached, (0..10).rev().collect::<Vec<_>>());

        let attached = fresh
            .borrow()
            .iter()
            .filter(|(_, call)| *call == Call::Attach)
            .count();
        assert_eq!(attached, 10);
        assert_eq!(indicator.dots().len(), 10);
    }

    #[test]
    fn test_zero_duration_never_animates() {
        let mut h = ten_pages();
        h.indicator.set_transition_duration(Duration::ZERO);
        h.indicator.set_selected_page(9);
        assert_eq!(h.indicator.window_offset(), 7);
        assert_eq!(h.animations.get(), 0);
    }

    #[test]
    fn test_select_next_and_previous_saturate() {
        let mut h = ten_pages();
        assert_eq!(h.indicator.select_previous(), SetOutcome::NoOp);
        assert_eq!(h.indicator.select_next(), SetOutcome::Applied);
        assert_eq!(h.indicator.selected_page(), Some(1));

        h.indicator.set_selected_page(9);
        assert_eq!(h.indicator.select_next(), SetOutcome::NoOp);
        assert_eq!(h.indicator.selected_page(), Some(9));
    }

    #[test]
    fn test_distance_policy_through_indicator() {
        let style = DotStyle {
            max_visible_dots: 9,
            center_dots: 3,
            scale_policy: ScalePolicy::DistanceTiers,
            ..DotStyle::default()
        };
        let mut h = Harness::new(style, 20);
        h.indicator.set_selected_page(10);

        assert_eq!(h.indicator.window_offset(), 9);
        assert_eq!(h.scale(9), Some(0.2));
        assert_eq!(h.scale(10), Some(0.4));
        assert_eq!(h.scale(11), Some(0.66));
        assert_eq!(h.scale(13), Some(1.0));
    }
}
