use cairo::Context;
use pagedots::{Animator, Curve, DotPlaceholder, DotProvider, Rect, Tint, Transition};
use palette::Srgba;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Set while the indicator applies an animated change.
pub type Transaction = Rc<Cell<Option<(Duration, Curve)>>>;

/// What the screen shows for one dot, including an in-flight tween.
#[derive(Debug, Clone)]
pub struct DotVisual {
    from: Rect,
    to: Rect,
    started: Instant,
    duration: Duration,
    curve: Curve,
    hidden: bool,
    attached: bool,
    tint: Tint,
}

impl DotVisual {
    pub fn new(now: Instant) -> Self {
        Self {
            from: Rect::default(),
            to: Rect::default(),
            started: now,
            duration: Duration::ZERO,
            curve: Curve::default(),
            hidden: true,
            attached: false,
            tint: Tint::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    pub fn frame_at(&self, now: Instant) -> Rect {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        self.from.lerp(&self.to, self.curve.sample(t))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now < self.started + self.duration
    }

    pub fn is_drawn(&self) -> bool {
        self.attached && !self.hidden
    }

    /// Moves towards `to`. Tweens from wherever the dot is now while a
    /// transaction is open, so an interrupted slide carries on smoothly.
    fn retarget(&mut self, to: Rect, transaction: Option<(Duration, Curve)>, now: Instant) {
        match transaction {
            Some((duration, curve)) if !self.hidden => {
                self.from = self.frame_at(now);
                self.to = to;
                self.started = now;
                self.duration = duration;
                self.curve = curve;
            }
            _ => {
                self.from = to;
                self.to = to;
                self.duration = Duration::ZERO;
            }
        }
    }
}

pub struct CairoDot {
    visual: Rc<RefCell<DotVisual>>,
    transaction: Transaction,
}

impl DotPlaceholder for CairoDot {
    fn set_frame(&mut self, frame: Rect) {
        self.visual
            .borrow_mut()
            .retarget(frame, self.transaction.get(), Instant::now());
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.visual.borrow_mut().hidden = hidden;
    }

    fn set_tint(&mut self, tint: Tint) {
        self.visual.borrow_mut().tint = tint;
    }

    fn attach(&mut self) {
        self.visual.borrow_mut().attached = true;
    }

    fn detach(&mut self) {
        let mut visual = self.visual.borrow_mut();
        visual.attached = false;
        visual.hidden = true;
    }
}

/// Hands out [`CairoDot`]s and remembers them for drawing, along with the
/// content band behind them.
#[derive(Clone)]
pub struct DotRegistry {
    visuals: Rc<RefCell<Vec<Weak<RefCell<DotVisual>>>>>,
    band: Rc<RefCell<DotVisual>>,
    transaction: Transaction,
}

impl Default for DotRegistry {
    fn default() -> Self {
        let mut band = DotVisual::new(Instant::now());
        band.hidden = false;
        band.attached = true;
        Self {
            visuals: Rc::default(),
            band: Rc::new(RefCell::new(band)),
            transaction: Transaction::default(),
        }
    }
}

impl DotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the band to `content`, the way the dots under it just moved.
    pub fn sync_band(&self, content: Rect, transition: Transition) {
        let mut band = self.band.borrow_mut();
        if band.to == content {
            return;
        }
        let transaction = match transition {
            Transition::Immediate => None,
            Transition::Animated { duration, curve } => Some((duration, curve)),
        };
        band.retarget(content, transaction, Instant::now());
    }

    pub fn band_at(&self, now: Instant) -> Rect {
        self.band.borrow().frame_at(now)
    }

    pub fn animator(&self) -> TweenAnimator {
        TweenAnimator {
            transaction: self.transaction.clone(),
        }
    }

    pub fn provider(&self) -> Box<dyn DotProvider> {
        Box::new(self.clone())
    }

    /// Live visuals that should be on screen, in creation order.
    pub fn drawn(&self) -> Vec<DotVisual> {
        let mut visuals = self.visuals.borrow_mut();
        visuals.retain(|w| w.strong_count() > 0);
        visuals
            .iter()
            .filter_map(Weak::upgrade)
            .map(|v| v.borrow().clone())
            .filter(DotVisual::is_drawn)
            .collect()
    }

    pub fn any_animating(&self, now: Instant) -> bool {
        self.band.borrow().is_animating(now) || self.drawn().iter().any(|v| v.is_animating(now))
    }
}

impl DotProvider for DotRegistry {
    fn provide_dot(&mut self, index: usize) -> Option<Box<dyn DotPlaceholder>> {
        log::trace!("Creating cairo dot for page {}", index);
        let visual = Rc::new(RefCell::new(DotVisual::new(Instant::now())));
        self.visuals.borrow_mut().push(Rc::downgrade(&visual));
        Some(Box::new(CairoDot {
            visual,
            transaction: self.transaction.clone(),
        }))
    }
}

/// Opens a transaction so every frame written by `changes` tweens.
pub struct TweenAnimator {
    transaction: Transaction,
}

impl Animator for TweenAnimator {
    fn animate(&mut self, duration: Duration, curve: Curve, changes: &mut dyn FnMut()) {
        self.transaction.set(Some((duration, curve)));
        changes();
        self.transaction.set(None);
    }
}

fn rounded_rect(cr: &Context, rect: Rect) {
    let (x, y, w, h) = (rect.origin.x, rect.origin.y, rect.size.width, rect.size.height);
    let r = w.min(h) / 2.0;
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(cr: &Context, registry: &DotRegistry, band: Srgba<f64>) -> Result<(), cairo::Error> {
    let now = Instant::now();
    let content = registry.band_at(now);
    if content.size.width > 0.0 {
        set_source(cr, band);
        rounded_rect(cr, content);
        cr.fill()?;
    }

    for visual in registry.drawn() {
        set_source(cr, *visual.tint);
        rounded_rect(cr, visual.frame_at(now));
        cr.fill()?;
    }
    Ok(())
}
