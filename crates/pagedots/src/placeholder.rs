use crate::geometry::Rect;
use crate::style::Tint;
use std::fmt;

/// The visual object standing in for one dot.
///
/// The indicator only ever positions, hides and tints it. What it looks like
/// and how it reaches the screen is up to the implementation.
pub trait DotPlaceholder {
    fn set_frame(&mut self, frame: Rect);
    fn set_hidden(&mut self, hidden: bool);
    fn set_tint(&mut self, tint: Tint);

    /// Called when the placeholder is handed to the indicator.
    fn attach(&mut self) {}

    /// Called when the placeholder leaves the indicator for the reuse pool.
    fn detach(&mut self) {}
}

/// Supplies custom placeholders per page index.
pub trait DotProvider {
    /// `None` falls back to a pooled or default [`CircleDot`].
    fn provide_dot(&mut self, index: usize) -> Option<Box<dyn DotPlaceholder>>;
}

/// The built-in filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleDot {
    frame: Rect,
    hidden: bool,
    tint: Tint,
    attached: bool,
}

impl CircleDot {
    pub fn new() -> Self {
        Self {
            frame: Rect::default(),
            hidden: true,
            tint: Tint::new(1.0, 1.0, 1.0, 1.0),
            attached: false,
        }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Full-height rounding, so a wider frame draws as a pill.
    pub fn corner_radius(&self) -> f64 {
        self.frame.size.height / 2.0
    }
}

impl Default for CircleDot {
    fn default() -> Self {
        Self::new()
    }
}

impl DotPlaceholder for CircleDot {
    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.hidden = true;
    }
}

/// One placeholder per page, plus a LIFO stack of detached ones for reuse.
///
/// The provider is asked once per page index. An index that comes back after
/// a shrink takes its placeholder from the stack.
pub struct DotPool {
    active: Vec<Box<dyn DotPlaceholder>>,
    spare: Vec<Box<dyn DotPlaceholder>>,
    provider: Option<Box<dyn DotProvider>>,
    /// Indices below this have already been offered to the provider.
    asked: usize,
    constructed: usize,
}

impl DotPool {
    pub fn new(provider: Option<Box<dyn DotProvider>>) -> Self {
        Self {
            active: Vec::new(),
            spare: Vec::new(),
            provider,
            asked: 0,
            constructed: 0,
        }
    }

    /// Detaches and drops every placeholder, then switches to `provider`.
    /// The caller reconciles again to rebuild the active set.
    pub fn replace_provider(&mut self, provider: Option<Box<dyn DotProvider>>) {
        while let Some(mut dot) = self.active.pop() {
            dot.detach();
        }
        self.spare.clear();
        self.provider = provider;
        self.asked = 0;
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Detached placeholders waiting for reuse.
    pub fn spare_len(&self) -> usize {
        self.spare.len()
    }

    /// How many default circles have been built so far.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Grows or shrinks the active set to exactly `count` placeholders.
    pub fn reconcile(&mut self, count: usize) {
        while self.active.len() > count {
            if let Some(mut dot) = self.active.pop() {
                dot.detach();
                self.spare.push(dot);
            }
        }

        while self.active.len() < count {
            let index = self.active.len();
            let mut dot = self.acquire(index);
            dot.attach();
            dot.set_hidden(true);
            self.active.push(dot);
        }
    }

    fn acquire(&mut self, index: usize) -> Box<dyn DotPlaceholder> {
        if index >= self.asked {
            self.asked = index + 1;
            if let Some(dot) = self.provider.as_mut().and_then(|p| p.provide_dot(index)) {
                return dot;
            }
        }

        self.spare.pop().unwrap_or_else(|| {
            self.constructed += 1;
            log::trace!("Constructing default dot for page {}", index);
            Box::new(CircleDot::new())
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Box<dyn DotPlaceholder>)> {
        self.active.iter_mut().enumerate()
    }
}

impl fmt::Debug for DotPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DotPool")
            .field("active", &self.active.len())
            .field("spare", &self.spare.len())
            .field("has_provider", &self.provider.is_some())
            .field("asked", &self.asked)
            .field("constructed", &self.constructed)
            .finish()
    }
}
