//! A paging indicator: a row of dots for a paged view that scrolls and
//! shrinks its edge dots once there are more pages than fit.
//!
//! [`PageIndicator`] owns the state, works out the visible window and lays
//! the dots out. Drawing and animation stay with the host, which plugs in
//! through [`DotPlaceholder`], [`DotProvider`] and [`Animator`].

use std::time::Duration;

pub mod animation;
pub mod geometry;
pub mod indicator;
pub mod layout;
pub mod placeholder;
pub mod style;
pub mod window;

pub use animation::{Animator, Curve, Immediate, Transition};
pub use geometry::{Point, Rect, Size};
pub use indicator::{PageIndicator, SetOutcome};
pub use layout::{DotFrame, IndicatorLayout};
pub use placeholder::{CircleDot, DotPlaceholder, DotPool, DotProvider};
pub use style::{DotMetrics, DotStyle, ScalePolicy, ScaleSteps, Tint, TintParseError};
pub use window::WindowSpec;

pub const DEFAULT_DOT_SIZE: f64 = 8.0;
pub const DEFAULT_SELECTED_DOT_SIZE: f64 = 16.0;
pub const DEFAULT_SPACING: f64 = 8.0;
pub const DEFAULT_PADDING: f64 = 8.0;
pub const DEFAULT_MAX_VISIBLE_DOTS: usize = 5;
pub const DEFAULT_CENTER_DOTS: usize = 3;
pub const DEFAULT_SCALE_STEPS: [f64; 4] = [1.0, 0.66, 0.4, 0.2];
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(250);

pub const MIN_DOT_SIZE: f64 = 1.0;
pub const MIN_MAX_VISIBLE_DOTS: usize = 3;
pub const MIN_CENTER_DOTS: usize = 1;
