use crate::{
    DEFAULT_CENTER_DOTS, DEFAULT_DOT_SIZE, DEFAULT_MAX_VISIBLE_DOTS, DEFAULT_PADDING,
    DEFAULT_SCALE_STEPS, DEFAULT_SELECTED_DOT_SIZE, DEFAULT_SPACING, DEFAULT_TRANSITION,
};
use derive_more::{AsRef, Deref, From, Into};
use palette::Srgba;
use palette::rgb::Srgb;
use serde::Deserialize;
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::str::FromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// How visible dots are shrunk towards the window edges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum ScalePolicy {
    /// Only the outermost dot on a side with hidden pages beyond it is shrunk,
    /// always by tier 1.
    #[default]
    #[strum(serialize = "edge", serialize = "edge-only", serialize = "EdgeOnly")]
    EdgeOnly,
    /// Every dot past the stable half-width is shrunk by its distance from
    /// the window centre, using all four tiers.
    #[strum(serialize = "distance", serialize = "tiers", serialize = "DistanceTiers")]
    DistanceTiers,
}

/// Scale factors indexed by tier. Tier 0 is full size, tier 3 the smallest.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, AsRef, Deserialize)]
#[serde(transparent)]
pub struct ScaleSteps([f64; 4]);

impl ScaleSteps {
    pub const TIERS: usize = 4;

    pub fn new(steps: [f64; 4]) -> Self {
        Self(steps)
    }

    /// Clamps every factor into `[0, 1]`; NaN becomes full scale.
    pub fn normalized(self) -> Self {
        Self(self.0.map(|s| if s.is_nan() { 1.0 } else { s.clamp(0.0, 1.0) }))
    }

    pub fn scale(&self, tier: usize) -> f64 {
        self.0[tier.min(Self::TIERS - 1)]
    }
}

impl Default for ScaleSteps {
    fn default() -> Self {
        Self(DEFAULT_SCALE_STEPS)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TintParseError {
    #[error("Invalid hex color '{input}': {reason}")]
    Hex { input: String, reason: String },
}

/// A dot colour. Parses `#rgb`, `#rrggbb` and `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, AsRef, DeserializeFromStr)]
pub struct Tint(Srgba<f64>);

impl Tint {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }
}

impl FromStr for Tint {
    type Err = TintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = |reason: String| TintParseError::Hex {
            input: s.to_string(),
            reason,
        };

        if !hex.is_ascii() {
            return Err(invalid("non-ASCII characters".to_string()));
        }

        let (rgb_part, alpha) = match hex.len() {
            8 => {
                let alpha = u8::from_str_radix(&hex[6..], 16).map_err(|e| invalid(e.to_string()))?;
                (&hex[..6], alpha as f64 / 255.0)
            }
            _ => (hex, 1.0),
        };

        let rgb: Srgb<f64> = Srgb::<u8>::from_str(rgb_part)
            .map_err(|e| invalid(e.to_string()))?
            .into_format();

        Ok(Self::new(rgb.red, rgb.green, rgb.blue, alpha))
    }
}

/// Size and spacing of dots, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotMetrics {
    pub dot_size: f64,
    pub selected_dot_size: f64,
    pub spacing: f64,
    pub horizontal_padding: f64,
}

impl DotMetrics {
    pub fn band_height(&self) -> f64 {
        self.dot_size.max(self.selected_dot_size)
    }
}

impl Default for DotMetrics {
    fn default() -> Self {
        Self {
            dot_size: DEFAULT_DOT_SIZE,
            selected_dot_size: DEFAULT_SELECTED_DOT_SIZE,
            spacing: DEFAULT_SPACING,
            horizontal_padding: DEFAULT_PADDING,
        }
    }
}

/// Complete visual configuration of an indicator, as read from a config file.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DotStyle {
    pub dot_size: f64,
    pub selected_dot_size: f64,
    pub spacing: f64,
    pub horizontal_padding: f64,
    pub max_visible_dots: usize,
    pub center_dots: usize,
    pub scale_steps: ScaleSteps,
    pub scale_policy: ScalePolicy,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub transition_duration: Duration,
    pub page_tint: Tint,
    pub current_page_tint: Tint,
    pub hides_for_single_page: bool,
}

impl Default for DotStyle {
    fn default() -> Self {
        let metrics = DotMetrics::default();
        Self {
            dot_size: metrics.dot_size,
            selected_dot_size: metrics.selected_dot_size,
            spacing: metrics.spacing,
            horizontal_padding: metrics.horizontal_padding,
            max_visible_dots: DEFAULT_MAX_VISIBLE_DOTS,
            center_dots: DEFAULT_CENTER_DOTS,
            scale_steps: ScaleSteps::default(),
            scale_policy: ScalePolicy::default(),
            transition_duration: DEFAULT_TRANSITION,
            page_tint: Tint::new(1.0, 1.0, 1.0, 89.0 / 255.0),
            current_page_tint: Tint::new(1.0, 1.0, 1.0, 1.0),
            hides_for_single_page: false,
        }
    }
}
