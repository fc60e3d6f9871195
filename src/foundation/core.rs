use crate::foundation::error::{BioframeError, BioframeResult};

pub use kurbo::{Point, Rect};

/// Coarse screen-size bucket used to select presentation rules.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Phone-sized viewports.
    #[default]
    Mobile,
    /// Mid-sized viewports.
    Tablet,
    /// Wide viewports.
    Desktop,
}

impl ViewportClass {
    /// Parse a viewport class name; unknown names are rejected.
    pub fn parse(s: &str) -> BioframeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            other => Err(BioframeError::validation(format!(
                "unknown viewport class \"{other}\" (expected mobile, tablet or desktop)"
            ))),
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

/// Whole-pixel size of a box.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Construct a size from whole-pixel axes.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Round a fractional content box to whole pixels. Negative and non-finite values map to 0.
    pub fn from_f64(width: f64, height: f64) -> Self {
        Self {
            width: round_px(width),
            height: round_px(height),
        }
    }

    /// True when both axes differ from `other` by at most `tolerance` pixels.
    pub fn within(self, other: Self, tolerance: u32) -> bool {
        self.width.abs_diff(other.width) <= tolerance
            && self.height.abs_diff(other.height) <= tolerance
    }
}

/// `width / height` ratio as declared in CSS (`16 / 9`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AspectRatio {
    /// Width term.
    pub width: u32,
    /// Height term. Zero is treated as a square ratio.
    pub height: u32,
}

impl AspectRatio {
    /// `1 / 1`.
    pub const SQUARE: Self = Self::new(1, 1);

    /// Construct a ratio from its two terms.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height` as a float; 1.0 when the height term is zero.
    pub fn as_f64(self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }

    /// Height for a given width, rounded to whole pixels.
    pub fn height_for(self, width: u32) -> u32 {
        round_px(f64::from(width) / self.as_f64())
    }

    /// CSS `aspect-ratio` value, e.g. `"16 / 9"`.
    pub fn to_css(self) -> String {
        format!("{} / {}", self.width, self.height)
    }
}

/// Round to the nearest whole pixel, saturating into `u32`.
pub fn round_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    let r = v.round();
    if r >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        r as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
