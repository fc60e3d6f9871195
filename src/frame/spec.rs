use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::foundation::{
    error::{BioframeError, BioframeResult},
    pattern,
};

/// Avatar frame shapes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FrameType {
    /// No frame.
    #[default]
    None,
    /// Round picture.
    Circle,
    /// Landscape rectangle with rounded corners.
    RectH,
    /// Portrait rectangle with rounded corners.
    RectV,
    /// Square with rounded corners.
    Square,
    /// Portrait ellipse.
    OvalV,
    /// Heart-shaped clip path.
    Heart,
    /// Regular 5-gon.
    Pentagon,
    /// Regular 6-gon.
    Hexagon,
    /// Regular 7-gon.
    Heptagon,
    /// Regular 8-gon.
    Octagon,
    /// Regular 9-gon.
    Nonagon,
    /// Regular 10-gon.
    Decagon,
}

impl FrameType {
    /// Every frame type, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::None,
        Self::Circle,
        Self::RectH,
        Self::RectV,
        Self::Square,
        Self::OvalV,
        Self::Heart,
        Self::Pentagon,
        Self::Hexagon,
        Self::Heptagon,
        Self::Octagon,
        Self::Nonagon,
        Self::Decagon,
    ];

    /// Kebab-case name as stored in settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Circle => "circle",
            Self::RectH => "rect-h",
            Self::RectV => "rect-v",
            Self::Square => "square",
            Self::OvalV => "oval-v",
            Self::Heart => "heart",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Heptagon => "heptagon",
            Self::Octagon => "octagon",
            Self::Nonagon => "nonagon",
            Self::Decagon => "decagon",
        }
    }

    /// Strict parse used at the write boundary.
    pub fn parse(s: &str) -> BioframeResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BioframeError::validation(format!("unknown frame type \"{s}\"")))
    }

    /// Render-path parse: anything unrecognised draws no frame.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|_| {
            tracing::warn!(frame_type = s, "unknown frame type, rendering without frame");
            Self::None
        })
    }

    /// Vertex count for regular polygon frames.
    pub fn polygon_sides(self) -> Option<u32> {
        match self {
            Self::Pentagon => Some(5),
            Self::Hexagon => Some(6),
            Self::Heptagon => Some(7),
            Self::Octagon => Some(8),
            Self::Nonagon => Some(9),
            Self::Decagon => Some(10),
            _ => None,
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static HEX_COLOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$"));

/// `#RGB` or `#RRGGBB` colour, stored as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Colour used when none (or an invalid one) is stored.
    pub const DEFAULT: &'static str = "#000000";

    /// Strict parse used at the write boundary.
    pub fn parse(s: &str) -> BioframeResult<Self> {
        let valid = HEX_COLOR.as_ref().is_some_and(|re| re.is_match(s));
        if !valid {
            return Err(BioframeError::validation(format!(
                "color must be #RGB or #RRGGBB, got \"{s}\""
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Render-path parse: invalid colours fall back to [`Self::DEFAULT`].
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|_| {
            tracing::warn!(color = s, "invalid frame color, using default");
            Self::default()
        })
    }

    /// The colour as written, including `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Six lowercase hex digits without `#`, expanding the short form.
    pub fn hex6(&self) -> String {
        let digits = self.0.trim_start_matches('#').to_ascii_lowercase();
        if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits
        }
    }

    /// Red, green and blue channels.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let hex = self.hex6();
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|p| u8::from_str_radix(p, 16).ok())
                .unwrap_or(0)
        };
        (byte(0), byte(2), byte(4))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Frame shape plus colour, as stored on a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSpec {
    /// Frame shape.
    pub frame_type: FrameType,
    /// Frame colour.
    pub color_hex: HexColor,
}

#[cfg(test)]
#[path = "../../tests/unit/frame/spec.rs"]
mod tests;
