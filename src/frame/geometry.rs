use std::f64::consts::TAU;

use crate::{
    foundation::{
        core::{AspectRatio, Point, Rect},
        math::fmt_percent,
    },
    frame::spec::FrameType,
};

/// CSS shaping directives for an avatar frame. Absent fields emit nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameGeometry {
    /// CSS `clip-path` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
    /// CSS `border-radius` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// CSS `aspect-ratio` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl FrameGeometry {
    /// True for [`FrameType::None`], which emits no directives.
    pub fn is_empty(&self) -> bool {
        self.clip_path.is_none() && self.border_radius.is_none() && self.aspect_ratio.is_none()
    }

    fn rounded(aspect: AspectRatio, radius: &str) -> Self {
        Self {
            clip_path: None,
            border_radius: Some(radius.to_string()),
            aspect_ratio: Some(aspect.to_css()),
        }
    }

    fn clipped(clip_path: String) -> Self {
        Self {
            clip_path: Some(clip_path),
            border_radius: None,
            aspect_ratio: Some(AspectRatio::SQUARE.to_css()),
        }
    }
}

const HEART_CLIP_PATH: &str = "polygon(50% 100%, 8% 58%, 2% 46%, 0% 33%, 2% 20%, 8% 10%, \
17% 3%, 28% 0%, 39% 2%, 50% 12%, 61% 2%, 72% 0%, 83% 3%, 92% 10%, 98% 20%, 100% 33%, \
98% 46%, 92% 58%)";

/// Shape directives for a frame type. Pure and deterministic.
pub fn geometry_for(frame_type: FrameType) -> FrameGeometry {
    match frame_type {
        FrameType::None => FrameGeometry::default(),
        FrameType::Circle => FrameGeometry::rounded(AspectRatio::SQUARE, "50%"),
        FrameType::Square => FrameGeometry::rounded(AspectRatio::SQUARE, "0.5rem"),
        FrameType::RectH => FrameGeometry::rounded(AspectRatio::new(4, 3), "0.5rem"),
        FrameType::RectV => FrameGeometry::rounded(AspectRatio::new(3, 4), "0.5rem"),
        FrameType::OvalV => FrameGeometry::rounded(AspectRatio::new(3, 4), "50%"),
        FrameType::Heart => FrameGeometry::clipped(HEART_CLIP_PATH.to_string()),
        FrameType::Pentagon
        | FrameType::Hexagon
        | FrameType::Heptagon
        | FrameType::Octagon
        | FrameType::Nonagon
        | FrameType::Decagon => {
            let sides = frame_type.polygon_sides().unwrap_or(5);
            FrameGeometry::clipped(polygon_clip_path(&regular_polygon_vertices(sides)))
        }
    }
}

/// Vertices of a regular `sides`-gon in percent of the element box.
///
/// The first vertex is at the top centre and the rest follow clockwise (screen coordinates, y
/// down). The polygon is stretched to touch all four edges of the box.
pub fn regular_polygon_vertices(sides: u32) -> Vec<Point> {
    let sides = sides.max(3);
    let unit: Vec<Point> = (0..sides)
        .map(|i| {
            let theta = TAU * f64::from(i) / f64::from(sides);
            Point::new(theta.sin(), -theta.cos())
        })
        .collect();

    let bbox = unit
        .iter()
        .fold(Rect::from_points(unit[0], unit[0]), |r, p| r.union_pt(*p));
    let (w, h) = (bbox.width(), bbox.height());

    unit.into_iter()
        .map(|p| {
            Point::new(
                (p.x - bbox.x0) / w * 100.0,
                (p.y - bbox.y0) / h * 100.0,
            )
        })
        .collect()
}

/// `polygon(x% y%, ...)` with at most two decimals per coordinate.
pub fn polygon_clip_path(vertices: &[Point]) -> String {
    let pairs: Vec<String> = vertices
        .iter()
        .map(|p| format!("{} {}", fmt_percent(p.x), fmt_percent(p.y)))
        .collect();
    format!("polygon({})", pairs.join(", "))
}

#[cfg(test)]
#[path = "../../tests/unit/frame/geometry.rs"]
mod tests;
