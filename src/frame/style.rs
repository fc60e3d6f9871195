use crate::frame::{
    geometry::{FrameGeometry, geometry_for},
    spec::{FrameSpec, HexColor},
};

/// Border width for frames drawn with `border-radius`.
pub const FRAME_BORDER_PX: u32 = 3;
/// Inset between a clip-path backdrop and the picture it frames.
pub const FRAME_INSET_PX: u32 = 4;

/// How the frame colour is painted.
///
/// Clip paths also clip borders, so polygon and heart frames paint the colour on a backdrop
/// element and inset the picture instead.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FrameOutline {
    /// Nothing painted.
    None,
    /// Solid border on the picture itself.
    Border {
        /// Border colour.
        color: HexColor,
        /// Border width.
        width_px: u32,
    },
    /// Coloured element behind the clipped picture.
    Backdrop {
        /// Backdrop colour.
        color: HexColor,
        /// Gap between backdrop edge and picture.
        inset_px: u32,
    },
}

/// Complete frame presentation for one profile picture.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStyle {
    /// Shape directives.
    pub geometry: FrameGeometry,
    /// Colour treatment.
    pub outline: FrameOutline,
}

impl FrameStyle {
    /// Style for a stored frame. Clip-path shapes get a backdrop, rounded shapes a border.
    pub fn for_spec(spec: &FrameSpec) -> Self {
        let geometry = geometry_for(spec.frame_type);
        let outline = if geometry.is_empty() {
            FrameOutline::None
        } else if geometry.clip_path.is_some() {
            FrameOutline::Backdrop {
                color: spec.color_hex.clone(),
                inset_px: FRAME_INSET_PX,
            }
        } else {
            FrameOutline::Border {
                color: spec.color_hex.clone(),
                width_px: FRAME_BORDER_PX,
            }
        };
        Self { geometry, outline }
    }

    /// CSS declarations in a fixed order, for inline styles and snapshot comparison.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::<String>::new();
        if let Some(v) = &self.geometry.aspect_ratio {
            decls.push(format!("aspect-ratio: {v}"));
        }
        if let Some(v) = &self.geometry.border_radius {
            decls.push(format!("border-radius: {v}"));
        }
        if let Some(v) = &self.geometry.clip_path {
            decls.push(format!("clip-path: {v}"));
        }
        match &self.outline {
            FrameOutline::None => {}
            FrameOutline::Border { color, width_px } => {
                decls.push(format!("border: {width_px}px solid {color}"));
            }
            FrameOutline::Backdrop { color, inset_px } => {
                decls.push(format!("background-color: {color}"));
                decls.push(format!("padding: {inset_px}px"));
            }
        }
        decls
            .into_iter()
            .map(|d| format!("{d};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/style.rs"]
mod tests;
