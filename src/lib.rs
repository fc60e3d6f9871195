//! Bioframe is the presentation engine behind link-in-bio profile pages.
//!
//! It turns stored profile settings and links into render-ready data:
//!
//! - Resolve per-provider embed rules and scale third-party embeds to a container
//! - Generate avatar frame geometry (clip paths, radii, aspect ratios) and CSS
//! - Keep an editor preview in step with settings and container size changes
//! - Walk a bounded fallback chain when link icons fail to load
//!
//! Everything is deterministic and clock-explicit: stateful pieces take an [`std::time::Instant`]
//! instead of reading the time themselves.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod config;
pub(crate) mod embed;
pub(crate) mod frame;
pub(crate) mod icon;
pub(crate) mod provider;
pub(crate) mod render;
pub(crate) mod settings;
pub(crate) mod sync;

pub use crate::foundation::core::{AspectRatio, PixelSize, Point, Rect, ViewportClass};
pub use crate::foundation::error::{BioframeError, BioframeResult};

pub use crate::config::engine::{
    DEFAULT_SIZE_LADDER, EngineConfig, IconFallbackConfig, PreviewConfig, ResizeConfig,
    ScalingConfig,
};
pub use crate::embed::dimensions::{EmbedDimensions, parse_dimensions};
pub use crate::embed::sanitize::sanitize_embed_html;
pub use crate::embed::scaling::{
    DimensionSource, ScalingInput, ScalingResult, available_width, compute_scaling, padding_for,
    provider_default_dimensions,
};
pub use crate::frame::geometry::{
    FrameGeometry, geometry_for, polygon_clip_path, regular_polygon_vertices,
};
pub use crate::frame::spec::{FrameSpec, FrameType, HexColor};
pub use crate::frame::style::{FRAME_BORDER_PX, FRAME_INSET_PX, FrameOutline, FrameStyle};
pub use crate::icon::endpoints::{domain_of, favicon_url, icon_name_for, svg_icon_url};
pub use crate::icon::fallback::{
    IconLoader, IconSource, IconStep, IconTier, IconTransition, RetryState, jitter_for,
    resolve_icon_src,
};
pub use crate::provider::config::{
    BreakpointRatios, ExternalScript, ProviderConfig, ProviderId, config_for,
    resolve as resolve_provider,
};
pub use crate::provider::transform::HtmlTransform;
pub use crate::render::boundary::{BoundaryState, CapturedError, RenderBoundary};
pub use crate::render::profile::{
    EmbedLayout, EmbedView, FrameRender, IconRender, LinkRender, PreviewRender, ProfileRender,
    render_profile,
};
pub use crate::settings::model::{
    LayoutSettings, Link, ProfileDocument, ProfileSettings, Thumbnail, ViewMode,
};
pub use crate::sync::preview::{
    PreviewEvent, PreviewPhase, PreviewSignal, PreviewSurface, PreviewSync, PreviewSyncKey,
    SignalReason, preview_url,
};
pub use crate::sync::resize::{ObserverSupport, ResizeDecision, ResizeSynchronizer};
