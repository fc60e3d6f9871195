use crate::{
    config::engine::ScalingConfig,
    embed::dimensions::{EmbedDimensions, parse_dimensions},
    foundation::core::{ViewportClass, round_px},
    provider::config::{ProviderId, config_for},
};

/// Everything [`compute_scaling`] needs about one embed.
#[derive(Clone, Copy, Debug)]
pub struct ScalingInput<'a> {
    /// Measured container width. Any value is accepted; non-positive and NaN mean no room.
    pub container_width_px: f64,
    /// Stored embed markup, if any.
    pub raw_embed_html: Option<&'a str>,
    /// Provider the embed belongs to.
    pub provider_id: ProviderId,
    /// Viewport the page is rendered for.
    pub viewport_class: ViewportClass,
}

/// Where the pre-scaling dimensions came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DimensionSource {
    /// Markup declared both axes.
    Markup,
    /// Markup declared a width only; height follows the provider aspect ratio.
    MarkupWithAspectRatio,
    /// Provider preset size.
    ProviderDefault,
    /// Nothing known; the embed is a square of the available width.
    ContainerSquare,
}

/// Scaled embed box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingResult {
    /// Output width; always the available width.
    pub width: u32,
    /// Output height, rounded.
    pub height: u32,
    /// Scale factor applied to the source dimensions.
    pub ratio: f64,
    /// Padding removed on each side of the container.
    pub padding_px: u32,
    /// Where the source dimensions came from.
    pub source: DimensionSource,
}

/// Preset sizes for providers whose markup usually carries no dimensions.
pub fn provider_default_dimensions(id: ProviderId) -> Option<EmbedDimensions> {
    let (w, h) = match id {
        ProviderId::Instagram => (550.0, 550.0),
        ProviderId::Spotify => (380.0, 380.0),
        ProviderId::YouTube => (560.0, 315.0),
        ProviderId::Vimeo => (640.0, 360.0),
        ProviderId::TikTok => (325.0, 575.0),
        ProviderId::Twitter => (550.0, 550.0),
        ProviderId::SoundCloud => (500.0, 166.0),
        ProviderId::Facebook => (500.0, 500.0),
        ProviderId::Generic => return None,
    };
    Some(EmbedDimensions::new(w, h))
}

/// Horizontal padding for a viewport. Tablets share the desktop value.
pub fn padding_for(viewport: ViewportClass, cfg: &ScalingConfig) -> u32 {
    match viewport {
        ViewportClass::Mobile => cfg.mobile_padding_px,
        ViewportClass::Tablet | ViewportClass::Desktop => cfg.desktop_padding_px,
    }
}

/// Width left for the embed once horizontal padding is removed, in whole pixels.
pub fn available_width(container_width_px: f64, padding_px: u32) -> u32 {
    let w = container_width_px - 2.0 * f64::from(padding_px);
    if !w.is_finite() || w <= 0.0 {
        return 0;
    }
    w.floor().min(f64::from(u32::MAX)) as u32
}

/// Scale an embed to the container width, preserving its aspect ratio.
///
/// The output width is always the available width and the height a non-negative integer, for
/// any container width (including 0, negative or NaN) and any markup.
pub fn compute_scaling(input: ScalingInput<'_>, cfg: &ScalingConfig) -> ScalingResult {
    let padding_px = padding_for(input.viewport_class, cfg);
    let available = available_width(input.container_width_px, padding_px);

    let (dims, source) = source_dimensions(&input, available);

    let ratio = if dims.width > 0.0 {
        f64::from(available) / dims.width
    } else {
        1.0
    };

    ScalingResult {
        width: available,
        height: round_px(dims.height * ratio),
        ratio,
        padding_px,
        source,
    }
}

fn source_dimensions(input: &ScalingInput<'_>, available: u32) -> (EmbedDimensions, DimensionSource) {
    match parse_dimensions(input.raw_embed_html) {
        Some(d) if !d.is_unknown() => {
            if d.width > 0.0 && d.height == 0.0 {
                let ar = config_for(input.provider_id).aspect_ratio(input.viewport_class);
                let height = d.width / ar.as_f64();
                (
                    EmbedDimensions::new(d.width, height),
                    DimensionSource::MarkupWithAspectRatio,
                )
            } else {
                (d, DimensionSource::Markup)
            }
        }
        _ => match provider_default_dimensions(input.provider_id) {
            Some(d) => {
                tracing::trace!(provider = input.provider_id.as_str(), "embed size from provider preset");
                (d, DimensionSource::ProviderDefault)
            }
            None => {
                let side = f64::from(available);
                (
                    EmbedDimensions::new(side, side),
                    DimensionSource::ContainerSquare,
                )
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/embed/scaling.rs"]
mod tests;
