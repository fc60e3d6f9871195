use crate::{
    config::engine::EngineConfig,
    embed::{
        sanitize::sanitize_embed_html,
        scaling::{ScalingInput, ScalingResult, compute_scaling},
    },
    foundation::{
        core::ViewportClass,
        error::{BioframeError, BioframeResult},
    },
    frame::{spec::FrameType, style::FrameStyle},
    icon::fallback::{IconTier, RetryState, resolve_icon_src},
    provider::config::{ExternalScript, ProviderId, resolve},
    render::boundary::{CapturedError, RenderBoundary},
    settings::model::{Link, ProfileDocument},
    sync::preview::{PreviewSyncKey, preview_url},
};

/// Everything a page needs to draw one profile at one container width.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRender {
    /// Profile owner.
    pub username: String,
    /// Viewport rendered for.
    pub viewport: ViewportClass,
    /// Container width rendered for.
    pub container_width_px: f64,
    /// Avatar frame.
    pub frame: FrameRender,
    /// Links in stored order.
    pub links: Vec<LinkRender>,
    /// Editor preview wiring.
    pub preview: PreviewRender,
}

/// Resolved avatar frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRender {
    /// Frame shape after lenient decoding.
    pub frame_type: FrameType,
    /// Structured style.
    pub style: FrameStyle,
    /// `style` lowered to inline CSS.
    pub css: String,
}

/// One link card.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRender {
    /// Position in the profile's link list.
    pub index: usize,
    /// Display title.
    pub title: Option<String>,
    /// Target URL.
    pub url: Option<String>,
    /// Initial icon for social links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRender>,
    /// Embed layout for embed links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<EmbedView>,
}

/// First icon source a link card loads.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRender {
    /// URL to load.
    pub src: String,
    /// Tier the URL belongs to.
    pub tier: IconTier,
    /// Configured favicon size.
    pub size: u32,
}

/// Outcome of laying out one embed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EmbedView {
    /// Layout succeeded.
    Ready(EmbedLayout),
    /// The embed could not be rendered; the page shows a plain link card instead.
    Fallback {
        /// Captured failure, if one was recorded.
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<CapturedError>,
    },
}

/// Render-ready embed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedLayout {
    /// Resolved provider.
    pub provider_id: ProviderId,
    /// CSS classes for the container.
    pub container_class_name: &'static str,
    /// CSS `aspect-ratio` for the viewport.
    pub aspect_ratio: String,
    /// Script the page must load first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_script: Option<ExternalScript>,
    /// Sanitized and transformed markup.
    pub html: String,
    /// Scaled box.
    pub scaling: ScalingResult,
}

/// Preview iframe key and source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRender {
    /// Remount key derived from layout settings.
    pub key: PreviewSyncKey,
    /// Public profile URL.
    pub src: String,
}

/// Render a profile for one viewport and container width.
///
/// Only the preview URL can fail. A broken embed degrades to [`EmbedView::Fallback`] without
/// affecting the other links.
#[tracing::instrument(skip(doc, cfg), fields(username = %doc.username, links = doc.links.len()))]
pub fn render_profile(
    doc: &ProfileDocument,
    viewport: ViewportClass,
    container_width_px: f64,
    cfg: &EngineConfig,
) -> BioframeResult<ProfileRender> {
    let settings = &doc.settings;
    let style = FrameStyle::for_spec(&settings.frame_spec());
    let frame = FrameRender {
        frame_type: settings.profile_frame_type,
        css: style.to_css(),
        style,
    };

    let links = doc
        .links
        .iter()
        .enumerate()
        .map(|(index, link)| render_link(index, link, doc, viewport, container_width_px, cfg))
        .collect();

    let layout = settings.layout();
    let preview = PreviewRender {
        key: PreviewSyncKey::derive(&layout),
        src: preview_url(&cfg.preview.base_url, &doc.username)?,
    };

    Ok(ProfileRender {
        username: doc.username.clone(),
        viewport,
        container_width_px,
        frame,
        links,
        preview,
    })
}

fn render_link(
    index: usize,
    link: &Link,
    doc: &ProfileDocument,
    viewport: ViewportClass,
    container_width_px: f64,
    cfg: &EngineConfig,
) -> LinkRender {
    let embed = link.is_embed().then(|| {
        let mut boundary = RenderBoundary::new("embed", EmbedView::Fallback { error: None });
        let view = boundary.render(|| {
            embed_layout(link, viewport, container_width_px, cfg).map(EmbedView::Ready)
        });
        match boundary.error() {
            Some(e) => EmbedView::Fallback {
                error: Some(e.clone()),
            },
            None => view,
        }
    });
    let icon = if embed.is_none() {
        icon_for(link, doc, cfg)
    } else {
        None
    };
    LinkRender {
        index,
        title: link.title.clone(),
        url: link.url.clone(),
        icon,
        embed,
    }
}

fn embed_layout(
    link: &Link,
    viewport: ViewportClass,
    container_width_px: f64,
    cfg: &EngineConfig,
) -> BioframeResult<EmbedLayout> {
    let provider = resolve(link.effective_provider_name());
    let raw = link
        .effective_embed_html()
        .ok_or_else(|| BioframeError::validation("embed link has no markup"))?;
    let html = sanitize_embed_html(&provider.transform_html(raw));
    if html.trim().is_empty() {
        return Err(BioframeError::validation(
            "embed markup is empty after sanitizing",
        ));
    }
    let scaling = compute_scaling(
        ScalingInput {
            container_width_px,
            raw_embed_html: Some(raw),
            provider_id: provider.provider_id,
            viewport_class: viewport,
        },
        &cfg.scaling,
    );
    Ok(EmbedLayout {
        provider_id: provider.provider_id,
        container_class_name: provider.container_class_name,
        aspect_ratio: provider.aspect_ratio(viewport).to_css(),
        external_script: provider.external_script,
        html,
        scaling,
    })
}

fn icon_for(link: &Link, doc: &ProfileDocument, cfg: &EngineConfig) -> Option<IconRender> {
    let url = link.url.as_deref().filter(|u| !u.trim().is_empty())?;
    let size = if link.is_social() {
        doc.settings.social_icon_size
    } else {
        doc.settings.favicon_size
    };
    let state = RetryState::new(size);
    let source = resolve_icon_src(&state, url, &doc.settings.profile_frame_color, &cfg.icon);
    Some(IconRender {
        src: source.src,
        tier: state.tier,
        size,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/profile.rs"]
mod tests;
