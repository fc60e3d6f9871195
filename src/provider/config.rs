use crate::foundation::core::{AspectRatio, ViewportClass};
use crate::provider::transform::{self, HtmlTransform};

/// Known embed providers. Anything else renders through [`ProviderId::Generic`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Fallback for unrecognised providers.
    Generic,
    /// YouTube video.
    YouTube,
    /// Vimeo video.
    Vimeo,
    /// Spotify player.
    Spotify,
    /// SoundCloud player.
    SoundCloud,
    /// Instagram post.
    Instagram,
    /// TikTok video.
    TikTok,
    /// Twitter / X post.
    Twitter,
    /// Facebook post.
    Facebook,
}

impl ProviderId {
    /// Match a provider name as stored on a link (`"YouTube"`, `"youtu.be"`, `"X"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.trim().to_ascii_lowercase();
        let n = n.strip_prefix("www.").unwrap_or(&n);
        let n = n
            .strip_suffix(".com")
            .or_else(|| n.strip_suffix(".be"))
            .unwrap_or(n);
        match n {
            "youtube" | "youtu" => Some(Self::YouTube),
            "vimeo" => Some(Self::Vimeo),
            "spotify" | "open.spotify" => Some(Self::Spotify),
            "soundcloud" => Some(Self::SoundCloud),
            "instagram" => Some(Self::Instagram),
            "tiktok" => Some(Self::TikTok),
            "twitter" | "x" => Some(Self::Twitter),
            "facebook" | "fb" => Some(Self::Facebook),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::YouTube => "youtube",
            Self::Vimeo => "vimeo",
            Self::Spotify => "spotify",
            Self::SoundCloud => "soundcloud",
            Self::Instagram => "instagram",
            Self::TikTok => "tiktok",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
        }
    }
}

/// Aspect ratio per breakpoint. Missing breakpoints inherit from the next smaller one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakpointRatios {
    /// Base ratio.
    pub mobile: AspectRatio,
    /// Tablet override.
    pub tablet: Option<AspectRatio>,
    /// Desktop override.
    pub desktop: Option<AspectRatio>,
}

impl BreakpointRatios {
    const fn uniform(r: AspectRatio) -> Self {
        Self {
            mobile: r,
            tablet: None,
            desktop: None,
        }
    }

    /// Ratio in effect for `viewport`.
    pub fn for_viewport(&self, viewport: ViewportClass) -> AspectRatio {
        match viewport {
            ViewportClass::Mobile => self.mobile,
            ViewportClass::Tablet => self.tablet.unwrap_or(self.mobile),
            ViewportClass::Desktop => self.desktop.or(self.tablet).unwrap_or(self.mobile),
        }
    }
}

/// Third-party script a provider needs on the page before its markup hydrates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalScript {
    /// Primary script URL.
    pub main_url: &'static str,
    /// Mirror tried when the primary fails.
    pub fallback_url: Option<&'static str>,
    /// Global the script defines once ready (`window.instgrm`, ...).
    pub ready_signal: Option<&'static str>,
}

/// Immutable presentation rules for one provider.
#[derive(Clone, Copy, Debug)]
pub struct ProviderConfig {
    /// Provider these rules apply to.
    pub provider_id: ProviderId,
    /// Container aspect ratio per breakpoint.
    pub aspect_ratio_by_breakpoint: BreakpointRatios,
    /// CSS classes for the embed container.
    pub container_class_name: &'static str,
    /// Script the page must load for this provider, if any.
    pub external_script: Option<ExternalScript>,
    /// Post-processing applied to stored markup, if any.
    pub html_transform: Option<HtmlTransform>,
}

impl ProviderConfig {
    /// Container aspect ratio for `viewport`.
    pub fn aspect_ratio(&self, viewport: ViewportClass) -> AspectRatio {
        self.aspect_ratio_by_breakpoint.for_viewport(viewport)
    }

    /// Apply the provider transform, if any. Idempotent.
    pub fn transform_html(&self, html: &str) -> String {
        match self.html_transform {
            Some(t) => t(html),
            None => html.to_string(),
        }
    }
}

const WIDESCREEN: AspectRatio = AspectRatio::new(16, 9);

static GENERIC: ProviderConfig = ProviderConfig {
    provider_id: ProviderId::Generic,
    aspect_ratio_by_breakpoint: BreakpointRatios::uniform(WIDESCREEN),
    container_class_name: "embed embed--generic",
    external_script: None,
    html_transform: None,
};

static PROVIDERS: [ProviderConfig; 8] = [
    ProviderConfig {
        provider_id: ProviderId::YouTube,
        aspect_ratio_by_breakpoint: BreakpointRatios::uniform(WIDESCREEN),
        container_class_name: "embed embed--video",
        external_script: None,
        html_transform: Some(transform::fluid_video),
    },
    ProviderConfig {
        provider_id: ProviderId::Vimeo,
        aspect_ratio_by_breakpoint: BreakpointRatios::uniform(WIDESCREEN),
        container_class_name: "embed embed--video",
        external_script: None,
        html_transform: Some(transform::fluid_video),
    },
    ProviderConfig {
        provider_id: ProviderId::Spotify,
        aspect_ratio_by_breakpoint: BreakpointRatios {
            mobile: AspectRatio::SQUARE,
            tablet: None,
            desktop: Some(AspectRatio::new(16, 9)),
        },
        container_class_name: "embed embed--audio",
        external_script: None,
        html_transform: Some(transform::fluid_width),
    },
    ProviderConfig {
        provider_id: ProviderId::SoundCloud,
        aspect_ratio_by_breakpoint: BreakpointRatios::uniform(AspectRatio::new(3, 1)),
        container_class_name: "embed embed--audio",
        external_script: None,
        html_transform: Some(transform::fluid_width),
    },
    ProviderConfig {
        provider_id: ProviderId::Instagram,
        aspect_ratio_by_breakpoint: BreakpointRatios::uniform(AspectRatio::new(4, 5)),
        container_class_name: "embed embed--social embed--instagram",
        external_script: Some(ExternalScript {
            main_url: "https://www.instagram.com/embed.js",
            fallback_url: Some("https://platform.instagram.com/en_US/embeds.js"),
            ready_signal: Some("instgrm"),
        }),
        html_transform: Some(transform::strip_scripts),
    },
    ProviderConfig {
        provider_id: ProviderId::TikTok,
        aspect_ratio_by_breakpoint: BreakpointRatios::uniform(AspectRatio::new(9, 16)),
        container_class_name: "embed embed--social embed--tiktok",
        external_script: Some(ExternalScript {
            main_url: "https://www.tiktok.com/embed.js",
            fallback_url: None,
            ready_signal: None,
        }),
        html_transform: Some(transform::strip_scripts),
    },
    ProviderConfig {
        provider_id: ProviderId::Twitter,
        aspect_ratio_by_breakpoint: BreakpointRatios {
            mobile: AspectRatio::SQUARE,
            tablet: None,
            desktop: Some(AspectRatio::new(4, 3)),
        },
        container_class_name: "embed embed--social embed--twitter",
        external_script: Some(ExternalScript {
            main_url: "https://platform.twitter.com/widgets.js",
            fallback_url: None,
            ready_signal: Some("twttr"),
        }),
        html_transform: Some(transform::strip_scripts),
    },
    ProviderConfig {
        provider_id: ProviderId::Facebook,
        aspect_ratio_by_breakpoint: BreakpointRatios::uniform(AspectRatio::SQUARE),
        container_class_name: "embed embed--social embed--facebook",
        external_script: Some(ExternalScript {
            main_url: "https://connect.facebook.net/en_US/sdk.js#xfbml=1&version=v19.0",
            fallback_url: None,
            ready_signal: Some("FB"),
        }),
        html_transform: Some(transform::facebook),
    },
];

/// Config for a known provider id.
pub fn config_for(id: ProviderId) -> &'static ProviderConfig {
    PROVIDERS
        .iter()
        .find(|c| c.provider_id == id)
        .unwrap_or(&GENERIC)
}

/// Resolve a link's provider name to its presentation rules. Never fails: absent or unknown
/// names resolve to the generic config.
pub fn resolve(provider_name: Option<&str>) -> &'static ProviderConfig {
    let Some(name) = provider_name.filter(|n| !n.trim().is_empty()) else {
        return &GENERIC;
    };
    match ProviderId::from_name(name) {
        Some(id) => config_for(id),
        None => {
            tracing::debug!(provider = name, "unknown embed provider, using generic config");
            &GENERIC
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/provider/config.rs"]
mod tests;
