use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::foundation::error::{BioframeError, BioframeResult};

/// Descending favicon size ladder. The last entry is the floor.
pub const DEFAULT_SIZE_LADDER: [u32; 5] = [64, 48, 32, 24, 16];

/// Every tunable the engine reads. Injected explicitly; there is no global state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfig {
    /// Embed scaling paddings.
    pub scaling: ScalingConfig,
    /// Resize reporting.
    pub resize: ResizeConfig,
    /// Icon fallback chain.
    pub icon: IconFallbackConfig,
    /// Editor preview.
    pub preview: PreviewConfig,
}

/// Horizontal padding applied around embeds before scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScalingConfig {
    /// Padding on each side for mobile viewports.
    pub mobile_padding_px: u32,
    /// Padding on each side for tablet and desktop viewports.
    pub desktop_padding_px: u32,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            mobile_padding_px: 12,
            desktop_padding_px: 24,
        }
    }
}

/// Container resize reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ResizeConfig {
    /// Quiet period before a size change is published.
    pub debounce_ms: u64,
    /// Reports within this many pixels of the last accepted size (both axes) are dropped.
    pub jitter_px: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            jitter_px: 1,
        }
    }
}

impl ResizeConfig {
    /// [`Self::debounce_ms`] as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Bounds and endpoints for the link icon fallback chain.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct IconFallbackConfig {
    /// Vector icon requests before switching to favicons.
    pub max_svg_attempts: u8,
    /// Favicon requests before giving up.
    pub max_google_attempts: u8,
    /// Delay between retries within a tier.
    pub backoff_ms: u64,
    /// Upper bound of a per-icon, deterministic extra delay. 0 disables jitter.
    pub jitter_ms: u64,
    /// Favicon sizes to step down through, strictly descending.
    pub size_ladder: Vec<u32>,
    /// Base URL of the vector icon CDN.
    pub svg_endpoint: String,
    /// Base URL of the favicon service.
    pub favicon_endpoint: String,
}

impl Default for IconFallbackConfig {
    fn default() -> Self {
        Self {
            max_svg_attempts: 3,
            max_google_attempts: 3,
            backoff_ms: 1000,
            jitter_ms: 0,
            size_ladder: DEFAULT_SIZE_LADDER.to_vec(),
            svg_endpoint: "https://cdn.simpleicons.org".to_string(),
            favicon_endpoint: "https://www.google.com/s2/favicons".to_string(),
        }
    }
}

impl IconFallbackConfig {
    /// Smallest ladder entry; 16 when the ladder is empty.
    pub fn floor_size(&self) -> u32 {
        self.size_ladder.iter().copied().min().unwrap_or(16)
    }
}

/// Editor preview settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PreviewConfig {
    /// Public origin that serves profile pages.
    pub base_url: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> BioframeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> BioframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BioframeError::config(format!("open engine config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject attempt caps of zero, malformed size ladders and non-http(s) endpoints.
    pub fn validate(&self) -> BioframeResult<()> {
        if self.icon.max_svg_attempts == 0 || self.icon.max_google_attempts == 0 {
            return Err(BioframeError::config("icon attempt caps must be > 0"));
        }
        if self.icon.size_ladder.is_empty() {
            return Err(BioframeError::config("icon size ladder must not be empty"));
        }
        if self
            .icon
            .size_ladder
            .windows(2)
            .any(|w| w[0] <= w[1])
        {
            return Err(BioframeError::config(
                "icon size ladder must be strictly descending",
            ));
        }
        if self.icon.size_ladder.contains(&0) {
            return Err(BioframeError::config("icon sizes must be > 0"));
        }
        for (name, url) in [
            ("svgEndpoint", &self.icon.svg_endpoint),
            ("faviconEndpoint", &self.icon.favicon_endpoint),
            ("baseUrl", &self.preview.base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(BioframeError::config(format!(
                    "{name} must be an absolute http(s) URL, got \"{url}\""
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/engine.rs"]
mod tests;
