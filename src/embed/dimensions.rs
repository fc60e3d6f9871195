use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::pattern;

/// Declared size of an embed. Zero on an axis means "unknown, use defaults".
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmbedDimensions {
    /// Declared width in CSS pixels.
    pub width: f64,
    /// Declared height in CSS pixels.
    pub height: f64,
}

impl EmbedDimensions {
    /// Construct dimensions, clamping negative and non-finite axes to 0.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: clamp_dim(width),
            height: clamp_dim(height),
        }
    }

    /// True when neither axis is known.
    pub fn is_unknown(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

fn clamp_dim(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

static WIDTH_ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(r#"(?i)(?:^|[\s<])width\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
});
static HEIGHT_ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(r#"(?i)(?:^|[\s<])height\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
});
static STYLE_ATTR: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r#"(?i)\sstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#));
static STYLE_WIDTH: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(r"(?i)(?:^|[;\s])width\s*:\s*(-?\d+(?:\.\d+)?)\s*px")
});
static STYLE_HEIGHT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(r"(?i)(?:^|[;\s])height\s*:\s*(-?\d+(?:\.\d+)?)\s*px")
});

/// Extract the declared width/height from raw embed markup.
///
/// Each axis is resolved independently: the first `width=`/`height=` attribute holding a pixel
/// value wins, then the first inline `style` declaration in pixels. Percentages and keywords on a
/// wrapper element are skipped. Returns `None` only for absent or blank input;
/// a miss on an axis yields 0.
pub fn parse_dimensions(raw_html: Option<&str>) -> Option<EmbedDimensions> {
    let html = raw_html.filter(|h| !h.trim().is_empty())?;
    let width = attr_px(&WIDTH_ATTR, html).or_else(|| style_px(&STYLE_WIDTH, html));
    let height = attr_px(&HEIGHT_ATTR, html).or_else(|| style_px(&STYLE_HEIGHT, html));
    Some(EmbedDimensions::new(
        width.unwrap_or(0.0),
        height.unwrap_or(0.0),
    ))
}

fn attr_px(re: &LazyLock<Option<Regex>>, html: &str) -> Option<f64> {
    re.as_ref()?.captures_iter(html).find_map(|caps| {
        let raw = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
        parse_px(raw.as_str())
    })
}

fn style_px(decl: &LazyLock<Option<Regex>>, html: &str) -> Option<f64> {
    let decl = decl.as_ref()?;
    STYLE_ATTR.as_ref()?.captures_iter(html).find_map(|caps| {
        let body = caps.get(1).or_else(|| caps.get(2))?.as_str();
        let v = decl.captures(body)?.get(1)?.as_str().parse::<f64>().ok()?;
        Some(clamp_dim(v))
    })
}

/// `"400"`, `"400px"`, `" 400.5 "` parse; percentages and keywords do not.
fn parse_px(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_suffix("px").unwrap_or(s).trim_end();
    s.parse::<f64>().ok().map(clamp_dim)
}

#[cfg(test)]
#[path = "../../tests/unit/embed/dimensions.rs"]
mod tests;
