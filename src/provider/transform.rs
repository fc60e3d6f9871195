//! Provider-specific HTML post-processing.
//!
//! Every transform here is idempotent: `t(t(x)) == t(x)`. Callers reapply them on each render.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::pattern;

/// Post-processing hook applied to raw embed markup before injection.
pub type HtmlTransform = fn(&str) -> String;

static SCRIPT_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r"(?is)<script\b[^>]*>.*?</script\s*>"));
static SCRIPT_SELF_CLOSING: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r"(?i)<script\b[^>]*/>"));
static FB_ROOT: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r#"(?i)<div\s+id\s*=\s*["']fb-root["']\s*>\s*</div>"#));
static WIDTH_ATTR: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r#"(?i)(\s)width\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#));
static HEIGHT_ATTR: LazyLock<Option<Regex>> =
    LazyLock::new(|| pattern::compile(r#"(?i)(\s)height\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#));
static IFRAME_OPEN: LazyLock<Option<Regex>> = LazyLock::new(|| pattern::compile(r"(?i)<iframe\b"));

fn replace_all(re: &LazyLock<Option<Regex>>, html: &str, rep: &str) -> String {
    match re.as_ref() {
        Some(re) => re.replace_all(html, rep).into_owned(),
        None => html.to_string(),
    }
}

/// Run `step` until its output stops changing, so that removals which splice the remaining text
/// into a new match are caught too.
fn settle(html: &str, step: impl Fn(&str) -> String) -> String {
    let mut out = step(html);
    loop {
        let next = step(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

fn strip_scripts_once(html: &str) -> String {
    let out = replace_all(&SCRIPT_BLOCK, html, "");
    replace_all(&SCRIPT_SELF_CLOSING, &out, "").trim().to_string()
}

/// Remove `<script>` elements. Providers that need a script declare it as an external script
/// and the host loads it once per page.
pub fn strip_scripts(html: &str) -> String {
    settle(html, strip_scripts_once)
}

/// Strip scripts and the `fb-root` mount point the Facebook SDK creates itself.
pub fn facebook(html: &str) -> String {
    settle(html, |h| {
        replace_all(&FB_ROOT, &strip_scripts_once(h), "")
            .trim()
            .to_string()
    })
}

/// Make video iframes fill their aspect-ratio container and allow fullscreen.
pub fn fluid_video(html: &str) -> String {
    settle(html, |h| {
        let out = replace_all(&WIDTH_ATTR, &strip_scripts_once(h), r#"${1}width="100%""#);
        let out = replace_all(&HEIGHT_ATTR, &out, r#"${1}height="100%""#);
        if out.to_ascii_lowercase().contains("allowfullscreen") {
            return out;
        }
        replace_all(&IFRAME_OPEN, &out, "<iframe allowfullscreen")
    })
}

/// Audio players keep their declared height but stretch horizontally.
pub fn fluid_width(html: &str) -> String {
    settle(html, |h| {
        replace_all(&WIDTH_ATTR, &strip_scripts_once(h), r#"${1}width="100%""#)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/provider/transform.rs"]
mod tests;
