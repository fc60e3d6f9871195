//! Allow-list sanitizer for third-party embed markup.
//!
//! Markup only reaches the page after passing through [`sanitize_embed_html`]. The output is a
//! fixed point: sanitizing it again returns it unchanged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::foundation::pattern;

const ALLOWED_TAGS: &[&str] = &[
    "a",
    "b",
    "blockquote",
    "br",
    "cite",
    "div",
    "em",
    "figcaption",
    "figure",
    "i",
    "iframe",
    "img",
    "p",
    "section",
    "span",
    "strong",
];

const GLOBAL_ATTRS: &[&str] = &["class", "id", "title", "lang", "dir", "style"];

const TAG_ATTRS: &[(&str, &[&str])] = &[
    ("a", &["href", "target", "rel"]),
    ("blockquote", &["cite"]),
    (
        "iframe",
        &[
            "src",
            "width",
            "height",
            "allow",
            "allowfullscreen",
            "frameborder",
            "loading",
            "referrerpolicy",
            "sandbox",
            "scrolling",
        ],
    ),
    ("img", &["src", "alt", "width", "height", "loading"]),
];

static DANGEROUS_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(
        r"(?is)<(script|style|noscript|template|object)\b[^>]*>.*?</(script|style|noscript|template|object)\s*>",
    )
});
static COMMENT: LazyLock<Option<Regex>> = LazyLock::new(|| pattern::compile(r"(?s)<!--.*?-->"));
// A well-formed tag (quoted values may contain `>`), or a stray `<` that is escaped.
static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(r#"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>|<"#)
});
static ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    pattern::compile(
        r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
});

/// Strip everything outside the allow-list from embed markup.
///
/// Removes script-like elements with their content, comments, unknown tags (keeping their
/// text), event handler and unknown attributes, and URLs with non-web schemes. Iframe sources
/// must be `https:`; protocol-relative URLs are upgraded. A `<` that does not open a
/// well-formed tag is escaped.
pub fn sanitize_embed_html(raw: &str) -> String {
    let (Some(dangerous), Some(comment), Some(tag)) =
        (DANGEROUS_BLOCK.as_ref(), COMMENT.as_ref(), TAG.as_ref())
    else {
        // Without a working tokenizer nothing can be proven safe.
        return String::new();
    };

    let mut html = raw.to_string();
    // Nested or overlapping blocks can reassemble after a single removal pass.
    loop {
        let next = comment.replace_all(&dangerous.replace_all(&html, ""), "").into_owned();
        if next == html {
            break;
        }
        html = next;
    }

    tag.replace_all(&html, |caps: &Captures<'_>| rewrite_tag(caps))
        .trim()
        .to_string()
}

fn rewrite_tag(caps: &Captures<'_>) -> String {
    let Some(name) = caps.get(2) else {
        return "&lt;".to_string();
    };
    let closing = !caps[1].is_empty();
    let name = name.as_str().to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return String::new();
    }
    if closing {
        return format!("</{name}>");
    }

    let raw_attrs = &caps[3];
    let self_closing = raw_attrs.trim_end().ends_with('/');
    let mut out = format!("<{name}");
    if let Some(attr_re) = ATTR.as_ref() {
        for a in attr_re.captures_iter(raw_attrs) {
            let attr = a[1].to_ascii_lowercase();
            let value = a
                .get(2)
                .or_else(|| a.get(3))
                .or_else(|| a.get(4))
                .map(|m| m.as_str());
            if let Some(kept) = keep_attr(&name, &attr, value) {
                out.push(' ');
                out.push_str(&attr);
                if let Some(v) = kept {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(&v));
                    out.push('"');
                }
            }
        }
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}

/// `None` drops the attribute; `Some(None)` keeps a bare boolean attribute.
fn keep_attr(tag: &str, attr: &str, value: Option<&str>) -> Option<Option<String>> {
    if attr.starts_with("on") {
        return None;
    }
    let allowed = GLOBAL_ATTRS.contains(&attr)
        || attr.starts_with("data-")
        || attr.starts_with("aria-")
        || TAG_ATTRS
            .iter()
            .any(|(t, attrs)| *t == tag && attrs.contains(&attr));
    if !allowed {
        return None;
    }

    let Some(value) = value else {
        return Some(None);
    };
    let value = unescape_attr(value);
    match attr {
        "src" | "href" | "cite" => safe_url(tag, attr, &value).map(Some),
        "style" => {
            let lower = value.to_ascii_lowercase();
            if lower.contains("expression(")
                || lower.contains("url(")
                || lower.contains("javascript:")
                || lower.contains("@import")
            {
                None
            } else {
                Some(Some(value))
            }
        }
        _ => Some(Some(value)),
    }
}

fn safe_url(tag: &str, attr: &str, value: &str) -> Option<String> {
    let v = value.trim();
    let v = match v.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => v.to_string(),
    };
    let lower = v.to_ascii_lowercase();
    if lower.starts_with("https://") {
        return Some(v);
    }
    let web_link = tag != "iframe"
        && (lower.starts_with("http://") || (attr == "href" && lower.starts_with("mailto:")));
    if web_link {
        return Some(v);
    }
    tracing::debug!(tag, attr, "dropping embed URL with disallowed scheme");
    None
}

fn escape_attr(v: &str) -> String {
    v.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_attr(v: &str) -> String {
    v.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "../../tests/unit/embed/sanitize.rs"]
mod tests;
