use crate::{config::engine::IconFallbackConfig, frame::spec::HexColor};

/// Country-code second-level labels that are not the brand (`bbc.co.uk`).
const SECOND_LEVEL: &[&str] = &["co", "com", "org", "net", "ac", "gov", "edu"];

/// Lowercased host of a link URL without `www.`, port or credentials.
pub fn domain_of(url: &str) -> Option<String> {
    let s = url.trim();
    let s = s
        .split_once("://")
        .map(|(_, rest)| rest)
        .or_else(|| s.strip_prefix("//"))
        .unwrap_or(s);
    let host = s.split(['/', '?', '#']).next()?;
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split(':').next()?.trim_end_matches('.');
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let valid = !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.');
    valid.then(|| host.to_string())
}

/// Brand label used as the vector icon name: `open.spotify.com` → `spotify`.
pub fn icon_name_for(url: &str) -> Option<String> {
    let domain = domain_of(url)?;
    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
    let name = match labels.as_slice() {
        [] => return None,
        [only] => *only,
        [.., sld, tld] if tld.len() == 2 && SECOND_LEVEL.contains(sld) && labels.len() >= 3 => {
            labels[labels.len() - 3]
        }
        [.., brand, _tld] => *brand,
    };
    Some(name.replace('-', ""))
}

/// Vector icon URL: `<endpoint>/<icon name>/<rrggbb>`.
pub fn svg_icon_url(cfg: &IconFallbackConfig, icon_name: &str, color: &HexColor) -> String {
    format!(
        "{}/{}/{}",
        cfg.svg_endpoint.trim_end_matches('/'),
        icon_name,
        color.hex6()
    )
}

/// Favicon URL for `domain` at `size` pixels.
pub fn favicon_url(cfg: &IconFallbackConfig, domain: &str, size: u32) -> String {
    format!(
        "{}?domain={}&sz={}",
        cfg.favicon_endpoint.trim_end_matches('/'),
        domain,
        size
    )
}

#[cfg(test)]
#[path = "../../tests/unit/icon/endpoints.rs"]
mod tests;
