use super::*;

#[test]
fn domain_strips_scheme_www_port_and_path() {
    assert_eq!(
        domain_of("https://www.Instagram.com/ada?x=1").as_deref(),
        Some("instagram.com")
    );
    assert_eq!(domain_of("//cdn.example.org:8080/a").as_deref(), Some("cdn.example.org"));
    assert_eq!(domain_of("user:pw@github.com/ada").as_deref(), Some("github.com"));
    assert_eq!(domain_of("tiktok.com/@ada").as_deref(), Some("tiktok.com"));
    assert_eq!(domain_of(""), None);
    assert_eq!(domain_of("https://"), None);
    assert_eq!(domain_of("https://exa mple.com"), None);
}

#[test]
fn icon_name_is_brand_label() {
    assert_eq!(icon_name_for("https://open.spotify.com/artist/1").as_deref(), Some("spotify"));
    assert_eq!(icon_name_for("https://x.com/ada").as_deref(), Some("x"));
    assert_eq!(icon_name_for("https://www.bbc.co.uk/news").as_deref(), Some("bbc"));
    assert_eq!(icon_name_for("https://buy-me-a-coffee.com").as_deref(), Some("buymeacoffee"));
    assert_eq!(icon_name_for("localhost").as_deref(), Some("localhost"));
    assert_eq!(icon_name_for("::"), None);
}

#[test]
fn endpoint_urls() {
    let cfg = IconFallbackConfig::default();
    let color = HexColor::parse("#F0A").unwrap();
    assert_eq!(
        svg_icon_url(&cfg, "instagram", &color),
        "https://cdn.simpleicons.org/instagram/ff00aa"
    );
    assert_eq!(
        favicon_url(&cfg, "instagram.com", 32),
        "https://www.google.com/s2/favicons?domain=instagram.com&sz=32"
    );
}
