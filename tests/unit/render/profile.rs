use super::*;
use crate::{
    embed::scaling::DimensionSource,
    frame::spec::HexColor,
    settings::model::ProfileSettings,
};

fn youtube_link() -> Link {
    Link {
        kind: "embed".to_string(),
        url: Some("https://youtu.be/xyz".to_string()),
        provider_name: Some("YouTube".to_string()),
        embed_html: Some(
            r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/xyz"></iframe><script>x()</script>"#
                .to_string(),
        ),
        ..Link::default()
    }
}

fn doc(links: Vec<Link>) -> ProfileDocument {
    ProfileDocument {
        username: "ada".to_string(),
        settings: ProfileSettings {
            profile_frame_type: FrameType::Circle,
            profile_frame_color: HexColor::parse("#ff0000").unwrap(),
            ..ProfileSettings::default()
        },
        links,
    }
}

#[test]
fn renders_frame_preview_and_embed() {
    let cfg = EngineConfig::default();
    let out = render_profile(&doc(vec![youtube_link()]), ViewportClass::Mobile, 600.0, &cfg).unwrap();

    assert_eq!(
        out.frame.css,
        "aspect-ratio: 1 / 1; border-radius: 50%; border: 3px solid #ff0000;"
    );
    assert_eq!(out.preview.src, "http://localhost:3000/ada?isIframe=true");
    assert_eq!(
        out.preview.key,
        PreviewSyncKey::derive(&doc(vec![]).settings.layout())
    );

    let link = &out.links[0];
    assert!(link.icon.is_none());
    let Some(EmbedView::Ready(layout)) = &link.embed else {
        panic!("expected a ready embed, got {:?}", link.embed);
    };
    assert_eq!(layout.provider_id, ProviderId::YouTube);
    assert_eq!(layout.container_class_name, "embed embed--video");
    assert!(layout.html.contains(r#"width="100%""#));
    assert!(!layout.html.contains("<script"));
    assert_eq!(layout.scaling.width, 576);
    assert_eq!(layout.scaling.source, DimensionSource::Markup);
}

#[test]
fn broken_embed_falls_back_without_affecting_siblings() {
    let cfg = EngineConfig::default();
    let broken = Link {
        kind: "embed".to_string(),
        embed_html: Some("<script>only()</script>".to_string()),
        ..Link::default()
    };
    let out = render_profile(
        &doc(vec![broken, youtube_link()]),
        ViewportClass::Desktop,
        800.0,
        &cfg,
    )
    .unwrap();

    match &out.links[0].embed {
        Some(EmbedView::Fallback { error: Some(e) }) => assert_eq!(e.section, "embed"),
        other => panic!("expected fallback, got {other:?}"),
    }
    assert!(matches!(out.links[1].embed, Some(EmbedView::Ready(_))));
}

#[test]
fn plain_links_get_initial_icon_sources() {
    let cfg = EngineConfig::default();
    let social = Link {
        kind: "social".to_string(),
        url: Some("https://instagram.com/ada".to_string()),
        ..Link::default()
    };
    let classic = Link {
        kind: "classic".to_string(),
        url: Some("https://blog.example.com".to_string()),
        ..Link::default()
    };
    let no_url = Link {
        kind: "classic".to_string(),
        ..Link::default()
    };
    let out = render_profile(
        &doc(vec![social, classic, no_url]),
        ViewportClass::Mobile,
        400.0,
        &cfg,
    )
    .unwrap();

    let icon = out.links[0].icon.as_ref().unwrap();
    assert_eq!(icon.src, "https://cdn.simpleicons.org/instagram/ff0000");
    assert_eq!(icon.tier, IconTier::Svg);
    assert_eq!(icon.size, 32);
    assert_eq!(
        out.links[1].icon.as_ref().map(|i| i.src.as_str()),
        Some("https://cdn.simpleicons.org/example/ff0000")
    );
    assert!(out.links[2].icon.is_none());
}

#[test]
fn serializes_to_camel_case_json() {
    let cfg = EngineConfig::default();
    let out = render_profile(&doc(vec![youtube_link()]), ViewportClass::Tablet, 700.0, &cfg).unwrap();
    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["viewport"], "tablet");
    assert_eq!(v["frame"]["frameType"], "circle");
    assert_eq!(v["links"][0]["embed"]["status"], "ready");
    assert_eq!(v["links"][0]["embed"]["providerId"], "youtube");
    assert!(v["preview"]["key"].as_str().unwrap().starts_with("preview-"));
}
