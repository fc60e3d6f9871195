use super::*;
use crate::frame::spec::FrameType;

fn spec(frame_type: FrameType, color: &str) -> FrameSpec {
    FrameSpec {
        frame_type,
        color_hex: HexColor::parse(color).unwrap(),
    }
}

#[test]
fn no_frame_emits_no_css() {
    let style = FrameStyle::for_spec(&spec(FrameType::None, "#123"));
    assert_eq!(style.outline, FrameOutline::None);
    assert_eq!(style.to_css(), "");
}

#[test]
fn circle_uses_border() {
    let style = FrameStyle::for_spec(&spec(FrameType::Circle, "#ff0066"));
    assert_eq!(
        style.to_css(),
        "aspect-ratio: 1 / 1; border-radius: 50%; border: 3px solid #ff0066;"
    );
}

#[test]
fn polygons_use_backdrop() {
    let style = FrameStyle::for_spec(&spec(FrameType::Pentagon, "#0af"));
    assert!(matches!(style.outline, FrameOutline::Backdrop { inset_px: 4, .. }));
    let css = style.to_css();
    assert!(css.starts_with("aspect-ratio: 1 / 1; clip-path: polygon(50% 0%"));
    assert!(css.ends_with("background-color: #0af; padding: 4px;"));
}

#[test]
fn css_is_deterministic() {
    for t in FrameType::ALL {
        let s = spec(t, "#abcdef");
        assert_eq!(FrameStyle::for_spec(&s).to_css(), FrameStyle::for_spec(&s).to_css());
    }
}
