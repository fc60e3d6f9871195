use super::*;

#[test]
fn empty_input_is_none() {
    assert_eq!(parse_dimensions(None), None);
    assert_eq!(parse_dimensions(Some("")), None);
    assert_eq!(parse_dimensions(Some("  \n")), None);
}

#[test]
fn attributes_are_read() {
    let d = parse_dimensions(Some(r#"<iframe width="400" height="300" src="x"></iframe>"#));
    assert_eq!(d, Some(EmbedDimensions::new(400.0, 300.0)));
}

#[test]
fn single_quoted_and_bare_attributes() {
    let d = parse_dimensions(Some("<iframe width='320' height=180></iframe>")).unwrap();
    assert_eq!(d, EmbedDimensions::new(320.0, 180.0));
}

#[test]
fn inline_style_is_second_choice() {
    let d = parse_dimensions(Some(
        r#"<div style="max-width: 900px; width: 500px; height:250px"></div>"#,
    ))
    .unwrap();
    assert_eq!(d, EmbedDimensions::new(500.0, 250.0));
}

#[test]
fn axes_resolve_independently() {
    let d = parse_dimensions(Some(
        r#"<iframe width="640" style="height: 360px" src="x"></iframe>"#,
    ))
    .unwrap();
    assert_eq!(d, EmbedDimensions::new(640.0, 360.0));
}

#[test]
fn first_match_wins() {
    let d = parse_dimensions(Some(
        r#"<iframe width="100" height="50"></iframe><iframe width="200" height="80"></iframe>"#,
    ))
    .unwrap();
    assert_eq!(d, EmbedDimensions::new(100.0, 50.0));
}

#[test]
fn no_markers_yield_zeroes() {
    let d = parse_dimensions(Some("<blockquote class=\"tiktok-embed\">hi</blockquote>")).unwrap();
    assert!(d.is_unknown());
}

#[test]
fn data_attributes_are_not_dimensions() {
    let d = parse_dimensions(Some(r#"<div data-width="500" data-max-height="20"></div>"#)).unwrap();
    assert!(d.is_unknown());
}

#[test]
fn percentages_fall_through_to_style() {
    let d = parse_dimensions(Some(
        r#"<iframe width="100%" height="352" style="width:300px"></iframe>"#,
    ))
    .unwrap();
    assert_eq!(d, EmbedDimensions::new(300.0, 352.0));

    let d = parse_dimensions(Some(r#"<iframe width="100%" height="352"></iframe>"#)).unwrap();
    assert_eq!(d, EmbedDimensions::new(0.0, 352.0));
}

#[test]
fn non_pixel_wrapper_attribute_does_not_hide_the_iframe() {
    let d = parse_dimensions(Some(
        r#"<div width="100%"><iframe width="400" height="300"></iframe></div>"#,
    ))
    .unwrap();
    assert_eq!(d, EmbedDimensions::new(400.0, 300.0));
}

#[test]
fn negative_values_clamp_to_zero() {
    let d = parse_dimensions(Some(r#"<iframe width="-40" height="-1"></iframe>"#)).unwrap();
    assert_eq!(d, EmbedDimensions::new(0.0, 0.0));
}

#[test]
fn malformed_markup_never_panics() {
    for html in ["<iframe width=", "width=\"", "<<<>>>", "style=\"width:", "height=px"] {
        let d = parse_dimensions(Some(html)).unwrap();
        assert!(d.width >= 0.0 && d.height >= 0.0);
    }
}
