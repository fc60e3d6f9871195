use super::*;

fn parse_polygon(clip: &str) -> Vec<(f64, f64)> {
    clip.trim_start_matches("polygon(")
        .trim_end_matches(')')
        .split(", ")
        .map(|pair| {
            let mut it = pair
                .split(' ')
                .map(|v| v.trim_end_matches('%').parse::<f64>().unwrap());
            (it.next().unwrap(), it.next().unwrap())
        })
        .collect()
}

#[test]
fn none_has_no_shape() {
    let g = geometry_for(FrameType::None);
    assert!(g.is_empty());
    assert_eq!(serde_json::to_string(&g).unwrap(), "{}");
}

#[test]
fn rounded_frames_have_no_clip_path() {
    for t in [
        FrameType::Circle,
        FrameType::Square,
        FrameType::RectH,
        FrameType::RectV,
        FrameType::OvalV,
    ] {
        let g = geometry_for(t);
        assert!(g.clip_path.is_none(), "{t}");
        assert!(g.border_radius.is_some(), "{t}");
        assert!(g.aspect_ratio.is_some(), "{t}");
    }
    assert_eq!(geometry_for(FrameType::Circle).border_radius.as_deref(), Some("50%"));
    assert_eq!(geometry_for(FrameType::OvalV).aspect_ratio.as_deref(), Some("3 / 4"));
    assert_eq!(geometry_for(FrameType::RectH).aspect_ratio.as_deref(), Some("4 / 3"));
}

#[test]
fn pentagon_matches_reference_vertices() {
    let clip = geometry_for(FrameType::Pentagon).clip_path.unwrap();
    let got = parse_polygon(&clip);
    let want = [(50.0, 0.0), (100.0, 38.0), (82.0, 100.0), (18.0, 100.0), (0.0, 38.0)];
    assert_eq!(got.len(), want.len());
    for ((gx, gy), (wx, wy)) in got.iter().zip(want) {
        assert!((gx - wx).abs() <= 2.0 && (gy - wy).abs() <= 2.0, "{clip}");
    }
}

#[test]
fn pentagon_string_is_stable() {
    assert_eq!(
        geometry_for(FrameType::Pentagon).clip_path.as_deref(),
        Some("polygon(50% 0%, 100% 38.2%, 80.9% 100%, 19.1% 100%, 0% 38.2%)")
    );
}

#[test]
fn polygon_geometry_is_deterministic() {
    for t in FrameType::ALL {
        assert_eq!(geometry_for(t), geometry_for(t));
    }
    assert_eq!(
        geometry_for(FrameType::Hexagon).clip_path,
        geometry_for(FrameType::Hexagon).clip_path
    );
}

#[test]
fn polygons_have_n_vertices_starting_at_top_clockwise() {
    for t in FrameType::ALL {
        let Some(n) = t.polygon_sides() else { continue };
        let pts = parse_polygon(&geometry_for(t).clip_path.unwrap());
        assert_eq!(pts.len(), n as usize, "{t}");
        assert_eq!(pts[0], (50.0, 0.0), "{t}");
        // Second vertex is to the right of the first: clockwise on screen.
        assert!(pts[1].0 > pts[0].0, "{t}");
        for (x, y) in &pts {
            assert!((0.0..=100.0).contains(x) && (0.0..=100.0).contains(y), "{t}");
        }
        // Box-filling: some vertex touches each edge.
        assert!(pts.iter().any(|p| p.0 == 0.0));
        assert!(pts.iter().any(|p| p.0 == 100.0));
        assert!(pts.iter().any(|p| p.1 == 100.0));
    }
}

#[test]
fn hexagon_is_symmetric() {
    let pts = parse_polygon(&geometry_for(FrameType::Hexagon).clip_path.unwrap());
    assert_eq!(pts[3], (50.0, 100.0));
    assert_eq!(pts[1].1, pts[5].1);
    assert!((pts[1].0 + pts[5].0 - 100.0).abs() < 1e-9);
}

#[test]
fn heart_is_a_fixed_clip_path() {
    let g = geometry_for(FrameType::Heart);
    assert_eq!(g.aspect_ratio.as_deref(), Some("1 / 1"));
    let pts = parse_polygon(g.clip_path.as_deref().unwrap());
    assert_eq!(pts[0], (50.0, 100.0));
}
