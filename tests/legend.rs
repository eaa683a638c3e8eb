use flagscope::legend::{place_legend, LegendCorner, LegendPlacement, SLOW_PLACEMENT_POINTS};

#[test]
fn empty_corner_is_preferred() {
    // A rising line fills the lower-left and upper-right corners.
    let line: Vec<[f64; 2]> = (0..=100).map(|i| [i as f64, i as f64]).collect();
    let p = place_legend([line.as_slice()], (0.0, 100.0), (0.0, 100.0));
    assert_eq!(p.corner, LegendCorner::LeftTop);
    assert!(!p.slow_fallback);
}

#[test]
fn ties_follow_preference_order() {
    let p = place_legend(std::iter::empty::<&[[f64; 2]]>(), (0.0, 1.0), (0.0, 1.0));
    assert_eq!(p.corner, LegendCorner::RightTop);
}

#[test]
fn placement_is_idempotent() {
    let a: Vec<[f64; 2]> = (0..50).map(|i| [i as f64, (i % 7) as f64]).collect();
    let b: Vec<[f64; 2]> = (0..50).map(|i| [i as f64, 10.0 - (i % 5) as f64]).collect();
    let series = [a.as_slice(), b.as_slice()];
    let first = place_legend(series, (0.0, 49.0), (0.0, 10.0));
    let second = place_legend(series, (0.0, 49.0), (0.0, 10.0));
    assert_eq!(first, second);
}

#[test]
fn too_many_points_fall_back_to_upper_right() {
    let big = vec![[0.0, 0.0]; SLOW_PLACEMENT_POINTS + 1];
    let p = place_legend([big.as_slice()], (0.0, 1.0), (0.0, 1.0));
    assert_eq!(p, LegendPlacement::FALLBACK);
    assert!(p.slow_fallback);
}
