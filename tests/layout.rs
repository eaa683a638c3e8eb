use flagscope::data::layout::{compute_layout, LayoutParams, Margins, BAND_GAP_PX, MIN_MAIN_HEIGHT};

fn params(screen: f64, flag_px: f64, n: usize) -> LayoutParams {
    LayoutParams {
        screen_height_px: screen,
        flag_height_px: flag_px,
        flag_count: n,
        margins: Margins::default(),
    }
}

const EPS: f64 = 1e-9;

#[test]
fn no_flags_gives_main_all_but_margins() {
    let m = Margins::default();
    let l = compute_layout(&params(800.0, 24.0, 0));
    assert!(l.flags.is_empty());
    assert!(!l.clamped);
    assert!((l.main_height - (1.0 - m.top - m.bottom)).abs() < EPS);
    assert!((l.main.bottom - m.bottom).abs() < EPS);
    assert!((l.main.width - (1.0 - m.left - m.right)).abs() < EPS);
}

#[test]
fn flags_stack_above_main_first_on_top() {
    let l = compute_layout(&params(1000.0, 20.0, 3));
    let gap = BAND_GAP_PX / 1000.0;
    let row = 20.0 / 1000.0;
    assert_eq!(l.flags.len(), 3);
    assert!((l.flags[2].bottom - (l.main.top() + gap)).abs() < EPS);
    assert!((l.flags[1].bottom - (l.flags[2].top())).abs() < EPS);
    assert!((l.flags[0].bottom - (l.flags[1].top())).abs() < EPS);
    for r in &l.flags {
        assert!((r.height - row).abs() < EPS);
        assert_eq!(r.left, l.main.left);
        assert_eq!(r.width, l.main.width);
    }
    assert!((l.flag_row_px - 20.0).abs() < 1e-6);
}

#[test]
fn regions_never_exceed_the_window() {
    for n in [0, 1, 5, 20, 200] {
        for screen in [10.0, 20.0, 30.0, 40.0, 120.0, 400.0, 1080.0] {
            let l = compute_layout(&params(screen, 24.0, n));
            assert!(l.occupied_height() <= 1.0 + EPS, "n={n} screen={screen}");
            assert!(l.main_height >= MIN_MAIN_HEIGHT - EPS);
            if let Some(top) = l.flags.first() {
                assert!(top.top() <= 1.0 + EPS, "n={n} screen={screen}");
                assert!(top.bottom >= l.main.top() - EPS);
            }
        }
    }
}

#[test]
fn too_many_flags_clamp_main_and_shrink_rows() {
    let l = compute_layout(&params(400.0, 24.0, 40));
    assert!(l.clamped);
    assert!((l.main_height - MIN_MAIN_HEIGHT).abs() < EPS);
    assert!(l.flag_row_px < 24.0);
    let m = Margins::default();
    let top = l.flags[0].top();
    assert!((top - (1.0 - m.top)).abs() < 1e-6);
}

#[test]
fn layout_is_deterministic() {
    let p = params(733.0, 17.0, 6);
    assert_eq!(compute_layout(&p), compute_layout(&p));
}

#[test]
fn short_window_shrinks_the_gap_with_the_rows() {
    let m = Margins::default();
    let l = compute_layout(&params(30.0, 24.0, 1));
    assert!(l.clamped);
    let flag = l.flags[0];
    assert!(flag.height > 0.0);
    assert!(flag.bottom > l.main.top());
    assert!((flag.top() - (1.0 - m.top)).abs() < 1e-9);
}
