use flagscope::data::x_formatter::*;

// 2024-03-05 14:07:09 UTC
const T: f64 = 1_709_647_629.0;

#[test]
fn time_only_and_date_time_patterns() {
    let wide = (T - 3600.0, T + 3600.0);
    assert_eq!(TimeFormatter::new(TimeFormat::TimeOnly).format(T, wide), "14:07:09");
    assert_eq!(
        TimeFormatter::new(TimeFormat::DateTime).format(T, wide),
        "2024-03-05 14:07"
    );
}

#[test]
fn narrow_spans_show_milliseconds() {
    let tf = TimeFormatter::new(TimeFormat::TimeOnly);
    assert_eq!(tf.format(T + 0.25, (T, T + 2.0)), "14:07:09.250");
    let dt = TimeFormatter::new(TimeFormat::DateTime);
    assert_eq!(dt.format(T + 0.25, (T, T + 2.0)), "2024-03-05 14:07");
}

#[test]
fn toggle_label_shows_the_other_format() {
    assert_eq!(TimeFormat::TimeOnly.toggle_label(T), "2024");
    assert_eq!(TimeFormat::DateTime.toggle_label(T), "14:07");
    assert_eq!(TimeFormat::from_time_only(true), TimeFormat::TimeOnly);
    assert_eq!(TimeFormat::from_time_only(false), TimeFormat::DateTime);
}

#[test]
fn value_ticks_follow_step_size() {
    assert_eq!(format_value(12.0, 5.0), "12");
    assert_eq!(format_value(0.25, 0.05), "0.25");
    assert_eq!(format_value(0.00012, 0.00001), "1.20e-4");
    assert_eq!(format_percent(42.4), "42%");
}
