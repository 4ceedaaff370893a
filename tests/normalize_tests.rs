use linechart_rs::core::{
    Cartesian, CoordinateMapper, LinearScale, Point, Series, XScale, normalize_series,
};

fn cartesian() -> Cartesian {
    Cartesian::new(
        XScale::Linear(LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("x scale")),
        LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("y scale"),
    )
}

fn normalize(series: &[Series]) -> Vec<Series> {
    let cartesian = cartesian();
    let mapper = CoordinateMapper::new(cartesian.require().expect("scales"));
    normalize_series(series, &mapper).expect("normalize")
}

#[test]
fn gaps_are_dropped_from_the_drawn_series() {
    let raw = vec![Series::new(
        "a",
        vec![Point::new(0.0, 1.0), Point::gap(1.0), Point::new(2.0, 2.0)],
    )];

    let normalized = normalize(&raw);
    assert_eq!(
        normalized[0].data,
        vec![Point::new(0.0, 1.0), Point::new(2.0, 2.0)]
    );
}

#[test]
fn consecutive_points_on_the_same_pixel_keep_the_first() {
    let raw = vec![Series::new(
        "a",
        vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 5.0),
            Point::new(2.0, 3.0),
        ],
    )];

    let normalized = normalize(&raw);
    assert_eq!(
        normalized[0].data,
        vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0)]
    );
}

#[test]
fn equal_y_on_distinct_x_is_kept() {
    let raw = vec![Series::from_values("flat", &[4.0, 4.0, 4.0])];
    assert_eq!(normalize(&raw)[0].data.len(), 3);
}

#[test]
fn leading_gap_does_not_drop_the_next_point() {
    let raw = vec![Series::new(
        "a",
        vec![Point::gap(0.0), Point::new(1.0, 3.0)],
    )];
    assert_eq!(normalize(&raw)[0].data, vec![Point::new(1.0, 3.0)]);
}

#[test]
fn duplicate_after_a_gap_compares_against_last_kept_point() {
    let raw = vec![Series::new(
        "a",
        vec![Point::new(1.0, 1.0), Point::gap(2.0), Point::new(1.0, 9.0)],
    )];
    assert_eq!(normalize(&raw)[0].data, vec![Point::new(1.0, 1.0)]);
}

#[test]
fn normalizing_leaves_caller_series_untouched() {
    let raw = vec![Series::new(
        "a",
        vec![Point::new(0.0, 1.0), Point::gap(1.0)],
    )];
    let before = raw.clone();
    let _ = normalize(&raw);
    assert_eq!(raw, before);
}

#[test]
fn mapper_centers_in_band_and_nudges_half_pixel() {
    let cartesian = Cartesian::new(
        XScale::Band(
            linechart_rs::core::BandScale::new(["q1", "q2"], (0.0, 200.0), 0.0).expect("band"),
        ),
        LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("y scale"),
    );
    let mapper = CoordinateMapper::new(cartesian.require().expect("scales"));

    let x = mapper.map_x(&Point::new("q2", 5.0)).expect("map x");
    let y = mapper.map_y(&Point::new("q2", 5.0)).expect("map y");
    assert!((x - 150.5).abs() <= 1e-9);
    assert!((y - 50.5).abs() <= 1e-9);
}

#[test]
fn non_finite_values_are_rejected() {
    let series = Series::new("a", vec![Point::new(0.0, f64::NAN)]);
    assert!(series.validate().is_err());
}

#[test]
fn repeated_x_within_a_series_is_rejected() {
    let series = Series::new(
        "a",
        vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0), Point::new(0.0, 3.0)],
    );
    assert!(series.validate().is_err());
    assert!(Series::from_values("a", &[1.0, 1.0]).validate().is_ok());
}
