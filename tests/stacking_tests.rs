use linechart_rs::api::{LineChart, LineChartConfig, OverlayKind};
use linechart_rs::core::{Cartesian, LinearScale, Point, Series, XScale, stack_series};
use linechart_rs::error::ChartError;
use linechart_rs::scene::{Attr, Datum, NodeKind, SceneGraph};

fn cartesian() -> Cartesian {
    Cartesian::new(
        XScale::Linear(LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("x scale")),
        LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("y scale"),
    )
}

fn stacked_static_chart() -> LineChart {
    let mut config = LineChartConfig::default();
    config.stacked = true;
    config.animations.enable = false;
    LineChart::new(config)
}

#[test]
fn second_series_sits_on_top_of_the_first() {
    let stacked = stack_series(vec![
        Series::new("a", vec![Point::new(0.0, 2.0)]),
        Series::new("b", vec![Point::new(0.0, 3.0)]),
    ])
    .expect("stack");

    assert_eq!(stacked[0].data[0].y0, 0.0);
    assert_eq!(stacked[1].data[0].y0, 2.0);
    assert_eq!(stacked[1].data[0].stacked_y(), Some(5.0));
}

#[test]
fn stacked_render_maps_cumulative_value() {
    let mut scene = SceneGraph::new();
    let layer = scene
        .append(scene.root(), NodeKind::Group, "layer")
        .expect("layer");
    let data = vec![
        Series::new("a", vec![Point::new(0.0, 2.0)]),
        Series::new("b", vec![Point::new(0.0, 3.0)]),
    ];

    stacked_static_chart()
        .render(&data, &mut scene, layer, &cartesian())
        .expect("render");

    let dots_b = LineChart::overlay_dots(&scene, layer, OverlayKind::Markers, "b");
    let dot_b = scene.node(dots_b[0]).expect("dot b");
    // domain value 5 on a 0..10 -> 100..0 scale, plus the half-pixel nudge
    assert!((dot_b.number(Attr::CenterY).expect("cy") - 50.5).abs() <= 1e-9);
    match dot_b.datum() {
        Some(Datum::Point { point, .. }) => assert_eq!(point.y0, 2.0),
        other => panic!("unexpected datum {other:?}"),
    }

    let dots_a = LineChart::overlay_dots(&scene, layer, OverlayKind::Markers, "a");
    let dot_a = scene.node(dots_a[0]).expect("dot a");
    assert!((dot_a.number(Attr::CenterY).expect("cy") - 80.5).abs() <= 1e-9);
    match dot_a.datum() {
        Some(Datum::Point { point, .. }) => assert_eq!(point.y0, 0.0),
        other => panic!("unexpected datum {other:?}"),
    }
}

#[test]
fn misaligned_series_fail_before_touching_the_scene() {
    let mut scene = SceneGraph::new();
    let layer = scene
        .append(scene.root(), NodeKind::Group, "layer")
        .expect("layer");
    let nodes_before = scene.len();
    let data = vec![
        Series::from_values("a", &[1.0, 2.0]),
        Series::from_values("b", &[1.0]),
    ];

    let result = stacked_static_chart().render(&data, &mut scene, layer, &cartesian());
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(scene.len(), nodes_before);
}

#[test]
fn mismatched_x_sequences_are_not_realigned() {
    let result = stack_series(vec![
        Series::new("a", vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0)]),
        Series::new("b", vec![Point::new(0.0, 1.0), Point::new(2.0, 1.0)]),
    ]);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}
