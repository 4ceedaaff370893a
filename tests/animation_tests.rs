use std::time::Duration;

use approx::assert_relative_eq;
use linechart_rs::api::{AnimationDirection, LineChart, LineChartConfig, OverlayKind};
use linechart_rs::core::{Cartesian, Curve, Easing, LinearScale, PathGeometry, Series, Vertex, XScale};
use linechart_rs::scene::{AnimationPhase, Attr, NodeId, NodeKind, SceneGraph};

const HALF: Duration = Duration::from_millis(200);

fn cartesian() -> Cartesian {
    Cartesian::new(
        XScale::Linear(LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("x scale")),
        LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("y scale"),
    )
}

fn linear_config() -> LineChartConfig {
    let mut config = LineChartConfig::default();
    config.animations.easing = Easing::Linear;
    config
}

fn scene_with_layer() -> (SceneGraph, NodeId) {
    let mut scene = SceneGraph::new();
    let layer = scene
        .append(scene.root(), NodeKind::Group, "layer")
        .expect("layer");
    (scene, layer)
}

fn path_vertices(scene: &SceneGraph, layer: NodeId, name: &str) -> Vec<Vertex> {
    let path = LineChart::series_path(scene, layer, name).expect("path");
    scene
        .node(path)
        .expect("live")
        .path()
        .expect("geometry")
        .vertices
        .clone()
}

fn phase_of(scene: &SceneGraph, id: NodeId) -> AnimationPhase {
    scene.node(id).expect("live").phase()
}

#[test]
fn entering_line_reveals_left_to_right() {
    let (mut scene, layer) = scene_with_layer();
    let data = vec![Series::from_values("a", &[1.0, 2.0, 3.0, 4.0, 5.0])];
    let report = LineChart::new(linear_config())
        .render(&data, &mut scene, layer, &cartesian())
        .expect("render");
    assert!(report.animated);

    let path = LineChart::series_path(&scene, layer, "a").expect("path");
    assert_eq!(phase_of(&scene, path), AnimationPhase::Entering);
    assert_eq!(
        path_vertices(&scene, layer, "a"),
        vec![Vertex::new(0.5, 90.5), Vertex::new(0.5, 90.5)]
    );
    assert!(scene.has_transition(path));

    scene.advance(HALF);
    let partial = path_vertices(&scene, layer, "a");
    assert_eq!(partial.len(), 4);
    assert_relative_eq!(partial[3].x, 25.5, epsilon = 1e-9);
    assert_relative_eq!(partial[3].y, 65.5, epsilon = 1e-9);

    scene.advance(HALF);
    assert_eq!(path_vertices(&scene, layer, "a").len(), 5);
    assert_eq!(phase_of(&scene, path), AnimationPhase::Revealed);
    assert!(!scene.has_transition(path));
}

#[test]
fn reveal_progress_never_shrinks_the_drawn_prefix() {
    let (mut scene, layer) = scene_with_layer();
    let values: Vec<f64> = (0..20).map(|i| f64::from(i % 7)).collect();
    let data = vec![Series::from_values("a", &values)];
    LineChart::new(LineChartConfig::default())
        .render(&data, &mut scene, layer, &cartesian())
        .expect("render");

    let mut previous = 0;
    for _ in 0..30 {
        scene.advance(Duration::from_millis(16));
        let drawn = path_vertices(&scene, layer, "a").len();
        assert!(drawn >= previous);
        previous = drawn;
    }
}

#[test]
fn bottom_to_top_rises_from_the_axis_minimum() {
    let (mut scene, layer) = scene_with_layer();
    let mut config = linear_config();
    config.animation_direction = AnimationDirection::BottomToTop;
    config.y_axis_min = Some(2.0);
    let data = vec![Series::from_values("a", &[1.0, 2.0, 3.0])];
    LineChart::new(config)
        .render(&data, &mut scene, layer, &cartesian())
        .expect("render");

    let start = path_vertices(&scene, layer, "a");
    assert_eq!(start.len(), 3);
    assert!(start.iter().all(|v| (v.y - 80.5).abs() <= 1e-9));
    assert_relative_eq!(start[2].x, 20.5, epsilon = 1e-9);

    scene.advance(HALF);
    let mid = path_vertices(&scene, layer, "a");
    assert_relative_eq!(mid[0].y, 85.5, epsilon = 1e-9);
    assert_relative_eq!(mid[2].y, 75.5, epsilon = 1e-9);

    scene.advance(HALF);
    let path = LineChart::series_path(&scene, layer, "a").expect("path");
    assert_eq!(phase_of(&scene, path), AnimationPhase::Revealed);
    assert_relative_eq!(path_vertices(&scene, layer, "a")[0].y, 90.5, epsilon = 1e-9);
}

#[test]
fn unknown_direction_animates_like_bottom_to_top_from_zero() {
    let (mut scene, layer) = scene_with_layer();
    let mut config = linear_config();
    config.animation_direction = AnimationDirection::Other("diagonal".to_owned());
    let data = vec![Series::from_values("a", &[1.0, 2.0])];
    LineChart::new(config)
        .render(&data, &mut scene, layer, &cartesian())
        .expect("render");

    let start = path_vertices(&scene, layer, "a");
    assert_eq!(start.len(), 2);
    assert!(start.iter().all(|v| (v.y - 100.5).abs() <= 1e-9));
}

#[test]
fn markers_fade_in_after_the_line_is_drawn() {
    let (mut scene, layer) = scene_with_layer();
    let data = vec![Series::from_values("a", &[1.0, 2.0, 3.0])];
    LineChart::new(linear_config())
        .render(&data, &mut scene, layer, &cartesian())
        .expect("render");

    let dot = LineChart::overlay_dots(&scene, layer, OverlayKind::Markers, "a")[0];
    let opacity = |scene: &SceneGraph| scene.node(dot).expect("dot").opacity();
    assert_eq!(opacity(&scene), 0.0);
    assert_eq!(phase_of(&scene, dot), AnimationPhase::Entering);

    scene.advance(HALF);
    assert_eq!(opacity(&scene), 0.0);
    scene.advance(HALF);
    assert_eq!(opacity(&scene), 0.0);
    scene.advance(HALF);
    assert_relative_eq!(opacity(&scene), 0.5, epsilon = 1e-9);
    scene.advance(HALF);
    assert_relative_eq!(opacity(&scene), 1.0, epsilon = 1e-9);
    assert_eq!(phase_of(&scene, dot), AnimationPhase::Revealed);
}

#[test]
fn existing_line_morphs_to_new_values() {
    let (mut scene, layer) = scene_with_layer();
    let chart = LineChart::new(linear_config());
    chart
        .render(
            &[Series::from_values("a", &[1.0, 2.0, 3.0])],
            &mut scene,
            layer,
            &cartesian(),
        )
        .expect("first render");
    assert!(scene.run_to_completion(Duration::from_millis(16), 200));

    let report = chart
        .render(
            &[Series::from_values("a", &[3.0, 3.0, 3.0])],
            &mut scene,
            layer,
            &cartesian(),
        )
        .expect("second render");
    assert_eq!(report.series.updating, 1);

    let path = LineChart::series_path(&scene, layer, "a").expect("path");
    assert_eq!(phase_of(&scene, path), AnimationPhase::Updating);

    scene.advance(HALF);
    let mid = path_vertices(&scene, layer, "a");
    assert_eq!(mid.len(), 3);
    assert_relative_eq!(mid[0].y, 80.5, epsilon = 1e-9);

    scene.advance(HALF);
    assert!(path_vertices(&scene, layer, "a").iter().all(|v| (v.y - 70.5).abs() <= 1e-9));
    assert_eq!(phase_of(&scene, path), AnimationPhase::Stable);
}

#[test]
fn latest_render_wins_over_an_unfinished_animation() {
    let (mut scene, layer) = scene_with_layer();
    let chart = LineChart::new(linear_config());
    chart
        .render(
            &[Series::from_values("a", &[1.0, 2.0, 3.0, 4.0, 5.0])],
            &mut scene,
            layer,
            &cartesian(),
        )
        .expect("first render");
    scene.advance(Duration::from_millis(100));

    chart
        .render(
            &[Series::from_values("a", &[5.0, 4.0, 3.0, 2.0, 1.0])],
            &mut scene,
            layer,
            &cartesian(),
        )
        .expect("second render");
    let path = LineChart::series_path(&scene, layer, "a").expect("path");
    assert_eq!(phase_of(&scene, path), AnimationPhase::Updating);
    // one pending transition per path and per dot
    assert_eq!(scene.pending_transitions(), 6);

    assert!(scene.run_to_completion(Duration::from_millis(16), 200));
    let expected: Vec<Vertex> = (0..5)
        .map(|i| Vertex::new(f64::from(i) * 10.0 + 0.5, 100.0 - f64::from(5 - i) * 10.0 + 0.5))
        .collect();
    assert_eq!(
        scene.node(path).expect("live").path(),
        Some(&PathGeometry::new(expected, Curve::Linear))
    );
    assert_eq!(phase_of(&scene, path), AnimationPhase::Stable);

    for dot in LineChart::overlay_dots(&scene, layer, OverlayKind::Markers, "a") {
        assert_relative_eq!(scene.node(dot).expect("dot").opacity(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn removed_series_fades_out_before_removal() {
    let (mut scene, layer) = scene_with_layer();
    let mut config = linear_config();
    config.tooltip.enable = true;
    let chart = LineChart::new(config);
    let data = vec![
        Series::from_values("a", &[1.0, 2.0]),
        Series::from_values("b", &[2.0, 1.0]),
    ];
    chart
        .render(&data, &mut scene, layer, &cartesian())
        .expect("first render");
    assert!(scene.run_to_completion(Duration::from_millis(16), 200));
    let group_b = LineChart::series_group(&scene, layer, "b").expect("group b");
    let markers_b =
        LineChart::overlay_group(&scene, layer, OverlayKind::Markers, "b").expect("markers b");

    let report = chart
        .render(&data[..1], &mut scene, layer, &cartesian())
        .expect("second render");
    assert_eq!(report.series.exiting, 1);
    assert!(scene.is_pending_removal(group_b));
    assert_eq!(phase_of(&scene, group_b), AnimationPhase::Exiting);
    assert!(scene.is_pending_removal(markers_b));
    assert!(LineChart::overlay_dots(&scene, layer, OverlayKind::Markers, "b").is_empty());
    assert!(LineChart::overlay_group(&scene, layer, OverlayKind::Trackers, "b").is_none());
    assert_eq!(LineChart::series_keys(&scene, layer), vec!["a"]);
    assert_eq!(LineChart::series_group(&scene, layer, "b"), Some(group_b));
    assert_eq!(
        LineChart::overlay_group(&scene, layer, OverlayKind::Markers, "b"),
        Some(markers_b)
    );

    scene.advance(HALF);
    assert_relative_eq!(scene.node(group_b).expect("fading").opacity(), 0.5, epsilon = 1e-9);

    // a repeated render must not restart the fade
    chart
        .render(&data[..1], &mut scene, layer, &cartesian())
        .expect("third render");
    scene.advance(HALF);
    assert!(!scene.is_live(group_b));
    assert!(!scene.is_live(markers_b));
}

#[test]
fn series_returning_during_its_exit_is_revived() {
    let (mut scene, layer) = scene_with_layer();
    let chart = LineChart::new(linear_config());
    let data = vec![
        Series::from_values("a", &[1.0, 2.0]),
        Series::from_values("b", &[2.0, 1.0]),
    ];
    chart
        .render(&data, &mut scene, layer, &cartesian())
        .expect("first render");
    assert!(scene.run_to_completion(Duration::from_millis(16), 200));
    let group_b = LineChart::series_group(&scene, layer, "b").expect("group b");

    chart
        .render(&data[..1], &mut scene, layer, &cartesian())
        .expect("removal");
    scene.advance(Duration::from_millis(100));

    let report = chart
        .render(&data, &mut scene, layer, &cartesian())
        .expect("return");
    assert_eq!(report.series.updating, 2);
    assert_eq!(report.series.entering, 0);
    assert!(!scene.is_pending_removal(group_b));
    assert_eq!(scene.node(group_b).expect("live").opacity(), 1.0);

    assert!(scene.run_to_completion(Duration::from_millis(16), 200));
    assert!(scene.is_live(group_b));
    assert_eq!(LineChart::series_keys(&scene, layer), vec!["a", "b"]);
}

#[test]
fn removing_the_layer_mid_animation_drops_its_transitions() {
    let (mut scene, layer) = scene_with_layer();
    LineChart::new(linear_config())
        .render(
            &[Series::from_values("a", &[1.0, 2.0, 3.0])],
            &mut scene,
            layer,
            &cartesian(),
        )
        .expect("render");
    scene.advance(Duration::from_millis(100));
    assert!(scene.pending_transitions() > 0);

    assert!(scene.remove(layer));
    assert_eq!(scene.pending_transitions(), 0);
    scene.advance(Duration::from_secs(1));
    assert!(scene.is_empty());
}

#[test]
fn disabled_animations_draw_final_state_at_once() {
    let (mut scene, layer) = scene_with_layer();
    let mut config = LineChartConfig::default();
    config.animations.enable = false;
    let report = LineChart::new(config)
        .render(
            &[Series::from_values("a", &[1.0, 2.0, 3.0])],
            &mut scene,
            layer,
            &cartesian(),
        )
        .expect("render");

    assert!(!report.animated);
    assert_eq!(scene.pending_transitions(), 0);
    assert_eq!(path_vertices(&scene, layer, "a").len(), 3);
    let path = LineChart::series_path(&scene, layer, "a").expect("path");
    assert_eq!(phase_of(&scene, path), AnimationPhase::Revealed);
    for dot in LineChart::overlay_dots(&scene, layer, OverlayKind::Markers, "a") {
        let node = scene.node(dot).expect("dot");
        assert_eq!(node.opacity(), 1.0);
        assert_eq!(node.number(Attr::Radius), Some(3.0));
    }
}
