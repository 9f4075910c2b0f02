//! Tests for node placement, connectors and view geometry.
mod common;
use common::*;
use shindan::layout::bounds::ViewBounds;
use shindan::layout::hierarchical::{row_width, sibling_gap};
use shindan::layout::radial::ring_radius;
use shindan::layout::routing::{self, Point};
use shindan::layout::{CanvasTransform, ViewportClass};
use shindan::prelude::*;
use std::f64::consts::PI;

fn layout(root: &FaultTreeNode, strategy: LayoutStrategy) -> LayoutResult {
    LayoutEngine::new().calculate_layout(root, strategy, &wide_viewport())
}

#[test]
fn test_viewport_presets() {
    let engine = LayoutEngine::new();

    let narrow = engine.effective_config(&ViewportConfig::new(500.0));
    assert_eq!(
        (narrow.horizontal_spacing, narrow.level_height, narrow.vertical_spacing),
        (180.0, 220.0, 200.0)
    );
    let medium = engine.effective_config(&ViewportConfig::new(768.0));
    assert_eq!(
        (medium.horizontal_spacing, medium.level_height, medium.vertical_spacing),
        (200.0, 250.0, 220.0)
    );
    let wide = engine.effective_config(&ViewportConfig::new(1200.0));
    assert_eq!(
        (wide.horizontal_spacing, wide.level_height, wide.vertical_spacing),
        (220.0, 280.0, 250.0)
    );
    assert_eq!((wide.node_width, wide.node_height), (160.0, 120.0));
    assert_eq!(ViewportConfig::new(767.9).class(), ViewportClass::Narrow);
}

#[test]
fn test_overrides_apply_after_viewport_adaptation() {
    let mut engine = LayoutEngine::new();
    engine.update_config(LayoutOverrides::default().with_level_height(500.0));
    engine.update_config(LayoutOverrides::default().with_node_width(180.0));

    let config = engine.effective_config(&wide_viewport());
    assert_eq!(config.level_height, 500.0);
    assert_eq!(config.node_width, 180.0);
    assert_eq!(config.horizontal_spacing, 220.0);

    let tree = fault("root", vec![fault("child", vec![])]);
    let result = engine.calculate_layout(&tree, LayoutStrategy::Hierarchical, &wide_viewport());
    assert_eq!(result.positions.get("child").unwrap().y, 500.0);
}

#[test]
fn test_hierarchical_rows_are_centered() {
    let tree = fault(
        "root",
        vec![
            fault("a", vec![]),
            fault("a_much_longer_label_that_needs_a_wider_box_x", vec![]),
            fault("c", vec![]),
        ],
    );
    let result = layout(&tree, LayoutStrategy::Hierarchical);

    let row: Vec<&FaultTreeNode> = tree.children.iter().collect();
    let widths: Vec<f64> = row.iter().map(|n| TextFitter::node_width(&n.name)).collect();
    assert!(widths[1] > 200.0);

    let xs: Vec<f64> = row
        .iter()
        .map(|n| result.positions.get(&n.id).unwrap().x)
        .collect();
    let right_edge = xs[2] + widths[2];
    assert_close(xs[0] + right_edge, 0.0);
    assert_close(right_edge - xs[0], row_width(&widths));

    // consecutive boxes are separated by the sibling gap
    assert_close(xs[1] - (xs[0] + widths[0]), sibling_gap(widths[0], widths[1]));

    let root = result.positions.get("root").unwrap();
    assert_eq!((root.x, root.y, root.level), (-100.0, 0.0, 0));
    for n in &row {
        let p = result.positions.get(&n.id).unwrap();
        assert_eq!((p.y, p.level), (280.0, 1));
    }
}

#[test]
fn test_sibling_gap_has_a_floor() {
    assert_eq!(sibling_gap(100.0, 60.0), 50.0);
    assert_eq!(sibling_gap(200.0, 200.0), 100.0);
    assert_eq!(row_width(&[200.0, 200.0, 200.0]), 800.0);
    assert_eq!(row_width(&[]), 0.0);
}

#[test]
fn test_virtual_root_children_share_level_zero() {
    let tree = FaultTreeNode::virtual_root(vec![
        fault("left", vec![fault("left_child", vec![])]),
        fault("right", vec![]),
    ]);
    let result = layout(&tree, LayoutStrategy::Hierarchical);

    assert!(!result.positions.contains("virtual_root"));
    assert_eq!(result.positions.len(), 3);
    let left = result.positions.get("left").unwrap();
    let right = result.positions.get("right").unwrap();
    assert_eq!((left.level, right.level), (0, 0));
    assert_eq!((left.x, right.x), (-250.0, 50.0));
    assert_eq!(result.positions.get("left_child").unwrap().level, 1);

    // the virtual root never emits connections
    assert_eq!(result.connections.len(), 1);
    assert_eq!(result.connections[0].from, "left");
}

#[test]
fn test_empty_tree_yields_empty_layout() {
    let tree = FaultTreeNode::virtual_root(Vec::new());
    for strategy in LayoutStrategy::ALL {
        let result = layout(&tree, strategy);
        assert!(result.is_empty());
        assert!(result.connections.is_empty());
        assert_eq!(result.view_bounds(), ViewBounds::default());
        assert!(result.routed_connections().is_empty());
    }
}

#[test]
fn test_radial_root_and_single_node_level() {
    let tree = fault("root", vec![fault("only", vec![])]);
    let result = layout(&tree, LayoutStrategy::Radial);

    let root = result.positions.get("root").unwrap();
    assert_eq!((root.x, root.y, root.level), (-80.0, -60.0, 0));
    let only = result.positions.get("only").unwrap();
    assert_eq!((only.x, only.y, only.level), (-80.0, -210.0, 1));
}

#[test]
fn test_radial_angles_are_evenly_spaced() {
    let children: Vec<FaultTreeNode> = (0..5).map(|i| fault(&format!("n{}", i), vec![])).collect();
    let grandchildren = vec![fault("g0", vec![]), fault("g1", vec![]), fault("g2", vec![])];
    let mut tree = fault("root", children);
    tree.children[0].children = grandchildren;
    let result = layout(&tree, LayoutStrategy::Radial);

    let angle_of = |id: &str| {
        let p = result.positions.get(id).unwrap();
        (p.y + 60.0).atan2(p.x + 80.0)
    };
    let step = 2.0 * PI / 5.0;
    assert_close(angle_of("n0"), -PI / 2.0);
    for i in 1..5 {
        let previous = angle_of(&format!("n{}", i - 1));
        let current = angle_of(&format!("n{}", i));
        let diff = (current - previous).rem_euclid(2.0 * PI);
        assert!((diff - step).abs() < 1e-9, "step {} was {}", i, diff);
    }

    // level 2 sits on the second ring
    let g1 = result.positions.get("g1").unwrap();
    let radius = ((g1.x + 80.0).powi(2) + (g1.y + 60.0).powi(2)).sqrt();
    assert_close(radius, ring_radius(2));
    assert_eq!(g1.level, 2);
    assert_eq!(ring_radius(1), 150.0);
    assert_eq!(ring_radius(3), 390.0);
}

#[test]
fn test_radial_skips_virtual_root() {
    let tree = FaultTreeNode::virtual_root(vec![fault("a", vec![]), fault("b", vec![])]);
    let result = layout(&tree, LayoutStrategy::Radial);
    assert!(!result.positions.contains("virtual_root"));
    assert_eq!(result.positions.get("a").unwrap().level, 1);
    assert_close(result.positions.get("a").unwrap().y, -150.0 - 60.0);
}

#[test]
fn test_compact_grid() {
    let tree = fault(
        "r",
        vec![fault("a", vec![fault("a1", vec![])]), fault("b", vec![]), fault("c", vec![])],
    );
    let result = layout(&tree, LayoutStrategy::Compact);

    // 5 nodes: 3 columns, 2 rows, 200 x 150 cells
    let expect = [
        ("r", -300.0, -150.0, 0),
        ("a", -100.0, -150.0, 0),
        ("a1", 100.0, -150.0, 0),
        ("b", -300.0, 0.0, 1),
        ("c", -100.0, 0.0, 1),
    ];
    for (id, x, y, level) in expect {
        let p = result.positions.get(id).unwrap();
        assert_eq!((p.x, p.y, p.level), (x, y, level), "node {}", id);
    }
    // connections still follow the tree
    assert_eq!(result.connections.len(), 4);
}

#[test]
fn test_duplicate_ids_keep_one_position() {
    let tree = fault("r", vec![fault("a", vec![fault("x", vec![])]), fault("b", vec![fault("x", vec![])])]);
    let result = layout(&tree, LayoutStrategy::Hierarchical);
    assert_eq!(result.positions.len(), 4);
    // the later placement wins
    assert_close(result.positions.get("x").unwrap().x, 50.0);
}

#[test]
fn test_connection_styles_follow_gate_state() {
    let tree = fault(
        "top",
        vec![
            gate("ok", GateType::And, GateState::True, vec![fault("ok_leaf", vec![])]),
            gate("bad", GateType::Or, GateState::False, vec![fault("bad_leaf", vec![])]),
            gate("open", GateType::Not, GateState::Unknown, vec![fault("open_leaf", vec![])]),
        ],
    );
    let connections = routing::generate_connections(&tree);
    let from = |id: &str| connections.iter().find(|c| c.from == id).unwrap();

    let neutral = from("top");
    assert_eq!((neutral.style.color.as_str(), neutral.style.width), ("#C0C4CC", 1.5));
    assert_eq!(neutral.logic_label, "");
    assert_eq!(neutral.logic_type, None);
    assert_eq!(neutral.connection_type, "output");

    let ok = from("ok");
    assert_eq!((ok.style.color.as_str(), ok.style.width), ("#67C23A", 2.0));
    assert_eq!(ok.logic_label, "&");
    assert_eq!(ok.logic_type, Some(GateType::And));

    let bad = from("bad");
    assert_eq!((bad.style.color.as_str(), bad.style.width), ("#F56C6C", 2.0));
    assert_eq!(bad.logic_label, "∨");

    let open = from("open");
    assert_eq!((open.style.color.as_str(), open.style.width), ("#C0C4CC", 1.5));
    assert_eq!(open.logic_label, "¬");

    // pre-order
    let order: Vec<&str> = connections.iter().map(|c| c.to.as_str()).collect();
    assert_eq!(order, vec!["ok", "ok_leaf", "bad", "bad_leaf", "open", "open_leaf"]);
}

#[test]
fn test_gate_colors() {
    assert_eq!(routing::gate_color(Some(GateType::And)), "#409EFF");
    assert_eq!(routing::gate_color(Some(GateType::Or)), "#67C23A");
    assert_eq!(routing::gate_color(Some(GateType::Not)), "#E6A23C");
    assert_eq!(routing::gate_color(None), "#909399");

    let mut untyped = FaultTreeNode::logic_gate("g", "g", GateType::And, None);
    untyped.gate_type = None;
    assert_eq!(routing::logic_label(&untyped), "?");
}

#[test]
fn test_bezier_straight_near_and_far() {
    let straight = BezierPath::between(Point::new(100.0, 80.0), Point::new(105.0, 400.0));
    assert!(straight.is_straight());
    assert_eq!(straight.to_svg(), "M 100 80 L 105 400");

    let near = BezierPath::between(Point::new(100.0, 80.0), Point::new(400.0, 180.0));
    assert_eq!(near.to_svg(), "M 100 80 C 100 200, 400 120, 400 180");

    let floor = BezierPath::between(Point::new(100.0, 80.0), Point::new(400.0, 100.0));
    assert_eq!(floor.to_svg(), "M 100 80 C 100 160, 400 60, 400 100");

    let far = BezierPath::between(Point::new(100.0, 80.0), Point::new(400.0, 480.0));
    assert_eq!(far.to_svg(), "M 100 80 C 100 140, 400 420, 400 480");
    assert_eq!(far.start(), Point::new(100.0, 80.0));
    assert_eq!(far.end(), Point::new(400.0, 480.0));
}

#[test]
fn test_connector_anchors() {
    let from = Position { x: 0.0, y: 0.0, level: 0 };
    let below = Position { x: 0.0, y: 300.0, level: 1 };
    assert_eq!(BezierPath::connect(&from, &below).to_svg(), "M 100 80 L 100 355");
}

#[test]
fn test_midpoint_is_clamped_inside_endpoints() {
    let from = Position { x: 0.0, y: 0.0, level: 0 };
    let far = Position { x: 300.0, y: 300.0, level: 1 };
    assert_eq!(routing::midpoint(&from, &far), Point::new(250.0, 217.5));

    // target anchor above the source anchor: pushed 15px below the source
    let level = Position { x: 300.0, y: 0.0, level: 0 };
    assert_eq!(routing::midpoint(&from, &level), Point::new(250.0, 95.0));
}

#[test]
fn test_view_bounds_padding_and_canvas_fit() {
    let tree = fault("A", vec![]);
    let result = layout(&tree, LayoutStrategy::Hierarchical);

    let bounds = result.view_bounds();
    assert_eq!(
        bounds,
        ViewBounds {
            width: 360.0,
            height: 220.0,
            min_x: -200.0,
            min_y: -50.0
        }
    );
    let fit = result.fit_to_canvas(&CanvasSize::default());
    assert_eq!((fit.translate_x, fit.translate_y, fit.scale), (200.0, 50.0, 1.0));

    let huge = ViewBounds {
        width: 4320.0,
        height: 1360.0,
        min_x: 0.0,
        min_y: 0.0,
    };
    assert_eq!(CanvasTransform::fit(&huge, &CanvasSize::default()).scale, 0.5);
}

#[test]
fn test_hit_testing() {
    let tree = fault("A", vec![]);
    let result = layout(&tree, LayoutStrategy::Hierarchical);
    // box spans x -100..60 and y 0..120
    assert_eq!(result.node_at(-50.0, 10.0), Some("A"));
    assert_eq!(result.node_at(60.0, 120.0), Some("A"));
    assert_eq!(result.node_at(100.0, 10.0), None);
    assert_eq!(result.node_at(-50.0, -1.0), None);
}

#[test]
fn test_routed_connections_are_translated() {
    let tree = fault("parent", vec![fault("child", vec![])]);
    let result = layout(&tree, LayoutStrategy::Hierarchical);
    let bounds = result.view_bounds();

    let routed = result.routed_connections();
    assert_eq!(routed.len(), 1);
    let parent = result.positions.get("parent").unwrap();
    assert_eq!(
        routed[0].path.start(),
        Point::new(parent.x - bounds.min_x + 100.0, parent.y - bounds.min_y + 80.0)
    );
    assert_eq!(routed[0].svg, routed[0].path.to_svg());
    assert_eq!(routed[0].connection.to, "child");
}

#[test]
fn test_strategy_names() {
    assert_eq!("radial".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Radial);
    assert_eq!("Compact".parse::<LayoutStrategy>().unwrap(), LayoutStrategy::Compact);
    assert_eq!(
        "spiral".parse::<LayoutStrategy>().unwrap_err(),
        LayoutError::UnknownStrategy("spiral".to_string())
    );
    assert_eq!(LayoutStrategy::default().to_string(), "hierarchical");
}

#[test]
fn test_layout_result_serializes_positions_by_id() {
    let tree = fault("root", vec![fault("leaf", vec![])]);
    let value = serde_json::to_value(layout(&tree, LayoutStrategy::Hierarchical)).unwrap();
    assert_eq!(value["strategy"], "hierarchical");
    assert_eq!(value["positions"]["leaf"]["level"], 1);
    assert_eq!(value["connections"][0]["type"], "output");
    assert_eq!(value["config"]["levelHeight"], 280.0);
}
