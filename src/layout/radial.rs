use super::{LayoutConfig, Position, PositionMap};
use crate::tree::FaultTreeNode;
use std::f64::consts::PI;

pub const FIRST_RING_RADIUS: f64 = 150.0;
pub const RING_STEP: f64 = 120.0;

/// Radius of the ring holding `level` (>= 1).
pub fn ring_radius(level: usize) -> f64 {
    FIRST_RING_RADIUS + level.saturating_sub(1) as f64 * RING_STEP
}

/// Angle of the `index`-th of `count` nodes on a ring, starting straight up.
pub fn ring_angle(index: usize, count: usize) -> f64 {
    -PI / 2.0 + index as f64 * (2.0 * PI / count as f64)
}

/// Root at the origin, every deeper level on its own ring.
///
/// A virtual root is not placed; its children form ring 1.
pub(super) fn place(root: &FaultTreeNode, config: &LayoutConfig, positions: &mut PositionMap) {
    let half_w = config.node_width / 2.0;
    let half_h = config.node_height / 2.0;

    if !root.is_virtual_root() {
        positions.insert(
            &root.id,
            Position {
                x: -half_w,
                y: -half_h,
                level: 0,
            },
        );
    }

    for (level, nodes) in root.group_nodes_by_level(0) {
        if level == 0 {
            continue;
        }
        let radius = ring_radius(level);
        if let [only] = nodes.as_slice() {
            positions.insert(
                &only.id,
                Position {
                    x: -half_w,
                    y: -radius - half_h,
                    level,
                },
            );
            continue;
        }
        let count = nodes.len();
        for (i, node) in nodes.iter().enumerate() {
            let angle = ring_angle(i, count);
            positions.insert(
                &node.id,
                Position {
                    x: radius * angle.cos() - half_w,
                    y: radius * angle.sin() - half_h,
                    level,
                },
            );
        }
    }
}
