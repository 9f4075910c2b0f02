use super::{LayoutConfig, Position, PositionMap};
use crate::text::TextFitter;
use crate::tree::FaultTreeNode;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Smallest horizontal gap between neighbouring boxes.
pub const MIN_SIBLING_GAP: f64 = 50.0;

/// Gap between two neighbours, a quarter of their combined width.
pub fn sibling_gap(left_width: f64, right_width: f64) -> f64 {
    MIN_SIBLING_GAP.max((left_width + right_width) / 4.0)
}

/// Rows by depth, each centered on `x = 0`.
///
/// The children of a virtual root are independent trees sharing level 0.
pub(super) fn place(root: &FaultTreeNode, config: &LayoutConfig, positions: &mut PositionMap) {
    let levels = if root.is_virtual_root() {
        let mut merged: BTreeMap<usize, Vec<&FaultTreeNode>> = BTreeMap::new();
        for tree in &root.children {
            for (level, nodes) in tree.group_nodes_by_level(0) {
                merged.entry(level).or_default().extend(nodes);
            }
        }
        merged
    } else {
        root.group_nodes_by_level(0)
    };

    for (level, nodes) in &levels {
        place_row(nodes, *level, config, positions);
    }
}

fn place_row(
    nodes: &[&FaultTreeNode],
    level: usize,
    config: &LayoutConfig,
    positions: &mut PositionMap,
) {
    if nodes.is_empty() {
        return;
    }
    let widths: Vec<f64> = nodes.iter().map(|n| TextFitter::node_width(&n.name)).collect();
    let gaps: Vec<f64> = widths
        .iter()
        .tuple_windows()
        .map(|(a, b)| sibling_gap(*a, *b))
        .collect();
    let total = row_width(&widths);

    let y = level as f64 * config.level_height;
    let mut x = -total / 2.0;
    for (i, node) in nodes.iter().enumerate() {
        positions.insert(&node.id, Position { x, y, level });
        x += widths[i] + gaps.get(i).copied().unwrap_or_default();
    }
}

/// Box widths plus the gaps between them.
pub fn row_width(widths: &[f64]) -> f64 {
    let gaps: f64 = widths
        .iter()
        .tuple_windows()
        .map(|(a, b)| sibling_gap(*a, *b))
        .sum();
    widths.iter().sum::<f64>() + gaps
}
