use super::{LayoutConfig, Position, PositionMap};
use crate::tree::FaultTreeNode;

pub const CELL_PADDING_X: f64 = 40.0;
pub const CELL_PADDING_Y: f64 = 30.0;

/// Grid of `ceil(sqrt(n))` columns in pre-order, ignoring tree shape. The level of a
/// node is its grid row.
pub(super) fn place(root: &FaultTreeNode, config: &LayoutConfig, positions: &mut PositionMap) {
    let nodes: Vec<&FaultTreeNode> = root
        .walk()
        .into_iter()
        .filter(|n| !n.is_virtual_root())
        .collect();
    if nodes.is_empty() {
        return;
    }

    let count = nodes.len();
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let cell_w = config.node_width + CELL_PADDING_X;
    let cell_h = config.node_height + CELL_PADDING_Y;

    for (i, node) in nodes.iter().enumerate() {
        let (row, col) = (i / cols, i % cols);
        positions.insert(
            &node.id,
            Position {
                x: col as f64 * cell_w - cols as f64 * cell_w / 2.0,
                y: row as f64 * cell_h - rows as f64 * cell_h / 2.0,
                level: row,
            },
        );
    }
}
