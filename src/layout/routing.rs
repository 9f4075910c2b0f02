//! Connector geometry and styling between laid-out nodes.

use super::Position;
use crate::tree::{FaultTreeNode, GateState, GateType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal offset of both anchors from a box's left edge.
pub const ANCHOR_X_OFFSET: f64 = 100.0;
/// Vertical offset of the outgoing anchor below a box's top edge.
pub const SOURCE_ANCHOR_Y_OFFSET: f64 = 80.0;
/// Vertical offset of the incoming anchor below a box's top edge.
pub const TARGET_ANCHOR_Y_OFFSET: f64 = 55.0;
/// Below this horizontal distance a connector is drawn straight.
pub const STRAIGHT_THRESHOLD: f64 = 10.0;
/// Vertical distance separating "near" from "far" connectors.
pub const NEAR_THRESHOLD: f64 = 200.0;
/// Distance a label anchor keeps from both endpoints.
pub const MIDPOINT_INSET: f64 = 15.0;

pub const DEFAULT_COLOR: &str = "#C0C4CC";
pub const TRUE_COLOR: &str = "#67C23A";
pub const FALSE_COLOR: &str = "#F56C6C";
pub const DEFAULT_WIDTH: f64 = 1.5;
pub const ACTIVE_WIDTH: f64 = 2.0;
/// Legend color for nodes without a known gate type.
pub const FALLBACK_GATE_COLOR: &str = "#909399";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStyle {
    pub color: String,
    pub width: f64,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

/// One parent to child edge of the fault tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub connection_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logic_type: Option<GateType>,
    pub logic_label: String,
    pub style: ConnectionStyle,
}

/// Emits a connection for every parent to child edge whose parent is not a virtual
/// root, in pre-order.
pub fn generate_connections(root: &FaultTreeNode) -> Vec<Connection> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

fn collect(parent: &FaultTreeNode, out: &mut Vec<Connection>) {
    for child in &parent.children {
        if !parent.is_virtual_root() {
            out.push(Connection {
                from: parent.id.clone(),
                to: child.id.clone(),
                connection_type: "output".to_string(),
                logic_type: parent.gate_type,
                logic_label: logic_label(parent).to_string(),
                style: connection_style(parent),
            });
        }
        collect(child, out);
    }
}

/// Stroke for edges leaving `parent`: green or red and thicker once a gate has resolved.
pub fn connection_style(parent: &FaultTreeNode) -> ConnectionStyle {
    if !parent.is_logic_gate() {
        return ConnectionStyle::default();
    }
    match parent.gate_state() {
        GateState::True => ConnectionStyle {
            color: TRUE_COLOR.to_string(),
            width: ACTIVE_WIDTH,
        },
        GateState::False => ConnectionStyle {
            color: FALSE_COLOR.to_string(),
            width: ACTIVE_WIDTH,
        },
        GateState::Unknown => ConnectionStyle::default(),
    }
}

/// Symbol drawn on edges leaving a gate. `?` for a gate without a type, empty for
/// plain nodes.
pub fn logic_label(node: &FaultTreeNode) -> &'static str {
    if !node.is_logic_gate() {
        return "";
    }
    node.gate_type.map(|g| g.symbol()).unwrap_or("?")
}

pub fn gate_color(gate_type: Option<GateType>) -> &'static str {
    gate_type.map(|g| g.color()).unwrap_or(FALLBACK_GATE_COLOR)
}

/// Anchor points of a connector between two boxes given by their top-left corners.
pub fn anchors(from: &Position, to: &Position) -> (Point, Point) {
    (
        Point::new(from.x + ANCHOR_X_OFFSET, from.y + SOURCE_ANCHOR_Y_OFFSET),
        Point::new(to.x + ANCHOR_X_OFFSET, to.y + TARGET_ANCHOR_Y_OFFSET),
    )
}

/// Geometry of one connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BezierPath {
    Line {
        start: Point,
        end: Point,
    },
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl BezierPath {
    /// S-curve between two anchors.
    ///
    /// Nearly vertical connectors are straight. Close levels bow out by
    /// `max(1.2·dy, 80)`, distant ones by `min(dy/3, 60)`.
    pub fn between(start: Point, end: Point) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        if dx < STRAIGHT_THRESHOLD {
            return BezierPath::Line { start, end };
        }
        let (leave, arrive) = if dy < NEAR_THRESHOLD {
            let offset = (dy * 1.2).max(80.0);
            (offset, offset * 0.5)
        } else {
            let offset = (dy / 3.0).min(60.0);
            (offset, offset)
        };
        BezierPath::Cubic {
            start,
            control1: Point::new(start.x, start.y + leave),
            control2: Point::new(end.x, end.y - arrive),
            end,
        }
    }

    /// Connector between two laid-out boxes.
    pub fn connect(from: &Position, to: &Position) -> Self {
        let (start, end) = anchors(from, to);
        Self::between(start, end)
    }

    pub fn start(&self) -> Point {
        match self {
            BezierPath::Line { start, .. } | BezierPath::Cubic { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            BezierPath::Line { end, .. } | BezierPath::Cubic { end, .. } => *end,
        }
    }

    pub fn is_straight(&self) -> bool {
        matches!(self, BezierPath::Line { .. })
    }

    /// SVG path data, e.g. `M 100 80 C 100 160, 300 315, 300 355`.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BezierPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BezierPath::Line { start, end } => {
                write!(f, "M {} {} L {} {}", start.x, start.y, end.x, end.y)
            }
            BezierPath::Cubic {
                start,
                control1,
                control2,
                end,
            } => write!(
                f,
                "M {} {} C {} {}, {} {}, {} {}",
                start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
        }
    }
}

/// Label anchor of a connector: halfway across, with the vertical position kept at
/// least 15px inside both endpoints.
pub fn midpoint(from: &Position, to: &Position) -> Point {
    let (start, end) = anchors(from, to);
    let y = ((start.y + end.y) / 2.0)
        .min(end.y - MIDPOINT_INSET)
        .max(start.y + MIDPOINT_INSET);
    Point::new((start.x + end.x) / 2.0, y)
}
