use super::{LayoutConfig, PositionMap};
use serde::{Deserialize, Serialize};

pub const BOUNDS_PADDING_X: f64 = 100.0;
pub const BOUNDS_PADDING_Y: f64 = 50.0;
pub const CANVAS_MARGIN: f64 = 20.0;

/// Padded bounding box of a layout. `min_x`/`min_y` are the translation that moves
/// the diagram into positive coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBounds {
    pub width: f64,
    pub height: f64,
    pub min_x: f64,
    pub min_y: f64,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            min_x: 0.0,
            min_y: 0.0,
        }
    }
}

impl ViewBounds {
    /// Extents of every box, padded; the default box when nothing was placed.
    pub fn of(positions: &PositionMap, config: &LayoutConfig) -> Self {
        if positions.is_empty() {
            return Self::default();
        }
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for (_, p) in positions.iter() {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x + config.node_width);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y + config.node_height);
        }
        Self {
            width: max_x - min_x + BOUNDS_PADDING_X * 2.0,
            height: max_y - min_y + BOUNDS_PADDING_Y * 2.0,
            min_x: min_x - BOUNDS_PADDING_X,
            min_y: min_y - BOUNDS_PADDING_Y,
        }
    }
}

/// Size of the surface a diagram is drawn onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 2200.0,
            height: 1400.0,
        }
    }
}

/// How a diagram maps onto a canvas: translate by `(-min_x, -min_y)`, then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Never above 1; diagrams are shrunk to fit but not enlarged.
    pub scale: f64,
}

impl CanvasTransform {
    pub fn fit(bounds: &ViewBounds, canvas: &CanvasSize) -> Self {
        let available_width = canvas.width - CANVAS_MARGIN * 2.0;
        let available_height = canvas.height - CANVAS_MARGIN * 2.0;
        let scale = (available_width / bounds.width)
            .min(available_height / bounds.height)
            .min(1.0);
        Self {
            translate_x: -bounds.min_x,
            translate_y: -bounds.min_y,
            scale,
        }
    }
}
