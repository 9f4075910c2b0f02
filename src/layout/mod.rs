//! Node placement and connector geometry for fault-tree diagrams.
//!
//! [`LayoutEngine::calculate_layout`] is a pure function of the tree, the strategy and
//! the viewport. Every call returns a fresh [`LayoutResult`].

use crate::error::LayoutError;
use crate::tree::FaultTreeNode;
use ahash::AHashMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod bounds;
mod compact;
pub mod config;
pub mod hierarchical;
pub mod radial;
pub mod routing;

pub use bounds::{CanvasSize, CanvasTransform, ViewBounds};
pub use config::{LayoutConfig, LayoutOverrides, ViewportClass, ViewportConfig};
pub use routing::{BezierPath, Connection, ConnectionStyle, Point};

/// Top-left corner of a node box and the level it was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub level: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    #[default]
    Hierarchical,
    Radial,
    Compact,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 3] = [
        LayoutStrategy::Hierarchical,
        LayoutStrategy::Radial,
        LayoutStrategy::Compact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::Hierarchical => "hierarchical",
            LayoutStrategy::Radial => "radial",
            LayoutStrategy::Compact => "compact",
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutStrategy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hierarchical" => Ok(LayoutStrategy::Hierarchical),
            "radial" => Ok(LayoutStrategy::Radial),
            "compact" => Ok(LayoutStrategy::Compact),
            _ => Err(LayoutError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Node positions keyed by id, in placement order.
///
/// A tree can contain the same id several times; a later placement overwrites the
/// earlier one but keeps its slot in the order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    entries: Vec<(String, Position)>,
    index: AHashMap<String, usize>,
}

impl PositionMap {
    pub fn insert(&mut self, id: &str, position: Position) {
        match self.index.get(id) {
            Some(&i) => self.entries[i].1 = position,
            None => {
                self.index.insert(id.to_string(), self.entries.len());
                self.entries.push((id.to_string(), position));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Position> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Position)> {
        self.entries.iter().map(|(id, p)| (id.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PositionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A connection with drawable geometry in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedConnection<'a> {
    pub connection: &'a Connection,
    pub path: BezierPath,
    pub svg: String,
    pub midpoint: Point,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub strategy: LayoutStrategy,
    pub positions: PositionMap,
    pub connections: Vec<Connection>,
    pub config: LayoutConfig,
}

impl LayoutResult {
    pub fn empty(strategy: LayoutStrategy, config: LayoutConfig) -> Self {
        Self {
            strategy,
            positions: PositionMap::default(),
            connections: Vec::new(),
            config,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn view_bounds(&self) -> ViewBounds {
        ViewBounds::of(&self.positions, &self.config)
    }

    pub fn fit_to_canvas(&self, canvas: &CanvasSize) -> CanvasTransform {
        CanvasTransform::fit(&self.view_bounds(), canvas)
    }

    /// Id of the first placed box containing the point, edges included.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
        self.positions
            .iter()
            .find(|(_, p)| {
                x >= p.x
                    && x <= p.x + self.config.node_width
                    && y >= p.y
                    && y <= p.y + self.config.node_height
            })
            .map(|(id, _)| id)
    }

    /// Connector geometry for every connection whose endpoints were both placed,
    /// translated so the view bounds start at the origin.
    pub fn routed_connections(&self) -> Vec<RoutedConnection<'_>> {
        let bounds = self.view_bounds();
        let shift = |p: &Position| Position {
            x: p.x - bounds.min_x,
            y: p.y - bounds.min_y,
            level: p.level,
        };
        self.connections
            .iter()
            .filter_map(|connection| {
                let from = shift(self.positions.get(&connection.from)?);
                let to = shift(self.positions.get(&connection.to)?);
                let path = BezierPath::connect(&from, &to);
                Some(RoutedConnection {
                    connection,
                    svg: path.to_svg(),
                    path,
                    midpoint: routing::midpoint(&from, &to),
                })
            })
            .collect()
    }
}

/// Computes diagram layouts.
///
/// The engine keeps only its configuration. Spacing is adapted to the viewport on
/// every call, after which explicit overrides are applied.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    base: LayoutConfig,
    overrides: LayoutOverrides,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(base: LayoutConfig) -> Self {
        Self {
            base,
            overrides: LayoutOverrides::default(),
        }
    }

    /// Merges a partial config into the engine's overrides.
    pub fn update_config(&mut self, overrides: LayoutOverrides) {
        self.overrides.merge(overrides);
    }

    /// Configuration a layout for `viewport` would use.
    pub fn effective_config(&self, viewport: &ViewportConfig) -> LayoutConfig {
        self.base
            .for_viewport(viewport)
            .with_overrides(&self.overrides)
    }

    pub fn calculate_layout(
        &self,
        root: &FaultTreeNode,
        strategy: LayoutStrategy,
        viewport: &ViewportConfig,
    ) -> LayoutResult {
        let config = self.effective_config(viewport);
        let mut positions = PositionMap::default();
        match strategy {
            LayoutStrategy::Hierarchical => hierarchical::place(root, &config, &mut positions),
            LayoutStrategy::Radial => radial::place(root, &config, &mut positions),
            LayoutStrategy::Compact => compact::place(root, &config, &mut positions),
        }
        if positions.is_empty() {
            return LayoutResult::empty(strategy, config);
        }
        let connections = routing::generate_connections(root);

        tracing::debug!(
            %strategy,
            viewport = viewport.width,
            positions = positions.len(),
            connections = connections.len(),
            "computed layout"
        );

        LayoutResult {
            strategy,
            positions,
            connections,
            config,
        }
    }
}
