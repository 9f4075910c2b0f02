use serde::{Deserialize, Serialize};

/// Screen widths below which the narrow and medium spacing presets apply.
pub const NARROW_BREAKPOINT: f64 = 768.0;
pub const MEDIUM_BREAKPOINT: f64 = 1200.0;

/// Geometry used by every layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub level_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 120.0,
            horizontal_spacing: 550.0,
            vertical_spacing: 320.0,
            level_height: 350.0,
        }
    }
}

/// Caller-supplied description of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f64,
}

impl ViewportConfig {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn class(&self) -> ViewportClass {
        if self.width < NARROW_BREAKPOINT {
            ViewportClass::Narrow
        } else if self.width < MEDIUM_BREAKPOINT {
            ViewportClass::Medium
        } else {
            ViewportClass::Wide
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 1920.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Narrow,
    Medium,
    Wide,
}

impl ViewportClass {
    /// `(horizontal_spacing, level_height, vertical_spacing)` for the class.
    pub fn spacing(&self) -> (f64, f64, f64) {
        match self {
            ViewportClass::Narrow => (180.0, 220.0, 200.0),
            ViewportClass::Medium => (200.0, 250.0, 220.0),
            ViewportClass::Wide => (220.0, 280.0, 250.0),
        }
    }
}

/// Partial update of a [`LayoutConfig`]. Unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOverrides {
    pub node_width: Option<f64>,
    pub node_height: Option<f64>,
    pub horizontal_spacing: Option<f64>,
    pub vertical_spacing: Option<f64>,
    pub level_height: Option<f64>,
}

impl LayoutOverrides {
    pub fn with_node_width(mut self, value: f64) -> Self {
        self.node_width = Some(value);
        self
    }
    pub fn with_node_height(mut self, value: f64) -> Self {
        self.node_height = Some(value);
        self
    }
    pub fn with_horizontal_spacing(mut self, value: f64) -> Self {
        self.horizontal_spacing = Some(value);
        self
    }
    pub fn with_vertical_spacing(mut self, value: f64) -> Self {
        self.vertical_spacing = Some(value);
        self
    }
    pub fn with_level_height(mut self, value: f64) -> Self {
        self.level_height = Some(value);
        self
    }

    /// Folds `other` into `self`; fields set in `other` win.
    pub fn merge(&mut self, other: LayoutOverrides) {
        self.node_width = other.node_width.or(self.node_width);
        self.node_height = other.node_height.or(self.node_height);
        self.horizontal_spacing = other.horizontal_spacing.or(self.horizontal_spacing);
        self.vertical_spacing = other.vertical_spacing.or(self.vertical_spacing);
        self.level_height = other.level_height.or(self.level_height);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl LayoutConfig {
    /// Copy of the config with spacing adapted to the viewport width.
    pub fn for_viewport(&self, viewport: &ViewportConfig) -> Self {
        let (horizontal_spacing, level_height, vertical_spacing) = viewport.class().spacing();
        Self {
            horizontal_spacing,
            level_height,
            vertical_spacing,
            ..*self
        }
    }

    pub fn apply(&mut self, overrides: &LayoutOverrides) {
        if let Some(v) = overrides.node_width {
            self.node_width = v;
        }
        if let Some(v) = overrides.node_height {
            self.node_height = v;
        }
        if let Some(v) = overrides.horizontal_spacing {
            self.horizontal_spacing = v;
        }
        if let Some(v) = overrides.vertical_spacing {
            self.vertical_spacing = v;
        }
        if let Some(v) = overrides.level_height {
            self.level_height = v;
        }
    }

    pub fn with_overrides(mut self, overrides: &LayoutOverrides) -> Self {
        self.apply(overrides);
        self
    }
}
