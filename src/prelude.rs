//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the shindan crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use shindan::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/workflow.json")?;
//! let ingested = ingest(&json, &WorkflowParser::default())?;
//!
//! let layout = LayoutEngine::new().calculate_layout(
//!     ingested.fault_tree(),
//!     LayoutStrategy::Radial,
//!     &ViewportConfig::default(),
//! );
//! println!("{} nodes placed", layout.positions.len());
//! # Ok(())
//! # }
//! ```

// Ingestion
pub use crate::parser::{ParsedWorkflow, WorkflowParser};
pub use crate::workflow::{FtreeNode, Ingested, IntoFaultTree, WorkflowDocument, ingest};

// Tree model
pub use crate::tree::{DisplayTree, FaultTreeNode, GateState, GateType, LogicGate, NodeKind};

// Layout
pub use crate::layout::{
    BezierPath, CanvasSize, Connection, LayoutConfig, LayoutEngine, LayoutOverrides,
    LayoutResult, LayoutStrategy, Position, ViewportConfig,
};
pub use crate::text::TextFitter;

// Evaluation
pub use crate::data::Telemetry;
pub use crate::evaluator::{ConditionEvaluator, EvaluationReport, Evaluator};

// Error types
pub use crate::error::{ConditionError, LayoutError, ParseError, TelemetryError};

// Trace formatting
pub use crate::trace::{ReasoningStep, TraceFormatter};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
