//! # Shindan - Fault-Tree Construction, Layout and Reasoning Engine
//!
//! **Shindan** turns workflow automation graphs into rooted fault trees, lays them out
//! for drawing, and evaluates their logic gates against runtime telemetry such as
//! dissolved-gas readings.
//!
//! ## Core Workflow
//!
//! 1.  **Ingest**: Parse a workflow document (`nodes` + `connections`) with the
//!     [`parser::WorkflowParser`], or convert a pre-built `ftree_json` tree. Custom
//!     formats plug in through the [`workflow::IntoFaultTree`] trait.
//! 2.  **Lay out**: Hand the tree to the [`layout::LayoutEngine`] with a strategy and the
//!     viewport. The result carries node positions and parent-to-child connections.
//! 3.  **Evaluate**: Run the gates against [`data::Telemetry`]. Gate states move from
//!     `unknown` to `true` or `false`, and connection styles follow on the next layout.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shindan::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("workflow.json")?;
//!     let mut workflow = WorkflowParser::default().parse_json(&json)?;
//!
//!     let report = workflow.evaluate_logic_gates(&Telemetry::dga_sample());
//!     println!("{}", TraceFormatter::format_steps(&report.steps));
//!
//!     let layout = LayoutEngine::new().calculate_layout(
//!         &workflow.fault_tree,
//!         LayoutStrategy::Hierarchical,
//!         &ViewportConfig::new(1440.0),
//!     );
//!     for routed in layout.routed_connections() {
//!         println!("{} -> {}: {}", routed.connection.from, routed.connection.to, routed.svg);
//!     }
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod evaluator;
pub mod layout;
pub mod parser;
pub mod prelude;
pub mod text;
pub mod trace;
pub mod tree;
pub mod workflow;
