use super::definition::WorkflowDocument;
use super::ftree::{FtreeNode, convert_ftree};
use crate::error::ParseError;
use crate::parser::{ParsedWorkflow, WorkflowParser};
use crate::tree::FaultTreeNode;
use serde::Deserialize;
use serde_json::Value;

/// A trait for input documents that can be turned into a fault tree.
///
/// This is the extension point for feeding the layout engine from formats other than
/// the two built in. Implement it on your own document type and hand the result to
/// [`crate::layout::LayoutEngine`].
///
/// # Example
///
/// ```rust,no_run
/// use shindan::error::ParseError;
/// use shindan::tree::FaultTreeNode;
/// use shindan::workflow::IntoFaultTree;
///
/// struct Checklist { steps: Vec<String> }
///
/// impl IntoFaultTree for Checklist {
///     fn into_fault_tree(self) -> Result<FaultTreeNode, ParseError> {
///         let children = self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, s)| FaultTreeNode::fault_node(format!("step_{}", i), s))
///             .collect();
///         Ok(FaultTreeNode::virtual_root(children))
///     }
/// }
/// ```
pub trait IntoFaultTree {
    /// Consumes the document and materializes its fault tree.
    fn into_fault_tree(self) -> Result<FaultTreeNode, ParseError>;
}

impl IntoFaultTree for WorkflowDocument {
    fn into_fault_tree(self) -> Result<FaultTreeNode, ParseError> {
        WorkflowParser::default()
            .parse(&self)
            .map(|parsed| parsed.fault_tree)
    }
}

impl IntoFaultTree for FtreeNode {
    fn into_fault_tree(self) -> Result<FaultTreeNode, ParseError> {
        Ok(convert_ftree(self))
    }
}

/// The result of ingesting an arbitrary input document.
#[derive(Debug, Clone)]
pub enum Ingested {
    /// A workflow graph, with its gates and adjacency kept for later evaluation.
    Workflow(Box<ParsedWorkflow>),
    /// A pre-built fault tree.
    Prebuilt(FaultTreeNode),
}

impl Ingested {
    pub fn fault_tree(&self) -> &FaultTreeNode {
        match self {
            Ingested::Workflow(parsed) => &parsed.fault_tree,
            Ingested::Prebuilt(tree) => tree,
        }
    }

    pub fn fault_tree_mut(&mut self) -> &mut FaultTreeNode {
        match self {
            Ingested::Workflow(parsed) => &mut parsed.fault_tree,
            Ingested::Prebuilt(tree) => tree,
        }
    }
}

/// Reads a JSON document and dispatches on its shape.
///
/// A document with `nodes` and `connections` is parsed as a workflow. Otherwise an
/// `ftree_json` section is converted as a pre-built tree. A lone `nodes` list is still
/// parsed as a workflow without connections.
pub fn ingest(json: &str, parser: &WorkflowParser) -> Result<Ingested, ParseError> {
    let document: Value = serde_json::from_str(json)?;
    ingest_value(document, parser)
}

pub fn ingest_value(document: Value, parser: &WorkflowParser) -> Result<Ingested, ParseError> {
    let has = |key: &str| document.get(key).is_some_and(|v| !v.is_null());
    let has_nodes = has("nodes");
    let has_connections = has("connections");

    if has_nodes && has_connections {
        let workflow: WorkflowDocument = serde_json::from_value(document)?;
        return Ok(Ingested::Workflow(Box::new(parser.parse(&workflow)?)));
    }
    if let Some(raw) = document.get("ftree_json").filter(|v| !v.is_null()) {
        // Some producers store the tree as an embedded JSON string.
        let tree: FtreeNode = match raw {
            Value::String(text) => serde_json::from_str(text)?,
            other => FtreeNode::deserialize(other)?,
        };
        return Ok(Ingested::Prebuilt(convert_ftree(tree)));
    }
    if has_nodes {
        let workflow: WorkflowDocument = serde_json::from_value(document)?;
        return Ok(Ingested::Workflow(Box::new(parser.parse(&workflow)?)));
    }
    Err(ParseError::UnsupportedDocument)
}
