use thiserror::Error;

/// Errors that can occur while turning an input document into a fault tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("No root node found: every one of the {node_count} workflow nodes is the target of a connection")]
    NoRootFound { node_count: usize },

    #[error("Document has neither `nodes`/`connections` nor an `ftree_json` section")]
    UnsupportedDocument,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::JsonParseError(err.to_string())
    }
}

/// Errors raised by the strict condition evaluator.
///
/// The lenient entry point maps every one of these to `false`; the gate pass maps
/// them to an `unknown` gate state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("Condition is empty")]
    EmptyCondition,

    #[error("Condition '{condition}' still references unresolved placeholder '{placeholder}'")]
    UnresolvedPlaceholder {
        condition: String,
        placeholder: String,
    },

    #[error("Condition '{0}' does not contain a numeric comparison")]
    NoComparison(String),

    #[error("Operand '{0}' is not a valid number")]
    InvalidNumber(String),
}

/// Errors that can occur when loading runtime telemetry.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Could not read telemetry file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse telemetry JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

/// Errors raised when configuring a layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown layout strategy '{0}': expected hierarchical, radial or compact")]
    UnknownStrategy(String),
}
