use super::lenient;
use crate::tree::{FaultTreeNode, GateState, GateType, NodeKind};
use serde::{Deserialize, Serialize};

const UNNAMED_NODE: &str = "未命名节点";
const UNKNOWN_LEVEL: &str = "未知层级";

/// A node of a pre-built fault tree document (`ftree_json`).
///
/// Every field is optional so that partially filled documents still load. Scalar fields
/// accept numbers and booleans, and a `children` value that is not an array reads as no
/// children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FtreeNode {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub node_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub recommendation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub children: Option<Vec<FtreeNode>>,
}

/// How a pre-built node type tag maps onto the tree model.
fn classify(tag: Option<&str>) -> (NodeKind, Option<GateType>) {
    match tag {
        Some("gate_or") => (NodeKind::LogicGate, Some(GateType::Or)),
        Some("gate_and") => (NodeKind::LogicGate, Some(GateType::And)),
        // `component`, `top_event` and anything unrecognized
        _ => (NodeKind::FaultNode, None),
    }
}

/// Converts a pre-built tree into the engine's model.
///
/// A gate directly below another gate is wrapped in a result node, and a gate at the
/// top is wrapped in a final result node, so that gates always hang below fault nodes.
pub fn convert_ftree(root: FtreeNode) -> FaultTreeNode {
    let mut converter = FtreeConverter::default();
    let tree = converter.convert(root);
    if tree.is_logic_gate() {
        wrap_result(
            tree,
            "final_result".to_string(),
            |name| format!("{}的最终诊断结果", name),
            "根据故障树分析得出的最终结论",
        )
    } else {
        tree
    }
}

#[derive(Default)]
struct FtreeConverter {
    next_placeholder: usize,
}

impl FtreeConverter {
    fn convert(&mut self, node: FtreeNode) -> FaultTreeNode {
        let (kind, gate_type) = classify(node.node_type.as_deref());
        let id = node
            .level
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| node.name.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| self.placeholder_id());
        let name = node
            .name
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNNAMED_NODE.to_string());

        let mut converted = FaultTreeNode {
            id,
            description: node.description.clone().or_else(|| node.name.clone()),
            recommendation: node.recommendation,
            level_tag: Some(node.level.unwrap_or_else(|| UNKNOWN_LEVEL.to_string())),
            condition: node.condition,
            ..FaultTreeNode::fault_node(String::new(), name)
        };
        if kind == NodeKind::LogicGate {
            converted.kind = kind;
            converted.gate_type = gate_type;
            converted.state = Some(GateState::Unknown);
        }

        let parent_is_gate = converted.is_logic_gate();
        converted.children = node
            .children
            .unwrap_or_default()
            .into_iter()
            .map(|child| {
                let child = self.convert(child);
                if parent_is_gate && child.is_logic_gate() {
                    let level = format!(
                        "{}_result",
                        child.level_tag.as_deref().unwrap_or(UNKNOWN_LEVEL)
                    );
                    wrap_result(
                        child,
                        level,
                        |name| format!("{}的运算结果", name),
                        "根据逻辑门条件判断结果",
                    )
                } else {
                    child
                }
            })
            .collect();
        converted
    }

    fn placeholder_id(&mut self) -> String {
        self.next_placeholder += 1;
        format!("node_{}", self.next_placeholder)
    }
}

fn wrap_result<F>(gate: FaultTreeNode, level: String, describe: F, recommendation: &str) -> FaultTreeNode
where
    F: Fn(&str) -> String,
{
    FaultTreeNode {
        description: Some(describe(&gate.name)),
        recommendation: Some(recommendation.to_string()),
        level_tag: Some(level),
        ..FaultTreeNode::fault_node(format!("{}结果", gate.id), gate.name.clone())
    }
    .with_children(vec![gate])
}
