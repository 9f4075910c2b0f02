use super::{FaultTreeNode, NodeKind};
use std::fmt;

/// Renders a fault tree as an indented text outline, for the CLI and for debugging.
pub struct DisplayTree<'a> {
    pub root: &'a FaultTreeNode,
}

impl<'a> fmt::Display for DisplayTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_tree(self.root, f, "", true)
    }
}

impl<'a> DisplayTree<'a> {
    fn fmt_as_tree(
        &self,
        node: &FaultTreeNode,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;

        match node.kind {
            NodeKind::VirtualRoot => writeln!(f, "(virtual root)")?,
            NodeKind::FaultNode => writeln!(f, "{} [{}]", node.name, node.id)?,
            NodeKind::LogicGate => {
                let gate = node
                    .gate_type
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "?".to_string());
                write!(f, "{} [{}] {} <{}>", node.name, node.id, gate, node.gate_state())?;
                match &node.condition {
                    Some(condition) if !condition.is_empty() => writeln!(f, " if {}", condition)?,
                    _ => writeln!(f)?,
                }
            }
        }

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let last_index = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            self.fmt_as_tree(child, f, &child_prefix, i == last_index)?;
        }
        Ok(())
    }
}
