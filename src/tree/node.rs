use super::{GateState, GateType, PositionHint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role of a node in the materialized fault tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    FaultNode,
    LogicGate,
    /// Synthetic parent grouping several top-level trees. Never drawn, never connected.
    VirtualRoot,
}

/// A node of the materialized fault tree.
///
/// Each node owns its children. The same workflow node can appear more than once in
/// one tree when it is reachable along several paths, so ids are not unique here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultTreeNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_type: Option<GateType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GateState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, rename = "level", skip_serializing_if = "Option::is_none")]
    pub level_tag: Option<String>,
    #[serde(default, rename = "position", skip_serializing_if = "Option::is_none")]
    pub position_hint: Option<PositionHint>,
    #[serde(default)]
    pub children: Vec<FaultTreeNode>,
}

impl FaultTreeNode {
    /// A plain fault node with no gate metadata and no children.
    pub fn fault_node(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::FaultNode,
            gate_type: None,
            state: None,
            condition: None,
            description: None,
            recommendation: None,
            level_tag: None,
            position_hint: None,
            children: Vec::new(),
        }
    }

    /// A logic gate in the `unknown` state.
    pub fn logic_gate(
        id: impl Into<String>,
        name: impl Into<String>,
        gate_type: GateType,
        condition: Option<String>,
    ) -> Self {
        Self {
            kind: NodeKind::LogicGate,
            gate_type: Some(gate_type),
            state: Some(GateState::Unknown),
            condition,
            ..Self::fault_node(id, name)
        }
    }

    /// Groups several independent trees under one synthetic root.
    pub fn virtual_root(children: Vec<FaultTreeNode>) -> Self {
        Self {
            kind: NodeKind::VirtualRoot,
            children,
            ..Self::fault_node("virtual_root", "")
        }
    }

    pub fn with_children(mut self, children: Vec<FaultTreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_logic_gate(&self) -> bool {
        self.kind == NodeKind::LogicGate
    }

    pub fn is_virtual_root(&self) -> bool {
        self.kind == NodeKind::VirtualRoot
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Current gate state, `Unknown` for nodes that never carried one.
    pub fn gate_state(&self) -> GateState {
        self.state.unwrap_or_default()
    }

    /// All nodes in pre-order, starting with `self`.
    pub fn walk(&self) -> Vec<&FaultTreeNode> {
        let mut out = Vec::new();
        self.collect_preorder(&mut out);
        out
    }

    fn collect_preorder<'a>(&'a self, out: &mut Vec<&'a FaultTreeNode>) {
        out.push(self);
        for child in &self.children {
            child.collect_preorder(out);
        }
    }

    /// Applies `f` to every node in pre-order.
    pub fn for_each_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut FaultTreeNode),
    {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// First node with the given id in pre-order.
    pub fn find(&self, id: &str) -> Option<&FaultTreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Groups nodes by depth, numbering levels from `start_level`.
    ///
    /// Within a level, nodes keep their pre-order (left-to-right) order.
    pub fn group_nodes_by_level(&self, start_level: usize) -> BTreeMap<usize, Vec<&FaultTreeNode>> {
        let mut levels: BTreeMap<usize, Vec<&FaultTreeNode>> = BTreeMap::new();
        self.assign_level(start_level, &mut levels);
        levels
    }

    fn assign_level<'a>(
        &'a self,
        level: usize,
        levels: &mut BTreeMap<usize, Vec<&'a FaultTreeNode>>,
    ) {
        levels.entry(level).or_default().push(self);
        for child in &self.children {
            child.assign_level(level + 1, levels);
        }
    }

    /// Returns every gate in the tree to `unknown`.
    pub fn reset_states(&mut self) {
        self.for_each_mut(&mut |node| {
            if node.is_logic_gate() {
                node.state = Some(GateState::Unknown);
            }
        });
    }
}
