use crate::workflow::{WorkflowDocument, WorkflowNode};
use ahash::{AHashMap, AHashSet};
use serde::{Serialize, Serializer};

/// Ordered `source -> targets` adjacency built from a workflow's fan-out connections.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    entries: Vec<(String, Vec<String>)>,
    index: AHashMap<String, usize>,
}

impl Adjacency {
    pub fn from_document(document: &WorkflowDocument) -> Self {
        document.adjacency().into_iter().collect()
    }

    /// Targets of `source`, in slot order. Empty when the node has no outgoing edges.
    pub fn targets(&self, source: &str) -> &[String] {
        self.index
            .get(source)
            .map(|&i| self.entries[i].1.as_slice())
            .unwrap_or_default()
    }

    /// Every source listing `target` among its targets, in document order.
    pub fn sources_of(&self, target: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, targets)| targets.iter().any(|t| t == target))
            .map(|(source, _)| source.as_str())
            .collect()
    }

    /// Ids that appear as the target of at least one connection.
    pub fn targeted(&self) -> AHashSet<&str> {
        self.entries
            .iter()
            .flat_map(|(_, targets)| targets.iter().map(String::as_str))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(source, targets)| (source.as_str(), targets.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for Adjacency {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut adjacency = Adjacency::default();
        for (source, targets) in iter {
            match adjacency.index.get(&source) {
                Some(&i) => adjacency.entries[i].1 = targets,
                None => {
                    adjacency.index.insert(source.clone(), adjacency.entries.len());
                    adjacency.entries.push((source, targets));
                }
            }
        }
        adjacency
    }
}

impl Serialize for Adjacency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Workflow nodes indexed by id. A repeated id keeps its first position in the order
/// but the last definition wins.
#[derive(Debug)]
pub(crate) struct NodeIndex<'a> {
    order: Vec<&'a str>,
    by_id: AHashMap<&'a str, &'a WorkflowNode>,
}

impl<'a> NodeIndex<'a> {
    pub(crate) fn new(nodes: &'a [WorkflowNode]) -> Self {
        let mut order = Vec::with_capacity(nodes.len());
        let mut by_id = AHashMap::with_capacity(nodes.len());
        for node in nodes {
            if by_id.insert(node.id.as_str(), node).is_none() {
                order.push(node.id.as_str());
            }
        }
        Self { order, by_id }
    }

    pub(crate) fn get(&self, id: &str) -> Option<&'a WorkflowNode> {
        self.by_id.get(id).copied()
    }

    /// Nodes in document order, one per id.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a WorkflowNode> + '_ {
        self.order.iter().filter_map(|id| self.by_id.get(id).copied())
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}
