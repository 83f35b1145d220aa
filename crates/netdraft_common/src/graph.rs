//! Network graph model.
//!
//! Node order is significant: it records generator insertion order, which
//! drives both the layered layout and the stable ids the exporters emit.
//! The graph is rebuilt from scratch on every generator run.

use serde::{Deserialize, Serialize};

/// Role of a node in the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Internet,
    Router,
    Firewall,
    CoreSwitch,
    Department,
    Server,
    Printer,
    Workstation,
    WirelessController,
    AccessPoint,
    VpnConcentrator,
    RemoteUsers,
}

/// A device or group in the diagram. `label` is the two-line
/// "Name\nIP" string shown under the icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub image: String,
}

/// A directed link. Backup devices hang off their primary via a dashed edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dashed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Ids are assigned by the generator and must be unique;
    /// a duplicate is a generator bug.
    pub fn add_node(&mut self, id: &str, label: String, kind: NodeKind, image: &str) {
        debug_assert!(
            self.index_of(id).is_none(),
            "duplicate node id: {id}"
        );
        self.nodes.push(Node {
            id: id.to_string(),
            label,
            kind,
            image: image.to_string(),
        });
    }

    /// Insert a solid edge between two already-inserted nodes
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.push_edge(from, to, false);
    }

    /// Insert a dashed (failover) edge between two already-inserted nodes
    pub fn add_dashed_edge(&mut self, from: &str, to: &str) {
        self.push_edge(from, to, true);
    }

    fn push_edge(&mut self, from: &str, to: &str, dashed: bool) {
        debug_assert!(self.index_of(from).is_some(), "edge from unknown node: {from}");
        debug_assert!(self.index_of(to).is_some(), "edge to unknown node: {to}");
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            dashed,
        });
    }

    /// Position of a node in insertion order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut g = NetworkGraph::new();
        g.add_node("a", "A".into(), NodeKind::Internet, "");
        g.add_node("b", "B".into(), NodeKind::Router, "");
        g.add_edge("a", "b");
        assert_eq!(g.index_of("a"), Some(0));
        assert_eq!(g.index_of("b"), Some(1));
        assert!(!g.edges[0].dashed);
    }

    #[test]
    fn test_dashed_edge_roundtrips_through_json() {
        let mut g = NetworkGraph::new();
        g.add_node("a", "A".into(), NodeKind::Router, "");
        g.add_node("b", "B".into(), NodeKind::Router, "");
        g.add_dashed_edge("a", "b");
        let json = serde_json::to_string(&g).unwrap();
        let back: NetworkGraph = serde_json::from_str(&json).unwrap();
        assert!(back.edges[0].dashed);
    }
}
