//! Layered top-down layout for the topology diagram.
//!
//! Levels follow the solid-edge hierarchy (internet at the top, hosts at the
//! bottom); failover links are lateral and do not affect layering. Within a
//! level, nodes keep generator insertion order and are centered on the
//! canvas. Fully deterministic.

use crate::graph::NetworkGraph;
use std::collections::HashMap;

pub const NODE_WIDTH: f32 = 150.0;
pub const NODE_HEIGHT: f32 = 60.0;
pub const NODE_SPACING: f32 = 200.0;
pub const LEVEL_SEPARATION: f32 = 150.0;
pub const MARGIN: f32 = 60.0;

/// Center of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Computed positions, indexed parallel to `graph.nodes`
#[derive(Debug, Clone)]
pub struct Layout {
    pub positions: Vec<Point>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn position(&self, node_index: usize) -> Point {
        self.positions[node_index]
    }
}

/// Assign every node a level and a position.
///
/// The generator only ever links later nodes to earlier ones, so a single
/// pass in insertion order yields longest-path levels without iteration.
pub fn compute_layout(graph: &NetworkGraph) -> Layout {
    let mut levels: HashMap<&str, usize> = HashMap::new();
    for node in &graph.nodes {
        let level = graph
            .edges
            .iter()
            .filter(|e| !e.dashed && e.to == node.id)
            .filter_map(|e| levels.get(e.from.as_str()).map(|l| l + 1))
            .max()
            .unwrap_or(0);
        levels.insert(node.id.as_str(), level);
    }

    let level_count = levels.values().copied().max().map_or(1, |m| m + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); level_count];
    for (index, node) in graph.nodes.iter().enumerate() {
        layers[levels[node.id.as_str()]].push(index);
    }

    let max_per_level = layers.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let inner_width = NODE_WIDTH + NODE_SPACING * (max_per_level as f32 - 1.0);
    let width = inner_width + MARGIN * 2.0;
    let height = MARGIN * 2.0 + NODE_HEIGHT + LEVEL_SEPARATION * (level_count as f32 - 1.0);

    let mut positions = vec![Point { x: 0.0, y: 0.0 }; graph.nodes.len()];
    for (level, layer) in layers.iter().enumerate() {
        let y = MARGIN + NODE_HEIGHT / 2.0 + level as f32 * LEVEL_SEPARATION;
        let span = NODE_SPACING * (layer.len().saturating_sub(1)) as f32;
        let start_x = MARGIN + (inner_width - span) / 2.0;
        for (slot, &node_index) in layer.iter().enumerate() {
            positions[node_index] = Point {
                x: start_x + slot as f32 * NODE_SPACING,
                y,
            };
        }
    }

    Layout {
        positions,
        width,
        height,
    }
}
