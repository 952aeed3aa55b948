// Diagram generation
//
// Builds a Mermaid flowchart from the leading scanned files and their raw
// import targets. Targets are not resolved, so an edge may point at a node
// that was never declared; Mermaid draws those as bare nodes.

use crate::analysis::Structure;
use crate::config::DiagramConfig;
use crate::error::Result;
use crate::output::templates::TemplateEngine;

/// A declared diagram node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
}

/// A directed edge between sanitized identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
}

/// Node and edge description of the dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub direction: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl Diagram {
    /// Render as a Mermaid `graph` body
    pub fn to_mermaid(&self) -> String {
        let mut lines = Vec::with_capacity(1 + self.nodes.len() + self.edges.len());
        lines.push(format!("graph {}", self.direction));

        for node in &self.nodes {
            lines.push(format!("    {}[\"{}\"]", node.id, escape_label(&node.label)));
        }

        for edge in &self.edges {
            lines.push(format!("    {} --> {}", edge.from, edge.to));
        }

        lines.join("\n")
    }

    /// Outgoing edge count for a sanitized source id
    pub fn out_degree(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.from == id).count()
    }
}

/// Diagram generator for creating Mermaid diagrams
pub struct DiagramGenerator {
    /// Files declared as nodes, taken from the front of the scan
    max_nodes: usize,
    /// Total edges across the diagram
    max_edges: usize,
    /// Edges contributed by any one source file
    max_edges_per_file: usize,
    /// Layout direction (TD, TB, LR, BT, RL)
    direction: String,
}

impl DiagramGenerator {
    pub fn from_config(config: &DiagramConfig) -> Self {
        Self {
            max_nodes: config.max_nodes,
            max_edges: config.max_edges,
            max_edges_per_file: config.max_edges_per_file,
            direction: config.direction.clone(),
        }
    }

    /// Build the node and edge lists.
    ///
    /// Both truncations are positional: the first `max_nodes` files, and edges
    /// in import-index order until `max_edges` is reached.
    pub fn build(&self, structure: &Structure) -> Diagram {
        let nodes = structure
            .files
            .iter()
            .take(self.max_nodes)
            .map(|file| DiagramNode {
                id: sanitize_id(&file.path),
                label: file.path.clone(),
            })
            .collect();

        let mut edges = Vec::new();
        'sources: for (source, imports) in structure.imports.iter() {
            let from = sanitize_id(source);
            for target in imports.iter().take(self.max_edges_per_file) {
                if edges.len() >= self.max_edges {
                    break 'sources;
                }
                edges.push(DiagramEdge {
                    from: from.clone(),
                    to: sanitize_id(target),
                });
            }
        }

        Diagram {
            direction: self.direction.clone(),
            nodes,
            edges,
        }
    }

    /// Render the full architecture document: diagram plus project statistics
    pub fn generate(&self, structure: &Structure, engine: &TemplateEngine) -> Result<String> {
        let diagram = self.build(structure);
        tracing::debug!(
            nodes = diagram.nodes.len(),
            edges = diagram.edges.len(),
            "built architecture diagram"
        );
        engine.render_architecture(&diagram.to_mermaid(), &structure.stats())
    }
}

/// Sanitize a string for use as a Mermaid node ID
pub fn sanitize_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}
