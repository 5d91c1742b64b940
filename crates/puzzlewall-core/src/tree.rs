//! Generic labeled tree shared by the diagram inputs.
//!
//! A node is a bare string, a `{label, children}` object (other keys such as `nodeid` are
//! ignored), or an anonymous array of nodes.

use crate::FlattenMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeData {
    Label(String),
    List(Vec<NodeData>),
    Node {
        #[serde(default)]
        label: String,
        #[serde(default)]
        children: Vec<NodeData>,
    },
}

impl NodeData {
    pub fn label(&self) -> &str {
        match self {
            NodeData::Label(s) => s,
            NodeData::List(_) => "",
            NodeData::Node { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[NodeData] {
        match self {
            NodeData::Label(_) => &[],
            NodeData::List(items) => items,
            NodeData::Node { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        match self {
            NodeData::Label(_) => true,
            NodeData::List(_) => false,
            NodeData::Node { children, .. } => children.is_empty(),
        }
    }

    /// The root label, if it carries one. Used as the diagram title.
    pub fn title(&self) -> Option<&str> {
        let label = self.label().trim();
        (!label.is_empty()).then_some(label)
    }

    /// Flattens everything below this node into an ordered item list.
    pub fn flatten(&self, mode: FlattenMode) -> Vec<String> {
        let mut out = Vec::new();
        match mode {
            FlattenMode::Tasks => {
                for child in self.children() {
                    match child {
                        NodeData::Label(s) => out.push(s.clone()),
                        NodeData::List(items) | NodeData::Node { children: items, .. } => {
                            out.extend(items.iter().map(|n| n.label().to_string()));
                        }
                    }
                }
            }
            FlattenMode::Leaves => collect_leaves(self.children(), &mut out),
            FlattenMode::Labels => collect_labels(self.children(), &mut out),
        }
        out
    }
}

fn collect_leaves(nodes: &[NodeData], out: &mut Vec<String>) {
    for node in nodes {
        if node.is_leaf() {
            out.push(node.label().to_string());
        } else {
            collect_leaves(node.children(), out);
        }
    }
}

fn collect_labels(nodes: &[NodeData], out: &mut Vec<String>) {
    for node in nodes {
        if !matches!(node, NodeData::List(_)) {
            out.push(node.label().to_string());
        }
        collect_labels(node.children(), out);
    }
}
