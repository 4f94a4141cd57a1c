//! Turning snapshots into something a person can look at.

use termtree::Tree;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{AvlTree, SnapshotNode, TreeSnapshot};

/// Label shown for an empty tree.
pub const EMPTY_LABEL: &str = "Empty";

/// Conversion into a `termtree` diagram with default labels.
pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for TreeSnapshot {
    fn to_tree_string(&self) -> Tree<String> {
        Renderer::default().render_tree(self)
    }
}

impl TreeConvert for AvlTree {
    fn to_tree_string(&self) -> Tree<String> {
        self.snapshot().to_tree_string()
    }
}

/// Rendering options for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    /// Append `(BF: n)` to node labels
    pub show_balance_factor: bool,
    /// Indent JSON output
    pub pretty_json: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            show_balance_factor: true,
            pretty_json: true,
        }
    }
}

impl Renderer {
    pub fn label(&self, node: &SnapshotNode) -> String {
        if self.show_balance_factor {
            format!("{} (BF: {})", node.value, node.balance_factor)
        } else {
            node.value.to_string()
        }
    }

    pub fn render_tree(&self, snapshot: &TreeSnapshot) -> Tree<String> {
        match snapshot {
            TreeSnapshot::Empty => Tree::new(EMPTY_LABEL.to_string()),
            TreeSnapshot::Node(root) => self.render_node(root),
        }
    }

    fn render_node(&self, node: &SnapshotNode) -> Tree<String> {
        let leaves: Vec<_> = node
            .children
            .iter()
            .map(|child| self.render_node(child))
            .collect();
        Tree::new(self.label(node)).with_leaves(leaves)
    }

    pub fn render_json(&self, snapshot: &TreeSnapshot) -> ApplicationResult<String> {
        let rendered = if self.pretty_json {
            serde_json::to_string_pretty(snapshot)
        } else {
            serde_json::to_string(snapshot)
        };
        rendered.map_err(|e| ApplicationError::Render {
            message: format!("serialize snapshot: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced() -> AvlTree {
        let mut tree = AvlTree::new();
        tree.insert(10).insert(20).insert(30);
        tree
    }

    #[test]
    fn given_empty_tree_when_rendering_then_shows_empty_label() {
        let rendered = AvlTree::new().to_tree_string().to_string();
        assert_eq!(rendered.trim(), EMPTY_LABEL);
    }

    #[test]
    fn given_balanced_tree_when_rendering_then_lists_children_left_first() {
        let rendered = balanced().to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "20 (BF: 0)");
        assert!(lines[1].ends_with("10 (BF: 0)"), "got {:?}", lines[1]);
        assert!(lines[2].ends_with("30 (BF: 0)"), "got {:?}", lines[2]);
    }

    #[test]
    fn given_balance_factor_hidden_when_rendering_then_labels_are_bare_values() {
        let renderer = Renderer {
            show_balance_factor: false,
            ..Renderer::default()
        };
        let rendered = renderer.render_tree(&balanced().snapshot()).to_string();
        assert_eq!(rendered.lines().next(), Some("20"));
        assert!(!rendered.contains("BF"));
    }

    #[test]
    fn given_compact_renderer_when_rendering_json_then_single_line() {
        let renderer = Renderer {
            pretty_json: false,
            ..Renderer::default()
        };
        let json = renderer.render_json(&balanced().snapshot()).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"value":20,"balanceFactor":0,"children":[{"value":10"#));
    }
}
