//! Read-only view of a tree for display collaborators.

use serde::{Serialize, Serializer};

use super::Key;

/// One node of a [`TreeSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    pub value: Key,
    /// `height(left) - height(right)` at the time of the snapshot
    pub balance_factor: i32,
    /// Present children in (left, right) order
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(SnapshotNode::size).sum::<usize>()
    }
}

/// Snapshot of a whole tree: either `Empty` or a root node.
///
/// Serializes to the node object, or to the string `"Empty"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TreeSnapshot {
    #[default]
    Empty,
    Node(SnapshotNode),
}

impl TreeSnapshot {
    pub fn is_empty(&self) -> bool {
        matches!(self, TreeSnapshot::Empty)
    }

    pub fn root(&self) -> Option<&SnapshotNode> {
        match self {
            TreeSnapshot::Empty => None,
            TreeSnapshot::Node(node) => Some(node),
        }
    }
}

impl Serialize for TreeSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeSnapshot::Empty => serializer.serialize_str("Empty"),
            TreeSnapshot::Node(node) => node.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: Key) -> SnapshotNode {
        SnapshotNode {
            value,
            balance_factor: 0,
            children: vec![],
        }
    }

    #[test]
    fn given_empty_snapshot_when_serialized_then_is_empty_string() {
        let json = serde_json::to_string(&TreeSnapshot::Empty).unwrap();
        assert_eq!(json, "\"Empty\"");
    }

    #[test]
    fn given_node_snapshot_when_serialized_then_uses_camel_case_fields() {
        let snapshot = TreeSnapshot::Node(SnapshotNode {
            value: 20,
            balance_factor: 1,
            children: vec![leaf(10)],
        });
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": 20,
                "balanceFactor": 1,
                "children": [{ "value": 10, "balanceFactor": 0, "children": [] }]
            })
        );
        assert_eq!(snapshot.root().map(SnapshotNode::size), Some(2));
    }
}
