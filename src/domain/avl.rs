//! AVL tree engine.
//!
//! Each recursive step takes ownership of a subtree, rewires it, and hands
//! back the (possibly new) subtree root for the caller to store in its own
//! slot. No parent pointers are kept.

use std::cmp::{max, Ordering};

use tracing::{debug, instrument, trace};

use super::error::{DomainError, DomainResult};
use super::key::{parse_key, Key};
use super::snapshot::{SnapshotNode, TreeSnapshot};

type Link = Option<Box<Node>>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    value: Key,
    left: Link,
    right: Link,
    height: i32,
}

impl Node {
    fn leaf(value: Key) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_of(link: &Link) -> i32 {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

//     y            x
//    / \          / \
//   x   C   ~>   A   y
//  / \              / \
// A   B            B   C
fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let mut x = y
        .left
        .take()
        .unwrap_or_else(|| panic!("rotate_right on {} without a left child", y.value));
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    trace!(new_root = x.value, "rotate right");
    x
}

//   x                y
//  / \              / \
// A   y     ~>     x   C
//    / \          / \
//   B   C        A   B
fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let mut y = x
        .right
        .take()
        .unwrap_or_else(|| panic!("rotate_left on {} without a right child", x.value));
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    trace!(new_root = y.value, "rotate left");
    y
}

fn find_min(mut node: &Node) -> &Node {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node
}

fn insert_node(link: Link, value: Key, inserted: &mut bool) -> Box<Node> {
    let mut node = match link {
        None => {
            *inserted = true;
            return Node::leaf(value);
        }
        Some(node) => node,
    };

    match value.cmp(&node.value) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), value, inserted)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), value, inserted)),
        Ordering::Equal => return node,
    }

    node.update_height();
    rebalance_after_insert(node, value)
}

/// Pick the rotation case by where `value` landed relative to the heavy child.
fn rebalance_after_insert(mut node: Box<Node>, value: Key) -> Box<Node> {
    let balance = node.balance_factor();
    if balance > 1 {
        let pivot = node.left.as_ref().map_or(value, |l| l.value);
        if value < pivot {
            debug!(at = node.value, "left-left case");
            return rotate_right(node);
        }
        if value > pivot {
            debug!(at = node.value, "left-right case");
            node.left = node.left.take().map(rotate_left);
            return rotate_right(node);
        }
    } else if balance < -1 {
        let pivot = node.right.as_ref().map_or(value, |r| r.value);
        if value > pivot {
            debug!(at = node.value, "right-right case");
            return rotate_left(node);
        }
        if value < pivot {
            debug!(at = node.value, "right-left case");
            node.right = node.right.take().map(rotate_right);
            return rotate_left(node);
        }
    }
    node
}

fn delete_node(link: Link, value: Key, removed: &mut bool) -> Link {
    let mut node = link?;

    match value.cmp(&node.value) {
        Ordering::Less => node.left = delete_node(node.left.take(), value, removed),
        Ordering::Greater => node.right = delete_node(node.right.take(), value, removed),
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    let successor = find_min(&right).value;
                    trace!(deleted = value, successor, "promote in-order successor");
                    node.value = successor;
                    node.left = Some(left);
                    node.right = delete_node(Some(right), successor, removed);
                }
            }
        }
    }

    node.update_height();
    Some(rebalance_after_delete(node))
}

/// Pick the rotation case by the heavy child's own balance factor.
fn rebalance_after_delete(mut node: Box<Node>) -> Box<Node> {
    let balance = node.balance_factor();
    if balance > 1 {
        if balance_of(&node.left) < 0 {
            debug!(at = node.value, "left-right case");
            node.left = node.left.take().map(rotate_left);
        } else {
            debug!(at = node.value, "left-left case");
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if balance_of(&node.right) > 0 {
            debug!(at = node.value, "right-left case");
            node.right = node.right.take().map(rotate_right);
        } else {
            debug!(at = node.value, "right-right case");
        }
        return rotate_left(node);
    }
    node
}

fn snapshot_node(node: &Node) -> SnapshotNode {
    SnapshotNode {
        value: node.value,
        balance_factor: node.balance_factor(),
        children: [&node.left, &node.right]
            .into_iter()
            .flatten()
            .map(|child| snapshot_node(child))
            .collect(),
    }
}

fn collect_in_order(link: &Link, out: &mut Vec<Key>) {
    if let Some(node) = link {
        collect_in_order(&node.left, out);
        out.push(node.value);
        collect_in_order(&node.right, out);
    }
}

/// Recomputes height and size of a subtree from scratch, checking ordering
/// against the open interval `(lower, upper)` on the way.
fn validate_node(link: &Link, lower: Option<Key>, upper: Option<Key>) -> DomainResult<(i32, usize)> {
    let Some(node) = link else {
        return Ok((0, 0));
    };

    if lower.is_some_and(|l| node.value <= l) || upper.is_some_and(|u| node.value >= u) {
        return Err(DomainError::violation(
            node.value,
            format!("out of order, expected within ({lower:?}, {upper:?})"),
        ));
    }

    let (left_height, left_size) = validate_node(&node.left, lower, Some(node.value))?;
    let (right_height, right_size) = validate_node(&node.right, Some(node.value), upper)?;

    let expected = 1 + max(left_height, right_height);
    if node.height != expected {
        return Err(DomainError::violation(
            node.value,
            format!("cached height {} but actual height {}", node.height, expected),
        ));
    }
    let balance = left_height - right_height;
    if balance.abs() > 1 {
        return Err(DomainError::violation(
            node.value,
            format!("balance factor {balance} outside [-1, 1]"),
        ));
    }

    Ok((expected, 1 + left_size + right_size))
}

/// Upper bound on the height of any AVL tree holding `len` keys.
pub fn height_bound(len: usize) -> f64 {
    1.44 * ((len + 2) as f64).log2()
}

/// Self-balancing binary search tree over integer keys.
///
/// Mutation happens in place. `insert` and `delete` are no-ops for present
/// and absent keys respectively, and return `&mut Self` so calls chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value`, rebalancing at the lowest unbalanced ancestor.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: Key) -> &mut Self {
        let mut inserted = false;
        self.root = Some(insert_node(self.root.take(), value, &mut inserted));
        if inserted {
            self.len += 1;
        } else {
            debug!("duplicate key ignored");
        }
        self
    }

    /// Delete `value`, rebalancing every ancestor on the way back up.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: Key) -> &mut Self {
        let mut removed = false;
        self.root = delete_node(self.root.take(), value, &mut removed);
        if removed {
            self.len -= 1;
        } else {
            debug!("absent key ignored");
        }
        self
    }

    /// Parse `input` and insert it. On `InvalidKey` the tree is untouched.
    pub fn insert_str(&mut self, input: &str) -> DomainResult<&mut Self> {
        let value = parse_key(input)?;
        Ok(self.insert(value))
    }

    /// Parse `input` and delete it. On `InvalidKey` the tree is untouched.
    pub fn delete_str(&mut self, input: &str) -> DomainResult<&mut Self> {
        let value = parse_key(input)?;
        Ok(self.delete(value))
    }

    pub fn contains(&self, value: Key) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree; 0 when empty.
    pub fn height(&self) -> usize {
        usize::try_from(height(&self.root)).unwrap_or_default()
    }

    pub fn root_value(&self) -> Option<Key> {
        self.root.as_ref().map(|n| n.value)
    }

    pub fn min(&self) -> Option<Key> {
        self.root.as_deref().map(|n| find_min(n).value)
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len);
        collect_in_order(&self.root, &mut out);
        out
    }

    /// Fresh projection of the current shape for display.
    pub fn snapshot(&self) -> TreeSnapshot {
        match self.root.as_deref() {
            None => TreeSnapshot::Empty,
            Some(root) => TreeSnapshot::Node(snapshot_node(root)),
        }
    }

    /// Check ordering, balance and cached heights by full recomputation.
    pub fn validate(&self) -> DomainResult<()> {
        let (_, size) = validate_node(&self.root, None, None)?;
        if size != self.len {
            return Err(DomainError::violation(
                self.root_value().unwrap_or_default(),
                format!("tracked size {} but counted {}", self.len, size),
            ));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}
