use std::cmp::Ordering;
use std::iter::FromIterator;

use log::{debug, trace};

use crate::error::{Result, TreeError};
use crate::node::{Color, NodeId, Nodes, NIL};

/// An ordered container of `i32` keys implemented with a red-black tree.
///
/// Duplicate keys are kept: an equal key is always placed to the right of the
/// keys already present.
///
/// ```
/// use rbtree::RedBlackTree;
/// let mut tree = RedBlackTree::new();
/// tree.insert(10);
/// tree.insert(15);
/// tree.insert(20);
/// assert_eq!(tree.root_key(), Ok(15));
/// assert!(tree.search(20));
/// tree.delete(20).unwrap();
/// assert!(!tree.search(20));
/// assert!(tree.is_valid());
/// ```
#[derive(Clone, Debug)]
pub struct RedBlackTree {
    pub(crate) nodes: Nodes,
    pub(crate) root: NodeId,
    pub(crate) num_nodes: usize,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl RedBlackTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Nodes::new(),
            root: NIL,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Returns the number of keys in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        self.traverse(|_, depth| height = height.max(depth), |_| {});
        height
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
        self.num_nodes = 0;
    }

    /// Returns true if the tree contains `key`.
    pub fn search(&self, key: i32) -> bool {
        self.find(key) != NIL
    }

    /// Returns the key stored at the root.
    pub fn root_key(&self) -> Result<i32> {
        if self.root == NIL {
            return Err(TreeError::EmptyTree);
        }
        Ok(self.nodes[self.root].key)
    }

    /// Inserts a key. Equal keys are permitted and never rejected.
    pub fn insert(&mut self, key: i32) {
        let parent = self.find_insert_pos(key);
        let node = self.nodes.create(parent, key);
        if parent == NIL {
            self.root = node;
        } else if key < self.nodes[parent].key {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }
        self.num_nodes += 1;
        self.insert_fixup(node);
        self.check_consistency();
    }

    /// Removes one occurrence of `key`.
    ///
    /// Fails with [`TreeError::KeyNotFound`] if the key is absent.
    pub fn delete(&mut self, key: i32) -> Result<()> {
        let node = self.find(key);
        if node == NIL {
            debug!("delete: key {} not found", key);
            return Err(TreeError::KeyNotFound { key });
        }
        debug_assert!(self.num_nodes >= 1);
        self.unlink_node(node);
        self.nodes.destroy(node);
        self.num_nodes -= 1;
        self.check_consistency();
        Ok(())
    }

    /// Returns the keys in ascending order.
    pub fn keys(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.num_nodes);
        self.for_each_inorder(|key| keys.push(key));
        keys
    }

    /// Calls `f` with every key in ascending order.
    pub fn for_each_inorder<F: FnMut(i32)>(&self, mut f: F) {
        self.traverse(|_, _| {}, |node| f(self.nodes[node].key));
    }

    // Read-only structural accessors for renderers.

    /// Returns the root node, or [`nil`](Self::nil) when the tree is empty.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the handle that stands for "no node here".
    pub fn nil(&self) -> NodeId {
        NIL
    }

    pub fn left(&self, node: NodeId) -> NodeId {
        self.nodes[node].left
    }

    pub fn right(&self, node: NodeId) -> NodeId {
        self.nodes[node].right
    }

    pub fn is_red(&self, node: NodeId) -> bool {
        self.nodes.is_red(node)
    }

    pub fn key(&self, node: NodeId) -> i32 {
        self.nodes[node].key
    }

    #[cfg(feature = "consistency_check")]
    fn check_consistency(&self) {
        assert!(self.is_valid(), "red-black properties violated");
    }

    #[cfg(not(feature = "consistency_check"))]
    fn check_consistency(&self) {}

    // First match on descent.
    fn find(&self, key: i32) -> NodeId {
        let mut current = self.root;
        while current != NIL {
            let node = &self.nodes[current];
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        current
    }

    // Ties continue into the right subtree.
    fn find_insert_pos(&self, key: i32) -> NodeId {
        let mut parent = NIL;
        let mut current = self.root;
        while current != NIL {
            parent = current;
            if key < self.nodes[current].key {
                current = self.nodes[current].left;
            } else {
                current = self.nodes[current].right;
            }
        }
        parent
    }

    fn minimum(&self, mut node: NodeId) -> NodeId {
        while self.nodes[node].left != NIL {
            node = self.nodes[node].left;
        }
        node
    }

    /// Puts `new` in the place of `old` under `old`'s parent (or at the root).
    /// The children of `new` are left untouched.
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        let parent = self.nodes[old].parent;
        if parent == NIL {
            self.root = new;
        } else if self.nodes[parent].left == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
        self.nodes[new].parent = parent;
    }

    /// Detaches `node` from the tree and restores the red-black properties.
    /// The node slot itself is released by the caller.
    fn unlink_node(&mut self, node: NodeId) {
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;

        let (moved_up, removed_color) = if left == NIL {
            self.transplant(node, right);
            (right, self.nodes.color(node))
        } else if right == NIL {
            self.transplant(node, left);
            (left, self.nodes.color(node))
        } else {
            // Two children: the in-order successor takes over the node's position
            let successor = self.minimum(right);
            let removed_color = self.nodes.color(successor);
            let moved_up = self.nodes[successor].right;

            if self.nodes[successor].parent == node {
                // May be the sentinel, whose parent link fixup relies on
                self.nodes[moved_up].parent = successor;
            } else {
                self.transplant(successor, moved_up);
                self.nodes[successor].right = right;
                self.nodes[right].parent = successor;
            }

            self.transplant(node, successor);
            self.nodes[successor].left = left;
            self.nodes[left].parent = successor;
            let color = self.nodes.color(node);
            self.nodes.set_color(successor, color);

            (moved_up, removed_color)
        };

        if removed_color == Color::Black {
            self.delete_fixup(moved_up);
        }
    }

    fn rotate_left(&mut self, node: NodeId) {
        let right = self.nodes[node].right;
        debug_assert!(right != NIL);

        let right_left = self.nodes[right].left;
        self.nodes[node].right = right_left;
        if right_left != NIL {
            self.nodes[right_left].parent = node;
        }

        let parent = self.nodes[node].parent;
        self.nodes[right].parent = parent;
        if parent == NIL {
            self.root = right;
        } else if self.nodes[parent].left == node {
            self.nodes[parent].left = right;
        } else {
            self.nodes[parent].right = right;
        }

        self.nodes[right].left = node;
        self.nodes[node].parent = right;
    }

    fn rotate_right(&mut self, node: NodeId) {
        let left = self.nodes[node].left;
        debug_assert!(left != NIL);

        let left_right = self.nodes[left].right;
        self.nodes[node].left = left_right;
        if left_right != NIL {
            self.nodes[left_right].parent = node;
        }

        let parent = self.nodes[node].parent;
        self.nodes[left].parent = parent;
        if parent == NIL {
            self.root = left;
        } else if self.nodes[parent].left == node {
            self.nodes[parent].left = left;
        } else {
            self.nodes[parent].right = left;
        }

        self.nodes[left].right = node;
        self.nodes[node].parent = left;
    }

    /// Repairs red-red violations upwards from a freshly inserted red node.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while self.nodes.is_red(self.nodes[node].parent) {
            let parent = self.nodes[node].parent;
            let grandparent = self.nodes[parent].parent;
            // A red parent is never the root, so the grandparent is a real black node
            debug_assert!(grandparent != NIL);
            debug_assert!(self.nodes.is_black(grandparent));

            if parent == self.nodes[grandparent].left {
                let uncle = self.nodes[grandparent].right;
                if self.nodes.is_red(uncle) {
                    trace!("insert fixup: red uncle at {}", self.nodes[grandparent].key);
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(uncle, Color::Black);
                    self.nodes.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.nodes[parent].right {
                        trace!("insert fixup: triangle at {}", self.nodes[parent].key);
                        node = parent;
                        self.rotate_left(node);
                    }
                    trace!("insert fixup: line at {}", self.nodes[grandparent].key);
                    let parent = self.nodes[node].parent;
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.nodes[grandparent].left;
                if self.nodes.is_red(uncle) {
                    trace!("insert fixup: red uncle at {}", self.nodes[grandparent].key);
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(uncle, Color::Black);
                    self.nodes.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.nodes[parent].left {
                        trace!("insert fixup: triangle at {}", self.nodes[parent].key);
                        node = parent;
                        self.rotate_right(node);
                    }
                    trace!("insert fixup: line at {}", self.nodes[grandparent].key);
                    let parent = self.nodes[node].parent;
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.nodes.set_color(root, Color::Black);
    }

    /// Repairs the black-height deficit left at `node` by removing a black node.
    /// `node` may be the sentinel, in which case its parent link names the
    /// position it occupies.
    fn delete_fixup(&mut self, mut node: NodeId) {
        while node != self.root && self.nodes.is_black(node) {
            let parent = self.nodes[node].parent;

            if node == self.nodes[parent].left {
                let mut sibling = self.nodes[parent].right;
                debug_assert!(sibling != NIL);

                if self.nodes.is_red(sibling) {
                    trace!("delete fixup: red sibling {}", self.nodes[sibling].key);
                    self.nodes.set_color(sibling, Color::Black);
                    self.nodes.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.nodes[parent].right;
                }

                let near = self.nodes[sibling].left;
                let far = self.nodes[sibling].right;
                if self.nodes.is_black(near) && self.nodes.is_black(far) {
                    trace!("delete fixup: black nephews, moving up");
                    self.nodes.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.nodes.is_black(far) {
                        trace!("delete fixup: red near nephew {}", self.nodes[near].key);
                        self.nodes.set_color(near, Color::Black);
                        self.nodes.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.nodes[parent].right;
                    }
                    trace!("delete fixup: red far nephew");
                    let parent_color = self.nodes.color(parent);
                    self.nodes.set_color(sibling, parent_color);
                    self.nodes.set_color(parent, Color::Black);
                    let far = self.nodes[sibling].right;
                    self.nodes.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.nodes[parent].left;
                debug_assert!(sibling != NIL);

                if self.nodes.is_red(sibling) {
                    trace!("delete fixup: red sibling {}", self.nodes[sibling].key);
                    self.nodes.set_color(sibling, Color::Black);
                    self.nodes.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.nodes[parent].left;
                }

                let near = self.nodes[sibling].right;
                let far = self.nodes[sibling].left;
                if self.nodes.is_black(near) && self.nodes.is_black(far) {
                    trace!("delete fixup: black nephews, moving up");
                    self.nodes.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.nodes.is_black(far) {
                        trace!("delete fixup: red near nephew {}", self.nodes[near].key);
                        self.nodes.set_color(near, Color::Black);
                        self.nodes.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.nodes[parent].left;
                    }
                    trace!("delete fixup: red far nephew");
                    let parent_color = self.nodes.color(parent);
                    self.nodes.set_color(sibling, parent_color);
                    self.nodes.set_color(parent, Color::Black);
                    let far = self.nodes[sibling].left;
                    self.nodes.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }

        self.nodes.set_color(node, Color::Black);
    }

    /// Walks the tree along parent links without recursion.
    /// `preorder` also receives the node's depth, counting the root as 1.
    fn traverse<Pre, In>(&self, mut preorder: Pre, mut inorder: In)
    where
        Pre: FnMut(NodeId, usize),
        In: FnMut(NodeId),
    {
        if self.root == NIL {
            return;
        }
        let mut node = self.root;
        let mut depth = 1;
        let mut dir = Direction::FromParent;
        loop {
            match dir {
                Direction::FromParent => {
                    preorder(node, depth);
                    let left = self.nodes[node].left;
                    if left != NIL {
                        node = left;
                        depth += 1;
                    } else {
                        dir = Direction::FromLeft;
                    }
                }
                Direction::FromLeft => {
                    inorder(node);
                    let right = self.nodes[node].right;
                    if right != NIL {
                        node = right;
                        depth += 1;
                        dir = Direction::FromParent;
                    } else {
                        dir = Direction::FromRight;
                    }
                }
                Direction::FromRight => {
                    let parent = self.nodes[node].parent;
                    if parent == NIL {
                        break;
                    }
                    if self.nodes[parent].left == node {
                        dir = Direction::FromLeft;
                    } else {
                        dir = Direction::FromRight;
                    }
                    node = parent;
                    depth -= 1;
                }
            }
        }
    }
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<i32> for RedBlackTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<i32> for RedBlackTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
