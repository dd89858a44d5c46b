use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Handle to a node slot of a [`RedBlackTree`](crate::RedBlackTree).
///
/// Handles are only meaningful for the tree that produced them and only until
/// the next mutation of that tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The sentinel slot. Always black, never holds data.
pub(crate) const NIL: NodeId = NodeId(0);

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: i32,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Node {
    fn sentinel() -> Self {
        Node {
            key: 0,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }
}

/// Node storage addressed by `NodeId`, with slot 0 reserved for the sentinel.
#[derive(Clone, Debug)]
pub(crate) struct Nodes {
    slots: Vec<Node>,
    free: Vec<NodeId>,
}

impl Nodes {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Node::sentinel()],
            free: Vec::new(),
        }
    }

    /// Allocates a red node with both children at the sentinel.
    pub(crate) fn create(&mut self, parent: NodeId, key: i32) -> NodeId {
        let node = Node {
            key,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        };
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = node;
                id
            }
            None => {
                self.slots.push(node);
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases a detached node slot for reuse.
    pub(crate) fn destroy(&mut self, id: NodeId) {
        debug_assert!(id != NIL);
        let node = &mut self.slots[id.0];
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;
        self.free.push(id);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[0] = Node::sentinel();
        self.free.clear();
    }

    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.slots[id.0].color
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        assert!(
            id != NIL || color == Color::Black,
            "attempt to paint the sentinel red"
        );
        self.slots[id.0].color = color;
    }

    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    pub(crate) fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }
}

impl Index<NodeId> for Nodes {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.slots[id.0]
    }
}

impl IndexMut<NodeId> for Nodes {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.0]
    }
}
