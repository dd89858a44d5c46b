use crate::node::{NodeId, NIL};
use crate::tree::RedBlackTree;

struct Frame {
    node: NodeId,
    lower: Option<i32>,
    upper: Option<i32>,
    black_count: usize,
    depth: usize,
}

// A red-black tree with n nodes is at most 2 * log2(n + 1) nodes high.
fn max_height(num_nodes: usize) -> usize {
    2 * (usize::BITS - (num_nodes + 1).leading_zeros()) as usize
}

impl RedBlackTree {
    /// Checks the red-black properties: black root and sentinel, in-order
    /// keys non-decreasing, no red node with a red child, the same number of
    /// black nodes on every path down to the sentinel, and consistent parent
    /// links.
    ///
    /// The walk uses an explicit stack and gives up as soon as it descends
    /// deeper than a valid tree could be, so damaged trees are reported
    /// instead of looping.
    pub fn is_valid(&self) -> bool {
        if self.nodes.is_red(NIL) {
            return false;
        }
        if self.root == NIL {
            return self.num_nodes == 0;
        }
        if self.nodes.is_red(self.root) || self.nodes[self.root].parent != NIL {
            return false;
        }

        let max_depth = max_height(self.num_nodes);
        let mut visited = 0;
        let mut black_height = None;
        let mut stack = vec![Frame {
            node: self.root,
            lower: None,
            upper: None,
            black_count: 0,
            depth: 1,
        }];

        while let Some(frame) = stack.pop() {
            if frame.node == NIL {
                match black_height {
                    None => black_height = Some(frame.black_count),
                    Some(height) if height != frame.black_count => return false,
                    Some(_) => {}
                }
                continue;
            }

            visited += 1;
            if visited > self.num_nodes || frame.depth > max_depth {
                return false;
            }

            let node = &self.nodes[frame.node];
            if frame.lower.is_some_and(|lower| node.key < lower)
                || frame.upper.is_some_and(|upper| node.key > upper)
            {
                return false;
            }

            let red = self.nodes.is_red(frame.node);
            for child in [node.left, node.right] {
                if child == NIL {
                    continue;
                }
                if self.nodes[child].parent != frame.node {
                    return false;
                }
                if red && self.nodes.is_red(child) {
                    return false;
                }
            }

            let black_count = frame.black_count + usize::from(!red);
            stack.push(Frame {
                node: node.right,
                lower: Some(node.key),
                upper: frame.upper,
                black_count,
                depth: frame.depth + 1,
            });
            stack.push(Frame {
                node: node.left,
                lower: frame.lower,
                upper: Some(node.key),
                black_count,
                depth: frame.depth + 1,
            });
        }

        visited == self.num_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::max_height;

    #[test]
    fn test_max_height() {
        assert_eq!(max_height(0), 2);
        assert_eq!(max_height(1), 4);
        assert_eq!(max_height(3), 6);
        assert_eq!(max_height(1_000), 20);
    }
}
