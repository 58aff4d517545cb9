use std::iter::Iterator;

use super::TreeNode;

/// Depth-first (pre-order) iterator of nodes in a decision tree
///
/// The left subtree of a node is visited before its right subtree.
pub struct NodeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> NodeIter<'a> {
    pub fn new(root: &'a TreeNode) -> Self {
        NodeIter { stack: vec![root] }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|node| {
            if let Some((left, right)) = node.children() {
                self.stack.push(right);
                self.stack.push(left);
            }

            node
        })
    }
}
