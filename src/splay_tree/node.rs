use crate::traverse::TreeNode;
use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A struct representing an internal node of a splay tree.
///
/// Splay nodes carry no balance bookkeeping at all; the parent link is
/// navigation-only and ownership flows strictly from the root towards the
/// leaves.
pub(crate) struct Node<T> {
    pub element: T,
    pub left: Link<T>,
    pub right: Link<T>,
    pub parent: Link<T>,
}

impl<T> Node<T> {
    /// Allocates a new leaf below `parent`. The caller wires the matching
    /// child link.
    pub fn new(element: T, parent: Link<T>) -> NonNull<Node<T>> {
        let node = Node {
            element,
            left: None,
            right: None,
            parent,
        };
        NonNull::from(Box::leak(Box::new(node)))
    }
}

impl<T> TreeNode for Node<T> {
    fn left(&self) -> Link<T> {
        self.left
    }

    fn right(&self) -> Link<T> {
        self.right
    }

    fn parent(&self) -> Link<T> {
        self.parent
    }

    fn set_left(&mut self, link: Link<T>) {
        self.left = link;
    }

    fn set_right(&mut self, link: Link<T>) {
        self.right = link;
    }

    fn set_parent(&mut self, link: Link<T>) {
        self.parent = link;
    }
}
