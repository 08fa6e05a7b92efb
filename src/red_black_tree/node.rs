use crate::traverse::TreeNode;
use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// An enum representing the color of a node in a red black tree.
///
/// Empty positions count as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// The parent link is navigation-only; ownership flows strictly from the root
/// towards the leaves.
pub(crate) struct Node<T> {
    pub element: T,
    pub color: Color,
    pub left: Link<T>,
    pub right: Link<T>,
    pub parent: Link<T>,
}

impl<T> Node<T> {
    /// Allocates a new red leaf below `parent`. The caller wires the matching
    /// child link.
    pub fn new(element: T, parent: Link<T>) -> NonNull<Node<T>> {
        let node = Node {
            element,
            color: Color::Red,
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

pub(crate) unsafe fn is_red<T>(link: Link<T>) -> bool {
    link.map_or(false, |node| node.as_ref().color == Color::Red)
}
