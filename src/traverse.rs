//! Parent-link traversal machinery shared by both tree strategies.
//!
//! Every walk here is iterative: the next node is derived from child and
//! parent links in constant space, so adversarial insert orders can never
//! overflow the call stack during traversal or teardown.

use std::ptr::NonNull;

/// The order in which a traversal visits nodes.
///
/// In-order is the default and the only order observable through the
/// standard container iteration contract; it yields elements ascending under
/// the tree's comparator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
}

/// Link accessors shared by the node types of both strategies.
///
/// Parent links are navigation-only; ownership flows strictly from the root
/// towards the leaves, and none of these methods transfer it.
pub(crate) trait TreeNode: Sized {
    fn left(&self) -> Option<NonNull<Self>>;
    fn right(&self) -> Option<NonNull<Self>>;
    fn parent(&self) -> Option<NonNull<Self>>;
    fn set_left(&mut self, link: Option<NonNull<Self>>);
    fn set_right(&mut self, link: Option<NonNull<Self>>);
    fn set_parent(&mut self, link: Option<NonNull<Self>>);
}

pub(crate) unsafe fn leftmost<N>(mut node: NonNull<N>) -> NonNull<N>
where
    N: TreeNode,
{
    while let Some(left) = node.as_ref().left() {
        node = left;
    }
    node
}

pub(crate) unsafe fn rightmost<N>(mut node: NonNull<N>) -> NonNull<N>
where
    N: TreeNode,
{
    while let Some(right) = node.as_ref().right() {
        node = right;
    }
    node
}

unsafe fn leftmost_deepest<N>(mut node: NonNull<N>) -> NonNull<N>
where
    N: TreeNode,
{
    loop {
        if let Some(left) = node.as_ref().left() {
            node = left;
        } else if let Some(right) = node.as_ref().right() {
            node = right;
        } else {
            return node;
        }
    }
}

unsafe fn in_order_successor<N>(node: NonNull<N>) -> Option<NonNull<N>>
where
    N: TreeNode,
{
    if let Some(right) = node.as_ref().right() {
        return Some(leftmost(right));
    }
    let mut curr = node;
    let mut parent = curr.as_ref().parent();
    while let Some(node) = parent {
        if node.as_ref().right() != Some(curr) {
            break;
        }
        curr = node;
        parent = node.as_ref().parent();
    }
    parent
}

unsafe fn pre_order_successor<N>(node: NonNull<N>) -> Option<NonNull<N>>
where
    N: TreeNode,
{
    if let Some(left) = node.as_ref().left() {
        return Some(left);
    }
    if let Some(right) = node.as_ref().right() {
        return Some(right);
    }
    let mut curr = node;
    while let Some(parent) = curr.as_ref().parent() {
        if parent.as_ref().left() == Some(curr) {
            if let Some(right) = parent.as_ref().right() {
                return Some(right);
            }
        }
        curr = parent;
    }
    None
}

unsafe fn post_order_successor<N>(node: NonNull<N>) -> Option<NonNull<N>>
where
    N: TreeNode,
{
    let parent = node.as_ref().parent()?;
    if parent.as_ref().left() == Some(node) {
        if let Some(right) = parent.as_ref().right() {
            return Some(leftmost_deepest(right));
        }
    }
    Some(parent)
}

/// A cursor over the live structure of a tree.
///
/// The next node is computed lazily when the cursor advances, so the walk
/// observes mutations made after it was created. Callers must not mutate the
/// tree while a walk is paused mid-way; the wrappers around this type enforce
/// that by borrowing the tree for the lifetime of the iterator.
pub(crate) struct RawIter<N> {
    next: Option<NonNull<N>>,
    order: TraversalOrder,
}

impl<N> RawIter<N>
where
    N: TreeNode,
{
    pub(crate) unsafe fn new(root: Option<NonNull<N>>, order: TraversalOrder) -> Self {
        let next = root.map(|root| match order {
            TraversalOrder::InOrder => leftmost(root),
            TraversalOrder::PreOrder => root,
            TraversalOrder::PostOrder => leftmost_deepest(root),
        });
        RawIter { next, order }
    }

    pub(crate) unsafe fn next(&mut self) -> Option<NonNull<N>> {
        let curr = self.next?;
        self.next = match self.order {
            TraversalOrder::InOrder => in_order_successor(curr),
            TraversalOrder::PreOrder => pre_order_successor(curr),
            TraversalOrder::PostOrder => post_order_successor(curr),
        };
        Some(curr)
    }
}

/// Releases every node of a subtree without recursing.
///
/// Links are severed on the way down so each node is visited at most three
/// times and freed exactly once.
pub(crate) unsafe fn drop_subtree<N>(root: Option<NonNull<N>>)
where
    N: TreeNode,
{
    let mut curr = root;
    if let Some(mut node) = curr {
        node.as_mut().set_parent(None);
    }
    while let Some(mut node) = curr {
        if let Some(left) = node.as_ref().left() {
            node.as_mut().set_left(None);
            curr = Some(left);
        } else if let Some(right) = node.as_ref().right() {
            node.as_mut().set_right(None);
            curr = Some(right);
        } else {
            curr = node.as_ref().parent();
            drop(Box::from_raw(node.as_ptr()));
        }
    }
}

/// Unlinks and returns the leftmost node of a tree that is being consumed.
///
/// No rebalancing is performed; the caller owns the remaining structure and
/// never exposes it again, only drains or drops it.
pub(crate) unsafe fn detach_leftmost<N>(root: &mut Option<NonNull<N>>) -> Option<NonNull<N>>
where
    N: TreeNode,
{
    let mut node = leftmost((*root)?);
    let child = node.as_ref().right();
    match node.as_ref().parent() {
        None => *root = child,
        Some(mut parent) => parent.as_mut().set_left(child),
    }
    if let Some(mut child) = child {
        child.as_mut().set_parent(node.as_ref().parent());
    }
    node.as_mut().set_right(None);
    node.as_mut().set_parent(None);
    Some(node)
}
