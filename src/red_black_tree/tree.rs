use crate::compare::{Comparator, NaturalOrder};
use crate::container::OrderedContainer;
use crate::red_black_tree::node::{is_red, Color, Link, Node};
use crate::traverse::{self, RawIter, TraversalOrder};
use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

/// An ordered container implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that tags every
/// node with a color and restores the coloring invariants after each
/// insertion and deletion with rotations and recoloring. Every path from the
/// root to an empty position passes through the same number of black nodes,
/// which bounds all operations by `O(log n)` in the worst case.
///
/// All comparisons go through the comparator supplied at construction; two
/// elements comparing equal are treated as the same key and never stored
/// together.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert!(tree.insert(3));
/// assert!(tree.insert(1));
/// assert!(!tree.insert(3));
///
/// assert_eq!(tree.len(), 2);
/// assert!(tree.contains(&1));
///
/// assert!(tree.remove(&1));
/// assert!(!tree.remove(&1));
/// ```
pub struct RedBlackTree<T, C = NaturalOrder> {
    root: Link<T>,
    len: usize,
    cmp: C,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackTree<T>` ordered by the `Ord`
    /// implementation of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> RedBlackTree<T, C> {
    /// Constructs a new, empty `RedBlackTree<T, C>` that places elements
    /// according to `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::compare::FnComparator;
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_comparator(FnComparator(|lhs: &u32, rhs: &u32| {
    ///     rhs.cmp(lhs)
    /// }));
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        RedBlackTree {
            root: None,
            len: 0,
            cmp,
            marker: PhantomData,
        }
    }

    /// Inserts an element into the tree if no stored element compares equal
    /// to it. Returns `true` on insertion, and `false` on a duplicate without
    /// replacing the stored payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, element: T) -> bool
    where
        C: Comparator<T>,
    {
        unsafe {
            let mut parent: Option<(NonNull<Node<T>>, Ordering)> = None;
            let mut curr = self.root;
            while let Some(node) = curr {
                match self.cmp.compare(&element, &node.as_ref().element) {
                    Ordering::Less => {
                        parent = Some((node, Ordering::Less));
                        curr = node.as_ref().left;
                    },
                    Ordering::Greater => {
                        parent = Some((node, Ordering::Greater));
                        curr = node.as_ref().right;
                    },
                    Ordering::Equal => return false,
                }
            }

            let new_node = Node::new(element, parent.map(|(node, _)| node));
            match parent {
                None => self.root = Some(new_node),
                Some((mut parent, Ordering::Less)) => parent.as_mut().left = Some(new_node),
                Some((mut parent, _)) => parent.as_mut().right = Some(new_node),
            }
            self.len += 1;
            self.insert_fixup(new_node);
            true
        }
    }

    /// Removes the element comparing equal to `element`, if it exists.
    /// Returns whether a removal occurred; removing an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, element: &T) -> bool
    where
        C: Comparator<T>,
    {
        unsafe {
            match self.find(element) {
                Some(node) => {
                    self.remove_node(node);
                    true
                },
                None => false,
            }
        }
    }

    /// Checks if an element comparing equal to `element` exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&self, element: &T) -> bool
    where
        C: Comparator<T>,
    {
        unsafe { self.find(element).is_some() }
    }

    /// Checks for `element` by descending with the tree's ordering, but
    /// decides existence with `eq` instead of order-derived equality.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::compare::FnComparator;
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_comparator(FnComparator(
    ///     |lhs: &(u32, &str), rhs: &(u32, &str)| lhs.0.cmp(&rhs.0),
    /// ));
    /// tree.insert((1, "one"));
    ///
    /// assert!(tree.contains_with(&(1, "two"), |stored, probe| stored.0 == probe.0));
    /// assert!(!tree.contains_with(&(1, "two"), |stored, probe| stored.1 == probe.1));
    /// ```
    pub fn contains_with<F>(&self, element: &T, mut eq: F) -> bool
    where
        C: Comparator<T>,
        F: FnMut(&T, &T) -> bool,
    {
        unsafe {
            self.find(element)
                .map_or(false, |node| eq(&node.as_ref().element, element))
        }
    }

    /// Removes every element for which the predicate holds. Returns `true`
    /// iff at least one element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for element in 0..10 {
    ///     tree.insert(element);
    /// }
    ///
    /// assert!(tree.remove_if(|element| element % 2 == 0));
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5, &7, &9]);
    /// ```
    pub fn remove_if<F>(&mut self, mut predicate: F) -> bool
    where
        C: Comparator<T>,
        F: FnMut(&T) -> bool,
    {
        unsafe {
            let mut doomed = Vec::new();
            let mut raw = RawIter::new(self.root, TraversalOrder::InOrder);
            while let Some(node) = raw.next() {
                if predicate(&node.as_ref().element) {
                    doomed.push(node);
                }
            }
            let removed = !doomed.is_empty();
            // Descending order keeps the collected pointers valid: removing a
            // node with two children splices out its in-order successor, which
            // is always a larger, still-live node.
            for node in doomed.into_iter().rev() {
                self.remove_node(node);
            }
            removed
        }
    }

    /// Removes each of `items`, one by one. Returns whether the tree changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for element in 1..=5 {
    ///     tree.insert(element);
    /// }
    ///
    /// assert!(tree.remove_all(&[1, 2, 8]));
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &4, &5]);
    /// ```
    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        C: Comparator<T>,
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut removed = false;
        for item in items {
            removed |= self.remove(item);
        }
        removed
    }

    /// Removes every element that does not compare equal to one of `items`.
    /// Returns whether the tree changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for element in 1..=5 {
    ///     tree.insert(element);
    /// }
    ///
    /// assert!(tree.retain_all(&[2, 4, 6]));
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&2, &4]);
    /// ```
    pub fn retain_all(&mut self, items: &[T]) -> bool
    where
        C: Comparator<T>,
    {
        unsafe {
            let mut doomed = Vec::new();
            let mut raw = RawIter::new(self.root, TraversalOrder::InOrder);
            while let Some(node) = raw.next() {
                let element = &node.as_ref().element;
                let retained = items
                    .iter()
                    .any(|item| self.cmp.compare(item, element) == Ordering::Equal);
                if !retained {
                    doomed.push(node);
                }
            }
            let removed = !doomed.is_empty();
            for node in doomed.into_iter().rev() {
                self.remove_node(node);
            }
            removed
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the tree, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        unsafe {
            traverse::drop_subtree(self.root.take());
        }
        self.len = 0;
    }

    /// Returns an iterator over the tree that yields elements ascending under
    /// the tree's comparator.
    ///
    /// The walk is restartable and descends the live structure; it is not a
    /// snapshot, so a tree mutated between two full iterations yields
    /// different results.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackTreeIter<'_, T> {
        self.traverse(TraversalOrder::InOrder)
    }

    /// Returns an iterator over the tree that visits nodes in the requested
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    /// use balanced_collections::TraversalOrder;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let pre_order = tree.traverse(TraversalOrder::PreOrder);
    /// assert_eq!(pre_order.collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    ///
    /// let post_order = tree.traverse(TraversalOrder::PostOrder);
    /// assert_eq!(post_order.collect::<Vec<&u32>>(), vec![&1, &3, &2]);
    /// ```
    pub fn traverse(&self, order: TraversalOrder) -> RedBlackTreeIter<'_, T> {
        RedBlackTreeIter {
            raw: unsafe { RawIter::new(self.root, order) },
            marker: PhantomData,
        }
    }

    unsafe fn find(&self, element: &T) -> Link<T>
    where
        C: Comparator<T>,
    {
        let mut curr = self.root;
        while let Some(node) = curr {
            match self.cmp.compare(element, &node.as_ref().element) {
                Ordering::Less => curr = node.as_ref().left,
                Ordering::Greater => curr = node.as_ref().right,
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    unsafe fn rotate_left(&mut self, mut node: NonNull<Node<T>>) {
        let mut child = node
            .as_ref()
            .right
            .expect("Expected right child node to be `Some`.");
        node.as_mut().right = child.as_ref().left;
        if let Some(mut grandchild) = child.as_ref().left {
            grandchild.as_mut().parent = Some(node);
        }
        child.as_mut().parent = node.as_ref().parent;
        match node.as_ref().parent {
            None => self.root = Some(child),
            Some(mut parent) => {
                if parent.as_ref().left == Some(node) {
                    parent.as_mut().left = Some(child);
                } else {
                    parent.as_mut().right = Some(child);
                }
            },
        }
        child.as_mut().left = Some(node);
        node.as_mut().parent = Some(child);
    }

    unsafe fn rotate_right(&mut self, mut node: NonNull<Node<T>>) {
        let mut child = node
            .as_ref()
            .left
            .expect("Expected left child node to be `Some`.");
        node.as_mut().left = child.as_ref().right;
        if let Some(mut grandchild) = child.as_ref().right {
            grandchild.as_mut().parent = Some(node);
        }
        child.as_mut().parent = node.as_ref().parent;
        match node.as_ref().parent {
            None => self.root = Some(child),
            Some(mut parent) => {
                if parent.as_ref().left == Some(node) {
                    parent.as_mut().left = Some(child);
                } else {
                    parent.as_mut().right = Some(child);
                }
            },
        }
        child.as_mut().right = Some(node);
        node.as_mut().parent = Some(child);
    }

    unsafe fn insert_fixup(&mut self, mut node: NonNull<Node<T>>) {
        while let Some(mut parent) = node.as_ref().parent {
            if parent.as_ref().color == Color::Black {
                break;
            }
            // A red parent is never the root, so a grandparent exists.
            let mut grandparent = parent
                .as_ref()
                .parent
                .expect("Expected a red node to have a parent.");
            let parent_is_left = grandparent.as_ref().left == Some(parent);
            let uncle = if parent_is_left {
                grandparent.as_ref().right
            } else {
                grandparent.as_ref().left
            };

            if is_red(uncle) {
                parent.as_mut().color = Color::Black;
                if let Some(mut uncle) = uncle {
                    uncle.as_mut().color = Color::Black;
                }
                grandparent.as_mut().color = Color::Red;
                node = grandparent;
                continue;
            }

            if parent_is_left {
                if parent.as_ref().right == Some(node) {
                    // Inner case: rotate the zig-zag into the outer case.
                    node = parent;
                    self.rotate_left(node);
                    parent = node
                        .as_ref()
                        .parent
                        .expect("Expected a parent after rotation.");
                }
                parent.as_mut().color = Color::Black;
                grandparent.as_mut().color = Color::Red;
                self.rotate_right(grandparent);
            } else {
                if parent.as_ref().left == Some(node) {
                    node = parent;
                    self.rotate_right(node);
                    parent = node
                        .as_ref()
                        .parent
                        .expect("Expected a parent after rotation.");
                }
                parent.as_mut().color = Color::Black;
                grandparent.as_mut().color = Color::Red;
                self.rotate_left(grandparent);
            }
        }

        if let Some(mut root) = self.root {
            root.as_mut().color = Color::Black;
        }
    }

    unsafe fn remove_node(&mut self, mut node: NonNull<Node<T>>) -> T {
        // A node with two children trades payloads with its in-order
        // successor, which has no left child, and the successor node is the
        // one spliced out.
        if node.as_ref().left.is_some() && node.as_ref().right.is_some() {
            let right = node
                .as_ref()
                .right
                .expect("Expected right child node to be `Some`.");
            let mut successor = traverse::leftmost(right);
            mem::swap(&mut node.as_mut().element, &mut successor.as_mut().element);
            node = successor;
        }

        let child = node.as_ref().left.or(node.as_ref().right);
        let parent = node.as_ref().parent;
        match parent {
            None => self.root = child,
            Some(mut parent) => {
                if parent.as_ref().left == Some(node) {
                    parent.as_mut().left = child;
                } else {
                    parent.as_mut().right = child;
                }
            },
        }
        if let Some(mut child) = child {
            child.as_mut().parent = parent;
        }

        let spliced_black = node.as_ref().color == Color::Black;
        let element = Box::from_raw(node.as_ptr()).element;
        self.len -= 1;
        if spliced_black {
            self.remove_fixup(child, parent);
        }
        element
    }

    /// Restores the black-height invariant after a black node was spliced
    /// out. `node` carries the double-black deficiency and may be empty;
    /// `parent` is its position's parent.
    unsafe fn remove_fixup(&mut self, mut node: Link<T>, mut parent: Link<T>) {
        loop {
            let mut curr_parent = match parent {
                Some(curr_parent) => curr_parent,
                // The deficiency reached the root and disappears.
                None => break,
            };
            if is_red(node) {
                break;
            }

            if curr_parent.as_ref().left == node {
                let mut sibling = curr_parent
                    .as_ref()
                    .right
                    .expect("Expected a double black node to have a sibling.");
                if sibling.as_ref().color == Color::Red {
                    sibling.as_mut().color = Color::Black;
                    curr_parent.as_mut().color = Color::Red;
                    self.rotate_left(curr_parent);
                    sibling = curr_parent
                        .as_ref()
                        .right
                        .expect("Expected a double black node to have a sibling.");
                }

                if !is_red(sibling.as_ref().left) && !is_red(sibling.as_ref().right) {
                    sibling.as_mut().color = Color::Red;
                    node = Some(curr_parent);
                    parent = curr_parent.as_ref().parent;
                } else {
                    if !is_red(sibling.as_ref().right) {
                        if let Some(mut near) = sibling.as_ref().left {
                            near.as_mut().color = Color::Black;
                        }
                        sibling.as_mut().color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = curr_parent
                            .as_ref()
                            .right
                            .expect("Expected a double black node to have a sibling.");
                    }
                    sibling.as_mut().color = curr_parent.as_ref().color;
                    curr_parent.as_mut().color = Color::Black;
                    if let Some(mut far) = sibling.as_ref().right {
                        far.as_mut().color = Color::Black;
                    }
                    self.rotate_left(curr_parent);
                    break;
                }
            } else {
                let mut sibling = curr_parent
                    .as_ref()
                    .left
                    .expect("Expected a double black node to have a sibling.");
                if sibling.as_ref().color == Color::Red {
                    sibling.as_mut().color = Color::Black;
                    curr_parent.as_mut().color = Color::Red;
                    self.rotate_right(curr_parent);
                    sibling = curr_parent
                        .as_ref()
                        .left
                        .expect("Expected a double black node to have a sibling.");
                }

                if !is_red(sibling.as_ref().left) && !is_red(sibling.as_ref().right) {
                    sibling.as_mut().color = Color::Red;
                    node = Some(curr_parent);
                    parent = curr_parent.as_ref().parent;
                } else {
                    if !is_red(sibling.as_ref().left) {
                        if let Some(mut near) = sibling.as_ref().right {
                            near.as_mut().color = Color::Black;
                        }
                        sibling.as_mut().color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = curr_parent
                            .as_ref()
                            .left
                            .expect("Expected a double black node to have a sibling.");
                    }
                    sibling.as_mut().color = curr_parent.as_ref().color;
                    curr_parent.as_mut().color = Color::Black;
                    if let Some(mut far) = sibling.as_ref().left {
                        far.as_mut().color = Color::Black;
                    }
                    self.rotate_right(curr_parent);
                    break;
                }
            }
        }

        if let Some(mut node) = node {
            node.as_mut().color = Color::Black;
        }
    }
}

impl<T, C> OrderedContainer<T> for RedBlackTree<T, C>
where
    C: Comparator<T>,
{
    fn insert(&mut self, element: T) -> bool {
        RedBlackTree::insert(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        RedBlackTree::remove(self, element)
    }

    fn contains(&mut self, element: &T) -> bool {
        RedBlackTree::contains(self, element)
    }

    fn contains_with<F>(&mut self, element: &T, eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        RedBlackTree::contains_with(self, element, eq)
    }

    fn remove_if<F>(&mut self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        RedBlackTree::remove_if(self, predicate)
    }

    fn retain_all(&mut self, items: &[T]) -> bool {
        RedBlackTree::retain_all(self, items)
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }

    fn clear(&mut self) {
        RedBlackTree::clear(self)
    }
}

impl<T, C> Drop for RedBlackTree<T, C> {
    fn drop(&mut self) {
        unsafe {
            traverse::drop_subtree(self.root.take());
        }
    }
}

impl<T, C> Default for RedBlackTree<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> fmt::Debug for RedBlackTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for RedBlackTree<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

unsafe impl<T, C> Send for RedBlackTree<T, C>
where
    T: Send,
    C: Send,
{
}

unsafe impl<T, C> Sync for RedBlackTree<T, C>
where
    T: Sync,
    C: Sync,
{
}

impl<T, C> IntoIterator for RedBlackTree<T, C> {
    type IntoIter = RedBlackTreeIntoIter<T, C>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        RedBlackTreeIntoIter { tree: self }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C>
where
    T: 'a,
{
    type IntoIter = RedBlackTreeIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackTree<T, C>`.
///
/// This iterator yields owned elements in ascending order, unlinking nodes
/// one at a time as it advances.
pub struct RedBlackTreeIntoIter<T, C = NaturalOrder> {
    tree: RedBlackTree<T, C>,
}

impl<T, C> Iterator for RedBlackTreeIntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            let node = traverse::detach_leftmost(&mut self.tree.root)?;
            self.tree.len -= 1;
            Some(Box::from_raw(node.as_ptr()).element)
        }
    }
}

/// An iterator for `RedBlackTree<T, C>`.
///
/// This iterator yields immutable references in the traversal order it was
/// created with.
pub struct RedBlackTreeIter<'a, T> {
    raw: RawIter<Node<T>>,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for RedBlackTreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe { self.raw.next().map(|node| &(*node.as_ptr()).element) }
    }
}

impl<T, C> Serialize for RedBlackTree<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T, C> Deserialize<'de> for RedBlackTree<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor<T, C> {
            marker: PhantomData<(T, C)>,
        }

        impl<'de, T, C> Visitor<'de> for SeqVisitor<T, C>
        where
            T: Deserialize<'de>,
            C: Comparator<T> + Default,
        {
            type Value = RedBlackTree<T, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut tree = RedBlackTree::with_comparator(C::default());
                while let Some(element) = seq.next_element()? {
                    tree.insert(element);
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_seq(SeqVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
impl<T, C> RedBlackTree<T, C>
where
    C: Comparator<T>,
{
    fn assert_invariants(&self) {
        unsafe fn check_node<T>(link: Link<T>, parent: Link<T>) -> usize {
            match link {
                None => 1,
                Some(node) => {
                    assert_eq!(node.as_ref().parent, parent, "corrupted parent link");
                    if node.as_ref().color == Color::Red {
                        assert!(
                            !is_red(node.as_ref().left) && !is_red(node.as_ref().right),
                            "red node with a red child",
                        );
                    }
                    let left_height = check_node(node.as_ref().left, link);
                    let right_height = check_node(node.as_ref().right, link);
                    assert_eq!(left_height, right_height, "unequal black heights");
                    left_height + usize::from(node.as_ref().color == Color::Black)
                },
            }
        }

        unsafe {
            assert!(!is_red(self.root), "red root");
            check_node(self.root, None);
        }

        let elements = self.iter().collect::<Vec<&T>>();
        assert_eq!(elements.len(), self.len);
        for window in elements.windows(2) {
            assert_eq!(self.cmp.compare(window[0], window[1]), Ordering::Less);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackTree;
    use crate::compare::FnComparator;
    use crate::traverse::TraversalOrder;
    use rand::Rng;
    use serde_test::{assert_tokens, Token};
    use std::collections::BTreeSet;

    #[test]
    fn test_len_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert() {
        let mut tree = RedBlackTree::new();
        assert!(tree.insert(1));
        assert!(tree.contains(&1));
        tree.assert_invariants();
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = RedBlackTree::new();
        assert!(tree.insert(1));
        assert!(!tree.insert(1));
        assert_eq!(tree.len(), 1);
        tree.assert_invariants();
    }

    #[test]
    fn test_remove() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        assert!(tree.remove(&1));
        assert!(!tree.contains(&1));
        assert_eq!(tree.len(), 0);
        tree.assert_invariants();
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(3);
        assert!(!tree.remove(&2));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
    }

    #[test]
    fn test_in_order_after_inserts() {
        let mut tree = RedBlackTree::new();
        for element in &[50, 30, 70, 20, 40, 60, 80] {
            assert!(tree.insert(*element));
            tree.assert_invariants();
        }
        assert_eq!(
            tree.iter().collect::<Vec<&u32>>(),
            vec![&20, &30, &40, &50, &60, &70, &80],
        );
    }

    #[test]
    fn test_remove_node_with_two_children() {
        let mut tree = RedBlackTree::new();
        for element in &[50, 30, 70, 20, 40, 60, 80] {
            tree.insert(*element);
        }

        assert!(tree.remove(&30));
        tree.assert_invariants();
        assert_eq!(
            tree.iter().collect::<Vec<&u32>>(),
            vec![&20, &40, &50, &60, &70, &80],
        );

        assert!(tree.remove(&50));
        tree.assert_invariants();
        assert_eq!(
            tree.iter().collect::<Vec<&u32>>(),
            vec![&20, &40, &60, &70, &80],
        );
    }

    #[test]
    fn test_remove_descending() {
        let mut tree = RedBlackTree::new();
        for element in 0..64 {
            tree.insert(element);
        }
        for element in (0..64).rev() {
            assert!(tree.remove(&element));
            tree.assert_invariants();
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_contains_with() {
        let mut tree = RedBlackTree::with_comparator(FnComparator(
            |lhs: &(u32, &str), rhs: &(u32, &str)| lhs.0.cmp(&rhs.0),
        ));
        tree.insert((1, "one"));
        tree.insert((2, "two"));

        assert!(tree.contains_with(&(2, "background"), |stored, probe| stored.0 == probe.0));
        assert!(!tree.contains_with(&(2, "background"), |stored, probe| stored.1 == probe.1));
        assert!(!tree.contains_with(&(3, "three"), |_, _| true));
    }

    #[test]
    fn test_remove_if() {
        let mut tree = RedBlackTree::new();
        for element in 0..10 {
            tree.insert(element);
        }

        assert!(tree.remove_if(|element| element % 2 == 0));
        tree.assert_invariants();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5, &7, &9]);
        assert!(!tree.remove_if(|element| *element > 100));
    }

    #[test]
    fn test_remove_all() {
        let mut tree = RedBlackTree::new();
        for element in 1..=5 {
            tree.insert(element);
        }

        assert!(tree.remove_all(&[1, 2, 8]));
        assert!(!tree.remove_all(&[1, 2, 8]));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &4, &5]);
    }

    #[test]
    fn test_retain_all() {
        let mut tree = RedBlackTree::new();
        for element in 1..=5 {
            tree.insert(element);
        }

        assert!(tree.retain_all(&[2, 4, 6]));
        tree.assert_invariants();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&2, &4]);
        assert!(!tree.retain_all(&[2, 4, 6]));
    }

    #[test]
    fn test_clear() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_traversal_orders() {
        let mut tree = RedBlackTree::new();
        for element in &[50, 30, 70, 20, 40, 60, 80] {
            tree.insert(*element);
        }

        assert_eq!(
            tree.traverse(TraversalOrder::InOrder).collect::<Vec<&u32>>(),
            vec![&20, &30, &40, &50, &60, &70, &80],
        );
        assert_eq!(
            tree.traverse(TraversalOrder::PreOrder).collect::<Vec<&u32>>(),
            vec![&50, &30, &20, &40, &70, &60, &80],
        );
        assert_eq!(
            tree.traverse(TraversalOrder::PostOrder).collect::<Vec<&u32>>(),
            vec![&20, &40, &30, &60, &80, &70, &50],
        );
    }

    #[test]
    fn test_comparator() {
        let mut tree =
            RedBlackTree::with_comparator(FnComparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs)));
        for element in 1..=5 {
            tree.insert(element);
        }
        tree.assert_invariants();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&5, &4, &3, &2, &1]);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_partial_eq() {
        let mut lhs = RedBlackTree::new();
        let mut rhs = RedBlackTree::new();
        for element in &[2, 1, 3] {
            lhs.insert(*element);
        }
        for element in &[3, 2, 1] {
            rhs.insert(*element);
        }
        assert_eq!(lhs, rhs);

        rhs.remove(&2);
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn test_serde() {
        let mut tree: RedBlackTree<u32> = RedBlackTree::new();
        tree.insert(2);
        tree.insert(1);
        tree.insert(3);

        assert_tokens(
            &tree,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_random_operations() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = RedBlackTree::new();
        let mut expected = BTreeSet::new();

        for _ in 0..1000 {
            let element = rng.gen_range(0, 200u32);
            assert_eq!(tree.insert(element), expected.insert(element));
            tree.assert_invariants();
        }
        for _ in 0..1000 {
            let element = rng.gen_range(0, 200u32);
            assert_eq!(tree.remove(&element), expected.remove(&element));
            tree.assert_invariants();
        }

        assert_eq!(tree.len(), expected.len());
        assert_eq!(
            tree.iter().collect::<Vec<&u32>>(),
            expected.iter().collect::<Vec<&u32>>(),
        );
    }
}
