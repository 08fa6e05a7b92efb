use crate::compare::{Comparator, NaturalOrder};
use crate::container::OrderedContainer;
use crate::splay_tree::node::{Link, Node};
use crate::traverse::{self, RawIter, TraversalOrder};
use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An ordered container implemented using a splay tree.
///
/// A splay tree maintains no persistent balance property, only binary search
/// tree ordering. Instead it rebalances opportunistically: every touched node
/// is rotated to the root, so recently accessed elements are quick to access
/// again and all operations take `O(log n)` amortized time over any sequence.
///
/// Immediately after an operation returns, the most recently inserted, found,
/// or deleted-and-adjacent node is the root. Lookups therefore take
/// `&mut self`.
///
/// # Examples
///
/// ```
/// use balanced_collections::splay_tree::SplayTree;
///
/// let mut tree = SplayTree::new();
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
pub struct SplayTree<T, C = NaturalOrder> {
    root: Link<T>,
    len: usize,
    cmp: C,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> SplayTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `SplayTree<T>` ordered by the `Ord`
    /// implementation of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let tree: SplayTree<u32> = SplayTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> SplayTree<T, C> {
    /// Constructs a new, empty `SplayTree<T, C>` that places elements
    /// according to `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::compare::FnComparator;
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::with_comparator(FnComparator(|lhs: &u32, rhs: &u32| {
    ///     rhs.cmp(lhs)
    /// }));
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        SplayTree {
            root: None,
            len: 0,
            cmp,
            marker: PhantomData,
        }
    }

    /// Inserts an element into the tree if no stored element compares equal
    /// to it, and splays the inserted node to the root. Returns `true` on
    /// insertion; on a duplicate the stored payload is kept, the existing
    /// node is splayed to the root, and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
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
                    Ordering::Equal => {
                        self.splay(node);
                        return false;
                    },
                }
            }

            let new_node = Node::new(element, parent.map(|(node, _)| node));
            match parent {
                None => self.root = Some(new_node),
                Some((mut parent, Ordering::Less)) => parent.as_mut().left = Some(new_node),
                Some((mut parent, _)) => parent.as_mut().right = Some(new_node),
            }
            self.len += 1;
            self.splay(new_node);
            true
        }
    }

    /// Removes the element comparing equal to `element`, if it exists.
    /// Returns whether a removal occurred.
    ///
    /// A successful removal leaves an in-order neighbor of the removed
    /// element at the root; removing an absent key is a no-op that leaves the
    /// tree splayed to the last node visited during the failed descent.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, element: &T) -> bool
    where
        C: Comparator<T>,
    {
        unsafe {
            match self.find_and_splay(element) {
                Some(_) => {
                    self.remove_root();
                    true
                },
                None => false,
            }
        }
    }

    /// Checks if an element comparing equal to `element` exists in the tree,
    /// splaying the last node touched to the root either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&mut self, element: &T) -> bool
    where
        C: Comparator<T>,
    {
        unsafe { self.find_and_splay(element).is_some() }
    }

    /// Checks for `element` by descending with the tree's ordering, but
    /// decides existence with `eq` instead of order-derived equality. Splays
    /// like [`contains`].
    ///
    /// [`contains`]: SplayTree::contains
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::compare::FnComparator;
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::with_comparator(FnComparator(
    ///     |lhs: &(u32, &str), rhs: &(u32, &str)| lhs.0.cmp(&rhs.0),
    /// ));
    /// tree.insert((1, "one"));
    ///
    /// assert!(tree.contains_with(&(1, "two"), |stored, probe| stored.0 == probe.0));
    /// assert!(!tree.contains_with(&(1, "two"), |stored, probe| stored.1 == probe.1));
    /// ```
    pub fn contains_with<F>(&mut self, element: &T, mut eq: F) -> bool
    where
        C: Comparator<T>,
        F: FnMut(&T, &T) -> bool,
    {
        unsafe {
            self.find_and_splay(element)
                .map_or(false, |node| eq(&node.as_ref().element, element))
        }
    }

    /// Removes every element for which the predicate holds. Returns `true`
    /// iff at least one element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
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
            // Splaying relocates the remaining nodes but never frees or
            // repurposes them, so the collected pointers stay valid.
            for node in doomed {
                self.splay(node);
                self.remove_root();
            }
            removed
        }
    }

    /// Removes each of `items`, one by one. Returns whether the tree changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
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
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
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
            for node in doomed {
                self.splay(node);
                self.remove_root();
            }
            removed
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
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
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let tree: SplayTree<u32> = SplayTree::new();
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
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
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
    /// the tree's comparator. Note that iteration does not splay the tree in
    /// order to use a non-mutable reference.
    ///
    /// The walk is restartable and descends the live structure; it is not a
    /// snapshot, so a tree mutated between two full iterations yields
    /// different results.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayTreeIter<'_, T> {
        self.traverse(TraversalOrder::InOrder)
    }

    /// Returns an iterator over the tree that visits nodes in the requested
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::splay_tree::SplayTree;
    /// use balanced_collections::TraversalOrder;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(5);
    /// tree.insert(3);
    /// tree.insert(8);
    ///
    /// let pre_order = tree.traverse(TraversalOrder::PreOrder);
    /// assert_eq!(pre_order.collect::<Vec<&u32>>(), vec![&8, &5, &3]);
    /// ```
    pub fn traverse(&self, order: TraversalOrder) -> SplayTreeIter<'_, T> {
        SplayTreeIter {
            raw: unsafe { RawIter::new(self.root, order) },
            marker: PhantomData,
        }
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

    /// Rotates `node` one level up, above its parent.
    unsafe fn rotate_up(&mut self, node: NonNull<Node<T>>) {
        let parent = node
            .as_ref()
            .parent
            .expect("Expected a rotated node to have a parent.");
        if parent.as_ref().left == Some(node) {
            self.rotate_right(parent);
        } else {
            self.rotate_left(parent);
        }
    }

    /// Moves `node` to the root with zig, zig-zig, and zig-zag rotation
    /// steps.
    ///
    /// Also correct on a detached subtree whose root is about to become the
    /// tree root: the final rotation reattaches through `self.root`.
    unsafe fn splay(&mut self, node: NonNull<Node<T>>) {
        while let Some(parent) = node.as_ref().parent {
            match parent.as_ref().parent {
                // Zig: the parent is the root.
                None => self.rotate_up(node),
                Some(grandparent) => {
                    let node_is_left = parent.as_ref().left == Some(node);
                    let parent_is_left = grandparent.as_ref().left == Some(parent);
                    if node_is_left == parent_is_left {
                        // Zig-zig: rotate the parent first, then the node.
                        self.rotate_up(parent);
                        self.rotate_up(node);
                    } else {
                        // Zig-zag: two rotations at the node.
                        self.rotate_up(node);
                        self.rotate_up(node);
                    }
                },
            }
        }
    }

    /// Descends by comparison. On success the found node is splayed to the
    /// root and returned; on failure the last node visited is splayed
    /// instead, which is what gives the structure its amortized bound
    /// without any balance bookkeeping.
    unsafe fn find_and_splay(&mut self, element: &T) -> Link<T>
    where
        C: Comparator<T>,
    {
        let mut last = None;
        let mut curr = self.root;
        while let Some(node) = curr {
            last = Some(node);
            match self.cmp.compare(element, &node.as_ref().element) {
                Ordering::Less => curr = node.as_ref().left,
                Ordering::Greater => curr = node.as_ref().right,
                Ordering::Equal => {
                    self.splay(node);
                    return Some(node);
                },
            }
        }
        if let Some(node) = last {
            self.splay(node);
        }
        None
    }

    /// Unlinks the root and joins its subtrees: the maximum of the left
    /// subtree is splayed to that subtree's root and adopts the right subtree
    /// as its right child.
    unsafe fn remove_root(&mut self) -> T {
        let root = self.root.take().expect("Expected a non-empty tree.");
        let left = root.as_ref().left;
        let right = root.as_ref().right;
        if let Some(mut left) = left {
            left.as_mut().parent = None;
        }
        if let Some(mut right) = right {
            right.as_mut().parent = None;
        }

        match left {
            None => self.root = right,
            Some(left) => {
                let mut predecessor = traverse::rightmost(left);
                self.root = Some(left);
                self.splay(predecessor);
                predecessor.as_mut().right = right;
                if let Some(mut right) = right {
                    right.as_mut().parent = Some(predecessor);
                }
            },
        }

        self.len -= 1;
        Box::from_raw(root.as_ptr()).element
    }
}

impl<T, C> OrderedContainer<T> for SplayTree<T, C>
where
    C: Comparator<T>,
{
    fn insert(&mut self, element: T) -> bool {
        SplayTree::insert(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        SplayTree::remove(self, element)
    }

    fn contains(&mut self, element: &T) -> bool {
        SplayTree::contains(self, element)
    }

    fn contains_with<F>(&mut self, element: &T, eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        SplayTree::contains_with(self, element, eq)
    }

    fn remove_if<F>(&mut self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        SplayTree::remove_if(self, predicate)
    }

    fn retain_all(&mut self, items: &[T]) -> bool {
        SplayTree::retain_all(self, items)
    }

    fn len(&self) -> usize {
        SplayTree::len(self)
    }

    fn clear(&mut self) {
        SplayTree::clear(self)
    }
}

impl<T, C> Drop for SplayTree<T, C> {
    fn drop(&mut self) {
        unsafe {
            traverse::drop_subtree(self.root.take());
        }
    }
}

impl<T, C> Default for SplayTree<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> fmt::Debug for SplayTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for SplayTree<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

unsafe impl<T, C> Send for SplayTree<T, C>
where
    T: Send,
    C: Send,
{
}

unsafe impl<T, C> Sync for SplayTree<T, C>
where
    T: Sync,
    C: Sync,
{
}

impl<T, C> IntoIterator for SplayTree<T, C> {
    type IntoIter = SplayTreeIntoIter<T, C>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        SplayTreeIntoIter { tree: self }
    }
}

impl<'a, T, C> IntoIterator for &'a SplayTree<T, C>
where
    T: 'a,
{
    type IntoIter = SplayTreeIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SplayTree<T, C>`.
///
/// This iterator yields owned elements in ascending order, unlinking nodes
/// one at a time as it advances.
pub struct SplayTreeIntoIter<T, C = NaturalOrder> {
    tree: SplayTree<T, C>,
}

impl<T, C> Iterator for SplayTreeIntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            let node = traverse::detach_leftmost(&mut self.tree.root)?;
            self.tree.len -= 1;
            Some(Box::from_raw(node.as_ptr()).element)
        }
    }
}

/// An iterator for `SplayTree<T, C>`.
///
/// This iterator yields immutable references in the traversal order it was
/// created with.
pub struct SplayTreeIter<'a, T> {
    raw: RawIter<Node<T>>,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for SplayTreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe { self.raw.next().map(|node| &(*node.as_ptr()).element) }
    }
}

impl<T, C> Serialize for SplayTree<T, C>
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

impl<'de, T, C> Deserialize<'de> for SplayTree<T, C>
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
            type Value = SplayTree<T, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut tree = SplayTree::with_comparator(C::default());
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
impl<T, C> SplayTree<T, C>
where
    C: Comparator<T>,
{
    fn root_element(&self) -> Option<&T> {
        unsafe { self.root.map(|node| &(*node.as_ptr()).element) }
    }

    fn assert_invariants(&self) {
        unsafe fn check_node<T>(link: Link<T>, parent: Link<T>) {
            if let Some(node) = link {
                assert_eq!(node.as_ref().parent, parent, "corrupted parent link");
                check_node(node.as_ref().left, link);
                check_node(node.as_ref().right, link);
            }
        }

        unsafe {
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
    use super::SplayTree;
    use crate::compare::FnComparator;
    use crate::traverse::TraversalOrder;
    use rand::Rng;
    use serde_test::{assert_tokens, Token};
    use std::collections::BTreeSet;

    #[test]
    fn test_len_empty() {
        let tree: SplayTree<u32> = SplayTree::new();
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let tree: SplayTree<u32> = SplayTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert() {
        let mut tree = SplayTree::new();
        assert!(tree.insert(1));
        assert!(tree.contains(&1));
        assert_eq!(tree.root_element(), Some(&1));
        tree.assert_invariants();
    }

    #[test]
    fn test_insert_splays_to_root() {
        let mut tree = SplayTree::new();
        for element in &[5, 3, 8] {
            assert!(tree.insert(*element));
            assert_eq!(tree.root_element(), Some(element));
            tree.assert_invariants();
        }
    }

    #[test]
    fn test_insert_duplicate_splays_existing() {
        let mut tree = SplayTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);

        assert!(!tree.insert(1));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root_element(), Some(&1));
        tree.assert_invariants();
    }

    #[test]
    fn test_search_splays_found_node() {
        let mut tree = SplayTree::new();
        for element in &[5, 3, 8] {
            tree.insert(*element);
        }

        assert!(tree.contains(&3));
        assert_eq!(tree.root_element(), Some(&3));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &5, &8]);
        tree.assert_invariants();
    }

    #[test]
    fn test_failed_search_splays_last_visited() {
        let mut tree = SplayTree::new();
        for element in &[5, 3, 8] {
            tree.insert(*element);
        }

        // Inserting 5, 3, 8 leaves a left chain 8 -> 5 -> 3, so the descent
        // for 7 falls off the tree at 5.
        assert!(!tree.contains(&7));
        assert_eq!(tree.root_element(), Some(&5));
        tree.assert_invariants();
    }

    #[test]
    fn test_remove() {
        let mut tree = SplayTree::new();
        tree.insert(1);
        assert!(tree.remove(&1));
        assert!(!tree.contains(&1));
        assert_eq!(tree.len(), 0);
        tree.assert_invariants();
    }

    #[test]
    fn test_remove_joins_subtrees() {
        let mut tree = SplayTree::new();
        for element in &[50, 30, 70, 20, 40, 60, 80] {
            tree.insert(*element);
        }

        assert!(tree.remove(&50));
        // The predecessor of the removed root becomes the new root.
        assert_eq!(tree.root_element(), Some(&40));
        assert_eq!(
            tree.iter().collect::<Vec<&u32>>(),
            vec![&20, &30, &40, &60, &70, &80],
        );
        tree.assert_invariants();
    }

    #[test]
    fn test_remove_absent_splays_last_visited() {
        let mut tree = SplayTree::new();
        for element in &[5, 3, 8] {
            tree.insert(*element);
        }

        assert!(!tree.remove(&7));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root_element(), Some(&5));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &5, &8]);
    }

    #[test]
    fn test_remove_minimum() {
        let mut tree = SplayTree::new();
        for element in &[5, 3, 8] {
            tree.insert(*element);
        }

        assert!(tree.remove(&3));
        assert_eq!(tree.root_element(), Some(&5));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&5, &8]);
        tree.assert_invariants();
    }

    #[test]
    fn test_contains_with() {
        let mut tree = SplayTree::with_comparator(FnComparator(
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
        let mut tree = SplayTree::new();
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
        let mut tree = SplayTree::new();
        for element in 1..=5 {
            tree.insert(element);
        }

        assert!(tree.remove_all(&[1, 2, 8]));
        assert!(!tree.remove_all(&[1, 2, 8]));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &4, &5]);
    }

    #[test]
    fn test_retain_all() {
        let mut tree = SplayTree::new();
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
        let mut tree = SplayTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_traversal_orders() {
        let mut tree = SplayTree::new();
        for element in &[5, 3, 8] {
            tree.insert(*element);
        }

        // Inserting 5, 3, 8 leaves a left chain 8 -> 5 -> 3.
        assert_eq!(
            tree.traverse(TraversalOrder::InOrder).collect::<Vec<&u32>>(),
            vec![&3, &5, &8],
        );
        assert_eq!(
            tree.traverse(TraversalOrder::PreOrder).collect::<Vec<&u32>>(),
            vec![&8, &5, &3],
        );
        assert_eq!(
            tree.traverse(TraversalOrder::PostOrder).collect::<Vec<&u32>>(),
            vec![&3, &5, &8],
        );
    }

    #[test]
    fn test_comparator() {
        let mut tree =
            SplayTree::with_comparator(FnComparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs)));
        for element in 1..=5 {
            tree.insert(element);
        }
        tree.assert_invariants();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&5, &4, &3, &2, &1]);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = SplayTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut tree = SplayTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_partial_eq() {
        let mut lhs = SplayTree::new();
        let mut rhs = SplayTree::new();
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
        let mut tree: SplayTree<u32> = SplayTree::new();
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
        let mut tree = SplayTree::new();
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
