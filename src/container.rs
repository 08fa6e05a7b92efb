/// The operation set shared by every ordered tree strategy in this crate.
///
/// Both [`RedBlackTree`] and [`SplayTree`] implement this trait, so a
/// collaborator can pick a balancing strategy once at construction time and
/// program against the common contract. Duplicate inserts and absent-key
/// removals are expected, non-exceptional outcomes communicated by boolean
/// return values; no operation panics on them and no operation is ever left
/// partially applied.
///
/// `contains` takes `&mut self` because the splay strategy relocates the
/// touched node to the root as a side effect of every lookup.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackTree;
/// use balanced_collections::splay_tree::SplayTree;
/// use balanced_collections::OrderedContainer;
///
/// fn fill<C: OrderedContainer<u32>>(container: &mut C) {
///     for element in &[3, 1, 2] {
///         container.insert(*element);
///     }
///     assert_eq!(container.len(), 3);
///     assert!(container.contains(&2));
/// }
///
/// fill(&mut RedBlackTree::new());
/// fill(&mut SplayTree::new());
/// ```
///
/// [`RedBlackTree`]: crate::red_black_tree::RedBlackTree
/// [`SplayTree`]: crate::splay_tree::SplayTree
pub trait OrderedContainer<T> {
    /// Inserts an element if no stored element compares equal to it. Returns
    /// `true` on insertion and `false` on a duplicate, in which case the
    /// stored payload is not replaced.
    fn insert(&mut self, element: T) -> bool;

    /// Removes the element comparing equal to `element`, if present. Returns
    /// whether a removal occurred.
    fn remove(&mut self, element: &T) -> bool;

    /// Checks whether an element comparing equal to `element` is stored.
    fn contains(&mut self, element: &T) -> bool;

    /// Checks for `element` by descending with the container's ordering, but
    /// decides existence with the caller-supplied equality function instead
    /// of order-derived equality.
    fn contains_with<F>(&mut self, element: &T, eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool;

    /// Removes every element for which the predicate holds. Returns `true`
    /// iff at least one element was removed.
    fn remove_if<F>(&mut self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool;

    /// Removes every element that does not compare equal to one of `items`.
    /// Returns whether the container changed.
    fn retain_all(&mut self, items: &[T]) -> bool;

    /// Returns the number of stored elements.
    fn len(&self) -> usize;

    /// Removes all elements.
    fn clear(&mut self);

    /// Returns `true` if no elements are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes each of `items`, one by one. Returns whether the container
    /// changed.
    fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut removed = false;
        for item in items {
            removed |= self.remove(item);
        }
        removed
    }
}
