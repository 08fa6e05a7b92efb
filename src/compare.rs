use std::cmp::Ordering;

/// A total ordering over elements of type `T`.
///
/// A comparator is supplied once at construction and used for every
/// structural placement in a tree. An `Ordering::Equal` result is treated as
/// key equality, so no two stored elements may ever compare equal. The
/// comparator must be a strict total order; inconsistent comparisons are not
/// checked at runtime and leave the tree in an unspecified state.
pub trait Comparator<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// A comparator that delegates to the `Ord` implementation of the element
/// type.
///
/// # Examples
///
/// ```
/// use balanced_collections::compare::{Comparator, NaturalOrder};
/// use std::cmp::Ordering;
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// An adapter that lets a plain function or closure serve as a comparator.
///
/// # Examples
///
/// ```
/// use balanced_collections::compare::{Comparator, FnComparator};
/// use std::cmp::Ordering;
///
/// let reverse = FnComparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
/// assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnComparator<F>(pub F);

impl<T, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        (self.0)(lhs, rhs)
    }
}
