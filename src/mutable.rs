use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut, Range};

use crate::capability::{Clear, Sequence, SequenceMut, SequenceStorage, SetStorage};
use crate::category::{Operand, ValueCategory};
use crate::contract;
use crate::error::ContractViolation;

/// Explicit opt-in to in-place pipelines over a caller-owned container.
///
/// Produced by the `mutate` stage from an exclusive borrow (`&mut container | mutate()`).
/// Temporaries and shared borrows cannot be wrapped: there is no impl to select.
///
/// Every stage applied to a `Mutable` acts on the wrapped container immediately, and editing
/// stages hand the wrapper back so the chain can continue. The wrapper owns no storage.
///
/// ```
/// use collection_pipes::ops::{mutate, sorted, pushed_back};
///
/// let mut v = vec![3, 1, 2];
/// let _ = &mut v | mutate() | pushed_back(0) | sorted();
/// assert_eq!(v, vec![0, 1, 2, 3]);
/// ```
pub struct Mutable<'a, C: ?Sized> {
    inner: &'a mut C,
}

impl<'a, C: ?Sized> Mutable<'a, C> {
    pub fn new(target: &'a mut C) -> Self {
        Self { inner: target }
    }

    pub fn get_ref(&self) -> &C {
        &*self.inner
    }

    pub fn get_mut(&mut self) -> &mut C {
        &mut *self.inner
    }

    /// The wrapped borrow, for its full lifetime.
    pub fn into_inner(self) -> &'a mut C {
        self.inner
    }

    /// A shorter-lived wrapper over the same container, leaving `self` usable afterwards.
    pub fn reborrow(&mut self) -> Mutable<'_, C> {
        Mutable {
            inner: &mut *self.inner,
        }
    }
}

impl<C> Mutable<'_, C> {
    /// Exchange contents with `other`.
    pub fn swap_with(&mut self, other: &mut C) {
        mem::swap(&mut *self.inner, other)
    }
}

impl<C: Clear + ?Sized> Mutable<'_, C> {
    pub fn clear(&mut self) {
        self.inner.clear()
    }
}

impl<C: Sequence + ?Sized> Mutable<'_, C> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn front(&self) -> Option<&C::Item> {
        self.inner.front()
    }

    pub fn back(&self) -> Option<&C::Item> {
        self.inner.back()
    }

    pub fn at(&self, index: usize) -> Option<&C::Item> {
        self.inner.at(index)
    }

    pub fn iter(&self) -> C::Iter<'_> {
        C::iter(&*self.inner)
    }
}

impl<C: SequenceMut + ?Sized> Mutable<'_, C> {
    pub fn front_mut(&mut self) -> Option<&mut C::Item> {
        self.inner.front_mut()
    }

    pub fn back_mut(&mut self) -> Option<&mut C::Item> {
        self.inner.back_mut()
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        self.inner.at_mut(index)
    }

    pub fn iter_mut(&mut self) -> C::IterMut<'_> {
        C::iter_mut(&mut *self.inner)
    }
}

impl<C: SequenceStorage + ?Sized> Mutable<'_, C> {
    pub fn push_back(&mut self, value: C::Item) {
        self.inner.push_back(value)
    }

    pub fn push_front(&mut self, value: C::Item) {
        self.inner.push_front(value)
    }

    pub fn pop_back(&mut self) -> Option<C::Item> {
        self.inner.pop_back()
    }

    pub fn pop_front(&mut self) -> Option<C::Item> {
        self.inner.pop_front()
    }

    /// Insert before `index`. An index past the end is fatal.
    pub fn insert(&mut self, index: usize, value: C::Item) {
        let len = self.inner.len();
        if index > len {
            contract::fail(ContractViolation::IndexOutOfRange {
                operation: "Mutable::insert",
                index,
                len,
            });
        }
        self.inner.insert_at(index, value)
    }

    /// Append every item of `items`, in order.
    pub fn extend_back<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = C::Item>,
    {
        for value in items {
            self.inner.push_back(value);
        }
    }

    /// Prepend `items`, keeping their relative order.
    pub fn extend_front<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = C::Item>,
    {
        for (index, value) in items.into_iter().enumerate() {
            self.inner.insert_at(index, value);
        }
    }

    /// Remove and return the element at `index`, or `None` past the end.
    pub fn remove(&mut self, index: usize) -> Option<C::Item> {
        self.inner.remove_at(index)
    }

    /// Remove `range`. Bounds past the end are reported and clamped.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let len = self.inner.len();
        let in_bounds = range.start <= range.end && range.end <= len;
        let range = if contract::check(in_bounds, || ContractViolation::OffsetOutOfRange {
            operation: "Mutable::remove_range",
            offset: range.end.max(range.start),
            len,
        }) {
            range
        } else {
            let end = range.end.min(len);
            range.start.min(end)..end
        };
        self.inner.remove_range(range)
    }

    pub fn truncate(&mut self, len: usize) {
        self.inner.truncate(len)
    }

    /// Grow with clones of `value` or shrink to `len`.
    pub fn resize(&mut self, len: usize, value: C::Item)
    where
        C::Item: Clone,
    {
        self.resize_with(len, || value.clone())
    }

    /// Grow with values from `fill` or shrink to `len`.
    pub fn resize_with<F>(&mut self, len: usize, mut fill: F)
    where
        F: FnMut() -> C::Item,
    {
        let current = self.inner.len();
        if len <= current {
            self.inner.truncate(len);
            return;
        }
        self.inner.reserve(len - current);
        for _ in current..len {
            self.inner.push_back(fill());
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.inner.reserve(additional)
    }

    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit()
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&C::Item) -> bool,
    {
        self.inner.retain(keep)
    }
}

impl<C: SetStorage + ?Sized> Mutable<'_, C> {
    pub fn insert_value(&mut self, value: C::Item) -> bool {
        self.inner.insert_value(value)
    }

    pub fn remove_value(&mut self, value: &C::Item) -> bool {
        self.inner.remove_value(value)
    }
}

impl<C: Sequence + ?Sized> Index<usize> for Mutable<'_, C> {
    type Output = C::Item;

    fn index(&self, index: usize) -> &C::Item {
        match self.inner.at(index) {
            Some(item) => item,
            None => contract::fail(ContractViolation::IndexOutOfRange {
                operation: "Mutable::index",
                index,
                len: self.inner.len(),
            }),
        }
    }
}

impl<C: SequenceMut + ?Sized> IndexMut<usize> for Mutable<'_, C> {
    fn index_mut(&mut self, index: usize) -> &mut C::Item {
        let len = self.inner.len();
        match self.inner.at_mut(index) {
            Some(item) => item,
            None => contract::fail(ContractViolation::IndexOutOfRange {
                operation: "Mutable::index_mut",
                index,
                len,
            }),
        }
    }
}

impl<C: ?Sized> Operand for Mutable<'_, C> {
    const CATEGORY: ValueCategory = ValueCategory::Wrapped;
}

impl<C: fmt::Debug + ?Sized> fmt::Debug for Mutable<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mutable").field(&self.inner).finish()
    }
}

/// Which end an [`Inserter`] appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Back,
    /// Each item goes to the front, so a batch ends up reversed.
    Front,
}

/// Insertion handle from the `back_inserter` / `front_inserter` stages.
pub struct Inserter<'a, C: ?Sized> {
    target: &'a mut C,
    position: InsertPosition,
}

impl<'a, C: SequenceStorage + ?Sized> Inserter<'a, C> {
    pub(crate) fn new(target: &'a mut C, position: InsertPosition) -> Self {
        Self { target, position }
    }

    pub fn position(&self) -> InsertPosition {
        self.position
    }

    pub fn push(&mut self, value: C::Item) {
        match self.position {
            InsertPosition::Back => self.target.push_back(value),
            InsertPosition::Front => self.target.push_front(value),
        }
    }

    /// Back to a [`Mutable`] over the same container.
    pub fn into_mutable(self) -> Mutable<'a, C> {
        Mutable::new(self.target)
    }
}

impl<C: SequenceStorage + ?Sized> Extend<C::Item> for Inserter<'_, C> {
    fn extend<I: IntoIterator<Item = C::Item>>(&mut self, items: I) {
        for value in items {
            self.push(value);
        }
    }
}

impl<C: ?Sized> fmt::Debug for Inserter<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inserter")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, LinkedList, VecDeque};

    use super::{InsertPosition, Inserter, Mutable};

    #[test]
    fn edits_are_visible_on_the_wrapped_container() {
        let mut v = vec![1, 2, 3];
        {
            let mut m = Mutable::new(&mut v);
            m.push_back(4);
            assert_eq!(m.remove(0), Some(1));
        }
        assert_eq!(v, vec![2, 3, 4]);
    }

    #[test]
    fn front_and_range_edits_on_a_deque() {
        let mut d: VecDeque<i32> = (1..=6).collect();
        let mut m = Mutable::new(&mut d);
        m.extend_front([-1, 0]);
        m.remove_range(1..3);
        m.truncate(4);
        assert_eq!(m.iter().copied().collect::<Vec<_>>(), vec![-1, 2, 3, 4]);
        m[0] = 7;
        assert_eq!(m.front(), Some(&7));
        assert_eq!(m[3], 4);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut l: LinkedList<u8> = LinkedList::new();
        let mut m = Mutable::new(&mut l);
        m.resize(3, 9);
        m.resize_with(4, || 1);
        assert_eq!(m.iter().copied().collect::<Vec<_>>(), vec![9, 9, 9, 1]);
        m.resize(1, 0);
        assert_eq!(m.len(), 1);
        m.clear();
        assert!(m.is_empty());
    }

    #[test]
    fn swap_and_reborrow() {
        let mut v = vec![1];
        let mut other = vec![5, 6];
        let mut m = Mutable::new(&mut v);
        m.reborrow().push_back(2);
        m.swap_with(&mut other);
        assert_eq!(m.get_ref(), &vec![5, 6]);
        assert_eq!(other, vec![1, 2]);
    }

    #[test]
    fn set_surface() {
        let mut s = BTreeSet::from([1, 2]);
        let mut m = Mutable::new(&mut s);
        assert!(m.insert_value(3));
        assert!(m.remove_value(&1));
        assert_eq!(s, BTreeSet::from([2, 3]));
    }

    #[test]
    fn inserters_extend_either_end() {
        let mut v = vec![0];
        let mut back = Inserter::new(&mut v, InsertPosition::Back);
        back.extend([1, 2]);
        let mut front = Inserter::new(back.into_mutable().into_inner(), InsertPosition::Front);
        front.extend([-1, -2]);
        assert_eq!(v, vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "Mutable::insert: index 5 is out of range for length 1")]
    fn insert_past_the_end_is_fatal() {
        let mut v = vec![1];
        Mutable::new(&mut v).insert(5, 0);
    }
}
