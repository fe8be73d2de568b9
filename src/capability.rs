//! Container capabilities the pipeline operations are written against.
//!
//! Operations never name a concrete container. They ask for the smallest capability they need:
//!
//! | capability | what it adds | implemented by |
//! |---|---|---|
//! | [`Sequence`] | ordered read access | slices, arrays, `Vec`, `VecDeque`, `LinkedList`, `HashSet`, `BTreeSet`, views |
//! | [`SequenceMut`] | element writes | slices, arrays, `Vec`, `VecDeque`, `LinkedList`, mutable views |
//! | [`ContiguousMut`] | a mutable slice over all elements | slices, arrays, `Vec`, `VecDeque`, `SubRangeMut` |
//! | [`SortInPlace`] | reorder in place | contiguous containers, `LinkedList`, `SubRangeMut` |
//! | [`SequenceStorage`] | grow and shrink | `Vec`, `VecDeque`, `LinkedList` |
//! | [`SetStorage`] | insert and remove by value | `HashSet`, `BTreeSet` |
//!
//! Shared and exclusive references forward [`Sequence`] (and [`SequenceMut`] for `&mut`), which is
//! what lets views hold either a borrowed container or another view as their source.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::collections::{btree_set, hash_set, linked_list, vec_deque};
use std::hash::{BuildHasher, Hash};
use std::mem;
use std::ops::Range;
use std::slice;

/// Ordered, read-only element access.
pub trait Sequence {
    type Item;
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn front(&self) -> Option<&Self::Item> {
        self.iter().next()
    }

    fn back(&self) -> Option<&Self::Item> {
        self.iter().last()
    }

    /// Element at `index` in iteration order.
    fn at(&self, index: usize) -> Option<&Self::Item> {
        self.iter().nth(index)
    }

    /// Index of the first element for which `pred` fails, assuming the sequence is partitioned
    /// by `pred`. Linear by default; random-access containers binary search.
    fn partition_point<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().take_while(|item| pred(item)).count()
    }
}

/// In-place element writes. The element count never changes through this trait.
pub trait SequenceMut: Sequence {
    type IterMut<'a>: Iterator<Item = &'a mut Self::Item>
    where
        Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_>;

    fn front_mut(&mut self) -> Option<&mut Self::Item> {
        self.iter_mut().next()
    }

    fn back_mut(&mut self) -> Option<&mut Self::Item> {
        self.iter_mut().last()
    }

    fn at_mut(&mut self, index: usize) -> Option<&mut Self::Item> {
        self.iter_mut().nth(index)
    }
}

/// Containers that can expose all of their elements as one mutable slice.
pub trait ContiguousMut: SequenceMut {
    fn as_mut_slice(&mut self) -> &mut [Self::Item];
}

/// Reordering without changing the element count.
pub trait SortInPlace: Sequence {
    /// Stable sort.
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering;

    fn reverse(&mut self);

    /// Rotate so the element at `mid` becomes the first. Requires `mid <= len`.
    fn rotate_left(&mut self, mid: usize);
}

/// Removes every element.
pub trait Clear {
    fn clear(&mut self);
}

/// Sequences that own their storage and can grow or shrink at either end or in the middle.
///
/// Index arguments are trusted; callers validate them first.
pub trait SequenceStorage: SequenceMut + Clear {
    fn push_back(&mut self, value: Self::Item);

    fn push_front(&mut self, value: Self::Item);

    fn pop_back(&mut self) -> Option<Self::Item>;

    fn pop_front(&mut self) -> Option<Self::Item>;

    /// Insert before `index`. Requires `index <= len`.
    fn insert_at(&mut self, index: usize, value: Self::Item);

    fn remove_at(&mut self, index: usize) -> Option<Self::Item>;

    /// Requires `range.start <= range.end <= len`.
    fn remove_range(&mut self, range: Range<usize>);

    fn truncate(&mut self, len: usize);

    /// Capacity hint. No-op for node-based storage.
    fn reserve(&mut self, _additional: usize) {}

    /// Capacity hint. No-op for node-based storage.
    fn shrink_to_fit(&mut self) {}

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Self::Item) -> bool;

    /// Drop consecutive elements for which `same(current, previous_kept)` holds.
    fn dedup_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        let mut kept: Vec<Self::Item> = Vec::with_capacity(self.len());
        while let Some(value) = self.pop_front() {
            if kept.last().is_none_or(|last| !same(&value, last)) {
                kept.push(value);
            }
        }
        for value in kept {
            self.push_back(value);
        }
    }
}

/// Sets: insertion and removal by value.
pub trait SetStorage: Sequence + Clear {
    /// Returns `false` when the value was already present.
    fn insert_value(&mut self, value: Self::Item) -> bool;

    /// Returns `false` when the value was absent.
    fn remove_value(&mut self, value: &Self::Item) -> bool;
}

// References

impl<'r, C: Sequence + ?Sized> Sequence for &'r C {
    type Item = C::Item;
    type Iter<'a>
        = C::Iter<'a>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        C::iter(&**self)
    }

    fn len(&self) -> usize {
        C::len(&**self)
    }

    fn front(&self) -> Option<&C::Item> {
        C::front(&**self)
    }

    fn back(&self) -> Option<&C::Item> {
        C::back(&**self)
    }

    fn at(&self, index: usize) -> Option<&C::Item> {
        C::at(&**self, index)
    }

    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: FnMut(&C::Item) -> bool,
    {
        C::partition_point(&**self, pred)
    }
}

impl<'r, C: Sequence + ?Sized> Sequence for &'r mut C {
    type Item = C::Item;
    type Iter<'a>
        = C::Iter<'a>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        C::iter(&**self)
    }

    fn len(&self) -> usize {
        C::len(&**self)
    }

    fn front(&self) -> Option<&C::Item> {
        C::front(&**self)
    }

    fn back(&self) -> Option<&C::Item> {
        C::back(&**self)
    }

    fn at(&self, index: usize) -> Option<&C::Item> {
        C::at(&**self, index)
    }

    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: FnMut(&C::Item) -> bool,
    {
        C::partition_point(&**self, pred)
    }
}

impl<'r, C: SequenceMut + ?Sized> SequenceMut for &'r mut C {
    type IterMut<'a>
        = C::IterMut<'a>
    where
        Self: 'a;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        C::iter_mut(&mut **self)
    }

    fn front_mut(&mut self) -> Option<&mut C::Item> {
        C::front_mut(&mut **self)
    }

    fn back_mut(&mut self) -> Option<&mut C::Item> {
        C::back_mut(&mut **self)
    }

    fn at_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        C::at_mut(&mut **self, index)
    }
}

// Slices, arrays and vectors share the slice algorithms.

macro_rules! slice_backed {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> Sequence for $ty {
            type Item = T;
            type Iter<'a>
                = slice::Iter<'a, T>
            where
                Self: 'a;

            fn iter(&self) -> slice::Iter<'_, T> {
                <[T]>::iter(self)
            }

            fn len(&self) -> usize {
                <[T]>::len(self)
            }

            fn front(&self) -> Option<&T> {
                <[T]>::first(self)
            }

            fn back(&self) -> Option<&T> {
                <[T]>::last(self)
            }

            fn at(&self, index: usize) -> Option<&T> {
                <[T]>::get(self, index)
            }

            fn partition_point<P>(&self, pred: P) -> usize
            where
                P: FnMut(&T) -> bool,
            {
                <[T]>::partition_point(self, pred)
            }
        }

        impl<$($generics)*> SequenceMut for $ty {
            type IterMut<'a>
                = slice::IterMut<'a, T>
            where
                Self: 'a;

            fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
                <[T]>::iter_mut(self)
            }

            fn front_mut(&mut self) -> Option<&mut T> {
                <[T]>::first_mut(self)
            }

            fn back_mut(&mut self) -> Option<&mut T> {
                <[T]>::last_mut(self)
            }

            fn at_mut(&mut self, index: usize) -> Option<&mut T> {
                <[T]>::get_mut(self, index)
            }
        }

        impl<$($generics)*> ContiguousMut for $ty {
            fn as_mut_slice(&mut self) -> &mut [T] {
                &mut self[..]
            }
        }

        impl<$($generics)*> SortInPlace for $ty {
            fn sort_by<F>(&mut self, compare: F)
            where
                F: FnMut(&T, &T) -> Ordering,
            {
                <[T]>::sort_by(self, compare)
            }

            fn reverse(&mut self) {
                <[T]>::reverse(self)
            }

            fn rotate_left(&mut self, mid: usize) {
                <[T]>::rotate_left(self, mid)
            }
        }
    };
}

slice_backed!([T] [T]);
slice_backed!([T] Vec<T>);
slice_backed!([T, const N: usize] [T; N]);

impl<T> Clear for Vec<T> {
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

impl<T> SequenceStorage for Vec<T> {
    fn push_back(&mut self, value: T) {
        Vec::push(self, value)
    }

    fn push_front(&mut self, value: T) {
        Vec::insert(self, 0, value)
    }

    fn pop_back(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn pop_front(&mut self) -> Option<T> {
        if Vec::is_empty(self) {
            None
        } else {
            Some(Vec::remove(self, 0))
        }
    }

    fn insert_at(&mut self, index: usize, value: T) {
        Vec::insert(self, index, value)
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < Vec::len(self)).then(|| Vec::remove(self, index))
    }

    fn remove_range(&mut self, range: Range<usize>) {
        Vec::drain(self, range);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len)
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional)
    }

    fn shrink_to_fit(&mut self) {
        Vec::shrink_to_fit(self)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        Vec::retain(self, keep)
    }

    fn dedup_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        Vec::dedup_by(self, |current, previous| same(&*current, &*previous))
    }
}

// VecDeque

impl<T> Sequence for VecDeque<T> {
    type Item = T;
    type Iter<'a>
        = vec_deque::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> vec_deque::Iter<'_, T> {
        VecDeque::iter(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn front(&self) -> Option<&T> {
        VecDeque::front(self)
    }

    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    fn at(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        VecDeque::partition_point(self, pred)
    }
}

impl<T> SequenceMut for VecDeque<T> {
    type IterMut<'a>
        = vec_deque::IterMut<'a, T>
    where
        Self: 'a;

    fn iter_mut(&mut self) -> vec_deque::IterMut<'_, T> {
        VecDeque::iter_mut(self)
    }

    fn front_mut(&mut self) -> Option<&mut T> {
        VecDeque::front_mut(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        VecDeque::get_mut(self, index)
    }
}

impl<T> ContiguousMut for VecDeque<T> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        VecDeque::make_contiguous(self)
    }
}

impl<T> SortInPlace for VecDeque<T> {
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        VecDeque::make_contiguous(self).sort_by(compare)
    }

    fn reverse(&mut self) {
        VecDeque::make_contiguous(self).reverse()
    }

    fn rotate_left(&mut self, mid: usize) {
        VecDeque::rotate_left(self, mid)
    }
}

impl<T> Clear for VecDeque<T> {
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
}

impl<T> SequenceStorage for VecDeque<T> {
    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value)
    }

    fn push_front(&mut self, value: T) {
        VecDeque::push_front(self, value)
    }

    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }

    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }

    fn insert_at(&mut self, index: usize, value: T) {
        VecDeque::insert(self, index, value)
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        VecDeque::remove(self, index)
    }

    fn remove_range(&mut self, range: Range<usize>) {
        VecDeque::drain(self, range);
    }

    fn truncate(&mut self, len: usize) {
        VecDeque::truncate(self, len)
    }

    fn reserve(&mut self, additional: usize) {
        VecDeque::reserve(self, additional)
    }

    fn shrink_to_fit(&mut self) {
        VecDeque::shrink_to_fit(self)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        VecDeque::retain(self, keep)
    }
}

// LinkedList: positional edits go through split_off/append.

impl<T> Sequence for LinkedList<T> {
    type Item = T;
    type Iter<'a>
        = linked_list::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> linked_list::Iter<'_, T> {
        LinkedList::iter(self)
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn front(&self) -> Option<&T> {
        LinkedList::front(self)
    }

    fn back(&self) -> Option<&T> {
        LinkedList::back(self)
    }
}

impl<T> SequenceMut for LinkedList<T> {
    type IterMut<'a>
        = linked_list::IterMut<'a, T>
    where
        Self: 'a;

    fn iter_mut(&mut self) -> linked_list::IterMut<'_, T> {
        LinkedList::iter_mut(self)
    }

    fn front_mut(&mut self) -> Option<&mut T> {
        LinkedList::front_mut(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        LinkedList::back_mut(self)
    }
}

impl<T> SortInPlace for LinkedList<T> {
    fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut items: Vec<T> = mem::take(self).into_iter().collect();
        items.sort_by(compare);
        self.extend(items);
    }

    fn reverse(&mut self) {
        let items = mem::take(self);
        for item in items {
            LinkedList::push_front(self, item);
        }
    }

    fn rotate_left(&mut self, mid: usize) {
        let mut tail = LinkedList::split_off(self, mid);
        tail.append(self);
        *self = tail;
    }
}

impl<T> Clear for LinkedList<T> {
    fn clear(&mut self) {
        LinkedList::clear(self)
    }
}

impl<T> SequenceStorage for LinkedList<T> {
    fn push_back(&mut self, value: T) {
        LinkedList::push_back(self, value)
    }

    fn push_front(&mut self, value: T) {
        LinkedList::push_front(self, value)
    }

    fn pop_back(&mut self) -> Option<T> {
        LinkedList::pop_back(self)
    }

    fn pop_front(&mut self) -> Option<T> {
        LinkedList::pop_front(self)
    }

    fn insert_at(&mut self, index: usize, value: T) {
        let mut tail = LinkedList::split_off(self, index);
        LinkedList::push_back(self, value);
        self.append(&mut tail);
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= LinkedList::len(self) {
            return None;
        }
        let mut tail = LinkedList::split_off(self, index);
        let removed = tail.pop_front();
        self.append(&mut tail);
        removed
    }

    fn remove_range(&mut self, range: Range<usize>) {
        let mut tail = LinkedList::split_off(self, range.start);
        let mut rest = tail.split_off(range.end - range.start);
        self.append(&mut rest);
    }

    fn truncate(&mut self, len: usize) {
        if len < LinkedList::len(self) {
            drop(LinkedList::split_off(self, len));
        }
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let items = mem::take(self);
        self.extend(items.into_iter().filter(|item| keep(item)));
    }
}

// Sets

impl<T, S> Sequence for HashSet<T, S> {
    type Item = T;
    type Iter<'a>
        = hash_set::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> hash_set::Iter<'_, T> {
        HashSet::iter(self)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T, S> Clear for HashSet<T, S> {
    fn clear(&mut self) {
        HashSet::clear(self)
    }
}

impl<T: Eq + Hash, S: BuildHasher> SetStorage for HashSet<T, S> {
    fn insert_value(&mut self, value: T) -> bool {
        HashSet::insert(self, value)
    }

    fn remove_value(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }
}

impl<T> Sequence for BTreeSet<T> {
    type Item = T;
    type Iter<'a>
        = btree_set::Iter<'a, T>
    where
        Self: 'a;

    fn iter(&self) -> btree_set::Iter<'_, T> {
        BTreeSet::iter(self)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn front(&self) -> Option<&T> {
        BTreeSet::iter(self).next()
    }

    fn back(&self) -> Option<&T> {
        BTreeSet::iter(self).next_back()
    }
}

impl<T> Clear for BTreeSet<T> {
    fn clear(&mut self) {
        BTreeSet::clear(self)
    }
}

impl<T: Ord> SetStorage for BTreeSet<T> {
    fn insert_value(&mut self, value: T) -> bool {
        BTreeSet::insert(self, value)
    }

    fn remove_value(&mut self, value: &T) -> bool {
        BTreeSet::remove(self, value)
    }
}

impl Clear for String {
    fn clear(&mut self) {
        String::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, LinkedList, VecDeque};

    use super::{Sequence, SequenceMut, SequenceStorage, SetStorage, SortInPlace};

    fn list(items: &[i32]) -> LinkedList<i32> {
        items.iter().copied().collect()
    }

    fn collect<C: Sequence<Item = i32> + ?Sized>(c: &C) -> Vec<i32> {
        c.iter().copied().collect()
    }

    #[test]
    fn references_forward_to_the_container() {
        let v = vec![3, 4, 5];
        let r = &v;
        assert_eq!(Sequence::len(&r), 3);
        assert_eq!(Sequence::at(&r, 1), Some(&4));
        assert_eq!(Sequence::back(&r), Some(&5));
    }

    #[test]
    fn default_access_walks_the_iterator() {
        let l = list(&[7, 8, 9]);
        assert_eq!(Sequence::at(&l, 2), Some(&9));
        assert_eq!(Sequence::at(&l, 3), None);
    }

    #[test]
    fn linked_list_positional_edits() {
        let mut l = list(&[1, 2, 4]);
        l.insert_at(2, 3);
        assert_eq!(collect(&l), vec![1, 2, 3, 4]);

        assert_eq!(l.remove_at(0), Some(1));
        assert_eq!(l.remove_at(9), None);
        assert_eq!(collect(&l), vec![2, 3, 4]);

        l.remove_range(1..2);
        assert_eq!(collect(&l), vec![2, 4]);

        SequenceStorage::truncate(&mut l, 1);
        assert_eq!(collect(&l), vec![2]);
    }

    #[test]
    fn linked_list_reorders() {
        let mut l = list(&[4, 3, 4, 5, 6, 7]);
        SortInPlace::rotate_left(&mut l, 3);
        assert_eq!(collect(&l), vec![5, 6, 7, 4, 3, 4]);

        SortInPlace::reverse(&mut l);
        assert_eq!(collect(&l), vec![4, 3, 4, 7, 6, 5]);

        SortInPlace::sort_by(&mut l, |a, b| a.cmp(b));
        assert_eq!(collect(&l), vec![3, 4, 4, 5, 6, 7]);
    }

    #[test]
    fn deque_sorts_across_the_ring_boundary() {
        let mut d: VecDeque<i32> = VecDeque::with_capacity(4);
        d.push_back(2);
        d.push_back(1);
        d.push_front(3);
        SortInPlace::sort_by(&mut d, |a, b| a.cmp(b));
        assert_eq!(collect(&d), vec![1, 2, 3]);
    }

    #[test]
    fn default_dedup_keeps_first_of_each_run() {
        let mut d: VecDeque<i32> = [1, 1, 2, 2, 2, 1].into_iter().collect();
        SequenceStorage::dedup_by(&mut d, |a, b| a == b);
        assert_eq!(collect(&d), vec![1, 2, 1]);
    }

    #[test]
    fn exclusive_reference_writes_through() {
        let mut v = vec![1, 2, 3];
        {
            let mut r = &mut v;
            if let Some(x) = SequenceMut::back_mut(&mut r) {
                *x = 30;
            }
        }
        assert_eq!(v, vec![1, 2, 30]);
    }

    #[test]
    fn set_storage_reports_membership_changes() {
        let mut s = BTreeSet::new();
        assert!(s.insert_value(2));
        assert!(!s.insert_value(2));
        assert!(s.remove_value(&2));
        assert!(Sequence::is_empty(&s));
    }

    #[test]
    fn ordered_set_ends_are_its_extremes() {
        let s = BTreeSet::from([8, 2, 5]);
        assert_eq!(Sequence::front(&s), Some(&2));
        assert_eq!(Sequence::back(&s), Some(&8));
        assert_eq!(Sequence::front(&BTreeSet::<i32>::new()), None);
    }
}
