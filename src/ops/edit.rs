//! Editing stages.
//!
//! Each edit is written once as a [`Modify`] impl. The operand decides what gets edited: a
//! temporary is edited and returned, a borrowed container is cloned and the copy returned, and a
//! [`Mutable`](crate::Mutable) or mutable view is edited in place.
//!
//! ```
//! use collection_pipes::ops::{mutate, reversed, sorted};
//!
//! let v = vec![3, 1, 2];
//! assert_eq!(&v | sorted(), vec![1, 2, 3]);
//! assert_eq!(v, vec![3, 1, 2]);
//!
//! let mut w = vec![3, 1, 2];
//! let _ = &mut w | mutate() | reversed();
//! assert_eq!(w, vec![2, 1, 3]);
//! ```
//!
//! Read-only views reject edits at compile time:
//!
//! ```compile_fail,E0277
//! use collection_pipes::ops::{filled, sub_range};
//!
//! let v = vec![1, 2, 3];
//! let _ = &v | sub_range(1) | filled(0);
//! ```

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::capability::{ContiguousMut, SequenceMut, SequenceStorage, SortInPlace};
use crate::contract;
use crate::error::ContractViolation;
use crate::pipeline::{operation, Edit, Modify};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sorted;

pub struct SortedBy<T: ?Sized, F> {
    compare: F,
    _item: PhantomData<fn(&T, &T) -> Ordering>,
}

pub struct SortedByKey<T: ?Sized, K, F> {
    key: F,
    _item: PhantomData<fn(&T) -> K>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed;

#[derive(Debug, Clone, Copy)]
pub struct Rotated(pub usize);

#[derive(Debug, Clone, Copy, Default)]
pub struct Deduped;

#[derive(Debug, Clone, Copy)]
pub struct Filled<T>(pub T);

#[derive(Debug, Clone, Copy)]
pub struct Replaced<T> {
    old: T,
    new: T,
}

pub struct ReplacedIf<T, P> {
    predicate: P,
    value: T,
}

pub struct ForEach<T: ?Sized, F> {
    function: F,
    _item: PhantomData<fn(&mut T)>,
}

#[derive(Debug, Clone, Copy)]
pub struct PushedBack<T>(pub T);

#[derive(Debug, Clone, Copy)]
pub struct PushedFront<T>(pub T);

#[derive(Debug, Clone, Copy, Default)]
pub struct PoppedBack;

#[derive(Debug, Clone, Copy, Default)]
pub struct PoppedFront;

#[derive(Debug, Clone, Copy)]
pub struct ErasedAll<T>(pub T);

pub struct ErasedAllIf<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

/// Moves the matches of the predicate to the front. Relative order is not kept.
pub struct Partitioned<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

/// Like [`Partitioned`], keeping relative order on both sides.
pub struct StablePartitioned<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct NthElement(pub usize);

#[derive(Debug, Clone, Copy, Default)]
pub struct NextPermutation;

#[derive(Debug, Clone, Copy, Default)]
pub struct PrevPermutation;

/// Which end a targeted erase searches from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
}

#[derive(Debug, Clone, Copy)]
pub struct ErasedOne<T> {
    occurrence: Occurrence,
    value: T,
}

pub struct ErasedOneIf<T: ?Sized, P> {
    occurrence: Occurrence,
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

operation!(Sorted => "sorted", 0);
operation!([T: ?Sized, F] SortedBy<T, F> => "sorted_by", 1);
operation!([T: ?Sized, K, F] SortedByKey<T, K, F> => "sorted_by_key", 1);
operation!(Reversed => "reversed", 0);
operation!(Rotated => "rotated", 1);
operation!(Deduped => "deduped", 0);
operation!([T] Filled<T> => "filled", 1);
operation!([T] Replaced<T> => "replaced", 2);
operation!([T, P] ReplacedIf<T, P> => "replaced_if", 2);
operation!([T: ?Sized, F] ForEach<T, F> => "for_each", 1);
operation!([T] PushedBack<T> => "pushed_back", 1);
operation!([T] PushedFront<T> => "pushed_front", 1);
operation!(PoppedBack => "popped_back", 0);
operation!(PoppedFront => "popped_front", 0);
operation!([T] ErasedAll<T> => "erased_all", 1);
operation!([T: ?Sized, P] ErasedAllIf<T, P> => "erased_all_if", 1);
operation!([T: ?Sized, P] Partitioned<T, P> => "partitioned", 1);
operation!([T: ?Sized, P] StablePartitioned<T, P> => "stable_partitioned", 1);
operation!(NthElement => "nth_element", 1);
operation!(NextPermutation => "next_permutation", 0);
operation!(PrevPermutation => "prev_permutation", 0);
operation!([T] ErasedOne<T> => "erased_one", 1);
operation!([T: ?Sized, P] ErasedOneIf<T, P> => "erased_one_if", 1);

impl<C> Modify<C> for Sorted
where
    C: SortInPlace + ?Sized,
    C::Item: Ord,
{
    fn modify(self, target: &mut C) {
        target.sort_by(Ord::cmp)
    }
}

impl<T, C, F> Modify<C> for SortedBy<T, F>
where
    C: SortInPlace<Item = T> + ?Sized,
    F: FnMut(&T, &T) -> Ordering,
{
    fn modify(self, target: &mut C) {
        target.sort_by(self.compare)
    }
}

impl<T, C, K, F> Modify<C> for SortedByKey<T, K, F>
where
    C: SortInPlace<Item = T> + ?Sized,
    K: Ord,
    F: FnMut(&T) -> K,
{
    fn modify(self, target: &mut C) {
        let mut key = self.key;
        target.sort_by(|a, b| key(a).cmp(&key(b)))
    }
}

impl<C: SortInPlace + ?Sized> Modify<C> for Reversed {
    fn modify(self, target: &mut C) {
        target.reverse()
    }
}

impl<C: SortInPlace + ?Sized> Modify<C> for Rotated {
    fn modify(self, target: &mut C) {
        let len = target.len();
        if len > 0 {
            target.rotate_left(self.0 % len)
        }
    }
}

impl<C> Modify<C> for Deduped
where
    C: SequenceStorage + ?Sized,
    C::Item: PartialEq,
{
    fn modify(self, target: &mut C) {
        target.dedup_by(|a, b| a == b)
    }
}

impl<T, C> Modify<C> for Filled<T>
where
    C: SequenceMut<Item = T> + ?Sized,
    T: Clone,
{
    fn modify(self, target: &mut C) {
        for item in target.iter_mut() {
            item.clone_from(&self.0);
        }
    }
}

impl<T, C> Modify<C> for Replaced<T>
where
    C: SequenceMut<Item = T> + ?Sized,
    T: PartialEq + Clone,
{
    fn modify(self, target: &mut C) {
        for item in target.iter_mut() {
            if *item == self.old {
                item.clone_from(&self.new);
            }
        }
    }
}

impl<T, C, P> Modify<C> for ReplacedIf<T, P>
where
    C: SequenceMut<Item = T> + ?Sized,
    T: Clone,
    P: Fn(&T) -> bool,
{
    fn modify(self, target: &mut C) {
        for item in target.iter_mut() {
            if (self.predicate)(&*item) {
                item.clone_from(&self.value);
            }
        }
    }
}

impl<T, C, F> Modify<C> for ForEach<T, F>
where
    C: SequenceMut<Item = T> + ?Sized,
    F: FnMut(&mut T),
{
    fn modify(self, target: &mut C) {
        target.iter_mut().for_each(self.function)
    }
}

impl<T, C> Modify<C> for PushedBack<T>
where
    C: SequenceStorage<Item = T> + ?Sized,
{
    fn modify(self, target: &mut C) {
        target.push_back(self.0)
    }
}

impl<T, C> Modify<C> for PushedFront<T>
where
    C: SequenceStorage<Item = T> + ?Sized,
{
    fn modify(self, target: &mut C) {
        target.push_front(self.0)
    }
}

impl<C: SequenceStorage + ?Sized> Modify<C> for PoppedBack {
    fn modify(self, target: &mut C) {
        if contract::check(!target.is_empty(), || ContractViolation::EmptyOperand {
            operation: "popped_back",
        }) {
            drop(target.pop_back());
        }
    }
}

impl<C: SequenceStorage + ?Sized> Modify<C> for PoppedFront {
    fn modify(self, target: &mut C) {
        if contract::check(!target.is_empty(), || ContractViolation::EmptyOperand {
            operation: "popped_front",
        }) {
            drop(target.pop_front());
        }
    }
}

impl<T, C> Modify<C> for ErasedAll<T>
where
    C: SequenceStorage<Item = T> + ?Sized,
    T: PartialEq,
{
    fn modify(self, target: &mut C) {
        target.retain(|item| *item != self.0)
    }
}

impl<T, C, P> Modify<C> for ErasedAllIf<T, P>
where
    C: SequenceStorage<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    fn modify(self, target: &mut C) {
        target.retain(|item| !(self.predicate)(item))
    }
}

impl<T, C, P> Modify<C> for Partitioned<T, P>
where
    C: ContiguousMut<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    fn modify(self, target: &mut C) {
        let items = target.as_mut_slice();
        let mut split = 0;
        for index in 0..items.len() {
            if (self.predicate)(&items[index]) {
                items.swap(split, index);
                split += 1;
            }
        }
    }
}

impl<T, C, P> Modify<C> for StablePartitioned<T, P>
where
    C: SortInPlace<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    fn modify(self, target: &mut C) {
        let predicate = self.predicate;
        target.sort_by(|a, b| predicate(b).cmp(&predicate(a)))
    }
}

impl<C> Modify<C> for NthElement
where
    C: ContiguousMut + ?Sized,
    C::Item: Ord,
{
    fn modify(self, target: &mut C) {
        let len = target.len();
        if contract::check(self.0 < len, || ContractViolation::IndexOutOfRange {
            operation: "nth_element",
            index: self.0,
            len,
        }) {
            target.as_mut_slice().select_nth_unstable(self.0);
        }
    }
}

/// Steps `items` to the adjacent permutation in lexicographic order: the next one when `toward`
/// is `Less`, the previous one when it is `Greater`. Wraps around at either end.
fn permute<T: Ord>(items: &mut [T], toward: Ordering) {
    let Some(pivot) = (1..items.len()).rev().find(|&i| items[i - 1].cmp(&items[i]) == toward)
    else {
        items.reverse();
        return;
    };
    let pivot = pivot - 1;
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[pivot].cmp(&items[j]) == toward)
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
}

impl<C> Modify<C> for NextPermutation
where
    C: ContiguousMut + ?Sized,
    C::Item: Ord,
{
    fn modify(self, target: &mut C) {
        permute(target.as_mut_slice(), Ordering::Less)
    }
}

impl<C> Modify<C> for PrevPermutation
where
    C: ContiguousMut + ?Sized,
    C::Item: Ord,
{
    fn modify(self, target: &mut C) {
        permute(target.as_mut_slice(), Ordering::Greater)
    }
}

fn erase_one<C, F>(target: &mut C, occurrence: Occurrence, mut matches: F)
where
    C: SequenceStorage + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    let found = {
        let mut positions = target
            .iter()
            .enumerate()
            .filter(|(_, item)| matches(item))
            .map(|(index, _)| index);
        match occurrence {
            Occurrence::First => positions.next(),
            Occurrence::Last => positions.last(),
        }
    };
    if let Some(index) = found {
        drop(target.remove_at(index));
    }
}

impl<T, C> Modify<C> for ErasedOne<T>
where
    C: SequenceStorage<Item = T> + ?Sized,
    T: PartialEq,
{
    fn modify(self, target: &mut C) {
        let value = self.value;
        erase_one(target, self.occurrence, |item| *item == value)
    }
}

impl<T, C, P> Modify<C> for ErasedOneIf<T, P>
where
    C: SequenceStorage<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    fn modify(self, target: &mut C) {
        erase_one(target, self.occurrence, self.predicate)
    }
}

pub fn sorted() -> Edit<Sorted> {
    Edit::new(Sorted)
}

/// Stable sort with a comparator.
pub fn sorted_by<T, F>(compare: F) -> Edit<SortedBy<T, F>>
where
    T: ?Sized,
    F: FnMut(&T, &T) -> Ordering,
{
    Edit::new(SortedBy {
        compare,
        _item: PhantomData,
    })
}

/// Stable sort by a derived key. The key is recomputed on every comparison.
pub fn sorted_by_key<T, K, F>(key: F) -> Edit<SortedByKey<T, K, F>>
where
    T: ?Sized,
    K: Ord,
    F: FnMut(&T) -> K,
{
    Edit::new(SortedByKey {
        key,
        _item: PhantomData,
    })
}

pub fn reversed() -> Edit<Reversed> {
    Edit::new(Reversed)
}

/// Rotate left: the element at `mid % len` becomes the first.
pub fn rotated(mid: usize) -> Edit<Rotated> {
    Edit::new(Rotated(mid))
}

/// Collapse runs of equal neighbours.
pub fn deduped() -> Edit<Deduped> {
    Edit::new(Deduped)
}

/// Overwrite every element with `value`.
pub fn filled<T: Clone>(value: T) -> Edit<Filled<T>> {
    Edit::new(Filled(value))
}

pub fn replaced<T: PartialEq + Clone>(old: T, new: T) -> Edit<Replaced<T>> {
    Edit::new(Replaced { old, new })
}

pub fn replaced_if<T, P>(predicate: P, value: T) -> Edit<ReplacedIf<T, P>>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    Edit::new(ReplacedIf { predicate, value })
}

/// Call `function` on every element, with write access.
pub fn for_each<T, F>(function: F) -> Edit<ForEach<T, F>>
where
    T: ?Sized,
    F: FnMut(&mut T),
{
    Edit::new(ForEach {
        function,
        _item: PhantomData,
    })
}

pub fn pushed_back<T>(value: T) -> Edit<PushedBack<T>> {
    Edit::new(PushedBack(value))
}

pub fn pushed_front<T>(value: T) -> Edit<PushedFront<T>> {
    Edit::new(PushedFront(value))
}

/// Drop the last element. On an empty operand this is a precondition violation.
pub fn popped_back() -> Edit<PoppedBack> {
    Edit::new(PoppedBack)
}

pub fn popped_front() -> Edit<PoppedFront> {
    Edit::new(PoppedFront)
}

/// Remove every element equal to `value`.
pub fn erased_all<T: PartialEq>(value: T) -> Edit<ErasedAll<T>> {
    Edit::new(ErasedAll(value))
}

pub fn erased_all_if<T, P>(predicate: P) -> Edit<ErasedAllIf<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Edit::new(ErasedAllIf {
        predicate,
        _item: PhantomData,
    })
}

/// Move every element satisfying `predicate` before every element that does not.
pub fn partitioned<T, P>(predicate: P) -> Edit<Partitioned<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Edit::new(Partitioned {
        predicate,
        _item: PhantomData,
    })
}

pub fn stable_partitioned<T, P>(predicate: P) -> Edit<StablePartitioned<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Edit::new(StablePartitioned {
        predicate,
        _item: PhantomData,
    })
}

/// Put the element that belongs at `index` in sorted order there, with no greater element
/// before it and no smaller one after. An index past the end is a precondition violation.
pub fn nth_element(index: usize) -> Edit<NthElement> {
    Edit::new(NthElement(index))
}

/// Next lexicographic permutation; the last one wraps around to sorted order.
pub fn next_permutation() -> Edit<NextPermutation> {
    Edit::new(NextPermutation)
}

pub fn prev_permutation() -> Edit<PrevPermutation> {
    Edit::new(PrevPermutation)
}

/// Remove the first element equal to `value`, if any.
pub fn erased_first<T: PartialEq>(value: T) -> Edit<ErasedOne<T>> {
    Edit::new(ErasedOne {
        occurrence: Occurrence::First,
        value,
    })
}

pub fn erased_last<T: PartialEq>(value: T) -> Edit<ErasedOne<T>> {
    Edit::new(ErasedOne {
        occurrence: Occurrence::Last,
        value,
    })
}

fn erased_one_if<T: ?Sized, P>(occurrence: Occurrence, predicate: P) -> Edit<ErasedOneIf<T, P>> {
    Edit::new(ErasedOneIf {
        occurrence,
        predicate,
        _item: PhantomData,
    })
}

pub fn erased_first_if<T, P>(predicate: P) -> Edit<ErasedOneIf<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    erased_one_if(Occurrence::First, predicate)
}

pub fn erased_last_if<T, P>(predicate: P) -> Edit<ErasedOneIf<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    erased_one_if(Occurrence::Last, predicate)
}

#[cfg(test)]
mod tests {
    use std::collections::{LinkedList, VecDeque};

    use super::*;
    use crate::contract::{self, ContractOptions, Enforcement};
    use crate::ops::{filter, mutate, sub_range, sub_range_len};

    #[test]
    fn borrowed_operands_are_copied() {
        let v = vec![4, 3, 4, 5, 6, 7];
        assert_eq!(&v | rotated(3), vec![5, 6, 7, 4, 3, 4]);
        assert_eq!(&v | rotated(9), vec![5, 6, 7, 4, 3, 4]);
        assert_eq!(&v | sorted() | deduped(), vec![3, 4, 5, 6, 7]);
        assert_eq!(v, vec![4, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn temporaries_are_edited_and_returned() {
        let d: VecDeque<i32> = VecDeque::from([1, 2, 3]) | pushed_front(0) | popped_back();
        assert_eq!(d, VecDeque::from([0, 1, 2]));

        let l: LinkedList<i32> = [1, 2, 1].into_iter().collect::<LinkedList<_>>() | erased_all(1);
        assert_eq!(l, LinkedList::from([2]));
    }

    #[test]
    fn sorting_variants() {
        let words = vec!["ccc", "a", "bb"];
        assert_eq!(&words | sorted_by_key(|s: &&str| s.len()), vec!["a", "bb", "ccc"]);
        assert_eq!(
            &words | sorted_by(|a: &&str, b: &&str| b.cmp(a)),
            vec!["ccc", "bb", "a"]
        );
        assert_eq!(LinkedList::from([3, 1, 2]) | sorted(), LinkedList::from([1, 2, 3]));
    }

    #[test]
    fn element_rewrites() {
        let v = vec![1, 2, 3, 2];
        assert_eq!(&v | replaced(2, 0), vec![1, 0, 3, 0]);
        assert_eq!(&v | replaced_if(|x: &i32| *x > 2, 9), vec![1, 2, 9, 2]);
        assert_eq!(&v | for_each(|x: &mut i32| *x += 1), vec![2, 3, 4, 3]);
        assert_eq!(&v | erased_all_if(|x: &i32| x % 2 == 0), vec![1, 3]);
        assert_eq!([0_u8; 3] | filled(7), [7, 7, 7]);
    }

    #[test]
    fn mutable_edits_in_place() {
        let mut v = vec![0, 0, 0, 0];
        let _ = &mut v | mutate() | sub_range(1) | filled(1);
        assert_eq!(v, vec![0, 1, 1, 1]);
        let _ = &mut v | mutate() | pushed_back(5) | popped_front();
        assert_eq!(v, vec![1, 1, 1, 5]);
    }

    #[test]
    fn edits_through_filter_views() {
        let mut v = vec![1, 2, 3, 4, 5];
        let _ = &mut v | filter(|x: &i32| x % 2 == 1) | for_each(|x: &mut i32| *x = -*x);
        assert_eq!(v, vec![-1, 2, -3, 4, -5]);
    }

    #[test]
    fn window_sorting_leaves_the_rest_alone() {
        let mut v = vec![9, 5, 3, 1, 0];
        let _ = &mut v | sub_range_len(1, 3) | sorted();
        assert_eq!(v, vec![9, 1, 3, 5, 0]);
    }

    #[test]
    fn popping_an_empty_container_is_a_no_op_when_ignored() {
        let options = ContractOptions {
            enforcement: Enforcement::Ignore,
            observer: None,
        };
        let out = contract::with_options(options, || Vec::<i32>::new() | popped_back());
        assert!(out.is_empty());
    }

    #[test]
    fn partitions() {
        let v = vec![1, 2, 3, 4, 5, 6];
        let even = |x: &i32| x % 2 == 0;
        assert_eq!(&v | stable_partitioned(even), vec![2, 4, 6, 1, 3, 5]);

        let split = &v | partitioned(even);
        assert!(split[..3].iter().all(|x| x % 2 == 0));
        assert!(split[3..].iter().all(|x| x % 2 == 1));

        let l: LinkedList<i32> = (1..=4).collect();
        assert_eq!(l | stable_partitioned(|x: &i32| *x > 2), LinkedList::from([3, 4, 1, 2]));
    }

    #[test]
    fn nth_element_places_the_sorted_value() {
        let v = vec![9, 1, 8, 2, 7, 3];
        let out = &v | nth_element(2);
        assert_eq!(out[2], 3);
        assert!(out[..2].iter().all(|x| *x <= 3));
        assert!(out[3..].iter().all(|x| *x >= 3));
    }

    #[test]
    fn nth_element_past_the_end_is_a_no_op_when_ignored() {
        let options = ContractOptions {
            enforcement: Enforcement::Ignore,
            observer: None,
        };
        let out = contract::with_options(options, || vec![3, 1, 2] | nth_element(3));
        assert_eq!(out, vec![3, 1, 2]);
    }

    #[test]
    fn permutations_step_and_wrap() {
        assert_eq!(vec![1, 2, 3] | next_permutation(), vec![1, 3, 2]);
        assert_eq!(vec![1, 3, 2] | next_permutation(), vec![2, 1, 3]);
        assert_eq!(vec![3, 2, 1] | next_permutation(), vec![1, 2, 3]);
        assert_eq!(vec![2, 1, 3] | prev_permutation(), vec![1, 3, 2]);
        assert_eq!(vec![1, 2, 3] | prev_permutation(), vec![3, 2, 1]);
        assert_eq!(vec![1, 1, 2] | next_permutation(), vec![1, 2, 1]);

        let mut d = VecDeque::from([1, 2, 3]);
        let _ = &mut d | mutate() | next_permutation() | next_permutation();
        assert_eq!(d, VecDeque::from([2, 1, 3]));
    }

    #[test]
    fn targeted_erases_remove_one_match() {
        let v = vec![1, 2, 3, 2, 1];
        assert_eq!(&v | erased_first(2), vec![1, 3, 2, 1]);
        assert_eq!(&v | erased_last(2), vec![1, 2, 3, 1]);
        assert_eq!(&v | erased_first_if(|x: &i32| *x > 1), vec![1, 3, 2, 1]);
        assert_eq!(&v | erased_last_if(|x: &i32| *x < 3), vec![1, 2, 3, 2]);
        assert_eq!(&v | erased_first(7), v);

        let l: LinkedList<i32> = [4, 5, 4].into_iter().collect();
        assert_eq!(l | erased_last(4), LinkedList::from([4, 5]));
    }
}
