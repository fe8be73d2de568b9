//! Element access: `front`, `back`, `at`, `middle`, `find`, `find_if`, `taken`.
//!
//! What comes back depends on the operand:
//!
//! | operand | result |
//! |---|---|
//! | `&C`, `SubRange`, `FilterView` over shared data | `&T` |
//! | `&mut C`, `Mutable`, mutable views | `&mut T` |
//! | temporary `C` | `T`, moved out of the consumed container |
//!
//! `front`, `back`, `at` and `middle` require the element to exist; a missing element is fatal.
//! `find` and `find_if` return `Option`.

use std::borrow::Borrow;
use std::marker::PhantomData;

use crate::capability::{Sequence, SequenceMut};
use crate::category::Owned;
use crate::contract;
use crate::error::ContractViolation;
use crate::mutable::Mutable;
use crate::pipeline::{operation, Apply, Tag};
use crate::views::{FilterView, FilterViewMut, SubRange, SubRangeMut};

/// How an access tag picks one item out of a sequence of elements of type `T`.
///
/// `Found<E>` is `E` for accessors whose element must exist and `Option<E>` for searches.
pub trait Locate<T: ?Sized> {
    type Found<E>;

    fn locate<I>(self, items: I, len: usize) -> Self::Found<I::Item>
    where
        I: Iterator,
        I::Item: Borrow<T>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Front;

#[derive(Debug, Clone, Copy, Default)]
pub struct Back;

#[derive(Debug, Clone, Copy)]
pub struct At(pub usize);

#[derive(Debug, Clone, Copy, Default)]
pub struct Middle;

#[derive(Debug, Clone, Copy)]
pub struct Find<V>(pub V);

pub struct FindIf<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Taken;

operation!(Front => "front", 0);
operation!(Back => "back", 0);
operation!(At => "at", 1);
operation!(Middle => "middle", 0);
operation!([V] Find<V> => "find", 1);
operation!([T: ?Sized, P] FindIf<T, P> => "find_if", 1);
operation!(Taken => "taken", 0);

fn expect_element<E>(found: Option<E>, violation: impl FnOnce() -> ContractViolation) -> E {
    match found {
        Some(item) => item,
        None => contract::fail(violation()),
    }
}

impl<T: ?Sized> Locate<T> for Front {
    type Found<E> = E;

    fn locate<I>(self, mut items: I, _len: usize) -> I::Item
    where
        I: Iterator,
        I::Item: Borrow<T>,
    {
        expect_element(items.next(), || ContractViolation::EmptyOperand { operation: "front" })
    }
}

impl<T: ?Sized> Locate<T> for Back {
    type Found<E> = E;

    fn locate<I>(self, items: I, _len: usize) -> I::Item
    where
        I: Iterator,
        I::Item: Borrow<T>,
    {
        expect_element(items.last(), || ContractViolation::EmptyOperand { operation: "back" })
    }
}

impl<T: ?Sized> Locate<T> for At {
    type Found<E> = E;

    fn locate<I>(self, mut items: I, len: usize) -> I::Item
    where
        I: Iterator,
        I::Item: Borrow<T>,
    {
        let index = self.0;
        expect_element(items.nth(index), || ContractViolation::IndexOutOfRange {
            operation: "at",
            index,
            len,
        })
    }
}

impl<T: ?Sized> Locate<T> for Middle {
    type Found<E> = E;

    fn locate<I>(self, mut items: I, len: usize) -> I::Item
    where
        I: Iterator,
        I::Item: Borrow<T>,
    {
        expect_element(items.nth(len / 2), || ContractViolation::EmptyOperand {
            operation: "middle",
        })
    }
}

impl<T, V> Locate<T> for Find<V>
where
    T: PartialEq<V> + ?Sized,
{
    type Found<E> = Option<E>;

    fn locate<I>(self, mut items: I, _len: usize) -> Option<I::Item>
    where
        I: Iterator,
        I::Item: Borrow<T>,
    {
        items.find(|item| *<I::Item as Borrow<T>>::borrow(item) == self.0)
    }
}

impl<T, P> Locate<T> for FindIf<T, P>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    type Found<E> = Option<E>;

    fn locate<I>(self, mut items: I, _len: usize) -> Option<I::Item>
    where
        I: Iterator,
        I::Item: Borrow<T>,
    {
        items.find(|item| (self.predicate)(<I::Item as Borrow<T>>::borrow(item)))
    }
}

macro_rules! locating {
    ([$($g:tt)*] $op:ty) => {
        impl<'a, $($g)* C> Apply<&'a C> for $op
        where
            C: Sequence + ?Sized,
            $op: Locate<C::Item>,
        {
            type Output = <$op as Locate<C::Item>>::Found<&'a C::Item>;

            fn apply(self, operand: &'a C) -> Self::Output {
                let len = operand.len();
                Locate::<C::Item>::locate(self, operand.iter(), len)
            }
        }

        impl<'a, $($g)* C> Apply<&'a mut C> for $op
        where
            C: SequenceMut + ?Sized,
            $op: Locate<C::Item>,
        {
            type Output = <$op as Locate<C::Item>>::Found<&'a mut C::Item>;

            fn apply(self, operand: &'a mut C) -> Self::Output {
                let len = operand.len();
                Locate::<C::Item>::locate(self, C::iter_mut(operand), len)
            }
        }

        impl<'a, $($g)* C> Apply<Mutable<'a, C>> for $op
        where
            C: SequenceMut + ?Sized,
            $op: Locate<C::Item>,
        {
            type Output = <$op as Locate<C::Item>>::Found<&'a mut C::Item>;

            fn apply(self, operand: Mutable<'a, C>) -> Self::Output {
                let inner = operand.into_inner();
                let len = inner.len();
                Locate::<C::Item>::locate(self, C::iter_mut(inner), len)
            }
        }

        impl<$($g)* C> Apply<Owned<C>> for $op
        where
            C: Sequence + IntoIterator<Item = <C as Sequence>::Item>,
            $op: Locate<<C as Sequence>::Item>,
        {
            type Output = <$op as Locate<<C as Sequence>::Item>>::Found<<C as Sequence>::Item>;

            fn apply(self, operand: Owned<C>) -> Self::Output {
                let container = operand.into_inner();
                let len = Sequence::len(&container);
                Locate::<<C as Sequence>::Item>::locate(self, container.into_iter(), len)
            }
        }

        impl<'s, $($g)* C> Apply<SubRange<'s, C>> for $op
        where
            C: Sequence + ?Sized,
            $op: Locate<C::Item>,
        {
            type Output = <$op as Locate<C::Item>>::Found<&'s C::Item>;

            fn apply(self, operand: SubRange<'s, C>) -> Self::Output {
                let len = operand.len();
                Locate::<C::Item>::locate(self, operand.into_iter(), len)
            }
        }

        impl<'s, $($g)* C> Apply<SubRangeMut<'s, C>> for $op
        where
            C: SequenceMut + ?Sized,
            $op: Locate<C::Item>,
        {
            type Output = <$op as Locate<C::Item>>::Found<&'s mut C::Item>;

            fn apply(self, operand: SubRangeMut<'s, C>) -> Self::Output {
                let len = operand.len();
                Locate::<C::Item>::locate(self, operand.into_iter(), len)
            }
        }

        impl<$($g)* S, Q> Apply<FilterView<S, Q>> for $op
        where
            FilterView<S, Q>: Sequence + IntoIterator,
            <FilterView<S, Q> as IntoIterator>::Item: Borrow<<FilterView<S, Q> as Sequence>::Item>,
            $op: Locate<<FilterView<S, Q> as Sequence>::Item>,
        {
            type Output = <$op as Locate<<FilterView<S, Q> as Sequence>::Item>>::Found<
                <FilterView<S, Q> as IntoIterator>::Item,
            >;

            fn apply(self, operand: FilterView<S, Q>) -> Self::Output {
                let len = Sequence::len(&operand);
                Locate::<<FilterView<S, Q> as Sequence>::Item>::locate(
                    self,
                    operand.into_iter(),
                    len,
                )
            }
        }

        impl<$($g)* S, Q> Apply<FilterViewMut<S, Q>> for $op
        where
            FilterViewMut<S, Q>: Sequence + IntoIterator,
            <FilterViewMut<S, Q> as IntoIterator>::Item:
                Borrow<<FilterViewMut<S, Q> as Sequence>::Item>,
            $op: Locate<<FilterViewMut<S, Q> as Sequence>::Item>,
        {
            type Output = <$op as Locate<<FilterViewMut<S, Q> as Sequence>::Item>>::Found<
                <FilterViewMut<S, Q> as IntoIterator>::Item,
            >;

            fn apply(self, operand: FilterViewMut<S, Q>) -> Self::Output {
                let len = Sequence::len(&operand);
                Locate::<<FilterViewMut<S, Q> as Sequence>::Item>::locate(
                    self,
                    operand.into_iter(),
                    len,
                )
            }
        }
    };
}

locating!([] Front);
locating!([] Back);
locating!([] At);
locating!([] Middle);
locating!([V,] Find<V>);
locating!([T: ?Sized, P,] FindIf<T, P>);

impl<'a, C: Default> Apply<&'a mut C> for Taken {
    type Output = C;

    fn apply(self, operand: &'a mut C) -> C {
        std::mem::take(operand)
    }
}

impl<'a, C: Default> Apply<Mutable<'a, C>> for Taken {
    type Output = C;

    fn apply(self, operand: Mutable<'a, C>) -> C {
        std::mem::take(operand.into_inner())
    }
}

/// First element.
pub fn front() -> Tag<Front> {
    Tag::new(Front)
}

/// Last element.
pub fn back() -> Tag<Back> {
    Tag::new(Back)
}

/// Element at `index` in iteration order.
pub fn at(index: usize) -> Tag<At> {
    Tag::new(At(index))
}

/// Element at `len / 2`.
pub fn middle() -> Tag<Middle> {
    Tag::new(Middle)
}

/// First element equal to `value`, if any.
pub fn find<V>(value: V) -> Tag<Find<V>> {
    Tag::new(Find(value))
}

/// First element satisfying `predicate`, if any.
pub fn find_if<T, P>(predicate: P) -> Tag<FindIf<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Tag::new(FindIf {
        predicate,
        _item: PhantomData,
    })
}

/// Move the container out of an exclusive borrow, leaving `Default::default()` behind.
///
/// ```compile_fail,E0277
/// use collection_pipes::ops::taken;
///
/// let v = vec![1, 2];
/// let _out = &v | taken();
/// ```
pub fn taken() -> Tag<Taken> {
    Tag::new(Taken)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, LinkedList, VecDeque};

    use super::{at, back, find, find_if, front, middle, taken};
    use crate::ops::{filter, mutate, sub_range};

    #[test]
    fn shared_operands_yield_references() {
        let v = vec![4, 3, 4, 5, 6, 7];
        let first: &i32 = &v | front();
        assert_eq!(*first, 4);
        assert_eq!(*(&v | back()), 7);
        assert_eq!(*(&v | at(3)), 5);
        assert_eq!(*(&v | middle()), 5);
    }

    #[test]
    fn exclusive_operands_yield_writable_references() {
        let mut v = vec![1, 2, 3];
        *(&mut v | back()) = 30;
        *(&mut v | mutate() | front()) = 10;
        assert_eq!(v, vec![10, 2, 30]);
    }

    #[test]
    fn temporaries_yield_owned_elements() {
        let s: String = vec![String::from("a"), String::from("b")] | back();
        assert_eq!(s, "b");
        let d: VecDeque<i32> = (1..=3).collect();
        assert_eq!(d | at(1), 2);
    }

    #[test]
    fn find_reports_absence_as_none() {
        let l: LinkedList<i32> = [5, 8, 13].into_iter().collect();
        assert_eq!(&l | find(8), Some(&8));
        assert_eq!(&l | find(9), None);
        assert_eq!(&l | find_if(|x: &i32| x % 2 == 0), Some(&8));
    }

    #[test]
    fn find_through_exclusive_borrow_allows_edits() {
        let mut v = vec![1, 2, 3];
        if let Some(x) = &mut v | find(2) {
            *x = 20;
        }
        assert_eq!(v, vec![1, 20, 3]);
    }

    #[test]
    fn access_through_views() {
        let v = vec![3, 4, 5, 6, 7];
        assert_eq!(*(&v | sub_range(1) | front()), 4);
        assert_eq!(*(&v | filter(|x: &i32| x % 2 == 0) | back()), 6);
        assert_eq!(*(&v | filter(|x: &i32| *x > 3) | at(2)), 6);
    }

    #[test]
    fn predicate_search_through_filter_views() {
        let mut v = vec![3, 4, 5, 6, 7];
        let odd = |x: &i32| x % 2 == 1;
        assert_eq!(&v | filter(odd) | find_if(|x: &i32| *x > 3), Some(&5));
        if let Some(x) = &mut v | filter(odd) | find_if(|x: &i32| *x > 5) {
            *x = 70;
        }
        assert_eq!(v, vec![3, 4, 5, 6, 70]);
    }

    #[test]
    fn sets_are_ordered_sequences() {
        let s = BTreeSet::from([9, 1, 5]);
        assert_eq!(*(&s | front()), 1);
        assert_eq!(*(&s | back()), 9);
    }

    #[test]
    fn taken_leaves_default_behind() {
        let mut v = vec![1, 2];
        let out = &mut v | taken();
        assert_eq!(out, vec![1, 2]);
        assert!(v.is_empty());
    }

    #[test]
    #[should_panic(expected = "front: operand is empty")]
    fn front_of_empty_is_fatal() {
        let v: Vec<i32> = Vec::new();
        let _ = &v | front();
    }

    #[test]
    #[should_panic(expected = "at: index 4 is out of range for length 2")]
    fn at_out_of_range_is_fatal() {
        let v = vec![1, 2];
        let _ = &v | at(4);
    }
}
