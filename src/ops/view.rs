//! Stages that hand back a view or wrapper instead of a value.

use std::marker::PhantomData;

use crate::capability::{Sequence, SequenceMut, SequenceStorage};
use crate::category::{Operand, Owned, ValueCategory};
use crate::mutable::{InsertPosition, Inserter, Mutable};
use crate::pipeline::{operation, Apply, Tag};
use crate::views::{FilterView, FilterViewMut, SubRange, SubRangeMut};

/// Keep the elements satisfying a predicate.
///
/// Borrowed operands get a lazy [`FilterView`] or [`FilterViewMut`]; a temporary is filtered
/// eagerly into a container of the same type.
pub struct Filter<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

/// Positional window. Only borrowed operands qualify: a window into a temporary would dangle.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    offset: usize,
    len: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Mutate;

#[derive(Debug, Clone, Copy)]
pub struct InserterAt(InsertPosition);

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryOf;

operation!([T: ?Sized, P] Filter<T, P> => "filter", 1);
operation!(Window => "sub_range", 2);
operation!(Mutate => "mutate", 0);
operation!(InserterAt => "inserter", 0);
operation!(CategoryOf => "category", 0);

impl<'a, T, C, P> Apply<&'a C> for Filter<T, P>
where
    C: Sequence<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = FilterView<&'a C, P>;

    fn apply(self, operand: &'a C) -> Self::Output {
        FilterView::new(operand, self.predicate)
    }
}

impl<'a, T, C, P> Apply<&'a mut C> for Filter<T, P>
where
    C: SequenceMut<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = FilterViewMut<&'a mut C, P>;

    fn apply(self, operand: &'a mut C) -> Self::Output {
        FilterViewMut::new(operand, self.predicate)
    }
}

impl<'a, T, C, P> Apply<Mutable<'a, C>> for Filter<T, P>
where
    C: SequenceMut<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = FilterViewMut<&'a mut C, P>;

    fn apply(self, operand: Mutable<'a, C>) -> Self::Output {
        FilterViewMut::new(operand.into_inner(), self.predicate)
    }
}

impl<T, C, P> Apply<Owned<C>> for Filter<T, P>
where
    C: IntoIterator<Item = T> + FromIterator<T>,
    P: Fn(&T) -> bool,
{
    type Output = C;

    fn apply(self, operand: Owned<C>) -> C {
        let predicate = self.predicate;
        operand.into_inner().into_iter().filter(|item| predicate(item)).collect()
    }
}

impl<'s, T, C, P> Apply<SubRange<'s, C>> for Filter<T, P>
where
    C: Sequence<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = FilterView<SubRange<'s, C>, P>;

    fn apply(self, operand: SubRange<'s, C>) -> Self::Output {
        FilterView::new(operand, self.predicate)
    }
}

impl<'s, T, C, P> Apply<SubRangeMut<'s, C>> for Filter<T, P>
where
    C: SequenceMut<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = FilterViewMut<SubRangeMut<'s, C>, P>;

    fn apply(self, operand: SubRangeMut<'s, C>) -> Self::Output {
        FilterViewMut::new(operand, self.predicate)
    }
}

impl<T, S, Q, P> Apply<FilterView<S, Q>> for Filter<T, P>
where
    S: Sequence<Item = T>,
    Q: Fn(&T) -> bool,
    P: Fn(&T) -> bool,
{
    type Output = FilterView<FilterView<S, Q>, P>;

    fn apply(self, operand: FilterView<S, Q>) -> Self::Output {
        FilterView::new(operand, self.predicate)
    }
}

impl<T, S, Q, P> Apply<FilterViewMut<S, Q>> for Filter<T, P>
where
    S: SequenceMut<Item = T>,
    Q: Fn(&T) -> bool,
    P: Fn(&T) -> bool,
{
    type Output = FilterViewMut<FilterViewMut<S, Q>, P>;

    fn apply(self, operand: FilterViewMut<S, Q>) -> Self::Output {
        FilterViewMut::new(operand, self.predicate)
    }
}

impl<'a, C: Sequence + ?Sized> Apply<&'a C> for Window {
    type Output = SubRange<'a, C>;

    fn apply(self, operand: &'a C) -> SubRange<'a, C> {
        match self.len {
            Some(len) => SubRange::with_len(operand, self.offset, len),
            None => SubRange::new(operand, self.offset),
        }
    }
}

impl<'a, C: SequenceMut + ?Sized> Apply<&'a mut C> for Window {
    type Output = SubRangeMut<'a, C>;

    fn apply(self, operand: &'a mut C) -> SubRangeMut<'a, C> {
        match self.len {
            Some(len) => SubRangeMut::with_len(operand, self.offset, len),
            None => SubRangeMut::new(operand, self.offset),
        }
    }
}

impl<'a, C: SequenceMut + ?Sized> Apply<Mutable<'a, C>> for Window {
    type Output = SubRangeMut<'a, C>;

    fn apply(self, operand: Mutable<'a, C>) -> SubRangeMut<'a, C> {
        <Self as Apply<&'a mut C>>::apply(self, operand.into_inner())
    }
}

impl<'s, C: Sequence + ?Sized> Apply<SubRange<'s, C>> for Window {
    type Output = SubRange<'s, C>;

    fn apply(self, operand: SubRange<'s, C>) -> SubRange<'s, C> {
        let mut narrowed = operand.narrow(self.offset);
        if let Some(len) = self.len {
            narrowed.resize(len);
        }
        narrowed
    }
}

impl<'s, C: SequenceMut + ?Sized> Apply<SubRangeMut<'s, C>> for Window {
    type Output = SubRangeMut<'s, C>;

    fn apply(self, operand: SubRangeMut<'s, C>) -> SubRangeMut<'s, C> {
        let mut narrowed = operand.narrow(self.offset);
        if let Some(len) = self.len {
            narrowed.resize(len);
        }
        narrowed
    }
}

impl<'a, C: ?Sized> Apply<&'a mut C> for Mutate {
    type Output = Mutable<'a, C>;

    fn apply(self, operand: &'a mut C) -> Mutable<'a, C> {
        Mutable::new(operand)
    }
}

impl<'a, C: ?Sized> Apply<Mutable<'a, C>> for Mutate {
    type Output = Mutable<'a, C>;

    fn apply(self, operand: Mutable<'a, C>) -> Mutable<'a, C> {
        operand
    }
}

impl<'a, C: SequenceStorage + ?Sized> Apply<Mutable<'a, C>> for InserterAt {
    type Output = Inserter<'a, C>;

    fn apply(self, operand: Mutable<'a, C>) -> Inserter<'a, C> {
        Inserter::new(operand.into_inner(), self.0)
    }
}

impl<O: Operand> Apply<O> for CategoryOf {
    type Output = ValueCategory;

    fn apply(self, _operand: O) -> ValueCategory {
        O::CATEGORY
    }
}

/// Lazy filter over a borrowed operand; eager over a temporary.
///
/// ```
/// use collection_pipes::ops::{filter, to_vec};
///
/// let v = vec![1, 2, 3, 4];
/// let evens = &v | filter(|x: &i32| x % 2 == 0) | to_vec();
/// assert_eq!(evens, vec![2, 4]);
///
/// let odds: Vec<i32> = v | filter(|x: &i32| x % 2 == 1);
/// assert_eq!(odds, vec![1, 3]);
/// ```
pub fn filter<T, P>(predicate: P) -> Tag<Filter<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Tag::new(Filter {
        predicate,
        _item: PhantomData,
    })
}

/// Window from `offset` to the end of the operand.
///
/// A temporary has nothing to borrow from:
///
/// ```compile_fail,E0277
/// use collection_pipes::ops::sub_range;
///
/// let _view = vec![1, 2, 3] | sub_range(1);
/// ```
pub fn sub_range(offset: usize) -> Tag<Window> {
    Tag::new(Window { offset, len: None })
}

/// Window of at most `len` elements starting at `offset`.
pub fn sub_range_len(offset: usize, len: usize) -> Tag<Window> {
    Tag::new(Window {
        offset,
        len: Some(len),
    })
}

/// Wrap an exclusive borrow in [`Mutable`].
///
/// Shared borrows cannot opt in:
///
/// ```compile_fail,E0277
/// use collection_pipes::ops::mutate;
///
/// let v = vec![1, 2, 3];
/// let _m = &v | mutate();
/// ```
///
/// Neither can temporaries:
///
/// ```compile_fail,E0277
/// use collection_pipes::ops::mutate;
///
/// let _m = vec![1, 2, 3] | mutate();
/// ```
pub fn mutate() -> Tag<Mutate> {
    Tag::new(Mutate)
}

/// An [`Inserter`] that appends.
///
/// ```compile_fail,E0277
/// use collection_pipes::ops::back_inserter;
///
/// let v = vec![1];
/// let _ins = &v | back_inserter();
/// ```
pub fn back_inserter() -> Tag<InserterAt> {
    Tag::new(InserterAt(InsertPosition::Back))
}

/// An [`Inserter`] that prepends.
pub fn front_inserter() -> Tag<InserterAt> {
    Tag::new(InserterAt(InsertPosition::Front))
}

/// The [`ValueCategory`] of the operand.
pub fn category() -> Tag<CategoryOf> {
    Tag::new(CategoryOf)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::{back_inserter, category, filter, front_inserter, mutate, sub_range, sub_range_len};
    use crate::category::ValueCategory;
    use crate::ops::to_vec;

    #[test]
    fn temporaries_are_filtered_eagerly() {
        let s: HashSet<i32> = (1..=6).collect();
        let kept: HashSet<i32> = s | filter(|x: &i32| *x > 3);
        assert_eq!(kept, HashSet::from([4, 5, 6]));
    }

    #[test]
    fn filter_views_write_through() {
        let mut v = vec![1, 2, 3, 4];
        for x in &mut v | filter(|x: &i32| x % 2 == 0) {
            *x *= 10;
        }
        assert_eq!(v, vec![1, 20, 3, 40]);
    }

    #[test]
    fn nested_views_compose() {
        let v: Vec<i32> = (0..10).collect();
        let out = &v
            | sub_range(2)
            | filter(|x: &i32| x % 3 == 0)
            | filter(|x: &i32| *x > 3)
            | to_vec();
        assert_eq!(out, vec![6, 9]);
    }

    #[test]
    fn windows_narrow() {
        let v: Vec<i32> = (0..10).collect();
        let out = &v | sub_range(2) | sub_range_len(3, 2) | to_vec();
        assert_eq!(out, vec![5, 6]);
    }

    #[test]
    fn sub_range_of_a_mutable_writes_through() {
        let mut d: VecDeque<i32> = (1..=4).collect();
        let mut window = &mut d | mutate() | sub_range(2);
        window[0] = 0;
        assert_eq!(d, VecDeque::from([1, 2, 0, 4]));
    }

    #[test]
    fn inserters_from_mutable() {
        let mut v = vec![2];
        (&mut v | mutate() | back_inserter()).extend([3, 4]);
        (&mut v | mutate() | front_inserter()).extend([1, 0]);
        assert_eq!(v, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn category_reports_the_operand_kind() {
        let mut v = vec![1];
        assert_eq!(&v | category(), ValueCategory::Shared);
        assert_eq!(&mut v | category(), ValueCategory::Exclusive);
        assert_eq!(&mut v | mutate() | category(), ValueCategory::Wrapped);
        assert_eq!(&v | sub_range(0) | category(), ValueCategory::Shared);
        assert_eq!(v | category(), ValueCategory::Temporary);
    }
}
