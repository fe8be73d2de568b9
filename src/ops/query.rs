//! Read-only queries. Each one is written once against [`Sequence`] and serves every operand
//! category, views included.

use std::fmt::{self, Write as _};
use std::iter::Sum as IterSum;
use std::marker::PhantomData;

use crate::capability::Sequence;
use crate::numeric::Arithmetic;
use crate::pipeline::{operation, Inspect, Query};

#[derive(Debug, Clone, Copy, Default)]
pub struct Size;

#[derive(Debug, Clone, Copy, Default)]
pub struct IsEmpty;

#[derive(Debug, Clone, Copy)]
pub struct Contains<V>(pub V);

#[derive(Debug, Clone, Copy)]
pub struct Count<V>(pub V);

/// Which quantifier a [`Quantified`] query evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    AllOf,
    AnyOf,
    NoneOf,
}

impl Quantifier {
    fn holds<I: Iterator>(self, mut items: I, mut test: impl FnMut(I::Item) -> bool) -> bool {
        match self {
            Quantifier::AllOf => items.all(test),
            Quantifier::AnyOf => items.any(test),
            Quantifier::NoneOf => !items.any(&mut test),
        }
    }
}

/// `all_of` / `any_of` / `none_of` over a predicate.
pub struct Quantified<T: ?Sized, P> {
    quantifier: Quantifier,
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

/// `all_of_equal` / `any_of_equal` / `none_of_equal` against a value.
#[derive(Debug, Clone, Copy)]
pub struct QuantifiedEqual<V> {
    quantifier: Quantifier,
    value: V,
}

pub struct CountIf<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct FindIndex<V>(pub V);

pub struct FindIndexIf<T: ?Sized, P> {
    predicate: P,
    _item: PhantomData<fn(&T) -> bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MinValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

pub struct Fold<T: ?Sized, A, F> {
    init: A,
    step: F,
    _item: PhantomData<fn(&T)>,
}

#[derive(Debug, Clone, Copy)]
pub struct Equal<O>(pub O);

#[derive(Debug, Clone, Copy, Default)]
pub struct IsSorted;

pub struct Transformed<T: ?Sized, R, F> {
    function: F,
    _item: PhantomData<fn(&T) -> R>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToDisplay;

/// Which sorted-range search a [`Bound`] query runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    /// First position whose element is not less than the value.
    Lower,
    /// First position whose element is greater than the value.
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct Bound<V> {
    search: Search,
    value: V,
}

#[derive(Debug, Clone, Copy)]
pub struct BinarySearch<V>(pub V);

#[derive(Debug, Clone, Copy)]
pub struct Includes<O>(pub O);

operation!(Size => "size", 0);
operation!(IsEmpty => "is_empty", 0);
operation!([V] Contains<V> => "contains", 1);
operation!([V] Count<V> => "count", 1);
operation!([T: ?Sized, P] Quantified<T, P> => "quantified", 1);
operation!([V] QuantifiedEqual<V> => "quantified_equal", 1);
operation!([T: ?Sized, P] CountIf<T, P> => "count_if", 1);
operation!([V] FindIndex<V> => "find_index", 1);
operation!([T: ?Sized, P] FindIndexIf<T, P> => "find_index_if", 1);
operation!(MinValue => "min_value", 0);
operation!(MaxValue => "max_value", 0);
operation!(MinMaxValue => "minmax_value", 0);
operation!(MeanValue => "mean_value", 0);
operation!(Sum => "sum", 0);
operation!([T: ?Sized, A, F] Fold<T, A, F> => "fold", 2);
operation!([O] Equal<O> => "equal", 1);
operation!(IsSorted => "is_sorted", 0);
operation!([T: ?Sized, R, F] Transformed<T, R, F> => "transformed", 1);
operation!(ToDisplay => "to_display", 0);
operation!([V] Bound<V> => "bound", 1);
operation!([V] BinarySearch<V> => "binary_search", 1);
operation!([O] Includes<O> => "includes", 1);

impl<C: Sequence + ?Sized> Inspect<C> for Size {
    type Output = usize;

    fn inspect(self, operand: &C) -> usize {
        operand.len()
    }
}

impl<C: Sequence + ?Sized> Inspect<C> for IsEmpty {
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        operand.is_empty()
    }
}

impl<C, V> Inspect<C> for Contains<V>
where
    C: Sequence + ?Sized,
    C::Item: PartialEq<V>,
{
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        operand.iter().any(|item| *item == self.0)
    }
}

impl<C, V> Inspect<C> for Count<V>
where
    C: Sequence + ?Sized,
    C::Item: PartialEq<V>,
{
    type Output = usize;

    fn inspect(self, operand: &C) -> usize {
        operand.iter().filter(|item| **item == self.0).count()
    }
}

impl<T, C, P> Inspect<C> for CountIf<T, P>
where
    C: Sequence<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = usize;

    fn inspect(self, operand: &C) -> usize {
        operand.iter().filter(|item| (self.predicate)(*item)).count()
    }
}

impl<T, C, P> Inspect<C> for Quantified<T, P>
where
    C: Sequence<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        let predicate = self.predicate;
        self.quantifier.holds(operand.iter(), |item| predicate(item))
    }
}

impl<C, V> Inspect<C> for QuantifiedEqual<V>
where
    C: Sequence + ?Sized,
    C::Item: PartialEq<V>,
{
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        let value = self.value;
        self.quantifier.holds(operand.iter(), |item| *item == value)
    }
}

impl<C, V> Inspect<C> for FindIndex<V>
where
    C: Sequence + ?Sized,
    C::Item: PartialEq<V>,
{
    type Output = Option<usize>;

    fn inspect(self, operand: &C) -> Option<usize> {
        operand.iter().position(|item| *item == self.0)
    }
}

impl<T, C, P> Inspect<C> for FindIndexIf<T, P>
where
    C: Sequence<Item = T> + ?Sized,
    P: Fn(&T) -> bool,
{
    type Output = Option<usize>;

    fn inspect(self, operand: &C) -> Option<usize> {
        operand.iter().position(|item| (self.predicate)(item))
    }
}

impl<C> Inspect<C> for MinValue
where
    C: Sequence + ?Sized,
    C::Item: Ord + Clone,
{
    type Output = Option<C::Item>;

    fn inspect(self, operand: &C) -> Option<C::Item> {
        operand.iter().min().cloned()
    }
}

impl<C> Inspect<C> for MaxValue
where
    C: Sequence + ?Sized,
    C::Item: Ord + Clone,
{
    type Output = Option<C::Item>;

    fn inspect(self, operand: &C) -> Option<C::Item> {
        operand.iter().max().cloned()
    }
}

impl<C> Inspect<C> for MinMaxValue
where
    C: Sequence + ?Sized,
    C::Item: Ord + Clone,
{
    type Output = Option<(C::Item, C::Item)>;

    /// First minimum and last maximum, in one pass.
    fn inspect(self, operand: &C) -> Option<(C::Item, C::Item)> {
        let mut items = operand.iter();
        let first = items.next()?;
        let (low, high) = items.fold((first, first), |(low, high), item| {
            (if item < low { item } else { low }, if item >= high { item } else { high })
        });
        Some((low.clone(), high.clone()))
    }
}

impl<C> Inspect<C> for MeanValue
where
    C: Sequence + ?Sized,
    C::Item: Arithmetic,
{
    type Output = Option<f64>;

    fn inspect(self, operand: &C) -> Option<f64> {
        let (total, count) = operand
            .iter()
            .fold((0.0_f64, 0_usize), |(total, count), item| (total + item.to_f64(), count + 1));
        (count > 0).then(|| total / count as f64)
    }
}

impl<C> Inspect<C> for Sum
where
    C: Sequence + ?Sized,
    C::Item: Clone + IterSum<C::Item>,
{
    type Output = C::Item;

    fn inspect(self, operand: &C) -> C::Item {
        operand.iter().cloned().sum()
    }
}

impl<T, C, A, F> Inspect<C> for Fold<T, A, F>
where
    C: Sequence<Item = T> + ?Sized,
    F: FnMut(A, &T) -> A,
{
    type Output = A;

    fn inspect(self, operand: &C) -> A {
        operand.iter().fold(self.init, self.step)
    }
}

impl<C, O> Inspect<C> for Equal<O>
where
    C: Sequence + ?Sized,
    O: Sequence,
    C::Item: PartialEq<O::Item>,
{
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        operand.len() == self.0.len() && operand.iter().zip(self.0.iter()).all(|(a, b)| a == b)
    }
}

impl<C> Inspect<C> for IsSorted
where
    C: Sequence + ?Sized,
    C::Item: PartialOrd,
{
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        operand.iter().is_sorted()
    }
}

impl<T, R, C, F> Inspect<C> for Transformed<T, R, F>
where
    C: Sequence<Item = T> + ?Sized,
    F: Fn(&T) -> R,
{
    type Output = Vec<R>;

    fn inspect(self, operand: &C) -> Vec<R> {
        operand.iter().map(self.function).collect()
    }
}

impl<C> Inspect<C> for ToDisplay
where
    C: Sequence + ?Sized,
    C::Item: fmt::Display,
{
    type Output = String;

    fn inspect(self, operand: &C) -> String {
        let mut out = String::from("[");
        for (index, item) in operand.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "{item}");
        }
        out.push(']');
        out
    }
}

impl<C, V> Inspect<C> for Bound<V>
where
    C: Sequence + ?Sized,
    C::Item: PartialOrd<V>,
{
    type Output = usize;

    fn inspect(self, operand: &C) -> usize {
        let value = self.value;
        match self.search {
            Search::Lower => operand.partition_point(|item| *item < value),
            Search::Upper => operand.partition_point(|item| *item <= value),
        }
    }
}

impl<C, V> Inspect<C> for BinarySearch<V>
where
    C: Sequence + ?Sized,
    C::Item: PartialOrd<V>,
{
    type Output = bool;

    fn inspect(self, operand: &C) -> bool {
        let value = self.0;
        let index = operand.partition_point(|item| *item < value);
        operand.at(index).is_some_and(|item| *item == value)
    }
}

impl<C, O> Inspect<C> for Includes<O>
where
    C: Sequence + ?Sized,
    O: Sequence,
    C::Item: PartialOrd<O::Item>,
{
    type Output = bool;

    /// Merge walk over both sorted sequences; repeated needles need repeated matches.
    fn inspect(self, operand: &C) -> bool {
        let mut haystack = operand.iter();
        'needles: for needle in self.0.iter() {
            for item in haystack.by_ref() {
                if item < needle {
                    continue;
                }
                if item == needle {
                    continue 'needles;
                }
                return false;
            }
            return false;
        }
        true
    }
}

pub fn size() -> Query<Size> {
    Query::new(Size)
}

pub fn is_empty() -> Query<IsEmpty> {
    Query::new(IsEmpty)
}

pub fn contains<V>(value: V) -> Query<Contains<V>> {
    Query::new(Contains(value))
}

/// Number of elements equal to `value`.
pub fn count<V>(value: V) -> Query<Count<V>> {
    Query::new(Count(value))
}

pub fn count_if<T, P>(predicate: P) -> Query<CountIf<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Query::new(CountIf {
        predicate,
        _item: PhantomData,
    })
}

fn quantified<T: ?Sized, P>(quantifier: Quantifier, predicate: P) -> Query<Quantified<T, P>> {
    Query::new(Quantified {
        quantifier,
        predicate,
        _item: PhantomData,
    })
}

/// `true` when every element satisfies `predicate`, including for an empty operand.
pub fn all_of<T, P>(predicate: P) -> Query<Quantified<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    quantified(Quantifier::AllOf, predicate)
}

pub fn any_of<T, P>(predicate: P) -> Query<Quantified<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    quantified(Quantifier::AnyOf, predicate)
}

pub fn none_of<T, P>(predicate: P) -> Query<Quantified<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    quantified(Quantifier::NoneOf, predicate)
}

pub fn all_of_equal<V>(value: V) -> Query<QuantifiedEqual<V>> {
    Query::new(QuantifiedEqual {
        quantifier: Quantifier::AllOf,
        value,
    })
}

pub fn any_of_equal<V>(value: V) -> Query<QuantifiedEqual<V>> {
    Query::new(QuantifiedEqual {
        quantifier: Quantifier::AnyOf,
        value,
    })
}

pub fn none_of_equal<V>(value: V) -> Query<QuantifiedEqual<V>> {
    Query::new(QuantifiedEqual {
        quantifier: Quantifier::NoneOf,
        value,
    })
}

/// Position of the first element equal to `value`.
pub fn find_index<V>(value: V) -> Query<FindIndex<V>> {
    Query::new(FindIndex(value))
}

pub fn find_index_if<T, P>(predicate: P) -> Query<FindIndexIf<T, P>>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    Query::new(FindIndexIf {
        predicate,
        _item: PhantomData,
    })
}

/// Smallest element, or `None` when empty.
pub fn min_value() -> Query<MinValue> {
    Query::new(MinValue)
}

pub fn max_value() -> Query<MaxValue> {
    Query::new(MaxValue)
}

/// `(min, max)` in one pass, or `None` when empty.
pub fn minmax_value() -> Query<MinMaxValue> {
    Query::new(MinMaxValue)
}

/// Arithmetic mean as `f64`, or `None` when empty.
pub fn mean_value() -> Query<MeanValue> {
    Query::new(MeanValue)
}

pub fn sum() -> Query<Sum> {
    Query::new(Sum)
}

/// Left fold starting from `init`.
pub fn fold<T, A, F>(init: A, step: F) -> Query<Fold<T, A, F>>
where
    T: ?Sized,
    F: FnMut(A, &T) -> A,
{
    Query::new(Fold {
        init,
        step,
        _item: PhantomData,
    })
}

/// Element-wise equality with another sequence of the same length.
pub fn equal<O: Sequence>(other: O) -> Query<Equal<O>> {
    Query::new(Equal(other))
}

pub fn is_sorted() -> Query<IsSorted> {
    Query::new(IsSorted)
}

/// Map every element through `function` into a new `Vec`.
pub fn transformed<T, R, F>(function: F) -> Query<Transformed<T, R, F>>
where
    T: ?Sized,
    F: Fn(&T) -> R,
{
    Query::new(Transformed {
        function,
        _item: PhantomData,
    })
}

/// Bracketed, comma separated rendering: `[1, 2, 3]`.
pub fn to_display() -> Query<ToDisplay> {
    Query::new(ToDisplay)
}

/// Index of the first element not less than `value`. The operand must be sorted.
///
/// Slices, arrays, `Vec` and `VecDeque` binary search; other operands scan from the front.
pub fn lower_bound<V>(value: V) -> Query<Bound<V>> {
    Query::new(Bound {
        search: Search::Lower,
        value,
    })
}

/// Index of the first element greater than `value`. The operand must be sorted.
pub fn upper_bound<V>(value: V) -> Query<Bound<V>> {
    Query::new(Bound {
        search: Search::Upper,
        value,
    })
}

/// Whether a sorted operand contains `value`.
pub fn binary_search<V>(value: V) -> Query<BinarySearch<V>> {
    Query::new(BinarySearch(value))
}

/// Whether every element of the sorted `other` appears in the sorted operand, counting
/// repetitions.
pub fn includes<O: Sequence>(other: O) -> Query<Includes<O>> {
    Query::new(Includes(other))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, LinkedList};

    use super::*;
    use crate::ops::{filter, sub_range};

    #[test]
    fn counting() {
        let v = vec![1, 3, 1, 1, 5];
        assert_eq!(&v | size(), 5);
        assert_eq!(&v | count(1), 3);
        assert_eq!(&v | count_if(|x: &i32| *x > 1), 2);
        assert!(&v | contains(5));
        assert!(!(&v | is_empty()));
    }

    #[test]
    fn quantifiers() {
        let v = vec![2, 4, 6];
        assert!(&v | all_of(|x: &i32| x % 2 == 0));
        assert!(!(&v | any_of(|x: &i32| *x > 6)));
        assert!(&v | none_of(|x: &i32| *x < 0));
        assert!(vec![7, 7] | all_of_equal(7));
        assert!(&v | any_of_equal(4));
        assert!(&v | none_of_equal(5));

        let empty: Vec<i32> = Vec::new();
        assert!(&empty | all_of(|_: &i32| false));
        assert!(!(&empty | any_of(|_: &i32| true)));
    }

    #[test]
    fn positions() {
        let l: LinkedList<&str> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(&l | find_index("c"), Some(2));
        assert_eq!(&l | find_index("z"), None);
        assert_eq!(&l | find_index_if(|s: &&str| s.starts_with('b')), Some(1));
    }

    #[test]
    fn extremes_and_means() {
        let v = vec![4, 3, 4, 5, 6, 7];
        assert_eq!(&v | min_value(), Some(3));
        assert_eq!(&v | max_value(), Some(7));
        assert_eq!(&v | minmax_value(), Some((3, 7)));
        assert_eq!(&v | sum(), 29);
        assert_eq!(vec![1.0_f32, 2.0] | mean_value(), Some(1.5));

        let empty: Vec<u8> = Vec::new();
        assert_eq!(&empty | minmax_value(), None);
        assert_eq!(&empty | mean_value(), None);
    }

    #[test]
    fn folding_and_mapping() {
        let v = vec![1, 2, 3];
        assert_eq!(&v | fold(String::new(), |acc: String, x: &i32| acc + &x.to_string()), "123");
        assert_eq!(&v | transformed(|x: &i32| x * x), vec![1, 4, 9]);
    }

    #[test]
    fn equality_and_order() {
        let v = vec![1, 2, 3];
        let s = BTreeSet::from([1, 2, 3]);
        assert!(&v | equal(&s));
        assert!(!(&v | equal(vec![1, 2])));
        assert!(&v | is_sorted());
        assert!(!(vec![2, 1] | is_sorted()));
    }

    #[test]
    fn display_rendering() {
        assert_eq!(vec![1, 2, 3] | to_display(), "[1, 2, 3]");
        let empty: Vec<i32> = Vec::new();
        assert_eq!(&empty | to_display(), "[]");
    }

    #[test]
    fn queries_run_on_views() {
        let v: Vec<i32> = (1..=10).collect();
        assert_eq!(&v | filter(|x: &i32| x % 2 == 0) | size(), 5);
        assert_eq!(&v | sub_range(7) | sum(), 27);
        assert_eq!(&v | sub_range(7) | to_display(), "[8, 9, 10]");
    }

    #[test]
    fn sorted_range_searches() {
        let v = vec![1, 2, 4, 4, 4, 7];
        assert_eq!(&v | lower_bound(4), 2);
        assert_eq!(&v | upper_bound(4), 5);
        assert_eq!(&v | lower_bound(9), 6);
        assert!(&v | binary_search(7));
        assert!(!(&v | binary_search(3)));

        let l: LinkedList<i32> = v.iter().copied().collect();
        assert_eq!(&l | lower_bound(4), 2);
        assert_eq!(&l | upper_bound(0), 0);
        assert!(!(&l | binary_search(8)));
    }

    #[test]
    fn includes_counts_repetitions() {
        let v = vec![1, 2, 2, 3, 5];
        assert!(&v | includes(vec![2, 2, 5]));
        assert!(&v | includes(Vec::<i32>::new()));
        assert!(!(&v | includes(vec![2, 2, 2])));
        assert!(!(&v | includes(vec![4])));
        assert!(BTreeSet::from([1, 3, 9]) | includes(&[3, 9]));
    }

    #[test]
    fn means_over_integers() {
        let big: Vec<u64> = vec![10, 20, 40];
        assert_eq!(&big | mean_value(), Some(70.0 / 3.0));
        assert_eq!(vec![-2_i64, 4] | mean_value(), Some(1.0));
        assert_eq!(vec![usize::MAX, usize::MAX] | mean_value(), Some(usize::MAX as f64));
    }
}
