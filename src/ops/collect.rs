//! Materialization: copy the elements of any operand, views included, into a fresh container.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::capability::Sequence;
use crate::pipeline::{operation, Inspect, Query};

/// Clone every element into a `B`.
pub struct CollectInto<B>(PhantomData<fn() -> B>);

impl<B> Clone for CollectInto<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for CollectInto<B> {}

operation!([B] CollectInto<B> => "collect", 0);

impl<B, C> Inspect<C> for CollectInto<B>
where
    C: Sequence + ?Sized,
    C::Item: Clone,
    B: FromIterator<C::Item>,
{
    type Output = B;

    fn inspect(self, operand: &C) -> B {
        operand.iter().cloned().collect()
    }
}

/// Materialize into any [`FromIterator`] container.
///
/// ```
/// use std::collections::VecDeque;
/// use collection_pipes::ops::{collect_into, filter};
///
/// let v = vec![5, 6, 7, 8];
/// let d = &v | filter(|x: &i32| *x > 6) | collect_into::<VecDeque<_>>();
/// assert_eq!(d, VecDeque::from([7, 8]));
/// ```
pub fn collect_into<B>() -> Query<CollectInto<B>> {
    Query::new(CollectInto(PhantomData))
}

pub fn to_vec<T>() -> Query<CollectInto<Vec<T>>> {
    collect_into()
}

pub fn to_deque<T>() -> Query<CollectInto<VecDeque<T>>> {
    collect_into()
}

pub fn to_list<T>() -> Query<CollectInto<LinkedList<T>>> {
    collect_into()
}

/// Unordered set; duplicates collapse.
pub fn to_set<T: Eq + Hash>() -> Query<CollectInto<HashSet<T>>> {
    collect_into()
}

pub fn to_btree_set<T: Ord>() -> Query<CollectInto<BTreeSet<T>>> {
    collect_into()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet, LinkedList};

    use super::{to_btree_set, to_deque, to_list, to_set, to_vec};
    use crate::ops::sub_range;

    #[test]
    fn materialize_between_container_kinds() {
        let l: LinkedList<i32> = [3, 1, 3, 2].into_iter().collect();
        assert_eq!(&l | to_vec(), vec![3, 1, 3, 2]);
        assert_eq!(&l | to_set(), HashSet::from([1, 2, 3]));
        assert_eq!(&l | to_btree_set(), BTreeSet::from([1, 2, 3]));
        assert_eq!(vec![1, 2] | to_list(), LinkedList::from([1, 2]));
    }

    #[test]
    fn materialize_a_window() {
        let v = vec!['a', 'b', 'c', 'd'];
        let d = &v | sub_range(2) | to_deque();
        assert_eq!(d.iter().collect::<String>(), "cd");
    }
}
