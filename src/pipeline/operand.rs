//! `BitOr` impls for every supported left operand.
//!
//! The left side of `|` has to be a concrete type (coherence forbids `impl<T> BitOr<_> for T`),
//! so each std container, `String`, `&str` and the numeric primitives get their impls here, one
//! per category. The crate's own wrapper and view types are listed at the bottom.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::ops::BitOr;

use super::{Apply, Edit, Inspect, Modify, Pipe, PipeWith, Query, Tag};
use crate::category::Owned;
use crate::mutable::Mutable;
use crate::views::{FilterView, FilterViewMut, SubRange, SubRangeMut};

macro_rules! pipe_operand {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)* F, R> BitOr<Pipe<F>> for $ty
        where
            F: FnOnce($ty) -> R,
        {
            type Output = R;

            fn bitor(self, stage: Pipe<F>) -> R {
                stage.call(self)
            }
        }

        impl<$($g)* F, A, R> BitOr<PipeWith<F, A>> for $ty
        where
            F: FnOnce($ty, A) -> R,
        {
            type Output = R;

            fn bitor(self, stage: PipeWith<F, A>) -> R {
                stage.call(self)
            }
        }
    };
}

macro_rules! container_operand {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)* K: Apply<Owned<$ty>>> BitOr<Tag<K>> for $ty {
            type Output = K::Output;

            fn bitor(self, stage: Tag<K>) -> K::Output {
                stage.0.apply(Owned(self))
            }
        }

        impl<'a, $($g)* K: Apply<&'a $ty>> BitOr<Tag<K>> for &'a $ty {
            type Output = K::Output;

            fn bitor(self, stage: Tag<K>) -> K::Output {
                stage.0.apply(self)
            }
        }

        impl<'a, $($g)* K: Apply<&'a mut $ty>> BitOr<Tag<K>> for &'a mut $ty {
            type Output = K::Output;

            fn bitor(self, stage: Tag<K>) -> K::Output {
                stage.0.apply(self)
            }
        }

        impl<$($g)* K: Inspect<$ty>> BitOr<Query<K>> for $ty {
            type Output = K::Output;

            fn bitor(self, stage: Query<K>) -> K::Output {
                stage.0.inspect(&self)
            }
        }

        impl<'a, $($g)* K: Inspect<$ty>> BitOr<Query<K>> for &'a $ty {
            type Output = K::Output;

            fn bitor(self, stage: Query<K>) -> K::Output {
                stage.0.inspect(self)
            }
        }

        impl<'a, $($g)* K: Inspect<$ty>> BitOr<Query<K>> for &'a mut $ty {
            type Output = K::Output;

            fn bitor(self, stage: Query<K>) -> K::Output {
                stage.0.inspect(&*self)
            }
        }

        impl<$($g)* K: Modify<$ty>> BitOr<Edit<K>> for $ty {
            type Output = $ty;

            fn bitor(mut self, stage: Edit<K>) -> $ty {
                stage.0.modify(&mut self);
                self
            }
        }

        impl<'a, $($g)* K: Modify<$ty>> BitOr<Edit<K>> for &'a $ty
        where
            $ty: Clone,
        {
            type Output = $ty;

            fn bitor(self, stage: Edit<K>) -> $ty {
                let mut copy = self.clone();
                stage.0.modify(&mut copy);
                copy
            }
        }

        impl<'a, $($g)* K: Modify<$ty>> BitOr<Edit<K>> for &'a mut $ty
        where
            $ty: Clone,
        {
            type Output = $ty;

            fn bitor(self, stage: Edit<K>) -> $ty {
                let mut copy = (*self).clone();
                stage.0.modify(&mut copy);
                copy
            }
        }

        pipe_operand!([$($g)*] $ty);
        pipe_operand!(['a, $($g)*] &'a $ty);
        pipe_operand!(['a, $($g)*] &'a mut $ty);
    };
}

container_operand!([T,] Vec<T>);
container_operand!([T,] VecDeque<T>);
container_operand!([T,] LinkedList<T>);
container_operand!([T, S,] HashSet<T, S>);
container_operand!([T,] BTreeSet<T>);
container_operand!([T, const N: usize,] [T; N]);
container_operand!([] String);

// String slices: read-only, so only the shared category exists.

impl<'a, K: Apply<&'a str>> BitOr<Tag<K>> for &'a str {
    type Output = K::Output;

    fn bitor(self, stage: Tag<K>) -> K::Output {
        stage.0.apply(self)
    }
}

impl<'a, K: Inspect<str>> BitOr<Query<K>> for &'a str {
    type Output = K::Output;

    fn bitor(self, stage: Query<K>) -> K::Output {
        stage.0.inspect(self)
    }
}

pipe_operand!(['a,] &'a str);

macro_rules! scalar_operand {
    ($($ty:ty),* $(,)?) => {$(
        impl<K: Apply<Owned<$ty>>> BitOr<Tag<K>> for $ty {
            type Output = K::Output;

            fn bitor(self, stage: Tag<K>) -> K::Output {
                stage.0.apply(Owned(self))
            }
        }

        impl<'a, K: Apply<&'a $ty>> BitOr<Tag<K>> for &'a $ty {
            type Output = K::Output;

            fn bitor(self, stage: Tag<K>) -> K::Output {
                stage.0.apply(self)
            }
        }

        pipe_operand!([] $ty);
        pipe_operand!(['a,] &'a $ty);
    )*};
}

scalar_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

// Crate-local operands.

impl<'m, C: ?Sized, K: Apply<Mutable<'m, C>>> BitOr<Tag<K>> for Mutable<'m, C> {
    type Output = K::Output;

    fn bitor(self, stage: Tag<K>) -> K::Output {
        stage.0.apply(self)
    }
}

impl<'m, C: ?Sized, K: Inspect<C>> BitOr<Query<K>> for Mutable<'m, C> {
    type Output = K::Output;

    fn bitor(self, stage: Query<K>) -> K::Output {
        stage.0.inspect(self.get_ref())
    }
}

impl<'m, C: ?Sized, K: Modify<C>> BitOr<Edit<K>> for Mutable<'m, C> {
    type Output = Self;

    fn bitor(mut self, stage: Edit<K>) -> Self {
        stage.0.modify(self.get_mut());
        self
    }
}

pipe_operand!(['m, C: ?Sized,] Mutable<'m, C>);

macro_rules! view_operand {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)* K: Apply<$ty>> BitOr<Tag<K>> for $ty {
            type Output = K::Output;

            fn bitor(self, stage: Tag<K>) -> K::Output {
                stage.0.apply(self)
            }
        }

        impl<$($g)* K: Inspect<$ty>> BitOr<Query<K>> for $ty {
            type Output = K::Output;

            fn bitor(self, stage: Query<K>) -> K::Output {
                stage.0.inspect(&self)
            }
        }

        pipe_operand!([$($g)*] $ty);
    };
    (mut [$($g:tt)*] $ty:ty) => {
        view_operand!([$($g)*] $ty);

        impl<$($g)* K: Modify<$ty>> BitOr<Edit<K>> for $ty {
            type Output = Self;

            fn bitor(mut self, stage: Edit<K>) -> Self {
                stage.0.modify(&mut self);
                self
            }
        }
    };
}

view_operand!([S, P,] FilterView<S, P>);
view_operand!(mut [S, P,] FilterViewMut<S, P>);
view_operand!(['s, C: ?Sized,] SubRange<'s, C>);
view_operand!(mut ['s, C: ?Sized,] SubRangeMut<'s, C>);
