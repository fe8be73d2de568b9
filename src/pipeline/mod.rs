//! Stages and the resolver traits behind `operand | stage`.
//!
//! A stage is an operation descriptor wrapped in one of four types. The wrapper decides how the
//! operand's [`ValueCategory`](crate::ValueCategory) is resolved:
//!
//! - [`Tag`]: the operation provides one [`Apply`] impl per category it supports. The operand is
//!   passed as `Owned<C>` (temporary), `&C`, `&mut C`, [`Mutable`](crate::Mutable) or a view. A
//!   missing impl is a compile error, which is how "no cursor into a temporary" and "no mutation
//!   through a shared reference" are enforced.
//! - [`Query`]: read-only operations with an owned result. One [`Inspect`] impl serves every
//!   category.
//! - [`Edit`]: in-place edits described once by [`Modify`]. A temporary is edited and handed back,
//!   a borrowed container is cloned first, and a `Mutable` or mutable view is edited in place.
//! - [`Pipe`] / [`PipeWith`]: arbitrary functions, called with the operand unchanged.
//!
//! Custom operations plug in by implementing [`Operation`] plus the resolver trait and wrapping the
//! descriptor with [`Tag::new`], [`Query::new`] or [`Edit::new`].

mod compose;
mod operand;

pub use compose::{pipe, pipe_with, Pipe, PipeWith};

/// Identity of an operation descriptor.
pub trait Operation {
    /// Stable operation name, used in violation reports.
    const NAME: &'static str;
    /// Number of captured arguments, 0 to 4.
    const ARITY: usize;
}

/// Category-resolved application. `O` is the operand as the stage receives it.
pub trait Apply<O>: Operation {
    type Output;

    fn apply(self, operand: O) -> Self::Output;
}

/// Read-only evaluation producing an owned result.
pub trait Inspect<C: ?Sized>: Operation {
    type Output;

    fn inspect(self, operand: &C) -> Self::Output;
}

/// In-place edit of a container or mutable view.
pub trait Modify<C: ?Sized>: Operation {
    fn modify(self, target: &mut C);
}

macro_rules! stage {
    ($(#[$meta:meta])* $name:ident, $resolver:literal) => {
        $(#[$meta])*
        #[doc = concat!("\n\nThe descriptor is resolved through [`", $resolver, "`].")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        #[must_use = "stages do nothing until applied with `|`"]
        pub struct $name<K>(pub(crate) K);

        impl<K> $name<K> {
            pub const fn new(kind: K) -> Self {
                Self(kind)
            }

            pub fn kind(&self) -> &K {
                &self.0
            }

            pub fn into_kind(self) -> K {
                self.0
            }
        }

        impl<K: Operation> $name<K> {
            pub const NAME: &'static str = K::NAME;
            pub const ARITY: usize = K::ARITY;
        }
    };
}

stage!(
    /// Stage whose implementation depends on the operand's category.
    Tag,
    "Apply"
);
stage!(
    /// Read-only stage with an owned result for every category.
    Query,
    "Inspect"
);
stage!(
    /// Editing stage: copy-and-edit for borrowed operands, in place for `Mutable` and views.
    Edit,
    "Modify"
);

/// Declares the [`Operation`] identity of descriptor types.
macro_rules! operation {
    ([$($g:tt)*] $ty:ty => $name:literal, $arity:literal) => {
        impl<$($g)*> $crate::pipeline::Operation for $ty {
            const NAME: &'static str = $name;
            const ARITY: usize = $arity;
        }
    };
    ($ty:ty => $name:literal, $arity:literal) => {
        impl $crate::pipeline::Operation for $ty {
            const NAME: &'static str = $name;
            const ARITY: usize = $arity;
        }
    };
}

pub(crate) use operation;

#[cfg(test)]
mod tests {
    use super::{Apply, Operation, Tag};
    use crate::category::Owned;

    struct Doubled;

    operation!(Doubled => "doubled", 0);

    struct Scaled<T>(T);

    operation!([T: Copy] Scaled<T> => "scaled", 1);

    impl Apply<Owned<i32>> for Doubled {
        type Output = i32;

        fn apply(self, operand: Owned<i32>) -> i32 {
            operand.0 * 2
        }
    }

    #[test]
    fn custom_operations_plug_into_the_operator() {
        let out: i32 = 21_i32 | Tag::new(Doubled);
        assert_eq!(out, 42);
        assert_eq!(Tag::<Doubled>::NAME, "doubled");
        assert_eq!(<Doubled as Operation>::ARITY, 0);
    }

    #[test]
    fn generic_operations_declare_their_identity() {
        let _ = Scaled(2_u8).0;
        assert_eq!(<Scaled<u8> as Operation>::NAME, "scaled");
        assert_eq!(<Scaled<f64> as Operation>::ARITY, 1);
    }
}
