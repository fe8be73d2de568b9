use serde::Serialize;

/// Compile-time classification of a pipeline operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCategory {
    /// A value moved into the stage. Nothing can borrow from it past the stage.
    Temporary,
    /// A long-lived shared borrow: read-only implementations only.
    Shared,
    /// A long-lived exclusive borrow: reference-returning implementations preferred.
    Exclusive,
    /// A [`crate::Mutable`] wrapper: the in-place overload set.
    Wrapped,
}

/// Anything that can flow into a stage, with its category fixed by the type.
pub trait Operand {
    const CATEGORY: ValueCategory;
}

/// Marks a container that was moved into a stage.
///
/// Stages receive `Owned(value)` when the left operand of `|` is passed by value. Implementations
/// for `Owned<C>` must return owned data, since the container is dropped at the end of the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Owned<C>(pub C);

impl<C> Owned<C> {
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C> Operand for Owned<C> {
    const CATEGORY: ValueCategory = ValueCategory::Temporary;
}

impl<C: ?Sized> Operand for &C {
    const CATEGORY: ValueCategory = ValueCategory::Shared;
}

impl<C: ?Sized> Operand for &mut C {
    const CATEGORY: ValueCategory = ValueCategory::Exclusive;
}

#[cfg(test)]
mod tests {
    use super::{Operand, Owned, ValueCategory};

    fn category_of<O: Operand>(_: &O) -> ValueCategory {
        O::CATEGORY
    }

    #[test]
    fn category_follows_the_type() {
        let mut v = vec![1, 2];
        assert_eq!(category_of(&&v), ValueCategory::Shared);
        assert_eq!(category_of(&&mut v), ValueCategory::Exclusive);
        assert_eq!(category_of(&Owned(v)), ValueCategory::Temporary);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ValueCategory::Temporary).unwrap();
        assert_eq!(json, "\"temporary\"");
    }
}
