//! Stages over single values: bounds checks, interval mapping and math functions.
//!
//! The numeric stages accept every integer and float primitive. Rounding keeps the operand's
//! type; real-valued functions return the float type itself, or `f64` for integers.
//!
//! ```
//! use collection_pipes::ops::{ceil, pow, reinterval, sqrt};
//!
//! assert_eq!(2.1_f64 | ceil(), 3.0);
//! assert_eq!(16_u32 | sqrt(), 4.0_f64);
//! assert_eq!(3_i64 | pow(2.0), 9.0);
//! assert_eq!(5_u64 | reinterval(0, 10, 0, 100), 50);
//! ```

use std::fmt::Debug;

use crate::category::Owned;
use crate::contract;
use crate::error::ContractViolation;
use crate::numeric::{Arithmetic, MathFn, Real, Rounding};
use crate::pipeline::{operation, Apply, Tag};

#[derive(Debug, Clone, Copy)]
pub struct Clamp<T> {
    low: T,
    high: T,
}

#[derive(Debug, Clone, Copy)]
pub struct IsAnyOf<A>(pub A);

/// Linear map of `[from_low, from_high]` onto `[to_low, to_high]`.
#[derive(Debug, Clone, Copy)]
pub struct Reinterval<T> {
    from_low: T,
    from_high: T,
    to_low: T,
    to_high: T,
    clamped: bool,
}

/// `abs`, `floor`, `ceil`, `round` or `trunc`.
#[derive(Debug, Clone, Copy)]
pub struct Rounded(pub Rounding);

/// A real-valued function such as `sqrt` or `sin`.
#[derive(Debug, Clone, Copy)]
pub struct Evaluated(pub MathFn);

#[derive(Debug, Clone, Copy)]
pub struct Powered(pub f64);

operation!([T] Clamp<T> => "clamp", 2);
operation!([A] IsAnyOf<A> => "is_any_of", 1);
operation!([T] Reinterval<T> => "reinterval", 4);
operation!(Rounded => "rounded", 0);
operation!(Evaluated => "evaluated", 0);
operation!(Powered => "pow", 1);

impl<T: PartialOrd + Debug> Clamp<T> {
    fn bound(self, value: T) -> T {
        let ordered = contract::check(self.low <= self.high, || ContractViolation::InvalidBounds {
            operation: "clamp",
            low: format!("{:?}", self.low),
            high: format!("{:?}", self.high),
        });
        if !ordered {
            return value;
        }
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }
}

impl<T: PartialOrd + Debug> Apply<Owned<T>> for Clamp<T> {
    type Output = T;

    fn apply(self, operand: Owned<T>) -> T {
        self.bound(operand.into_inner())
    }
}

impl<'a, T: PartialOrd + Debug + Clone> Apply<&'a T> for Clamp<T> {
    type Output = T;

    fn apply(self, operand: &'a T) -> T {
        self.bound(operand.clone())
    }
}

impl<T, A> Apply<Owned<T>> for IsAnyOf<A>
where
    T: PartialEq,
    A: AsRef<[T]>,
{
    type Output = bool;

    fn apply(self, operand: Owned<T>) -> bool {
        self.0.as_ref().contains(&operand.0)
    }
}

impl<'a, T, A> Apply<&'a T> for IsAnyOf<A>
where
    T: PartialEq,
    A: AsRef<[T]>,
{
    type Output = bool;

    fn apply(self, operand: &'a T) -> bool {
        self.0.as_ref().contains(operand)
    }
}

impl<T: Arithmetic> Reinterval<T> {
    fn map(self, value: T) -> T {
        let (from_low, from_high) = (self.from_low.to_f64(), self.from_high.to_f64());
        let (to_low, to_high) = (self.to_low.to_f64(), self.to_high.to_f64());
        let source_width = from_high - from_low;
        if !contract::check(source_width != 0.0, || ContractViolation::DegenerateInterval {
            operation: if self.clamped { "reinterval_clamped" } else { "reinterval" },
            low: from_low,
            high: from_high,
        }) {
            return self.to_low;
        }

        let mapped = (value.to_f64() - from_low) / source_width * (to_high - to_low) + to_low;
        if !self.clamped {
            return T::from_f64(mapped);
        }
        let mapped = if mapped < to_low { to_low } else { mapped };
        T::from_f64(if mapped > to_high { to_high } else { mapped })
    }
}

impl<T: Arithmetic> Apply<Owned<T>> for Reinterval<T> {
    type Output = T;

    fn apply(self, operand: Owned<T>) -> T {
        self.map(operand.into_inner())
    }
}

impl<'a, T: Arithmetic> Apply<&'a T> for Reinterval<T> {
    type Output = T;

    fn apply(self, operand: &'a T) -> T {
        self.map(*operand)
    }
}

impl<T: Arithmetic> Apply<Owned<T>> for Rounded {
    type Output = T;

    fn apply(self, operand: Owned<T>) -> T {
        operand.into_inner().rounded(self.0)
    }
}

impl<'a, T: Arithmetic> Apply<&'a T> for Rounded {
    type Output = T;

    fn apply(self, operand: &'a T) -> T {
        operand.rounded(self.0)
    }
}

impl<T: Arithmetic> Apply<Owned<T>> for Evaluated {
    type Output = T::Real;

    fn apply(self, operand: Owned<T>) -> T::Real {
        operand.into_inner().to_real().evaluate(self.0)
    }
}

impl<'a, T: Arithmetic> Apply<&'a T> for Evaluated {
    type Output = T::Real;

    fn apply(self, operand: &'a T) -> T::Real {
        operand.to_real().evaluate(self.0)
    }
}

impl<T: Arithmetic> Apply<Owned<T>> for Powered {
    type Output = T::Real;

    fn apply(self, operand: Owned<T>) -> T::Real {
        operand.into_inner().to_real().power(Arithmetic::from_f64(self.0))
    }
}

impl<'a, T: Arithmetic> Apply<&'a T> for Powered {
    type Output = T::Real;

    fn apply(self, operand: &'a T) -> T::Real {
        operand.to_real().power(Arithmetic::from_f64(self.0))
    }
}

/// Limit a value to `[low, high]`.
///
/// Bounds with `low > high` are a precondition violation; the value passes through unchanged.
pub fn clamp<T: PartialOrd>(low: T, high: T) -> Tag<Clamp<T>> {
    Tag::new(Clamp { low, high })
}

/// Whether the value equals any element of `candidates`.
///
/// ```
/// use collection_pipes::ops::is_any_of;
///
/// assert!(3_i32 | is_any_of([1, 2, 3]));
/// assert!(!(7_u8 | is_any_of(vec![1, 2])));
/// ```
pub fn is_any_of<A>(candidates: A) -> Tag<IsAnyOf<A>> {
    Tag::new(IsAnyOf(candidates))
}

/// Map `value` from `[from_low, from_high]` to `[to_low, to_high]`.
///
/// The mapping is computed in `f64`; integer results are truncated toward zero and saturate at
/// the type's bounds. An empty source interval is a precondition violation and yields `to_low`.
///
/// ```
/// use collection_pipes::ops::reinterval;
///
/// assert_eq!(5.0_f64 | reinterval(0.0, 10.0, 0.0, 1.0), 0.5);
/// ```
pub fn reinterval<T>(from_low: T, from_high: T, to_low: T, to_high: T) -> Tag<Reinterval<T>> {
    Tag::new(Reinterval {
        from_low,
        from_high,
        to_low,
        to_high,
        clamped: false,
    })
}

/// [`reinterval`], then limited to `[to_low, to_high]`.
pub fn reinterval_clamped<T>(
    from_low: T,
    from_high: T,
    to_low: T,
    to_high: T,
) -> Tag<Reinterval<T>> {
    Tag::new(Reinterval {
        from_low,
        from_high,
        to_low,
        to_high,
        clamped: true,
    })
}

/// Absolute value. Signed integers saturate, so `i32::MIN` maps to `i32::MAX`.
pub fn abs() -> Tag<Rounded> {
    Tag::new(Rounded(Rounding::Abs))
}

pub fn floor() -> Tag<Rounded> {
    Tag::new(Rounded(Rounding::Floor))
}

pub fn ceil() -> Tag<Rounded> {
    Tag::new(Rounded(Rounding::Ceil))
}

/// Nearest integer, half away from zero. Integers pass through.
pub fn round() -> Tag<Rounded> {
    Tag::new(Rounded(Rounding::Round))
}

pub fn trunc() -> Tag<Rounded> {
    Tag::new(Rounded(Rounding::Trunc))
}

pub fn pow(exponent: f64) -> Tag<Powered> {
    Tag::new(Powered(exponent))
}

macro_rules! real_functions {
    ($($name:ident => $function:ident),* $(,)?) => {$(
        pub fn $name() -> Tag<Evaluated> {
            Tag::new(Evaluated(MathFn::$function))
        }
    )*};
}

real_functions!(
    sqrt => Sqrt,
    exp => Exp,
    exp2 => Exp2,
    ln => Ln,
    log10 => Log10,
    sin => Sin,
    cos => Cos,
    tan => Tan,
    asin => Asin,
    acos => Acos,
    atan => Atan,
    sinh => Sinh,
    cosh => Cosh,
    tanh => Tanh,
);
