//! Primitive arithmetic types as the averaging, interval and math stages see them.
//!
//! Every integer and float primitive implements [`Arithmetic`]. Integers go through `f64` where a
//! stage needs fractional results, so values beyond 2^53 lose precision there.

use std::fmt::Debug;

/// Rounding-like functions that keep the operand's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Abs,
    Floor,
    Ceil,
    /// Half away from zero.
    Round,
    Trunc,
}

/// Real-valued functions. Integer operands are evaluated as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
    Sqrt,
    Exp,
    Exp2,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

pub trait Arithmetic: Copy + PartialOrd + Debug {
    /// Float type used for real-valued functions: the type itself for floats, `f64` otherwise.
    type Real: Real;

    fn to_f64(self) -> f64;

    /// Saturating conversion back from `f64`. NaN becomes zero for integers.
    fn from_f64(value: f64) -> Self;

    fn to_real(self) -> Self::Real;

    fn rounded(self, rounding: Rounding) -> Self;
}

/// `f32` and `f64`.
pub trait Real: Arithmetic<Real = Self> {
    fn evaluate(self, function: MathFn) -> Self;

    fn power(self, exponent: Self) -> Self;
}

macro_rules! signed_integer {
    ($($ty:ty),*) => {$(
        impl Arithmetic for $ty {
            type Real = f64;

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn to_real(self) -> f64 {
                self as f64
            }

            fn rounded(self, rounding: Rounding) -> Self {
                match rounding {
                    Rounding::Abs => self.saturating_abs(),
                    Rounding::Floor | Rounding::Ceil | Rounding::Round | Rounding::Trunc => self,
                }
            }
        }
    )*};
}

macro_rules! unsigned_integer {
    ($($ty:ty),*) => {$(
        impl Arithmetic for $ty {
            type Real = f64;

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn to_real(self) -> f64 {
                self as f64
            }

            fn rounded(self, _rounding: Rounding) -> Self {
                self
            }
        }
    )*};
}

macro_rules! float {
    ($($ty:ident),*) => {$(
        impl Arithmetic for $ty {
            type Real = $ty;

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn to_real(self) -> $ty {
                self
            }

            fn rounded(self, rounding: Rounding) -> Self {
                match rounding {
                    Rounding::Abs => self.abs(),
                    Rounding::Floor => self.floor(),
                    Rounding::Ceil => self.ceil(),
                    Rounding::Round => self.round(),
                    Rounding::Trunc => self.trunc(),
                }
            }
        }

        impl Real for $ty {
            fn evaluate(self, function: MathFn) -> Self {
                match function {
                    MathFn::Sqrt => self.sqrt(),
                    MathFn::Exp => self.exp(),
                    MathFn::Exp2 => self.exp2(),
                    MathFn::Ln => self.ln(),
                    MathFn::Log10 => self.log10(),
                    MathFn::Sin => self.sin(),
                    MathFn::Cos => self.cos(),
                    MathFn::Tan => self.tan(),
                    MathFn::Asin => self.asin(),
                    MathFn::Acos => self.acos(),
                    MathFn::Atan => self.atan(),
                    MathFn::Sinh => self.sinh(),
                    MathFn::Cosh => self.cosh(),
                    MathFn::Tanh => self.tanh(),
                }
            }

            fn power(self, exponent: Self) -> Self {
                self.powf(exponent)
            }
        }
    )*};
}

signed_integer!(i8, i16, i32, i64, i128, isize);
unsigned_integer!(u8, u16, u32, u64, u128, usize);
float!(f32, f64);
