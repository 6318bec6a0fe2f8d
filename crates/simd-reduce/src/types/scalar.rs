use std::fmt;
use std::ops::{Div, Neg};
use std::str::FromStr;

use crate::error::ReduceError;

/// The closed set of element kinds the engine reduces over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    F32,
    F64,
    I32,
    I64,
}

impl ScalarKind {
    /// All supported kinds, narrowest float first.
    pub const ALL: [ScalarKind; 4] = [Self::F32, Self::F64, Self::I32, Self::I64];

    /// Width of one element in bytes.
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F64 | Self::I64 => 8,
        }
    }

    /// Short Rust-style name (`"f64"`, `"i32"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarKind {
    type Err = ReduceError;

    /// Parses the type names integration layers tend to carry around
    /// (`"double"`, `"float32"`, `"int"`, `"long"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f32" | "float" | "float32" | "single" => Ok(Self::F32),
            "f64" | "double" | "float64" => Ok(Self::F64),
            "i32" | "int" | "int32" => Ok(Self::I32),
            "i64" | "long" | "int64" => Ok(Self::I64),
            other => Err(ReduceError::UnsupportedType(format!(
                "no reduction support for element type `{}`",
                other
            ))),
        }
    }
}

/// Element types the reduction kernels operate on.
///
/// Integer arithmetic wraps on overflow so that the vector and scalar paths
/// produce identical results for any input order.
///
/// `minimum`/`maximum` on floats follow `f32::min`/`f64::min`, while the
/// hardware lane instructions return the second operand when either is NaN.
/// Results for inputs containing NaN are therefore unspecified.
pub trait Numeric:
    Copy + fmt::Debug + fmt::Display + PartialOrd + Default + Send + Sync + 'static
{
    /// Runtime tag for this element type.
    const KIND: ScalarKind;

    /// Type produced by [`Numeric::mean`]: floats average in their own
    /// width, integers average to `f64`.
    type Mean: Numeric;

    /// Additive identity.
    fn zero() -> Self;

    /// Largest value of the type (`+inf` for floats). Identity of `minimum`.
    fn max_value() -> Self;

    /// Smallest value of the type (`-inf` for floats). Identity of `maximum`.
    fn min_value() -> Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn minimum(self, rhs: Self) -> Self;
    fn maximum(self, rhs: Self) -> Self;

    /// Lossy conversion used for reporting.
    fn to_f64(self) -> f64;

    /// `sum / count`. `count` must be non-zero.
    fn mean(sum: Self, count: usize) -> Self::Mean;
}

/// Floating-point element types (`f32`, `f64`).
pub trait Real: Numeric<Mean = Self> + Neg<Output = Self> + Div<Output = Self> {
    fn sqrt(self) -> Self;

    /// Convert from an `f64` constant.
    fn from_f64(v: f64) -> Self;

    fn from_usize(v: usize) -> Self;
}

macro_rules! impl_numeric_float {
    ($ty:ty, $kind:expr) => {
        impl Numeric for $ty {
            const KIND: ScalarKind = $kind;
            type Mean = $ty;

            #[inline(always)]
            fn zero() -> Self {
                0.0
            }
            #[inline(always)]
            fn max_value() -> Self {
                <$ty>::INFINITY
            }
            #[inline(always)]
            fn min_value() -> Self {
                <$ty>::NEG_INFINITY
            }
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self + rhs
            }
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                self - rhs
            }
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                self * rhs
            }
            #[inline(always)]
            fn minimum(self, rhs: Self) -> Self {
                <$ty>::min(self, rhs)
            }
            #[inline(always)]
            fn maximum(self, rhs: Self) -> Self {
                <$ty>::max(self, rhs)
            }
            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn mean(sum: Self, count: usize) -> Self {
                sum / count as $ty
            }
        }

        impl Real for $ty {
            #[inline(always)]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
            #[inline(always)]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }
            #[inline(always)]
            fn from_usize(v: usize) -> Self {
                v as $ty
            }
        }
    };
}

macro_rules! impl_numeric_int {
    ($ty:ty, $kind:expr) => {
        impl Numeric for $ty {
            const KIND: ScalarKind = $kind;
            type Mean = f64;

            #[inline(always)]
            fn zero() -> Self {
                0
            }
            #[inline(always)]
            fn max_value() -> Self {
                <$ty>::MAX
            }
            #[inline(always)]
            fn min_value() -> Self {
                <$ty>::MIN
            }
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
            #[inline(always)]
            fn minimum(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }
            #[inline(always)]
            fn maximum(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }
            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn mean(sum: Self, count: usize) -> f64 {
                sum as f64 / count as f64
            }
        }
    };
}

impl_numeric_float!(f32, ScalarKind::F32);
impl_numeric_float!(f64, ScalarKind::F64);
impl_numeric_int!(i32, ScalarKind::I32);
impl_numeric_int!(i64, ScalarKind::I64);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_identities() {
        assert_eq!(<f64 as Numeric>::zero(), 0.0);
        assert_eq!(<f32 as Numeric>::max_value(), f32::INFINITY);
        assert_eq!(<i32 as Numeric>::min_value(), i32::MIN);
        assert_eq!(<i64 as Numeric>::max_value(), i64::MAX);
    }

    #[test]
    fn test_integer_ops_wrap() {
        assert_eq!(Numeric::add(i32::MAX, 1), i32::MIN);
        assert_eq!(Numeric::mul(i64::MAX, 2), -2);
        assert_eq!(Numeric::minimum(3i32, -4), -4);
        assert_eq!(Numeric::maximum(3i64, -4), 3);
    }

    #[test]
    fn test_mean() {
        assert_eq!(<f64 as Numeric>::mean(15.0, 5), 3.0);
        assert_eq!(<f32 as Numeric>::mean(7.0, 2), 3.5);
        assert_eq!(<i32 as Numeric>::mean(7, 2), 3.5);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("double".parse::<ScalarKind>().unwrap(), ScalarKind::F64);
        assert_eq!(" Float32 ".parse::<ScalarKind>().unwrap(), ScalarKind::F32);
        assert_eq!("int".parse::<ScalarKind>().unwrap(), ScalarKind::I32);
        assert_eq!("long".parse::<ScalarKind>().unwrap(), ScalarKind::I64);

        let err = "decimal".parse::<ScalarKind>().unwrap_err();
        assert!(matches!(err, ReduceError::UnsupportedType(_)));
    }

    #[test]
    fn test_kind_sizes() {
        assert_eq!(ScalarKind::F32.size_bytes(), 4);
        assert_eq!(ScalarKind::I64.size_bytes(), 8);
        assert!(ScalarKind::F64.is_float());
        assert!(!ScalarKind::I32.is_float());
        assert_eq!(ScalarKind::I64.to_string(), "i64");
    }
}
