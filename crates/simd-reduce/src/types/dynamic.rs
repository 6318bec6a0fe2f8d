//! Runtime-tagged slices and values for callers that learn the element kind
//! only at runtime (e.g. from a file header or a column schema).

use std::fmt;

use super::scalar::{Numeric, ScalarKind};
use crate::api;
use crate::error::{ReduceError, Result};

/// A borrowed buffer of one of the supported element kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericSlice<'a> {
    F32(&'a [f32]),
    F64(&'a [f64]),
    I32(&'a [i32]),
    I64(&'a [i64]),
}

/// A single reduction result tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    F32(f32),
    F64(f64),
    I32(i32),
    I64(i64),
}

macro_rules! on_slice {
    ($slice:expr, $data:ident => $body:expr) => {
        match $slice {
            NumericSlice::F32($data) => $body,
            NumericSlice::F64($data) => $body,
            NumericSlice::I32($data) => $body,
            NumericSlice::I64($data) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$ty]> for NumericSlice<'a> {
                fn from(data: &'a [$ty]) -> Self {
                    NumericSlice::$variant(data)
                }
            }

            impl<'a> From<&'a Vec<$ty>> for NumericSlice<'a> {
                fn from(data: &'a Vec<$ty>) -> Self {
                    NumericSlice::$variant(data.as_slice())
                }
            }

            impl From<$ty> for NumericValue {
                fn from(v: $ty) -> Self {
                    NumericValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
}

impl<'a> NumericSlice<'a> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            NumericSlice::F32(_) => ScalarKind::F32,
            NumericSlice::F64(_) => ScalarKind::F64,
            NumericSlice::I32(_) => ScalarKind::I32,
            NumericSlice::I64(_) => ScalarKind::I64,
        }
    }

    pub fn len(&self) -> usize {
        on_slice!(self, data => data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum in the slice's own kind. Empty slices sum to zero.
    pub fn sum(&self) -> NumericValue {
        on_slice!(self, data => NumericValue::from(api::sum(data)))
    }

    pub fn min(&self) -> Result<NumericValue> {
        on_slice!(self, data => api::min(data).map(NumericValue::from))
    }

    pub fn max(&self) -> Result<NumericValue> {
        on_slice!(self, data => api::max(data).map(NumericValue::from))
    }

    /// Mean; integer slices average to [`NumericValue::F64`].
    pub fn average(&self) -> Result<NumericValue> {
        on_slice!(self, data => api::average(data).map(NumericValue::from))
    }
}

impl NumericValue {
    pub fn kind(&self) -> ScalarKind {
        match self {
            NumericValue::F32(_) => ScalarKind::F32,
            NumericValue::F64(_) => ScalarKind::F64,
            NumericValue::I32(_) => ScalarKind::I32,
            NumericValue::I64(_) => ScalarKind::I64,
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            NumericValue::F32(v) => v.to_f64(),
            NumericValue::F64(v) => v,
            NumericValue::I32(v) => v.to_f64(),
            NumericValue::I64(v) => v.to_f64(),
        }
    }

    /// Add two values of the same kind, wrapping on integer overflow.
    ///
    /// # Errors
    ///
    /// [`ReduceError::UnsupportedType`] when the kinds differ.
    pub fn checked_add(self, rhs: NumericValue) -> Result<NumericValue> {
        match (self, rhs) {
            (NumericValue::F32(a), NumericValue::F32(b)) => Ok(a.add(b).into()),
            (NumericValue::F64(a), NumericValue::F64(b)) => Ok(a.add(b).into()),
            (NumericValue::I32(a), NumericValue::I32(b)) => Ok(a.add(b).into()),
            (NumericValue::I64(a), NumericValue::I64(b)) => Ok(a.add(b).into()),
            (a, b) => Err(ReduceError::UnsupportedType(format!(
                "cannot combine {} with {}",
                a.kind(),
                b.kind()
            ))),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::F32(v) => write!(f, "{}", v),
            NumericValue::F64(v) => write!(f, "{}", v),
            NumericValue::I32(v) => write!(f, "{}", v),
            NumericValue::I64(v) => write!(f, "{}", v),
        }
    }
}
