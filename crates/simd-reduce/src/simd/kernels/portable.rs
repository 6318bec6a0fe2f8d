use super::LaneGroup;
use crate::types::Numeric;

/// Array-backed lane group that runs on any target.
///
/// The hardware lane groups are only reachable on machines with the matching
/// instruction set; `Portable` drives the same chunked kernel with an
/// arbitrary lane count so the split/fold/remainder logic can be checked on
/// any host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portable<T, const N: usize>([T; N]);

impl<T: Numeric, const N: usize> Portable<T, N> {
    pub fn from_array(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    pub fn to_array(self) -> [T; N] {
        self.0
    }

    #[inline(always)]
    fn zip_with(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }
}

impl<T: Numeric, const N: usize> LaneGroup<T> for Portable<T, N> {
    const LANES: usize = N;

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        Self(std::ptr::read_unaligned(ptr as *const [T; N]))
    }

    #[inline(always)]
    unsafe fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn broadcast(self, value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::sub)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::mul)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::minimum)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::maximum)
    }

    #[inline(always)]
    fn store(self, out: &mut [T]) {
        out[..N].copy_from_slice(&self.0);
    }
}
