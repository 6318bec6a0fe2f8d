//! Cache-sized chunking and aliasing-safe writes.

use std::ops::Range;

use crate::error::{ReduceError, Result};
use crate::types::Numeric;

/// Chunk length used when the caller does not pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Buffers up to this length are processed in one call without chunking.
pub const STACK_THRESHOLD: usize = 1024;

/// Chunking parameters.
///
/// # Example
///
/// ```
/// use simd_reduce::{sum, ChunkConfig};
///
/// let data: Vec<i64> = (1..=10_000).collect();
/// let total = ChunkConfig::new()
///     .chunk_size(512)
///     .process(&data, |chunk| sum(chunk))
///     .unwrap();
/// assert_eq!(total, 50_005_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    chunk_size: usize,
    stack_threshold: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            stack_threshold: STACK_THRESHOLD,
        }
    }
}

impl ChunkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk length. Zero restores [`DEFAULT_CHUNK_SIZE`].
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        self
    }

    /// Set the length up to which [`ChunkConfig::process_small`] skips chunking.
    /// Zero restores [`STACK_THRESHOLD`].
    pub fn stack_threshold(mut self, threshold: usize) -> Self {
        self.stack_threshold = if threshold == 0 {
            STACK_THRESHOLD
        } else {
            threshold
        };
        self
    }

    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn get_stack_threshold(&self) -> usize {
        self.stack_threshold
    }

    /// Apply `op` to consecutive chunks and add the partial results.
    ///
    /// # Errors
    ///
    /// [`ReduceError::EmptyInput`] when `data` is empty.
    pub fn process<T, U, F>(&self, data: &[T], op: F) -> Result<U>
    where
        U: Numeric,
        F: FnMut(&[T]) -> U,
    {
        process_in_chunks(data, self.chunk_size, op)
    }

    /// Call `op` once for short buffers; chunk by the threshold otherwise.
    pub fn process_small<T, U, F>(&self, data: &[T], mut op: F) -> Result<U>
    where
        U: Numeric,
        F: FnMut(&[T]) -> U,
    {
        if data.len() <= self.stack_threshold {
            return Ok(op(data));
        }
        process_in_chunks(data, self.stack_threshold, op)
    }
}

/// Split `data` into `chunk_size` pieces, apply `op` to each, and add the results.
///
/// `chunk_size` is clamped to the buffer length; zero selects
/// [`DEFAULT_CHUNK_SIZE`]. Partial results are combined with
/// [`Numeric::add`], so float results can differ from a single-pass
/// reduction by rounding.
///
/// # Errors
///
/// [`ReduceError::EmptyInput`] when `data` is empty.
pub fn process_in_chunks<T, U, F>(data: &[T], chunk_size: usize, mut op: F) -> Result<U>
where
    U: Numeric,
    F: FnMut(&[T]) -> U,
{
    if data.is_empty() {
        return Err(ReduceError::empty("process_in_chunks"));
    }
    let requested = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };
    let size = requested.min(data.len());
    tracing::trace!(
        len = data.len(),
        chunk_size = size,
        chunks = (data.len() + size - 1) / size,
        "process_in_chunks"
    );

    Ok(data
        .chunks(size)
        .map(|chunk| op(chunk))
        .fold(U::zero(), U::add))
}

/// [`ChunkConfig::process_small`] with the default threshold.
///
/// # Errors
///
/// Never for buffers up to [`STACK_THRESHOLD`]; see [`process_in_chunks`]
/// otherwise.
pub fn process_with_stack_allocation<T, U, F>(data: &[T], op: F) -> Result<U>
where
    U: Numeric,
    F: FnMut(&[T]) -> U,
{
    ChunkConfig::default().process_small(data, op)
}

/// Whether two index ranges share at least one index.
pub fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < a.end && b.start < b.end && a.start < b.end && b.start < a.end
}

/// Run `op(destination, source)` over two ranges of one buffer.
///
/// When the ranges overlap, `source` is first copied into a private buffer so
/// that writes through `destination` cannot corrupt values `op` has yet to
/// read. Disjoint ranges are handed to `op` in place.
///
/// # Errors
///
/// - [`ReduceError::OutOfBounds`] when a range ends past `buffer`.
/// - [`ReduceError::DimensionMismatch`] when a range starts after it ends.
/// - [`ReduceError::LengthMismatch`] when the ranges differ in length.
///
/// # Example
///
/// ```
/// use simd_reduce::process_without_aliasing;
///
/// let mut buf = [1, 2, 3, 4, 5, 6];
/// process_without_aliasing(&mut buf, 2..6, 0..4, |dst, src| {
///     for (d, s) in dst.iter_mut().zip(src) {
///         *d = *s;
///     }
/// })
/// .unwrap();
/// assert_eq!(buf, [1, 2, 1, 2, 3, 4]);
/// ```
pub fn process_without_aliasing<T, R, F>(
    buffer: &mut [T],
    destination: Range<usize>,
    source: Range<usize>,
    op: F,
) -> Result<R>
where
    T: Copy,
    F: FnOnce(&mut [T], &[T]) -> R,
{
    check_range(&destination, buffer.len())?;
    check_range(&source, buffer.len())?;
    ReduceError::check_lengths(destination.len(), source.len())?;

    if ranges_overlap(&destination, &source) {
        tracing::trace!(?destination, ?source, "overlapping ranges, copying source");
        let private = buffer[source].to_vec();
        return Ok(op(&mut buffer[destination], &private));
    }

    if destination.start < source.start {
        let (head, tail) = buffer.split_at_mut(source.start);
        Ok(op(&mut head[destination], &tail[..source.len()]))
    } else {
        let (head, tail) = buffer.split_at_mut(destination.start);
        Ok(op(&mut tail[..destination.len()], &head[source]))
    }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end {
        return Err(ReduceError::DimensionMismatch(format!(
            "range start {} exceeds end {}",
            range.start, range.end
        )));
    }
    if range.end > len {
        return Err(ReduceError::OutOfBounds {
            end: range.end,
            len,
        });
    }
    Ok(())
}
