//! Row partitioning.
//!
//! Height is cut into contiguous, disjoint row ranges. Each range owns the
//! matching slice of the destination buffer, so workers never share
//! memory and no locking is needed.
//!
//! A panic inside a worker is not contained: rayon finishes or abandons
//! the other ranges and resumes the panic on the calling thread, which
//! drops the half-written destination during unwinding.

use alloc::vec::Vec;
use core::ops::Range;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// How many workers conversion may fan rows out to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// One worker per thread of the current rayon pool.
    #[default]
    Auto,
    /// Everything on the calling thread as a single range.
    Sequential,
}

impl Parallelism {
    /// Worker count this setting resolves to right now.
    pub fn workers(&self) -> usize {
        match self {
            #[cfg(feature = "rayon")]
            Self::Auto => rayon::current_num_threads().max(1),
            #[cfg(not(feature = "rayon"))]
            Self::Auto => 1,
            Self::Sequential => 1,
        }
    }
}

/// Rows per range for `height` rows and `workers` workers.
///
/// A single worker takes everything. Otherwise ranges are small enough
/// that each worker gets about ten of them, which evens out rows that
/// cost more than others.
pub fn part_size(height: usize, workers: usize) -> usize {
    if workers <= 1 {
        return height.max(1);
    }
    (height / (workers * 10)).max(1)
}

/// The ranges covering `0..height`, in order.
///
/// Never yields an empty range, so there are at most `height` of them.
pub fn row_ranges(height: usize, workers: usize) -> impl Iterator<Item = Range<usize>> {
    let part = part_size(height, workers);
    (0..height)
        .step_by(part)
        .map(move |start| start..(start + part).min(height))
}

/// Run `f` once per row range of `0..height`, returning after every call
/// has finished. Returns the number of ranges.
pub fn for_each_row_range<F>(height: usize, parallelism: Parallelism, f: F) -> usize
where
    F: Fn(Range<usize>) + Send + Sync,
{
    let ranges: Vec<Range<usize>> = row_ranges(height, parallelism.workers()).collect();
    let count = ranges.len();

    #[cfg(feature = "rayon")]
    {
        if count > 1 {
            ranges.into_par_iter().for_each(f);
            return count;
        }
    }

    ranges.into_iter().for_each(f);
    count
}

/// Split `buf` along [`row_ranges`], `stride` bytes per row, and run `f`
/// on each range with its slice. `buf` must hold at least
/// `height * stride` bytes.
pub(crate) fn for_each_row_chunk<F>(
    buf: &mut [u8],
    stride: usize,
    height: usize,
    parallelism: Parallelism,
    f: F,
) -> usize
where
    F: Fn(Range<usize>, &mut [u8]) + Send + Sync,
{
    if height == 0 || stride == 0 {
        return 0;
    }
    let mut rest = &mut buf[..height * stride];
    let jobs: Vec<(Range<usize>, &mut [u8])> = row_ranges(height, parallelism.workers())
        .map(|rows| {
            let (chunk, tail) = core::mem::take(&mut rest).split_at_mut(rows.len() * stride);
            rest = tail;
            (rows, chunk)
        })
        .collect();
    let count = jobs.len();

    #[cfg(feature = "rayon")]
    {
        if count > 1 {
            jobs.into_par_iter().for_each(|(rows, chunk)| f(rows, chunk));
            return count;
        }
    }

    for (rows, chunk) in jobs {
        f(rows, chunk);
    }
    count
}
