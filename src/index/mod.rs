//! Compaction index: permanent (long) indices <-> visible (short) indices
//!
//! The permanent range `0..N` is cut into fixed-size blocks. For each block we
//! keep the number of visible indices and a Fenwick tree over those counts, so:
//!
//! - `short_index(long)` = visible count before the block + a scan inside it
//! - `long_index(short)` = Fenwick descent to the block + a scan inside it
//! - `update(a, b)` re-counts only the blocks covering `[a, b]`; every later
//!   short index shifts through the Fenwick tree in O(log blocks)

mod fenwick;

use std::ops::Range;

use rayon::prelude::*;

use crate::config::IndexConfig;
use crate::graph::Flags;
use fenwick::Fenwick;

/// Bidirectional, order-preserving map between permanent indices and the
/// compacted indices of the visible ones.
///
/// The map does not own the flags: every call that needs them takes the
/// current flags, which must be the same flags the map was last updated with.
pub trait UpdatableIntToIntMap {
    /// Number of permanent indices, N
    fn long_size(&self) -> usize;

    /// Number of visible indices, M
    fn short_size(&self) -> usize;

    /// `None` if `long_index` is hidden. Panics if `long_index >= long_size()`.
    fn short_index<F: Flags + ?Sized>(&self, long_index: usize, flags: &F) -> Option<usize>;

    /// Panics if `short_index >= short_size()`
    fn long_index<F: Flags + ?Sized>(&self, short_index: usize, flags: &F) -> usize;

    /// Visibility may have changed somewhere in `[min(up, down), max(up, down)]`
    fn update<F: Flags + ?Sized>(&mut self, up: usize, down: usize, flags: &F);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIntToIntMap {
    long_size: usize,
    block_size: usize,
    block_counts: Vec<usize>,
    sums: Fenwick,
}

impl ListIntToIntMap {
    pub fn new<F: Flags + Sync + ?Sized>(flags: &F) -> Self {
        Self::with_config(flags, &IndexConfig::default())
    }

    pub fn with_config<F: Flags + Sync + ?Sized>(flags: &F, config: &IndexConfig) -> Self {
        let block_size = config.block_size.max(1);
        let long_size = flags.size();
        let block_counts = count_blocks(flags, long_size, block_size, config.parallel_build_threshold);
        let sums = Fenwick::from_counts(&block_counts);

        tracing::debug!(
            "Built compaction map: {} nodes, {} visible, {} blocks of {}",
            long_size,
            sums.total(),
            block_counts.len(),
            block_size
        );

        Self { long_size, block_size, block_counts, sums }
    }

    /// Recompute everything from `flags`.
    ///
    /// Needed when the flags were changed without a matching `update` call.
    pub fn rebuild<F: Flags + Sync + ?Sized>(&mut self, flags: &F, config: &IndexConfig) {
        *self = Self::with_config(flags, config);
        tracing::info!("Compaction map rebuilt: {} of {} visible", self.short_size(), self.long_size);
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    fn block_range(&self, block: usize) -> Range<usize> {
        let start = block * self.block_size;
        start..(start + self.block_size).min(self.long_size)
    }
}

impl UpdatableIntToIntMap for ListIntToIntMap {
    fn long_size(&self) -> usize {
        self.long_size
    }

    fn short_size(&self) -> usize {
        self.sums.total()
    }

    fn short_index<F: Flags + ?Sized>(&self, long_index: usize, flags: &F) -> Option<usize> {
        assert!(
            long_index < self.long_size,
            "permanent index {} out of range (size {})",
            long_index,
            self.long_size
        );
        if !flags.get(long_index) {
            return None;
        }

        let block = long_index / self.block_size;
        let block_start = block * self.block_size;
        Some(self.sums.prefix(block) + flags.count_range(block_start..long_index))
    }

    fn long_index<F: Flags + ?Sized>(&self, short_index: usize, flags: &F) -> usize {
        assert!(
            short_index < self.short_size(),
            "visible index {} out of range (size {})",
            short_index,
            self.short_size()
        );

        let (block, mut skip) = self.sums.search(short_index);
        for long_index in self.block_range(block) {
            if flags.get(long_index) {
                if skip == 0 {
                    return long_index;
                }
                skip -= 1;
            }
        }
        unreachable!("block {} holds fewer visible nodes than recorded", block)
    }

    fn update<F: Flags + ?Sized>(&mut self, up: usize, down: usize, flags: &F) {
        if self.long_size == 0 {
            return;
        }
        let (from, to) = (up.min(down), up.max(down));
        assert!(to < self.long_size, "update range {}..={} out of range (size {})", from, to, self.long_size);

        let mut delta: isize = 0;
        for block in from / self.block_size..=to / self.block_size {
            let count = flags.count_range(self.block_range(block));
            let diff = count as isize - self.block_counts[block] as isize;
            if diff != 0 {
                self.block_counts[block] = count;
                self.sums.add(block, diff);
                delta += diff;
            }
        }

        tracing::debug!("Compaction map update {}..={}: visible count {:+}", from, to, delta);
    }
}

fn count_blocks<F: Flags + Sync + ?Sized>(
    flags: &F,
    long_size: usize,
    block_size: usize,
    parallel_threshold: usize,
) -> Vec<usize> {
    let blocks = long_size.div_ceil(block_size);
    let count = |block: usize| {
        let start = block * block_size;
        flags.count_range(start..(start + block_size).min(long_size))
    };

    if blocks > parallel_threshold {
        (0..blocks).into_par_iter().map(count).collect()
    } else {
        (0..blocks).map(count).collect()
    }
}
