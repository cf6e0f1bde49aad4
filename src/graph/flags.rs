//! Per-node visibility flags

use std::ops::Range;

const WORD_BITS: usize = 64;

/// Read side of the visibility flags
pub trait Flags {
    fn size(&self) -> usize;

    fn get(&self, index: usize) -> bool;

    /// Number of set flags in `range`
    fn count_range(&self, range: Range<usize>) -> usize {
        range.filter(|&i| self.get(i)).count()
    }
}

/// Bitset over permanent node indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSetFlags {
    words: Vec<u64>,
    size: usize,
}

impl BitSetFlags {
    /// `size` flags, all set to `default`
    pub fn new(size: usize, default: bool) -> Self {
        let mut flags = Self {
            words: vec![0; size.div_ceil(WORD_BITS)],
            size,
        };
        if default {
            flags.set_all(true);
        }
        flags
    }

    pub fn from_fn<F: FnMut(usize) -> bool>(size: usize, mut f: F) -> Self {
        let mut flags = Self::new(size, false);
        for i in 0..size {
            if f(i) {
                flags.set(i, true);
            }
        }
        flags
    }

    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.size, "flag index {} out of range (size {})", index, self.size);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    pub fn set_range(&mut self, range: Range<usize>, value: bool) {
        assert!(range.end <= self.size, "flag range {:?} out of range (size {})", range, self.size);
        for i in range {
            self.set(i, value);
        }
    }

    pub fn set_all(&mut self, value: bool) {
        let fill = if value { u64::MAX } else { 0 };
        self.words.iter_mut().for_each(|w| *w = fill);
        self.clear_tail();
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |i| self.get(i))
    }

    // Bits past `size` in the last word must stay zero for count_ones
    fn clear_tail(&mut self) {
        let tail = self.size % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }
}

impl Flags for BitSetFlags {
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        assert!(index < self.size, "flag index {} out of range (size {})", index, self.size);
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    fn count_range(&self, range: Range<usize>) -> usize {
        assert!(range.end <= self.size, "flag range {:?} out of range (size {})", range, self.size);
        if range.start >= range.end {
            return 0;
        }

        let first_word = range.start / WORD_BITS;
        let last_word = (range.end - 1) / WORD_BITS;
        let low_mask = u64::MAX << (range.start % WORD_BITS);
        let high_bits = range.end - last_word * WORD_BITS;
        let high_mask = if high_bits == WORD_BITS { u64::MAX } else { (1u64 << high_bits) - 1 };

        if first_word == last_word {
            return (self.words[first_word] & low_mask & high_mask).count_ones() as usize;
        }

        let mut count = (self.words[first_word] & low_mask).count_ones() as usize;
        for word in &self.words[first_word + 1..last_word] {
            count += word.count_ones() as usize;
        }
        count + (self.words[last_word] & high_mask).count_ones() as usize
    }
}

impl Flags for [bool] {
    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> bool {
        self[index]
    }
}

impl Flags for Vec<bool> {
    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> bool {
        self[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_all_visible() {
        let flags = BitSetFlags::new(130, true);
        assert_eq!(flags.size(), 130);
        assert_eq!(flags.count_ones(), 130);
        assert!(flags.get(0));
        assert!(flags.get(129));
    }

    #[test]
    fn test_set_and_get() {
        let mut flags = BitSetFlags::new(70, false);
        flags.set(3, true);
        flags.set(64, true);
        assert!(flags.get(3));
        assert!(flags.get(64));
        assert!(!flags.get(4));
        flags.set(3, false);
        assert!(!flags.get(3));
        assert_eq!(flags.count_ones(), 1);
    }

    #[test]
    fn test_set_all_keeps_tail_clear() {
        let mut flags = BitSetFlags::new(65, false);
        flags.set_all(true);
        assert_eq!(flags.count_ones(), 65);
        flags.set_all(false);
        assert_eq!(flags.count_ones(), 0);
    }

    #[test]
    fn test_count_range_matches_naive() {
        let flags = BitSetFlags::from_fn(200, |i| i % 3 == 0 || i % 7 == 0);
        let naive: Vec<bool> = flags.iter().collect();

        for (start, end) in [(0, 0), (0, 200), (5, 6), (60, 70), (63, 129), (64, 128), (1, 199)] {
            assert_eq!(
                flags.count_range(start..end),
                naive.count_range(start..end),
                "range {}..{}",
                start,
                end
            );
        }
    }

    #[test]
    fn test_set_range() {
        let mut flags = BitSetFlags::new(10, true);
        flags.set_range(2..5, false);
        assert_eq!(flags.iter().collect::<Vec<_>>(), vec![
            true, true, false, false, false, true, true, true, true, true
        ]);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let flags = BitSetFlags::new(5, true);
        flags.get(5);
    }
}
