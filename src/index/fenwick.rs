//! Fenwick tree over per-block visible counts

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fenwick {
    // 1-based; tree[i] covers (i - lowbit(i), i]
    tree: Vec<usize>,
}

impl Fenwick {
    /// Linear-time build from the block counts
    pub fn from_counts(counts: &[usize]) -> Self {
        let n = counts.len();
        let mut tree = vec![0; n + 1];
        tree[1..].copy_from_slice(counts);
        for i in 1..=n {
            let parent = i + lowbit(i);
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        Self { tree }
    }

    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Sum of counts of blocks `[0, block)`
    pub fn prefix(&self, block: usize) -> usize {
        let mut i = block;
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= lowbit(i);
        }
        sum
    }

    pub fn total(&self) -> usize {
        self.prefix(self.len())
    }

    pub fn add(&mut self, block: usize, delta: isize) {
        let mut i = block + 1;
        while i <= self.len() {
            self.tree[i] = self.tree[i].wrapping_add_signed(delta);
            i += lowbit(i);
        }
    }

    /// Largest `k` with `prefix(k) <= target`, and `target - prefix(k)`.
    ///
    /// For `target < total()` block `k` is the one holding the `target`-th item.
    pub fn search(&self, target: usize) -> (usize, usize) {
        let n = self.len();
        let mut pos = 0;
        let mut rest = target;
        let mut step = if n == 0 { 0 } else { 1 << (usize::BITS - 1 - n.leading_zeros()) };

        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= rest {
                pos = next;
                rest -= self.tree[next];
            }
            step >>= 1;
        }
        (pos, rest)
    }
}

#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_sums() {
        let counts = [3, 0, 2, 5, 1];
        let fenwick = Fenwick::from_counts(&counts);
        assert_eq!(fenwick.prefix(0), 0);
        assert_eq!(fenwick.prefix(1), 3);
        assert_eq!(fenwick.prefix(3), 5);
        assert_eq!(fenwick.total(), 11);
    }

    #[test]
    fn test_add() {
        let mut fenwick = Fenwick::from_counts(&[1, 1, 1, 1]);
        fenwick.add(1, -1);
        fenwick.add(3, 4);
        assert_eq!(fenwick.prefix(2), 1);
        assert_eq!(fenwick.total(), 7);
    }

    #[test]
    fn test_search_skips_empty_blocks() {
        let fenwick = Fenwick::from_counts(&[2, 0, 0, 3]);
        assert_eq!(fenwick.search(0), (0, 0));
        assert_eq!(fenwick.search(1), (0, 1));
        // Items 2..5 live in block 3
        assert_eq!(fenwick.search(2), (3, 0));
        assert_eq!(fenwick.search(4), (3, 2));
    }

    #[test]
    fn test_empty() {
        let fenwick = Fenwick::from_counts(&[]);
        assert_eq!(fenwick.total(), 0);
        assert_eq!(fenwick.search(0), (0, 0));
    }
}
