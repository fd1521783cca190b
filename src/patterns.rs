
use bit_vec::BitVec;

/// One flag per haploblock, a set bit means the block is switched
pub type Pattern = BitVec;

/// Returns the number of patterns for a given block count, or None if it does not fit in a u64.
/// The first block is never switched, so this is half of the full 2^N space.
pub fn total_patterns(num_blocks: usize) -> Option<u64> {
    if num_blocks == 0 {
        Some(0)
    } else {
        u32::try_from(num_blocks - 1).ok()
            .and_then(|shift| 1u64.checked_shl(shift))
    }
}

/// Lazy iterator over all switch patterns with the first flag fixed at 0.
/// The trailing N-1 flags count up in binary from all-0 to all-1, most significant bit first.
/// A clone resumes from the same position; call `generate_patterns` again for a fresh pass.
#[derive(Clone, Debug)]
pub struct PatternIterator {
    /// The number of haploblocks, i.e. the length of every pattern
    num_blocks: usize,
    /// The trailing N-1 bits of the next pattern, None once everything has been emitted
    counter: Option<BitVec>
}

/// Creates the pattern iterator for `num_blocks` haploblocks; zero blocks yields no patterns at all.
pub fn generate_patterns(num_blocks: usize) -> PatternIterator {
    let counter = if num_blocks == 0 {
        None
    } else {
        Some(BitVec::from_elem(num_blocks - 1, false))
    };
    PatternIterator {
        num_blocks,
        counter
    }
}

impl PatternIterator {
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// The number of patterns left to emit, None if larger than a u64
    pub fn remaining(&self) -> Option<u64> {
        match self.counter.as_ref() {
            None => Some(0),
            Some(counter) => {
                let total: u64 = total_patterns(self.num_blocks)?;
                // counter < total, so any set bit is within the low 64
                let value: u64 = counter.iter()
                    .fold(0u64, |acc, bit| (acc << 1) | (bit as u64));
                Some(total - value)
            }
        }
    }

    /// Adds one to the counter, clearing it once it wraps past all-1
    fn increment(&mut self) {
        if let Some(counter) = self.counter.as_mut() {
            for i in (0..counter.len()).rev() {
                if counter[i] {
                    counter.set(i, false);
                } else {
                    counter.set(i, true);
                    return;
                }
            }
            // carried out of the top bit
            self.counter = None;
        }
    }

    /// Moves past the next `count` patterns without building them, the counter is cleared if this runs off the end
    pub fn skip_patterns(&mut self, count: u64) {
        if let Some(counter) = self.counter.as_mut() {
            // ripple-carry add of `count` into the counter, least significant bit last
            let mut carry: u64 = count;
            for i in (0..counter.len()).rev() {
                if carry == 0 {
                    return;
                }
                let sum: u64 = (counter[i] as u64) + (carry & 1);
                counter.set(i, sum & 1 == 1);
                carry = (carry >> 1) + (sum >> 1);
            }
            if carry > 0 {
                self.counter = None;
            }
        }
    }
}

impl Iterator for PatternIterator {
    type Item = Pattern;

    fn next(&mut self) -> Option<Pattern> {
        let counter = self.counter.as_ref()?;
        let mut pattern: Pattern = BitVec::with_capacity(self.num_blocks);
        pattern.push(false);
        pattern.extend(counter.iter());
        self.increment();
        Some(pattern)
    }

    fn nth(&mut self, n: usize) -> Option<Pattern> {
        self.skip_patterns(n as u64);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().and_then(|r| usize::try_from(r).ok()) {
            Some(r) => (r, Some(r)),
            None => (usize::MAX, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_vecs(patterns: PatternIterator) -> Vec<Vec<u8>> {
        patterns
            .map(|p| p.iter().map(|b| b as u8).collect())
            .collect()
    }

    #[test]
    fn test_no_blocks() {
        assert_eq!(generate_patterns(0).count(), 0);
        assert_eq!(total_patterns(0), Some(0));
        assert_eq!(generate_patterns(0).size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_one_block() {
        assert_eq!(to_vecs(generate_patterns(1)), vec![vec![0]]);
        assert_eq!(total_patterns(1), Some(1));
    }

    #[test]
    fn test_three_blocks_order() {
        let expected: Vec<Vec<u8>> = vec![
            vec![0, 0, 0],
            vec![0, 0, 1],
            vec![0, 1, 0],
            vec![0, 1, 1]
        ];
        assert_eq!(to_vecs(generate_patterns(3)), expected);
    }

    #[test]
    fn test_pattern_counts() {
        for n in 1..12 {
            let patterns: Vec<Pattern> = generate_patterns(n).collect();
            assert_eq!(patterns.len() as u64, 1u64 << (n - 1));
            assert_eq!(Some(patterns.len() as u64), total_patterns(n));
            assert!(patterns.iter().all(|p| p.len() == n));
            assert!(patterns.iter().all(|p| !p[0]));
        }
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut patterns = generate_patterns(4);
        assert_eq!(patterns.size_hint(), (8, Some(8)));
        patterns.next();
        patterns.next();
        patterns.next();
        assert_eq!(patterns.remaining(), Some(5));
        assert_eq!(patterns.size_hint(), (5, Some(5)));
        assert_eq!(patterns.by_ref().count(), 5);
        assert_eq!(patterns.remaining(), Some(0));
        assert!(patterns.next().is_none());
    }

    #[test]
    fn test_restartable() {
        let first: Vec<Pattern> = generate_patterns(5).collect();
        let second: Vec<Pattern> = generate_patterns(5).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_block_count_is_lazy() {
        // far more patterns than could ever be collected, only take a handful
        let mut patterns = generate_patterns(200);
        assert_eq!(total_patterns(200), None);
        assert_eq!(patterns.remaining(), None);
        assert_eq!(patterns.size_hint(), (usize::MAX, None));

        let first = patterns.next().unwrap();
        assert_eq!(first.len(), 200);
        assert!(first.none());

        let second = patterns.next().unwrap();
        assert!(second[199]);
        assert_eq!(second.iter().filter(|&b| b).count(), 1);
    }

    #[test]
    fn test_nth_matches_sequential() {
        let all_patterns: Vec<Pattern> = generate_patterns(6).collect();
        for n in 0..all_patterns.len() {
            assert_eq!(generate_patterns(6).nth(n).as_ref(), Some(&all_patterns[n]));
        }
        assert!(generate_patterns(6).nth(all_patterns.len()).is_none());
        assert!(generate_patterns(6).nth(usize::MAX).is_none());

        // skipping part way resumes counting from there
        let mut patterns = generate_patterns(6);
        patterns.skip_patterns(7);
        assert_eq!(patterns.remaining(), Some(25));
        let rest: Vec<Pattern> = patterns.collect();
        assert_eq!(rest, all_patterns[7..].to_vec());
    }

    #[test]
    fn test_skip_on_large_block_count() {
        let mut patterns = generate_patterns(200);
        // 5 = 0b101 in the low bits
        let pattern = patterns.nth(5).unwrap();
        assert_eq!(pattern.len(), 200);
        assert!(pattern[199]);
        assert!(!pattern[198]);
        assert!(pattern[197]);
        assert_eq!(pattern.iter().filter(|&b| b).count(), 2);

        patterns.skip_patterns(u64::MAX);
        assert!(patterns.next().is_some());
    }
}
