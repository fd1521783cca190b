
use crate::block_gen::{Haploblock, group_variants};
use crate::data_types::variants::CallCarrier;
use crate::patterns::{Pattern, PatternIterator, generate_patterns, total_patterns};

/// One full candidate phasing, every block either as read or fully switched
pub type Combination<V> = Vec<Haploblock<V>>;

/// Lazy iterator over every combination of a fixed set of haploblocks.
/// Only the combination being returned is ever built, so this is safe to partially consume for very large inputs.
#[derive(Clone, Debug)]
pub struct CombinationIterator<V> {
    /// The haploblocks as read
    haploblocks: Vec<Haploblock<V>>,
    /// The patterns still to apply
    patterns: PatternIterator
}

/// Groups the variants into haploblocks and returns an iterator over all of their combinations.
/// # Arguments
/// * `variants` - the variants in input order
pub fn all_combinations<V: CallCarrier>(variants: &[V]) -> CombinationIterator<V> {
    CombinationIterator::from_haploblocks(group_variants(variants))
}

impl<V: CallCarrier> CombinationIterator<V> {
    /// Builds the iterator over an existing grouping
    /// # Arguments
    /// * `haploblocks` - the blocks to enumerate, the first one is never switched
    pub fn from_haploblocks(haploblocks: Vec<Haploblock<V>>) -> CombinationIterator<V> {
        let patterns = generate_patterns(haploblocks.len());
        CombinationIterator {
            haploblocks,
            patterns
        }
    }

    pub fn haploblocks(&self) -> &[Haploblock<V>] {
        &self.haploblocks
    }

    /// The total number of combinations for these blocks, None if it does not fit in a u64
    pub fn total_combinations(&self) -> Option<u64> {
        total_patterns(self.haploblocks.len())
    }

    /// Builds the combination for one pattern, switching the blocks whose flag is set
    fn apply_pattern(&self, pattern: &Pattern) -> Combination<V> {
        self.haploblocks.iter()
            .zip(pattern.iter())
            .map(|(block, switch)| {
                if switch {
                    block.switched()
                } else {
                    block.clone()
                }
            })
            .collect()
    }
}

impl<V: CallCarrier> Iterator for CombinationIterator<V> {
    type Item = Combination<V>;

    fn next(&mut self) -> Option<Combination<V>> {
        let pattern = self.patterns.next()?;
        Some(self.apply_pattern(&pattern))
    }

    // skipped combinations are never built, only the pattern counter moves
    fn nth(&mut self, n: usize) -> Option<Combination<V>> {
        let pattern = self.patterns.nth(n)?;
        Some(self.apply_pattern(&pattern))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.patterns.size_hint()
    }
}
