
use crate::compatibility::are_compatible;
use crate::data_types::call::PhaseSet;
use crate::data_types::variants::CallCarrier;
use crate::switcher::switch_variants;

use log::trace;
use rustc_hash::FxHashMap as HashMap;

/// A group of variants that can all be switched together without conflicting with each other.
/// Blocks from the same phase set are merged even when they are not adjacent in the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Haploblock<V> {
    /// The variants, in the order they were first encountered
    variants: Vec<V>,
    /// The phase set of the first call in the block that has one
    phase_set: Option<PhaseSet>
}

impl<V: CallCarrier> Haploblock<V> {
    /// Creates a block from a collection of variants, the phase set is taken from the first variant that has one.
    /// # Arguments
    /// * `variants` - the variants in this block, expected to be non-empty
    pub fn new(variants: Vec<V>) -> Haploblock<V> {
        let phase_set = first_phase_set(&variants);
        Haploblock {
            variants,
            phase_set
        }
    }

    pub fn variants(&self) -> &[V] {
        &self.variants
    }

    pub fn into_variants(self) -> Vec<V> {
        self.variants
    }

    pub fn phase_set(&self) -> Option<PhaseSet> {
        self.phase_set
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Returns a copy of this block with every call reversed; `self` is left untouched.
    pub fn switched(&self) -> Haploblock<V> {
        Haploblock {
            variants: switch_variants(&self.variants),
            phase_set: self.phase_set
        }
    }

    /// Appends another run of variants onto the end of this block
    fn extend(&mut self, variants: Vec<V>) {
        self.variants.extend(variants);
    }
}

/// Finds the first phase set in a collection of variants, if any
fn first_phase_set<V: CallCarrier>(variants: &[V]) -> Option<PhaseSet> {
    variants.iter().find_map(|v| v.call().phase_set())
}

/// Closes out a group of compatible variants.
/// Groups with a phase set that was already seen are appended onto the earlier block, everything else becomes a new block.
/// # Arguments
/// * `group` - the group to close, must be non-empty
/// * `haploblocks` - the blocks emitted so far
/// * `phase_set_lookup` - phase set -> index into `haploblocks`
fn close_group<V: CallCarrier>(group: Vec<V>, haploblocks: &mut Vec<Haploblock<V>>, phase_set_lookup: &mut HashMap<PhaseSet, usize>) {
    match first_phase_set(&group) {
        Some(phase_set) => {
            match phase_set_lookup.get(&phase_set) {
                Some(&block_index) => {
                    trace!("Merging {} variants into block {} (PS={})", group.len(), block_index, phase_set);
                    haploblocks[block_index].extend(group);
                },
                None => {
                    trace!("New block {} with {} variants (PS={})", haploblocks.len(), group.len(), phase_set);
                    phase_set_lookup.insert(phase_set, haploblocks.len());
                    haploblocks.push(Haploblock::new(group));
                }
            }
        },
        None => {
            trace!("New block {} with {} variants (no PS)", haploblocks.len(), group.len());
            haploblocks.push(Haploblock::new(group));
        }
    }
}

/// Partitions an ordered collection of variants into haploblocks.
/// A variant joins the current group when it is compatible with every call in that group, otherwise the group is closed and a new one starts.
/// Groups sharing a phase set are merged into the block where that phase set first appeared.
/// # Arguments
/// * `variants` - the variants in input order
pub fn group_variants<V: CallCarrier>(variants: &[V]) -> Vec<Haploblock<V>> {
    let mut haploblocks: Vec<Haploblock<V>> = vec![];
    let mut phase_set_lookup: HashMap<PhaseSet, usize> = Default::default();
    let mut current_group: Vec<V> = vec![];

    for variant in variants.iter() {
        if are_compatible(current_group.iter().map(|v| v.call()), variant.call()) {
            current_group.push(variant.clone());
        } else {
            let closed_group = std::mem::replace(&mut current_group, vec![variant.clone()]);
            close_group(closed_group, &mut haploblocks, &mut phase_set_lookup);
        }
    }

    if !current_group.is_empty() {
        close_group(current_group, &mut haploblocks, &mut phase_set_lookup);
    }

    haploblocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::call::Call;
    use crate::data_types::variants::Variant;

    /// Builds variants on chr1 at increasing positions from the given calls
    fn make_variants(calls: &[Call]) -> Vec<Variant> {
        calls.iter().enumerate()
            .map(|(i, &call)| Variant::new("chr1".to_string(), 0, 100 * i as i64, i, call))
            .collect()
    }

    fn block_indices(haploblocks: &[Haploblock<Variant>]) -> Vec<Vec<usize>> {
        haploblocks.iter()
            .map(|b| b.variants().iter().map(|v| v.record_index()).collect())
            .collect()
    }

    /// Checks that no block mixes phase sets and that the block label is the first one found
    fn assert_phase_sets_consistent(haploblocks: &[Haploblock<Variant>]) {
        for block in haploblocks.iter() {
            let phase_sets: Vec<PhaseSet> = block.variants().iter()
                .filter_map(|v| v.call().phase_set())
                .collect();
            assert_eq!(block.phase_set(), phase_sets.first().copied());
            assert!(phase_sets.iter().all(|&ps| Some(ps) == block.phase_set()));
        }
    }

    #[test]
    fn test_empty() {
        let variants: Vec<Variant> = vec![];
        assert!(group_variants(&variants).is_empty());
    }

    #[test]
    fn test_single_variant() {
        let variants = make_variants(&[Call::from_indices(0, 1, None)]);
        let haploblocks = group_variants(&variants);
        assert_eq!(block_indices(&haploblocks), vec![vec![0]]);
        assert_eq!(haploblocks[0].phase_set(), None);
    }

    #[test]
    fn test_two_unphased_hets() {
        let variants = make_variants(&[
            Call::from_indices(1, 0, None),
            Call::from_indices(0, 1, None)
        ]);
        let haploblocks = group_variants(&variants);
        assert_eq!(block_indices(&haploblocks), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_homozygous_joins_group() {
        let variants = make_variants(&[
            Call::from_indices(0, 1, None),
            Call::from_indices(1, 1, None),
            Call::from_indices(0, 0, None),
            Call::from_indices(1, 0, None),
            Call::from_indices(1, 1, None)
        ]);
        let haploblocks = group_variants(&variants);
        assert_eq!(block_indices(&haploblocks), vec![vec![0, 1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_interleaved_phase_set_merge() {
        let variants = make_variants(&[
            Call::from_indices(0, 1, Some(1)),
            Call::from_indices(0, 1, None),
            Call::from_indices(1, 0, Some(1))
        ]);
        let haploblocks = group_variants(&variants);
        assert_eq!(block_indices(&haploblocks), vec![vec![0, 2], vec![1]]);
        assert_eq!(haploblocks[0].phase_set(), Some(1));
        assert_eq!(haploblocks[1].phase_set(), None);
        assert_phase_sets_consistent(&haploblocks);
    }

    #[test]
    fn test_multiple_phase_sets() {
        let variants = make_variants(&[
            Call::from_indices(0, 1, Some(10)),
            Call::from_indices(1, 0, Some(10)),
            Call::from_indices(0, 1, Some(20)),
            Call::from_indices(1, 1, None),
            Call::from_indices(0, 1, Some(10)),
            Call::from_indices(0, 1, Some(20)),
            Call::from_indices(0, 1, None)
        ]);
        let haploblocks = group_variants(&variants);
        // sub-runs are appended to the block where the phase set first appeared
        assert_eq!(block_indices(&haploblocks), vec![vec![0, 1, 4], vec![2, 3, 5], vec![6]]);
        assert_phase_sets_consistent(&haploblocks);
    }

    #[test]
    fn test_homozygous_prefix_takes_later_phase_set() {
        // the unphased hom leads the group, but the group still belongs to PS=5
        let variants = make_variants(&[
            Call::from_indices(1, 1, None),
            Call::from_indices(0, 1, Some(5)),
            Call::from_indices(0, 1, None),
            Call::from_indices(0, 1, Some(5))
        ]);
        let haploblocks = group_variants(&variants);
        assert_eq!(block_indices(&haploblocks), vec![vec![0, 1, 3], vec![2]]);
        assert_eq!(haploblocks[0].phase_set(), Some(5));
        assert_phase_sets_consistent(&haploblocks);
    }

    #[test]
    fn test_partition() {
        let calls = vec![
            Call::from_indices(0, 1, None),
            Call::from_indices(0, 1, Some(3)),
            Call::from_indices(1, 1, None),
            Call::from_indices(1, 0, Some(4)),
            Call::from_indices(0, 1, Some(3)),
            Call::from_indices(0, 0, None),
            Call::from_indices(1, 0, None),
            Call::from_indices(0, 1, Some(4)),
            Call::from_indices(1, 2, None),
        ];
        let variants = make_variants(&calls);
        let haploblocks = group_variants(&variants);
        assert!(haploblocks.iter().all(|b| !b.is_empty()));

        let mut all_indices: Vec<usize> = block_indices(&haploblocks).into_iter().flatten().collect();
        all_indices.sort();
        assert_eq!(all_indices, (0..calls.len()).collect::<Vec<usize>>());
        assert_phase_sets_consistent(&haploblocks);
    }

    #[test]
    fn test_switched_block() {
        let variants = make_variants(&[
            Call::from_indices(0, 1, Some(1)),
            Call::from_indices(2, 2, Some(1))
        ]);
        let block = Haploblock::new(variants.clone());
        let switched = block.switched();
        assert_eq!(switched.phase_set(), Some(1));
        assert_eq!(switched.variants()[0].call().alleles(), (Some(1), Some(0)));
        assert_eq!(switched.variants()[1].call().alleles(), (Some(2), Some(2)));
        // source block untouched
        assert_eq!(block.variants(), &variants[..]);
    }
}
