
use crate::data_types::call::Call;
use crate::data_types::variants::CallCarrier;

/// Returns a new call with the two alleles in reverse order, phase set and separator are preserved.
pub fn switch_call(call: &Call) -> Call {
    call.reversed()
}

/// Returns an independent copy of the variant with its call switched, the input is not modified.
pub fn switch_variant<V: CallCarrier>(variant: &V) -> V {
    let mut switched = variant.clone();
    switched.set_call(switch_call(variant.call()));
    switched
}

/// Switches every variant in order, returning a new collection
pub fn switch_variants<V: CallCarrier>(variants: &[V]) -> Vec<V> {
    variants.iter()
        .map(switch_variant)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::variants::Variant;

    #[test]
    fn test_switch_call() {
        let call = Call::from_indices(0, 1, None);
        assert_eq!(switch_call(&call), Call::from_indices(1, 0, None));

        let call = Call::from_indices(1, 2, Some(12)).with_phased(true);
        let switched = switch_call(&call);
        assert_eq!(switched.alleles(), (Some(2), Some(1)));
        assert_eq!(switched.phase_set(), Some(12));
        assert!(switched.is_phased());
    }

    #[test]
    fn test_switch_call_involution() {
        let calls = vec![
            Call::from_indices(0, 1, None),
            Call::from_indices(1, 1, Some(3)),
            Call::new((None, Some(1)), None),
            Call::from_indices(3, 0, Some(9)).with_phased(true)
        ];
        for call in calls.iter() {
            assert_eq!(&switch_call(&switch_call(call)), call);
        }
    }

    #[test]
    fn test_switch_variant_no_alias() {
        let variant = Variant::new("chr2".to_string(), 1, 500, 0, Call::from_indices(0, 1, Some(500)));
        let switched = switch_variant(&variant);
        assert_eq!(switched.call().alleles(), (Some(1), Some(0)));
        assert_eq!(switched.call().phase_set(), Some(500));
        assert_eq!(switched.chrom(), "chr2");
        assert_eq!(switched.position(), 500);

        // input is untouched
        assert_eq!(variant.call().alleles(), (Some(0), Some(1)));
    }

    #[test]
    fn test_switch_variants() {
        let variants = vec![
            Variant::new("chr1".to_string(), 0, 10, 0, Call::from_indices(0, 1, None)),
            Variant::new("chr1".to_string(), 0, 20, 1, Call::from_indices(1, 1, None)),
            Variant::new("chr1".to_string(), 0, 30, 2, Call::from_indices(2, 0, None))
        ];
        let switched = switch_variants(&variants);
        let alleles: Vec<_> = switched.iter().map(|v| v.call().alleles()).collect();
        assert_eq!(alleles, vec![(Some(1), Some(0)), (Some(1), Some(1)), (Some(0), Some(2))]);
        let positions: Vec<i64> = switched.iter().map(|v| v.position()).collect();
        assert_eq!(positions, vec![10, 20, 30]);
        assert!(switch_variants::<Variant>(&[]).is_empty());
    }
}
