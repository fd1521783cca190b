
use crate::data_types::call::Call;

/// Returns true if both alleles of the call are identical.
/// Two missing alleles are considered identical.
pub fn is_homozygous(call: &Call) -> bool {
    let (a0, a1) = call.alleles();
    a0 == a1
}

pub fn is_heterozygous(call: &Call) -> bool {
    !is_homozygous(call)
}

/// Determines whether two calls can be placed in the same haploblock.
/// Rules are checked in order:
/// 1. if both calls have a phase set, they are compatible only when the phase sets match
/// 2. otherwise, a homozygous call is compatible with anything
/// 3. otherwise (two heterozygous calls, at least one unphased), they are not compatible
/// # Arguments
/// * `call_a` - the first call
/// * `call_b` - the second call
pub fn is_compatible(call_a: &Call, call_b: &Call) -> bool {
    if let (Some(ps_a), Some(ps_b)) = (call_a.phase_set(), call_b.phase_set()) {
        return ps_a == ps_b;
    }
    is_homozygous(call_a) || is_homozygous(call_b)
}

/// Returns true if `call` is compatible with every call in `calls`, trivially true for an empty collection.
/// # Arguments
/// * `calls` - the calls that are already grouped together
/// * `call` - the candidate call
pub fn are_compatible<'a, I>(calls: I, call: &Call) -> bool
where
    I: IntoIterator<Item = &'a Call>
{
    calls.into_iter().all(|c| is_compatible(c, call))
}
