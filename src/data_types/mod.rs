
/// Contains the genotype Call type and zygosity definitions
pub mod call;
/// Contains the Variant type and the CallCarrier trait used by grouping and switching
pub mod variants;
