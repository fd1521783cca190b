
/// Functionality that partitions variants into haploblocks
pub mod block_gen;
/// CLI functionality and checks
pub mod cli;
/// Lazy enumeration of every haploblock switch combination
pub mod combinations;
/// Rules for whether two calls can share a haploblock
pub mod compatibility;
/// Contains the core data types: calls and variants
pub mod data_types;
/// Generates the switch patterns over a set of haploblocks
pub mod patterns;
/// Reverses the allele order of calls, variants, and blocks
pub mod switcher;
/// Loads variants for a sample from a VCF file
pub mod vcf_loading;
/// Contains all the various output writer functionality
pub mod writers;
