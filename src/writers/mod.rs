
/// Contains the writer for one VCF per combination
pub mod combination_writer;
/// Contains the writer for the haploblock summary table
pub mod haploblock_writer;
