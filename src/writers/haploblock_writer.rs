
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::block_gen::Haploblock;
use crate::compatibility::is_heterozygous;
use crate::data_types::call::PhaseSet;
use crate::data_types::variants::{CallCarrier, Variant};

/// Writes the haploblocks that are being enumerated to a csv/tsv file
pub struct HaploblockWriter {
    /// Handle for the CSV writer
    csv_writer: csv::Writer<File>
}

/// Contains all the data written to each row of our blocks file
#[derive(Serialize)]
struct HaploblockRow {
    /// The index of the block, i.e. its position in every switch pattern
    block_index: usize,
    /// the phase set ID of the block, empty if none
    phase_set: Option<PhaseSet>,
    /// the chromosome of the first variant
    first_chrom: String,
    /// the 1-based position of the first variant
    first_pos: i64,
    /// the chromosome of the last variant
    last_chrom: String,
    /// the 1-based position of the last variant
    last_pos: i64,
    /// the number of variants in the block
    num_variants: usize,
    /// the number of heterozygous variants in the block, these are the ones that change on a switch
    num_heterozygous: usize
}

impl HaploblockWriter {
    /// Creates a new writer for a given filename
    /// # Arguments
    /// * `filename` - the path to write all blocks to, ".csv" will be comma-delimited and anything else tab-delimited
    pub fn new(filename: &Path) -> csv::Result<HaploblockWriter> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;
        Ok(HaploblockWriter {
            csv_writer
        })
    }

    /// Writes one row per block, in block order
    /// # Arguments
    /// * `haploblocks` - the blocks to write; they are expected to be non-empty
    /// # Errors
    /// * if the csv_writer has any errors
    pub fn write_blocks(&mut self, haploblocks: &[Haploblock<Variant>]) -> csv::Result<()> {
        for (block_index, block) in haploblocks.iter().enumerate() {
            let (first, last) = match (block.variants().first(), block.variants().last()) {
                (Some(f), Some(l)) => (f, l),
                _ => continue
            };
            let row = HaploblockRow {
                block_index,
                phase_set: block.phase_set(),
                first_chrom: first.chrom().to_string(),
                first_pos: first.position() + 1,
                last_chrom: last.chrom().to_string(),
                last_pos: last.position() + 1,
                num_variants: block.len(),
                num_heterozygous: block.variants().iter()
                    .filter(|v| is_heterozygous(v.call()))
                    .count()
            };
            self.csv_writer.serialize(&row)?;
        }
        self.csv_writer.flush()?;
        Ok(())
    }
}
