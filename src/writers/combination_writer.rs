
use crate::combinations::Combination;
use crate::data_types::call::{Allele, Call};
use crate::data_types::variants::{CallCarrier, Variant};
use crate::vcf_loading::get_sample_call;

use log::trace;
use rust_htslib::bcf;
use rust_htslib::bcf::record::GenotypeAllele;
use simple_error::bail;
use std::path::PathBuf;

/// Writes each combination out to its own VCF file, `{prefix}_{index}.vcf`
pub struct CombinationWriter {
    /// A copy of the input VCF header that all outputs are templated from
    vcf_header: bcf::header::HeaderView,
    /// The prefix for every output file
    output_prefix: String,
    /// The index of the sample whose GT gets rewritten
    sample_index: usize,
    /// Number of files written so far
    files_written: usize
}

impl CombinationWriter {
    /// Creates a new writer from the template header
    /// # Arguments
    /// * `vcf_header` - the header of the input VCF
    /// * `output_prefix` - the output path prefix
    /// * `sample_index` - the sample index within the VCF being shuffled
    pub fn new(vcf_header: &bcf::header::HeaderView, output_prefix: &str, sample_index: usize) -> CombinationWriter {
        CombinationWriter {
            vcf_header: vcf_header.clone(),
            output_prefix: output_prefix.to_string(),
            sample_index,
            files_written: 0
        }
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// The output path for a given combination index
    pub fn output_filename(&self, combination_index: usize) -> PathBuf {
        PathBuf::from(format!("{}_{}.vcf", self.output_prefix, combination_index))
    }

    /// Builds an output header with our provenance lines added
    fn build_header(&self, combination_index: usize) -> bcf::header::Header {
        let mut output_header: bcf::header::Header = bcf::header::Header::from_template(&self.vcf_header);
        let cli_string: String = escape_header_value(&std::env::args().collect::<Vec<String>>().join(" "));
        let cli_version: &str = &crate::cli::FULL_VERSION;
        let file_date = chrono::Local::now().format("%Y%m%d");
        output_header.push_record(format!("##fileDate={file_date}").as_bytes());
        output_header.push_record(format!(r#"##haploblock_shuffler_version="{cli_version}""#).as_bytes());
        output_header.push_record(format!(r#"##haploblock_shuffler_command="{cli_string}""#).as_bytes());
        output_header.push_record(format!("##haploblock_shuffler_combination={combination_index}").as_bytes());
        output_header
    }

    /// Writes a single combination to `{prefix}_{index}.vcf`.
    /// Variants are written sorted by chromosome and position; only the GT of our sample is modified.
    /// # Arguments
    /// * `combination_index` - the index used in the output filename
    /// * `combination` - the haploblocks to write
    /// * `records` - the records of the input VCF, indexed by `Variant::record_index()`
    /// # Errors
    /// * if the output cannot be created or written
    /// * if a variant points to a record that does not exist
    pub fn write_combination(&mut self, combination_index: usize, combination: &Combination<Variant>, records: &mut [bcf::Record]) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let filename = self.output_filename(combination_index);
        let output_header = self.build_header(combination_index);
        let mut vcf_writer: bcf::Writer = bcf::Writer::from_path(
            &filename,
            &output_header,
            true,
            bcf::Format::Vcf
        )?;

        let mut flattened: Vec<&Variant> = combination.iter()
            .flat_map(|block| block.variants().iter())
            .collect();
        flattened.sort_by_key(|v| v.sort_key());

        for variant in flattened.into_iter() {
            let record: &mut bcf::Record = match records.get_mut(variant.record_index()) {
                Some(r) => r,
                None => bail!("Variant references record {} but only {} were loaded", variant.record_index(), records.len())
            };
            vcf_writer.translate(record);
            set_sample_call(record, self.sample_index, variant.call())?;
            vcf_writer.write(record)?;
        }

        trace!("Finished writing {:?}", filename);
        self.files_written += 1;
        Ok(filename)
    }
}

/// Escapes backslashes and double quotes so a value can sit inside a quoted header field
fn escape_header_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Encodes a call as the two htslib GT integers, the phasing bit lives on the second allele
fn encode_call(call: &Call) -> (i32, i32) {
    let (a0, a1): (Allele, Allele) = call.alleles();
    let gt1 = match a0 {
        Some(at) => GenotypeAllele::Unphased(at),
        None => GenotypeAllele::UnphasedMissing
    };
    let gt2 = match (a1, call.is_phased()) {
        (Some(at), true) => GenotypeAllele::Phased(at),
        (Some(at), false) => GenotypeAllele::Unphased(at),
        (None, true) => GenotypeAllele::PhasedMissing,
        (None, false) => GenotypeAllele::UnphasedMissing
    };
    (i32::from(gt1), i32::from(gt2))
}

/// Rewrites the GT of one sample in a record to match the provided call.
/// If the record already matches, it is left as is; this keeps haploid GT entries intact.
/// # Arguments
/// * `record` - the record to modify in-place
/// * `sample_index` - the sample to modify
/// * `call` - the desired call
/// # Errors
/// * if the GT field cannot be parsed or written
pub fn set_sample_call(record: &mut bcf::Record, sample_index: usize, call: &Call) -> Result<(), Box<dyn std::error::Error>> {
    let current_call = get_sample_call(record, sample_index)?;
    if current_call.alleles() == call.alleles() {
        return Ok(());
    }

    // copy over every GT, only our sample will change
    let mut alleles: Vec<i32> = vec![];
    {
        let record_gt = record.genotypes()?;
        for si in 0..record.sample_count() {
            let genotype = record_gt.get(si as usize);
            match genotype.len() {
                0 => bail!("Encountered empty genotype record at position {}", record.pos()),
                1 => {
                    // single-allele GT calls are copied with the end sentinel
                    alleles.push(i32::from(genotype[0]));
                    alleles.push(i32::MIN+1);
                },
                2 => {
                    alleles.push(i32::from(genotype[0]));
                    alleles.push(i32::from(genotype[1]));
                },
                gt_len => {
                    bail!("Encountered GT of length {} at record {}", gt_len, record.desc())
                }
            }
        }
    }

    let (gt1, gt2) = encode_call(call);
    let sample_gt_offset: usize = 2 * sample_index;
    alleles[sample_gt_offset] = gt1;
    alleles[sample_gt_offset + 1] = gt2;
    record.push_format_integer(b"GT", &alleles)?;
    Ok(())
}
