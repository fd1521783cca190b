
use crate::data_types::call::{Allele, Call, PhaseSet};
use crate::data_types::variants::Variant;

use log::{debug, trace};
use rust_htslib::bcf;
use rust_htslib::bcf::Read;
use rust_htslib::bcf::record::{GenotypeAllele, Numeric};
use simple_error::bail;
use std::path::Path;

/// Problems with the shape of a GT field
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum GenotypeError {
    #[error("encountered empty GT field")]
    EmptyGenotype,
    #[error("encountered GT with {ploidy} alleles, only 1 or 2 are supported")]
    UnsupportedPloidy { ploidy: usize }
}

/// Gets a list of sample names from a given VCF file
/// # Arguments
/// * `filename` - the VCF file to load
/// # Errors
/// * if the filename fails to load as a VCF
/// * if the sample name fails to parse from utf8
pub fn get_vcf_samples(filename: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let vcf_reader: bcf::Reader = bcf::Reader::from_path(filename)?;
    let vcf_header: &bcf::header::HeaderView = vcf_reader.header();
    let mut sample_names = vec![];
    for sv in vcf_header.samples().iter() {
        let vcf_sample_string: String = std::str::from_utf8(sv)?.to_string();
        sample_names.push(vcf_sample_string);
    }
    Ok(sample_names)
}

/// Finds the index of a sample in a VCF header
/// # Errors
/// * if the sample is not in the header
pub fn get_sample_index(vcf_header: &bcf::header::HeaderView, sample_name: &str) -> Result<usize, Box<dyn std::error::Error>> {
    match vcf_header.sample_id(sample_name.as_bytes()) {
        Some(index) => Ok(index),
        None => bail!("Sample name {:?} was not found in VCF", sample_name)
    }
}

/// Converts the alleles of one GT entry into a call.
/// Single-entry (haploid) genotypes are treated as homozygous for that allele.
/// # Arguments
/// * `genotype` - the GT alleles for one sample
/// * `phase_set` - the PS value for the same sample, if any
/// # Errors
/// * if the genotype is empty or has more than two entries
pub fn call_from_genotype(genotype: &[GenotypeAllele], phase_set: Option<PhaseSet>) -> Result<Call, GenotypeError> {
    let allele_index = |ga: &GenotypeAllele| -> Allele {
        match *ga {
            GenotypeAllele::Unphased(at) => Some(at),
            GenotypeAllele::Phased(at) => Some(at),
            GenotypeAllele::UnphasedMissing => None,
            GenotypeAllele::PhasedMissing => None
        }
    };

    match genotype.len() {
        0 => Err(GenotypeError::EmptyGenotype),
        1 => {
            let gt1 = allele_index(&genotype[0]);
            Ok(Call::new((gt1, gt1), phase_set))
        },
        2 => {
            // htslib stores the "|" on the second allele
            let phased = matches!(genotype[1], GenotypeAllele::Phased(_) | GenotypeAllele::PhasedMissing);
            Ok(Call::new((allele_index(&genotype[0]), allele_index(&genotype[1])), phase_set).with_phased(phased))
        },
        ploidy => Err(GenotypeError::UnsupportedPloidy { ploidy })
    }
}

/// Pulls the PS value for a sample out of a record, a PS that is undefined in the header or absent from the record is treated as no phase set
/// # Arguments
/// * `record` - the record to parse
/// * `sample_index` - the sample index, always 0 for single-sample VCFs
/// # Errors
/// * if the PS tag is present but cannot be parsed as an integer
pub fn get_phase_set(record: &bcf::Record, sample_index: usize) -> Result<Option<PhaseSet>, Box<dyn std::error::Error>> {
    match record.format(b"PS").integer() {
        Ok(all_ps_tag) => {
            let ps_tag = all_ps_tag[sample_index];
            match ps_tag.first() {
                Some(ps) if !ps.is_missing() => Ok(Some(*ps)),
                _ => Ok(None)
            }
        },
        Err(rust_htslib::errors::Error::BcfUndefinedTag{ tag: _ }) => Ok(None),
        Err(rust_htslib::errors::Error::BcfMissingTag{ tag: _, record: _ }) => {
            trace!("No PS tag on record at {}", record.pos() + 1);
            Ok(None)
        },
        Err(e) => {
            bail!("Error while parsing PS tag: {}", e);
        }
    }
}

/// Parses the call for one sample from a record
/// # Errors
/// * if rust_htslib fails to parse the genotype or phase set
/// * if the GT field has an unsupported shape
pub fn get_sample_call(record: &bcf::Record, sample_index: usize) -> Result<Call, Box<dyn std::error::Error>> {
    let phase_set = get_phase_set(record, sample_index)?;
    let all_genotypes = record.genotypes()?;
    let genotype = all_genotypes.get(sample_index);
    let call = call_from_genotype(&genotype, phase_set)?;
    Ok(call)
}

/// All the records of a VCF held in memory, with the variants for one sample pulled out
pub struct LoadedVcf {
    /// The header of the source VCF
    header: bcf::header::HeaderView,
    /// The index of the sample we parsed calls for
    sample_index: usize,
    /// Every record, in input order
    records: Vec<bcf::Record>,
    /// One variant per record, `variants[i].record_index() == i`
    variants: Vec<Variant>
}

impl LoadedVcf {
    pub fn header(&self) -> &bcf::header::HeaderView {
        &self.header
    }

    pub fn sample_index(&self) -> usize {
        self.sample_index
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn records_mut(&mut self) -> &mut [bcf::Record] {
        &mut self.records
    }
}

/// Loads every record from a VCF file and converts them into variants for the given sample
/// # Arguments
/// * `filename` - the VCF file to load, may be plain text, bgzipped, or BCF
/// * `sample_name` - the sample to parse calls from
/// # Errors
/// * if the file cannot be opened or a record fails to parse
/// * if the sample is not in the VCF
/// * if a record has no chromosome, an unsupported GT, or a non-integer PS
pub fn load_sample_variants(filename: &Path, sample_name: &str) -> Result<LoadedVcf, Box<dyn std::error::Error>> {
    let mut vcf_reader: bcf::Reader = bcf::Reader::from_path(filename)?;
    let header: bcf::header::HeaderView = vcf_reader.header().clone();
    let sample_index: usize = get_sample_index(&header, sample_name)?;

    let mut records: Vec<bcf::Record> = vec![];
    let mut variants: Vec<Variant> = vec![];
    for (record_index, record_result) in vcf_reader.records().enumerate() {
        let record: bcf::Record = record_result?;
        let chrom_index: u32 = match record.rid() {
            Some(rid) => rid,
            None => bail!("Record {} has no chromosome", record_index)
        };
        let chrom: String = std::str::from_utf8(header.rid2name(chrom_index)?)?.to_string();
        let call: Call = match get_sample_call(&record, sample_index) {
            Ok(c) => c,
            Err(e) => bail!("Error while parsing call at {}:{}: {}", chrom, record.pos() + 1, e)
        };
        trace!("Loaded {}:{} {}", chrom, record.pos() + 1, call);
        variants.push(Variant::new(chrom, chrom_index, record.pos(), record_index, call));
        records.push(record);
    }
    debug!("Loaded {} records for sample {:?} from {:?}", records.len(), sample_name, filename);

    Ok(LoadedVcf {
        header,
        sample_index,
        records,
        variants
    })
}
