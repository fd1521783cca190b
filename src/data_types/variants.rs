
use crate::data_types::call::Call;

/// Anything that carries exactly one genotype call for the sample being shuffled.
/// Grouping and switching only ever look at variants through this trait.
pub trait CallCarrier: Clone {
    /// The call for the sample of interest
    fn call(&self) -> &Call;

    /// Replaces the call, used when building switched copies
    fn set_call(&mut self, call: Call);
}

/// A bare call is trivially its own carrier
impl CallCarrier for Call {
    fn call(&self) -> &Call {
        self
    }

    fn set_call(&mut self, call: Call) {
        *self = call;
    }
}

/// A variant loaded from a VCF file for one sample.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variant {
    /// The chromosome name
    chrom: String,
    /// The chromosome index (rid) in the source VCF header, used for ordering
    chrom_index: u32,
    /// The coordinate of the event in the VCF file, 0-based
    position: i64,
    /// The index of the source record in input order
    record_index: usize,
    /// The genotype call for the sample
    call: Call
}

impl Variant {
    /// Creates a new variant
    /// # Arguments
    /// * `chrom` - the chromosome name
    /// * `chrom_index` - the chromosome index in the VCF header
    /// * `position` - the 0-based coordinate
    /// * `record_index` - the index of the record in the input VCF
    /// * `call` - the genotype call for our sample
    pub fn new(chrom: String, chrom_index: u32, position: i64, record_index: usize, call: Call) -> Variant {
        Variant {
            chrom,
            chrom_index,
            position,
            record_index,
            call
        }
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn chrom_index(&self) -> u32 {
        self.chrom_index
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn record_index(&self) -> usize {
        self.record_index
    }

    /// Key used to restore genomic order after flattening a combination
    pub fn sort_key(&self) -> (u32, i64, usize) {
        (self.chrom_index, self.position, self.record_index)
    }
}

impl CallCarrier for Variant {
    fn call(&self) -> &Call {
        &self.call
    }

    fn set_call(&mut self, call: Call) {
        self.call = call;
    }
}
