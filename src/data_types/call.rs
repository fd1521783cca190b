
/// A single allele index from a GT field; `None` is a missing allele (".")
pub type Allele = Option<i32>;

/// Phase set identifier from the PS FORMAT field
pub type PhaseSet = i32;

/// Zygosity definitions, mostly used for reporting
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Zygosity {
    HomozygousReference=0,
    Heterozygous,
    HomozygousAlternate,
    Unknown // make sure Unknown is always the last one in the list
}

/// A genotype call for one sample at one variant.
/// The allele order is meaningful: `alleles.0` is the first haplotype and `alleles.1` the second.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Call {
    /// the two alleles, in the order they were read
    alleles: (Allele, Allele),
    /// the phase set this call belongs to, if any
    phase_set: Option<PhaseSet>,
    /// if true, the GT separator was "|" instead of "/"
    phased: bool
}

impl Call {
    /// Creates a new call with an unphased separator.
    /// # Arguments
    /// * `alleles` - the ordered allele pair
    /// * `phase_set` - the optional phase set identifier
    pub fn new(alleles: (Allele, Allele), phase_set: Option<PhaseSet>) -> Call {
        Call {
            alleles,
            phase_set,
            phased: false
        }
    }

    /// Shorthand for a fully called genotype, e.g. `Call::from_indices(0, 1, None)` is "0/1"
    pub fn from_indices(allele0: i32, allele1: i32, phase_set: Option<PhaseSet>) -> Call {
        Call::new((Some(allele0), Some(allele1)), phase_set)
    }

    /// Builder-style setter for the GT separator
    pub fn with_phased(mut self, phased: bool) -> Call {
        self.phased = phased;
        self
    }

    pub fn alleles(&self) -> (Allele, Allele) {
        self.alleles
    }

    pub fn phase_set(&self) -> Option<PhaseSet> {
        self.phase_set
    }

    pub fn is_phased(&self) -> bool {
        self.phased
    }

    /// Returns a copy of this call with the alleles in reverse order; everything else is preserved
    pub fn reversed(&self) -> Call {
        Call {
            alleles: (self.alleles.1, self.alleles.0),
            phase_set: self.phase_set,
            phased: self.phased
        }
    }

    /// Classifies the call, any missing allele leads to `Zygosity::Unknown`
    pub fn zygosity(&self) -> Zygosity {
        match self.alleles {
            (Some(a0), Some(a1)) => {
                if a0 != a1 {
                    Zygosity::Heterozygous
                } else if a0 == 0 {
                    Zygosity::HomozygousReference
                } else {
                    Zygosity::HomozygousAlternate
                }
            },
            _ => Zygosity::Unknown
        }
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let allele_str = |a: Allele| a.map(|i| i.to_string()).unwrap_or_else(|| ".".to_string());
        let separator = if self.phased { '|' } else { '/' };
        write!(f, "{}{}{}", allele_str(self.alleles.0), separator, allele_str(self.alleles.1))?;
        if let Some(ps) = self.phase_set {
            write!(f, ":{ps}")?;
        }
        Ok(())
    }
}
