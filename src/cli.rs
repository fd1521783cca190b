
use clap::Parser;
use lazy_static::lazy_static;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

lazy_static! {
    /// Stores the full version string we plan to use.
    /// # Examples
    /// * `0.2.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.2.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));
}

#[derive(Clone, Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = "Every combination keeps the first haploblock as read; the mirrored half of the space is not written.")]
pub struct Settings {
    /// Input variant file in VCF format
    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub vcf_filename: PathBuf,

    /// Sample name to shuffle within the VCF (default: first sample)
    #[clap(short = 's')]
    #[clap(long = "sample-name")]
    #[clap(value_name = "SAMPLE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub sample_name: Option<String>,

    /// Output prefix, combinations are written to <PREFIX>_<i>.vcf
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(default_value = "out")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_prefix: String,

    /// Output haploblocks file (optional, csv/tsv)
    #[clap(long = "blocks-file")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub blocks_filename: Option<PathBuf>,

    /// Only group the variants and report counts, no combinations are written
    #[clap(long = "dry-run")]
    #[clap(help_heading = Some("Input/Output"))]
    pub dry_run: bool,

    /// Maximum number of combinations to write, 0 writes all of them
    #[clap(long = "max-combinations")]
    #[clap(value_name = "COUNT")]
    #[clap(default_value = "0")]
    #[clap(help_heading = Some("Enumeration"))]
    pub max_combinations: usize,

    /// Skips a number of combinations (debug only)
    #[clap(long = "skip-combinations")]
    #[clap(hide = true)]
    #[clap(default_value = "0")]
    pub skip_combinations: usize,

    /// Enable verbose output
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Beyond this many combinations without --max-combinations, we warn the user
pub const LARGE_COMBINATION_COUNT: u64 = 1 << 16;

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
fn check_required_filename(filename: &Path, label: &str) {
    if !filename.exists() {
        error!("{} does not exist: \"{}\"", label, filename.display());
        std::process::exit(exitcode::NOINPUT);
    } else {
        info!("{}: \"{}\"", label, filename.display());
    }
}

/// Checks that the folder an output path lands in exists and will otherwise exit
/// # Arguments
/// * `filename` - the output path or prefix
/// * `label` - the label to use for error messages
fn check_output_folder(filename: &Path, label: &str) {
    match filename.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            error!("{} folder does not exist: \"{}\"", label, parent.display());
            std::process::exit(exitcode::CANTCREAT);
        },
        _ => {
            info!("{}: \"{}\"", label, filename.display());
        }
    }
}

pub fn get_raw_settings() -> Settings {
    Settings::parse()
}

/// Do some additional checks here, we may increase these as we go.
/// Also can modify settings if needed since we're passing it around.
/// # Arguments
/// * `settings` - the raw settings, nothing has been checked other than what clap does for us.
pub fn check_settings(mut settings: Settings) -> Settings {
    check_required_filename(&settings.vcf_filename, "Variant file");
    if !settings.dry_run {
        check_output_folder(Path::new(&settings.output_prefix), "Output prefix");
    }
    if let Some(ref filename) = settings.blocks_filename {
        check_output_folder(filename, "Blocks file");
    }

    // 0 is just a sentinel for everything
    if settings.max_combinations == 0 {
        settings.max_combinations = usize::MAX;
    }

    info!("Enumeration:");
    if settings.max_combinations == usize::MAX {
        info!("\tMaximum combinations: ALL");
    } else {
        info!("\tMaximum combinations: {}", settings.max_combinations);
    }
    if settings.skip_combinations != 0 {
        warn!("\tCombinations to skip: {}", settings.skip_combinations);
    }
    if settings.dry_run {
        info!("\tDry run: ENABLED");
    }

    //send the settings back
    settings
}
