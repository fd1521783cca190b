
use haploblock_shuffler::cli::{LARGE_COMBINATION_COUNT, Settings, check_settings, get_raw_settings};
use haploblock_shuffler::combinations::{CombinationIterator, all_combinations};
use haploblock_shuffler::data_types::call::Zygosity;
use haploblock_shuffler::data_types::variants::{CallCarrier, Variant};
use haploblock_shuffler::vcf_loading::{LoadedVcf, get_vcf_samples, load_sample_variants};
use haploblock_shuffler::writers::combination_writer::CombinationWriter;
use haploblock_shuffler::writers::haploblock_writer::HaploblockWriter;

use log::{LevelFilter, debug, error, info, warn};
use std::time::Instant;

fn main() {
    // get the settings
    let settings: Settings = get_raw_settings();
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    // immediately setup logging first
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    // okay, now we can check all the other settings
    let cli_settings: Settings = check_settings(settings);

    // figure out which sample is getting shuffled
    let sample_name: String = match cli_settings.sample_name.as_ref() {
        Some(s) => s.clone(),
        None => {
            let all_sample_names = match get_vcf_samples(&cli_settings.vcf_filename) {
                Ok(v) => v,
                Err(e) => {
                    error!("Error during VCF sample name parsing: {}", e);
                    std::process::exit(exitcode::IOERR);
                }
            };

            if all_sample_names.is_empty() {
                error!("No samples found in VCF: {:?}", cli_settings.vcf_filename);
                std::process::exit(exitcode::DATAERR);
            } else if all_sample_names.len() > 1 {
                warn!("Multi-sample VCF detected, but sample name was not provided.  Assuming name is {:?}.", all_sample_names[0]);
            } else {
                debug!("Single-sample VCF detected, but sample name was not provided.  Assuming name is {:?}.", all_sample_names[0]);
            }
            all_sample_names[0].clone()
        }
    };

    let start_time: Instant = Instant::now();
    info!("Loading variants for {:?}...", sample_name);
    let mut loaded_vcf: LoadedVcf = match load_sample_variants(&cli_settings.vcf_filename, &sample_name) {
        Ok(lv) => lv,
        Err(e) => {
            error!("Error while loading VCF file: {}", e);
            std::process::exit(exitcode::IOERR);
        }
    };
    let num_heterozygous: usize = loaded_vcf.variants().iter()
        .filter(|v| v.call().zygosity() == Zygosity::Heterozygous)
        .count();
    info!("Loaded {} variants, {} heterozygous.", loaded_vcf.variants().len(), num_heterozygous);

    let combination_iterator: CombinationIterator<Variant> = all_combinations(loaded_vcf.variants());
    let num_blocks: usize = combination_iterator.haploblocks().len();
    let total_combinations: Option<u64> = combination_iterator.total_combinations();
    info!("Identified {} haploblocks.", num_blocks);
    for (i, block) in combination_iterator.haploblocks().iter().enumerate() {
        debug!("block {}: {} variants, phase set {:?}", i, block.len(), block.phase_set());
    }
    match total_combinations {
        Some(total) => {
            info!("Total combinations: {}", total);
            if total > LARGE_COMBINATION_COUNT && cli_settings.max_combinations == usize::MAX && !cli_settings.dry_run {
                warn!("Writing {} combinations without --max-combinations, this will create {} files.", total, total);
            }
        },
        None => {
            info!("Total combinations: 2^{}", num_blocks - 1);
            if cli_settings.max_combinations == usize::MAX && !cli_settings.dry_run {
                warn!("Combination space exceeds 2^64 and --max-combinations is unset, this will not finish.");
            }
        }
    };

    if let Some(ref filename) = cli_settings.blocks_filename {
        info!("Saving all haploblocks to {:?}...", filename);
        let write_result = HaploblockWriter::new(filename)
            .and_then(|mut hw| hw.write_blocks(combination_iterator.haploblocks()));
        if let Err(e) = write_result {
            error!("Error while writing blocks file: {}", e);
            std::process::exit(exitcode::IOERR);
        }
    }

    if cli_settings.dry_run {
        info!("Dry run finished after {} seconds.", start_time.elapsed().as_secs_f64());
        return;
    }

    let mut combination_writer: CombinationWriter = CombinationWriter::new(
        loaded_vcf.header(),
        &cli_settings.output_prefix,
        loaded_vcf.sample_index()
    );

    // values related to printing
    const UPDATE_SPEED: usize = 100;
    let skip_count = cli_settings.skip_combinations;
    let take_count = cli_settings.max_combinations;
    // skip() goes through nth(), which only advances the pattern counter
    for (i, combination) in combination_iterator.enumerate().skip(skip_count).take(take_count) {
        match combination_writer.write_combination(i, &combination, loaded_vcf.records_mut()) {
            Ok(filename) => {
                debug!("combination {}: {:?}", i, filename);
            },
            Err(e) => {
                error!("Error while writing combination {}: {}", i, e);
                std::process::exit(exitcode::IOERR);
            }
        };

        let files_written = combination_writer.files_written();
        if files_written % UPDATE_SPEED == 0 {
            let time_so_far: f64 = start_time.elapsed().as_secs_f64();
            let files_per_sec: f64 = files_written as f64 / time_so_far;
            info!("Wrote {} combinations: {:.4} files/sec", files_written, files_per_sec);
        }
    }

    info!("Wrote {} combination files after {} seconds.", combination_writer.files_written(), start_time.elapsed().as_secs_f64());
}
