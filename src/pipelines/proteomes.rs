use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info};

use crate::config::defs::{PipelineError, RunConfig};
use crate::utils::fasta::count_fasta_records;
use crate::utils::file::{decompress_gz, file_name_from_url};
use crate::utils::http::{fetch_file, fetch_text};
use crate::utils::prompt::prompt_species_indices;
use crate::utils::wormbase::{proteome_listing, SpeciesEntry};

pub async fn run(config: Arc<RunConfig>) -> Result<(), PipelineError> {
    println!("\n-------------\n Fetch Proteomes\n-------------\n");

    let listing_url = config.args.ftp_url.clone();
    let timeout_secs = config.args.timeout_secs;
    info!("Fetching proteome listing from {}", listing_url);

    let fetch_url = listing_url.clone();
    let html = tokio::task::spawn_blocking(move || fetch_text(&fetch_url, timeout_secs))
        .await
        .map_err(|e| PipelineError::IOError(e.to_string()))?
        .map_err(|e| PipelineError::Download {
            url: listing_url,
            message: e.to_string(),
        })?;

    let entries = proteome_listing(&html).map_err(|e| PipelineError::Parse(e.to_string()))?;
    info!("Found {} downloadable proteomes", entries.len());

    let indices = select_species(&config, &entries)?;

    for idx in indices {
        let entry = entries[idx].clone();
        let out_dir = config.out_dir.clone();
        let fasta_path =
            tokio::task::spawn_blocking(move || download_proteome(&entry, &out_dir, timeout_secs))
                .await
                .map_err(|e| PipelineError::IOError(e.to_string()))?
                .map_err(|e| PipelineError::Download {
                    url: entries[idx].url.clone(),
                    message: e.to_string(),
                })?;

        let record_count =
            count_fasta_records(&fasta_path).map_err(|e| PipelineError::Parse(e.to_string()))?;
        if record_count == 0 {
            return Err(PipelineError::Parse(format!(
                "{} contains no protein records",
                fasta_path.display()
            )));
        }
        info!("{}: {} protein records", fasta_path.display(), record_count);
    }

    println!(
        "\nFASTA files downloaded successfully in {}\n",
        config.out_dir.display()
    );
    Ok(())
}

/// Either validates the indices given on the command line or lists the
/// species table and prompts for them.
fn select_species(
    config: &RunConfig,
    entries: &[SpeciesEntry],
) -> Result<Vec<usize>, PipelineError> {
    match &config.args.species {
        Some(list) => {
            if list.len() != config.args.num_species || list.iter().any(|&i| i >= entries.len()) {
                return Err(PipelineError::InvalidConfig(format!(
                    "--species must name {} indices below {}",
                    config.args.num_species,
                    entries.len()
                )));
            }
            Ok(list.clone())
        }
        None => {
            for (i, entry) in entries.iter().enumerate() {
                println!("{}\t\t{}\t\t{}", i, entry.species, entry.bioproject);
            }
            prompt_species_indices(config.args.num_species, entries.len())
                .map_err(|e| PipelineError::IOError(e.to_string()))
        }
    }
}

/// Downloads one `.protein.fa.gz` and decompresses it in place.
/// The file name is the last URL segment, as on the FTP site.
fn download_proteome(entry: &SpeciesEntry, out_dir: &Path, timeout_secs: u64) -> Result<PathBuf> {
    let file_name = file_name_from_url(&entry.url)?;
    let gz_path = out_dir.join(&file_name);
    info!("Downloading {} ({})", entry.species, file_name);
    let bytes = fetch_file(&entry.url, &gz_path, timeout_secs)?;
    debug!("{}: {} bytes", file_name, bytes);
    decompress_gz(&gz_path)
}
