use std::sync::Arc;

use log::info;

use crate::config::defs::{GZIP_EXT, HMM_EXT, INTERPRO_PFAM_URL, PipelineError, RunConfig};
use crate::utils::file::decompress_gz;
use crate::utils::http::fetch_file;
use crate::utils::lookup::extract_pfam_accessions;
use crate::utils::prompt::prompt_existing_file;

pub async fn run(config: Arc<RunConfig>) -> Result<(), PipelineError> {
    println!("\n-------------\n Fetch HMM Profiles\n-------------\n");

    let mut tsv_path = config.cwd.join(&config.args.lookup_tsv);
    if !tsv_path.exists() {
        let renamed = prompt_existing_file(&config.args.lookup_tsv)
            .map_err(|e| PipelineError::IOError(e.to_string()))?;
        tsv_path = config.cwd.join(renamed);
    }

    let accessions =
        extract_pfam_accessions(&tsv_path).map_err(|e| PipelineError::Parse(e.to_string()))?;

    let timeout_secs = config.args.timeout_secs;
    for accession in &accessions {
        let url = format!("{}/{}?annotation=hmm", INTERPRO_PFAM_URL, accession);
        let gz_path = config
            .out_dir
            .join(format!("{}.{}.{}", accession, HMM_EXT, GZIP_EXT));

        let fetch_url = url.clone();
        let hmm_path = tokio::task::spawn_blocking(move || {
            fetch_file(&fetch_url, &gz_path, timeout_secs)?;
            decompress_gz(&gz_path)
        })
        .await
        .map_err(|e| PipelineError::IOError(e.to_string()))?
        .map_err(|e| PipelineError::Download {
            url,
            message: e.to_string(),
        })?;

        info!("Downloaded profile {}", hmm_path.display());
    }

    println!(
        "\nHMM files downloaded successfully in {}\n",
        config.out_dir.display()
    );
    Ok(())
}
