// Thin wrappers over ureq for the two fetch shapes the pipeline needs.
use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

/// Fetches a URL body as text.
pub fn fetch_text(url: &str, timeout_secs: u64) -> Result<String> {
    let response = ureq::get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .call()
        .with_context(|| format!("Failed to fetch {}", url))?;

    response
        .into_string()
        .with_context(|| format!("Failed to read body of {}", url))
}

/// Fetches a file from a URL to the specified output path.
///
/// # Arguments
///
/// * `url` - Source URL.
/// * `output_path` - Destination file path.
/// * `timeout_secs` - Whole-request timeout.
///
/// # Returns
///
/// Bytes written.
pub fn fetch_file(url: &str, output_path: &Path, timeout_secs: u64) -> Result<u64> {
    let response = ureq::get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .call()
        .with_context(|| format!("Failed to download {}", url))?;

    let mut file = File::create(output_path)
        .with_context(|| format!("Cannot create {}", output_path.display()))?;
    let mut reader = response.into_reader();
    let written = std::io::copy(&mut reader, &mut file)
        .with_context(|| format!("Failed writing {}", output_path.display()))?;

    Ok(written)
}
