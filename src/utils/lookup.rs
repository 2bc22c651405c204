// InterPro search-results TSV handling.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use crate::config::defs::{ACCESSION_COLUMN, PFAM_PREFIX};

/// Extracts Pfam accessions (values starting with `PF`) from the
/// `Accession` column of a tab-separated InterPro search-results file.
/// Duplicates are dropped; first-seen order is kept.
///
/// # Arguments
///
/// * `tsv_path` - Path to the lookup TSV.
///
/// # Returns
///
/// The Pfam accessions, in file order.
pub fn extract_pfam_accessions(tsv_path: &Path) -> Result<Vec<String>> {
    let file = File::open(tsv_path)
        .with_context(|| format!("Cannot open lookup TSV {}", tsv_path.display()))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| anyhow!("Empty lookup TSV {}", tsv_path.display()))??;
    let columns: Vec<&str> = header.split('\t').collect();
    let accession_idx = columns
        .iter()
        .position(|&c| c == ACCESSION_COLUMN)
        .ok_or_else(|| anyhow!("Column '{}' not found in {}", ACCESSION_COLUMN, tsv_path.display()))?;

    let mut seen = HashSet::new();
    let mut accessions = Vec::new();
    let mut duplicates = 0usize;
    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let Some(value) = line.split('\t').nth(accession_idx) else {
            continue;
        };
        if !value.starts_with(PFAM_PREFIX) {
            continue;
        }
        if seen.insert(value.to_string()) {
            accessions.push(value.to_string());
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        debug!("Dropped {} duplicate accessions", duplicates);
    }
    if accessions.is_empty() {
        return Err(anyhow!(
            "No {} accessions in the '{}' column of {}",
            PFAM_PREFIX,
            ACCESSION_COLUMN,
            tsv_path.display()
        ));
    }
    info!("Extracted {} Pfam accessions from {}", accessions.len(), tsv_path.display());
    Ok(accessions)
}
