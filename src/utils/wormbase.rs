// WormBase ParaSite FTP listing page handling.
use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::config::defs::PROTEIN_FASTA_GZ_SUFFIX;

lazy_static! {
    static ref HREF_RE: Regex =
        Regex::new(r#"href="([^"]+\.protein\.fa\.gz)""#).expect("href regex");
}

/// One downloadable proteome from the FTP listing.
#[derive(Debug, Clone)]
pub struct SpeciesEntry {
    pub url: String,
    pub species: String,
    pub bioproject: String,
}

/// Pulls every `.protein.fa.gz` link out of the listing page and derives
/// species name and BioProject accession from the URL path. Links whose
/// path is too shallow to carry both segments are skipped with a warning.
pub fn proteome_listing(html: &str) -> Result<Vec<SpeciesEntry>> {
    let mut entries = Vec::new();
    for captures in HREF_RE.captures_iter(html) {
        let url = captures[1].to_string();
        match species_entry_from_url(&url) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Skipping malformed proteome link {}: {}", url, e),
        }
    }
    if entries.is_empty() {
        return Err(anyhow!(
            "No {} links found in the FTP listing page",
            PROTEIN_FASTA_GZ_SUFFIX
        ));
    }
    Ok(entries)
}

/// The species name is the third path segment from the end, the BioProject
/// accession the second: `.../<species>/<bioproject>/<file>.protein.fa.gz`.
pub fn species_entry_from_url(url: &str) -> Result<SpeciesEntry> {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 3 {
        return Err(anyhow!("URL has fewer than 3 path segments"));
    }
    let bioproject = segments[segments.len() - 2].to_string();
    let species = capitalize(&segments[segments.len() - 3].replace('_', " "));
    Ok(SpeciesEntry {
        url: url.to_string(),
        species,
        bioproject,
    })
}

fn capitalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lowered,
    }
}
