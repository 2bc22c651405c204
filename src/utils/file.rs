use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;

use crate::config::defs::{GZIP_EXT, HMM_EXT, PROTEIN_FASTA_SUFFIX};

pub fn is_gzipped(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buffer = [0u8; 2];
    file.read_exact(&mut buffer)?;
    Ok(buffer == [0x1F, 0x8B]) // Gzip magic bytes
}

/// Decompresses `<name>.gz` next to itself, removes the compressed file,
/// and returns the path to the decompressed one.
///
/// # Arguments
///
/// * `gz_path` - Path to a `.gz` file.
///
/// # Returns
///
/// Path of the decompressed file.
pub fn decompress_gz(gz_path: &Path) -> Result<PathBuf> {
    if !is_gzipped(gz_path).with_context(|| format!("Cannot read {}", gz_path.display()))? {
        return Err(anyhow!("{} is not gzip data", gz_path.display()));
    }

    let out_path = match gz_path.extension() {
        Some(ext) if ext == GZIP_EXT => gz_path.with_extension(""),
        _ => return Err(anyhow!("{} does not end in .{}", gz_path.display(), GZIP_EXT)),
    };

    let mut decoder = GzDecoder::new(File::open(gz_path)?);
    let mut out_file = File::create(&out_path)
        .with_context(|| format!("Cannot create {}", out_path.display()))?;
    io::copy(&mut decoder, &mut out_file)
        .with_context(|| format!("Decompression of {} failed", gz_path.display()))?;

    std::fs::remove_file(gz_path)?;
    Ok(out_path)
}

/// File name is the last path segment of the URL, as served.
pub fn file_name_from_url(url: &str) -> Result<String> {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .ok_or_else(|| anyhow!("No file name in URL: {}", url))
}

/// Lists HMM profile names (file stems of `*.hmm`) in a directory, sorted.
pub fn discover_hmm_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == HMM_EXT).unwrap_or(false) {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Lists proteome FASTA file names (`*.protein.fa`) in a directory, sorted.
pub fn discover_fasta_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) {
            if name.ends_with(PROTEIN_FASTA_SUFFIX) {
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}
