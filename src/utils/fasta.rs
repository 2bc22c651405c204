use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use seq_io::fasta::Reader as FastaReader;

/// Counts records in a decompressed protein FASTA.
///
/// # Arguments
///
/// * `path` - Path to the FASTA file.
///
/// # Returns
///
/// Number of records.
pub fn count_fasta_records(path: &Path) -> Result<usize> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open FASTA {}", path.display()))?;
    let mut reader = FastaReader::new(BufReader::new(file));

    let mut count = 0usize;
    while let Some(record) = reader.next() {
        record.with_context(|| format!("Invalid FASTA record in {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_count_fasta_records() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, ">p1 subunit A\nMKVLAAGT\n>p2 subunit B\nMSTPLKQ")?;
        tmp.flush()?;
        assert_eq!(count_fasta_records(tmp.path())?, 2);
        Ok(())
    }

    #[test]
    fn test_count_fasta_records_empty_file() -> Result<()> {
        let tmp = NamedTempFile::new()?;
        assert_eq!(count_fasta_records(tmp.path())?, 0);
        Ok(())
    }
}
