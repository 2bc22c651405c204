// HMMER3 --tblout file functions and structures
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Single tblout hit line. Only the full-sequence columns are kept;
/// the per-domain columns and trailing description are ignored.
#[derive(Debug, Clone)]
pub struct TbloutRecord {
    pub target_name: String,
    pub target_accession: String,
    pub query_name: String,
    pub query_accession: String,
    pub evalue: f64,
    pub score: f64,
}

impl TbloutRecord {
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut fields = line.split_whitespace();
        macro_rules! next {
            () => {
                fields.next().ok_or_else(|| anyhow!("missing field"))?
            };
        }
        Ok(Self {
            target_name: next!().to_string(),
            target_accession: next!().to_string(),
            query_name: next!().to_string(),
            query_accession: next!().to_string(),
            evalue: next!().parse()?,
            score: next!().parse()?,
        })
    }
}

/// Reads every hit from a tblout file, skipping `#` comment lines.
pub fn read_tblout(path: &Path) -> Result<Vec<TbloutRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open tblout file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = TbloutRecord::parse_line(&line)
            .with_context(|| format!("{} line {}", path.display(), line_no + 1))?;
        records.push(record);
    }
    Ok(records)
}
