use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{debug, warn};

use crate::config::defs::{
    BAR_CHART_NAME, HEATMAP_NAME, PipelineError, RunConfig, SUMMARY_TABLE_NAME, TBLOUT_EXT,
};
use crate::utils::file::{discover_fasta_names, discover_hmm_names};
use crate::utils::plotting::{plot_score_heatmap, plot_top_hits};
use crate::utils::tblout::{read_tblout, TbloutRecord};

pub async fn run(config: Arc<RunConfig>) -> Result<(), PipelineError> {
    println!("\n-------------\n Report\n-------------\n");

    let out_dir = config.out_dir.clone();
    let top_hits = config.args.top_hits;
    tokio::task::spawn_blocking(move || build_report(&out_dir, top_hits))
        .await
        .map_err(|e| PipelineError::IOError(e.to_string()))?
        .map_err(|e| PipelineError::Parse(e.to_string()))
}

/// Parses every expected `<hmm>_<fasta>.out` tblout file in `out_dir`,
/// writes the summary table, and renders both charts. Missing output
/// files are skipped with a warning; they usually mean a search pair
/// produced nothing or was not copied back from the cluster.
pub fn build_report(out_dir: &Path, top_hits: usize) -> Result<()> {
    let hmms = discover_hmm_names(out_dir)?;
    let fastas = discover_fasta_names(out_dir)?;
    if hmms.is_empty() || fastas.is_empty() {
        return Err(anyhow!(
            "No HMM profiles or proteome FASTA files in {}; run the fetch modules first",
            out_dir.display()
        ));
    }

    let mut records = Vec::new();
    for hmm in &hmms {
        for fasta in &fastas {
            let path = out_dir.join(format!("{}_{}.{}", hmm, fasta, TBLOUT_EXT));
            if !path.exists() {
                warn!("Expected HMMer output {} is missing; skipping", path.display());
                continue;
            }
            let mut parsed = read_tblout(&path)?;
            debug!("{}: {} hits", path.display(), parsed.len());
            records.append(&mut parsed);
        }
    }

    print_summary(&records);
    write_summary_table(&records, &out_dir.join(SUMMARY_TABLE_NAME))?;

    if records.is_empty() {
        warn!("No hits parsed; skipping heatmap and bar chart");
        return Ok(());
    }

    let (targets, queries, matrix) = pivot_scores(&records);
    plot_score_heatmap(&targets, &queries, &matrix, &out_dir.join(HEATMAP_NAME))?;

    let top = top_hits_by_score(&records, top_hits);
    plot_top_hits(&top, &out_dir.join(BAR_CHART_NAME))?;

    println!(
        "Summary table, heatmap and bar chart written to {}",
        out_dir.display()
    );
    Ok(())
}

fn print_summary(records: &[TbloutRecord]) {
    println!(
        "{:<30} {:<20} {:>12} {:>10}",
        "target_name", "query_name", "e_value", "score"
    );
    for record in records {
        println!(
            "{:<30} {:<20} {:>12.2e} {:>10.1}",
            record.target_name, record.query_name, record.evalue, record.score
        );
    }
    println!("\n{} hits total\n", records.len());
}

/// Tab-separated per the downstream spreadsheet habit, despite the .csv name.
fn write_summary_table(records: &[TbloutRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    writer.write_record(["target_name", "query_name", "e_value", "score"])?;
    for record in records {
        let evalue = format!("{:e}", record.evalue);
        let score = format!("{}", record.score);
        writer.write_record([
            record.target_name.as_str(),
            record.query_name.as_str(),
            evalue.as_str(),
            score.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Pivots hits into a target x query score matrix with sorted axes.
/// A repeated target/query pair keeps the last score seen.
fn pivot_scores(records: &[TbloutRecord]) -> (Vec<String>, Vec<String>, Vec<Vec<Option<f64>>>) {
    let mut targets: Vec<String> = records.iter().map(|r| r.target_name.clone()).collect();
    targets.sort();
    targets.dedup();
    let mut queries: Vec<String> = records.iter().map(|r| r.query_name.clone()).collect();
    queries.sort();
    queries.dedup();

    let target_idx: HashMap<&str, usize> = targets
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    let query_idx: HashMap<&str, usize> = queries
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut matrix = vec![vec![None; queries.len()]; targets.len()];
    for record in records {
        let row = target_idx[record.target_name.as_str()];
        let col = query_idx[record.query_name.as_str()];
        if matrix[row][col].is_some() {
            debug!(
                "Duplicate hit for {}/{}; keeping the last score",
                record.target_name, record.query_name
            );
        }
        matrix[row][col] = Some(record.score);
    }

    (targets, queries, matrix)
}

fn top_hits_by_score(records: &[TbloutRecord], n: usize) -> Vec<(String, f64)> {
    let mut hits: Vec<(String, f64)> = records
        .iter()
        .map(|r| (r.target_name.clone(), r.score))
        .collect();
    hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(n);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(target: &str, query: &str, score: f64) -> TbloutRecord {
        TbloutRecord {
            target_name: target.to_string(),
            target_accession: "-".to_string(),
            query_name: query.to_string(),
            query_accession: "-".to_string(),
            evalue: 1e-10,
            score,
        }
    }

    #[test]
    fn test_pivot_scores_axes_and_gaps() {
        let records = vec![
            record("t2", "q1", 10.0),
            record("t1", "q2", 20.0),
            record("t1", "q1", 30.0),
        ];
        let (targets, queries, matrix) = pivot_scores(&records);
        assert_eq!(targets, vec!["t1", "t2"]);
        assert_eq!(queries, vec!["q1", "q2"]);
        assert_eq!(matrix[0][0], Some(30.0));
        assert_eq!(matrix[0][1], Some(20.0));
        assert_eq!(matrix[1][0], Some(10.0));
        assert_eq!(matrix[1][1], None);
    }

    #[test]
    fn test_top_hits_by_score_truncates_and_sorts() {
        let records = vec![
            record("low", "q", 1.0),
            record("high", "q", 100.0),
            record("mid", "q", 50.0),
        ];
        let top = top_hits_by_score(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "high");
        assert_eq!(top[1].0, "mid");
    }
}
