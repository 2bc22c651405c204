use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tempfile::tempdir;
use wormhmm_pipelines::cli::Arguments;
use wormhmm_pipelines::config::defs::{
    BAR_CHART_NAME, HEATMAP_NAME, RunConfig, SUBMIT_SCRIPT_NAME, SUMMARY_TABLE_NAME,
};
use wormhmm_pipelines::pipelines::batch_script;
use wormhmm_pipelines::pipelines::report;

const FASTA_NAME: &str = "caenorhabditis_elegans.PRJNA13758.WBPS19.protein.fa";

const TBLOUT_PF00890: &str = "\
# target name        accession  query name           accession    E-value  score  bias   E-value  score  bias   exp reg clu  ov env dom rep inc description of target\n\
#------------------- ---------- -------------------- ---------- --------- ------ ----- --------- ------ -----   --- --- --- --- --- --- --- --- ---------------------\n\
WBGene00003204.1     -          SDHA_fp              PF00890.27  1.2e-150  502.3   0.1  1.5e-150  502.0   0.1   1.0   1   0   0   1   1   1   1 succinate dehydrogenase subunit\n\
WBGene00006413.1     -          SDHA_fp              PF00890.27     4e-12   41.7   0.0     6e-12   41.1   0.0   1.2   1   0   0   1   1   1   1 -\n\
#\n\
# Program:         hmmsearch\n";

const TBLOUT_PF02910: &str = "\
# target name        accession  query name           accession    E-value  score  bias   E-value  score  bias   exp reg clu  ov env dom rep inc description of target\n\
#------------------- ---------- -------------------- ---------- --------- ------ ----- --------- ------ -----   --- --- --- --- --- --- --- --- ---------------------\n\
WBGene00004509.1     -          Succ_DH_flav_C       PF02910.24   3.1e-45  152.8   0.0   4.0e-45  152.4   0.0   1.1   1   0   0   1   1   1   1 flavoprotein C-terminal\n\
#\n\
# Program:         hmmsearch\n";

fn seed_stage_inputs(dir: &Path) -> Result<()> {
    fs::write(dir.join("PF00890.hmm"), "HMMER3/f [3.3.2 | Nov 2020]\n")?;
    fs::write(dir.join("PF02910.hmm"), "HMMER3/f [3.3.2 | Nov 2020]\n")?;
    fs::write(dir.join(FASTA_NAME), ">WBGene00003204.1\nMKVLAAGT\n")?;
    Ok(())
}

fn run_config(dir: &Path, email: Option<&str>) -> Arc<RunConfig> {
    let args = Arguments {
        module: "report".to_string(),
        email: email.map(|e| e.to_string()),
        num_species: 3,
        evalue: 0.1,
        top_hits: 10,
        timeout_secs: 300,
        ..Default::default()
    };
    Arc::new(RunConfig {
        cwd: dir.to_path_buf(),
        out_dir: dir.to_path_buf(),
        args,
    })
}

#[tokio::test]
async fn test_report_stage_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    seed_stage_inputs(dir.path())?;
    fs::write(
        dir.path().join(format!("PF00890_{}.out", FASTA_NAME)),
        TBLOUT_PF00890,
    )?;
    fs::write(
        dir.path().join(format!("PF02910_{}.out", FASTA_NAME)),
        TBLOUT_PF02910,
    )?;

    report::run(run_config(dir.path(), None)).await?;

    let summary = fs::read_to_string(dir.path().join(SUMMARY_TABLE_NAME))?;
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "target_name\tquery_name\te_value\tscore");
    assert_eq!(lines.len(), 4); // header + 3 hits
    assert!(lines[1].starts_with("WBGene00003204.1\tSDHA_fp\t"));
    assert!(lines[3].starts_with("WBGene00004509.1\tSucc_DH_flav_C\t"));

    assert!(dir.path().join(HEATMAP_NAME).exists());
    assert!(dir.path().join(BAR_CHART_NAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_report_stage_missing_outputs_not_fatal() -> Result<()> {
    let dir = tempdir()?;
    seed_stage_inputs(dir.path())?;
    // No .out files at all: the stage warns per missing pair and still
    // writes the (header-only) summary, but no charts.
    report::run(run_config(dir.path(), None)).await?;

    let summary = fs::read_to_string(dir.path().join(SUMMARY_TABLE_NAME))?;
    assert_eq!(summary.lines().count(), 1);
    assert!(!dir.path().join(HEATMAP_NAME).exists());
    assert!(!dir.path().join(BAR_CHART_NAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_report_stage_requires_fetch_outputs() -> Result<()> {
    let dir = tempdir()?;
    // Empty directory: nothing to pair up, so the stage fails.
    assert!(report::run(run_config(dir.path(), None)).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_batch_script_generation() -> Result<()> {
    let dir = tempdir()?;
    seed_stage_inputs(dir.path())?;

    batch_script::run(run_config(dir.path(), Some("user@example.ac.uk"))).await?;

    let script = fs::read_to_string(dir.path().join(SUBMIT_SCRIPT_NAME))?;
    assert!(script.starts_with("#!/bin/bash\n"));
    assert!(script.contains("#SBATCH --job-name=HMMer_Nematodes"));
    assert!(script.contains("#SBATCH --mail-user=user@example.ac.uk"));
    assert!(script.contains("module load hmmer/3.3.2-ipmjfm2"));

    // one hmmsearch line per profile x proteome pair
    let search_lines: Vec<&str> = script
        .lines()
        .filter(|line| line.contains("--tblout"))
        .collect();
    assert_eq!(search_lines.len(), 2);
    assert!(search_lines[0].contains(&format!("PF00890_{}.out", FASTA_NAME)));
    assert!(search_lines[0].contains("-E 0.1 --noali"));
    assert!(search_lines[1].contains("${hmm_dir}/PF02910.hmm"));
    Ok(())
}

#[tokio::test]
async fn test_batch_script_requires_profiles() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join(FASTA_NAME), ">p\nM\n")?;
    assert!(
        batch_script::run(run_config(dir.path(), Some("user@example.ac.uk")))
            .await
            .is_err()
    );
    Ok(())
}

#[test]
fn test_render_script_pair_order() -> Result<()> {
    let hmms = vec!["PF00890".to_string(), "PF02910".to_string()];
    let fastas = vec!["a.protein.fa".to_string(), "b.protein.fa".to_string()];
    let script = batch_script::render_script("x@y.z", &hmms, &fastas, 0.1)?;

    let search_lines: Vec<&str> = script
        .lines()
        .filter(|line| line.contains("--tblout"))
        .collect();
    assert_eq!(search_lines.len(), 4);
    // profile-major order, matching the report stage's scan
    assert!(search_lines[0].contains("PF00890_a.protein.fa.out"));
    assert!(search_lines[1].contains("PF00890_b.protein.fa.out"));
    assert!(search_lines[3].contains("PF02910_b.protein.fa.out"));
    Ok(())
}
