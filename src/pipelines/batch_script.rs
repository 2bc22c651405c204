use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::config::defs::{
    ALICE_HMMSEARCH_PATH, ALICE_MODULES, HMM_EXT, HMMSEARCH_TAG, PipelineError, RunConfig,
    SLURM_JOB_NAME, SLURM_MAIL_TYPE, SLURM_MEM, SLURM_NODES, SLURM_TASKS_PER_NODE, SLURM_TIME,
    SUBMIT_SCRIPT_NAME, TBLOUT_EXT,
};
use crate::utils::file::{discover_fasta_names, discover_hmm_names};
use crate::utils::prompt::prompt_line;

pub async fn run(config: Arc<RunConfig>) -> Result<(), PipelineError> {
    println!("\n-------------\n Batch Script\n-------------\n");

    let hmms =
        discover_hmm_names(&config.out_dir).map_err(|e| PipelineError::IOError(e.to_string()))?;
    let fastas =
        discover_fasta_names(&config.out_dir).map_err(|e| PipelineError::IOError(e.to_string()))?;

    if hmms.is_empty() {
        return Err(PipelineError::InvalidConfig(format!(
            "No .{} profiles in {}; run the fetch_profiles module first",
            HMM_EXT,
            config.out_dir.display()
        )));
    }
    if fastas.is_empty() {
        return Err(PipelineError::InvalidConfig(format!(
            "No proteome FASTA files in {}; run the fetch_proteomes module first",
            config.out_dir.display()
        )));
    }
    info!(
        "Generating submission script for {} profiles x {} proteomes",
        hmms.len(),
        fastas.len()
    );

    let email = match &config.args.email {
        Some(email) => email.clone(),
        None => prompt_line(
            "To generate a shell submission script for the ALICE HPC system. Please enter your email:",
        )
        .map_err(|e| PipelineError::IOError(e.to_string()))?,
    };

    let script = render_script(&email, &hmms, &fastas, config.args.evalue)
        .map_err(|e| PipelineError::IOError(e.to_string()))?;
    let script_path = config.out_dir.join(SUBMIT_SCRIPT_NAME);
    std::fs::write(&script_path, script).map_err(|e| PipelineError::IOError(e.to_string()))?;

    println!(
        "\nALICE script ({}) created successfully in {}\n",
        SUBMIT_SCRIPT_NAME,
        config.out_dir.display()
    );
    Ok(())
}

/// Renders the SLURM submission script: fixed SBATCH directives, module
/// loads, then one hmmsearch line per profile x proteome pair. The tblout
/// name `<hmm>_<fasta>.out` is the contract the report stage relies on.
pub fn render_script(email: &str, hmms: &[String], fastas: &[String], evalue: f64) -> Result<String> {
    use std::fmt::Write as _;

    let mut script = String::new();
    writeln!(script, "#!/bin/bash")?;
    writeln!(script, "#SBATCH --job-name={}", SLURM_JOB_NAME)?;
    writeln!(script, "#SBATCH --nodes={}", SLURM_NODES)?;
    writeln!(script, "#SBATCH --tasks-per-node={}", SLURM_TASKS_PER_NODE)?;
    writeln!(script, "#SBATCH --mem={}", SLURM_MEM)?;
    writeln!(script, "#SBATCH --time={}", SLURM_TIME)?;
    writeln!(script, "#SBATCH --mail-type={}", SLURM_MAIL_TYPE)?;
    writeln!(script, "#SBATCH --mail-user={}", email)?;
    writeln!(script)?;

    writeln!(script, "# hmmsearch executable installed on ALICE")?;
    writeln!(script, "{}={}", HMMSEARCH_TAG, ALICE_HMMSEARCH_PATH)?;
    writeln!(script)?;

    writeln!(script, "# Modules needed for using HPC installed software")?;
    for module in ALICE_MODULES {
        writeln!(script, "module load {}", module)?;
    }
    writeln!(script)?;

    writeln!(script, "# HMM and FASTA files (assumed to be the current directory)")?;
    writeln!(script, "hmm_dir=$(pwd)")?;
    writeln!(script, "fasta_dir=$(pwd)")?;
    writeln!(script, "output_dir=$(pwd)")?;
    writeln!(script)?;

    for hmm in hmms {
        for fasta in fastas {
            writeln!(
                script,
                "${{{tag}}} --tblout ${{output_dir}}/{hmm}_{fasta}.{ext} -E {evalue} --noali ${{hmm_dir}}/{hmm}.{hmm_ext} ${{fasta_dir}}/{fasta}",
                tag = HMMSEARCH_TAG,
                hmm = hmm,
                fasta = fasta,
                ext = TBLOUT_EXT,
                evalue = evalue,
                hmm_ext = HMM_EXT,
            )?;
        }
    }

    Ok(script)
}
