mod pipelines;
mod utils;
mod config;
mod cli;

use std::time::Instant;
use std::{env, fs};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use env_logger::Builder;
use log::{self, LevelFilter, error, info};

use crate::cli::parse;
use crate::config::defs::{PipelineError, RunConfig, SUBMIT_SCRIPT_NAME};
use crate::utils::prompt::wait_for_outputs;
use pipelines::batch_script;
use pipelines::profiles;
use pipelines::proteomes;
use pipelines::report;

#[tokio::main]
async fn main() -> Result<()> {
    let run_start = Instant::now();

    let args = parse();

    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    println!("\n-------------\n WormHMM\n-------------\n");

    let dir = env::current_dir()?;
    info!("The current directory is {:?}\n", dir);

    let out_dir = setup_output_dir(&args, &dir)?;
    info!("The output directory is {:?}\n", out_dir);

    let module = args.module.clone();
    let run_config = Arc::new(RunConfig {
        cwd: dir,
        out_dir,
        args,
    });

    if let Err(e) = match module.as_str() {
        "fetch_proteomes" => proteomes::run(run_config).await,
        "fetch_profiles" => profiles::run(run_config).await,
        "batch_script" => batch_script::run(run_config).await,
        "report" => report::run(run_config).await,
        "full" => full_run(run_config).await,
        _ => Err(PipelineError::InvalidConfig(format!("Invalid module: {}", module))),
    } {
        error!("Pipeline failed: {} at {} milliseconds.", e, run_start.elapsed().as_millis());
        std::process::exit(1);
    }

    println!("Run complete: {} milliseconds.", run_start.elapsed().as_millis());
    Ok(())
}

/// Runs all four stages in order. The HMMer searches themselves happen on
/// the cluster, so between script generation and parsing the run blocks
/// until the user confirms the output files are in place.
async fn full_run(run_config: Arc<RunConfig>) -> Result<(), PipelineError> {
    proteomes::run(run_config.clone()).await?;
    profiles::run(run_config.clone()).await?;
    batch_script::run(run_config.clone()).await?;

    println!(
        "\nRun {} on ALICE to get the output files. The HMMer outputs must be in {}",
        SUBMIT_SCRIPT_NAME,
        run_config.out_dir.display()
    );
    wait_for_outputs().map_err(|e| PipelineError::IOError(e.to_string()))?;

    report::run(run_config).await
}

/// Sets up output directory
/// If `out_dir` is specified from args, uses it;
/// otherwise, creates a directory named `wormhmm_YYYYMMDD`.
/// Ensures the directory exists.
///
/// # Arguments
/// * `args` - The parsed command-line arguments.
/// * `cwd` - The current working directory.
/// # Returns
/// path to the output directory.
fn setup_output_dir(args: &cli::args::Arguments, cwd: &PathBuf) -> Result<PathBuf> {
    let out_dir = match &args.out_dir {
        Some(out) => {
            let path = PathBuf::from(out);
            if path.is_absolute() {
                path
            } else {
                cwd.join(path)
            }
        }
        None => {
            let timestamp = Local::now().format("%Y%m%d").to_string();
            cwd.join(format!("wormhmm_{}", timestamp))
        }
    };
    fs::create_dir_all(&out_dir)?;
    Ok(out_dir)
}
