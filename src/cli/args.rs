use clap::Parser;

use crate::config::defs::{DEFAULT_LOOKUP_TSV, WORMBASE_FTP_URL};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "wormhmm-pipelines", version = "0.1")]
pub struct Arguments {

    #[arg(short, long, help = "Pipeline stage to run: fetch_proteomes, fetch_profiles, batch_script, report, or full")]
    pub module: String,

    #[arg(short = 'v', long = "verbose", action)]
    pub verbose: bool,

    #[arg(short = 'o', long = "out", help = "Output directory for all generated files. If not specified, a directory named 'wormhmm_YYYYMMDD' will be created in the current working directory.")]
    pub out_dir: Option<String>,

    #[arg(long = "ftp-url", default_value = WORMBASE_FTP_URL, help = "WormBase ParaSite FTP listing page")]
    pub ftp_url: String,

    #[arg(short = 'l', long = "lookup-tsv", default_value = DEFAULT_LOOKUP_TSV, help = "InterPro search-results TSV holding the Pfam accessions")]
    pub lookup_tsv: String,

    #[arg(short = 'e', long, help = "Email address for SLURM job notifications; prompted for if absent")]
    pub email: Option<String>,

    #[clap(
        long,
        value_delimiter = ',',
        value_parser = clap::value_parser!(usize),
        help = "Comma-separated species indices from the FTP listing (e.g., 0,5,12); skips the interactive prompt"
    )]
    pub species: Option<Vec<usize>>,

    #[arg(long, default_value_t = 3)]
    pub num_species: usize,

    #[arg(long, default_value_t = 0.1, help = "E-value threshold passed to hmmsearch")]
    pub evalue: f64,

    #[arg(long, default_value_t = 10, help = "Number of hits shown in the bar chart")]
    pub top_hits: usize,

    #[arg(long, default_value_t = 300, help = "Per-download timeout in seconds")]
    pub timeout_secs: u64,
}
