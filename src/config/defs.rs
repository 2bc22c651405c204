use std::path::PathBuf;
use crate::cli::Arguments;
use thiserror::Error;

// External software
pub const GZIP_EXT: &str = "gz";
pub const HMM_EXT: &str = "hmm";
pub const HMMSEARCH_TAG: &str = "hmmsearch";

// Remote sources
pub const WORMBASE_FTP_URL: &str = "https://parasite.wormbase.org/ftp.html";
// The double slash is how the InterPro API path is published.
pub const INTERPRO_PFAM_URL: &str = "https://www.ebi.ac.uk/interpro/wwwapi//entry/pfam";

// Lookup table
pub const DEFAULT_LOOKUP_TSV: &str = "SearchResults-succinatedehydrogenase.tsv";
pub const ACCESSION_COLUMN: &str = "Accession";
pub const PFAM_PREFIX: &str = "PF";

// Static Filenames
pub const PROTEIN_FASTA_SUFFIX: &str = ".protein.fa";
pub const PROTEIN_FASTA_GZ_SUFFIX: &str = ".protein.fa.gz";
pub const SUBMIT_SCRIPT_NAME: &str = "HMMsearch.sh";
pub const TBLOUT_EXT: &str = "out";
pub const SUMMARY_TABLE_NAME: &str = "hmmer_output_summary.csv";
pub const HEATMAP_NAME: &str = "hmmer_output_heatmap.png";
pub const BAR_CHART_NAME: &str = "hmmer_top_hits_bar_chart.png";

// SLURM directives for the ALICE cluster
pub const SLURM_JOB_NAME: &str = "HMMer_Nematodes";
pub const SLURM_NODES: usize = 1;
pub const SLURM_TASKS_PER_NODE: usize = 1;
pub const SLURM_MEM: &str = "8gb";
pub const SLURM_TIME: &str = "02:00:00";
pub const SLURM_MAIL_TYPE: &str = "BEGIN,END,FAIL";
pub const ALICE_HMMSEARCH_PATH: &str = "/cm/shared/spack/opt/spack/linux-rocky9-x86_64_v3/gcc-12.3.0/hmmer-3.3.2-ipmjfm2vvzhroirpnpn5i4rw5wptqf7r/bin/hmmsearch";
pub const ALICE_MODULES: &[&str] = &[
    "gcc/12.3.0-yxgv2bl",
    "openmpi/4.1.5-fzc7xdf",
    "hmmer/3.3.2-ipmjfm2",
];

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    IOError(String),
}

pub struct RunConfig {
    pub cwd: PathBuf,
    pub out_dir: PathBuf,
    pub args: Arguments,
}
