use clap::{Parser, Subcommand, Args as ClapArgs};
use std::path::PathBuf;

use crate::constants::DEFAULT_PROFILE_NAME;
use crate::utils::hash::HashAlgorithm;

/// Command-line arguments for the rust-fshash tool.
///
/// Exactly one digest algorithm must be selected, together with the root of
/// the tree to hash and the directory that receives the report. Required
/// flags are waived when a subcommand is given.
#[derive(Parser, Debug)]
#[clap(
    name = "rust-fshash",
    about = "One-way file system hashing for forensic chain of custody",
    version,
    subcommand_negates_reqs = true
)]
pub struct Args {
    /// Digest algorithm selection
    #[clap(flatten)]
    pub algorithm: AlgorithmArgs,

    /// Root directory to hash recursively
    #[clap(short = 'd', long = "rootPath", required = true)]
    pub root_path: Option<PathBuf>,

    /// Directory the report, log and summary are written to
    #[clap(short = 'r', long = "reportPath", required = true)]
    pub report_path: Option<PathBuf>,

    /// Display progress messages
    #[clap(short, long)]
    pub verbose: bool,

    /// Path to a YAML scan profile
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Number of hashing workers (0 = all cores, default 1)
    #[clap(short = 'w', long)]
    pub workers: Option<usize>,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Mutually exclusive, required algorithm flags.
#[derive(ClapArgs, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct AlgorithmArgs {
    /// Specifies MD5 algorithm
    #[clap(long)]
    pub md5: bool,

    /// Specifies SHA256 algorithm
    #[clap(long)]
    pub sha256: bool,

    /// Specifies SHA512 algorithm
    #[clap(long)]
    pub sha512: bool,
}

impl AlgorithmArgs {
    /// The single selected algorithm, if exactly one flag is set
    pub fn selected(&self) -> Option<HashAlgorithm> {
        match (self.md5, self.sha256, self.sha512) {
            (true, false, false) => Some(HashAlgorithm::Md5),
            (false, true, false) => Some(HashAlgorithm::Sha256),
            (false, false, true) => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default scan profile
    InitConfig {
        /// Path to output profile file
        #[clap(default_value = DEFAULT_PROFILE_NAME)]
        path: PathBuf,
    },
}
