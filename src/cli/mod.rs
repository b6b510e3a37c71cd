use std::fmt::Display;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, ValueEnum};

use small_parsimony::parsimony::{Algorithm, MatrixScoring, ParsimonyScoring, SimpleScoring};

use crate::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(super) struct Cli {
    /// Tree in adjacency list format, with leaf sequences given inline
    #[arg(short, long, value_name = "TREE_FILE")]
    pub(super) input: PathBuf,

    /// Report output file, the report is printed if not given
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub(super) output: Option<PathBuf>,

    /// Cost of a substitution, or of a transition if a transversion cost is given
    #[arg(short, long, value_name = "COST", default_value_t = 1.0)]
    pub(super) mismatch: f64,

    /// Cost of a transversion, switches to a transition/transversion cost matrix
    #[arg(short, long, value_name = "COST")]
    pub(super) transversion: Option<f64>,

    /// Dynamic program used to label the tree
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Auto)]
    pub(super) algorithm: AlgorithmArg,

    /// List every edge in both directions
    #[arg(short, long)]
    pub(super) both_directions: bool,

    /// Log per-site details
    #[arg(short, long)]
    pub(super) verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum AlgorithmArg {
    Auto,
    Sankoff,
    Fitch,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Algorithm {
        match arg {
            AlgorithmArg::Auto => Algorithm::Auto,
            AlgorithmArg::Sankoff => Algorithm::Sankoff,
            AlgorithmArg::Fitch => Algorithm::Fitch,
        }
    }
}

pub(super) struct ConfigBuilder {
    input: PathBuf,
    output: Option<PathBuf>,
    mismatch: f64,
    transversion: Option<f64>,
    algorithm: Algorithm,
    both_directions: bool,
}

impl From<Cli> for ConfigBuilder {
    fn from(cli: Cli) -> ConfigBuilder {
        ConfigBuilder {
            input: cli.input,
            output: cli.output,
            mismatch: cli.mismatch,
            transversion: cli.transversion,
            algorithm: cli.algorithm.into(),
            both_directions: cli.both_directions,
        }
    }
}

impl ConfigBuilder {
    pub(super) fn setup(self) -> Result<Config> {
        if !self.input.exists() {
            bail!("Input file {} does not exist", self.input.display());
        }
        if let Some(output) = &self.output {
            if output.exists() {
                bail!("Output file {} already exists", output.display());
            }
        }
        let scoring: Box<dyn ParsimonyScoring> = match self.transversion {
            Some(tv) => Box::new(MatrixScoring::transition_transversion(self.mismatch, tv)?),
            None => Box::new(SimpleScoring::new(self.mismatch)?),
        };
        if self.algorithm == Algorithm::Fitch && !scoring.is_uniform() {
            bail!("Fitch's algorithm cannot be used with different transition and transversion costs");
        }
        Ok(Config {
            input: self.input,
            output: self.output,
            mismatch: self.mismatch,
            transversion: self.transversion,
            scoring,
            algorithm: self.algorithm,
            both_directions: self.both_directions,
        })
    }
}

#[derive(Debug)]
pub(super) struct Config {
    pub(super) input: PathBuf,
    pub(super) output: Option<PathBuf>,
    pub(super) mismatch: f64,
    pub(super) transversion: Option<f64>,
    pub(super) scoring: Box<dyn ParsimonyScoring>,
    pub(super) algorithm: Algorithm,
    pub(super) both_directions: bool,
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Input tree: {}", self.input.display())?;
        match &self.output {
            Some(output) => writeln!(f, "Output report: {}", output.display())?,
            None => writeln!(f, "Output report: standard output")?,
        }
        match self.transversion {
            Some(tv) => writeln!(
                f,
                "Costs: transition {}, transversion {}",
                self.mismatch, tv
            )?,
            None => writeln!(f, "Costs: mismatch {}", self.mismatch)?,
        }
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        write!(f, "Both edge directions: {}", self.both_directions)
    }
}
