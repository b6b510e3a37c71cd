use anyhow::{anyhow, bail, Error};
use clap::Parser;
use ftail::Ftail;
use log::{info, LevelFilter};

use small_parsimony::alphabets::dna_alphabet;
use small_parsimony::io::{read_tree_from_file, write_report_to_file};
use small_parsimony::parsimony::TreeLabeller;
use small_parsimony::report::ParsimonyReport;

mod cli;
use crate::cli::{Cli, Config, ConfigBuilder};

type Result<T> = std::result::Result<T, Error>;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            bail!("Unable to parse command line arguments: \n {}", error)
        }
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Ftail::new()
        .console(level)
        .init()
        .map_err(|e| anyhow!("Unable to set up logging: {:?}", e))?;
    info!("Successfully parsed the command line parameters");

    let cfg_build: ConfigBuilder = cli.into();
    let cfg = cfg_build.setup()?;

    info!("Small parsimony run started.");
    info!("{}", cfg);
    run(cfg)
}

fn run(cfg: Config) -> Result<()> {
    info!("Reading tree from {}.", cfg.input.display());
    let mut tree = read_tree_from_file(&cfg.input, &dna_alphabet())?;

    let labeller = TreeLabeller::with_algorithm(cfg.scoring.clone(), cfg.algorithm)?;
    let result = labeller.label(&mut tree)?;
    info!("Parsimony score: {}", result.score);

    let report =
        ParsimonyReport::from_tree(result.score, &tree)?.both_directions(cfg.both_directions);
    match &cfg.output {
        Some(path) => {
            info!("Putting the report in {}", path.display());
            write_report_to_file(&report, path)?;
        }
        None => println!("{}", report),
    }
    Ok(())
}
