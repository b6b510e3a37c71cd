use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::bail;
use log::info;

use crate::alphabets::Alphabet;
use crate::report::ParsimonyReport;
use crate::tree::Tree;
use crate::Result;

mod adjacency_parser;
pub use adjacency_parser::*;

pub(crate) struct DataError {
    pub(crate) message: String,
}
impl fmt::Debug for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl Error for DataError {}

/// Parses an adjacency list and builds the validated tree over the given alphabet.
pub fn parse_tree(input: &str, alphabet: &Alphabet) -> Result<Tree> {
    from_adjacency_list(input)?.build(alphabet)
}

/// Reads a tree in adjacency list format from a file.
///
/// # Arguments
/// * `path` - Path to the adjacency list file.
/// * `alphabet` - Alphabet of the leaf sequences.
///
/// # Example
/// ```
/// use std::path::PathBuf;
/// use small_parsimony::alphabets::dna_alphabet;
/// use small_parsimony::io::read_tree_from_file;
/// let tree = read_tree_from_file(&PathBuf::from("./data/rosalind_sample.txt"), &dna_alphabet())
///     .unwrap();
/// # assert_eq!(tree.leaves().len(), 4);
/// # assert_eq!(tree.sequence_length(), 8);
/// ```
pub fn read_tree_from_file(path: &Path, alphabet: &Alphabet) -> Result<Tree> {
    info!("Reading adjacency list from file {}", path.display());
    let input = fs::read_to_string(path)?;
    info!("Read file successfully");
    parse_tree(&input, alphabet)
}

/// Writes the parsimony report to the given file path. Will return an error if the file
/// already exists.
pub fn write_report_to_file(report: &ParsimonyReport, path: &Path) -> Result<()> {
    info!("Writing parsimony report to file {}", path.display());
    if path.exists() {
        bail!(DataError {
            message: String::from("File already exists")
        });
    }
    let mut writer = File::create(path)?;
    writer.write_all(report.to_string().as_bytes())?;
    writer.write_all(b"\n")?;
    info!("Finished writing successfully");
    Ok(())
}
