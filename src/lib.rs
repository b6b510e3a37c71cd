use anyhow::Error;

pub mod alphabets;
pub mod errors;
pub mod io;
pub mod parsimony;
pub mod report;
pub mod tree;

mod macros;

pub type Result<T> = std::result::Result<T, Error>;
