//! Command line arguments.

use crate::batch::Input;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Query NS, A, MX and SOA records for one or many domains and record the results.
///
/// Without `--mongo_config` results are printed to standard output, one JSON document per
/// line.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about)]
#[command(group(ArgGroup::new("input").required(true).args(["domain", "file"])))]
pub struct Args {
    /// Domain you want to query
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Name of file containing a list of domains, one per line
    #[arg(short = 'f', long = "file", value_name = "DOMAIN_LIST")]
    pub file: Option<PathBuf>,

    /// Export results to the MongoDB database described by this YAML file
    #[arg(short = 'm', long = "mongo_config", value_name = "MONGO_CONFIG")]
    pub mongo_config: Option<PathBuf>,
}

impl Args {
    #[must_use]
    pub fn input(&self) -> Option<Input> {
        match (&self.domain, &self.file) {
            (Some(domain), _) => Some(Input::Domain(domain.trim().to_lowercase())),
            (None, Some(file)) => Some(Input::File(file.clone())),
            (None, None) => None,
        }
    }
}
