use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Mock datasets from Swagger/OpenAPI documents, served from a JSON document store
#[derive(Parser, Debug, Clone)]
#[command(name = "apimock", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        env = "APIMOCK_CONFIG",
        default_value = "apimock.toml",
        global = true
    )]
    pub config: PathBuf,

    /// Dataset file to read and write (overrides store.path)
    #[arg(long, env = "APIMOCK_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a dataset from every API document in the spec directory
    Generate(GenerateArgs),
    /// Print the value at PATH
    Get { path: String },
    /// Append JSON to the collection at PATH
    Create { path: String, data: String },
    /// Replace the record at PATH (collection/identifier)
    Update { path: String, data: String },
    /// Merge JSON into the record at PATH (collection/identifier)
    Patch { path: String, data: String },
    /// Remove the record at PATH (collection/identifier)
    Delete { path: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Directory containing the API documents (overrides specs.dir)
    #[arg(long)]
    pub specs: Option<PathBuf>,

    /// RNG seed for a reproducible dataset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Records to generate per resource
    #[arg(long)]
    pub count: Option<usize>,

    /// Nesting depth past which objects and arrays are left empty
    #[arg(long)]
    pub max_depth: Option<usize>,
}
