//! CLI argument definitions for the datanode binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect and edit JSON documents as path-addressed trees
#[derive(Parser, Debug)]
#[command(name = "datanode")]
#[command(about = "Datanode: read and write JSON documents by dotted path")]
#[command(version)]
pub struct Cli {
    /// JSON document to operate on. Created on the first write if missing.
    #[arg(short, long, default_value = "datanode.json", env = "DATANODE_FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a path. Exits with status 1 when absent.
    Get(PathArgs),
    /// Report whether a path resolves
    Has(PathArgs),
    /// List the entries of the root or of the node at a path
    Ls(LsArgs),
    /// Store a value at a path, creating intermediate nodes
    Put(PutArgs),
    /// Append values to the list at a path
    Append(ListArgs),
    /// Remove values from the list at a path
    Remove(ListArgs),
    /// Print the whole document
    Simplify,
    /// Blank every top-level entry and print what was cleared
    Clear,
}

/// A single dotted path
#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Dotted path, e.g. `user.profile.name`
    pub path: String,
}

#[derive(clap::Args, Debug)]
pub struct LsArgs {
    /// Node to list. Lists the root when omitted.
    pub path: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct PutArgs {
    /// Dotted path to write
    pub path: String,

    /// Value as JSON. Input that is not valid JSON is stored as text.
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Dotted path of the list
    pub path: String,

    /// Values as JSON. Input that is not valid JSON is taken as text.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Start a new list when nothing is stored at the path
    #[arg(short, long)]
    pub create: bool,
}
