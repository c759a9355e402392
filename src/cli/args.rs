//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::cli::commands::init::InitArgs;
use crate::cli::commands::profile::ProfileCommands;
use crate::cli::commands::schema::SchemaArgs;
use crate::cli::commands::validate::ValidateArgs;
use crate::cli::entity_cmd::EntityCommands;

#[derive(Parser, Debug)]
#[command(
    name = "mdk",
    version,
    about = "Master-data editor kit: item types, units of measure, ports and the company profile",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table for lists, summary for single records
    Auto,
    Yaml,
    Json,
    /// Record IDs only, one per line
    Id,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project in the current directory
    Init(InitArgs),

    /// Item types
    #[command(subcommand, visible_alias = "ity")]
    ItemType(EntityCommands),

    /// Units of measure
    #[command(subcommand)]
    Uom(EntityCommands),

    /// Ports of discharge
    #[command(subcommand, visible_alias = "pod")]
    Port(EntityCommands),

    /// Company profile and logo
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Check record files against their schemas and field rules
    Validate(ValidateArgs),

    /// Describe the fields and rules of an entity type
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
