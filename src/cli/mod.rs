//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod entity_cmd;
pub mod helpers;
pub mod output;
pub mod prompt;
pub mod session;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use entity_cmd::EntityCommands;
pub use session::{PanelResult, PanelSession};
