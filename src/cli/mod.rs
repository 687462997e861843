//! CLI module - argument parsing and subcommands

mod args;
pub mod evaluate;

pub use args::{Cli, Commands};
pub use evaluate::*;
