//! Command-line interface module.

mod args;
pub mod dupes;
pub mod paths;
pub mod serve;
pub mod suggest;

pub use args::{Cli, Commands, DupesArgs, PathsArgs, SuggestArgs};
