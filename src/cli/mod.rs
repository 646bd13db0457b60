//! Command-line interface module.

mod args;
mod batch;
pub mod check;
pub mod fix;
mod scan;

pub use args::{CheckArgs, Cli, Commands, FixArgs, ScanArgs};
