//! Command-line interface module.

mod args;
pub mod fonts;
pub mod generate;
pub mod init;
pub mod render;

pub use args::{Cli, Commands, GenerateArgs, RenderArgs};
