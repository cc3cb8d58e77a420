pub mod cli;
pub mod config;

pub use cli::{Cli, Command};
pub use config::{Environment, Settings};
