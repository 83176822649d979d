//! Meeting hours CLI library.
//!
//! This crate provides the CLI interface on top of `mh-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, FeedArgs};
pub use config::{Config, dirs_config_path};
