//! CLI subcommand implementations.

pub mod candidates;
pub mod draft;
pub mod ignore;
pub mod status;
pub mod summary;
pub mod util;
