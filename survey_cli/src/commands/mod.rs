//! CLI subcommand implementations.

pub mod account;
pub mod cache;
pub mod counts;
pub mod submissions;
pub mod submit;
pub mod tokens;
