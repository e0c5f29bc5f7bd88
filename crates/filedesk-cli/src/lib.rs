//! # filedesk-cli
//!
//! Command-line front end for FileDesk: one-shot commands plus an
//! interactive shell that keeps a folder scope between commands.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::OutputFormat;
