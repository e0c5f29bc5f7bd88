//! Configuration CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use filedesk_core::config::AppConfig;
use filedesk_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_item(config, format),
            OutputFormat::Table => {
                println!("[api]");
                output::print_kv("base_url", &config.api.base_url);
                output::print_kv("timeout_seconds", &config.api.timeout_seconds.to_string());
                output::print_kv("user_agent", &config.api.user_agent);
                println!("[session]");
                output::print_kv("state_dir", &config.session.state_dir);
                println!("[upload]");
                output::print_kv("unknown_mime_type", &config.upload.unknown_mime_type);
                output::print_kv("follow_symlinks", &config.upload.follow_symlinks.to_string());
                output::print_kv("max_depth", &config.upload.max_depth.to_string());
                println!("[preview]");
                output::print_kv("max_text_bytes", &config.preview.max_text_bytes.to_string());
                output::print_kv(
                    "max_archive_entries",
                    &config.preview.max_archive_entries.to_string(),
                );
                output::print_kv("max_pdf_pages", &config.preview.max_pdf_pages.to_string());
                output::print_kv("max_fetch_bytes", &config.preview.max_fetch_bytes.to_string());
                println!("[logging]");
                output::print_kv("level", &config.logging.level);
                output::print_kv("format", &config.logging.format);
            }
        },
    }

    Ok(())
}
