//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod file;
pub mod folder;
pub mod preview;
pub mod shell;
pub mod upload;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use filedesk_core::config::AppConfig;
use filedesk_core::error::AppError;
use filedesk_core::types::FolderId;
use filedesk_entity::folder::Folder;
use filedesk_service::DriveContext;

/// FileDesk: browse, upload and preview files on a remote drive
#[derive(Debug, Parser)]
#[command(name = "filedesk", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/{env}.toml`)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login(auth::LoginArgs),
    /// Create an account, then log in
    Signup(auth::SignupArgs),
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// Upload files or a directory
    Upload(upload::UploadArgs),
    /// Preview a file
    Preview(preview::PreviewArgs),
    /// Configuration
    Config(config::ConfigArgs),
    /// Interactive shell
    Shell,
}

impl Cli {
    /// Environment overlay to load: `--env`, else `FILEDESK_ENV`, else
    /// `development`.
    pub fn environment(&self) -> String {
        self.env
            .clone()
            .or_else(|| std::env::var("FILEDESK_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, self.format);
        }

        let ctx = DriveContext::connect(config).await?;
        self.dispatch(&ctx).await
    }

    /// Execute the command against an already connected context.
    pub async fn dispatch(&self, ctx: &DriveContext) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, ctx, self.format).await,
            Commands::Signup(args) => auth::signup(args, ctx, self.format).await,
            Commands::Logout => auth::logout(ctx).await,
            Commands::Whoami => auth::whoami(ctx, self.format).await,
            Commands::Folder(args) => folder::execute(args, ctx, self.format).await,
            Commands::File(args) => file::execute(args, ctx, self.format).await,
            Commands::Upload(args) => upload::execute(args, ctx, self.format).await,
            Commands::Preview(args) => preview::execute(args, ctx, self.format).await,
            Commands::Config(args) => config::execute(args, &ctx.config, self.format),
            Commands::Shell => shell::run(ctx).await,
        }
    }
}

/// Helper: fetch the folder list and look one folder up by id
pub async fn load_folder(ctx: &DriveContext, id: FolderId) -> Result<Folder, AppError> {
    ctx.listing.refresh_folders().await?;
    ctx.listing
        .folders()
        .await
        .into_iter()
        .find(|f| f.id == id)
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", id)))
}

/// Helper: select `id` as the working folder, or root when `None`
pub async fn enter_folder(ctx: &DriveContext, id: Option<FolderId>) -> Result<(), AppError> {
    let folder = match id {
        Some(id) => Some(load_folder(ctx, id).await?),
        None => None,
    };
    ctx.scope.select(folder);
    Ok(())
}

/// Helper: map a `dialoguer` failure into an application error
pub(crate) fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {}", e))
}
