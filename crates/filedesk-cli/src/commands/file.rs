//! File management CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::file::FileRecord;
use filedesk_service::DriveContext;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files in a folder (root when omitted)
    List {
        /// Folder ID
        #[arg(short, long)]
        folder: Option<FolderId>,
    },
    /// Show one file's metadata
    Info {
        /// File ID
        id: FileId,
    },
    /// Delete a file
    Delete {
        /// File ID
        id: FileId,
    },
    /// Download a file
    Download {
        /// File ID
        id: FileId,
        /// Destination file or directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct FileRow {
    /// File ID
    id: i64,
    /// Kind derived from the MIME type
    kind: String,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Uploaded
    uploaded: String,
}

impl From<&FileRecord> for FileRow {
    fn from(file: &FileRecord) -> Self {
        Self {
            id: file.id.get(),
            kind: file.kind().label().to_string(),
            name: file.file_name.clone(),
            size: if file.file_size_human_readable.is_empty() {
                format!("{} bytes", file.file_size)
            } else {
                file.file_size_human_readable.clone()
            },
            uploaded: file.created_at_human_readable.clone(),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    ctx: &DriveContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        FileCommand::List { folder } => {
            super::enter_folder(ctx, *folder).await?;
            ctx.listing.refresh_files().await?;
            let rows: Vec<FileRow> = ctx.listing.files().await.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
        FileCommand::Info { id } => {
            let file = ctx.listing.file_info(*id).await?;
            output::print_item(&file, format);
        }
        FileCommand::Delete { id } => {
            ctx.listing.delete_file(*id).await?;
            output::print_success(&format!("File {} deleted", id));
        }
        FileCommand::Download { id, output: dest } => {
            let file = ctx.listing.file_info(*id).await?;
            let (path, bytes) = ctx.listing.download(&file, dest).await?;
            output::print_success(&format!(
                "Downloaded '{}' to {} ({} bytes)",
                file.file_name,
                path.display(),
                bytes
            ));
        }
    }

    Ok(())
}
