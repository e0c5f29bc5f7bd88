//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::FolderId;
use filedesk_entity::folder::{Folder, FolderTree};
use filedesk_service::DriveContext;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List every folder
    List,
    /// Show the folder tree
    Tree,
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<FolderId>,
    },
    /// Delete a folder
    Delete {
        /// Folder ID
        id: FolderId,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct FolderRow {
    /// Folder ID
    id: i64,
    /// Name
    name: String,
    /// Parent folder
    parent: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.get(),
            name: folder.name.clone(),
            parent: folder
                .parent_folder
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    ctx: &DriveContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        FolderCommand::List => {
            ctx.listing.refresh_folders().await?;
            let rows: Vec<FolderRow> = ctx.listing.folders().await.iter().map(FolderRow::from).collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Tree => {
            ctx.listing.refresh_folders().await?;
            let tree = ctx.listing.folder_tree().await;
            match format {
                OutputFormat::Json => output::print_item(&tree, format),
                OutputFormat::Table => print!("{}", render_tree(&tree)),
            }
        }
        FolderCommand::Create { name, parent } => {
            super::enter_folder(ctx, *parent).await?;
            let folder = ctx.listing.create_folder(name).await?;
            match format {
                OutputFormat::Json => output::print_item(&folder, format),
                OutputFormat::Table => output::print_success(&format!(
                    "Folder '{}' created (id: {})",
                    folder.name, folder.id
                )),
            }
        }
        FolderCommand::Delete { id } => {
            ctx.listing.delete_folder(*id).await?;
            output::print_success(&format!("Folder {} deleted", id));
        }
    }

    Ok(())
}

/// Render a folder tree with box-drawing branches under a `/` root line.
pub(crate) fn render_tree(tree: &FolderTree) -> String {
    let mut out = String::from("/\n");
    for node in tree.walk() {
        let indent = "  ".repeat(node.depth + 1);
        out.push_str(&format!("{}├── {}/ ({})\n", indent, node.name, node.id));
    }
    out
}
