//! Upload CLI command.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::commands::file::FileRow;
use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::FolderId;
use filedesk_entity::upload::{DroppedItem, UploadReport, UploadSource};
use filedesk_service::DriveContext;
use filedesk_service::upload::describe_file;

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Files or one directory to upload
    pub paths: Vec<PathBuf>,
    /// Target folder ID (root when omitted)
    #[arg(short, long)]
    pub folder: Option<FolderId>,
}

/// Execute `upload`
pub async fn execute(
    args: &UploadArgs,
    ctx: &DriveContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::enter_folder(ctx, args.folder).await?;
    let report = upload_paths(ctx, &args.paths).await?;
    print_report(&report, format);
    Ok(())
}

/// Upload local paths into the current scope, as if they were dropped.
pub(crate) async fn upload_paths(
    ctx: &DriveContext,
    paths: &[PathBuf],
) -> Result<UploadReport, AppError> {
    let items = paths
        .iter()
        .map(|p| dropped_item(p))
        .collect::<Result<Vec<_>, _>>()?;
    ctx.uploads.upload(UploadSource::Dropped(items)).await
}

fn dropped_item(path: &Path) -> Result<DroppedItem, AppError> {
    if path.is_dir() {
        Ok(DroppedItem::Directory(path.to_path_buf()))
    } else {
        describe_file(path).map(DroppedItem::File)
    }
}

/// Print what an upload batch did
pub(crate) fn print_report(report: &UploadReport, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_item(report, format);
        return;
    }

    if let Some(folder) = &report.folder {
        output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
    }
    if !report.uploaded.is_empty() {
        let rows: Vec<FileRow> = report.uploaded.iter().map(FileRow::from).collect();
        output::print_list(&rows, format);
    }
    for failure in &report.failed {
        output::print_warning(&format!("{}: {}", failure.name, failure.error));
    }

    let summary = format!(
        "{} of {} file(s) uploaded",
        report.uploaded.len(),
        report.attempted()
    );
    if report.is_complete_success() {
        output::print_success(&summary);
    } else {
        output::print_warning(&summary);
    }
}
