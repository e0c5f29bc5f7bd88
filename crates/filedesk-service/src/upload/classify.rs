//! Turn a raw selection into an upload batch.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use filedesk_entity::upload::{DroppedItem, LocalFile, UploadBatch, UploadSource};

/// Decide whether a selection is a directory upload or a set of files.
///
/// The first directory wins: the batch is named after it and any loose
/// files selected next to it are discarded.
pub fn classify(source: UploadSource) -> UploadBatch {
    match source {
        UploadSource::Dropped(items) => classify_dropped(items),
        UploadSource::Picked(files) => {
            let Some(name) = files
                .iter()
                .find_map(|f| f.top_level_dir())
                .map(str::to_string)
            else {
                return UploadBatch::Files(files.into_iter().map(|f| f.file).collect());
            };

            let total = files.len();
            let kept: Vec<LocalFile> = files
                .into_iter()
                .filter(|f| f.top_level_dir() == Some(name.as_str()))
                .map(|f| f.file)
                .collect();
            if kept.len() < total {
                warn!(
                    directory = %name,
                    discarded = total - kept.len(),
                    "Selection mixes a directory with other items; only the directory is uploaded"
                );
            }
            UploadBatch::Directory { name, files: kept }
        }
    }
}

fn classify_dropped(items: Vec<DroppedItem>) -> UploadBatch {
    let directory = items.iter().find_map(|item| match item {
        DroppedItem::Directory(path) => Some(path.clone()),
        DroppedItem::File(_) => None,
    });

    match directory {
        Some(root) => {
            if items.len() > 1 {
                warn!(
                    directory = %root.display(),
                    discarded = items.len() - 1,
                    "Selection mixes a directory with other items; only the directory is uploaded"
                );
            }
            UploadBatch::DroppedDirectory {
                name: directory_name(&root),
                root,
            }
        }
        None => UploadBatch::Files(
            items
                .into_iter()
                .filter_map(|item| match item {
                    DroppedItem::File(file) => Some(file),
                    DroppedItem::Directory(_) => None,
                })
                .collect(),
        ),
    }
}

/// Folder name for a dropped directory. Relative roots such as `.` or
/// `Reports/..` are resolved first so the name is the directory's own.
fn directory_name(root: &Path) -> String {
    let resolved = std::fs::canonicalize(root)
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf());

    let mut normal = PathBuf::new();
    for component in resolved.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }
    LocalFile::name_of(&normal)
}
