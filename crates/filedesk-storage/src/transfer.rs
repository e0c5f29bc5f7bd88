//! Streamed local file transfers for uploads and downloads.

use std::path::Path;

use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::types::ByteStream;

/// Open a local file as a chunked byte stream, returning it with the file's
/// length.
pub async fn read_stream(path: &Path) -> AppResult<(ReaderStream<fs::File>, u64)> {
    let file = fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::not_found(format!("File not found: {}", path.display()))
        } else {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to open file: {}", path.display()),
                e,
            )
        }
    })?;

    let len = file
        .metadata()
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read metadata: {}", path.display()),
                e,
            )
        })?
        .len();

    Ok((ReaderStream::new(file), len))
}

/// Drain `stream` into a new file at `path`, creating parent directories.
///
/// The data is written to `<path>.part` and renamed into place once the
/// stream ends, so an interrupted download never leaves a truncated file
/// under the final name.
pub async fn write_stream_to_path(path: &Path, mut stream: ByteStream) -> AppResult<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let mut part_name = path.as_os_str().to_os_string();
    part_name.push(".part");
    let part_path = std::path::PathBuf::from(part_name);

    let mut file = fs::File::create(&part_path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create file: {}", part_path.display()),
            e,
        )
    })?;

    let mut total_bytes = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&part_path).await;
                return Err(AppError::with_source(
                    ErrorKind::ExternalService,
                    "Download interrupted",
                    e,
                ));
            }
        };
        total_bytes += chunk.len() as u64;
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to write chunk", e))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush file", e))?;
    drop(file);

    fs::rename(&part_path, path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to move download into place: {}", path.display()),
            e,
        )
    })?;

    debug!(path = %path.display(), bytes = total_bytes, "Wrote file from stream");
    Ok(total_bytes)
}
