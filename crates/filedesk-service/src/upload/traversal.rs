//! Iterative directory enumeration for directory uploads.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_entity::upload::LocalFile;

/// Limits applied while walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest directory level entered below the root.
    pub max_depth: usize,
    /// Whether symbolic links are followed; otherwise they are skipped.
    pub follow_symlinks: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: 64,
            follow_symlinks: false,
        }
    }
}

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Directories read, the root included.
    pub directories: usize,
    /// Files yielded.
    pub files: usize,
    /// Deepest level reached (root is 0).
    pub max_depth: usize,
    /// Entries skipped (symlinks, special files).
    pub skipped: usize,
}

/// Lazily yields every file below a root directory.
///
/// Each directory is read exactly once. Entries are sorted by name; a
/// directory's files come before the contents of its subdirectories. An
/// empty directory contributes nothing. After the first error the walker
/// is exhausted.
#[derive(Debug)]
pub struct DirectoryWalker {
    options: WalkOptions,
    stack: Vec<(PathBuf, usize)>,
    pending: VecDeque<LocalFile>,
    stats: TraversalStats,
}

impl DirectoryWalker {
    /// Prepare a walk of `root`; nothing is read until iteration starts.
    pub fn new(root: impl Into<PathBuf>, options: WalkOptions) -> Self {
        Self {
            options,
            stack: vec![(root.into(), 0)],
            pending: VecDeque::new(),
            stats: TraversalStats::default(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    fn read_directory(&mut self, dir: &Path, depth: usize) -> AppResult<()> {
        let entries = fs::read_dir(dir).map_err(|e| io_error("Failed to read directory", dir, e))?;
        self.stats.directories += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let mut entries = entries
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io_error("Failed to read directory", dir, e))?;
        entries.sort_by_key(|e| e.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| io_error("Failed to inspect", &path, e))?;

            let (is_dir, is_file) = if file_type.is_symlink() {
                if !self.options.follow_symlinks {
                    debug!(path = %path.display(), "Skipping symlink");
                    self.stats.skipped += 1;
                    continue;
                }
                let meta = fs::metadata(&path).map_err(|e| io_error("Failed to inspect", &path, e))?;
                (meta.is_dir(), meta.is_file())
            } else {
                (file_type.is_dir(), file_type.is_file())
            };

            if is_dir {
                if depth + 1 > self.options.max_depth {
                    return Err(AppError::upload(format!(
                        "Directory nesting exceeds the maximum depth of {} at {}",
                        self.options.max_depth,
                        path.display()
                    )));
                }
                subdirs.push(path);
            } else if is_file {
                self.pending.push_back(describe_file(&path)?);
            } else {
                self.stats.skipped += 1;
            }
        }

        // Reversed so the stack pops them in name order.
        for sub in subdirs.into_iter().rev() {
            self.stack.push((sub, depth + 1));
        }
        Ok(())
    }
}

impl Iterator for DirectoryWalker {
    type Item = AppResult<LocalFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.pending.pop_front() {
                self.stats.files += 1;
                return Some(Ok(file));
            }

            let (dir, depth) = self.stack.pop()?;
            if let Err(e) = self.read_directory(&dir, depth) {
                self.stack.clear();
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

/// Describe one local file: name, size and a MIME type guessed from its
/// extension (`None` when the extension is unknown).
pub fn describe_file(path: &Path) -> AppResult<LocalFile> {
    let meta = fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::not_found(format!("File not found: {}", path.display()))
        } else {
            io_error("Failed to inspect", path, e)
        }
    })?;

    Ok(LocalFile {
        path: path.to_path_buf(),
        name: LocalFile::name_of(path),
        size: meta.len(),
        mime_type: mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string()),
    })
}

fn io_error(what: &str, path: &Path, e: std::io::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Storage,
        format!("{what}: {}", path.display()),
        e,
    )
}
