//! Result alias shared by every FileDesk crate.

use crate::error::AppError;

/// `Result` specialised to [`AppError`].
///
/// Client calls, session operations, uploads and previews all return this
/// so failures can be propagated with `?` up to a single boundary (a CLI
/// command or the upload orchestrator).
pub type AppResult<T> = Result<T, AppError>;
