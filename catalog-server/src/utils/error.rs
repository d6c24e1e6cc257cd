//! 统一错误处理
//!
//! Re-exports the unified error system from `shared::error` and bridges the
//! repository layer into it.
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::new(ErrorCode::CategoryNotFound))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code, msg) => AppError::with_message(code, msg),
            RepoError::Duplicate(code, msg) => AppError::conflict(code, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}
