use thiserror::Error;
use tonic::Status;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Database(e) => Status::internal(format!("Database error: {}", e)),
            AppError::NotFound(msg) => Status::not_found(msg),
            AppError::InvalidInput(msg) => Status::invalid_argument(msg),
            AppError::Unauthenticated => Status::unauthenticated("Authentication required"),
            AppError::PermissionDenied(msg) => Status::permission_denied(msg),
            AppError::Storage(msg) => Status::internal(format!("Storage error: {}", msg)),
            AppError::Internal(msg) => Status::internal(msg),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn status_codes_match_error_kind() {
        let status: Status = AppError::NotFound("listing abc".to_string()).into();
        assert_eq!(status.code(), Code::NotFound);

        let status: Status = AppError::InvalidInput("title too short".to_string()).into();
        assert_eq!(status.code(), Code::InvalidArgument);

        let status: Status = AppError::Unauthenticated.into();
        assert_eq!(status.code(), Code::Unauthenticated);

        let status: Status = AppError::PermissionDenied("admins only".to_string()).into();
        assert_eq!(status.code(), Code::PermissionDenied);

        let status: Status = AppError::Storage("upload failed".to_string()).into();
        assert_eq!(status.code(), Code::Internal);
    }
}
