use game_types::FieldError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(#[from] FieldError),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    Database,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(FieldError::InvalidArgument { .. }) => ErrorKind::InvalidArgument,
            ApiError::Validation(FieldError::OutOfRange { .. }) => ErrorKind::OutOfRange,
            ApiError::Database(_) => ErrorKind::Database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let invalid: ApiError = FieldError::invalid("gameAPI", "not hex").into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidArgument);
        assert_eq!(invalid.to_string(), "invalid request: gameAPI: not hex");

        let range: ApiError = FieldError::out_of_range("latitude", "91").into();
        assert_eq!(range.kind(), ErrorKind::OutOfRange);

        let db: ApiError = DbErr::Custom("gone".to_string()).into();
        assert_eq!(db.kind(), ErrorKind::Database);
    }
}
