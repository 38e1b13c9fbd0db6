use super::DraftField;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Dispatch details errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{message}")]
    Validation { field: DraftField, message: String },
}

impl DispatchError {
    pub fn validation(field: DraftField, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> DraftField {
        match self {
            Self::Validation { field, .. } => *field,
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        let field = err.field();
        AppError::with_message(ErrorCode::DispatchDetailsInvalid, err.to_string())
            .with_detail("field", field.key())
    }
}
