use thiserror::Error;

use crate::utils::jwt::TokenError;

/// Errors returned by a [`UserService`](crate::services::UserService) implementation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No record matches the lookup
    #[error("{entity} not found with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// A unique field is already taken
    #[error("{entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Unknown username or wrong password
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Token issuance failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(entity: &str, field: &str, value: &str) -> Self {
        ServiceError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn duplicate(entity: &str, field: &str, value: &str) -> Self {
        ServiceError::Duplicate {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
