use serde::Serialize;
use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<FieldError>),
    #[error("Empresa com CNPJ {0} já está cadastrada.")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    #[error("repository error: {0}")]
    Repository(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(tax_id: &str) -> Self {
        Self::NotFound(format!("Empresa com CNPJ {tax_id} não encontrada."))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 2001,
            ServiceError::Conflict(_) => 2002,
            ServiceError::NotFound(_) => 2003,
            ServiceError::Model(_) => 2100,
            ServiceError::Repository(_) => 2200,
            ServiceError::Internal(_) => 2500,
        }
    }

    /// Input was rejected before or by the model layer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::Model(models::errors::ModelError::Validation(_))
        )
    }
}
