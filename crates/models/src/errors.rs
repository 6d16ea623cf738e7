use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate tax id: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Map a SeaORM error, classifying unique violations on `tax_id`.
    pub fn from_db(err: sea_orm::DbErr, tax_id: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate(tax_id.to_string()),
            _ => Self::Db(err.to_string()),
        }
    }
}
