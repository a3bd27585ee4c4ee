use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid row number provided to update_cell_value: {0}")]
    InvalidRow(i64),
    #[error("Invalid column number provided to update_cell_value: {0}")]
    InvalidColumn(i64),
}

pub type DomainResult<T> = Result<T, DomainError>;
