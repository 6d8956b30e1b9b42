//! Shared error types for the batch solving system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Unknown solver: {name}")]
    UnknownSolver { name: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
