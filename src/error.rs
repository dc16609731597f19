//! Crate-level error type

use crate::rdf::{ParseError, SerializeError};
use crate::render::RenderError;
use crate::sparql::QueryError;
use crate::tabular::{FetchError, MappingError};
use std::path::PathBuf;
use thiserror::Error;

/// Any failure that aborts a publish or dump run
#[derive(Error, Debug)]
pub enum InstataError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Config file unreadable or malformed
    #[error("Invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Source location has no usable base name
    #[error("Cannot derive a dataset name from {0}")]
    DatasetName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InstataResult<T> = Result<T, InstataError>;
