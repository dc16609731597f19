//! Tabular input: fetching CSV sources and mapping them into the table vocabulary

mod mapper;
mod raw;
mod source;

pub use mapper::{MappingConfig, MappingError, MappingResult, TableMapper, TableStats};
pub use raw::RawTable;
pub use source::{FetchError, FetchResult, SourceLocation};
