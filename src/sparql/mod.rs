//! Pattern query evaluation over the triple store
//!
//! Only one query shape is supported: the table pattern in [`TABLE_QUERY`].
//! There is no parser and no general algebra; the pattern is compiled in.
//!
//! # Example
//!
//! ```rust
//! use instata::rdf::RdfStore;
//! use instata::sparql::{RowKind, TablePatternQuery};
//! use instata::tabular::{RawTable, TableMapper};
//!
//! let table: RawTable = vec![vec!["name"], vec!["Bread"]].into_iter().collect();
//! let mut store = RdfStore::new();
//! TableMapper::with_base("http://example.org/potd").unwrap()
//!     .map(&table, &mut store)
//!     .unwrap();
//!
//! let results = TablePatternQuery::new().execute(&store).unwrap();
//! assert_eq!(results[0].row_type, RowKind::HeaderRow);
//! assert_eq!(results[1].val.text(), Some("Bread"));
//! ```

mod executor;
mod results;

pub use executor::{TablePatternQuery, TABLE_QUERY};
pub use results::{CellPosition, CellValue, QueryResultTuple, RowKind};

use thiserror::Error;

/// Query errors. Under a correct mapping none of these occur; they signal an
/// inconsistent graph.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A literal or blank node where an IRI is required, or a blank node
    /// where a value is expected
    #[error("Unexpected term: {0}")]
    UnexpectedTerm(String),

    /// Cell identifier does not end in `#row:i,col:j`
    #[error("Malformed cell identifier: {0}")]
    MalformedCellIdentifier(String),

    /// Row typed with something other than the header/data discriminators
    #[error("Unknown row type: {0}")]
    UnknownRowType(String),
}

pub type QueryResult<T> = Result<T, QueryError>;
