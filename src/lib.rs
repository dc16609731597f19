//! Instata: tables published through RDF
//!
//! A CSV table is mapped into a small graph under the `scsv` table vocabulary,
//! queried back with one fixed graph pattern, and the recovered header and
//! body are rendered as an HTML page or dumped as Turtle, N-Triples or JSON-LD.
//!
//! # Pipeline
//!
//! - [`tabular`]: fetching the source and mapping rows/cells into statements
//! - [`rdf`]: in-memory triple store, namespaces and serializers
//! - [`sparql`]: the table pattern query with its two optional clauses
//! - [`reconstruct`]: header/body recovery from sorted query results
//! - [`render`]: HTML output and the bundled stylesheet
//! - [`publisher`]: the sequential publish and dump pipelines
//!
//! ## Example Usage
//!
//! ```rust
//! use instata::rdf::RdfStore;
//! use instata::reconstruct::{BodyShape, TableBody, TableMetadata, TableReconstructor};
//! use instata::sparql::TablePatternQuery;
//! use instata::tabular::{RawTable, TableMapper};
//!
//! let table: RawTable = vec![
//!     vec!["name", "price"],
//!     vec!["Bread", "3.50"],
//!     vec!["Cake", "5.00"],
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut store = RdfStore::new();
//! TableMapper::with_base("http://example.org/instata/potd_0")
//!     .unwrap()
//!     .map(&table, &mut store)
//!     .unwrap();
//!
//! let tuples = TablePatternQuery::new().execute(&store).unwrap();
//! let rebuilt = TableReconstructor::new(BodyShape::Grouped)
//!     .reconstruct(&tuples, TableMetadata::now("potd_0"));
//!
//! assert_eq!(rebuilt.header, vec!["name", "price"]);
//! assert_eq!(rebuilt.body.rows(2)[1][0].as_deref(), Some("Cake"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod publisher;
pub mod rdf;
pub mod reconstruct;
pub mod render;
pub mod sparql;
pub mod tabular;

// Re-export main types for convenience
pub use config::PublisherConfig;
pub use error::{InstataError, InstataResult};
pub use publisher::Publisher;

pub use rdf::{
    Literal, NamedNode, RdfFormat, RdfObject, RdfPredicate, RdfStore, RdfSubject, Triple,
    TriplePattern,
};

pub use reconstruct::{BodyShape, ReconstructedTable, TableBody, TableMetadata, TableReconstructor};

pub use render::{HtmlRenderer, RenderError, Renderer};

pub use sparql::{CellPosition, CellValue, QueryError, QueryResultTuple, RowKind, TablePatternQuery};

pub use tabular::{FetchError, MappingConfig, MappingError, RawTable, SourceLocation, TableMapper};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
