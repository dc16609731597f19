//! RDF support for the table publisher
//!
//! This module implements the statement layer the rest of the pipeline sits on:
//! - RDF triples (subject-predicate-object) over oxrdf primitives
//! - An in-memory, single default graph triple store with index lookups
//! - Namespace prefixes for readable dumps
//! - Serialization to Turtle, N-Triples and JSON-LD
//! - The `scsv` table vocabulary
//!
//! # Example
//!
//! ```rust
//! use instata::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://example.org/potd#row:1,col:1").unwrap();
//! let predicate = RdfPredicate::new("http://purl.org/dc/terms/title").unwrap();
//! let object = Literal::new_simple_literal("name");
//!
//! assert!(store.insert(Triple::new(subject.clone(), predicate.clone(), object)));
//!
//! let titles: Vec<_> = store.objects(&subject.into(), &predicate).collect();
//! assert_eq!(titles.len(), 1);
//! ```

mod namespace;
mod serialization;
mod store;
mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use store::RdfStore;

pub use namespace::{Namespace, NamespaceManager};

pub use serialization::{
    JsonLdSerializerWrapper, NTriplesSerializerWrapper, ParseError, ParseResult, RdfFormat,
    RdfParser, SerializeError, SerializeResult, TurtleParserWrapper, TurtleSerializerWrapper,
    WriteFn,
};

/// A store with the default `schema`/`scsv`/`dc`/`rdf`/`xsd` prefixes bound
pub fn store_with_default_prefixes() -> RdfStore {
    let mut store = RdfStore::new();
    for (prefix, iri) in vocab::DEFAULT_PREFIXES {
        store.bind_prefix(prefix, iri);
    }
    store
}
