//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL), the default dump format
//! - N-Triples (NT)
//! - JSON-LD (expanded form, write only)
//!
//! Each format owns its writer function; there is no runtime registry.

mod jsonld;
mod turtle;

pub use jsonld::JsonLdSerializerWrapper;
pub use turtle::{NTriplesSerializerWrapper, TurtleParserWrapper, TurtleSerializerWrapper};

use super::{RdfStore, Triple};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// Writer function attached to a format
pub type WriteFn = fn(&RdfStore, &mut dyn Write) -> SerializeResult<()>;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    #[default]
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// JSON-LD format (.jsonld)
    JsonLd,
}

impl RdfFormat {
    /// The writer that produces this format
    pub fn writer(self) -> WriteFn {
        match self {
            RdfFormat::Turtle => TurtleSerializerWrapper::write_store,
            RdfFormat::NTriples => NTriplesSerializerWrapper::write_store,
            RdfFormat::JsonLd => JsonLdSerializerWrapper::write_store,
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
            RdfFormat::JsonLd => "jsonld",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "ntriples",
            RdfFormat::JsonLd => "jsonld",
        };
        f.write_str(name)
    }
}

impl FromStr for RdfFormat {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            "jsonld" | "json-ld" => Ok(RdfFormat::JsonLd),
            other => Err(SerializeError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(RdfFormat),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Format name not recognised
    #[error("Unknown format: {0} (expected turtle, ntriples or jsonld)")]
    UnknownFormat(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse_turtle(input),
            RdfFormat::NTriples => TurtleParserWrapper::parse_ntriples(input),
            RdfFormat::JsonLd => Err(ParseError::UnsupportedFormat(format)),
        }
    }

    /// Parse a document into a fresh store
    pub fn parse_store(input: &str, format: RdfFormat) -> ParseResult<RdfStore> {
        Ok(RdfStore::from_triples(Self::parse(input, format)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!("turtle".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("TTL".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("nt".parse::<RdfFormat>().unwrap(), RdfFormat::NTriples);
        assert_eq!("json-ld".parse::<RdfFormat>().unwrap(), RdfFormat::JsonLd);
        assert!("rdfxml".parse::<RdfFormat>().is_err());
        assert_eq!(RdfFormat::default(), RdfFormat::Turtle);
        assert_eq!(RdfFormat::NTriples.to_string(), "ntriples");
    }

    #[test]
    fn test_jsonld_parse_unsupported() {
        assert!(matches!(
            RdfParser::parse("{}", RdfFormat::JsonLd),
            Err(ParseError::UnsupportedFormat(RdfFormat::JsonLd))
        ));
    }
}
