//! Statement terms
//!
//! Thin newtypes over oxrdf. Display output is the N-Triples form of each
//! term, which is also what [`RdfStore::sorted_triples`](super::RdfStore::sorted_triples)
//! orders by.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode, NamedNodeRef};
use std::fmt;
use thiserror::Error;

/// Term construction errors
#[derive(Error, Debug)]
pub enum RdfError {
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Malformed language tag
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Absolute IRI, validated on construction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    pub fn new(iri: impl Into<String>) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn inner(&self) -> &OxNamedNode {
        &self.0
    }
}

impl From<NamedNodeRef<'_>> for NamedNode {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into_owned())
    }
}

/// Blank node. Only parsed documents carry these; the mapper mints IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    pub fn new(id: impl Into<String>) -> RdfResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Literal with its lexical form kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Lexical form
    pub fn value(&self) -> &str {
        self.0.value()
    }

    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    pub fn datatype_str(&self) -> &str {
        self.0.datatype().as_str()
    }

    /// `xsd:string` without a language tag
    pub fn is_plain(&self) -> bool {
        self.language().is_none() && self.0.datatype() == oxrdf::vocab::xsd::STRING
    }
}

macro_rules! display_inner {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        })*
    };
}

display_inner!(NamedNode, BlankNode, Literal);

/// Subject position: IRI or blank node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => fmt::Display::fmt(n, f),
            RdfSubject::BlankNode(b) => fmt::Display::fmt(b, f),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

/// Predicate position: always an IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    pub fn new(iri: impl Into<String>) -> RdfResult<Self> {
        NamedNode::new(iri).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

impl From<NamedNodeRef<'_>> for RdfPredicate {
    fn from(node: NamedNodeRef<'_>) -> Self {
        RdfPredicate(node.into())
    }
}

/// Object position: IRI, blank node or literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl RdfObject {
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfObject::NamedNode(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => fmt::Display::fmt(n, f),
            RdfObject::BlankNode(b) => fmt::Display::fmt(b, f),
            RdfObject::Literal(l) => fmt::Display::fmt(l, f),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<NamedNodeRef<'_>> for RdfObject {
    fn from(node: NamedNodeRef<'_>) -> Self {
        RdfObject::NamedNode(node.into())
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

/// One statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: RdfSubject,
    pub predicate: RdfPredicate,
    pub object: RdfObject,
}

impl Triple {
    pub fn new(
        subject: impl Into<RdfSubject>,
        predicate: impl Into<RdfPredicate>,
        object: impl Into<RdfObject>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Statement template; `None` positions match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<RdfSubject>,
    pub predicate: Option<RdfPredicate>,
    pub object: Option<RdfObject>,
}

impl TriplePattern {
    pub fn new(
        subject: Option<RdfSubject>,
        predicate: Option<RdfPredicate>,
        object: Option<RdfObject>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == triple.subject)
            && self.predicate.as_ref().map_or(true, |p| *p == triple.predicate)
            && self.object.as_ref().map_or(true, |o| *o == triple.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://example.org/instata/potd_0#row:1").unwrap();
        assert_eq!(node.as_str(), "http://example.org/instata/potd_0#row:1");
        assert_eq!(node.to_string(), "<http://example.org/instata/potd_0#row:1>");
        assert!(matches!(NamedNode::new("not an iri"), Err(RdfError::InvalidIri(_))));
    }

    #[test]
    fn test_literal_kinds() {
        let plain = Literal::new_simple_literal("Bread");
        assert!(plain.is_plain());
        assert_eq!(plain.to_string(), "\"Bread\"");

        let tagged = Literal::new_language_tagged_literal("Brot", "de").unwrap();
        assert_eq!(tagged.language(), Some("de"));
        assert!(!tagged.is_plain());
        assert!(Literal::new_language_tagged_literal("Brot", "not a tag").is_err());

        let dt = NamedNode::new("http://www.w3.org/2001/XMLSchema#decimal").unwrap();
        let typed = Literal::new_typed_literal("3.50", dt);
        assert_eq!(typed.value(), "3.50");
        assert_eq!(typed.datatype_str(), "http://www.w3.org/2001/XMLSchema#decimal");
        assert!(!typed.is_plain());
    }

    #[test]
    fn test_triple_pattern_matching() {
        let subject = NamedNode::new("http://example.org/t#row:2,col:1").unwrap();
        let predicate = RdfPredicate::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#value").unwrap();
        let triple = Triple::new(
            subject.clone(),
            predicate.clone(),
            Literal::new_simple_literal("Bread"),
        );

        let pattern = TriplePattern::new(Some(subject.into()), None, None);
        assert!(pattern.matches(&triple));

        let other = NamedNode::new("http://example.org/t#row:3,col:1").unwrap();
        let pattern = TriplePattern::new(Some(other.into()), Some(predicate), None);
        assert!(!pattern.matches(&triple));

        assert!(TriplePattern::default().matches(&triple));
    }
}
