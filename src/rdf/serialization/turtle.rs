//! Turtle and N-Triples support via rio

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::{
    BlankNode, Literal, NamedNode, NamespaceManager, RdfObject, RdfPredicate, RdfStore, RdfSubject,
    Triple,
};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleParser};
use std::io::{BufReader, Cursor, Write};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle document
    pub fn parse_turtle(input: &str) -> ParseResult<Vec<Triple>> {
        let reader = BufReader::new(Cursor::new(input));
        collect_triples(TurtleParser::new(reader, None))
    }

    /// Parse an N-Triples document
    pub fn parse_ntriples(input: &str) -> ParseResult<Vec<Triple>> {
        let reader = BufReader::new(Cursor::new(input));
        collect_triples(NTriplesParser::new(reader))
    }
}

fn collect_triples<P>(mut parser: P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut triples = Vec::new();

    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        let subject = convert_subject(t.subject).map_err(invalid_data)?;
        let predicate = convert_predicate(t.predicate).map_err(invalid_data)?;
        let object = convert_object(t.object).map_err(invalid_data)?;

        triples.push(Triple::new(subject, predicate, object));
        Ok(())
    });

    res.map(|_| triples).map_err(|e| ParseError::Parse(e.to_string()))
}

fn invalid_data(e: ParseError) -> TurtleError {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()).into()
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Write the store as Turtle: `@prefix` lines for every bound prefix,
    /// then statements in sorted order, grouped by subject.
    ///
    /// IRIs are written as prefixed names where a bound namespace covers them
    /// and the local part is a bare Turtle name; everything else stays `<iri>`.
    pub fn write_store(store: &RdfStore, writer: &mut dyn Write) -> SerializeResult<()> {
        let namespaces = store.namespaces();
        for ns in store.prefixes() {
            writeln!(writer, "@prefix {}: <{}> .", ns.prefix, ns.iri)?;
        }
        if !namespaces.is_empty() {
            writeln!(writer)?;
        }

        let mut current: Option<&RdfSubject> = None;
        for triple in store.sorted_triples() {
            let predicate = turtle_iri(namespaces, triple.predicate.as_str());
            let object = turtle_object(namespaces, &triple.object);
            if current == Some(&triple.subject) {
                write!(writer, " ;\n    {} {}", predicate, object)?;
            } else {
                if current.is_some() {
                    writeln!(writer, " .")?;
                }
                let subject = turtle_subject(namespaces, &triple.subject);
                write!(writer, "{} {} {}", subject, predicate, object)?;
                current = Some(&triple.subject);
            }
        }
        if current.is_some() {
            writeln!(writer, " .")?;
        }
        Ok(())
    }
}

fn turtle_iri(namespaces: &NamespaceManager, iri: &str) -> String {
    namespaces
        .compact(iri)
        .unwrap_or_else(|| model::NamedNode { iri }.to_string())
}

fn turtle_subject(namespaces: &NamespaceManager, subject: &RdfSubject) -> String {
    match subject {
        RdfSubject::NamedNode(n) => turtle_iri(namespaces, n.as_str()),
        RdfSubject::BlankNode(b) => model::BlankNode { id: b.as_str() }.to_string(),
    }
}

fn turtle_object(namespaces: &NamespaceManager, object: &RdfObject) -> String {
    match object {
        RdfObject::NamedNode(n) => turtle_iri(namespaces, n.as_str()),
        RdfObject::BlankNode(b) => model::BlankNode { id: b.as_str() }.to_string(),
        // rio's Display escapes the lexical form; only the datatype is compacted
        RdfObject::Literal(l) => match to_rio_literal(l) {
            model::Literal::Typed { value, datatype } => format!(
                "{}^^{}",
                model::Literal::Simple { value },
                turtle_iri(namespaces, datatype.iri)
            ),
            other => other.to_string(),
        },
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// Write the store as N-Triples; prefixes are not part of the format
    pub fn write_store(store: &RdfStore, writer: &mut dyn Write) -> SerializeResult<()> {
        let mut formatter = NTriplesFormatter::new(&mut *writer);
        for triple in store.sorted_triples() {
            formatter
                .format(&to_rio_triple(triple))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }
        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        Ok(())
    }
}

fn to_rio_triple(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(to_rio_literal(l)),
    };

    model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}

fn to_rio_literal(l: &Literal) -> model::Literal<'_> {
    if let Some(language) = l.language() {
        model::Literal::LanguageTaggedString {
            value: l.value(),
            language,
        }
    } else if l.is_plain() {
        model::Literal::Simple { value: l.value() }
    } else {
        model::Literal::Typed {
            value: l.value(),
            datatype: model::NamedNode {
                iri: l.datatype_str(),
            },
        }
    }
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::Literal(l) => match l {
            model::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            model::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            )),
            model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri)
                    .map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{dc, xsd};

    fn sample_store() -> RdfStore {
        let mut store = RdfStore::new();
        store.bind_prefix("dc", "http://purl.org/dc/terms/");
        let cell = NamedNode::new("http://example.org/potd#row:1,col:1").unwrap();
        store.insert(Triple::new(cell.clone(), dc::TITLE, Literal::new_simple_literal("name")));
        let data = NamedNode::new("http://example.org/potd#row:2,col:2").unwrap();
        store.insert(Triple::new(
            data,
            RdfPredicate::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#value").unwrap(),
            Literal::new_typed_literal("3.50", xsd::DECIMAL.into()),
        ));
        store
    }

    #[test]
    fn test_turtle_parse() {
        let input = r#"<http://example.org/a> <http://example.org/b> "c" ."#;
        let triples = TurtleParserWrapper::parse_turtle(input).unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].subject.to_string(), "<http://example.org/a>");
    }

    #[test]
    fn test_store_turtle_has_prefix_header() {
        let store = sample_store();
        let mut out = Vec::new();
        TurtleSerializerWrapper::write_store(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("@prefix dc: <http://purl.org/dc/terms/> ."));
        assert!(text.contains("<http://example.org/potd#row:1,col:1> dc:title \"name\" ."));
        // rdf is not bound here, so its IRIs stay in full
        assert!(text.contains("<http://www.w3.org/1999/02/22-rdf-syntax-ns#value>"));

        let reparsed = RdfStore::from_triples(TurtleParserWrapper::parse_turtle(&text).unwrap());
        assert_eq!(reparsed.len(), store.len());
        for triple in store.iter() {
            assert!(reparsed.contains(triple), "missing {}", triple);
        }
    }

    #[test]
    fn test_store_turtle_compacts_datatypes_and_escapes_literals() {
        let mut store = sample_store();
        store.bind_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        let subject = NamedNode::new("http://example.org/potd#row:3,col:1").unwrap();
        store.insert(Triple::new(
            subject,
            dc::TITLE,
            Literal::new_simple_literal("say \"hi\"\nthere"),
        ));

        let mut out = Vec::new();
        TurtleSerializerWrapper::write_store(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"3.50\"^^xsd:decimal"));
        assert!(text.contains(r#""say \"hi\"\nthere""#));

        let reparsed = RdfStore::from_triples(TurtleParserWrapper::parse_turtle(&text).unwrap());
        for triple in store.iter() {
            assert!(reparsed.contains(triple), "missing {}", triple);
        }
    }

    #[test]
    fn test_store_turtle_groups_statements_by_subject() {
        let mut store = RdfStore::new();
        let cell = NamedNode::new("http://example.org/potd#row:1,col:1").unwrap();
        store.insert(Triple::new(cell.clone(), dc::TITLE, Literal::new_simple_literal("a")));
        store.insert(Triple::new(cell, dc::TITLE, Literal::new_simple_literal("b")));

        let mut out = Vec::new();
        TurtleSerializerWrapper::write_store(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("<http://example.org/potd#row:1,col:1>").count(), 1);
        assert_eq!(text.matches(" ;\n").count(), 1);
        assert_eq!(TurtleParserWrapper::parse_turtle(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_ntriples_preserves_typed_literals() {
        let store = sample_store();
        let mut out = Vec::new();
        NTriplesSerializerWrapper::write_store(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);

        let reparsed = RdfStore::from_triples(TurtleParserWrapper::parse_ntriples(&text).unwrap());
        for triple in store.iter() {
            assert!(reparsed.contains(triple), "missing {}", triple);
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(TurtleParserWrapper::parse_turtle("<http://example.org/a> <b").is_err());
    }
}
