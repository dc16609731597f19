//! JSON-LD format implementation (expanded form, write only)

use super::{SerializeError, SerializeResult};
use crate::rdf::{RdfObject, RdfStore, RdfSubject, Triple};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::io::Write;

/// JSON-LD serializer
pub struct JsonLdSerializerWrapper;

impl JsonLdSerializerWrapper {
    /// Write the store as an expanded JSON-LD document
    pub fn write_store(store: &RdfStore, writer: &mut dyn Write) -> SerializeResult<()> {
        let triples: Vec<Triple> = store.iter().cloned().collect();
        let document = Self::to_value(&triples);
        serde_json::to_writer_pretty(&mut *writer, &document)
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        writeln!(writer)?;
        Ok(())
    }


    fn to_value(triples: &[Triple]) -> Value {
        // Group by subject; BTreeMap keeps subjects and properties sorted
        let mut map: BTreeMap<String, BTreeMap<String, Vec<Value>>> = BTreeMap::new();

        for triple in triples {
            let s_key = match &triple.subject {
                RdfSubject::NamedNode(n) => n.as_str().to_string(),
                RdfSubject::BlankNode(b) => b.to_string(),
            };

            let o_val = match &triple.object {
                RdfObject::NamedNode(n) => json!({ "@id": n.as_str() }),
                RdfObject::BlankNode(b) => json!({ "@id": b.to_string() }),
                RdfObject::Literal(l) => {
                    if let Some(lang) = l.language() {
                        json!({ "@value": l.value(), "@language": lang })
                    } else if l.is_plain() {
                        json!({ "@value": l.value() })
                    } else {
                        json!({ "@value": l.value(), "@type": l.datatype_str() })
                    }
                }
            };

            map.entry(s_key)
                .or_default()
                .entry(triple.predicate.as_str().to_string())
                .or_default()
                .push(o_val);
        }

        let nodes = map
            .into_iter()
            .map(|(subject, props)| {
                let mut node = Map::new();
                node.insert("@id".to_string(), Value::String(subject));
                for (pred, mut objs) in props {
                    objs.sort_by_key(|v| v.to_string());
                    node.insert(pred, Value::Array(objs));
                }
                Value::Object(node)
            })
            .collect();

        Value::Array(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{rdf, scsv};
    use crate::rdf::{Literal, NamedNode};

    #[test]
    fn test_jsonld_serialization() {
        let row = NamedNode::new("http://example.org/potd#row:2").unwrap();
        let triples = vec![
            Triple::new(row.clone(), rdf::TYPE, scsv::ROW),
            Triple::new(
                NamedNode::new("http://example.org/potd#row:2,col:1").unwrap(),
                rdf::VALUE,
                Literal::new_simple_literal("Bread"),
            ),
        ];

        let store = RdfStore::from_triples(triples);
        let mut out = Vec::new();
        JsonLdSerializerWrapper::write_store(&store, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let nodes = parsed.as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["@id"], "http://example.org/potd#row:2");
        assert_eq!(
            nodes[0][rdf::TYPE.as_str()][0]["@id"],
            "http://purl.org/NET/schema-org-csv#Row"
        );
        assert_eq!(nodes[1][rdf::VALUE.as_str()][0]["@value"], "Bread");
    }
}
