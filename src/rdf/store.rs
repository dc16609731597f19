//! In-memory RDF triple store
//!
//! A single default graph with two hash indices:
//! - SPO index (Subject -> Predicate -> Objects)
//! - POS index (Predicate -> Object -> Subjects)
//!
//! The store is filled in one write phase and read afterwards, so there is no
//! removal path and no interior locking.

use super::namespace::{Namespace, NamespaceManager};
use super::serialization::{RdfFormat, SerializeResult};
use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::Write;

/// RDF triple store with subject- and predicate-keyed indices
#[derive(Debug, Clone, Default)]
pub struct RdfStore {
    /// All triples (primary storage)
    triples: FxHashSet<Triple>,

    /// SPO index: Subject -> Predicate -> Objects
    spo_index: FxHashMap<RdfSubject, FxHashMap<RdfPredicate, Vec<RdfObject>>>,

    /// POS index: Predicate -> Object -> Subjects
    pos_index: FxHashMap<RdfPredicate, FxHashMap<RdfObject, Vec<RdfSubject>>>,

    /// Prefix table used by serializers
    namespaces: NamespaceManager,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-materialized triples
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        store.extend(triples);
        store
    }

    /// Insert a triple. Returns `false` if the statement was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.triples.contains(&triple) {
            return false;
        }

        self.spo_index
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .push(triple.object.clone());

        self.pos_index
            .entry(triple.predicate.clone())
            .or_default()
            .entry(triple.object.clone())
            .or_default()
            .push(triple.subject.clone());

        self.triples.insert(triple);
        true
    }

    /// Insert every triple from an iterator
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        for triple in triples {
            self.insert(triple);
        }
    }

    /// Bind a namespace prefix for serialization
    pub fn bind_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.namespaces.add_prefix(prefix, iri);
    }

    /// Bound prefixes, in binding order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.namespaces.prefixes()
    }

    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Objects of all `(subject, predicate, ?o)` statements
    pub fn objects<'a>(
        &'a self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
    ) -> impl Iterator<Item = &'a RdfObject> + 'a {
        self.spo_index
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .into_iter()
            .flatten()
    }

    /// Subjects of all `(?s, predicate, object)` statements
    pub fn subjects<'a>(
        &'a self,
        predicate: &RdfPredicate,
        object: &RdfObject,
    ) -> impl Iterator<Item = &'a RdfSubject> + 'a {
        self.pos_index
            .get(predicate)
            .and_then(|objs| objs.get(object))
            .into_iter()
            .flatten()
    }

    /// Query triples matching a pattern, using an index when subject or
    /// predicate is bound
    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        match (&pattern.subject, &pattern.predicate) {
            (Some(s), _) => self
                .spo_index
                .get(s)
                .into_iter()
                .flat_map(|preds| preds.iter())
                .flat_map(|(p, objs)| {
                    objs.iter()
                        .map(move |o| Triple::new(s.clone(), p.clone(), o.clone()))
                })
                .filter(|t| pattern.matches(t))
                .collect(),
            (None, Some(p)) => self
                .pos_index
                .get(p)
                .into_iter()
                .flat_map(|objs| objs.iter())
                .flat_map(|(o, subjs)| {
                    subjs
                        .iter()
                        .map(move |s| Triple::new(s.clone(), p.clone(), o.clone()))
                })
                .filter(|t| pattern.matches(t))
                .collect(),
            (None, None) => self
                .triples
                .iter()
                .filter(|t| pattern.matches(t))
                .cloned()
                .collect(),
        }
    }

    /// Get an iterator over all triples, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples ordered by their N-Triples rendering, for stable output
    pub fn sorted_triples(&self) -> Vec<&Triple> {
        let mut triples: Vec<(String, &Triple)> =
            self.triples.iter().map(|t| (t.to_string(), t)).collect();
        triples.sort_by(|a, b| a.0.cmp(&b.0));
        triples.into_iter().map(|(_, t)| t).collect()
    }

    /// Serialize the store with the writer belonging to `format`
    pub fn export(&self, format: RdfFormat, writer: &mut dyn Write) -> SerializeResult<()> {
        let write_fn = format.writer();
        write_fn(self, writer)
    }

    /// Serialize the store into a string
    pub fn export_to_string(&self, format: RdfFormat) -> SerializeResult<String> {
        let mut buffer = Vec::new();
        self.export(format, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| super::serialization::SerializeError::Serialize(e.to_string()))
    }
}
