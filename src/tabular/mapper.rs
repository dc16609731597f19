//! Table → RDF mapping
//!
//! # Mapping Strategy
//!
//! - Table `T` (the base IRI): `T a scsv:Table`
//! - Row `i` (1-based): `T scsv:row <base#row:i>`, tagged `scsv:HeaderRow` for
//!   `i == 1` and `scsv:Row` otherwise
//! - Cell `(i, j)`: `<base#row:i> scsv:cell <base#row:i,col:j>`
//!   - header cells carry `dc:title`
//!   - data cells carry `rdf:type <column property>` and `rdf:value`
//!
//! Row and column positions live in the identifiers, so statement order
//! carries no meaning.

use super::raw::RawTable;
use crate::rdf::vocab::{dc, rdf, scsv, xsd, SCHEMA_NS, SCHEMA_PROPERTIES};
use crate::rdf::{Literal, NamedNode, RdfStore, Triple};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

/// Mapping errors
#[derive(Error, Debug)]
pub enum MappingError {
    /// Base IRI is not an absolute IRI or already carries a fragment
    #[error("Invalid base IRI {iri}: {reason}")]
    InvalidBaseIri { iri: String, reason: String },

    /// Data row width differs from the header
    #[error("Row {row} has {actual} columns, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A minted identifier failed IRI validation
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type MappingResult<T> = Result<T, MappingError>;

/// Characters escaped when a header title becomes part of a fragment
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Mapping configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Base IRI for generated IRIs
    pub base_iri: String,

    /// Type data literals as integer/decimal/date/boolean when they parse as such
    pub infer_datatypes: bool,
}

impl MappingConfig {
    /// Create a new mapping configuration
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
            infer_datatypes: true,
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::new("http://example.org/instata/table")
    }
}

/// Counts reported after a table has been mapped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub rows: usize,
    pub columns: usize,
    pub cells: usize,
    pub statements: usize,
}

/// Table → RDF mapper
pub struct TableMapper {
    config: MappingConfig,
    table: NamedNode,
}

impl TableMapper {
    /// Create a mapper, validating the base IRI
    pub fn new(config: MappingConfig) -> MappingResult<Self> {
        let invalid = |reason: String| MappingError::InvalidBaseIri {
            iri: config.base_iri.clone(),
            reason,
        };
        if config.base_iri.contains('#') {
            return Err(invalid("base IRI must not contain a fragment".to_string()));
        }
        let table = NamedNode::new(config.base_iri.as_str()).map_err(|e| invalid(e.to_string()))?;

        Ok(Self { config, table })
    }

    /// Create a mapper with default configuration for `base_iri`
    pub fn with_base(base_iri: impl Into<String>) -> MappingResult<Self> {
        Self::new(MappingConfig::new(base_iri))
    }

    /// The table identifier
    pub fn table_iri(&self) -> &NamedNode {
        &self.table
    }

    pub fn row_iri(&self, row: usize) -> MappingResult<NamedNode> {
        self.mint(&format!("row:{}", row))
    }

    pub fn cell_iri(&self, row: usize, col: usize) -> MappingResult<NamedNode> {
        self.mint(&format!("row:{},col:{}", row, col))
    }

    /// Column property for a header title.
    ///
    /// Titles naming a known schema.org property (ignoring case and
    /// separators) map into schema.org; everything else gets a property under
    /// the base IRI. Identical titles always yield the same property.
    pub fn column_property(&self, title: &str, col: usize) -> MappingResult<NamedNode> {
        let folded: String = title
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .collect();

        if let Some(term) = SCHEMA_PROPERTIES
            .iter()
            .find(|term| term.eq_ignore_ascii_case(&folded))
        {
            return NamedNode::new(format!("{}{}", SCHEMA_NS, term))
                .map_err(|e| MappingError::InvalidIri(e.to_string()));
        }

        let trimmed = title.trim();
        if trimmed.is_empty() {
            return self.mint(&format!("col:{}", col));
        }
        self.mint(&format!("col:{}", utf8_percent_encode(trimmed, FRAGMENT)))
    }

    /// Map a raw table into `store`.
    ///
    /// Each row is validated before any of its statements are emitted, so a
    /// failing row leaves only the rows before it in the store.
    pub fn map(&self, table: &RawTable, store: &mut RdfStore) -> MappingResult<TableStats> {
        let mut stats = TableStats::default();
        let before = store.len();

        store.insert(Triple::new(self.table.clone(), rdf::TYPE, scsv::TABLE));

        let header = match table.header() {
            Some(header) => header,
            None => {
                info!("Mapped empty table {}", self.table);
                stats.statements = store.len() - before;
                return Ok(stats);
            }
        };
        stats.columns = header.len();

        let properties = header
            .iter()
            .enumerate()
            .map(|(j, title)| self.column_property(title, j + 1))
            .collect::<MappingResult<Vec<_>>>()?;

        for (idx, cells) in table.rows().iter().enumerate() {
            let i = idx + 1;
            if cells.len() != header.len() {
                return Err(MappingError::ColumnCountMismatch {
                    row: i,
                    expected: header.len(),
                    actual: cells.len(),
                });
            }

            let row = self.row_iri(i)?;
            store.insert(Triple::new(self.table.clone(), scsv::HAS_ROW, row.clone()));

            if i == 1 {
                store.insert(Triple::new(row.clone(), rdf::TYPE, scsv::HEADER_ROW));
                for (j, title) in cells.iter().enumerate() {
                    let cell = self.cell_iri(i, j + 1)?;
                    store.insert(Triple::new(row.clone(), scsv::HAS_CELL, cell.clone()));
                    store.insert(Triple::new(cell, dc::TITLE, Literal::new_simple_literal(title)));
                }
                debug!("Header row: {:?}", cells);
            } else {
                store.insert(Triple::new(row.clone(), rdf::TYPE, scsv::ROW));
                for (j, raw) in cells.iter().enumerate() {
                    let cell = self.cell_iri(i, j + 1)?;
                    store.insert(Triple::new(row.clone(), scsv::HAS_CELL, cell.clone()));
                    store.insert(Triple::new(cell.clone(), rdf::TYPE, properties[j].clone()));
                    store.insert(Triple::new(cell, rdf::VALUE, self.literal(raw)));
                }
                debug!("Data row {}: {:?}", i, cells);
            }

            stats.rows += 1;
            stats.cells += cells.len();
        }

        stats.statements = store.len() - before;
        info!(
            "Mapped {} rows x {} columns into {} statements",
            stats.rows, stats.columns, stats.statements
        );
        Ok(stats)
    }

    fn mint(&self, fragment: &str) -> MappingResult<NamedNode> {
        NamedNode::new(format!("{}#{}", self.config.base_iri, fragment))
            .map_err(|e| MappingError::InvalidIri(e.to_string()))
    }

    fn literal(&self, raw: &str) -> Literal {
        if self.config.infer_datatypes {
            if let Some(datatype) = infer_datatype(raw) {
                return Literal::new_typed_literal(raw, datatype.into());
            }
        }
        Literal::new_simple_literal(raw)
    }
}

fn infer_datatype(raw: &str) -> Option<oxrdf::NamedNodeRef<'static>> {
    static INTEGER: OnceLock<Regex> = OnceLock::new();
    static DECIMAL: OnceLock<Regex> = OnceLock::new();

    let integer = INTEGER.get_or_init(|| Regex::new(r"^[+-]?\d+$").expect("valid regex"));
    let decimal =
        DECIMAL.get_or_init(|| Regex::new(r"^[+-]?(\d+\.\d*|\.\d+)$").expect("valid regex"));

    if integer.is_match(raw) {
        Some(xsd::INTEGER)
    } else if decimal.is_match(raw) {
        Some(xsd::DECIMAL)
    } else if raw == "true" || raw == "false" {
        Some(xsd::BOOLEAN)
    } else if raw.len() == 10 && chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        Some(xsd::DATE)
    } else {
        None
    }
}
