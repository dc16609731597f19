//! Result tuples of the table pattern query

use super::QueryError;
use crate::rdf::vocab::scsv;
use crate::rdf::{Literal, NamedNode, RdfObject};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A bound (or unbound) variable in a result tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    /// IRI
    Identifier(NamedNode),
    /// Literal value
    Literal(Literal),
    /// Optional clause did not match
    Absent,
}

impl CellValue {
    /// Convert a store object. Blank nodes never appear in table data.
    pub fn from_object(object: &RdfObject) -> Result<Self, QueryError> {
        match object {
            RdfObject::NamedNode(n) => Ok(CellValue::Identifier(n.clone())),
            RdfObject::Literal(l) => Ok(CellValue::Literal(l.clone())),
            RdfObject::BlankNode(b) => Err(QueryError::UnexpectedTerm(b.to_string())),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// Text shown to readers: the lexical form of a literal or the IRI itself
    pub fn text(&self) -> Option<&str> {
        match self {
            CellValue::Identifier(n) => Some(n.as_str()),
            CellValue::Literal(l) => Some(l.value()),
            CellValue::Absent => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Identifier(n) => write!(f, "{}", n),
            CellValue::Literal(l) => write!(f, "{}", l),
            CellValue::Absent => f.write_str("UNDEF"),
        }
    }
}

/// Row discriminator, decoded once from the row's `rdf:type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    HeaderRow,
    DataRow,
}

impl RowKind {
    /// Decode a row type IRI
    pub fn from_type(iri: &NamedNode) -> Option<Self> {
        if iri.inner().as_ref() == scsv::HEADER_ROW {
            Some(RowKind::HeaderRow)
        } else if iri.inner().as_ref() == scsv::ROW {
            Some(RowKind::DataRow)
        } else {
            None
        }
    }

    /// The vocabulary term for this kind
    pub fn type_iri(self) -> NamedNode {
        match self {
            RowKind::HeaderRow => scsv::HEADER_ROW.into(),
            RowKind::DataRow => scsv::ROW.into(),
        }
    }
}

/// Row/column position decoded from a cell identifier (`...#row:i,col:j`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Decode the position from a cell IRI
    pub fn from_cell(cell: &NamedNode) -> Result<Self, QueryError> {
        static CELL_ID: OnceLock<Regex> = OnceLock::new();
        let re = CELL_ID
            .get_or_init(|| Regex::new(r"#row:(\d+),col:(\d+)$").expect("valid regex"));

        let malformed = || QueryError::MalformedCellIdentifier(cell.as_str().to_string());
        let caps = re.captures(cell.as_str()).ok_or_else(malformed)?;
        let row = caps[1].parse().map_err(|_| malformed())?;
        let col = caps[2].parse().map_err(|_| malformed())?;
        Ok(Self { row, col })
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row:{},col:{}", self.row, self.col)
    }
}

/// One solution of the table pattern:
/// `?row ?rowType ?cell ?colTitle ?cellType ?val`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResultTuple {
    pub row: NamedNode,
    pub row_type: RowKind,
    pub cell: NamedNode,
    pub position: CellPosition,
    pub col_title: CellValue,
    pub cell_type: CellValue,
    pub val: CellValue,
}

impl fmt::Display for QueryResultTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {} {} {} {}",
            self.row, self.row_type, self.cell, self.col_title, self.cell_type, self.val
        )
    }
}
