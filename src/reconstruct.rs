//! Rebuilding header and body sequences from pattern query results

use crate::sparql::{CellValue, QueryResultTuple, RowKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Body layout produced by the reconstructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyShape {
    /// All data values in one sequence, row boundaries dropped
    Flat,
    /// One sequence of values per data row
    #[default]
    Grouped,
}

/// Reconstructed body. `None` marks a cell whose value did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableBody {
    Flat(Vec<Option<String>>),
    Grouped(Vec<Vec<Option<String>>>),
}

impl TableBody {
    pub fn is_empty(&self) -> bool {
        match self {
            TableBody::Flat(values) => values.is_empty(),
            TableBody::Grouped(rows) => rows.is_empty(),
        }
    }

    /// Number of data cells
    pub fn cell_count(&self) -> usize {
        match self {
            TableBody::Flat(values) => values.len(),
            TableBody::Grouped(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// Row-grouped view; a flat body is split into rows of `width` values
    pub fn rows(&self, width: usize) -> Vec<Vec<Option<String>>> {
        match self {
            TableBody::Grouped(rows) => rows.clone(),
            TableBody::Flat(values) if width == 0 => {
                values.iter().map(|v| vec![v.clone()]).collect()
            }
            TableBody::Flat(values) => values.chunks(width).map(<[_]>::to_vec).collect(),
        }
    }
}

/// Caller-supplied metadata; never derived from the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    /// Dataset name
    pub name: String,
    /// Generation time, second precision
    pub generated_at: DateTime<Utc>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            generated_at,
        }
    }

    /// Metadata stamped with the current time, truncated to whole seconds
    pub fn now(name: impl Into<String>) -> Self {
        let now = Utc::now();
        let generated_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        Self::new(name, generated_at)
    }

    /// `YYYY-MM-DD HH:MM:SS (UTC)`
    pub fn last_update(&self) -> String {
        format!("{} (UTC)", self.generated_at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Header, body and metadata handed to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconstructedTable {
    pub header: Vec<String>,
    pub body: TableBody,
    pub metadata: TableMetadata,
}

/// Builds [`ReconstructedTable`]s from sorted query results
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReconstructor {
    shape: BodyShape,
}

impl TableReconstructor {
    pub fn new(shape: BodyShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> BodyShape {
        self.shape
    }

    /// Reconstruct from tuples sorted by `(row, col)`.
    ///
    /// Header rows feed the header only, data rows feed the body only. A data
    /// cell without a value still occupies its slot as `None`.
    ///
    /// Rows are only known through their cells, so a row with no cells yields
    /// no tuples. A zero-width table therefore comes back with an empty header
    /// and an empty body, whatever its row count.
    pub fn reconstruct(
        &self,
        tuples: &[QueryResultTuple],
        metadata: TableMetadata,
    ) -> ReconstructedTable {
        let mut header = Vec::new();
        let mut flat = Vec::new();
        let mut grouped: Vec<Vec<Option<String>>> = Vec::new();
        let mut current_row = None;

        for tuple in tuples {
            match tuple.row_type {
                RowKind::HeaderRow => {
                    let title = match &tuple.col_title {
                        CellValue::Literal(l) => l.value().to_string(),
                        CellValue::Identifier(n) => n.as_str().to_string(),
                        CellValue::Absent => {
                            warn!("Header cell {} has no title", tuple.cell);
                            String::new()
                        }
                    };
                    debug!("header cell: {}", title);
                    header.push(title);
                }
                RowKind::DataRow => {
                    let value = tuple.val.text().map(str::to_string);
                    debug!("cell {}: {:?}", tuple.position, value);
                    match self.shape {
                        BodyShape::Flat => flat.push(value),
                        BodyShape::Grouped => {
                            if current_row != Some(tuple.position.row) {
                                current_row = Some(tuple.position.row);
                                grouped.push(Vec::new());
                            }
                            if let Some(row) = grouped.last_mut() {
                                row.push(value);
                            }
                        }
                    }
                }
            }
        }

        let body = match self.shape {
            BodyShape::Flat => TableBody::Flat(flat),
            BodyShape::Grouped => TableBody::Grouped(grouped),
        };

        ReconstructedTable {
            header,
            body,
            metadata,
        }
    }
}
