//! Table pattern executor
//!
//! Evaluates the one pattern the publisher needs, written out in SPARQL as
//! [`TABLE_QUERY`]: a conjunctive join over table → row → cell, then two
//! independent left-outer joins on `?cell`.

use super::results::{CellPosition, CellValue, QueryResultTuple, RowKind};
use super::{QueryError, QueryResult};
use crate::rdf::vocab::{dc, rdf, scsv};
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfStore, RdfSubject};
use tracing::{debug, info};

/// SPARQL form of the pattern evaluated by [`TablePatternQuery`]
pub const TABLE_QUERY: &str = r#"SELECT ?row ?rowType ?cell ?colTitle ?cellType ?val WHERE {
    ?table a scsv:Table ;
           scsv:row ?row .
    ?row a ?rowType ;
         scsv:cell ?cell .
    OPTIONAL { ?cell a ?cellType ;
                     rdf:value ?val . }
    OPTIONAL { ?cell dc:title ?colTitle . }
}"#;

/// Executor for the fixed table pattern
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePatternQuery;

impl TablePatternQuery {
    /// Create a new executor
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the pattern.
    ///
    /// Solutions are returned sorted by the numeric `(row, col)` decoded from
    /// each cell identifier; the order of the underlying store is never relied
    /// upon.
    pub fn execute(&self, store: &RdfStore) -> QueryResult<Vec<QueryResultTuple>> {
        debug!("Evaluating table pattern:\n{}", TABLE_QUERY);

        let rdf_type: RdfPredicate = rdf::TYPE.into();
        let rdf_value: RdfPredicate = rdf::VALUE.into();
        let has_row: RdfPredicate = scsv::HAS_ROW.into();
        let has_cell: RdfPredicate = scsv::HAS_CELL.into();
        let title: RdfPredicate = dc::TITLE.into();
        let table_class: RdfObject = scsv::TABLE.into();

        let mut solutions = Vec::new();

        for table in store.subjects(&rdf_type, &table_class) {
            for row in store.objects(table, &has_row) {
                let row = expect_iri(row)?;
                let row_subject: RdfSubject = row.clone().into();

                for row_type in store.objects(&row_subject, &rdf_type) {
                    let row_type_iri = expect_iri(row_type)?;
                    let kind = RowKind::from_type(row_type_iri)
                        .ok_or_else(|| QueryError::UnknownRowType(row_type_iri.as_str().to_string()))?;

                    for cell in store.objects(&row_subject, &has_cell) {
                        let cell = expect_iri(cell)?;
                        let position = CellPosition::from_cell(cell)?;
                        let cell_subject: RdfSubject = cell.clone().into();

                        // OPTIONAL A: type and value bind together or not at all
                        let mut typed_values = Vec::new();
                        for cell_type in store.objects(&cell_subject, &rdf_type) {
                            for val in store.objects(&cell_subject, &rdf_value) {
                                typed_values.push((
                                    CellValue::from_object(cell_type)?,
                                    CellValue::from_object(val)?,
                                ));
                            }
                        }
                        if typed_values.is_empty() {
                            typed_values.push((CellValue::Absent, CellValue::Absent));
                        }

                        // OPTIONAL B
                        let mut titles = store
                            .objects(&cell_subject, &title)
                            .map(CellValue::from_object)
                            .collect::<QueryResult<Vec<_>>>()?;
                        if titles.is_empty() {
                            titles.push(CellValue::Absent);
                        }

                        for (cell_type, val) in &typed_values {
                            for col_title in &titles {
                                solutions.push(QueryResultTuple {
                                    row: row.clone(),
                                    row_type: kind,
                                    cell: cell.clone(),
                                    position,
                                    col_title: col_title.clone(),
                                    cell_type: cell_type.clone(),
                                    val: val.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }

        // Ties only occur for cells with several titles or values
        solutions.sort_by_cached_key(|t| {
            (
                t.position,
                t.col_title.to_string(),
                t.cell_type.to_string(),
                t.val.to_string(),
            )
        });

        info!("Table pattern matched {} rows", solutions.len());
        Ok(solutions)
    }
}

fn expect_iri(object: &RdfObject) -> QueryResult<&NamedNode> {
    object
        .as_named_node()
        .ok_or_else(|| QueryError::UnexpectedTerm(object.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, Triple};
    use crate::tabular::{RawTable, TableMapper};

    fn mapped(rows: Vec<Vec<&str>>) -> (TableMapper, RdfStore) {
        let mapper = TableMapper::with_base("http://example.org/instata/potd_0").unwrap();
        let mut store = RdfStore::new();
        let table: RawTable = rows.into_iter().collect();
        mapper.map(&table, &mut store).unwrap();
        (mapper, store)
    }

    #[test]
    fn test_header_and_data_bindings() {
        let (_, store) = mapped(vec![vec!["name", "price"], vec!["Bread", "3.50"]]);
        let results = TablePatternQuery::new().execute(&store).unwrap();
        assert_eq!(results.len(), 4);

        let header = &results[0];
        assert_eq!(header.row_type, RowKind::HeaderRow);
        assert_eq!(header.position, CellPosition::new(1, 1));
        assert_eq!(header.col_title.text(), Some("name"));
        assert!(header.cell_type.is_absent());
        assert!(header.val.is_absent());

        let price = &results[3];
        assert_eq!(price.row_type, RowKind::DataRow);
        assert_eq!(price.position, CellPosition::new(2, 2));
        assert!(price.col_title.is_absent());
        assert_eq!(price.cell_type.text(), Some("http://schema.org/price"));
        assert_eq!(price.val.text(), Some("3.50"));
    }

    #[test]
    fn test_sorted_numerically() {
        let mut rows = vec![vec!["n"]];
        let values: Vec<String> = (1..=11).map(|i| i.to_string()).collect();
        for v in &values {
            rows.push(vec![v.as_str()]);
        }
        let (_, store) = mapped(rows);
        let results = TablePatternQuery::new().execute(&store).unwrap();
        let positions: Vec<usize> = results.iter().map(|t| t.position.row).collect();
        assert_eq!(positions, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_optional_a_requires_both_type_and_value() {
        let (mapper, mut store) = mapped(vec![vec!["name"]]);
        // a data row whose cell has a type but no value
        let row = mapper.row_iri(2).unwrap();
        let cell = mapper.cell_iri(2, 1).unwrap();
        store.insert(Triple::new(mapper.table_iri().clone(), scsv::HAS_ROW, row.clone()));
        store.insert(Triple::new(row.clone(), rdf::TYPE, scsv::ROW));
        store.insert(Triple::new(row, scsv::HAS_CELL, cell.clone()));
        store.insert(Triple::new(cell, rdf::TYPE, NamedNode::new("http://schema.org/name").unwrap()));

        let results = TablePatternQuery::new().execute(&store).unwrap();
        let data = results.iter().find(|t| t.row_type == RowKind::DataRow).unwrap();
        assert!(data.cell_type.is_absent());
        assert!(data.val.is_absent());
        assert!(data.col_title.is_absent());
    }

    #[test]
    fn test_rows_without_table_type_are_ignored() {
        let (_, mut store) = mapped(vec![vec!["name"], vec!["Bread"]]);
        let orphan_table = NamedNode::new("http://example.org/other").unwrap();
        let orphan_row = NamedNode::new("http://example.org/other#row:1").unwrap();
        store.insert(Triple::new(orphan_table, scsv::HAS_ROW, orphan_row));

        let results = TablePatternQuery::new().execute(&store).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_malformed_cell_identifier() {
        let (mapper, mut store) = mapped(vec![vec!["name"]]);
        let header_row = mapper.row_iri(1).unwrap();
        let bad_cell = NamedNode::new("http://example.org/instata/potd_0#cell-x").unwrap();
        store.insert(Triple::new(header_row, scsv::HAS_CELL, bad_cell));

        assert!(matches!(
            TablePatternQuery::new().execute(&store),
            Err(QueryError::MalformedCellIdentifier(_))
        ));
    }

    #[test]
    fn test_literal_row_is_a_query_error() {
        let (mapper, mut store) = mapped(vec![vec!["name"]]);
        store.insert(Triple::new(
            mapper.table_iri().clone(),
            scsv::HAS_ROW,
            Literal::new_simple_literal("row:2"),
        ));
        assert!(matches!(
            TablePatternQuery::new().execute(&store),
            Err(QueryError::UnexpectedTerm(_))
        ));
    }

    #[test]
    fn test_empty_store() {
        let results = TablePatternQuery::new().execute(&RdfStore::new()).unwrap();
        assert!(results.is_empty());
    }
}
