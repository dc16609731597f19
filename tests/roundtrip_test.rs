use instata::rdf::{store_with_default_prefixes, RdfFormat, RdfParser, RdfStore};
use instata::reconstruct::{BodyShape, ReconstructedTable, TableBody, TableMetadata, TableReconstructor};
use instata::sparql::TablePatternQuery;
use instata::tabular::{MappingError, RawTable, TableMapper};
use chrono::DateTime;

const BASE: &str = "http://example.org/instata/potd_0";

fn raw(rows: &[&[&str]]) -> RawTable {
    rows.iter().map(|r| r.to_vec()).collect()
}

fn sample() -> RawTable {
    raw(&[&["name", "price"], &["Bread", "3.50"], &["Cake", "5.00"]])
}

fn metadata() -> TableMetadata {
    TableMetadata::new("potd_0", DateTime::from_timestamp(1_312_000_000, 0).unwrap())
}

fn map(table: &RawTable) -> RdfStore {
    let mut store = RdfStore::new();
    TableMapper::with_base(BASE).unwrap().map(table, &mut store).unwrap();
    store
}

fn rebuild(store: &RdfStore, shape: BodyShape) -> ReconstructedTable {
    let tuples = TablePatternQuery::new().execute(store).unwrap();
    TableReconstructor::new(shape).reconstruct(&tuples, metadata())
}

fn values(row: &[&str]) -> Vec<Option<String>> {
    row.iter().map(|v| Some(v.to_string())).collect()
}

#[test]
fn test_concrete_scenario() {
    let store = map(&sample());

    let grouped = rebuild(&store, BodyShape::Grouped);
    assert_eq!(grouped.header, vec!["name", "price"]);
    assert_eq!(
        grouped.body,
        TableBody::Grouped(vec![values(&["Bread", "3.50"]), values(&["Cake", "5.00"])])
    );

    let flat = rebuild(&store, BodyShape::Flat);
    assert_eq!(flat.header, vec!["name", "price"]);
    assert_eq!(flat.body, TableBody::Flat(values(&["Bread", "3.50", "Cake", "5.00"])));
}

#[test]
fn test_shape_matches_input_dimensions() {
    let mut rows: Vec<Vec<String>> = vec![(1..=4).map(|j| format!("c{}", j)).collect()];
    for i in 0..12 {
        rows.push((1..=4).map(|j| format!("v{}-{}", i, j)).collect());
    }
    let table: RawTable = rows.into_iter().collect();
    let store = map(&table);

    let grouped = rebuild(&store, BodyShape::Grouped);
    assert_eq!(grouped.header.len(), 4);
    match &grouped.body {
        TableBody::Grouped(body) => {
            assert_eq!(body.len(), 12);
            assert!(body.iter().all(|row| row.len() == 4));
            // rows 10..12 must not sort before row 2
            assert_eq!(body[1][0].as_deref(), Some("v1-1"));
            assert_eq!(body[11][3].as_deref(), Some("v11-4"));
        }
        other => panic!("expected grouped body, got {:?}", other),
    }

    let flat = rebuild(&store, BodyShape::Flat);
    assert_eq!(flat.body.cell_count(), 48);
    // header titles never leak into the body
    assert!(!flat.body.rows(4).iter().flatten().any(|v| v.as_deref() == Some("c1")));
}

#[test]
fn test_header_only() {
    let store = map(&raw(&[&["name", "price"]]));
    for shape in [BodyShape::Flat, BodyShape::Grouped] {
        let table = rebuild(&store, shape);
        assert_eq!(table.header, vec!["name", "price"]);
        assert!(table.body.is_empty());
    }
}

#[test]
fn test_empty_input() {
    let store = map(&RawTable::default());
    assert!(TablePatternQuery::new().execute(&store).unwrap().is_empty());
    for shape in [BodyShape::Flat, BodyShape::Grouped] {
        let table = rebuild(&store, shape);
        assert!(table.header.is_empty());
        assert!(table.body.is_empty());
    }
}

#[test]
fn test_short_row_is_a_mapping_error() {
    let table = raw(&[&["name", "price"], &["Bread"]]);
    let mut store = RdfStore::new();
    let err = TableMapper::with_base(BASE).unwrap().map(&table, &mut store).unwrap_err();
    assert!(matches!(
        err,
        MappingError::ColumnCountMismatch { row: 2, expected: 2, actual: 1 }
    ));
    assert!(err.to_string().contains("Row 2"));
}

#[test]
fn test_idempotent_mapping() {
    let first = rebuild(&map(&sample()), BodyShape::Grouped);
    let second = rebuild(&map(&sample()), BodyShape::Grouped);
    assert_eq!(first, second);

    // mapping twice into one store adds nothing
    let mut store = map(&sample());
    let before = store.len();
    TableMapper::with_base(BASE).unwrap().map(&sample(), &mut store).unwrap();
    assert_eq!(store.len(), before);
    assert_eq!(rebuild(&store, BodyShape::Grouped), first);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let store = map(&sample());
    let mut triples: Vec<_> = store.iter().cloned().collect();
    triples.reverse();
    let reversed = RdfStore::from_triples(triples);

    assert_eq!(
        rebuild(&store, BodyShape::Grouped),
        rebuild(&reversed, BodyShape::Grouped)
    );
    assert_eq!(rebuild(&store, BodyShape::Flat), rebuild(&reversed, BodyShape::Flat));
}

#[test]
fn test_turtle_round_trip() {
    let store = map(&sample());
    let expected = rebuild(&store, BodyShape::Grouped);

    let turtle = store.export_to_string(RdfFormat::Turtle).unwrap();
    let reparsed = RdfParser::parse_store(&turtle, RdfFormat::Turtle).unwrap();
    assert_eq!(reparsed.len(), store.len());
    assert_eq!(rebuild(&reparsed, BodyShape::Grouped), expected);
}

#[test]
fn test_prefixed_turtle_round_trip() {
    let mut store = store_with_default_prefixes();
    TableMapper::with_base(BASE).unwrap().map(&sample(), &mut store).unwrap();
    let expected = rebuild(&store, BodyShape::Grouped);

    let turtle = store.export_to_string(RdfFormat::Turtle).unwrap();
    assert!(turtle.contains("scsv:Table"));
    assert!(turtle.contains("dc:title"));
    assert!(turtle.contains("schema:price"));
    assert!(turtle.contains("rdf:value"));
    assert!(turtle.contains("<http://example.org/instata/potd_0#row:2,col:2>"));
    // cell fragments never appear as bare prefixed names
    assert!(!turtle.lines().any(|l| l.contains(",col:") && !l.contains("#row:")));

    let reparsed = RdfParser::parse_store(&turtle, RdfFormat::Turtle).unwrap();
    assert_eq!(reparsed.len(), store.len());
    assert_eq!(rebuild(&reparsed, BodyShape::Grouped), expected);
}

#[test]
fn test_zero_width_table_has_no_body() {
    // rows without cells produce no pattern solutions
    let store = map(&raw(&[&[], &[], &[]]));
    assert!(TablePatternQuery::new().execute(&store).unwrap().is_empty());
    for shape in [BodyShape::Flat, BodyShape::Grouped] {
        let table = rebuild(&store, shape);
        assert!(table.header.is_empty());
        assert!(table.body.is_empty());
    }
    assert_eq!(rebuild(&store, BodyShape::Grouped).body, TableBody::Grouped(vec![]));
}

#[test]
fn test_ntriples_round_trip() {
    let store = map(&sample());
    let text = store.export_to_string(RdfFormat::NTriples).unwrap();
    let reparsed = RdfParser::parse_store(&text, RdfFormat::NTriples).unwrap();
    assert_eq!(rebuild(&reparsed, BodyShape::Flat), rebuild(&store, BodyShape::Flat));
}
