//! Table vocabulary shared by the mapper and the pattern query.
//!
//! Tables, rows and cells live in the `scsv` namespace; titles come from Dublin
//! Core and values/types from the RDF core vocabulary.

use oxrdf::NamedNodeRef;

/// `scsv` namespace IRI
pub const SCSV_NS: &str = "http://purl.org/NET/schema-org-csv#";
/// schema.org namespace IRI
pub const SCHEMA_NS: &str = "http://schema.org/";
/// Dublin Core terms namespace IRI
pub const DC_NS: &str = "http://purl.org/dc/terms/";
/// RDF namespace IRI
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// XML Schema datatypes namespace IRI
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// Prefixes bound on every store the publisher creates
pub const DEFAULT_PREFIXES: [(&str, &str); 5] = [
    ("schema", SCHEMA_NS),
    ("scsv", SCSV_NS),
    ("dc", DC_NS),
    ("rdf", RDF_NS),
    ("xsd", XSD_NS),
];

pub mod scsv {
    use super::NamedNodeRef;

    pub const TABLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/NET/schema-org-csv#Table");
    pub const HEADER_ROW: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/NET/schema-org-csv#HeaderRow");
    /// Discriminator for data rows
    pub const ROW: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/NET/schema-org-csv#Row");
    /// has-row
    pub const HAS_ROW: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/NET/schema-org-csv#row");
    /// has-cell
    pub const HAS_CELL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/NET/schema-org-csv#cell");
}

pub mod dc {
    use super::NamedNodeRef;

    pub const TITLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
}

pub use oxrdf::vocab::rdf;
pub use oxrdf::vocab::xsd;

/// schema.org property names a header title may resolve to.
///
/// Titles are folded to lowerCamelCase before lookup, so `Date Published`
/// and `date_published` both resolve to `schema:datePublished`.
pub const SCHEMA_PROPERTIES: &[&str] = &[
    "address",
    "author",
    "brand",
    "category",
    "color",
    "contentUrl",
    "dateCreated",
    "dateModified",
    "datePublished",
    "description",
    "duration",
    "email",
    "endDate",
    "familyName",
    "givenName",
    "height",
    "identifier",
    "image",
    "keywords",
    "latitude",
    "location",
    "longitude",
    "manufacturer",
    "model",
    "name",
    "price",
    "priceCurrency",
    "recipeIngredient",
    "recipeInstructions",
    "recipeYield",
    "sku",
    "startDate",
    "telephone",
    "text",
    "url",
    "weight",
    "width",
];
