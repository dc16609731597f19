//! Rendering reconstructed tables into documents
//!
//! A renderer sees exactly four inputs: header, body, dataset name and
//! generation time. The bundled [`HtmlRenderer`] produces a standalone page
//! that links the style asset from [`StyleAsset`].

mod html;

pub use html::HtmlRenderer;

use crate::reconstruct::{ReconstructedTable, TableBody};
use rust_embed::RustEmbed;
use thiserror::Error;

/// Render errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Dataset name missing
    #[error("Dataset name is empty")]
    EmptyName,

    /// Grouped body row does not line up with the header
    #[error("Body row {row} has {actual} values, header has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Embedded asset missing from the build
    #[error("Missing asset: {0}")]
    MissingAsset(String),

    /// Formatting failure
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Turns a reconstructed table into a document
pub trait Renderer {
    /// Render the full document
    fn render(&self, table: &ReconstructedTable) -> RenderResult<String>;

    /// Extension of the produced document, without the dot
    fn extension(&self) -> &'static str;
}

/// Check the shape contract every renderer relies on
pub fn validate(table: &ReconstructedTable) -> RenderResult<()> {
    if table.metadata.name.trim().is_empty() {
        return Err(RenderError::EmptyName);
    }
    if let TableBody::Grouped(rows) = &table.body {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != table.header.len() {
                return Err(RenderError::RowWidth {
                    row: idx + 1,
                    expected: table.header.len(),
                    actual: row.len(),
                });
            }
        }
    }
    Ok(())
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// The stylesheet copied next to every published document
pub struct StyleAsset;

impl StyleAsset {
    pub const FILE_NAME: &'static str = "web.instata-style.css";

    /// Stylesheet bytes
    pub fn contents() -> RenderResult<Vec<u8>> {
        Assets::get(Self::FILE_NAME)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| RenderError::MissingAsset(Self::FILE_NAME.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::TableMetadata;

    fn table(name: &str, body: TableBody) -> ReconstructedTable {
        ReconstructedTable {
            header: vec!["name".to_string(), "price".to_string()],
            body,
            metadata: TableMetadata::now(name),
        }
    }

    #[test]
    fn test_validate() {
        let ok = table("potd_0", TableBody::Grouped(vec![vec![None, None]]));
        assert!(validate(&ok).is_ok());

        let unnamed = table(" ", TableBody::Flat(vec![]));
        assert!(matches!(validate(&unnamed), Err(RenderError::EmptyName)));

        let ragged = table("potd_0", TableBody::Grouped(vec![vec![None]]));
        assert!(matches!(
            validate(&ragged),
            Err(RenderError::RowWidth { row: 1, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_style_asset_embedded() {
        let css = StyleAsset::contents().unwrap();
        assert!(String::from_utf8(css).unwrap().contains("table.instata"));
    }
}
