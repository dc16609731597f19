//! HTML page renderer

use super::{validate, RenderResult, Renderer, StyleAsset};
use crate::reconstruct::ReconstructedTable;
use std::fmt::Write;

/// Standalone HTML5 page with a single data table
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    /// Href of the stylesheet; defaults to the bundled asset next to the page
    stylesheet: Option<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stylesheet(href: impl Into<String>) -> Self {
        Self {
            stylesheet: Some(href.into()),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, table: &ReconstructedTable) -> RenderResult<String> {
        validate(table)?;

        let name = escape(&table.metadata.name);
        let stylesheet = self.stylesheet.as_deref().unwrap_or(StyleAsset::FILE_NAME);
        let mut out = String::new();

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "  <meta charset=\"utf-8\">")?;
        writeln!(out, "  <title>{}</title>", name)?;
        writeln!(out, "  <link rel=\"stylesheet\" href=\"{}\">", escape(stylesheet))?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "  <h1>{}</h1>", name)?;
        writeln!(out, "  <table class=\"instata\">")?;

        writeln!(out, "    <thead>")?;
        writeln!(out, "      <tr>")?;
        for title in &table.header {
            writeln!(out, "        <th>{}</th>", escape(title))?;
        }
        writeln!(out, "      </tr>")?;
        writeln!(out, "    </thead>")?;

        writeln!(out, "    <tbody>")?;
        for row in table.body.rows(table.header.len()) {
            writeln!(out, "      <tr>")?;
            for value in row {
                match value {
                    Some(v) => writeln!(out, "        <td>{}</td>", escape(&v))?,
                    None => writeln!(out, "        <td class=\"missing\"></td>")?,
                }
            }
            writeln!(out, "      </tr>")?;
        }
        writeln!(out, "    </tbody>")?;
        writeln!(out, "  </table>")?;

        writeln!(
            out,
            "  <footer>Last update: {}</footer>",
            escape(&table.metadata.last_update())
        )?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;

        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
