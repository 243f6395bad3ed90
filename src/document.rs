//! Comment-transparent HTML document navigation.
//!
//! The stats sites ship some tables inside HTML comments. `Document::parse`
//! re-parses any comment that carries table markup and keeps the fragment
//! alongside the main tree, so lookups see commented-out tables the same as
//! live ones.

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Node, Selector};

pub struct Document {
    roots: Vec<Html>,
}

impl Document {
    pub fn parse(html: &str) -> Document {
        let main = Html::parse_document(html);
        let mut roots = Vec::with_capacity(2);

        for node in main.tree.nodes() {
            if let Node::Comment(comment) = node.value() {
                let raw: &str = comment;
                if raw.contains("table") {
                    roots.push(Html::parse_fragment(raw));
                }
            }
        }
        roots.insert(0, main);
        Document { roots }
    }

    /// First element matching a CSS selector, searching the main tree before
    /// any comment fragments.
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(css).ok()?;
        self.roots
            .iter()
            .find_map(|root| root.select(&selector).next())
    }

    /// All elements matching a CSS selector across the main tree and any
    /// comment fragments, in document order.
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        let Ok(selector) = Selector::parse(css) else {
            return Vec::new();
        };
        self.roots
            .iter()
            .flat_map(|root| root.select(&selector))
            .collect()
    }

    /// Data-body rows of the table with the given id, with repeated header
    /// rows (the `thead` row class) filtered out. An absent table yields an
    /// empty vec, which callers treat as "no data for this entity".
    pub fn table_rows(&self, table_id: &str) -> Vec<TableRow<'_>> {
        let Ok(table_sel) = Selector::parse(&format!("table#{table_id}")) else {
            return Vec::new();
        };
        let Ok(row_sel) = Selector::parse("tbody > tr") else {
            return Vec::new();
        };

        for root in &self.roots {
            let Some(table) = root.select(&table_sel).next() else {
                continue;
            };
            return table
                .select(&row_sel)
                .filter(|row| !row.value().classes().any(|class| class == "thead"))
                .map(|el| TableRow { el })
                .collect();
        }
        Vec::new()
    }

    /// Text content of the whole document, comment fragments included.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            for chunk in root.root_element().text() {
                out.push_str(chunk);
            }
        }
        out
    }
}

pub struct TableRow<'a> {
    el: ElementRef<'a>,
}

impl<'a> TableRow<'a> {
    /// Numeric value of the cell keyed by `data-stat`. Absent or blank cells
    /// are 0.0; a cell that is present but not numeric is a parse error.
    pub fn stat(&self, key: &str) -> Result<f64> {
        match self.cell_text(key) {
            None => Ok(0.0),
            Some(text) if text.is_empty() => Ok(0.0),
            Some(text) => text
                .parse::<f64>()
                .with_context(|| format!("malformed numeric cell {key}={text:?}")),
        }
    }

    /// Trimmed text of the cell keyed by `data-stat`, if the cell exists.
    pub fn cell_text(&self, key: &str) -> Option<String> {
        let selector = Selector::parse(&format!(r#"[data-stat="{key}"]"#)).ok()?;
        let cell = self.el.select(&selector).next()?;
        Some(cell.text().collect::<String>().trim().to_string())
    }

    /// First anchor href within the cell keyed by `data-stat`.
    pub fn cell_link(&self, key: &str) -> Option<String> {
        let selector = Selector::parse(&format!(r#"[data-stat="{key}"] a"#)).ok()?;
        let anchor = self.el.select(&selector).next()?;
        anchor.value().attr("href").map(|href| href.to_string())
    }
}
