//! Spreadsheet processing module.

pub(crate) mod workbook;

pub use workbook::{cell_text, load_table};

/// A worksheet as header names plus rows of optional cell text.
///
/// `None` marks an empty cell. Rows may be shorter than the header; the
/// missing trailing cells count as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SheetTable {
    /// Build a table from a header row and data rows.
    ///
    /// Headers are trimmed, empty headers become `Unnamed: <index>`, and a
    /// repeated header gets a `.1`, `.2`, ... suffix so every column keeps
    /// a distinct name.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            headers: normalize_headers(headers),
            rows,
        }
    }

    /// Convenience constructor from string slices; empty strings are empty cells.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                        .collect()
                })
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate a row as `(header, cell)` pairs.
    pub fn row_cells<'a>(
        &'a self,
        row: &'a [Option<String>],
    ) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        self.headers
            .iter()
            .enumerate()
            .map(move |(i, header)| (header.as_str(), row.get(i).and_then(|c| c.as_deref())))
    }
}

fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());

    for (i, header) in headers.into_iter().enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {}", i),
            h => h.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.push(name);
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_normalized() {
        let table = SheetTable::from_strs(&[" Nome ", "", "Nome", "Fim"], &[]);
        assert_eq!(table.headers, vec!["Nome", "Unnamed: 1", "Nome.1", "Fim"]);
    }

    #[test]
    fn test_short_rows() {
        let table = SheetTable::from_strs(&["Nome", "Fim"], &[&["ANA"]]);
        let cells: Vec<_> = table.row_cells(&table.rows[0]).collect();
        assert_eq!(cells, vec![("Nome", Some("ANA")), ("Fim", None)]);
    }
}
