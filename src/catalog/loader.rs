// CSV dataset loader.
//
// Reads `title` and `description` columns by header name, drops rows whose
// description is missing, and reindexes the survivors contiguously in file
// order. "Missing" follows the usual dataframe conventions: an absent or
// blank field, or one of the common NA spellings.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::models::{Catalog, Product};
use crate::error::{LookalikeError, Result};

pub const TITLE_COLUMN: &str = "title";
pub const DESCRIPTION_COLUMN: &str = "description";

/// Field values treated as null, in addition to blank fields.
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options for reading the source file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Single-byte field delimiter
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Load and clean the product catalog at `path`.
pub fn load_catalog(path: &Path, options: &LoadOptions) -> Result<Catalog> {
    let file = File::open(path).map_err(|source| LookalikeError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let title_col = find_column(&headers, TITLE_COLUMN, path)?;
    let description_col = find_column(&headers, DESCRIPTION_COLUMN, path)?;

    let mut products = Vec::new();
    let mut dropped_rows = 0;

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        let Some(description) = field(&record, description_col) else {
            debug!(row, "Dropping row with missing description");
            dropped_rows += 1;
            continue;
        };

        products.push(Product {
            title: field(&record, title_col).unwrap_or_default().to_string(),
            description: description.to_string(),
            source_row: row,
        });
    }

    info!(
        path = %path.display(),
        products = products.len(),
        dropped = dropped_rows,
        "Loaded product catalog"
    );

    if products.is_empty() {
        return Err(LookalikeError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    Ok(Catalog {
        products,
        dropped_rows,
    })
}

/// Locate a required column by (trimmed) header name.
fn find_column(headers: &StringRecord, name: &'static str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        .ok_or_else(|| LookalikeError::MissingColumn {
            column: name,
            path: path.to_path_buf(),
        })
}

/// The field at `col`, or `None` when it is absent, blank, or an NA marker.
fn field(record: &StringRecord, col: usize) -> Option<&str> {
    record.get(col).filter(|value| !is_missing(value))
}

/// Whether a raw field value counts as null.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NA_VALUES.contains(&trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("NaN"));
        assert!(is_missing("null"));
        assert!(!is_missing("Nancy's apron"));
        assert!(!is_missing("0"));
    }

    #[test]
    fn test_load_drops_missing_descriptions() {
        let file = write_csv(
            "title,description\n\
             Shirt,red cotton shirt\n\
             Ghost,\n\
             Pan,stainless steel pan\n\
             Lamp,NA\n",
        );

        let catalog = load_catalog(file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.dropped_rows, 2);
        assert_eq!(catalog.products[0].title, "Shirt");
        assert_eq!(catalog.products[1].title, "Pan");
        assert_eq!(catalog.products[1].source_row, 2);
    }

    #[test]
    fn test_load_columns_in_any_order() {
        let file = write_csv("id;description;title\n7;steel pan;Pan\n");
        let options = LoadOptions { delimiter: b';' };

        let catalog = load_catalog(file.path(), &options).unwrap();

        assert_eq!(catalog.products[0].title, "Pan");
        assert_eq!(catalog.products[0].description, "steel pan");
    }

    #[test]
    fn test_short_row_counts_as_missing() {
        let file = write_csv("title,description\nShirt,red cotton shirt\nOrphan\n");
        let catalog = load_catalog(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.dropped_rows, 1);
    }

    #[test]
    fn test_missing_title_kept_as_empty() {
        let file = write_csv("title,description\n,plain mug\n");
        let catalog = load_catalog(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(catalog.products[0].title, "");
        assert_eq!(catalog.products[0].display_title(), "(untitled)");
    }

    #[test]
    fn test_missing_column_fails() {
        let file = write_csv("title,summary\nShirt,red cotton shirt\n");
        let err = load_catalog(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            LookalikeError::MissingColumn {
                column: DESCRIPTION_COLUMN,
                ..
            }
        ));
    }

    #[test]
    fn test_absent_file_fails() {
        let err = load_catalog(
            Path::new("/nonexistent/products.csv"),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LookalikeError::DataAccess { .. }));
    }

    #[test]
    fn test_all_rows_dropped_fails() {
        let file = write_csv("title,description\nGhost,\nPhantom,null\n");
        let err = load_catalog(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LookalikeError::EmptyDataset { .. }));
    }
}
