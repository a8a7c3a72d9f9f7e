// Catalog data models.
//
// A product is identified by its position in the cleaned catalog, not by
// anything stored in the file. Dropped rows leave no gap in that index space.

use serde::{Deserialize, Serialize};

/// A single product that survived cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    /// Zero-based data row in the source file (header excluded)
    pub source_row: usize,
}

impl Product {
    /// Title for display, with a placeholder when the file had none.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }
}

/// The cleaned, densely indexed product table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    /// Rows removed because their description was missing
    pub dropped_rows: usize,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Descriptions in index order, ready for vectorization.
    pub fn descriptions(&self) -> Vec<String> {
        self.products.iter().map(|p| p.description.clone()).collect()
    }

    /// Display titles in index order.
    pub fn titles(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.display_title().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_placeholder() {
        let product = Product {
            title: String::new(),
            description: "steel pan".to_string(),
            source_row: 3,
        };
        assert_eq!(product.display_title(), "(untitled)");
    }

    #[test]
    fn test_titles_follow_index_order() {
        let catalog = Catalog {
            products: vec![
                Product {
                    title: "Shirt".to_string(),
                    description: "red cotton shirt".to_string(),
                    source_row: 0,
                },
                Product {
                    title: "Pan".to_string(),
                    description: "steel pan".to_string(),
                    source_row: 2,
                },
            ],
            dropped_rows: 1,
        };
        assert_eq!(catalog.titles(), vec!["Shirt", "Pan"]);
        assert_eq!(catalog.descriptions()[1], "steel pan");
    }
}
