// Pipeline context: everything derived from one dataset, built once.
//
// Load → vectorize → similarity runs eagerly in `build`; afterwards the
// context is read-only and every command (ranking, charts, summary) borrows
// from it.

use std::path::Path;

use tracing::info;

use crate::catalog::{load_catalog, Catalog, LoadOptions};
use crate::error::{LookalikeError, Result};
use crate::recommend::{self, RankedProduct, Recommendation, RecommendationReport};
use crate::similarity::SimilarityMatrix;
use crate::text::tfidf::TfIdfVectorizer;
use crate::text::traits::Vectorizer;
use crate::text::vectors::TermMatrix;

/// The cleaned catalog and everything computed from it.
pub struct Pipeline {
    pub catalog: Catalog,
    pub terms: TermMatrix,
    pub similarity: SimilarityMatrix,
}

impl Pipeline {
    /// Vectorize the catalog and compute the similarity matrix.
    pub fn build(catalog: Catalog, vectorizer: &dyn Vectorizer, show_progress: bool) -> Result<Self> {
        let terms = vectorizer.fit_transform(&catalog.descriptions())?;
        let similarity = SimilarityMatrix::from_vectors_with_progress(&terms.vectors, show_progress);

        info!(
            products = catalog.len(),
            vocabulary = terms.vocabulary.len(),
            "Pipeline ready"
        );

        Ok(Self {
            catalog,
            terms,
            similarity,
        })
    }

    /// Load `path` and build with the default TF-IDF vectorizer.
    pub fn from_path(path: &Path, options: &LoadOptions) -> Result<Self> {
        let catalog = load_catalog(path, options)?;
        Self::build(catalog, &TfIdfVectorizer::default(), false)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Display titles in index order.
    pub fn titles(&self) -> Vec<String> {
        self.catalog.titles()
    }

    /// Top `top_n` products most similar to `product_index`.
    pub fn recommend(&self, product_index: usize, top_n: usize) -> Result<Vec<Recommendation>> {
        recommend::recommend(&self.similarity, product_index, top_n)
    }

    /// Recommendations with titles attached, ready for presentation.
    pub fn report(&self, product_index: usize, top_n: usize) -> Result<RecommendationReport> {
        let recommendations = self.recommend(product_index, top_n)?;
        let query = self
            .catalog
            .get(product_index)
            .ok_or(LookalikeError::OutOfRange {
                index: product_index,
                len: self.len(),
            })?;

        let items = recommendations
            .iter()
            .filter_map(|r| {
                self.catalog.get(r.index).map(|p| RankedProduct {
                    index: r.index,
                    title: p.display_title().to_string(),
                    score: r.score,
                })
            })
            .collect();

        Ok(RecommendationReport {
            query_index: product_index,
            query_title: query.display_title().to_string(),
            top_n,
            items,
        })
    }
}
