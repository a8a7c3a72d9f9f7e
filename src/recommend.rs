// Ranking products by similarity to a query product.
//
// Pure computation: takes one row of the similarity matrix and returns the
// best matches. Printing lives in `output::terminal`.

use serde::{Deserialize, Serialize};

use crate::error::{LookalikeError, Result};
use crate::similarity::SimilarityMatrix;

/// Default number of recommendations per query.
pub const DEFAULT_TOP_N: usize = 5;

/// A recommended product and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub index: usize,
    pub score: f64,
}

/// A recommendation with the product's title resolved, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub index: usize,
    pub title: String,
    pub score: f64,
}

/// Everything needed to present one query's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub query_index: usize,
    pub query_title: String,
    /// The number of results asked for (may exceed `items.len()`)
    pub top_n: usize,
    pub items: Vec<RankedProduct>,
}

/// Rank every other product by similarity to `product_index` and keep the
/// best `top_n`.
///
/// Scores are descending; equal scores keep ascending index order. The query
/// product never appears in its own results, even when another product has
/// an identical description. Asking for more results than there are other
/// products returns all of them.
pub fn recommend(
    similarity: &SimilarityMatrix,
    product_index: usize,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    let row = similarity
        .row(product_index)
        .ok_or(LookalikeError::OutOfRange {
            index: product_index,
            len: similarity.len(),
        })?;

    Ok(rank_row(row, product_index, top_n))
}

/// Rank a single similarity row, excluding `exclude`.
pub fn rank_row(row: &[f64], exclude: usize, top_n: usize) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = row
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .map(|(index, &score)| Recommendation { index, score })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.index.cmp(&b.index))
    });
    ranked.truncate(top_n);
    ranked
}

/// Indices of a recommendation list, in rank order.
pub fn indices(recommendations: &[Recommendation]) -> Vec<usize> {
    recommendations.iter().map(|r| r.index).collect()
}
