// Vectorizer trait: swap-ready abstraction.
//
// The recommender only needs one sparse vector per description. TF-IDF is
// the default, but a different weighting scheme can slot in here without
// touching the similarity or ranking code.

use super::vectors::TermMatrix;
use crate::error::Result;

/// Trait for turning a corpus of descriptions into term vectors.
pub trait Vectorizer {
    /// Learn the vocabulary from `documents` and return one vector per document.
    fn fit_transform(&self, documents: &[String]) -> Result<TermMatrix>;
}
