// Sparse term vectors and the shared vocabulary.

use serde::{Deserialize, Serialize};

/// A sparse weighted term vector. Entries are `(term index, weight)` sorted
/// by term index with no duplicates and no zero weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    /// Build from unordered entries. Zero weights are dropped and repeated
    /// term indices are summed.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(term, _)| term);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (term, weight) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == term => last.1 += weight,
                _ => merged.push((term, weight)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);
        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero terms.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of `term`, zero when absent.
    pub fn weight(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |&(t, _)| t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Scale to unit length. Zero vectors are left as they are.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// A vocabulary term with its corpus statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    /// Number of documents containing the term
    pub document_frequency: usize,
    pub idf: f64,
}

/// Vocabulary sorted lexicographically; a term's position is its index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    pub terms: Vec<Term>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of `text`, if it is in the vocabulary.
    pub fn index_of(&self, text: &str) -> Option<usize> {
        self.terms
            .binary_search_by(|t| t.text.as_str().cmp(text))
            .ok()
    }

    pub fn term(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    /// Terms ordered by descending IDF (rarest first), ties alphabetical.
    pub fn most_distinctive(&self, n: usize) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self.terms.iter().collect();
        terms.sort_by(|a, b| b.idf.total_cmp(&a.idf).then_with(|| a.text.cmp(&b.text)));
        terms.truncate(n);
        terms
    }
}

/// Output of a vectorizer: one vector per document plus the vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermMatrix {
    pub vocabulary: Vocabulary,
    /// Aligned positionally with the input documents
    pub vectors: Vec<TermVector>,
}

impl TermMatrix {
    /// Number of documents.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Mean number of non-zero terms per document.
    pub fn mean_terms_per_document(&self) -> f64 {
        if self.vectors.is_empty() {
            return 0.0;
        }
        let total: usize = self.vectors.iter().map(TermVector::nnz).sum();
        total as f64 / self.vectors.len() as f64
    }
}
