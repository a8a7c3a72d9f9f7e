// TF-IDF vectorizer.
//
// Each description is one document. Term frequency is the raw count of a
// token in the document; inverse document frequency is smoothed as if an
// extra document contained every term once:
//
//   idf(t) = ln((1 + n) / (1 + df(t))) + 1
//
// so no term ever gets a zero weight. Vectors are L2-normalized, which makes
// cosine similarity a plain dot product downstream.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::info;

use super::tokenize::Tokenizer;
use super::traits::Vectorizer;
use super::vectors::{Term, TermMatrix, TermVector, Vocabulary};
use crate::error::{LookalikeError, Result};

/// TF-IDF vectorizer with English stop-word removal.
pub struct TfIdfVectorizer {
    tokenizer: Tokenizer,
    /// Drop terms found in fewer than this many documents
    min_df: usize,
    /// Drop terms found in more than this fraction of documents
    max_df: f64,
    smooth_idf: bool,
    /// Use `1 + ln(count)` instead of the raw count
    sublinear_tf: bool,
    normalize: bool,
}

impl TfIdfVectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            min_df: 1,
            max_df: 1.0,
            smooth_idf: true,
            sublinear_tf: false,
            normalize: true,
        }
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    pub fn with_smooth_idf(mut self, smooth: bool) -> Self {
        self.smooth_idf = smooth;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    fn idf(&self, n_docs: usize, df: usize) -> f64 {
        let (n, df) = (n_docs as f64, df as f64);
        if self.smooth_idf {
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        } else {
            (n / df).ln() + 1.0
        }
    }

    fn tf(&self, count: usize) -> f64 {
        if self.sublinear_tf {
            1.0 + (count as f64).ln()
        } else {
            count as f64
        }
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(Tokenizer::english())
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn fit_transform(&self, documents: &[String]) -> Result<TermMatrix> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenizer.tokenize(doc))
            .collect();

        // Document frequency per term; BTreeMap keeps the vocabulary sorted
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len();
        let max_count = self.max_df * n_docs as f64;

        let terms: Vec<Term> = doc_freq
            .into_iter()
            .filter(|&(_, df)| df >= self.min_df && df as f64 <= max_count)
            .map(|(text, df)| Term {
                text: text.to_string(),
                document_frequency: df,
                idf: self.idf(n_docs, df),
            })
            .collect();

        if terms.is_empty() {
            return Err(LookalikeError::EmptyVocabulary);
        }

        let index: HashMap<&str, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.text.as_str(), i))
            .collect();

        let vectors: Vec<TermVector> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, usize> = HashMap::new();
                for token in tokens {
                    if let Some(&i) = index.get(token.as_str()) {
                        *counts.entry(i).or_insert(0) += 1;
                    }
                }
                let entries = counts
                    .into_iter()
                    .map(|(i, count)| (i, self.tf(count) * terms[i].idf))
                    .collect();
                let mut vector = TermVector::from_entries(entries);
                if self.normalize {
                    vector.normalize();
                }
                vector
            })
            .collect();

        let empty_docs = vectors.iter().filter(|v| v.is_empty()).count();
        info!(
            documents = n_docs,
            vocabulary = terms.len(),
            empty_docs,
            "Vectorized descriptions with TF-IDF"
        );

        Ok(TermMatrix {
            vocabulary: Vocabulary { terms },
            vectors,
        })
    }
}
