// Text vectorization: tokenization and TF-IDF term vectors.

pub mod tfidf;
pub mod tokenize;
pub mod traits;
pub mod vectors;
