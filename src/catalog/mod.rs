// Product catalog: CSV loading and null-description cleanup.

pub mod loader;
pub mod models;

pub use loader::{load_catalog, LoadOptions};
pub use models::{Catalog, Product};
