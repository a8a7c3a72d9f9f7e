// Lookalike: content-based product recommendations
//
// This is the library root. Each module is one stage of the pipeline:
// catalog → text → similarity → recommend, with charts and output on top.

pub mod catalog;
pub mod charts;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod recommend;
pub mod similarity;
pub mod text;

pub use error::{LookalikeError, Result};
pub use pipeline::Pipeline;
