//! bagge-rs: a bagged regression forest pipeline for the house-prices competition.
//!
//! This crate implements the classic load/clean/fit/submit recipe as a small
//! library: CSV tables bound to a fixed predictor schema, mean imputation of
//! missing cells, a bootstrap-aggregated regression forest trained on the
//! log-transformed sale price, and an `Id,SalePrice` submission writer.
//!
//! # Example
//!
//! ```ignore
//! use bagge_rs::pipeline::{self, PipelineConfig};
//! use bagge_rs::training::ForestParams;
//!
//! let config = PipelineConfig {
//!     params: ForestParams { n_trees: 500, mtry: 6, ..Default::default() },
//!     ..Default::default()
//! };
//! pipeline::run("train.csv", "test.csv", "submission.csv", &config)?;
//! ```

pub mod clean;
pub mod data;
pub mod pipeline;
pub mod repr;
pub mod training;
