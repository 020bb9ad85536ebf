//! Core tabular data structures for StatKit
//!
//! This crate provides the typed column and data-frame types used across the
//! workspace, a pure transformation pipeline for data cleaning, and the
//! model-matrix (design) construction used by the modeling crate.

pub mod data;
pub mod design;

pub use data::{DataFrame, DataFrameBuilder, Series, SeriesValue};
pub use design::{ModelSpec, Observation};
