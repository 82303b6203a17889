//! Ingestion and analysis pipeline for the Operations Load Diagnostic.
//!
//! Responsible for normalizing raw input text into inbound records,
//! selecting the lookback window, classifying the selected records,
//! aggregating workload metrics and producing the final [`pipeline::Report`].

pub mod advisor;
pub mod aggregate;
pub mod normalizer;
pub mod pipeline;
pub mod window;

pub use opsload_core as core;
