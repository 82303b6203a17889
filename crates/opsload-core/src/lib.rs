//! Core domain logic for the Operations Load Diagnostic.
//!
//! Holds the shared data model, the keyword rule tables, the heuristic
//! classifier, the timestamp fallback parser, the error taxonomy and the
//! CLI settings layer. Everything here is pure computation over in-memory
//! values; ingestion and the pipeline live in `opsload-data`.

pub mod classifier;
pub mod error;
pub mod models;
pub mod rules;
pub mod settings;
pub mod timestamp;
