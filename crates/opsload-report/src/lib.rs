//! Report rendering and export.
//!
//! Renders a [`opsload_data::pipeline::Report`] to markdown and HTML and
//! writes the rendered documents to disk. The renderers are pure; only
//! [`writer`] touches the filesystem.

pub mod html;
pub mod markdown;
pub mod rows;
pub mod writer;
