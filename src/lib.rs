//! # report-forge – monitoring report → exception-report PDF
//!
//! Turns the machine-generated monthly monitoring report into the customised
//! exception report. The pipeline stages are:
//!
//! 1. **Parse** – HTML file → arena DOM tree ([`dom`])
//! 2. **Edit** – retitle, drop ping graphs, prune tables, insert the
//!    exception criteria, swap the logo ([`edits`], [`select`])
//! 3. **Serialise** – indented HTML written to the intermediate artifact
//!    ([`serialize`], [`pipeline`])
//! 4. **Render** – external converter produces the PDF and the artifact is
//!    removed ([`render`])

pub mod cli;
pub mod dom;
pub mod edits;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod select;
pub mod serialize;
pub mod templates;

// Re-exports for convenience
pub use error::{ArgumentError, DocumentEditError, RenderError, RunError};
pub use pipeline::{transform, transform_html, Pipeline, PipelineConfig, TransformOutput};
pub use render::{render, Converter, Wkhtmltopdf};
