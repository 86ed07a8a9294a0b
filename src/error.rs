//! Error types for report-forge.
//!
//! One error type per stage:
//!
//! * [`ArgumentError`] – the command line is malformed; nothing has run yet.
//! * [`DocumentEditError`] – the report could not be read, parsed, edited, or
//!   written to the intermediate artifact.
//! * [`RenderError`] – the converter could not turn the intermediate artifact
//!   into the PDF, or the artifact could not be removed afterwards.
//!
//! Every variant is terminal. [`RunError`] wraps the two stage errors for
//! callers driving the whole run through [`crate::pipeline::Pipeline::run`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Malformed command-line invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Exactly two positional arguments are required.
    #[error("Incorrect Number of Args provided")]
    WrongCount { count: usize },

    /// First argument does not end in `.html`.
    #[error("First Arg Must be an html file")]
    NotHtml { arg: String },

    /// Second argument does not end in `.pdf`.
    #[error("Second arg must be a pdf file")]
    NotPdf { arg: String },
}

/// Failure of the document transformer.
#[derive(Debug, Error)]
pub enum DocumentEditError {
    /// The input report could not be read.
    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The input report is not decodable HTML.
    #[error("failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The exception-criteria fragment could not be loaded.
    #[error("exception criteria fragment '{path}' unavailable: {source}")]
    CriteriaUnavailable { path: PathBuf, source: io::Error },

    /// An edit operation's target node is absent.
    #[error("{operation}: no element matches `{selector}`")]
    MissingNode {
        operation: &'static str,
        selector: String,
    },

    /// The intermediate artifact could not be written.
    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Failure of the render adapter.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The intermediate artifact is not on disk.
    #[error("intermediate artifact '{path}' does not exist")]
    MissingSource { path: PathBuf },

    /// No converter program could be located.
    #[error("converter '{program}' not found (set REPORT_FORGE_WKHTMLTOPDF or install it on PATH)")]
    ConverterNotFound { program: String },

    /// The converter process could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn { program: PathBuf, source: io::Error },

    /// The converter ran and reported failure.
    #[error("converter exited with {}: {stderr}", describe_status(.status))]
    ConverterFailed { status: Option<i32>, stderr: String },

    /// The converter claimed success but produced no PDF.
    #[error("converter produced no output at '{path}'")]
    EmptyOutput { path: PathBuf },

    /// The PDF was written but the intermediate artifact could not be removed.
    #[error("failed to remove intermediate artifact '{path}': {source}")]
    Cleanup { path: PathBuf, source: io::Error },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

/// Failure of a full edit-then-render run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Edit(#[from] DocumentEditError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
