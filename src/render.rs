//! Render adapter – hands the intermediate HTML artifact to an external
//! HTML → PDF converter and removes the artifact once the PDF exists.
//!
//! The converter is a synchronous, all-or-nothing boundary: it either leaves
//! a non-empty PDF at the destination or reports failure. On failure the
//! artifact is left in place for inspection.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::RenderError;

/// Environment variable that overrides the converter program.
pub const CONVERTER_ENV: &str = "REPORT_FORGE_WKHTMLTOPDF";

/// Program looked up on `PATH` when [`CONVERTER_ENV`] is unset.
pub const DEFAULT_CONVERTER: &str = "wkhtmltopdf";

/// An HTML file → PDF file converter.
pub trait Converter {
    /// Convert `source` into a PDF at `dest`.
    fn convert(&self, source: &Path, dest: &Path) -> Result<(), RenderError>;
}

/// Converter backed by the `wkhtmltopdf` command-line tool.
///
/// Invoked as `<program> [options] --quiet <source> <dest>`.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    program: PathBuf,
    options: Vec<OsString>,
}

impl Wkhtmltopdf {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            options: Vec::new(),
        }
    }

    /// Extra arguments placed before `--quiet`.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Resolve the converter from [`CONVERTER_ENV`], falling back to
    /// [`DEFAULT_CONVERTER`] on `PATH`.
    pub fn locate() -> Result<Self, RenderError> {
        if let Some(program) = env::var_os(CONVERTER_ENV).filter(|p| !p.is_empty()) {
            log::debug!("converter from {CONVERTER_ENV}: {program:?}");
            return Ok(Self::new(program));
        }
        which::which(DEFAULT_CONVERTER)
            .map(Self::new)
            .map_err(|_| RenderError::ConverterNotFound {
                program: DEFAULT_CONVERTER.to_string(),
            })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Converter for Wkhtmltopdf {
    fn convert(&self, source: &Path, dest: &Path) -> Result<(), RenderError> {
        if !source.is_file() {
            return Err(RenderError::MissingSource {
                path: source.to_path_buf(),
            });
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.options).arg("--quiet").arg(source).arg(dest);
        log::debug!("running {cmd:?}");

        let output = cmd.output().map_err(|e| RenderError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;
        if !output.status.success() {
            return Err(RenderError::ConverterFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match fs::metadata(dest) {
            Ok(meta) if meta.len() > 0 => Ok(()),
            _ => Err(RenderError::EmptyOutput {
                path: dest.to_path_buf(),
            }),
        }
    }
}

/// Render `serialized` to `output`, then delete `serialized`.
///
/// The artifact is only removed after the converter succeeds; a failed
/// removal fails the render.
pub fn render(
    converter: &dyn Converter,
    serialized: &Path,
    output: &Path,
) -> Result<(), RenderError> {
    converter.convert(serialized, output)?;
    log::info!("wrote '{}'", output.display());

    fs::remove_file(serialized).map_err(|e| RenderError::Cleanup {
        path: serialized.to_path_buf(),
        source: e,
    })?;
    log::debug!("removed intermediate artifact '{}'", serialized.display());
    Ok(())
}
