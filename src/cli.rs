//! Command-line validation.
//!
//! The command takes exactly two positional arguments: the report
//! (`*.html`) and the PDF to write (`*.pdf`).

use std::path::PathBuf;

use crate::error::ArgumentError;

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Invocation {
    /// Validate `args` as produced by `std::env::args()` (program name first).
    pub fn from_args<I, S>(args: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().skip(1).map(Into::into).collect();
        let [input, output] = <[String; 2]>::try_from(args)
            .map_err(|args| ArgumentError::WrongCount { count: args.len() })?;

        if !input.ends_with(".html") {
            return Err(ArgumentError::NotHtml { arg: input });
        }
        if !output.ends_with(".pdf") {
            return Err(ArgumentError::NotPdf { arg: output });
        }
        Ok(Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        })
    }
}

pub fn print_usage(prog: &str) {
    eprintln!("report-forge – monitoring report to exception-report PDF");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <input.html> <output.pdf>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  REPORT_FORGE_WKHTMLTOPDF   converter program (default: wkhtmltopdf on PATH)");
    eprintln!("  RUST_LOG                   log level, e.g. debug");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_html_and_pdf() {
        let inv = Invocation::from_args(["forge", "in/report.html", "out/report.pdf"]).unwrap();
        assert_eq!(inv.input, PathBuf::from("in/report.html"));
        assert_eq!(inv.output, PathBuf::from("out/report.pdf"));
    }

    #[test]
    fn rejects_wrong_count() {
        assert_eq!(
            Invocation::from_args(["forge", "a.html"]),
            Err(ArgumentError::WrongCount { count: 1 })
        );
        assert_eq!(
            Invocation::from_args(["forge", "a.html", "b.pdf", "c"]),
            Err(ArgumentError::WrongCount { count: 3 })
        );
        assert_eq!(
            Invocation::from_args(["forge"]),
            Err(ArgumentError::WrongCount { count: 0 })
        );
    }

    #[test]
    fn rejects_wrong_extensions() {
        assert!(matches!(
            Invocation::from_args(["forge", "a.htm", "b.pdf"]),
            Err(ArgumentError::NotHtml { .. })
        ));
        assert!(matches!(
            Invocation::from_args(["forge", "a.html", "b.PDF"]),
            Err(ArgumentError::NotPdf { .. })
        ));
    }

    #[test]
    fn input_checked_before_output() {
        assert!(matches!(
            Invocation::from_args(["forge", "a.txt", "b.txt"]),
            Err(ArgumentError::NotHtml { .. })
        ));
    }
}
