//! Pipeline – ties together parsing, editing, serialisation, and rendering.
//!
//! A run has two stages that commit in order:
//!
//! 1. **Transform** – parse the report, apply the edits, write the
//!    intermediate artifact ([`Pipeline::transform`]).
//! 2. **Render** – convert the artifact to PDF and delete it
//!    ([`Pipeline::render`]).
//!
//! The render stage is only reached when the transform stage succeeded.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::dom::{parse_html, Document};
use crate::edits::{apply_all, standard_edits, EditSummary};
use crate::error::{DocumentEditError, RenderError, RunError};
use crate::render::{render, Converter};
use crate::serialize::to_pretty_html;

/// Default location of the exception-criteria fragment.
pub const DEFAULT_CRITERIA_PATH: &str = "HTML/ExceptionCriteria.html";

/// Default location of the intermediate artifact.
pub const DEFAULT_INTERMEDIATE_PATH: &str = "HTML/editedHTML.html";

/// File locations used by a run. Relative paths resolve against the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Exception-criteria fragment inserted after the first `section`.
    pub criteria_path: PathBuf,
    /// Where the edited HTML is written between the two stages.
    pub intermediate_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            criteria_path: PathBuf::from(DEFAULT_CRITERIA_PATH),
            intermediate_path: PathBuf::from(DEFAULT_INTERMEDIATE_PATH),
        }
    }
}

impl PipelineConfig {
    /// Config with both resource paths under `dir`, using the default
    /// relative layout.
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            criteria_path: dir.join(DEFAULT_CRITERIA_PATH),
            intermediate_path: dir.join(DEFAULT_INTERMEDIATE_PATH),
        }
    }
}

/// Result of the transform stage.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Path of the written intermediate artifact.
    pub artifact: PathBuf,
    /// What each edit changed.
    pub summary: EditSummary,
}

/// Edit-then-render driver for one report.
pub struct Pipeline<C: Converter> {
    config: PipelineConfig,
    converter: C,
}

impl<C: Converter> Pipeline<C> {
    pub fn new(config: PipelineConfig, converter: C) -> Self {
        Self { config, converter }
    }

    /// Stage 1: edit the report at `input` and write the intermediate artifact.
    pub fn transform(&self, input: &Path) -> Result<TransformOutput, DocumentEditError> {
        transform(&self.config, input)
    }

    /// Stage 2: convert the artifact to `output` and remove it.
    pub fn render(&self, artifact: &Path, output: &Path) -> Result<(), RenderError> {
        render(&self.converter, artifact, output)
    }

    /// Both stages; the render stage only runs if the transform succeeded.
    pub fn run(&self, input: &Path, output: &Path) -> Result<EditSummary, RunError> {
        let transformed = self.transform(input)?;
        self.render(&transformed.artifact, output)?;
        Ok(transformed.summary)
    }
}

/// Read the report at `input`, apply the standard edits, and write the
/// result to `config.intermediate_path`.
///
/// Nothing is written unless every edit succeeds.
pub fn transform(
    config: &PipelineConfig,
    input: &Path,
) -> Result<TransformOutput, DocumentEditError> {
    let mut doc = load_report(input)?;
    let criteria = load_criteria(&config.criteria_path)?;

    let edits = standard_edits(&doc, criteria);
    let summary = apply_all(&mut doc, &edits)?;
    log::debug!("edit summary: {}", summary.to_json());

    let html = to_pretty_html(&doc);
    drop(doc);
    write_artifact(&config.intermediate_path, html.as_bytes())?;
    log::info!(
        "wrote intermediate artifact '{}' ({} bytes)",
        config.intermediate_path.display(),
        html.len()
    );

    Ok(TransformOutput {
        artifact: config.intermediate_path.clone(),
        summary,
    })
}

/// Transform `html` in memory and return the serialised result.
pub fn transform_html(html: &str, criteria_html: &str) -> Result<String, DocumentEditError> {
    let mut doc = parse_html(html);
    let edits = standard_edits(&doc, parse_html(criteria_html));
    apply_all(&mut doc, &edits)?;
    Ok(to_pretty_html(&doc))
}

fn load_report(path: &Path) -> Result<Document, DocumentEditError> {
    let bytes = fs::read(path).map_err(|e| DocumentEditError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let html = String::from_utf8(bytes).map_err(|e| DocumentEditError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!("parsing '{}' ({} bytes)", path.display(), html.len());
    Ok(parse_html(&html))
}

fn load_criteria(path: &Path) -> Result<Document, DocumentEditError> {
    let html = fs::read_to_string(path).map_err(|e| DocumentEditError::CriteriaUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_html(&html))
}

/// Replace `path` with `bytes` in one step: write a sibling temp file, then
/// rename it over the target.
fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), DocumentEditError> {
    let write_err = |e: io::Error| DocumentEditError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    struct NoConverter;

    impl Converter for NoConverter {
        fn convert(&self, _source: &Path, _dest: &Path) -> Result<(), RenderError> {
            panic!("converter must not run");
        }
    }

    fn setup() -> (tempfile::TempDir, PipelineConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::rooted_at(dir.path());
        fs::create_dir_all(config.criteria_path.parent().unwrap()).unwrap();
        fs::write(&config.criteria_path, templates::criteria_fragment()).unwrap();
        (dir, config)
    }

    #[test]
    fn transform_writes_artifact() {
        let (dir, config) = setup();
        let input = dir.path().join("report.html");
        fs::write(&input, templates::monitoring_report()).unwrap();

        let out = transform(&config, &input).unwrap();
        assert_eq!(out.artifact, config.intermediate_path);
        let html = fs::read_to_string(&out.artifact).unwrap();
        assert!(html.contains(crate::edits::REPORT_TITLE));
        assert_eq!(out.summary.edits.len(), 5);
    }

    #[test]
    fn missing_section_writes_nothing_and_skips_render() {
        let (dir, config) = setup();
        let input = dir.path().join("report.html");
        fs::write(&input, "<h1>l</h1><h2>t</h2>").unwrap();

        let pipeline = Pipeline::new(config.clone(), NoConverter);
        let err = pipeline.run(&input, &dir.path().join("o.pdf")).unwrap_err();
        assert!(matches!(
            err,
            RunError::Edit(DocumentEditError::MissingNode { .. })
        ));
        assert!(!config.intermediate_path.exists());
    }

    #[test]
    fn unreadable_input_is_read_error() {
        let (dir, config) = setup();
        let err = transform(&config, &dir.path().join("absent.html")).unwrap_err();
        assert!(matches!(err, DocumentEditError::Read { .. }));
    }

    #[test]
    fn non_utf8_input_is_parse_error() {
        let (dir, config) = setup();
        let input = dir.path().join("report.html");
        fs::write(&input, [0x3c, 0x70, 0x3e, 0xff, 0xfe]).unwrap();
        let err = transform(&config, &input).unwrap_err();
        assert!(matches!(err, DocumentEditError::Parse { .. }));
    }

    #[test]
    fn missing_criteria_fragment_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::rooted_at(dir.path());
        let input = dir.path().join("report.html");
        fs::write(&input, templates::monitoring_report()).unwrap();
        let err = transform(&config, &input).unwrap_err();
        assert!(matches!(err, DocumentEditError::CriteriaUnavailable { .. }));
    }

    #[test]
    fn artifact_is_overwritten() {
        let (dir, config) = setup();
        fs::write(&config.intermediate_path, "stale content").unwrap();
        let input = dir.path().join("report.html");
        fs::write(&input, templates::monitoring_report()).unwrap();

        transform(&config, &input).unwrap();
        let html = fs::read_to_string(&config.intermediate_path).unwrap();
        assert!(!html.contains("stale content"));
    }

    #[test]
    fn transform_html_in_memory() {
        let html =
            transform_html(templates::monitoring_report(), templates::criteria_fragment()).unwrap();
        assert!(html.contains("Exception Criteria"));
        assert!(!html.contains("Ping Monitor"));
    }
}
