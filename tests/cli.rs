//! End-to-end tests of the `report-forge` binary.
//!
//! Each test runs the binary in its own temporary working directory with the
//! criteria fragment at `HTML/ExceptionCriteria.html`, and points
//! `REPORT_FORGE_WKHTMLTOPDF` at a shell script standing in for the converter.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;

use report_forge::pipeline::{DEFAULT_CRITERIA_PATH, DEFAULT_INTERMEDIATE_PATH};
use report_forge::render::CONVERTER_ENV;
use report_forge::templates;

/// Writing an executable while another test forks can fail with ETXTBSY;
/// script creation and process spawning share this lock.
static SPAWN: Mutex<()> = Mutex::new(());

const COPY_CONVERTER: &str = "#!/bin/sh\n[ \"$1\" = \"--quiet\" ] || exit 2\ncp \"$2\" \"$3\"\n";
const LOCKED_CONVERTER: &str =
    "#!/bin/sh\necho \"Error: Unable to write to destination\" >&2\nexit 1\n";

struct Workdir {
    dir: tempfile::TempDir,
}

impl Workdir {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let criteria = dir.path().join(DEFAULT_CRITERIA_PATH);
        fs::create_dir_all(criteria.parent().unwrap()).unwrap();
        fs::write(criteria, templates::criteria_fragment()).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn artifact(&self) -> PathBuf {
        self.path().join(DEFAULT_INTERMEDIATE_PATH)
    }

    fn write_report(&self, html: &str) {
        fs::write(self.path().join("report.html"), html).unwrap();
    }

    fn run(&self, converter_script: &str, args: &[&str]) -> Output {
        let _guard = SPAWN.lock().unwrap_or_else(|e| e.into_inner());
        let script = self.path().join("fake-wkhtmltopdf");
        fs::write(&script, converter_script).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        Command::new(env!("CARGO_BIN_EXE_report-forge"))
            .args(args)
            .current_dir(self.path())
            .env(CONVERTER_ENV, &script)
            .output()
            .unwrap()
    }
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn wrong_argument_count_exits_1() {
    let wd = Workdir::new();
    let out = wd.run(COPY_CONVERTER, &["report.html"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Incorrect Number of Args provided"));
}

#[test]
fn wrong_extensions_exit_1() {
    let wd = Workdir::new();
    let out = wd.run(COPY_CONVERTER, &["report.txt", "report.pdf"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("First Arg Must be an html file"));

    let out = wd.run(COPY_CONVERTER, &["report.html", "report.png"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Second arg must be a pdf file"));
    assert!(!wd.artifact().exists());
}

#[test]
fn full_run_exits_0_and_cleans_up() {
    let wd = Workdir::new();
    wd.write_report(templates::monitoring_report());

    let out = wd.run(COPY_CONVERTER, &["report.html", "report.pdf"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let pdf = wd.path().join("report.pdf");
    assert!(pdf.exists());
    assert!(fs::read_to_string(pdf)
        .unwrap()
        .contains("Azure Monthly Exception Report"));
    assert!(!wd.artifact().exists());

    let stdout = stdout(&out);
    assert!(stdout.contains("Completed HTML Edit"));
    assert!(stdout.trim_end().ends_with("DONE!"));
}

#[test]
fn locked_output_exits_1_and_keeps_artifact() {
    let wd = Workdir::new();
    wd.write_report(templates::monitoring_report());

    let out = wd.run(LOCKED_CONVERTER, &["report.html", "report.pdf"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Error converting to PDF"));
    assert!(wd.artifact().exists());
    assert!(!stdout(&out).contains("DONE!"));
}

#[test]
fn missing_section_exits_1_without_artifact() {
    let wd = Workdir::new();
    wd.write_report("<h1>Logo</h1><h2>Title</h2><p>no section</p>");

    let out = wd.run(COPY_CONVERTER, &["report.html", "report.pdf"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Error Editing HTML file"));
    assert!(!wd.artifact().exists());
    assert!(!wd.path().join("report.pdf").exists());
}

#[test]
fn missing_input_exits_1() {
    let wd = Workdir::new();
    let out = wd.run(COPY_CONVERTER, &["absent.html", "report.pdf"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Error Editing HTML file"));
}
