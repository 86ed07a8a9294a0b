//! report-forge – turn a monitoring HTML report into the exception-report PDF.
//!
//! Usage:
//!   report-forge <input.html> <output.pdf>
//!
//! The edited HTML is staged at `HTML/editedHTML.html` and the criteria
//! fragment is read from `HTML/ExceptionCriteria.html`, both relative to the
//! working directory.

use std::{env, process};

use report_forge::cli::{print_usage, Invocation};
use report_forge::pipeline::{Pipeline, PipelineConfig};
use report_forge::render::Wkhtmltopdf;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("report-forge");

    let invocation = match Invocation::from_args(args.iter().cloned()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("{e}");
            print_usage(prog);
            process::exit(1);
        }
    };
    println!("{}", invocation.input.display());
    println!("{}", invocation.output.display());

    let config = PipelineConfig::default();

    // The converter is only resolved once the edit stage has succeeded.
    let transformed = match report_forge::transform(&config, &invocation.input) {
        Ok(t) => t,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error Editing HTML file");
            process::exit(1);
        }
    };
    println!("Completed HTML Edit");

    let rendered = Wkhtmltopdf::locate().and_then(|converter| {
        Pipeline::new(config, converter).render(&transformed.artifact, &invocation.output)
    });
    if let Err(e) = rendered {
        log::error!("{e}");
        eprintln!("Error converting to PDF, please make sure html file exists and PDF is not open");
        process::exit(1);
    }
    println!("DONE!");
}
