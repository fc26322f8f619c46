//! Command-line converter for KiCad worksheet templates.
//!
//! Usage:
//!   wks2svg <input>... [-o <dir>] [--page <code>]
//!
//! Inputs are `.kicad_wks` files or directories to scan for them. Each
//! document converts independently: a template that fails to convert is
//! reported and the run continues with the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, Command};
use miette::{IntoDiagnostic, Report, WrapErr};

use wks2svg::{PageSize, RenderOptions, pages};

fn main() -> ExitCode {
    let matches = Command::new("wks2svg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert KiCad worksheet templates to TechDraw compatible SVG")
        .arg(
            Arg::new("inputs")
                .help("Worksheet files or directories to scan for *.kicad_wks")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('o')
                .help("Directory the .svg files are written to")
                .default_value("out"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Page size code override (e.g. A4, A4-portrait); default is the file-stem prefix"),
        )
        .get_matches();

    let inputs: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let out_dir = PathBuf::from(matches.get_one::<String>("out-dir").map(String::as_str).unwrap_or("out"));
    let page_override = matches.get_one::<String>("page").map(String::as_str);

    let mut failures = 0usize;
    for input in &inputs {
        let path = Path::new(input);
        if path.is_dir() {
            match scan_directory(path) {
                Ok(files) => {
                    for file in files {
                        failures += usize::from(!convert_and_report(&file, &out_dir, page_override));
                    }
                }
                Err(err) => {
                    eprintln!("{err:?}");
                    failures += 1;
                }
            }
        } else {
            failures += usize::from(!convert_and_report(path, &out_dir, page_override));
        }
    }

    if failures > 0 {
        eprintln!("{failures} document(s) failed to convert");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Worksheet templates in a directory whose filename resolves to a known
/// page size. Files with an unrecognized size code are skipped with a note,
/// matching the upstream template set where only some stock sizes convert.
fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, Report> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry.into_diagnostic()?.path();
        if path.extension().is_none_or(|ext| ext != "kicad_wks") {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if pages::page_size(pages::code_from_stem(stem)).is_none() {
            eprintln!("skipping {}: unrecognized page size code", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Convert one template, printing the outcome. Returns false on failure.
fn convert_and_report(path: &Path, out_dir: &Path, page_override: Option<&str>) -> bool {
    match convert_file(path, out_dir, page_override) {
        Ok(out_path) => {
            println!("Successfully exported to {}", out_path.display());
            true
        }
        Err(err) => {
            eprintln!("{}: {err:?}", path.display());
            false
        }
    }
}

fn convert_file(
    path: &Path,
    out_dir: &Path,
    page_override: Option<&str>,
) -> Result<PathBuf, Report> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| miette::miette!("{} has no usable file name", path.display()))?;
    let code = page_override.unwrap_or_else(|| pages::code_from_stem(stem));
    let page: PageSize = pages::page_size(code)
        .ok_or_else(|| miette::miette!("no page size known for code `{code}`"))?;

    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;

    let name = path.display().to_string();
    let svg = wks2svg::wks_to_svg_named(&name, &source, page, RenderOptions::default())?;

    fs::create_dir_all(out_dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot create {}", out_dir.display()))?;
    let out_path = out_dir.join(format!("{stem}.svg"));
    fs::write(&out_path, svg)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot write {}", out_path.display()))?;
    Ok(out_path)
}
