//! resume-forge – command-line resume JSON → PDF renderer.
//!
//! Usage:
//!   resume-forge <resume.json> [output.pdf] [--design NAME] [--title "My CV"]
//!                [--metrics-font regular.ttf] [--bold-font bold.ttf]
//!                [--layout-json layout.json]
//!   resume-forge --sample [output.pdf] [--design NAME]
//!
//! If `output.pdf` is omitted the PDF is written next to the input file with
//! the same stem (e.g. `jane.json` → `jane.pdf`).

use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

use resume_forge::fonts::{HeuristicMetrics, TextMeasure, TtfMetrics};
use resume_forge::pipeline::{generate_pdf_with_metrics, PipelineConfig};
use resume_forge::{templates, DesignVariant, ResumeData};

struct Args {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    design: DesignVariant,
    title: Option<String>,
    metrics_font: Option<PathBuf>,
    bold_font: Option<PathBuf>,
    layout_json: Option<PathBuf>,
    sample: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let parsed = parse_args(&args);

    let data = if parsed.sample {
        templates::sample_resume()
    } else {
        let input = match &parsed.input_path {
            Some(p) => p,
            None => {
                eprintln!("Error: no input file specified.");
                print_usage(&args[0]);
                process::exit(1);
            }
        };
        let json = fs::read_to_string(input).unwrap_or_else(|e| {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        });
        ResumeData::from_json(&json).unwrap_or_else(|e| {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        })
    };

    // Default output: same directory + same stem as input, but with .pdf
    let output = parsed.output_path.clone().unwrap_or_else(|| {
        let mut o = parsed
            .input_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("sample"));
        o.set_extension("pdf");
        o
    });

    let measure: Box<dyn TextMeasure> = match &parsed.metrics_font {
        Some(path) => Box::new(load_metrics(path, parsed.bold_font.as_deref())),
        None => Box::new(HeuristicMetrics::default()),
    };

    let config = PipelineConfig {
        title: parsed.title.clone(),
        ..PipelineConfig::default()
    };

    let pdf = match generate_pdf_with_metrics(&data, parsed.design, &config, measure.as_ref()) {
        Ok(pdf) => pdf,
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            process::exit(1);
        }
    };

    if let Some(path) = &parsed.layout_json {
        if let Err(e) = fs::write(path, pdf.layout.to_json()) {
            eprintln!("Error writing '{}': {e}", path.display());
            process::exit(1);
        }
    }

    // Create output directory if necessary.
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating output directory: {e}");
                process::exit(1);
            }
        }
    }
    if let Err(e) = fs::write(&output, &pdf.bytes) {
        eprintln!("Error writing '{}': {e}", output.display());
        process::exit(1);
    }
    let pages = pdf.page_count();
    eprintln!(
        "Wrote '{}' ({} design, {} bytes, {} page{})",
        output.display(),
        parsed.design,
        pdf.bytes.len(),
        pages,
        if pages == 1 { "" } else { "s" }
    );
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args {
        input_path: None,
        output_path: None,
        design: DesignVariant::default(),
        title: None,
        metrics_font: None,
        bold_font: None,
        layout_json: None,
        sample: false,
    };
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--design" | "-d" => {
                parsed.design = DesignVariant::from_selector(&flag_value(&mut iter, arg, &args[0]))
            }
            "--title" | "-t" => parsed.title = Some(flag_value(&mut iter, arg, &args[0])),
            "--metrics-font" => {
                parsed.metrics_font = Some(PathBuf::from(flag_value(&mut iter, arg, &args[0])))
            }
            "--bold-font" => {
                parsed.bold_font = Some(PathBuf::from(flag_value(&mut iter, arg, &args[0])))
            }
            "--layout-json" => {
                parsed.layout_json = Some(PathBuf::from(flag_value(&mut iter, arg, &args[0])))
            }
            "--sample" => parsed.sample = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                // With --sample the only positional argument is the output.
                let slot = if parsed.sample { positional + 1 } else { positional };
                match slot {
                    0 => parsed.input_path = Some(PathBuf::from(path)),
                    1 => parsed.output_path = Some(PathBuf::from(path)),
                    _ => {
                        eprintln!("Unexpected argument: {path}");
                        print_usage(&args[0]);
                        process::exit(1);
                    }
                }
                positional += 1;
            }
        }
    }
    parsed
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str, prog: &str) -> String {
    match iter.next() {
        Some(v) => v.clone(),
        None => {
            eprintln!("Missing value for {flag}");
            print_usage(prog);
            process::exit(1);
        }
    }
}

fn load_metrics(regular: &Path, bold: Option<&Path>) -> TtfMetrics {
    let read = |path: &Path| {
        fs::read(path).unwrap_or_else(|e| {
            eprintln!("Error reading font '{}': {e}", path.display());
            process::exit(1);
        })
    };
    TtfMetrics::from_bytes(read(regular), bold.map(read)).unwrap_or_else(|e| {
        eprintln!("Error loading metrics font: {e}");
        process::exit(1);
    })
}

fn print_usage(prog: &str) {
    eprintln!("resume-forge – resume JSON to PDF renderer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <resume.json> [output.pdf] [--design NAME] [--title \"My CV\"]");
    eprintln!("  {prog} --sample [output.pdf] [--design NAME]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <resume.json>   Resume data (camelCase keys: personalInfo, summary, experience, education, skills)");
    eprintln!("  [output.pdf]    Output path  (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --design, -d    classic | modern-sidebar | modern-two-column | modern-minimal (default: modern-sidebar)");
    eprintln!("  --title, -t     Document title in PDF metadata (default: \"<name> - Resume\")");
    eprintln!("  --metrics-font  TrueType font used to measure text instead of the width heuristic");
    eprintln!("  --bold-font     Bold TrueType face for measurement (with --metrics-font)");
    eprintln!("  --layout-json   Also write the computed page layout as JSON");
    eprintln!("  --sample        Render the built-in sample resume");
    eprintln!("  --help          Print this message");
}
