use reptile::{PipelineBuilder, PipelineError, PreparedDocument, Unit};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A simple CLI to export a prepared report (JSON) to PDF.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (unit, paths) = match args.get(1).map(String::as_str) {
        Some("--mm") => (Unit::Millimeter, &args[2..]),
        _ => (Unit::Point, &args[1..]),
    };
    if paths.len() != 2 {
        eprintln!("Exports a prepared report to PDF.");
        eprintln!();
        eprintln!(
            "Usage: {} [--mm] <path/to/prepared.json> <path/to/output.pdf>",
            args[0]
        );
        eprintln!();
        eprintln!("  --mm   lengths in the prepared report are millimeters (default: points)");
        std::process::exit(1);
    }

    let input_path = &paths[0];
    let output_path = &paths[1];

    println!("Loading prepared report from {}", input_path);
    let document = PreparedDocument::from_reader(BufReader::new(File::open(input_path)?))?;

    let title = Path::new(input_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let pipeline = PipelineBuilder::new()
        .with_unit(unit)
        .with_pdf_title(title)
        .build();

    println!("Exporting to {}...", output_path);
    let report = pipeline.export_pdf_file(&document, output_path)?;

    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }
    println!(
        "Successfully wrote {} page(s) to {}",
        report.pages_committed, output_path
    );
    Ok(())
}
