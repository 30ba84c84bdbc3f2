mod parser;

use overlay_analysis::analysis::{AnalysisDocument, OutputGraphic};
use overlay_analysis::{run_request, Result};
use parser::Args;

use log::LevelFilter;
use serde::Serialize;
use std::{fs, io::Write, time::Instant};

#[derive(Serialize)]
struct Output {
    graphics: Vec<OutputGraphic>,
}

fn main() {
    let args = Args::parse_cli();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let now = Instant::now();

    let json = fs::read_to_string(&args.input)?;
    let (source, mut request) = AnalysisDocument::from_json(&json)?.into_parts();

    if args.profile {
        request.parameters.profile_mode = true;
    }
    if let Some(tolerance) = args.tolerance {
        request.parameters.area_tolerance = tolerance;
    }

    let graphics = run_request(&source, &request)?;
    log::info!(
        "{} output regions in {:.2?}",
        graphics.len(),
        now.elapsed()
    );

    let output = serde_json::to_string_pretty(&Output { graphics })?;
    match &args.output {
        Some(path) => fs::write(path, output)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
