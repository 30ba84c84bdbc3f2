use std::path::PathBuf;

use clap::Parser;
/// Overlay reference layers on an area of interest and summarize the regions they form
#[derive(Parser, Clone)]
pub struct Args {
    /// Path to a JSON document holding the reference layers, the area and the layer settings
    pub input: PathBuf,

    /// Path of the JSON output, written to stdout if not given
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compute the total weight of every output region
    #[arg(short, long, action)]
    pub profile: bool,

    /// Results with an area at or below this value are treated as empty, overrides the document
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Log every step of the analysis
    #[arg(short, long, action)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_cli() -> Args {
        let mut args = Args::parse();

        args.tolerance = args.tolerance.map(|t| t.max(0.));

        args
    }
}
