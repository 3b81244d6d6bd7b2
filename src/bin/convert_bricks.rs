//! Brick data converter: rewrites any supported brick JSON into one format.
//!
//! Usage: cargo run --release --bin convert_bricks -- [OPTIONS]
//!
//! Options:
//!   --input <FILE>     Source JSON (viewer array, viewer layers, editor array or export)
//!   --output <FILE>    Destination file
//!   --format <FORMAT>  viewer | layers | editor (default: editor)
//!   --grid <SIZE>      Grid size recorded in editor exports (default: 1.0)

use std::path::PathBuf;
use std::time::Instant;

use brickyard::core::{logging, Result};
use brickyard::format::{
    export_viewer_json, export_viewer_layers_json, parse_brick_data, EditorExport,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Viewer,
    Layers,
    Editor,
}

impl OutputFormat {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "viewer" => Some(Self::Viewer),
            "layers" => Some(Self::Layers),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

fn print_help() {
    eprintln!("convert_bricks - Brick JSON format converter");
    eprintln!();
    eprintln!("Usage: convert_bricks --input <FILE> --output <FILE> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --format <FORMAT>  viewer | layers | editor (default: editor)");
    eprintln!("  --grid <SIZE>      Grid size for editor exports (default: 1.0)");
    eprintln!("  --help             Show this help");
}

fn main() {
    logging::init_timestamped();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let (Some(input), Some(output)) = (parse_str_arg(&args, "--input"), parse_str_arg(&args, "--output")) else {
        eprintln!("Error: --input and --output are required");
        print_help();
        std::process::exit(1);
    };
    let format_name = parse_str_arg(&args, "--format").unwrap_or_else(|| "editor".to_string());
    let Some(format) = OutputFormat::parse(&format_name) else {
        eprintln!("Error: unknown format '{}'", format_name);
        print_help();
        std::process::exit(1);
    };
    let grid = parse_f64_arg(&args, "--grid").unwrap_or(1.0);

    if let Err(e) = run(PathBuf::from(input), PathBuf::from(output), format, grid) {
        log::error!("Conversion failed: {}", e);
        std::process::exit(1);
    }
}

fn run(input: PathBuf, output: PathBuf, format: OutputFormat, grid: f64) -> Result<()> {
    let start = Instant::now();
    let json = std::fs::read_to_string(&input)?;
    let bricks = parse_brick_data(&json)?;
    log::info!("Read {} bricks from {}", bricks.len(), input.display());

    let converted = match format {
        OutputFormat::Viewer => export_viewer_json(&bricks)?,
        OutputFormat::Layers => export_viewer_layers_json(&bricks)?,
        OutputFormat::Editor => EditorExport::new(bricks, grid).to_json()?,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, converted)?;
    log::info!(
        "Wrote {:?} output to {} in {:.1}ms",
        format,
        output.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
