mod logging;

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use log::{error, info};
use serde::Serialize;
use variable_export::error::{ExportResult, IoContext, JsonContext};
use variable_export::graph::{LayeredLayout, LayoutDirection};
use variable_export::{ExportConfig, ExportDocument, VariableStore, export_css, export_graph, export_theme_config};

#[derive(Debug, Default)]
struct Args {
    document: PathBuf,
    config: Option<PathBuf>,
    graph: Option<PathBuf>,
    theme: Option<PathBuf>,
    verbose: bool,
}

fn print_usage(program: &str) {
    // Use eprintln for usage info since logger isn't initialized yet
    eprintln!("Usage: {} <export.json> [--config <config.json>] [--graph <graph.json>] [--theme <theme.json>] [--verbose]", program);
    eprintln!("  <export.json>: variables and collections exported by the design tool");
    eprintln!("  The stylesheet is written to stdout.");
    eprintln!("Example: {} tokens.json --graph graph.json > tokens.css", program);
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args::default();
    let mut document = None;
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(iter.next()?)),
            "--graph" => parsed.graph = Some(PathBuf::from(iter.next()?)),
            "--theme" => parsed.theme = Some(PathBuf::from(iter.next()?)),
            "--verbose" => parsed.verbose = true,
            other if other.starts_with("--") => return None,
            other => document = Some(PathBuf::from(other)),
        }
    }

    parsed.document = document?;
    Some(parsed)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> ExportResult<()> {
    let json = serde_json::to_string_pretty(value).with_json_context("Failed to serialize output")?;
    std::fs::write(path, json).with_path(path, "Failed to write output")
}

fn run(args: &Args) -> ExportResult<()> {
    let config = match &args.config {
        Some(path) => ExportConfig::load(path)?,
        None => ExportConfig::default(),
    };
    let store = VariableStore::from_document(ExportDocument::load(&args.document)?);
    info!(
        "Loaded {} collections and {} variables",
        store.collections().count(),
        store.variables().count()
    );

    println!("{}", export_css(&store, &config));

    if let Some(path) = &args.graph {
        let graph = export_graph(&store, &LayeredLayout::default(), LayoutDirection::LeftRight);
        write_json(path, &graph)?;
        info!("Graph written to {:?}", path);
    }

    if let Some(path) = &args.theme {
        write_json(path, &export_theme_config(&store, &config))?;
        info!("Theme config written to {:?}", path);
    }

    Ok(())
}

fn main() {
    let raw_args: Vec<String> = env::args().collect();
    let program = raw_args.first().map(String::as_str).unwrap_or("variable_export");

    let Some(args) = parse_args(&raw_args) else {
        print_usage(program);
        process::exit(1);
    };

    if let Err(e) = logging::init_logger(args.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    info!("Variable export starting: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Export failed: {}", e);
        process::exit(1);
    }
}
