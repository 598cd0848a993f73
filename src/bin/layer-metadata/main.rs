//! layer-metadata CLI - derive layer-info descriptors from GeoJSON files.

use anyhow::{Context, Result};
use layer_metadata::prelude::*;
use layer_metadata::layer::compute_extent;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_DATE: &str = env!("LAYER_METADATA_BUILD_DATE");
const BUILD_TIME: &str = env!("LAYER_METADATA_BUILD_TIME");

/// Parsed command-line flags shared by every command.
#[derive(Debug, Default)]
struct Flags<'a> {
    options: Option<&'a str>,
    settings: Option<&'a str>,
    compact: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "warn";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "off",
            _ => filtered_args.push(arg),
        }
    }
    init_tracing(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let result = match filtered_args[0] {
        "describe" | "d" => with_file(&filtered_args, "describe", cmd_describe),
        "table" | "t" => with_file(&filtered_args, "table", cmd_table),
        "extent" | "e" => with_file(&filtered_args, "extent", cmd_extent),
        "version" | "-V" | "--version" => {
            println!("layer-metadata {} (built {} {})", VERSION, BUILD_DATE, BUILD_TIME);
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        // Default: if file exists, describe it; otherwise error
        other => {
            if Path::new(other).exists() {
                match parse_flags(&filtered_args[1..]) {
                    Ok(flags) => cmd_describe(other, &flags),
                    Err(e) => Err(e),
                }
            } else {
                eprintln!("Unknown command: {}", other);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn with_file(
    args: &[&str],
    command: &str,
    run: fn(&str, &Flags<'_>) -> Result<()>,
) -> Result<()> {
    let Some(&file) = args.get(1) else {
        eprintln!("Error: missing file argument");
        eprintln!("Usage: layer-metadata {} <file.geojson> [--options <options.json>]", command);
        std::process::exit(1);
    };
    let flags = parse_flags(&args[2..])?;
    run(file, &flags)
}

fn parse_flags<'a>(args: &[&'a str]) -> Result<Flags<'a>> {
    let mut flags = Flags::default();
    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        match arg {
            "-o" | "--options" => {
                flags.options = Some(iter.next().copied().context("--options needs a file")?);
            }
            "-s" | "--settings" => {
                flags.settings = Some(iter.next().copied().context("--settings needs a file")?);
            }
            "-c" | "--compact" => flags.compact = true,
            other => anyhow::bail!("unexpected argument '{}'", other),
        }
    }
    Ok(flags)
}

fn print_help() {
    println!("layer-metadata - feature layer metadata from GeoJSON");
    println!();
    println!("USAGE:");
    println!("    layer-metadata [OPTIONS] <COMMAND> <file.geojson> [FLAGS]");
    println!();
    println!("COMMANDS:");
    println!("    d, describe <file>    Print the feature layer descriptor");
    println!("    t, table    <file>    Print the table-level descriptor only");
    println!("    e, extent   <file>    Print the computed extent (or null)");
    println!("    version               Show version and build date");
    println!("    h, help               Show this help");
    println!();
    println!("FLAGS:");
    println!("    -o, --options <file>  Options bag as JSON");
    println!("    -s, --settings <file> Settings file (default: config dir or $LAYER_METADATA_SETTINGS)");
    println!("    -c, --compact         Single-line JSON output");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Suppress all log output");
    println!();
    println!("EXAMPLES:");
    println!("    layer-metadata describe trees.geojson");
    println!("    layer-metadata d parcels.geojson -o parcels.options.json");
    println!("    layer-metadata -v extent broken.geojson    # see why no extent was produced");
    println!();
    println!("NOTES:");
    println!("    - Passing a file directly is equivalent to 'describe'");
    println!("    - RUST_LOG overrides the verbosity flags");
}

fn load_inputs(path: &str, flags: &Flags<'_>) -> Result<(GeoJsonDocument, LayerOptions, MetadataBuilder)> {
    tracing::info!("Reading {}", path);
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let document =
        GeoJsonDocument::from_json_str(&text).with_context(|| format!("Failed to parse {}", path))?;
    tracing::debug!("{} feature(s) loaded", document.len());

    let options = match flags.options {
        Some(opts) => {
            let text = std::fs::read_to_string(opts).with_context(|| format!("Failed to read {}", opts))?;
            LayerOptions::from_json_str(&text).with_context(|| format!("Failed to parse {}", opts))?
        }
        None => LayerOptions::default(),
    };

    let settings = match flags.settings {
        Some(s) => Settings::from_file(s).with_context(|| format!("Failed to load settings {}", s))?,
        None => Settings::load(),
    };

    Ok((document, options, MetadataBuilder::new().with_settings(settings)))
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

fn cmd_describe(path: &str, flags: &Flags<'_>) -> Result<()> {
    let (document, options, builder) = load_inputs(path, flags)?;
    let layer = builder.build(&document, &options)?;
    print_json(&layer, flags.compact)
}

fn cmd_table(path: &str, flags: &Flags<'_>) -> Result<()> {
    let (document, options, builder) = load_inputs(path, flags)?;
    let table = builder.build_table(&document, &options);
    print_json(&table, flags.compact)
}

fn cmd_extent(path: &str, flags: &Flags<'_>) -> Result<()> {
    let (document, options, builder) = load_inputs(path, flags)?;
    let input = layer_metadata::layer::normalize_input(&document, &options);
    let extent = compute_extent(
        input.geojson,
        &input.options,
        &builder.settings().fallback_spatial_reference(),
        &TracingSink,
    )?;
    print_json(&extent, flags.compact)
}
