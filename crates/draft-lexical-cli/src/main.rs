use anyhow::Result;
use draft_lexical_config::Config;
use draft_lexical_engine::{ConvertOptions, FontCatalog, convert_document, convert_embedded, io, to_json};
use std::{env, path::PathBuf, process};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut expanded = false;
    let mut embedded = false;
    let mut paths: Vec<PathBuf> = Vec::new();

    for arg in &args[1..] {
        match arg.as_str() {
            "--expanded" => expanded = true,
            "--embedded" => embedded = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage();
                process::exit(1);
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    if paths.is_empty() || paths.len() > 2 {
        print_usage();
        process::exit(1);
    }

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let options = ConvertOptions {
        shorten_keys: config.shorten_keys && !expanded,
        fonts: FontCatalog::with_extra(&config.extra_fonts),
    };

    let value = if embedded {
        // Convert raw payloads embedded in a larger JSON document
        let document = io::read_json(&paths[0])?;
        convert_embedded(document, &options)?
    } else {
        let document = io::read_document(&paths[0])?;
        let root = convert_document(&document, &options)?;
        to_json(&root, options.shorten_keys)
    };

    match paths.get(1) {
        Some(output) => {
            io::write_json(output, &value)?;
            eprintln!("Wrote {}", output.display());
        }
        None => println!("{}", serde_json::to_string(&value)?),
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: draft-lexical [--expanded] [--embedded] <input.json> [output.json]");
    eprintln!();
    eprintln!("Converts a Draft.js raw content file into Lexical editor state.");
    eprintln!("  --expanded   keep long field names instead of storage-shortened keys");
    eprintln!("  --embedded   treat the input as a document with embedded raw payloads");
    eprintln!();
    eprintln!("Without an output path the converted JSON is printed to stdout.");
}
