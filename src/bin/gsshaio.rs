//! Command-line interface for gsshaio
//! This binary parses GSSHA model text files and either re-serializes them
//! (round trip) or dumps the parsed records in a structured format.
//!
//! Usage:
//!   gsshaio roundtrip `<path>` [--format `<family>`] [--columns N] [--params `<path>`]
//!   gsshaio inspect `<path>` [--format `<family>`] [--output json|yaml]
//!   gsshaio list-formats

use clap::{Arg, Command};
use std::path::Path;

use gsshaio::gssha::diagnostics::Diagnostics;
use gsshaio::gssha::processor::{self, FileFormat, ParseOptions};
use gsshaio::gssha::replace::ReplaceParamSet;

fn main() {
    let matches = Command::new("gsshaio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and round-tripping GSSHA model files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("roundtrip")
                .about("Parse a file and write it back to stdout")
                .arg(
                    Arg::new("path")
                        .help("Path to the GSSHA file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Format family (channel, map-table, precipitation, pipe-network, dataset); inferred from the extension when omitted"),
                )
                .arg(
                    Arg::new("columns")
                        .long("columns")
                        .help("Grid column count (dataset files only)"),
                )
                .arg(
                    Arg::new("params")
                        .long("params")
                        .help("Path to a replacement-parameter declaration file"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse a file and dump the records")
                .arg(
                    Arg::new("path")
                        .help("Path to the GSSHA file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Format family; inferred from the extension when omitted"),
                )
                .arg(
                    Arg::new("columns")
                        .long("columns")
                        .help("Grid column count (dataset files only)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output format (json or yaml)")
                        .default_value("json"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List the format families"))
        .get_matches();

    match matches.subcommand() {
        Some(("roundtrip", sub)) => {
            let (parsed, params) = parse_from_args(sub);
            let mut diag = Diagnostics::new();
            let text = processor::serialize(&parsed, params.as_ref(), &mut diag);
            report_diagnostics(&diag);
            print!("{}", text);
        }
        Some(("inspect", sub)) => {
            let (parsed, _) = parse_from_args(sub);
            let output = sub.get_one::<String>("output").map(String::as_str);
            let rendered = match output {
                Some("yaml") => serde_yaml::to_string(&parsed)
                    .unwrap_or_else(|e| die(&format!("serialization error: {}", e))),
                _ => serde_json::to_string_pretty(&parsed)
                    .unwrap_or_else(|e| die(&format!("serialization error: {}", e))),
            };
            println!("{}", rendered);
        }
        Some(("list-formats", _)) => {
            for format in FileFormat::all() {
                println!("  {:<14}.{}", format.name(), format.extension());
            }
        }
        _ => unreachable!(),
    }
}

/// Read, classify, and parse the file named by the subcommand arguments.
fn parse_from_args(
    sub: &clap::ArgMatches,
) -> (processor::ParsedFile, Option<ReplaceParamSet>) {
    let path = sub.get_one::<String>("path").expect("path is required");

    let format = match sub.get_one::<String>("format") {
        Some(name) => name
            .parse::<FileFormat>()
            .unwrap_or_else(|e| die(&e)),
        None => infer_format(path),
    };

    let columns = sub
        .get_one::<String>("columns")
        .map(|c| c.parse::<usize>().unwrap_or_else(|_| die("--columns must be a positive integer")));

    let params = match sub.try_get_one::<String>("params") {
        Ok(Some(params_path)) => {
            let text = std::fs::read_to_string(params_path)
                .unwrap_or_else(|e| die(&format!("error reading {}: {}", params_path, e)));
            Some(ReplaceParamSet::from_text(&text).unwrap_or_else(|e| die(&e.to_string())))
        }
        _ => None,
    };

    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| die(&format!("error reading {}: {}", path, e)));

    let mut diag = Diagnostics::new();
    let options = ParseOptions {
        params: params.as_ref(),
        dataset_columns: columns,
    };

    let parsed = processor::parse_str(format, &source, options, &mut diag)
        .unwrap_or_else(|e| die(&e.to_string()));
    report_diagnostics(&diag);

    (parsed, params)
}

fn infer_format(path: &str) -> FileFormat {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileFormat::from_extension)
        .unwrap_or_else(|| {
            die("cannot infer the format family from the file extension; pass --format")
        })
}

fn report_diagnostics(diag: &Diagnostics) {
    for entry in diag.iter() {
        eprintln!("{}", entry);
    }
}

fn die(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
