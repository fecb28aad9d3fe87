// Command-line interface for akn
//
// This binary converts documents between Akoma Ntoso XML and editor HTML, and exposes the
// transformation internals (families, products) for debugging configurations.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  akn <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  akn convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  akn products <input> [--from <format>]  - Print the products of every top-level family as JSON
//  akn families                            - List registered families in priority order
//
// Configuration:
//
// `akn.toml` in the working directory is picked up when present; --config layers an explicit file on top.
// Logging goes through env_logger: RUST_LOG wins, otherwise -v raises the level (warn, info, debug, trace).

use akn_babel::{convert_document, Direction, Format, FormatRegistry, Side};
use akn_config::{AknConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::{debug, LevelFilter};
use serde_json::json;
use std::fs;

const SUBCOMMANDS: &[&str] = &["convert", "products", "families", "help"];

fn build_cli() -> Command {
    Command::new("akn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert structured legal documents between Akoma Ntoso and HTML")
        .long_about(
            "akn converts Akoma Ntoso (AKN) documents into the HTML understood by editors and back.\n\n\
            Commands:\n  \
            - convert:  Transform between akn and html (default command)\n  \
            - products: Show the products emitted by each top-level family, as JSON\n  \
            - families: List the configured families in priority order\n\n\
            Examples:\n  \
            akn bill.xml --to html                 # Convert to HTML (outputs to stdout)\n  \
            akn edited.html --to akn -o bill.xml   # Convert back to an AKN file\n  \
            akn products bill.xml                  # Inspect what the families produce"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an akn.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (repeatable)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between akn and html (default command)")
                .long_about(
                    "Convert documents between Akoma Ntoso XML and HTML.\n\n\
                    Supported formats:\n  \
                    - akn:  Akoma Ntoso XML (.xml, .akn)\n  \
                    - html: Editor HTML (.html, .htm)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    akn convert bill.xml --to html               # Convert to HTML (stdout)\n  \
                    akn convert edited.html --to akn -o out.xml  # HTML to AKN file\n  \
                    akn bill.xml --to html                       # 'convert' is optional"
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: akn, html\n\
                            Use the format name, not the file extension."
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("products")
                .about("Print the products of every top-level family as JSON")
                .long_about(
                    "Run the families over the input without building the converted document.\n\n\
                    Each outermost node claimed by a family is reported with the family name and\n\
                    the ordered products it emits towards the other side. Nested sources are\n\
                    given as node ids of the parsed input.\n\n\
                    Examples:\n  \
                    akn products bill.xml                 # AKN to HTML products\n  \
                    akn products edited.html              # HTML to AKN products"
                )
                .arg(input_arg())
                .arg(from_arg()),
        )
        .subcommand(Command::new("families").about("List configured families in priority order"))
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A leading file argument means the implicit convert command
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str()) {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_count("verbose"));
    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(sub_matches, input, &config);
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &config);
        }
        Some(("products", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(sub_matches, input, &config);
            handle_products_command(input, &from, &config);
        }
        Some(("families", _)) => handle_families_command(&config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(1);
        }
    }
}

/// Explicit --from, then the file extension, then the configured default
fn resolve_from(matches: &ArgMatches, input: &str, config: &AknConfig) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        return from.clone();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            debug!(
                "no format for '{input}', using default '{}'",
                config.convert.default_from
            );
            config.convert.default_from.clone()
        }
    }
}

fn read_input(input: &str) -> String {
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(input: &str, from: &str, to: &str, output: Option<&str>, config: &AknConfig) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = read_input(input);
    let converter = config.converter();
    let result = convert_document(&registry, &converter, &source, from, to).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the products command
fn handle_products_command(input: &str, from: &str, config: &AknConfig) {
    let registry = FormatRegistry::default();
    let side = match registry.get(from) {
        Ok(format) => format.side(),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let source = read_input(input);
    let tree = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let converter = config.converter();
    let report: Vec<_> = converter
        .products(&tree, direction_from(side))
        .into_iter()
        .map(|(family, products)| json!({ "family": family, "products": products }))
        .collect();

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

fn direction_from(side: Side) -> Direction {
    match side {
        Side::Akn => Direction::AknToHtml,
        Side::Html => Direction::HtmlToAkn,
    }
}

/// Handle the families command
fn handle_families_command(config: &AknConfig) {
    for (index, name) in config.family_registry().names().iter().enumerate() {
        println!("{}. {name}", index + 1);
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AknConfig {
    let loader = Loader::new().with_optional_file("akn.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
