//! Command-line interface for iniread
//! Looks values up in ini files and dumps parsed files in machine readable formats.
//!
//! Usage:
//!   iniread get `<path>` `<section>` `<key>` [--stream]   - Print one value
//!   iniread dump `<path>` [--format json|yaml]            - Print the whole parsed file
//!   iniread sections `<path>`                             - List section names

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use iniread::{Document, IniError, ReaderConfig, DEFAULT_MAX_LINE_LENGTH};
use log::LevelFilter;

fn main() {
    let matches = Command::new("iniread")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for reading ini configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("max-line-length")
                .long("max-line-length")
                .help("Longest physical line read at once, in bytes [default: 1024]")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parsing details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("get")
                .about("Print the value of a key")
                .arg(path_arg())
                .arg(
                    Arg::new("section")
                        .help("Section name (use \"\" for entries before any header)")
                        .required(true)
                        .index(2),
                )
                .arg(Arg::new("key").help("Key name").required(true).index(3))
                .arg(
                    Arg::new("stream")
                        .long("stream")
                        .help("Stop reading at the first match instead of parsing the whole file")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Print the parsed file")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("sections")
                .about("List section names in declaration order")
                .arg(path_arg()),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));
    let config = ReaderConfig::new().with_max_line_length(
        *matches
            .get_one::<usize>("max-line-length")
            .unwrap_or(&DEFAULT_MAX_LINE_LENGTH),
    );

    let result = match matches.subcommand() {
        Some(("get", get_matches)) => handle_get_command(get_matches, &config),
        Some(("dump", dump_matches)) => handle_dump_command(dump_matches, &config),
        Some(("sections", sections_matches)) => handle_sections_command(sections_matches, &config),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the ini file")
        .required(true)
        .index(1)
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if !verbose {
        // open failures are printed once, by the command itself
        builder.filter_module("iniread::ini::search", LevelFilter::Off);
    }
    builder.parse_default_env();
    builder.init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Handle the get command
fn handle_get_command(matches: &ArgMatches, config: &ReaderConfig) -> Result<(), IniError> {
    let path = required(matches, "path");
    let section = required(matches, "section");
    let key = required(matches, "key");

    let value = if matches.get_flag("stream") {
        iniread::read_value_with(path, section, key, config)?
    } else {
        let doc = iniread::parse_file_with(path, config)?;
        doc.get_value(section, key)?.to_string()
    };
    println!("{}", value);
    Ok(())
}

/// Handle the dump command
fn handle_dump_command(matches: &ArgMatches, config: &ReaderConfig) -> Result<(), IniError> {
    let doc = iniread::parse_file_with(required(matches, "path"), config)?;
    let format = required(matches, "format");
    let output = serialize(&doc, format).unwrap_or_else(|e| {
        eprintln!("Error formatting document: {}", e);
        std::process::exit(1);
    });
    println!("{}", output);
    Ok(())
}

fn serialize(doc: &Document, format: &str) -> Result<String, String> {
    match format {
        "yaml" => serde_yaml::to_string(doc).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(doc).map_err(|e| e.to_string()),
    }
}

/// Handle the sections command
fn handle_sections_command(matches: &ArgMatches, config: &ReaderConfig) -> Result<(), IniError> {
    let doc = iniread::parse_file_with(required(matches, "path"), config)?;
    for name in doc.section_names() {
        if name.is_empty() {
            println!("(implicit)");
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}
