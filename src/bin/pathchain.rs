//! pathchain CLI — parse and render transmission paths.
//!
//! Usage:
//!   pathchain parse [FILE] [--format text|json] [--config path]
//!   pathchain report [FILE] [--format text|json] [--config path]

use clap::{Args, Parser, Subcommand};
use pathchain::{
    load_response, render_chains, render_report, ChainParser, OutputFormat, ParserConfig,
};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pathchain",
    version,
    about = "Parse transmission paths from announcement analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse raw path text into chains
    Parse(InputArgs),
    /// Render a full report from an analysis response JSON payload
    Report(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Input file (reads stdin when omitted or "-")
    file: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Path to a YAML parser config (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn build_parser(config: Option<&Path>) -> Result<ChainParser, String> {
    let config = match config {
        Some(path) => ParserConfig::load(path),
        None => ParserConfig::discover(),
    }
    .map_err(|e| e.to_string())?;
    Ok(config.build_parser())
}

fn cmd_parse(args: &InputArgs) -> Result<String, String> {
    let parser = build_parser(args.config.as_deref())?;
    let text = read_input(args.file.as_deref())?;
    let chains = parser.parse(&text);
    tracing::info!(chains = chains.len(), "parsed path text");

    match args.format {
        OutputFormat::Text => Ok(render_chains(&chains)),
        OutputFormat::Json => serde_json::to_string_pretty(&chains)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
    }
}

fn cmd_report(args: &InputArgs) -> Result<String, String> {
    let parser = build_parser(args.config.as_deref())?;
    let json = read_input(args.file.as_deref())?;
    let response = load_response(&json).map_err(|e| e.to_string())?;
    tracing::info!(
        event_type = %response.event_type,
        trace_id = %response.trace_id,
        "loaded analysis response"
    );

    match args.format {
        OutputFormat::Text => Ok(render_report(&response, &parser)),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "response": response,
                "chains": response.chains_with(&parser),
            });
            serde_json::to_string_pretty(&report)
                .map(|json| json + "\n")
                .map_err(|e| e.to_string())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Parse(args) => cmd_parse(args),
        Commands::Report(args) => cmd_report(args),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
