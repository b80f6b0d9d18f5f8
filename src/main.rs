use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use locale_audit::{run_audit, AuditQuery, SimpleFormatter, TableFormatter};

/// Locale Audit - Find empty and untranslated values in sprinkle locale files
#[derive(Parser, Debug)]
#[command(name = "locale-audit")]
#[command(author, version, about, long_about = None)]
#[command(help_template = "{name} {version}\n{about}\n\nUSAGE:\n    {usage}\n\n{all-args}")]
struct Cli {
    /// The base locale used for comparison and translation preview (default: config or en_US)
    #[arg(short, long, value_name = "LOCALE")]
    base: Option<String>,

    /// One or more specific locales to check, e.g. "fr_FR,es_ES"
    #[arg(short, long, value_name = "LOCALES")]
    check: Option<String>,

    /// Max length of the preview column text (default: config or 255)
    #[arg(short, long, value_parser = validate_length)]
    length: Option<usize>,

    /// Skip the check for empty values
    #[arg(short, long)]
    empty: bool,

    /// Skip the check for values identical to the base locale
    #[arg(short, long)]
    duplicates: bool,

    /// Directory containing the sprinkles (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Site config file (default: <root>/config/default.yaml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Simple,
    Json,
}

/// Validate that the preview length is a positive number
fn validate_length(s: &str) -> Result<usize, String> {
    let length: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if length < 1 {
        return Err("length must be at least 1".to_string());
    }

    Ok(length)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("locale_audit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_query(cli: &Cli) -> AuditQuery {
    let mut query = AuditQuery::new()
        .skip_empty_check(cli.empty)
        .skip_duplicate_check(cli.duplicates);

    if let Some(base) = &cli.base {
        query = query.with_base_locale(base.clone());
    }
    if let Some(check) = &cli.check {
        query = query.with_check(check.clone());
    }
    if let Some(length) = cli.length {
        query = query.with_max_length(length);
    }
    if let Some(root) = &cli.root {
        query = query.with_root(root.clone());
    }
    if let Some(config) = &cli.config {
        query = query.with_config(config.clone());
    }

    query
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.base.as_deref().is_some_and(|b| b.trim().is_empty()) {
        anyhow::bail!("base locale cannot be empty");
    }

    let report = run_audit(build_query(cli)).context("locale audit failed")?;

    let output = match cli.format {
        OutputFormat::Table => TableFormatter::with_color(!cli.no_color).format(&report),
        OutputFormat::Simple => SimpleFormatter::new().format(&report),
        OutputFormat::Json => {
            let mut json = report.to_json()?;
            json.push('\n');
            json
        }
    };
    print!("{}", output);

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
