use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use worthgen::{Config, CsvRowSource, FileSink, RowSource, StdoutSink, WorthPipeline, WorthSink};

/// Build a YAML worth table from a ';'-delimited price spreadsheet
///
/// Examples:
///   # Print the table
///   worthgen prices.csv
///
///   # Write it to a file, keyed by item name
///   worthgen prices.csv -o plugins/worth.yml --names names.json --use-names
///
///   # Read a spreadsheet saved with German number formatting
///   worthgen prices.csv --locale de_DE
#[derive(Parser, Debug)]
#[command(name = "worthgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source spreadsheet (id;comment;-;has-price;worth)
    #[arg(value_name = "CSV")]
    input: PathBuf,

    /// Write the table here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// id → name table (.json object or id;name rows)
    #[arg(short, long, value_name = "FILE")]
    names: Option<PathBuf>,

    /// Key items by name instead of numeric id
    #[arg(short = 'u', long)]
    use_names: bool,

    /// Locale for reading worths (e.g. de_DE); defaults to the process locale
    #[arg(short, long, value_name = "TAG")]
    locale: Option<String>,

    /// Fail when any row is rejected
    #[arg(short, long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.names.is_some() {
        config.names_file = cli.names.clone();
    }
    if cli.use_names {
        config.use_names = true;
    }
    if cli.locale.is_some() {
        config.locale = cli.locale.clone();
    }
    config.validate()?;

    let pipeline = WorthPipeline::from_config(&config)?;
    let source = CsvRowSource::from_path(&cli.input).with_delimiter(config.delimiter_byte());

    eprintln!("📂 Loading {}...", source.describe());
    let report = pipeline.run(&source)?;
    eprintln!("✓ {}", report.summary());

    for rejected in &report.rejected {
        eprintln!("⚠️  {}", rejected);
    }

    if cli.strict && !report.is_clean() {
        bail!("{} row(s) rejected, nothing written (--strict)", report.rejected.len());
    }

    let sink: Box<dyn WorthSink> = match &cli.output {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(StdoutSink),
    };
    report.write_to(sink.as_ref())?;

    if cli.output.is_some() {
        eprintln!("💾 Wrote {}", sink.destination());
    }

    Ok(())
}
