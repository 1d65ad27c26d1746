mod display;
mod models;
mod pipeline;
mod prompts;
mod sources;
mod types;

use std::fs::OpenOptions;
use std::io::{stderr, stdin, stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::display::{CurrencyConverter, ExchangeRatesClient, NoConversion, TransactionFormatter};
use crate::models::{normalize_all, Preferences, Transaction};
use crate::pipeline::{count_by_category, CaseSensitivity, Pipeline, PipelineOutcome, Selection, DEFAULT_CURRENCY};
use crate::prompts::Prompter;
use crate::sources::SourceKind;
use crate::types::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortOrder {
    Asc,
    Desc
}

/// Filters, sorts and searches bank transactions loaded from JSON, CSV or XLSX files.
///
/// Without `--status` the status and every preference are asked for interactively.
#[derive(Debug, Parser)]
#[command(name = "transaction-pipeline", version)]
struct Cli {
    /// Kind of source file; inferred from `--path` when omitted.
    #[arg(long, value_enum)]
    source: Option<SourceKind>,
    /// Source file; defaults to the conventional location for the source kind.
    #[arg(long)]
    path: Option<PathBuf>,
    /// Field delimiter for CSV sources.
    #[arg(long)]
    delimiter: Option<char>,
    /// Keep only transactions with this status.
    #[arg(long)]
    status: Option<Status>,
    /// Sort the selection by date.
    #[arg(long, value_enum)]
    sort: Option<SortOrder>,
    /// Keep only ruble transactions.
    #[arg(long)]
    rub_only: bool,
    /// Keep only transactions in this currency, EUR when no code is given.
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CURRENCY, conflicts_with = "rub_only")]
    currency: Option<String>,
    /// Keep only transactions whose description matches this pattern.
    #[arg(long)]
    search: Option<String>,
    /// Comma separated descriptions to count in the final selection.
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,
    /// Match `--categories` with exact case.
    #[arg(long)]
    case_sensitive: bool,
    /// error, warn, info, debug or trace.
    #[arg(long, default_value = "error")]
    log_level: String,
    /// Append a log of every pipeline stage call to this file.
    #[arg(long)]
    log_file: Option<PathBuf>
}

impl Cli {
    fn resolve_source(&self) -> (SourceKind, PathBuf) {
        let inferred = self.path.as_deref().and_then(SourceKind::from_path);
        let kind = self.source.or(inferred).unwrap_or(SourceKind::Json);
        let path = self.path.clone().unwrap_or_else(|| kind.default_path());

        (kind, path)
    }

    fn preferences(&self) -> Preferences {
        Preferences {
            sort_date: self.sort.is_some(),
            sort_ascending: self.sort == Some(SortOrder::Asc),
            rub_only: self.rub_only,
            currency: self.currency.as_deref().map(str::to_uppercase),
            search_word: self.search.clone()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level), cli.log_file.as_deref())?;

    let delimiter = match cli.delimiter {
        Some(delimiter) => match u8::try_from(delimiter) {
            Ok(delimiter) => Some(delimiter),
            Err(_) => bail!("Delimiter '{delimiter}' must be a single-byte character")
        },
        None => None
    };

    let (kind, path) = cli.resolve_source();
    let mut output = BufWriter::new(stdout().lock());

    let timer = Instant::now();
    let normalized = normalize_all(kind.open(&path, delimiter).load());
    info!("Loaded transactions in: {:?}", timer.elapsed());

    if normalized.records.is_empty() {
        writeln!(output, "No transactions could be loaded from {}.", path.display())?;
        output.flush()?;
        return Ok(());
    }

    let pipeline = Pipeline::new();

    let selection: Selection = match cli.status {
        Some(status) => match pipeline.run(&normalized.records, status, &cli.preferences()) {
            PipelineOutcome::Completed(selection) => selection,
            PipelineOutcome::NoTransactions => {
                writeln!(output, "No transactions could be loaded from {}.", path.display())?;
                output.flush()?;
                return Ok(());
            }
            PipelineOutcome::NoMatchingStatus => {
                writeln!(output, "No transactions found with status '{status}'.")?;
                output.flush()?;
                return Ok(());
            }
        },
        None => {
            //NOTE: Prompts go straight to the terminal, the buffered writer is only for results
            let mut prompter = Prompter::new(stdin().lock(), stdout());

            let Some(status) = prompter.ask_status()? else {
                writeln!(output, "No valid status was given, nothing to show.")?;
                output.flush()?;
                return Ok(());
            };

            let filtered = pipeline.filter_status(&normalized.records, status);

            if filtered.is_empty() {
                writeln!(output, "No transactions found with status '{status}'.")?;
                output.flush()?;
                return Ok(());
            }

            let preferences = prompter.ask_preferences()?;
            pipeline.apply_preferences(filtered, &preferences)
        }
    };

    for notice in &selection.notices {
        writeln!(output, "Note: {notice}.")?;
    }

    match ExchangeRatesClient::from_env() {
        Some(Ok(client)) => write_results(&mut output, &TransactionFormatter::new(&client), &selection.records).await?,
        Some(Err(error)) => {
            warn!("Exchange rates unavailable, amounts stay unconverted: {error}");
            write_results(&mut output, &TransactionFormatter::new(&NoConversion), &selection.records).await?
        }
        None => write_results(&mut output, &TransactionFormatter::new(&NoConversion), &selection.records).await?
    }

    if !cli.categories.is_empty() {
        let case = if cli.case_sensitive { CaseSensitivity::Sensitive } else { CaseSensitivity::Insensitive };
        write_category_counts(&mut output, &selection.records, &cli.categories, case)?;
    }

    output.flush()?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    //NOTE: Results are written to stdout, so terminal logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    let file_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_filter(Targets::new().with_target("transaction_pipeline", LevelFilter::DEBUG)))
        }
        None => None
    };

    tracing_subscriber::registry()
        .with(terminal_log)
        .with(file_log)
        .init();

    Ok(())
}

async fn write_results<W, C>(output: &mut W, formatter: &TransactionFormatter<'_, C>, selection: &[Transaction]) -> Result<()>
where
    W: Write,
    C: CurrencyConverter
{
    writeln!(output, "Printing the final list of transactions...")?;
    writeln!(output)?;
    writeln!(output, "Total transactions in selection: {}", selection.len())?;
    writeln!(output)?;

    if selection.is_empty() {
        writeln!(output, "No transactions match the chosen filters")?;
        return Ok(());
    }

    for transaction in selection {
        writeln!(output, "{}", formatter.format(transaction).await)?;
    }

    Ok(())
}

fn write_category_counts<W: Write>(output: &mut W, selection: &[Transaction], categories: &[String], case: CaseSensitivity) -> Result<()> {
    let counts = count_by_category(selection, categories, case);

    writeln!(output, "Transactions per category:")?;

    for category in categories {
        writeln!(output, "{category}: {}", counts.get(category).copied().unwrap_or_default())?;
    }

    Ok(())
}
