//! Command-line front end that dumps the rows of delimited text files.
//!
//! Every input is read with its own [`RowReader`], so each file gets its own
//! guessed delimiter and its own table segments.
//!
//! # Usage
//!
//! Guess the delimiter and print rows as JSON:
//! ```sh
//! csvtables data.csv
//! ```
//!
//! Several tables in one file, separated by blank lines, printed tab-separated:
//! ```sh
//! csvtables --multitable --format tsv report.txt
//! ```
//!
//! Explicit delimiter given by shorthand or escape:
//! ```sh
//! csvtables -d pipe dump.txt
//! csvtables -d '\x01' hive_export.txt
//! cat data.csv | csvtables -
//! ```

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use csvtables::text::DEFAULT_CANDIDATES;
use csvtables::{ReaderConfig, Result, RowReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Dump the rows of delimited text files, guessing the delimiter when needed
#[derive(Parser, Debug)]
#[command(name = "csvtables", version)]
struct Args {
    /// Input file(s); `-` or nothing reads standard input
    #[arg(value_name = "INPUT")]
    input: Vec<PathBuf>,

    /// Explicit delimiter (any length); accepts escapes like `\t` and names like `pipe`
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Ordered candidate characters tried when guessing the delimiter
    #[arg(
        short,
        long,
        env = "CSVTABLES_DELIMITERS",
        default_value = DEFAULT_CANDIDATES,
        hide_default_value = true
    )]
    candidates: String,

    /// Treat the first line of each table as data rather than field names
    #[arg(short, long)]
    no_header: bool,

    /// Split the input into separate tables at blank lines
    #[arg(short, long)]
    multitable: bool,

    /// Quote character
    #[arg(long, default_value_t = '"')]
    quote: char,

    /// Skip records starting with this character
    #[arg(long)]
    comment: Option<char>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON object per row
    Json,
    /// Tab-joined values, with a header line at every table start
    Tsv,
}

impl Args {
    fn reader_config(&self) -> ReaderConfig {
        let config = ReaderConfig::new()
            .with_candidates(self.candidates.clone())
            .with_headers(!self.no_header)
            .with_multitable(self.multitable)
            .with_quote(self.quote)
            .with_comment(self.comment);
        match &self.delimiter {
            Some(delimiter) => config.with_delimiter(delimiter.clone()),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.reader_config();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let inputs = if args.input.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.input.clone()
    };

    for input in &inputs {
        tracing::info!(input = %input.display(), "reading");
        if input.as_os_str() == "-" {
            let reader = RowReader::new(io::stdin().lock(), config.clone())?;
            dump(reader, args.format, &mut out)?;
        } else {
            let reader = RowReader::open(input, config.clone())?;
            dump(reader, args.format, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn dump<R: BufRead, W: Write>(reader: RowReader<R>, format: OutputFormat, out: &mut W) -> Result<()> {
    let mut last_table = None;

    for row in reader {
        let row = row?;
        match format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "table": row.table_index(),
                    "line": row.line_number(),
                    "row": &row,
                });
                writeln!(out, "{}", value)?;
            },
            OutputFormat::Tsv => {
                if last_table != Some(row.table_index()) {
                    last_table = Some(row.table_index());
                    writeln!(out, "# table {}", row.table_index())?;
                    if let Some(header) = row.header() {
                        writeln!(out, "{}", header.names().join("\t"))?;
                    }
                }
                writeln!(out, "{}", row.values().collect::<Vec<_>>().join("\t"))?;
            },
        }
    }

    Ok(())
}
