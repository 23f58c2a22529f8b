use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Explore a CSV file: column types, statistics, correlations, histograms, boxplots and value counts",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the whole exploration: preview, statistics and every chart
    Report(ReportArgs),
    /// Show the first rows of the file
    Preview(PreviewArgs),
    /// List each column's inferred type and chart eligibility
    Classify(InputArgs),
    /// Descriptive statistics for every column
    Describe(InputArgs),
    /// Pearson correlation matrix over the numeric columns
    Correlation(InputArgs),
    /// Histogram of one numeric column
    Histogram(HistogramArgs),
    /// Boxplot summary and outliers of one numeric column
    Boxplot(BoxplotArgs),
    /// Value counts of one categorical column
    Counts(CountsArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input CSV file with a header row (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to read
    #[arg(long)]
    pub limit: Option<usize>,
    /// YAML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Numeric column for the histogram (defaults to the first numeric column)
    #[arg(long = "histogram-column")]
    pub histogram_column: Option<String>,
    /// Numeric column for the boxplot (defaults to the first numeric column)
    #[arg(long = "boxplot-column")]
    pub boxplot_column: Option<String>,
    /// Categorical column for value counts (defaults to the first categorical column)
    #[arg(long = "counts-column")]
    pub counts_column: Option<String>,
    /// Number of histogram bins
    #[arg(long)]
    pub bins: Option<usize>,
    /// Number of preview rows
    #[arg(long)]
    pub rows: Option<usize>,
    /// Maximum distinct values to display (0 = all)
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of rows to display
    #[arg(long)]
    pub rows: Option<usize>,
}

#[derive(Debug, Args)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Numeric column to bin (defaults to the first numeric column)
    #[arg(short = 'c', long = "column")]
    pub column: Option<String>,
    /// Number of bins
    #[arg(long)]
    pub bins: Option<usize>,
}

#[derive(Debug, Args)]
pub struct BoxplotArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Numeric column to summarise (defaults to the first numeric column)
    #[arg(short = 'c', long = "column")]
    pub column: Option<String>,
}

#[derive(Debug, Args)]
pub struct CountsArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Categorical column to count (defaults to the first categorical column)
    #[arg(short = 'c', long = "column")]
    pub column: Option<String>,
    /// Maximum distinct values to display (0 = all)
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_characters() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "csv-explore",
            "report",
            "-i",
            "data.csv",
            "--bins",
            "12",
            "--format",
            "json",
        ])
        .expect("parse");
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.bins, Some(12));
                assert_eq!(args.input.format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
