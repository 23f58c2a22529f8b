pub mod boxplot;
pub mod classify;
pub mod cli;
pub mod config;
pub mod correlation;
pub mod error;
pub mod frequency;
pub mod histogram;
pub mod io_utils;
pub mod loader;
pub mod plan;
pub mod preview;
pub mod render;
pub mod report;
pub mod session;
pub mod stats;
pub mod summary;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::{
    classify::{ColumnClassification, ColumnTypeEntry},
    cli::{Cli, Commands, InputArgs, OutputFormat},
    config::ExploreConfig,
    loader::LoadOptions,
    plan::{ChartKind, ChartPlanner, ChartRequest},
    report::ReportOptions,
    session::Session,
    table::Table,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_explore", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Report(args) => handle_report(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Classify(args) => handle_classify(&args),
        Commands::Describe(args) => handle_describe(&args),
        Commands::Correlation(args) => handle_correlation(&args),
        Commands::Histogram(args) => handle_chart(&args.input, |config| ChartRequest {
            column: args.column.clone(),
            bins: args.bins.or(config.bins),
            ..ChartRequest::new(ChartKind::Histogram)
        }),
        Commands::Boxplot(args) => handle_chart(&args.input, |_| ChartRequest {
            column: args.column.clone(),
            ..ChartRequest::new(ChartKind::Boxplot)
        }),
        Commands::Counts(args) => handle_chart(&args.input, |config| ChartRequest {
            column: args.column.clone(),
            top: args.top.or(config.top),
            ..ChartRequest::new(ChartKind::ValueCounts)
        }),
    }
}

/// Loads the input through a fresh session, applying config-file defaults
/// under the command-line flags.
fn load_input(args: &InputArgs) -> Result<(Table, ExploreConfig)> {
    let config = ExploreConfig::load_optional(args.config.as_deref())?;
    let delimiter = match (args.delimiter, config.delimiter.as_deref()) {
        (Some(delimiter), _) => Some(delimiter),
        (None, Some(value)) => Some(
            cli::parse_delimiter(value)
                .map_err(|err| anyhow!("Invalid delimiter '{value}' in config: {err}"))?,
        ),
        (None, None) => None,
    };
    let encoding_label = args
        .input_encoding
        .as_deref()
        .or(config.input_encoding.as_deref());
    let options = LoadOptions {
        delimiter: io_utils::resolve_input_delimiter(&args.input, delimiter),
        encoding: io_utils::resolve_encoding(encoding_label)?,
        row_limit: args.limit.or(config.limit),
    };
    info!(
        "Loading '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(options.delimiter)
    );

    let mut session = Session::new(options);
    session
        .upload_path(&args.input)
        .with_context(|| format!("Loading {:?}", args.input))?;
    let table = session.into_table().context("No table loaded")?;
    info!(
        "Loaded {} row(s) across {} column(s)",
        table.row_count(),
        table.column_count()
    );
    Ok((table, config))
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text(value)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Serializing output")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn handle_report(args: &cli::ReportArgs) -> Result<()> {
    let (table, config) = load_input(&args.input)?;
    let defaults = ReportOptions::default();
    let options = ReportOptions {
        preview_rows: args.rows.or(config.preview_rows).unwrap_or(defaults.preview_rows),
        bins: args.bins.or(config.bins).unwrap_or(defaults.bins),
        top: args.top.or(config.top).unwrap_or(defaults.top),
        histogram_column: args.histogram_column.clone(),
        boxplot_column: args.boxplot_column.clone(),
        counts_column: args.counts_column.clone(),
    };
    debug!("Report options: {options:?}");
    let report = report::build_report(&table, &options).context("Building report")?;
    emit(args.input.format, &report, render::render_report)?;
    info!(
        "Reported on {} numeric and {} categorical column(s)",
        report.classification.numeric.len(),
        report.classification.categorical.len()
    );
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let (table, config) = load_input(&args.input)?;
    let rows = args
        .rows
        .or(config.preview_rows)
        .unwrap_or(preview::DEFAULT_PREVIEW_ROWS);
    let head = preview::preview(&table, rows);
    emit(args.input.format, &head, render::render_preview)?;
    info!("Displayed {} row(s) from {:?}", head.rows.len(), args.input.input);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    columns: Vec<ColumnTypeEntry>,
    classification: ColumnClassification,
}

fn handle_classify(args: &InputArgs) -> Result<()> {
    let (table, _) = load_input(args)?;
    let output = ClassifyOutput {
        columns: classify::column_types(&table),
        classification: classify::classify(&table),
    };
    emit(args.format, &output, |output| {
        render::render_classification(&output.columns, &output.classification)
    })?;
    info!(
        "Classified {} numeric and {} categorical column(s)",
        output.classification.numeric.len(),
        output.classification.categorical.len()
    );
    Ok(())
}

fn handle_describe(args: &InputArgs) -> Result<()> {
    let (table, _) = load_input(args)?;
    let summary = summary::describe(&table);
    emit(args.format, &summary, |summary| render::render_summary(summary))?;
    info!("Described {} column(s)", summary.len());
    Ok(())
}

fn handle_correlation(args: &InputArgs) -> Result<()> {
    let (table, _) = load_input(args)?;
    let planner = ChartPlanner::new(&table);
    let matrix = planner.correlation();
    emit(args.format, &matrix, |matrix| {
        render::render_planned(matrix, render::render_correlation)
    })
}

fn handle_chart(
    input: &InputArgs,
    build_request: impl FnOnce(&ExploreConfig) -> ChartRequest,
) -> Result<()> {
    let (table, config) = load_input(input)?;
    let request = build_request(&config);
    debug!("Chart request: {request:?}");
    let planner = ChartPlanner::new(&table);
    let chart = planner
        .plan(&request)
        .with_context(|| format!("Planning {}", request.kind))?;
    emit(input.format, &chart, |chart| {
        render::render_planned(chart, render::render_chart)
    })?;
    if chart.is_ready() {
        info!("Planned {} for {:?}", request.kind, input.input);
    } else {
        info!("The {} is not applicable to {:?}", request.kind, input.input);
    }
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
