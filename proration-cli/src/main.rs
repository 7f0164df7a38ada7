use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use proration_cli::config::{Config, OutputFormat};
use proration_cli::{csv_loader, logging, report};
use proration_core::parse::parse_amount;
use proration_core::{
    CertificateInput, CertificateWorksheet, DayPartition, OwnershipShare, ValuationInput,
    ValuationWorksheet,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Property tax and city planning tax proration for real-estate closings.
///
/// Works out the annual tax from assessed values or from a tax certificate
/// and splits it between seller and buyer by calendar days. The seller
/// bears Jan 1 to the day before closing; the buyer bears the closing date
/// to Dec 31.
#[derive(Debug, Parser)]
#[command(name = "proration", version, about)]
struct Cli {
    /// Config file. Defaults to ./proration.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a text report.
    #[arg(long, global = true)]
    json: bool,

    /// Show every worksheet line, not only the settlement.
    #[arg(long, global = true)]
    detail: bool,

    /// Log level or filter directive (overrides the config file).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate from assessed values and an ownership share.
    Valuation(ValuationArgs),
    /// Calculate from the amounts on a tax certificate.
    Certificate(CertificateArgs),
    /// Show the seller and buyer day counts for a closing date.
    Days(DateArg),
    /// Calculate every row of a CSV file.
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct DateArg {
    /// Closing date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl DateArg {
    fn closing_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

// Amounts are taken as text and read leniently, so "12,345,678" works and
// an unreadable value counts as 0.

#[derive(Debug, Args)]
struct ValuationArgs {
    #[command(flatten)]
    date: DateArg,

    /// Assessed building value.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    building: String,

    /// Land property-tax base.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    land_property_base: String,

    /// Land city-planning-tax base.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    land_city_planning_base: String,

    /// Ownership share numerator.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    numerator: String,

    /// Ownership share denominator. Defaults to the configured value.
    #[arg(long, allow_hyphen_values = true)]
    denominator: Option<String>,
}

#[derive(Debug, Args)]
struct CertificateArgs {
    #[command(flatten)]
    date: DateArg,

    /// Building property tax from the certificate.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    building_property_tax: String,

    /// Building city planning tax from the certificate.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    building_city_planning_tax: String,

    /// Land property tax from the certificate.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    land_property_tax: String,

    /// Land city planning tax from the certificate.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    land_city_planning_tax: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BatchKind {
    Valuation,
    Certificate,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Which worksheet the rows are for.
    kind: BatchKind,

    /// CSV file with one closing per row.
    #[arg(short, long)]
    file: PathBuf,
}

// ─── settings ────────────────────────────────────────────────────────────────

/// Config file values with command-line flags applied on top.
struct Settings {
    format: OutputFormat,
    detail: bool,
    default_denominator: u64,
}

impl Settings {
    fn resolve(
        cli: &Cli,
        config: &Config,
    ) -> Self {
        Self {
            format: if cli.json {
                OutputFormat::Json
            } else {
                config.output.format
            },
            detail: cli.detail || config.output.detail,
            default_denominator: config.ownership.default_denominator,
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_valuation(
    args: &ValuationArgs,
    settings: &Settings,
) -> Result<String> {
    let denominator = args
        .denominator
        .clone()
        .unwrap_or_else(|| settings.default_denominator.to_string());

    let input = ValuationInput {
        closing_date: args.date.closing_date(),
        building_value: parse_amount(&args.building),
        land_property_tax_base: parse_amount(&args.land_property_base),
        land_city_planning_tax_base: parse_amount(&args.land_city_planning_base),
        ownership_share: OwnershipShare::from_text(&args.numerator, &denominator),
    };

    let worksheet = ValuationWorksheet::standard();
    let breakdown = worksheet.calculate(&input);
    info!(
        closing_date = %breakdown.closing_date,
        final_tax = %breakdown.final_tax,
        "valuation worksheet complete"
    );

    match settings.format {
        OutputFormat::Json => Ok(report::to_json(&breakdown)?),
        OutputFormat::Text => Ok(report::render_valuation(
            &breakdown,
            worksheet.rates(),
            settings.detail,
        )),
    }
}

fn run_certificate(
    args: &CertificateArgs,
    settings: &Settings,
) -> Result<String> {
    let input = CertificateInput {
        closing_date: args.date.closing_date(),
        building_property_tax: parse_amount(&args.building_property_tax),
        building_city_planning_tax: parse_amount(&args.building_city_planning_tax),
        land_property_tax: parse_amount(&args.land_property_tax),
        land_city_planning_tax: parse_amount(&args.land_city_planning_tax),
    };

    let breakdown = CertificateWorksheet.calculate(&input);
    info!(
        closing_date = %breakdown.closing_date,
        total_tax = %breakdown.total_tax,
        "certificate worksheet complete"
    );

    match settings.format {
        OutputFormat::Json => Ok(report::to_json(&breakdown)?),
        OutputFormat::Text => Ok(report::render_certificate(&breakdown, settings.detail)),
    }
}

fn run_days(
    args: &DateArg,
    settings: &Settings,
) -> Result<String> {
    let partition = DayPartition::for_closing_date(args.closing_date());

    match settings.format {
        OutputFormat::Json => Ok(report::to_json(&partition)?),
        OutputFormat::Text => Ok(report::render_partition(&partition)),
    }
}

fn run_batch(
    args: &BatchArgs,
    settings: &Settings,
) -> Result<String> {
    let path = &args.file;

    let rendered = match args.kind {
        BatchKind::Valuation => {
            let inputs = csv_loader::load_valuations_from_file(path, settings.default_denominator)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let worksheet = ValuationWorksheet::standard();
            let breakdowns: Vec<_> = inputs.iter().map(|i| worksheet.calculate(i)).collect();
            info!(rows = breakdowns.len(), "valuation batch complete");

            match settings.format {
                OutputFormat::Json => report::to_json(&breakdowns)?,
                OutputFormat::Text => breakdowns
                    .iter()
                    .map(|b| report::render_valuation(b, worksheet.rates(), settings.detail))
                    .collect::<Vec<_>>()
                    .join("\n"),
            }
        }
        BatchKind::Certificate => {
            let inputs = csv_loader::load_certificates_from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let breakdowns: Vec<_> = inputs
                .iter()
                .map(|i| CertificateWorksheet.calculate(i))
                .collect();
            info!(rows = breakdowns.len(), "certificate batch complete");

            match settings.format {
                OutputFormat::Json => report::to_json(&breakdowns)?,
                OutputFormat::Text => breakdowns
                    .iter()
                    .map(|b| report::render_certificate(b, settings.detail))
                    .collect::<Vec<_>>()
                    .join("\n"),
            }
        }
    };
    Ok(rendered)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level, config.logging.file.as_deref())?;
    debug!(?config, "configuration resolved");

    let settings = Settings::resolve(&cli, &config);

    let output = match &cli.command {
        Command::Valuation(args) => run_valuation(args, &settings)?,
        Command::Certificate(args) => run_certificate(args, &settings)?,
        Command::Days(args) => run_days(args, &settings)?,
        Command::Batch(args) => run_batch(args, &settings)?,
    };

    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}
