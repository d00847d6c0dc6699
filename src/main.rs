//! Media Spend Planner CLI
//!
//! Command-line interface for running what-if media spend projections

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use media_spend_planner::params::RawInputs;
use media_spend_planner::projection::{CumulativeSeed, ProjectionConfig};
use media_spend_planner::reach::{ReachCurve, DEFAULT_DIMINISHING_THRESHOLD};
use media_spend_planner::reference::{load_reference, DEFAULT_REFERENCE_PATH};
use media_spend_planner::report::{format_thousands, ChartSeries, Column, DisplayTable, ProjectionReport, TableOrder};
use media_spend_planner::scenario::{sweep_upweights, ScenarioRunner};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "media-spend-planner", version, about = "What-if projections for media spend planning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project impact period by period and print the table
    Project(ProjectArgs),
    /// Sweep budget upweight and report the final cumulative total for each value
    Sweep(SweepArgs),
    /// Show the cumulative reach curve and its diminishing-returns point
    Reach(ReachArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Compounding,
    SpendScaled,
    Classic,
}

impl Variant {
    fn name(&self) -> &'static str {
        match self {
            Variant::Compounding => "compounding",
            Variant::SpendScaled => "spend-scaled",
            Variant::Classic => "classic",
        }
    }

    fn config(&self) -> ProjectionConfig {
        match self {
            Variant::Compounding => ProjectionConfig::compounding(),
            Variant::SpendScaled => ProjectionConfig::spend_scaled(),
            Variant::Classic => ProjectionConfig::classic(),
        }
    }

    fn default_inputs(&self) -> RawInputs {
        match self {
            Variant::Compounding => RawInputs::default(),
            Variant::SpendScaled => RawInputs::spend_scaled_defaults(),
            Variant::Classic => RawInputs::classic_defaults(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OrderArg {
    /// Periods in the order they were supplied
    Chronological,
    /// Latest period first
    LatestFirst,
}

impl From<OrderArg> for TableOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Chronological => TableOrder::Chronological,
            OrderArg::LatestFirst => TableOrder::LatestFirst,
        }
    }
}

/// Inputs shared by `project` and `sweep`
#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Reference table (CSV with Period and optional MediaSpend columns)
    #[arg(long, env = "PLANNER_REFERENCE", default_value = DEFAULT_REFERENCE_PATH)]
    reference: PathBuf,

    /// Formula set to project with
    #[arg(long, value_enum, env = "PLANNER_VARIANT", default_value_t = Variant::Compounding)]
    variant: Variant,

    /// JSON scenario file with slider values; flags below override it
    #[arg(long, env = "PLANNER_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Budget upweight (%), 0-500 (classic: 0-100)
    #[arg(long, env = "PLANNER_BUDGET_UPWEIGHT")]
    budget_upweight: Option<f64>,

    /// Effectiveness (%), 0-500 (classic: 10-500)
    #[arg(long, env = "PLANNER_EFFECTIVENESS")]
    effectiveness: Option<f64>,

    /// Natural growth (%), 0-500 (classic: 0-20)
    #[arg(long, env = "PLANNER_NATURAL_GROWTH")]
    natural_growth: Option<f64>,

    /// Brand allocation (%), 0-100; performance gets the rest
    #[arg(long, env = "PLANNER_BRAND_ALLOCATION")]
    brand_allocation: Option<f64>,

    /// Brand/performance split preset, e.g. 70/30
    #[arg(long, env = "PLANNER_SPLIT")]
    split: Option<String>,

    /// Base contribution (%), 0-100
    #[arg(long, env = "PLANNER_BASE_CONTRIBUTION")]
    base_contribution: Option<f64>,

    /// Media contribution (%), 0-100
    #[arg(long, env = "PLANNER_MEDIA_CONTRIBUTION")]
    media_contribution: Option<f64>,

    /// Long-term media contribution (%), 0-100
    #[arg(long, env = "PLANNER_LT_MEDIA_CONTRIBUTION")]
    lt_media_contribution: Option<f64>,

    /// Brand channel effectiveness, 0.0-1.0 (classic variant)
    #[arg(long, env = "PLANNER_BRAND_EFFECTIVENESS")]
    brand_effectiveness: Option<f64>,

    /// Performance channel effectiveness, 0.0-1.0 (classic variant)
    #[arg(long, env = "PLANNER_PERFORMANCE_EFFECTIVENESS")]
    performance_effectiveness: Option<f64>,

    /// Comma-separated period labels; defaults to the reference table
    #[arg(long, env = "PLANNER_PERIODS")]
    periods: Option<String>,

    /// Comma-separated media spend per period
    #[arg(long, env = "PLANNER_SPEND")]
    spend: Option<String>,

    /// Upweight of the first period
    #[arg(long)]
    anchor: Option<f64>,

    /// Cumulative total reported for the first period
    #[arg(long)]
    seed: Option<f64>,

    /// Lookback depth of the improvement term
    #[arg(long)]
    lookback: Option<usize>,

    /// Spend used for periods without one
    #[arg(long)]
    default_spend: Option<f64>,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Table row order (default: latest-first for compounding, chronological otherwise)
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Write the cumulative-impact series to this CSV file
    #[arg(long)]
    chart_out: Option<PathBuf>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// First budget upweight (%) of the sweep
    #[arg(long, default_value_t = 100.0)]
    from: f64,

    /// Last budget upweight (%) of the sweep
    #[arg(long, default_value_t = 300.0)]
    to: f64,

    /// Budget upweight (%) step; at most 10,000 points per sweep
    #[arg(long, default_value_t = 25.0)]
    step: f64,

    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ReachArgs {
    /// CSV with Period and Reach columns; defaults to the built-in curve
    #[arg(long, env = "PLANNER_REACH")]
    reach_file: Option<PathBuf>,

    /// Share of peak marginal reach that marks diminishing returns
    #[arg(long, default_value_t = DEFAULT_DIMINISHING_THRESHOLD)]
    threshold: f64,

    /// Write the reach series to this CSV file
    #[arg(long)]
    chart_out: Option<PathBuf>,

    #[arg(long)]
    json: bool,
}

/// A fully prepared projection: runner plus resolved parameters
struct Prepared {
    runner: ScenarioRunner,
    params: media_spend_planner::Parameters,
}

impl ScenarioArgs {
    fn raw_inputs(&self) -> Result<RawInputs> {
        let mut raw = match &self.scenario {
            Some(path) => RawInputs::from_json_file(path)
                .with_context(|| format!("reading scenario {}", path.display()))?,
            None => self.variant.default_inputs(),
        };

        let overrides = [
            (self.budget_upweight, &mut raw.budget_upweight_pct),
            (self.effectiveness, &mut raw.effectiveness_pct),
            (self.natural_growth, &mut raw.natural_growth_pct),
            (self.brand_allocation, &mut raw.brand_allocation_pct),
            (self.base_contribution, &mut raw.base_contribution_pct),
            (self.media_contribution, &mut raw.media_contribution_pct),
            (self.lt_media_contribution, &mut raw.lt_media_contribution_pct),
            (self.brand_effectiveness, &mut raw.brand_effectiveness),
            (self.performance_effectiveness, &mut raw.performance_effectiveness),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }

        // An explicit allocation wins over a preset from the scenario
        if self.brand_allocation.is_some() {
            raw.split = None;
        }
        if self.split.is_some() {
            raw.split = self.split.clone();
        }
        if self.periods.is_some() {
            raw.periods = self.periods.clone();
        }
        if self.spend.is_some() {
            raw.spend = self.spend.clone();
        }

        Ok(raw)
    }

    fn config(&self) -> ProjectionConfig {
        let mut config = self.variant.config();
        if let Some(anchor) = self.anchor {
            config.upweight_anchor = anchor;
        }
        if let Some(seed) = self.seed {
            config.cumulative_seed = CumulativeSeed::Fixed(seed);
        }
        if let Some(lookback) = self.lookback {
            config.lookback_periods = lookback;
        }
        if let Some(spend) = self.default_spend {
            config.default_media_spend = spend;
        }
        config
    }

    fn prepare(&self) -> Result<Prepared> {
        let reference = load_reference(&self.reference)
            .with_context(|| format!("loading reference table {}", self.reference.display()))?;

        let config = self.config();
        let resolved = self
            .raw_inputs()?
            .resolve_for(&config.variant)
            .context("invalid scenario input")?;

        let periods = resolved.periods.unwrap_or_else(|| reference.labels());
        let spend = resolved
            .spend
            .unwrap_or_else(|| reference.spend_or(config.default_media_spend));

        Ok(Prepared {
            runner: ScenarioRunner::new(config, periods, spend),
            params: resolved.params,
        })
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Project(args) => project(args),
        Command::Sweep(args) => sweep(args),
        Command::Reach(args) => reach(args),
    }
}

fn project(args: ProjectArgs) -> Result<()> {
    let variant = args.scenario.variant;
    let prepared = args.scenario.prepare()?;
    let table = prepared.runner.run(&prepared.params)?;

    if let Some(path) = &args.chart_out {
        write_series(path, &ChartSeries::cumulative_impact(&table))?;
    }

    if args.json {
        let report = ProjectionReport::new(variant.name(), &prepared.params, &table);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let config_variant = &prepared.runner.config().variant;
    let order = TableOrder::resolve(args.order.map(TableOrder::from), config_variant);
    let columns = Column::for_variant(config_variant);
    let display = DisplayTable::build(&table, &columns, order);

    println!("Media Spend Projection ({}, {} periods)", variant.name(), table.len());
    println!(
        "Brand/Performance split: {:.0}/{:.0}\n",
        prepared.params.brand_allocation,
        prepared.params.performance_allocation()
    );
    print!("{}", display.render());

    let summary = table.summary();
    println!("\nSummary:");
    println!("  Total Spend:            {}", format_thousands(summary.total_spend));
    println!("  Total Impact:           {}", format_thousands(summary.total_impact));
    println!("  Final Cumulative Total: {}", format_thousands(summary.final_cumulative_total));

    Ok(())
}

fn sweep(args: SweepArgs) -> Result<()> {
    let upweights = sweep_upweights(args.from, args.to, args.step).context("invalid sweep range")?;
    let prepared = args.scenario.prepare()?;

    let points = prepared
        .runner
        .sweep_budget_upweight(&prepared.params, &upweights)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("{:>10} {:>18} {:>22}", "Upweight", "Total Impact", "Final Cumulative");
    println!("{}", "-".repeat(52));
    for point in &points {
        println!(
            "{:>9.0}% {:>18} {:>22}",
            point.budget_upweight * 100.0,
            format_thousands(point.total_impact),
            format_thousands(point.final_cumulative_total),
        );
    }

    Ok(())
}

fn reach(args: ReachArgs) -> Result<()> {
    let curve = match &args.reach_file {
        Some(path) => {
            let reference = load_reference(path)
                .with_context(|| format!("loading reach table {}", path.display()))?;
            let reach = reference
                .reach()
                .with_context(|| format!("{} needs a Reach value on every row", path.display()))?;
            ReachCurve::from_points(&reference.labels(), &reach)?
        }
        None => ReachCurve::default_curve(),
    };

    let series = curve.series(args.threshold);
    if let Some(path) = &args.chart_out {
        write_series(path, &series)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!("{:>8} {:>14} {:>14}", "Period", "Reach", "Marginal");
    println!("{}", "-".repeat(38));
    for point in &curve.points {
        let flag = if series.marker.as_deref() == Some(point.label.as_str()) { "  <- diminishing returns" } else { "" };
        println!(
            "{:>8} {:>14} {:>14}{}",
            point.label,
            format_thousands(point.reach),
            format_thousands(point.marginal),
            flag,
        );
    }

    Ok(())
}

fn write_series(path: &Path, series: &ChartSeries) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    series.write_csv(file)?;
    log::info!("chart series written to {}", path.display());
    Ok(())
}
