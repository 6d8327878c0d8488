// Entry point and CLI presentation layer.
//
// Each subcommand loads the dataset once through the process-wide cache,
// runs the relevant engine passes, and renders their results. All analysis
// lives in the library modules; this file only parses arguments and prints.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::path::PathBuf;

use tram_insight::filter::{FilterSpec, RouteSelection};
use tram_insight::loader::DatasetCache;
use tram_insight::scenario::Intervention;
use tram_insight::types::{HourCountRow, IncidentRecord, PriorityRow, RouteCountRow, Severity};
use tram_insight::window::{RushWindow, AFTERNOON_RUSH, MORNING_RUSH};
use tram_insight::{heatmap, inspect, metrics, output, priority, recommend, scenario, util, window};

// Load-once dataset handle; engine calls still receive explicit slices.
static DATASET: Lazy<DatasetCache> = Lazy::new(DatasetCache::new);

#[derive(Parser)]
#[command(
    name = "tram_insight",
    about = "Analytics over a historical streetcar incident dataset"
)]
struct Cli {
    /// Path to the incident CSV
    #[arg(long, global = true, default_value = "data/ttc_incidents.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filtered overview: summary metrics, top routes, heatmap peak
    Overview {
        /// Routes to keep, comma separated; "All" disables route filtering
        #[arg(long, value_delimiter = ',', default_value = "All")]
        routes: Vec<String>,
        /// Inclusive hour-of-day range, e.g. 5-9
        #[arg(long, default_value = "0-23")]
        hours: String,
        /// Severities to keep, comma separated; empty keeps everything
        #[arg(long, value_delimiter = ',')]
        severities: Vec<String>,
        /// Write the metrics summary to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Rush-hour deep dive for one route, with recommendations
    DeepDive {
        #[arg(long)]
        route: String,
        #[arg(long, value_enum, default_value = "morning")]
        window: WindowChoice,
    },
    /// What-if cost/benefit simulation for an intervention
    Simulate {
        #[arg(long)]
        route: String,
        /// Window start hour (inclusive)
        #[arg(long, default_value_t = 5)]
        start: u8,
        /// Window end hour (inclusive)
        #[arg(long, default_value_t = 9)]
        end: u8,
        #[arg(long, value_enum)]
        intervention: Intervention,
        /// Resource allocation level, 1 (minimal) to 10 (maximum)
        #[arg(long, default_value_t = 5)]
        strength: u8,
    },
    /// Ranked (route, hour) priority table with resource plans
    Priorities {
        #[arg(long, default_value_t = 20)]
        top: usize,
        /// Write the full ranking to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Describe an arbitrary CSV: columns, kinds, value distributions
    Inspect,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WindowChoice {
    Morning,
    Afternoon,
}

impl WindowChoice {
    fn rush_window(self) -> RushWindow {
        match self {
            WindowChoice::Morning => MORNING_RUSH,
            WindowChoice::Afternoon => AFTERNOON_RUSH,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    match cli.command {
        Command::Overview {
            routes,
            hours,
            severities,
            export,
        } => {
            let data = DATASET.get_or_load(&cli.data)?;
            run_overview(&data, &routes, &hours, &severities, export.as_deref())
        }
        Command::DeepDive { route, window } => {
            let data = DATASET.get_or_load(&cli.data)?;
            run_deep_dive(&data, &route, window.rush_window());
            Ok(())
        }
        Command::Simulate {
            route,
            start,
            end,
            intervention,
            strength,
        } => {
            let data = DATASET.get_or_load(&cli.data)?;
            run_simulate(&data, &route, start, end, intervention, strength)
        }
        Command::Priorities { top, export } => {
            let data = DATASET.get_or_load(&cli.data)?;
            run_priorities(&data, top, export.as_deref());
            Ok(())
        }
        Command::Inspect => run_inspect(&cli.data),
    }
}

fn parse_hours(s: &str) -> Result<(u8, u8)> {
    let (min, max) = s
        .split_once('-')
        .with_context(|| format!("hour range '{}' is not in MIN-MAX form", s))?;
    let min: u8 = min.trim().parse().context("hour range start")?;
    let max: u8 = max.trim().parse().context("hour range end")?;
    if min > 23 || max > 23 || min > max {
        bail!("hour range {}-{} is not a valid 0-23 window", min, max);
    }
    Ok((min, max))
}

fn parse_severities(labels: &[String]) -> Result<BTreeSet<Severity>> {
    let mut set = BTreeSet::new();
    for label in labels {
        match Severity::from_label(label.trim()) {
            Some(s) => {
                set.insert(s);
            }
            None => bail!("unknown severity '{}' (expected Low/Medium/High/Severe)", label),
        }
    }
    Ok(set)
}

fn run_overview(
    data: &[IncidentRecord],
    routes: &[String],
    hours: &str,
    severities: &[String],
    export: Option<&std::path::Path>,
) -> Result<()> {
    let spec = FilterSpec {
        routes: RouteSelection::from_list(routes),
        hours: parse_hours(hours)?,
        severities: parse_severities(severities)?,
    };
    let filtered = spec.apply(data);
    let summary = metrics::summarize(data, &filtered);

    output::print_section("Key Metrics");
    println!(
        "  Total Incidents:       {:>12}",
        util::format_int(summary.total_count as i64)
    );
    println!(
        "  Filtered Incidents:    {:>12} ({}% of total)",
        util::format_int(summary.filtered_count as i64),
        util::format_number(
            util::pct(summary.filtered_count as f64, summary.total_count as f64),
            1
        )
    );
    println!(
        "  Avg Delay (min):       {:>12} ({:+.1} vs overall)",
        util::format_number(summary.avg_delay, 1),
        summary.delta_from_overall
    );
    println!(
        "  High Severity:         {:>12} ({}%)",
        util::format_int(summary.high_severity_count as i64),
        util::format_number(summary.high_severity_pct, 1)
    );
    match &summary.top_route {
        Some((route, count)) => println!(
            "  Most Impacted Route:   {:>12} ({} incidents)",
            route,
            util::format_int(*count as i64)
        ),
        None => println!("  Most Impacted Route:            n/a (no data)"),
    }

    output::print_section("Top 10 Routes by Incident Count");
    let route_rows: Vec<RouteCountRow> = metrics::top_routes(&filtered, 10)
        .into_iter()
        .enumerate()
        .map(|(i, (route, count))| RouteCountRow {
            rank: i + 1,
            route,
            incidents: util::format_int(count as i64),
        })
        .collect();
    output::print_table(&route_rows);

    output::print_section("Temporal Pattern");
    let map = heatmap::Heatmap::build(&filtered);
    let peak = map.peak_cell();
    if peak.count > 0 {
        println!(
            "Peak incident time: {} at {}:00 ({} incidents)",
            util::weekday_name(peak.weekday),
            peak.hour,
            util::format_int(peak.count as i64)
        );
    } else {
        println!("No incidents match the current filters.");
    }

    if let Some(path) = export {
        if let Err(e) = output::write_json(path, &summary) {
            eprintln!("Write error: {}", e);
        } else {
            println!("\n(Summary exported to {})", path.display());
        }
    }
    Ok(())
}

fn run_deep_dive(data: &[IncidentRecord], route: &str, rush: RushWindow) {
    println!(
        "Analyzing route {} during {} ({}:00-{}:00)",
        route, rush.label, rush.start, rush.end
    );
    let stats = window::analyze_window(data, route, rush.start, rush.end);
    println!(
        "Found {} incidents during this period\n",
        util::format_int(stats.total_incidents as i64)
    );

    output::print_section("Hourly Pattern");
    let hour_rows: Vec<HourCountRow> = stats
        .hourly_counts
        .iter()
        .map(|(&hour, &count)| HourCountRow {
            hour: format!("{}:00", hour),
            incidents: util::format_int(count as i64),
        })
        .collect();
    output::print_table(&hour_rows);

    output::print_section("Severity Distribution");
    for severity in Severity::ALL.iter().rev() {
        println!(
            "  {:<8} {:>8}",
            severity,
            util::format_int(stats.severity_count(*severity) as i64)
        );
    }

    output::print_section("Recommendations");
    for rec in recommend::recommend(&stats, rush.start, rush.label) {
        println!("  - {}", rec);
    }
}

fn run_simulate(
    data: &[IncidentRecord],
    route: &str,
    start: u8,
    end: u8,
    intervention: Intervention,
    strength: u8,
) -> Result<()> {
    let result = scenario::simulate(data, route, start, end, intervention, strength)?;

    println!(
        "Scenario: {} (level {}) on route {} during {}:00-{}:00",
        intervention.label(),
        strength,
        route,
        start,
        end
    );

    output::print_section("Estimated Impact");
    println!("  Baseline Incidents:         {:>10}", util::format_int(result.baseline_count as i64));
    println!(
        "  After Intervention:         {:>10}",
        util::format_int((result.baseline_count - result.estimated_reduction) as i64)
    );
    println!(
        "  Estimated Reduction:        {:>10} ({}%)",
        util::format_int(result.estimated_reduction as i64),
        util::format_number(result.reduction_pct, 1)
    );
    println!(
        "  High Severity Baseline:     {:>10}",
        util::format_int(result.baseline_high_severity as i64)
    );
    println!(
        "  Severity Reduction:         {:>10}",
        util::format_int(result.estimated_severity_reduction as i64)
    );

    output::print_section("Cost-Benefit Estimate (monthly)");
    println!(
        "  Intervention Cost:         ${:>10}",
        util::format_int(result.intervention_cost)
    );
    println!(
        "  Estimated Savings:         ${:>10}",
        util::format_int(result.estimated_savings)
    );
    println!(
        "  Net Benefit:               ${:>10}",
        util::format_number(result.estimated_savings as f64 - result.intervention_cost as f64, 0)
    );
    println!(
        "  ROI:                        {:>10}%",
        util::format_number(result.roi_pct, 1)
    );

    if result.roi_pct > 0.0 {
        println!("\nPositive ROI: this intervention is estimated to pay for itself.");
    } else {
        println!("\nNegative ROI: consider a different level or intervention type.");
    }
    Ok(())
}

fn run_priorities(data: &[IncidentRecord], top: usize, export: Option<&std::path::Path>) {
    let entries = priority::score_all(data);

    output::print_section(&format!("Top {} Priority Intervention Areas", top));
    let rows: Vec<PriorityRow> = priority::top_n(&entries, top)
        .iter()
        .enumerate()
        .map(|(i, e)| PriorityRow {
            rank: i + 1,
            route: e.route.clone(),
            hour: format!("{}:00", e.hour),
            incidents: util::format_int(e.incident_count as i64),
            severity_score: e.severity_score,
            priority_score: util::format_number(e.priority_score, 1),
        })
        .collect();
    output::print_table(&rows);

    output::print_section("Recommended Resource Allocation (top 5)");
    for e in priority::top_n(&entries, 5) {
        let plan = priority::ResourcePlan::for_entry(e);
        println!(
            "Route {} at {}:00 (priority {})",
            e.route,
            e.hour,
            util::format_number(e.priority_score, 1)
        );
        println!("  - Deploy {} additional maintenance crew members", plan.crew_members);
        println!("  - Pre-position backup vehicle by {}:30", e.hour as i32 - 1);
        println!(
            "  - Potential reduction: {} incidents ({}%)",
            plan.estimated_reduction,
            util::format_number(plan.impact_pct, 0)
        );
        println!("  - Severity reduction: {} points\n", plan.severity_reduction);
    }

    output::print_section("Priority Distribution by Hour");
    for (hour, score) in priority::score_by_hour(&entries) {
        println!("  {:>2}:00  {:>10}", hour, util::format_number(score, 1));
    }

    if let Some(findings) = priority::key_findings(&entries) {
        output::print_section("Key Findings");
        println!("  Highest priority hour: {}:00", findings.peak_hour);
        println!("  Top routes requiring attention: {}", findings.top_routes.join(", "));
        println!(
            "  Incidents in top 20 areas: {}",
            util::format_int(findings.top_area_incidents as i64)
        );
        println!(
            "  Projected annual reduction if addressed: {}",
            util::format_int(findings.projected_annual_reduction as i64)
        );
    }

    if let Some(path) = export {
        let all_rows: Vec<PriorityRow> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| PriorityRow {
                rank: i + 1,
                route: e.route.clone(),
                hour: format!("{}:00", e.hour),
                incidents: e.incident_count.to_string(),
                severity_score: e.severity_score,
                priority_score: format!("{:.1}", e.priority_score),
            })
            .collect();
        if let Err(e) = output::write_csv(path, &all_rows) {
            eprintln!("Write error: {}", e);
        } else {
            println!("\n(Full ranking exported to {})", path.display());
        }
    }
}

fn run_inspect(path: &std::path::Path) -> Result<()> {
    let profile = inspect::inspect(path)?;

    println!(
        "Loaded {} rows from {}",
        util::format_int(profile.rows as i64),
        path.display()
    );

    output::print_section("Columns");
    for column in &profile.columns {
        println!(
            "  {:<24} {:<8} ({} non-empty)",
            column.name,
            column.kind.as_str(),
            util::format_int(column.non_empty as i64)
        );
    }

    if let Some(counts) = &profile.delay_bin_counts {
        output::print_section("delay_bin values");
        for (value, count) in counts {
            println!("  {:<10} {:>8}", value, util::format_int(*count as i64));
        }
    }
    if let Some((min, max)) = profile.hour_range {
        output::print_section("hour range");
        println!("  {} to {}", min, max);
    }
    if let Some(counts) = &profile.weekday_counts {
        output::print_section("weekday values");
        for (value, count) in counts {
            println!("  {:<10} {:>8}", value, util::format_int(*count as i64));
        }
    }
    if let Some(counts) = &profile.top_routes {
        output::print_section("route values (top 10)");
        for (value, count) in counts {
            println!("  {:<10} {:>8}", value, util::format_int(*count as i64));
        }
    }
    Ok(())
}
