// Entry point and CLI flow.
//
// Every render fetches the activity table afresh, filters it for the chosen
// depot and period, and prints the benchmark table. `menu` runs the same pass
// from an interactive selection loop.
use anyhow::{Context, Result};
use clap::Parser;
use depot_dashboard::benchmarks::{BenchmarkSet, BUILTIN_BENCHMARKS};
use depot_dashboard::config::{Cli, Command, PeriodKind, ReportArgs};
use depot_dashboard::filter::{depot_names, month_name, years_for, Quarter, TimePeriod};
use depot_dashboard::output;
use depot_dashboard::report::{render, RenderOutcome, Selection};
use depot_dashboard::source::{ActivitySource, CsvSource};
use depot_dashboard::types::ActivityRecord;
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let source = CsvSource::new(&cli.data);
    let overridden;
    let benchmarks: &BenchmarkSet = match &cli.benchmarks {
        Some(path) => {
            overridden = BenchmarkSet::from_json_file(path)
                .with_context(|| format!("loading benchmarks from {}", path.display()))?;
            &overridden
        }
        None => &*BUILTIN_BENCHMARKS,
    };

    match cli.command {
        Command::Depots => {
            for name in depot_names(&fetch(&source)?) {
                println!("{}", name);
            }
        }
        Command::Years { depot } => {
            for year in years_for(&fetch(&source)?, &depot) {
                println!("{}", year);
            }
        }
        Command::Report(args) => run_report(&source, benchmarks, &args)?,
        Command::Menu => run_menu(&source, benchmarks)?,
    }
    Ok(())
}

fn fetch(source: &CsvSource) -> Result<Vec<ActivityRecord>> {
    source
        .fetch_all()
        .with_context(|| format!("fetching activity records from {}", source.path().display()))
}

fn run_report(source: &CsvSource, benchmarks: &BenchmarkSet, args: &ReportArgs) -> Result<()> {
    let records = fetch(source)?;
    let selection = args.selection(&records)?;
    let outcome = render(&records, &selection, benchmarks);
    print!("{}", output::render_text(&outcome));

    if let RenderOutcome::Table(report) = &outcome {
        if let Some(path) = &args.csv {
            output::write_csv(path, &report.display)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "metric table exported");
        }
        if let Some(path) = &args.json {
            output::write_report_json(path, report)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "report exported");
        }
    }
    Ok(())
}

/// Read a single trimmed line after printing `prompt`.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    if let Ok(0) = io::stdin().read_line(&mut buf) {
        // stdin closed mid-session
        println!();
        std::process::exit(0);
    }
    buf.trim().to_string()
}

/// Numbered pick from `options`; re-asks until the answer is in range.
fn pick<T: Clone>(title: &str, options: &[(String, T)]) -> T {
    println!("{}", title);
    for (i, (label, _)) in options.iter().enumerate() {
        println!("[{}] {}", i + 1, label);
    }
    loop {
        match read_line("Enter choice: ").parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return options[n - 1].1.clone(),
            _ => println!("Invalid choice. Please enter 1-{}.", options.len()),
        }
    }
}

/// Ask whether to go back to the selection menu. `true` means `Y`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn ask_period(records: &[ActivityRecord], depot: &str) -> Option<TimePeriod> {
    let kinds: Vec<(String, PeriodKind)> = PeriodKind::ALL
        .iter()
        .map(|k| (k.label().to_string(), *k))
        .collect();
    let kind = pick("Select Time Period:", &kinds);

    if kind == PeriodKind::Daily {
        loop {
            let input = read_line("Select Date (YYYY-MM-DD): ");
            match input.parse() {
                Ok(date) => return Some(TimePeriod::Daily(date)),
                Err(_) => println!("Invalid date. Please use YYYY-MM-DD."),
            }
        }
    }

    let years: Vec<(String, i32)> = years_for(records, depot)
        .into_iter()
        .map(|y| (y.to_string(), y))
        .collect();
    if years.is_empty() {
        return None;
    }
    let year = pick("Select Year:", &years);
    match kind {
        PeriodKind::Monthly => {
            let months: Vec<(String, u32)> =
                (1..=12).map(|m| (month_name(m).to_string(), m)).collect();
            TimePeriod::monthly(year, pick("Select Month:", &months)).ok()
        }
        PeriodKind::Quarterly => {
            let quarters: Vec<(String, Quarter)> = Quarter::ALL
                .iter()
                .map(|q| (q.label().to_string(), *q))
                .collect();
            Some(TimePeriod::quarterly(year, pick("Select Quarter:", &quarters)))
        }
        _ => Some(TimePeriod::Yearly(year)),
    }
}

fn run_menu(source: &CsvSource, benchmarks: &BenchmarkSet) -> Result<()> {
    loop {
        let records = fetch(source)?;
        let depots: Vec<(String, String)> = depot_names(&records)
            .into_iter()
            .map(|d| (d.clone(), d))
            .collect();
        if depots.is_empty() {
            warn!("activity table has no depots");
            println!("No depots found in {}.", source.path().display());
            return Ok(());
        }

        let depot = pick("Select Depot:", &depots);
        let outcome = match ask_period(&records, &depot) {
            Some(period) => render(&records, &Selection { depot, period }, benchmarks),
            None => RenderOutcome::NoData,
        };
        print!("{}", output::render_text(&outcome));

        if !prompt_back_to_menu() {
            println!("Exiting the program.");
            return Ok(());
        }
    }
}
