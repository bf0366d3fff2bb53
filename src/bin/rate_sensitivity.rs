//! Final corpus across a grid of PF interest rates
//!
//! Runs the same input at every rate in parallel and writes one row per rate.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use pf_projection::input::load_input;
use pf_projection::{ProjectionInput, ScenarioRunner, SchemeRules};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "rate_sensitivity", about = "Final PF corpus across a range of interest rates")]
struct Cli {
    #[arg(long, help = "Projection input as JSON; defaults to the built-in reference member")]
    input: Option<PathBuf>,

    #[arg(long, help = "Scheme rules JSON")]
    rules: Option<PathBuf>,

    #[arg(long, help = "Projection date (YYYY-MM-DD); defaults to today")]
    as_of: Option<NaiveDate>,

    #[arg(long, default_value_t = 7.0, help = "Lowest annual rate in percent")]
    min_rate: f64,
    #[arg(long, default_value_t = 9.5, help = "Highest annual rate in percent")]
    max_rate: f64,
    #[arg(long, default_value_t = 0.25, help = "Rate step in percent")]
    step: f64,

    #[arg(short, long, default_value = "rate_sensitivity.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SensitivityRow {
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "FinalOwnBalance")]
    final_own_balance: f64,
    #[serde(rename = "FinalEmployerBalance")]
    final_employer_balance: f64,
    #[serde(rename = "FinalOutflowBalance")]
    final_outflow_balance: f64,
    #[serde(rename = "TotalCorpus")]
    total_corpus: f64,
    #[serde(rename = "TotalInterest")]
    total_interest: f64,
}

fn rate_grid(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max < min {
        return vec![min];
    }
    let count = ((max - min) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| min + step * i as f64).collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    let input = match &cli.input {
        Some(path) => load_input(path).with_context(|| format!("loading input {}", path.display()))?,
        None => ProjectionInput::default(),
    };
    let runner = match &cli.rules {
        Some(path) => ScenarioRunner::from_rules_path(path, as_of)
            .with_context(|| format!("loading rules {}", path.display()))?,
        None => ScenarioRunner::with_rules(SchemeRules::default(), as_of),
    };

    let rates = rate_grid(cli.min_rate, cli.max_rate, cli.step);
    println!("Running {} scenarios as of {}...", rates.len(), as_of);

    let start = Instant::now();
    let results = runner.run_interest_rates(&input, &rates);
    println!("Projections complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    println!("\n{:>8} {:>16} {:>16} {:>16}", "Rate %", "Total Corpus", "Interest", "Outflow");
    println!("{}", "-".repeat(60));

    for (rate, result) in rates.iter().zip(results) {
        let projection = result.with_context(|| format!("projection at {:.2}%", rate))?;
        let summary = projection.summary();
        let row = SensitivityRow {
            interest_rate: *rate,
            final_own_balance: summary.final_own_balance,
            final_employer_balance: summary.final_employer_balance,
            final_outflow_balance: summary.final_outflow_balance,
            total_corpus: summary.total_corpus,
            total_interest: summary.total_own_interest + summary.total_employer_interest,
        };

        println!(
            "{:>8.2} {:>16.2} {:>16.2} {:>16.2}",
            row.interest_rate, row.total_corpus, row.total_interest, row.final_outflow_balance
        );
        writer.serialize(&row)?;
    }

    writer.flush()?;
    println!("\nOutput written to {}", cli.output.display());
    Ok(())
}
