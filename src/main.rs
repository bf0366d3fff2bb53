//! PF Projection CLI
//!
//! Projects PF balances month by month to retirement, prints the ledger head,
//! summary, milestones and pension estimate, and writes the ledger CSV.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use pf_projection::input::{load_input, load_promotions};
use pf_projection::report::export_ledger;
use pf_projection::{
    LedgerFilter, MonthRecord, PensionError, PensionEstimate, PensionEstimator, PensionProfile, Projection,
    ProjectionEngine, ProjectionInput, ProjectionSummary, SchemeRules, YearlySummary,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pf_projection",
    about = "Month-by-month PF corpus projection to retirement with higher pension estimate"
)]
struct Cli {
    #[arg(long, help = "Full projection input as JSON; replaces the individual input flags")]
    input: Option<PathBuf>,

    #[arg(long, help = "Promotion schedule CSV with columns Year, Month, HikePercent")]
    promotions: Option<PathBuf>,

    #[arg(long, help = "Scheme rules JSON overriding the built-in constants")]
    rules: Option<PathBuf>,

    #[arg(long, help = "Projection date (YYYY-MM-DD); defaults to today")]
    as_of: Option<NaiveDate>,

    #[arg(long, default_value = "1980-01-01")]
    dob: NaiveDate,
    #[arg(long, default_value_t = 80_000.0)]
    basic: f64,
    #[arg(long, default_value_t = 30_000.0)]
    da: f64,
    #[arg(long, default_value_t = 2_148_242.0)]
    own_balance: f64,
    #[arg(long, default_value_t = 1_637_688.0)]
    employer_balance: f64,
    #[arg(long, default_value_t = 0.0)]
    outflow_balance: f64,
    #[arg(long, default_value_t = 7, help = "Month of the annual increment (1-12)")]
    increment_month: u32,
    #[arg(long, default_value_t = 12.0, help = "Own contribution in percent of PF pay")]
    own_pct: f64,
    #[arg(long, default_value_t = 12.0, help = "Employer contribution in percent of PF pay")]
    employer_pct: f64,
    #[arg(long, default_value_t = 8.25, help = "Annual PF interest rate in percent")]
    interest_rate: f64,
    #[arg(long, default_value_t = 1.86)]
    pc_2030_factor: f64,
    #[arg(long, default_value_t = 1.4)]
    pc_2040_factor: f64,

    #[arg(long, help = "Date of joining; with the August 2014 pay, enables the pension estimate")]
    date_of_joining: Option<NaiveDate>,
    #[arg(long, help = "Highest PF pay drawn up to August 2014")]
    highest_pf_pay_aug2014: Option<f64>,

    #[arg(long, help = "Show and export only this fiscal year, e.g. 2027-28")]
    fiscal_year: Option<String>,
    #[arg(long)]
    from_year: Option<i32>,
    #[arg(long)]
    to_year: Option<i32>,
    #[arg(long, help = "Show and export only months with events")]
    events_only: bool,

    #[arg(long, default_value_t = 24, help = "Ledger rows printed to the console")]
    rows: usize,
    #[arg(short, long, default_value = "pf_projection.csv")]
    output: PathBuf,
    #[arg(long, help = "Round pay and contribution columns up to the next 10 in the export")]
    round_up: bool,
    #[arg(long, help = "Print the full result as JSON instead of tables")]
    json: bool,
}

impl Cli {
    fn projection_input(&self) -> Result<ProjectionInput> {
        let mut input = match &self.input {
            Some(path) => load_input(path).with_context(|| format!("loading input {}", path.display()))?,
            None => ProjectionInput {
                date_of_birth: self.dob,
                current_basic: self.basic,
                current_da: self.da,
                own_balance: self.own_balance,
                employer_balance: self.employer_balance,
                outflow_balance: self.outflow_balance,
                increment_month: self.increment_month,
                own_contribution_pct: self.own_pct,
                employer_contribution_pct: self.employer_pct,
                annual_interest_rate: self.interest_rate,
                pc_2030_factor: self.pc_2030_factor,
                pc_2040_factor: self.pc_2040_factor,
                promotions: Vec::new(),
                pension: None,
            },
        };

        if let Some(path) = &self.promotions {
            input.promotions = load_promotions(path)
                .with_context(|| format!("loading promotions {}", path.display()))?;
        }
        if let Some(profile) = PensionProfile::from_form(self.date_of_joining, self.highest_pf_pay_aug2014) {
            input.pension = Some(profile);
        } else if self.date_of_joining.is_some() {
            log::warn!("--date-of-joining given without a positive --highest-pf-pay-aug2014; skipping pension estimate");
        }

        input.validate().context("invalid projection input")?;
        Ok(input)
    }

    fn filter(&self) -> LedgerFilter {
        let mut filter = LedgerFilter::new();
        filter.fiscal_year = self.fiscal_year.clone();
        if self.from_year.is_some() || self.to_year.is_some() {
            filter.year_range = Some((self.from_year.unwrap_or(i32::MIN), self.to_year.unwrap_or(i32::MAX)));
        }
        filter.events_only = self.events_only;
        filter
    }
}

/// Everything printed by `--json`
#[derive(Serialize)]
struct JsonReport<'a> {
    as_of: NaiveDate,
    summary: ProjectionSummary,
    yearly: Vec<YearlySummary>,
    pension: Option<PensionEstimate>,
    records: Vec<&'a MonthRecord>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let input = cli.projection_input()?;

    let rules = match &cli.rules {
        Some(path) => SchemeRules::from_json_path(path).with_context(|| format!("loading rules {}", path.display()))?,
        None => SchemeRules::default(),
    };
    let estimator = PensionEstimator::new(rules.pension.clone());
    let engine = ProjectionEngine::new(rules);

    let projection = engine.project(&input, as_of).context("projection failed")?;
    let selected = cli.filter().apply(projection.records());

    let pension = match &input.pension {
        Some(profile) => match estimator.estimate_for_profile(input.date_of_birth, profile, projection.records()) {
            Ok(estimate) => Some(estimate),
            Err(err @ PensionError::InsufficientHistory { .. }) => {
                eprintln!("Pension estimate unavailable: {}", err);
                None
            }
            Err(err) => return Err(err).context("pension estimate failed"),
        },
        None => None,
    };

    export_ledger(&cli.output, &selected, cli.round_up)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    if cli.json {
        let report = JsonReport {
            as_of,
            summary: projection.summary(),
            yearly: projection.yearly_summary(),
            pension,
            records: selected,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("PF Projection v0.1.0");
    println!("====================\n");
    println!("Date of Birth:   {}", input.date_of_birth.format("%d-%b-%Y"));
    println!("Retirement Date: {}", projection.retirement_date().format("%d-%b-%Y"));
    println!("Projection from: {}\n", as_of.format("%d-%b-%Y"));

    print_ledger(&selected, cli.rows);
    print_summary(&projection);
    if let Some(estimate) = &pension {
        print_pension(estimate);
    }

    println!("\nLedger written to: {}", cli.output.display());
    Ok(())
}

fn print_ledger(records: &[&MonthRecord], rows: usize) {
    println!("Ledger ({} months):", records.len());
    println!(
        "{:>8} {:>7} {:>12} {:>12} {:>12} {:>10} {:>10} {:>14} {:>14} {:>15}  {}",
        "Month", "FY", "Basic", "DA", "PF Pay", "Own", "Employer", "Own Close", "Emp Close", "Corpus", "Event"
    );
    println!("{}", "-".repeat(140));

    for record in records.iter().take(rows) {
        println!(
            "{:>8} {:>7} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>14.2} {:>14.2} {:>15.2}  {}",
            record.month_label,
            record.fiscal_year,
            record.basic,
            record.da,
            record.pf_pay,
            record.own_contribution,
            record.employer_contribution,
            record.own.closing,
            record.employer.closing,
            record.total_corpus,
            record.event_label(),
        );
    }

    if records.len() > rows {
        println!("... ({} more months)", records.len() - rows);
    }
}

fn print_summary(projection: &Projection) {
    let summary = projection.summary();
    let format_ratio = |ratio: Option<f64>| ratio.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}", r));

    println!("\nSummary:");
    println!("  Total Months:              {}", summary.total_months);
    println!("  Final Own PF Balance:      {:.2}", summary.final_own_balance);
    println!("  Final Employer PF Balance: {:.2}", summary.final_employer_balance);
    println!("  Final Outflow Balance:     {:.2}", summary.final_outflow_balance);
    println!("  Total Retirement Corpus:   {:.2}", summary.total_corpus);
    println!(
        "  Own:      contributions {:.2}, interest {:.2}, ratio {}",
        summary.total_own_contribution,
        summary.total_own_interest,
        format_ratio(summary.own_interest_ratio)
    );
    println!(
        "  Employer: contributions {:.2}, interest {:.2}, ratio {}",
        summary.total_employer_contribution,
        summary.total_employer_interest,
        format_ratio(summary.employer_interest_ratio)
    );

    println!("\nKey Events:");
    for milestone in projection.milestones().iter().filter(|m| m.is_pay_commission()) {
        println!("  {} - {}", milestone.month_label, milestone.event);
        if let (Some(pf_pay), Some(basic)) = (milestone.previous_pf_pay, milestone.previous_basic) {
            println!("    PF Pay {:.2} -> {:.2}", pf_pay, milestone.pf_pay);
            println!("    Basic  {:.2} -> {:.2}", basic, milestone.basic);
        }
        if let Some(contribution) = milestone.previous_contribution {
            println!("    Own + Company Contribution {:.2} -> {:.2}", contribution, milestone.contribution);
        }
    }
}

fn print_pension(estimate: &PensionEstimate) {
    println!("\nHigher Pension Estimate:");
    println!("  Age 58 Date:            {}", estimate.age_58_date.format("%d-%b-%Y"));
    println!("  Total Service:          {:.2} years", estimate.total_service_years);
    println!("  Service Days to Cutoff: {}", estimate.service_days_till_cutoff);
    println!("  Bonus Days:             {}", estimate.bonus_days);
    println!("  Component 1:            {:.2}", estimate.component1);
    println!("  Days After Cutoff:      {}", estimate.days_after_cutoff);
    println!(
        "  60-Month Avg PF Pay:    {:.2} ({} to {})",
        estimate.avg_pf_pay_last_60_months,
        estimate.window_start.format("%d-%b-%Y"),
        estimate.age_58_date.format("%d-%b-%Y")
    );
    println!("  Component 2:            {:.2}", estimate.component2);
    println!("  Monthly Pension:        {:.2}", estimate.monthly_pension);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_of_joining_alone_skips_pension() {
        let cli = Cli::try_parse_from(["pf_projection", "--date-of-joining", "2000-01-01"]).unwrap();
        assert_eq!(cli.projection_input().unwrap().pension, None);
    }

    #[test]
    fn test_pension_flags_build_profile() {
        let cli = Cli::try_parse_from([
            "pf_projection",
            "--date-of-joining",
            "2000-01-01",
            "--highest-pf-pay-aug2014",
            "15000",
        ])
        .unwrap();
        let profile = cli.projection_input().unwrap().pension.unwrap();
        assert_eq!(profile.date_of_joining, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(profile.highest_pf_pay_aug2014, 15_000.0);
    }
}
