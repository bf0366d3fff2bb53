//! Projection driver: rolls pay, contributions and ledgers forward month by month

use super::calendar::{first_of_month, month_starts, EventCalendar};
use super::contributions::ContributionCalculator;
use super::events::EventTag;
use super::pay::PayEngine;
use super::records::{MonthRecord, Projection};
use super::state::ProjectionState;
use crate::error::ProjectionError;
use crate::input::ProjectionInput;
use crate::rules::SchemeRules;
use chrono::{Datelike, Months, NaiveDate};

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    rules: SchemeRules,
}

/// Per-run collaborators built once from the input
struct MonthContext {
    calendar: EventCalendar,
    pay: PayEngine,
    contributions: ContributionCalculator,
    monthly_rate: f64,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given rules
    pub fn new(rules: SchemeRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SchemeRules {
        &self.rules
    }

    /// Retirement date for a date of birth (same month and day, clamped for 29 February)
    pub fn retirement_date(&self, date_of_birth: NaiveDate) -> Option<NaiveDate> {
        date_of_birth.checked_add_months(Months::new(self.rules.retirement_age_months()))
    }

    /// Project from the month containing `as_of` through the retirement month
    pub fn project(&self, input: &ProjectionInput, as_of: NaiveDate) -> Result<Projection, ProjectionError> {
        input.validate()?;
        self.check_date_of_birth(input.date_of_birth, as_of)?;

        let retirement_date = self
            .retirement_date(input.date_of_birth)
            .ok_or(ProjectionError::DateOutOfRange(input.date_of_birth))?;
        if retirement_date <= as_of {
            return Err(ProjectionError::RetirementNotInFuture { retirement_date, as_of });
        }

        let months = month_starts(as_of, retirement_date)?;
        let start = first_of_month(as_of);
        let first_year = start.year();

        let ctx = MonthContext {
            calendar: EventCalendar::new(
                &input.promotions,
                input.increment_month,
                self.rules.da_schedule.clone(),
            ),
            pay: PayEngine::new(&self.rules, first_year, input.pc_2030_factor, input.pc_2040_factor),
            contributions: ContributionCalculator::new(
                input.own_contribution_pct,
                input.employer_contribution_pct,
                self.rules.outflow.clone(),
            ),
            monthly_rate: input.monthly_interest_rate(),
        };

        for promo in ctx.calendar.promotions_outside(start, first_of_month(retirement_date)) {
            log::warn!(
                "promotion in {}-{:02} falls outside the projection horizon and will not apply",
                promo.year,
                promo.month
            );
        }

        log::debug!(
            "projecting {} months from {} to {} (first year {})",
            months.len(),
            start,
            retirement_date,
            first_year
        );

        let mut state = ProjectionState::from_input(input);
        let mut records = Vec::with_capacity(months.len());

        for month in months {
            let record = self.calculate_month(&ctx, &mut state, month);
            records.push(record);
        }

        if let Some(last) = records.last() {
            log::info!(
                "projection complete: {} months, final corpus {:.2}",
                state.months_projected,
                last.total_corpus
            );
        }

        Ok(Projection::new(retirement_date, records))
    }

    /// Members must be between the earliest accepted birth date and the minimum age
    fn check_date_of_birth(&self, date_of_birth: NaiveDate, as_of: NaiveDate) -> Result<(), ProjectionError> {
        let earliest = self.rules.earliest_date_of_birth;
        let latest = self
            .rules
            .latest_date_of_birth(as_of)
            .ok_or(ProjectionError::DateOutOfRange(as_of))?;

        if date_of_birth < earliest || date_of_birth > latest {
            return Err(ProjectionError::InvalidDateOfBirth {
                date_of_birth,
                earliest,
                latest,
            });
        }
        Ok(())
    }

    /// Calculate one month and advance the carried state
    fn calculate_month(&self, ctx: &MonthContext, state: &mut ProjectionState, month: NaiveDate) -> MonthRecord {
        let year = month.year();
        let calendar_month = month.month();

        let revisions = ctx.calendar.revisions_for(year, calendar_month);
        let (pay, mut events) = ctx.pay.step(state.pay, year, &revisions);

        let contributions = ctx.contributions.calculate(pay.pf_pay());
        let ledgers = state
            .ledgers
            .roll_forward(calendar_month, &contributions, ctx.monthly_rate);

        if ledgers.interest_credited {
            events.push(EventTag::PreviousFyInterestCredited);
        }

        state.advance_month(pay);
        MonthRecord::new(month, &pay, &contributions, &ledgers, events)
    }
}

/// Project with the default scheme rules
pub fn compute_projection(input: &ProjectionInput, as_of: NaiveDate) -> Result<Projection, ProjectionError> {
    ProjectionEngine::default().project(input, as_of)
}
