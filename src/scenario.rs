//! Scenario runner for batch projections
//!
//! Holds one set of scheme rules and an as-of date, then runs many input
//! variants against them in parallel.

use crate::error::{LoadError, ProjectionError};
use crate::input::ProjectionInput;
use crate::projection::{Projection, ProjectionEngine};
use crate::rules::SchemeRules;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::Path;

/// Pre-configured runner for what-if projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(as_of);
///
/// for result in runner.run_interest_rates(&input, &[7.5, 8.25, 9.0]) {
///     println!("{:.2}", result?.summary().total_corpus);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    as_of: NaiveDate,
}

impl ScenarioRunner {
    /// Create runner with the default scheme rules
    pub fn new(as_of: NaiveDate) -> Self {
        Self::with_rules(SchemeRules::default(), as_of)
    }

    /// Create runner with pre-built rules
    pub fn with_rules(rules: SchemeRules, as_of: NaiveDate) -> Self {
        Self {
            engine: ProjectionEngine::new(rules),
            as_of,
        }
    }

    /// Create runner by loading rules from a JSON file
    pub fn from_rules_path(path: &Path, as_of: NaiveDate) -> Result<Self, LoadError> {
        Ok(Self::with_rules(SchemeRules::from_json_path(path)?, as_of))
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn rules(&self) -> &SchemeRules {
        self.engine.rules()
    }

    /// Run a single projection
    pub fn run(&self, input: &ProjectionInput) -> Result<Projection, ProjectionError> {
        self.engine.project(input, self.as_of)
    }

    /// Run projections for several inputs in parallel, preserving input order
    pub fn run_batch(&self, inputs: &[ProjectionInput]) -> Vec<Result<Projection, ProjectionError>> {
        log::debug!("running {} scenarios as of {}", inputs.len(), self.as_of);
        inputs.par_iter().map(|input| self.run(input)).collect()
    }

    /// Re-run one input at each annual interest rate (percent)
    pub fn run_interest_rates(
        &self,
        input: &ProjectionInput,
        rates: &[f64],
    ) -> Vec<Result<Projection, ProjectionError>> {
        let inputs: Vec<ProjectionInput> = rates
            .iter()
            .map(|&rate| ProjectionInput {
                annual_interest_rate: rate,
                ..input.clone()
            })
            .collect();
        self.run_batch(&inputs)
    }

    /// Re-run one input for each `(2030 factor, 2040 factor)` pair
    pub fn run_pay_commission_factors(
        &self,
        input: &ProjectionInput,
        factors: &[(f64, f64)],
    ) -> Vec<Result<Projection, ProjectionError>> {
        let inputs: Vec<ProjectionInput> = factors
            .iter()
            .map(|&(pc_2030_factor, pc_2040_factor)| ProjectionInput {
                pc_2030_factor,
                pc_2040_factor,
                ..input.clone()
            })
            .collect();
        self.run_batch(&inputs)
    }
}
