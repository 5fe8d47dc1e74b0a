//! Recency-weighted budget aggregation over ranked comparables.
//!
//! Each usable comparable (positive budget, parseable release year) gets a
//! combined weight of `similarity * recency multiplier`. Its budget, optionally
//! normalized to the target year's dollars, contributes in proportion to that
//! weight. `low` and `high` are the extreme normalized budgets.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::inflation::{DEFAULT_TARGET_YEAR, adjust};
use crate::core::selector::Comparable;

/// Recency multiplier by age in whole years; ages past the end use the last step
pub const RECENCY_STEPS: [f64; 7] = [
    1.00, // released this year
    1.00, // one year old
    0.85, // two
    0.70, // three
    0.55, // four
    0.40, // five
    0.25, // six and older
];

/// Recency multiplier for an age in years; future releases count as new
pub fn recency_multiplier(age_years: i32) -> f64
{
    let idx = usize::try_from(age_years.max(0))
        .unwrap_or(0)
        .min(RECENCY_STEPS.len() - 1);
    RECENCY_STEPS[idx]
}

/// Aggregation knobs; `current_year` is always injected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateOptions
{
    pub current_year: i32,
    pub normalize: bool,
    pub target_year: i32,
}

impl EstimateOptions
{
    pub fn new(current_year: i32) -> Self
    {
        Self {
            current_year,
            normalize: true,
            target_year: DEFAULT_TARGET_YEAR,
        }
    }

    pub fn with_normalize(
        mut self,
        normalize: bool,
    ) -> Self
    {
        self.normalize = normalize;
        self
    }

    pub fn with_target_year(
        mut self,
        target_year: i32,
    ) -> Self
    {
        self.target_year = target_year;
        self
    }
}

/// One comparable's share of the weighted estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution
{
    pub title: String,
    pub year: i32,
    pub raw_budget: i64,
    pub normalized_budget: i64,
    pub similarity: f64,
    pub recency_multiplier: f64,
    pub weight: f64,
    pub share: f64,
    pub contribution: f64,
}

/// Low/base/high estimate with its per-title breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEstimate
{
    pub low: i64,
    pub base: f64,
    pub high: i64,
    pub normalized: bool,
    pub target_year: i32,
    pub comparable_count: usize,
    pub contributions: Vec<Contribution>,
}

impl BudgetEstimate
{
    /// Base estimate rounded to whole currency units
    pub fn base_rounded(&self) -> i64
    {
        self.base
            .round() as i64
    }
}

/// Aggregation result; missing budget data is a normal outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimateOutcome
{
    Estimate(BudgetEstimate),
    NoBudgetData
    {
        comparable_count: usize,
    },
}

impl EstimateOutcome
{
    pub fn estimate(&self) -> Option<&BudgetEstimate>
    {
        match self
        {
            EstimateOutcome::Estimate(e) => Some(e),
            EstimateOutcome::NoBudgetData { .. } => None,
        }
    }
}

/// Weighted budget estimate from ranked comparables
#[instrument(skip_all, fields(comparables = comparables.len(), normalize = opts.normalize))]
pub fn estimate_budget(
    comparables: &[Comparable<'_>],
    opts: EstimateOptions,
) -> EstimateOutcome
{
    let mut rows: Vec<Contribution> = comparables
        .iter()
        .filter_map(|c| {
            let raw = c
                .title
                .budget()?;
            let year = c
                .title
                .release_year()?;

            let normalized = if opts.normalize
            {
                adjust(raw, year, opts.target_year)
            }
            else
            {
                raw
            };
            let multiplier = recency_multiplier(
                opts.current_year
                    .saturating_sub(year),
            );

            Some(Contribution {
                title: c
                    .title
                    .title
                    .clone(),
                year,
                raw_budget: raw,
                normalized_budget: normalized,
                similarity: c.score,
                recency_multiplier: multiplier,
                weight: c.score * multiplier,
                share: 0.0,
                contribution: 0.0,
            })
        })
        .collect();

    if rows.is_empty()
    {
        debug!("no comparable carries budget data");
        return EstimateOutcome::NoBudgetData {
            comparable_count: comparables.len(),
        };
    }

    let total_weight: f64 = rows
        .iter()
        .map(|r| r.weight)
        .sum();
    let equal_share = 1.0 / rows.len() as f64;

    for row in &mut rows
    {
        // All-zero weights fall back to a plain average
        row.share = if total_weight > 0.0
        {
            row.weight / total_weight
        }
        else
        {
            equal_share
        };
        row.contribution = row.share * row.normalized_budget as f64;
    }

    let low = rows
        .iter()
        .map(|r| r.normalized_budget)
        .min()
        .unwrap_or_default();
    let high = rows
        .iter()
        .map(|r| r.normalized_budget)
        .max()
        .unwrap_or_default();
    let base: f64 = rows
        .iter()
        .map(|r| r.contribution)
        .sum();

    debug!(low, high, base, usable = rows.len(), "budget estimate computed");

    EstimateOutcome::Estimate(BudgetEstimate {
        low,
        base: base.clamp(low as f64, high as f64),
        high,
        normalized: opts.normalize,
        target_year: opts.target_year,
        comparable_count: comparables.len(),
        contributions: rows,
    })
}
