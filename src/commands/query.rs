//! Shared plumbing for `comps` and `estimate`: config layering, corpus
//! loading, and the comparable rows both commands render.

use std::fmt::Display;

use anyhow::{Context, Result};
use chrono::Datelike;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::{AppContext, ProjectArgs, QueryArgs};
use crate::core::inflation::format_currency;
use crate::core::project::ProjectAttributes;
use crate::core::selector::{Comparable, SelectOptions};
use crate::infra::config::{Config, expand_path, load_config};
use crate::infra::corpus::{Corpus, load_corpus};

/// Everything a ranking command needs, resolved from flags and config
#[derive(Debug)]
pub struct Query
{
    pub config: Config,
    pub corpus: Corpus,
    pub project: ProjectAttributes,
    pub select: SelectOptions,
}

/// The year treated as "now": `--as-of-year` or the local clock
pub fn current_year(as_of: Option<i32>) -> i32
{
    as_of.unwrap_or_else(|| {
        chrono::Local::now()
            .year()
    })
}

/// Resolve flags over config defaults and load the corpus
pub fn prepare(
    project: &ProjectArgs,
    query: &QueryArgs,
) -> Result<Query>
{
    let config = load_config().unwrap_or_default();

    let corpus_path = query
        .corpus
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| config.corpus_path());
    let corpus = load_corpus(&corpus_path)
        .with_context(|| format!("Failed to load corpus from {}", corpus_path.display()))?;

    let select = SelectOptions::new(current_year(query.as_of_year))
        .with_limit(
            query
                .limit
                .unwrap_or(config.selection.limit),
        )
        .with_max_years(
            query
                .max_years
                .unwrap_or(config.selection.max_years),
        );

    Ok(Query {
        config,
        corpus,
        project: ProjectAttributes::from(project),
        select,
    })
}

/// Flattened comparable for JSON and table output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparableRow
{
    pub rank: usize,
    pub title: String,
    pub year: Option<i32>,
    pub score: f64,
    pub budget: Option<i64>,
    pub scale: Option<String>,
    pub reasons: Vec<String>,
}

/// Display cells for `--format table`
#[derive(Tabled)]
pub struct ComparableCells
{
    #[tabled(rename = "#")]
    rank: usize,
    title: String,
    year: String,
    score: String,
    budget: String,
    scale: String,
    reasons: String,
}

impl From<&ComparableRow> for ComparableCells
{
    fn from(row: &ComparableRow) -> Self
    {
        Self {
            rank: row.rank,
            title: row
                .title
                .clone(),
            year: display_year(&row.year),
            score: format!("{:.1}", row.score),
            budget: display_budget(&row.budget),
            scale: row
                .scale
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            reasons: row
                .reasons
                .join(", "),
        }
    }
}

impl ComparableRow
{
    pub fn rows(comparables: &[Comparable<'_>]) -> Vec<ComparableRow>
    {
        comparables
            .iter()
            .enumerate()
            .map(|(i, c)| ComparableRow {
                rank: i + 1,
                title: c
                    .title
                    .title
                    .clone(),
                year: c
                    .title
                    .release_year(),
                score: c.score,
                budget: c
                    .title
                    .budget(),
                scale: c
                    .title
                    .computed_scale
                    .clone(),
                reasons: c
                    .reasons
                    .clone(),
            })
            .collect()
    }
}

fn display_year(year: &Option<i32>) -> String
{
    year.map_or_else(|| "-".to_string(), |y| y.to_string())
}

fn display_budget(budget: &Option<i64>) -> String
{
    format_currency(budget.unwrap_or(0))
}

/// Apply a style unless color is disabled
pub fn paint(
    ctx: &AppContext,
    text: impl Display,
    style: Style,
) -> String
{
    if ctx.no_color
    {
        text.to_string()
    }
    else
    {
        text.style(style)
            .to_string()
    }
}

/// Render comparables as a `tabled` table
pub fn comparables_table(rows: &[ComparableRow]) -> String
{
    Table::new(
        rows.iter()
            .map(ComparableCells::from),
    )
    .to_string()
}

/// Text listing shared by `comps` and `estimate`
pub fn print_comparables(
    rows: &[ComparableRow],
    ctx: &AppContext,
)
{
    for row in rows
    {
        println!(
            "{:>2}. {} ({}) {}  {}",
            row.rank,
            paint(ctx, &row.title, Style::new().bold()),
            display_year(&row.year),
            paint(ctx, format!("[{:.1}]", row.score), Style::new().cyan()),
            paint(ctx, display_budget(&row.budget), Style::new().green()),
        );
        if !row
            .reasons
            .is_empty()
        {
            println!("    {}", paint(ctx, row.reasons.join(", "), Style::new().dimmed()));
        }
    }
}
