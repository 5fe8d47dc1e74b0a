//! `prodcost estimate`: comparables plus a recency-weighted budget range.

use anyhow::Result;
use owo_colors::Style;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::cli::{AppContext, EstimateArgs, OutputFormat};
use crate::commands::comps::print_no_matches;
use crate::commands::query::{ComparableRow, comparables_table, paint, prepare, print_comparables};
use crate::core::estimate::{BudgetEstimate, EstimateOptions, EstimateOutcome, estimate_budget};
use crate::core::inflation::format_currency;
use crate::core::project::ProjectAttributes;
use crate::core::selector::select_comparables;

/// JSON document printed by `--format json`
#[derive(Debug, Serialize)]
pub struct EstimateReport
{
    pub as_of_year: i32,
    pub project: ProjectAttributes,
    pub comparables: Vec<ComparableRow>,
    pub estimate: EstimateOutcome,
}

#[derive(Tabled)]
struct ContributionCells
{
    title: String,
    year: i32,
    raw: String,
    normalized: String,
    similarity: String,
    recency: String,
    share: String,
}

#[instrument(skip_all, fields(genre = %args.project.genre, scale = %args.project.scale))]
pub fn run(
    args: EstimateArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let query = prepare(&args.project, &args.query)?;

    let opts = EstimateOptions::new(
        query
            .select
            .current_year,
    )
    .with_normalize(
        !args.no_normalize
            && query
                .config
                .estimate
                .normalize,
    )
    .with_target_year(
        args.target_year
            .unwrap_or(
                query
                    .config
                    .estimate
                    .target_year,
            ),
    );

    let comparables = select_comparables(&query.project, &query.corpus.titles, query.select);
    let outcome = estimate_budget(&comparables, opts);
    let rows = ComparableRow::rows(&comparables);

    match args
        .query
        .format
    {
        OutputFormat::Json =>
        {
            let report = EstimateReport {
                as_of_year: opts.current_year,
                project: query.project,
                comparables: rows,
                estimate: outcome,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table =>
        {
            if rows.is_empty()
            {
                print_no_matches(ctx);
                return Ok(());
            }
            println!("{}", comparables_table(&rows));

            match outcome
            {
                EstimateOutcome::Estimate(est) =>
                {
                    let cells: Vec<ContributionCells> = est
                        .contributions
                        .iter()
                        .map(|c| ContributionCells {
                            title: c
                                .title
                                .clone(),
                            year: c.year,
                            raw: format_currency(c.raw_budget),
                            normalized: format_currency(c.normalized_budget),
                            similarity: format!("{:.1}", c.similarity),
                            recency: format!("{:.2}", c.recency_multiplier),
                            share: format!("{:.1}%", c.share * 100.0),
                        })
                        .collect();
                    println!("{}", Table::new(cells));
                    print_range(&est, ctx);
                }
                EstimateOutcome::NoBudgetData { .. } => print_no_budget(ctx),
            }
        }
        OutputFormat::Text =>
        {
            if rows.is_empty()
            {
                print_no_matches(ctx);
                return Ok(());
            }

            if !ctx.quiet
            {
                println!(
                    "{} for {} / {} (as of {})",
                    paint(ctx, "Comparables", Style::new().bold()),
                    query
                        .project
                        .genre,
                    query
                        .project
                        .scale,
                    opts.current_year
                );
                print_comparables(&rows, ctx);
                println!();
            }

            match outcome
            {
                EstimateOutcome::Estimate(est) => print_range(&est, ctx),
                EstimateOutcome::NoBudgetData { .. } => print_no_budget(ctx),
            }
        }
    }

    Ok(())
}

fn print_range(
    est: &BudgetEstimate,
    ctx: &AppContext,
)
{
    let dollars = if est.normalized
    {
        format!("{} dollars", est.target_year)
    }
    else
    {
        "unadjusted dollars".to_string()
    };

    println!(
        "{} {} (range {} to {}, {}, {} comparables)",
        paint(ctx, "Estimate:", Style::new().green().bold()),
        paint(ctx, format_currency(est.base_rounded()), Style::new().bold()),
        format_currency(est.low),
        format_currency(est.high),
        dollars,
        est.contributions
            .len()
    );
}

fn print_no_budget(ctx: &AppContext)
{
    println!(
        "{} none of the comparables has budget data",
        paint(ctx, "No estimate:", Style::new().yellow().bold())
    );
}
