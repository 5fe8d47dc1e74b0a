//! `prodcost comps`: rank comparable titles for a project.

use anyhow::Result;
use owo_colors::Style;
use serde::Serialize;
use tracing::instrument;

use crate::cli::{AppContext, CompsArgs, OutputFormat};
use crate::commands::query::{ComparableRow, comparables_table, paint, prepare, print_comparables};
use crate::core::project::ProjectAttributes;
use crate::core::selector::select_comparables;

/// JSON document printed by `--format json`
#[derive(Debug, Serialize)]
pub struct CompsReport
{
    pub as_of_year: i32,
    pub project: ProjectAttributes,
    pub comparables: Vec<ComparableRow>,
}

#[instrument(skip_all, fields(genre = %args.project.genre, scale = %args.project.scale))]
pub fn run(
    args: CompsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let query = prepare(&args.project, &args.query)?;
    let comparables = select_comparables(&query.project, &query.corpus.titles, query.select);
    let rows = ComparableRow::rows(&comparables);

    match args
        .query
        .format
    {
        OutputFormat::Json =>
        {
            let report = CompsReport {
                as_of_year: query
                    .select
                    .current_year,
                project: query.project,
                comparables: rows,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table =>
        {
            if rows.is_empty()
            {
                print_no_matches(ctx);
            }
            else
            {
                println!("{}", comparables_table(&rows));
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
                    query
                        .select
                        .current_year
                );
            }
            print_comparables(&rows, ctx);
        }
    }

    Ok(())
}

pub(crate) fn print_no_matches(ctx: &AppContext)
{
    println!(
        "{} no comparables matched the scale tier and recency window",
        paint(ctx, "None:", Style::new().yellow().bold())
    );
}
