//! `prodcost label`: compute the stored attribute labels for a corpus file.

use anyhow::{Context, Result};
use owo_colors::Style;
use tracing::{info, instrument, warn};

use crate::cli::{AppContext, LabelArgs};
use crate::commands::query::paint;
use crate::core::labeling::{ActorTiers, label_title};
use crate::infra::config::{expand_path, load_config};
use crate::infra::corpus::{load_actor_tiers, load_corpus, save_corpus};

/// Label counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSummary
{
    pub titles: usize,
    pub titles_changed: usize,
    pub labels_written: usize,
}

#[instrument(skip_all, fields(overwrite = args.overwrite, dry_run = args.dry_run))]
pub fn run(
    args: LabelArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config().unwrap_or_default();

    let corpus_path = args
        .corpus
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| config.corpus_path());
    let output_path = args
        .output
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| corpus_path.clone());

    let tiers = match args
        .actor_tiers
        .as_deref()
    {
        Some(path) => load_actor_tiers(&expand_path(path))
            .with_context(|| format!("Failed to load actor tiers from {}", path.display()))?,
        None =>
        {
            let path = config.actor_tiers_path();
            if path.exists()
            {
                load_actor_tiers(&path)?
            }
            else
            {
                warn!(path = %path.display(), "no actor tier file; star power falls back to cast size");
                ActorTiers::default()
            }
        }
    };

    let mut corpus = load_corpus(&corpus_path)
        .with_context(|| format!("Failed to load corpus from {}", corpus_path.display()))?;

    let mut summary = LabelSummary {
        titles: corpus.len(),
        ..LabelSummary::default()
    };
    for title in &mut corpus.titles
    {
        let written = label_title(title, &tiers, args.overwrite);
        if written > 0
        {
            summary.titles_changed += 1;
            summary.labels_written += written;
        }
    }
    info!(?summary, "labeling finished");

    if args.dry_run
    {
        if !ctx.quiet
        {
            println!(
                "{} would write {} labels on {} of {} titles",
                paint(ctx, "DRY RUN:", Style::new().yellow()),
                summary.labels_written,
                summary.titles_changed,
                summary.titles
            );
        }
        return Ok(());
    }

    save_corpus(&output_path, &corpus)
        .with_context(|| format!("Failed to write labeled corpus to {}", output_path.display()))?;

    if !ctx.quiet
    {
        println!(
            "{} {} labels on {} of {} titles to {}",
            paint(ctx, "Wrote", Style::new().green().bold()),
            summary.labels_written,
            summary.titles_changed,
            summary.titles,
            output_path.display()
        );
    }
    Ok(())
}
