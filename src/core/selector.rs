//! Comparable selection: hard filters, scoring, ranking.
//!
//! Two gates run before any scoring. Titles older than the recency window
//! (or with no parseable year) are dropped, and so is every title whose
//! stored scale tier differs from the project's. Survivors are scored, zero
//! scores are discarded, and the rest are ranked by score with ties kept in
//! corpus order.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::core::project::ProjectAttributes;
use crate::core::similarity::compute_similarity;
use crate::core::taxonomy::{Ordinal, ScaleTier, tier_name};
use crate::core::title::TitleRecord;

/// Default number of comparables returned
pub const DEFAULT_LIMIT: usize = 5;

/// Default recency window in years
pub const DEFAULT_MAX_YEARS: u32 = 6;

/// A scored comparable borrowed from the corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparable<'a>
{
    pub title: &'a TitleRecord,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Selection knobs; `current_year` is always injected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOptions
{
    pub limit: usize,
    pub max_years: u32,
    pub current_year: i32,
}

impl SelectOptions
{
    pub fn new(current_year: i32) -> Self
    {
        Self {
            limit: DEFAULT_LIMIT,
            max_years: DEFAULT_MAX_YEARS,
            current_year,
        }
    }

    pub fn with_limit(
        mut self,
        limit: usize,
    ) -> Self
    {
        self.limit = limit;
        self
    }

    pub fn with_max_years(
        mut self,
        max_years: u32,
    ) -> Self
    {
        self.max_years = max_years;
        self
    }

    /// Oldest release year still inside the window
    pub fn min_year(&self) -> i32
    {
        let span = i32::try_from(self.max_years).unwrap_or(i32::MAX);
        self.current_year
            .saturating_sub(span)
    }
}

/// Scale gate: the stored tier name, without its range suffix, must equal
/// the project's tier name exactly
pub fn passes_scale_gate(
    user: ScaleTier,
    stored: Option<&str>,
) -> bool
{
    stored.is_some_and(|label| tier_name(label) == tier_name(user.label()))
}

/// Recency gate: unparseable years never pass
pub fn within_window(
    title: &TitleRecord,
    min_year: i32,
) -> bool
{
    title
        .release_year()
        .is_some_and(|y| y >= min_year)
}

/// Rank the corpus against the project and keep the best `limit` titles
#[instrument(skip_all, fields(limit = opts.limit, max_years = opts.max_years, corpus = corpus.len()))]
pub fn select_comparables<'a>(
    user: &ProjectAttributes,
    corpus: &'a [TitleRecord],
    opts: SelectOptions,
) -> Vec<Comparable<'a>>
{
    let min_year = opts.min_year();

    let mut stale = 0usize;
    let mut off_scale = 0usize;
    let mut scored: Vec<Comparable<'a>> = Vec::new();

    for title in corpus
    {
        if !within_window(title, min_year)
        {
            stale += 1;
            continue;
        }

        if !passes_scale_gate(user.scale, title.computed_scale.as_deref())
        {
            off_scale += 1;
            continue;
        }

        let sim = compute_similarity(user, title, opts.current_year);
        trace!(title = %title.title, score = sim.score, "scored");

        if sim.score > 0.0
        {
            scored.push(Comparable {
                title,
                score: sim.score,
                reasons: sim.reasons,
            });
        }
    }

    // sort_by is stable, so equal scores keep corpus order
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
    });
    scored.truncate(opts.limit);

    debug!(
        min_year,
        stale,
        off_scale,
        kept = scored.len(),
        scale = user.scale.label(),
        "comparable selection finished"
    );

    scored
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::taxonomy::{GenreBucket, VfxIntensity};

    const NOW: i32 = 2024;

    fn t(
        name: &str,
        genre: &str,
        scale: &str,
        date: &str,
    ) -> TitleRecord
    {
        let mut r = TitleRecord::new(name);
        r.genres = vec![genre.to_string()];
        r.computed_scale = Some(scale.to_string());
        r.release_date = Some(date.to_string());
        r
    }

    #[test]
    fn test_scale_gate_excludes_other_tiers()
    {
        let corpus = vec![
            t("Big", "Drama", "Blockbuster ($100M+)", "2023-01-01"),
            t("Small", "Drama", "Micro (<$5M)", "2023-01-01"),
            t("NoScale", "Drama", "", "2023-01-01"),
        ];
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Micro);

        let out = select_comparables(&user, &corpus, SelectOptions::new(NOW));
        let names: Vec<_> = out
            .iter()
            .map(|c| c.title.title.as_str())
            .collect();
        assert_eq!(names, vec!["Small"]);
    }

    #[test]
    fn test_recency_window_and_bad_dates()
    {
        let corpus = vec![
            t("Edge", "Drama", "Indie ($5-20M)", "2018-03-01"),
            t("Stale", "Drama", "Indie ($5-20M)", "2017-12-31"),
            t("Undated", "Drama", "Indie ($5-20M)", "unknown"),
        ];
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Indie);

        let out = select_comparables(&user, &corpus, SelectOptions::new(NOW));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title.title, "Edge");

        let narrow = SelectOptions::new(NOW).with_max_years(3);
        assert!(select_comparables(&user, &corpus, narrow).is_empty());
    }

    #[test]
    fn test_ranking_is_descending_and_stable()
    {
        let corpus = vec![
            t("First", "Comedy", "Indie ($5-20M)", "2020-01-01"),
            t("Match", "Drama", "Indie ($5-20M)", "2020-01-01"),
            t("Second", "Comedy", "Indie ($5-20M)", "2020-01-01"),
        ];
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Indie);

        let out = select_comparables(&user, &corpus, SelectOptions::new(NOW));
        let names: Vec<_> = out
            .iter()
            .map(|c| c.title.title.as_str())
            .collect();
        assert_eq!(names, vec!["Match", "First", "Second"]);
        assert_eq!(out[1].score, out[2].score);
    }

    #[test]
    fn test_limit_truncates()
    {
        let corpus: Vec<_> = (0..10)
            .map(|i| t(&format!("T{i}"), "Drama", "Indie ($5-20M)", "2022-01-01"))
            .collect();
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Indie).with_vfx(VfxIntensity::Light);

        let out = select_comparables(&user, &corpus, SelectOptions::new(NOW).with_limit(3));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].title.title, "T0");
    }

    #[test]
    fn test_huge_window_keeps_current_titles()
    {
        let corpus = vec![t("Now", "Drama", "Indie ($5-20M)", "2024-01-01")];
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Indie);

        let wide = SelectOptions::new(NOW).with_max_years(u32::MAX);
        assert_eq!(wide.min_year(), NOW - i32::MAX);
        assert_eq!(select_comparables(&user, &corpus, wide).len(), 1);

        let far_past = SelectOptions::new(i32::MIN + 1).with_max_years(u32::MAX);
        assert_eq!(far_past.min_year(), i32::MIN);
    }

    #[test]
    fn test_scale_gate_requires_exact_tier_name()
    {
        assert!(passes_scale_gate(ScaleTier::Indie, Some("Indie ($5-20M)")));
        assert!(passes_scale_gate(ScaleTier::Indie, Some("Indie")));
        assert!(!passes_scale_gate(ScaleTier::Indie, Some("indie")));
        assert!(!passes_scale_gate(ScaleTier::Indie, Some("INDIE (whatever)")));
        assert!(!passes_scale_gate(ScaleTier::MajorStudio, Some("major-studio")));
        assert!(!passes_scale_gate(ScaleTier::Indie, None));

        let corpus = vec![
            t("Lower", "Drama", "indie", "2023-01-01"),
            t("Shouty", "Drama", "INDIE (whatever)", "2023-01-01"),
            t("Proper", "Drama", "Indie ($5-20M)", "2023-01-01"),
        ];
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Indie);
        let out = select_comparables(&user, &corpus, SelectOptions::new(NOW));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title.title, "Proper");
    }

    #[test]
    fn test_empty_corpus_is_empty_result()
    {
        let user = ProjectAttributes::new(GenreBucket::Drama, ScaleTier::Indie);
        assert!(select_comparables(&user, &[], SelectOptions::new(NOW)).is_empty());
    }
}
