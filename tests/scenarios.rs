//! Worked examples through the public library API.

use prodcost::core::selector::DEFAULT_MAX_YEARS;
use prodcost::core::similarity::match_scale;
use prodcost::core::{
    Comparable, EstimateOptions, EstimateOutcome, GenreBucket, ProjectAttributes, ScaleTier,
    SelectOptions, compute_similarity, estimate_budget, select_comparables,
};

mod util;
use util::{AS_OF, title};

fn drama(scale: ScaleTier) -> ProjectAttributes
{
    ProjectAttributes::new(GenreBucket::Drama, scale)
}

#[test]
fn test_fresh_exact_title_is_selected_with_reasons()
{
    let corpus = vec![title(
        "Same Year Drama",
        AS_OF,
        &["Drama"],
        "Mid-Budget ($20-50M)",
        Some(30_000_000),
    )];

    let picked = select_comparables(&drama(ScaleTier::MidBudget), &corpus, SelectOptions::new(AS_OF));

    assert_eq!(picked.len(), 1);
    let top = &picked[0];
    assert_eq!(top.title.title, "Same Year Drama");

    // Bonuses before the unlabeled distance attributes are charged
    let ceiling = 50.0 + 12.0 + 10.0 + 4.0;
    let no_data = 0.3 * (5.0 + 5.0 + 5.0 + 3.0);
    assert!((top.score - (ceiling - no_data)).abs() < 1e-9, "score {}", top.score);
    assert_eq!(top.reasons, vec!["Genre: Drama", "Scale: Mid-Budget"]);
}

#[test]
fn test_blockbuster_never_reaches_micro_project()
{
    let corpus = vec![title(
        "Tentpole",
        AS_OF,
        &["Drama"],
        "Blockbuster ($100M+)",
        Some(200_000_000),
    )];
    let project = drama(ScaleTier::Micro);

    // The scorer alone still produces a positive score
    assert!(compute_similarity(&project, &corpus[0], AS_OF).score > 0.0);
    assert_eq!(
        match_scale(ScaleTier::Micro, corpus[0].computed_scale.as_deref()),
        prodcost::core::similarity::Closeness::Distant
    );

    let picked = select_comparables(&project, &corpus, SelectOptions::new(AS_OF));
    assert!(picked.is_empty());
}

#[test]
fn test_recency_weighting_pulls_toward_newer_budget()
{
    let newer = title("Newer", AS_OF - 1, &["Drama"], "Indie ($5-20M)", Some(10_000_000));
    let older = title(
        "Older",
        AS_OF - DEFAULT_MAX_YEARS as i32,
        &["Drama"],
        "Indie ($5-20M)",
        Some(40_000_000),
    );
    let comps = vec![
        Comparable {
            title: &newer,
            score: 90.0,
            reasons: vec![],
        },
        Comparable {
            title: &older,
            score: 90.0,
            reasons: vec![],
        },
    ];

    let outcome = estimate_budget(&comps, EstimateOptions::new(AS_OF).with_normalize(false));
    let EstimateOutcome::Estimate(est) = outcome
    else
    {
        panic!("expected an estimate");
    };

    assert_eq!(est.low, 10_000_000);
    assert_eq!(est.high, 40_000_000);
    assert!(est.base < 25_000_000.0, "base {}", est.base);
    assert!((est.base - 10_000_000.0).abs() < (est.base - 25_000_000.0).abs());
    // weights 90 * 1.0 and 90 * 0.25
    assert_eq!(est.base_rounded(), 16_000_000);
}

#[test]
fn test_window_edge_is_inclusive()
{
    let corpus = vec![
        title("Edge", AS_OF - 6, &["Drama"], "Indie ($5-20M)", None),
        title("Too Old", AS_OF - 7, &["Drama"], "Indie ($5-20M)", None),
    ];

    let picked = select_comparables(&drama(ScaleTier::Indie), &corpus, SelectOptions::new(AS_OF));
    let names: Vec<&str> = picked
        .iter()
        .map(|c| c.title.title.as_str())
        .collect();
    assert_eq!(names, vec!["Edge"]);
}
