//! Similarity scoring between a project and one stored title.
//!
//! Scores start from a neutral baseline of 50. Each of eight dimensions adds
//! a bonus on a match and subtracts a penalty on a mismatch, so weak titles
//! drop below the baseline instead of sitting at zero. A small recency bonus
//! is added on top and the total is clamped to `[0, 100]`.
//!
//! Match reasons are collected in evaluation order (genre, scale, vfx,
//! action, period, star power, country, runtime); renderers rely on it.

use serde::Serialize;

use crate::core::project::ProjectAttributes;
use crate::core::taxonomy::{CountryBucket, GenreBucket, Ordinal, RuntimeTier, ScaleTier, tier_name};
use crate::core::title::TitleRecord;

/// Neutral starting score
pub const BASELINE: f64 = 50.0;

/// Share of the bonus granted for a near match on genre, scale, country and runtime
const NEAR_FACTOR: f64 = 0.3;

/// Share of the bonus (or penalty) applied one or two adjacency steps away
const DISTANCE_FACTOR: f64 = 0.4;

/// Share of the penalty applied when either side has no data
const NO_DATA_FACTOR: f64 = 0.3;

/// Bonus/penalty pair for one dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight
{
    pub bonus: f64,
    pub penalty: f64,
}

/// Scoring dimensions in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension
{
    Genre,
    Scale,
    Vfx,
    Action,
    Period,
    StarPower,
    Country,
    Runtime,
}

impl Dimension
{
    pub const ALL: [Dimension; 8] = [
        Dimension::Genre,
        Dimension::Scale,
        Dimension::Vfx,
        Dimension::Action,
        Dimension::Period,
        Dimension::StarPower,
        Dimension::Country,
        Dimension::Runtime,
    ];

    pub const fn weight(self) -> Weight
    {
        let (bonus, penalty) = match self
        {
            Dimension::Genre => (12.0, 10.0),
            Dimension::Scale => (10.0, 8.0),
            Dimension::Vfx | Dimension::Action | Dimension::Period => (6.0, 5.0),
            Dimension::StarPower | Dimension::Country | Dimension::Runtime => (4.0, 3.0),
        };
        Weight { bonus, penalty }
    }

    /// Prefix used in match reasons
    pub const fn display(self) -> &'static str
    {
        match self
        {
            Dimension::Genre => "Genre",
            Dimension::Scale => "Scale",
            Dimension::Vfx => "Vfx",
            Dimension::Action => "Action",
            Dimension::Period => "Period",
            Dimension::StarPower => "Star Power",
            Dimension::Country => "Country",
            Dimension::Runtime => "Runtime",
        }
    }
}

/// Coarse closeness for the bucketed dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closeness
{
    Exact,
    Near,
    Distant,
}

/// Score and ordered match reasons for one title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Similarity
{
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Running total while dimensions are evaluated
struct Tally
{
    score: f64,
    reasons: Vec<String>,
}

impl Tally
{
    fn reward(
        &mut self,
        dim: Dimension,
        factor: f64,
        reason: Option<String>,
    )
    {
        self.score += dim
            .weight()
            .bonus
            * factor;
        if let Some(r) = reason
        {
            self.reasons
                .push(r);
        }
    }

    fn penalize(
        &mut self,
        dim: Dimension,
        factor: f64,
    )
    {
        self.score -= dim
            .weight()
            .penalty
            * factor;
    }
}

/// True when any raw genre belongs to the bucket
pub fn matches_genre(
    bucket: GenreBucket,
    genres: &[String],
) -> bool
{
    genres
        .iter()
        .any(|g| {
            bucket
                .genres()
                .contains(&g.as_str())
        })
}

/// True when any raw genre is one of the bucket's related genres
pub fn related_genre(
    bucket: GenreBucket,
    genres: &[String],
) -> bool
{
    genres
        .iter()
        .any(|g| {
            bucket
                .related_genres()
                .contains(&g.as_str())
        })
}

/// Scale closeness: same tier, one tier apart, or anything else
pub fn match_scale(
    user: ScaleTier,
    stored: Option<&str>,
) -> Closeness
{
    match stored.and_then(ScaleTier::from_label)
    {
        Some(tier) if tier == user => Closeness::Exact,
        Some(tier) if tier.steps_to(user) == 1 => Closeness::Near,
        _ => Closeness::Distant,
    }
}

/// Adjacency credit: 1.0 exact, 0.6 one step, 0.3 two steps, 0.0 otherwise
pub fn distance_score<T: Ordinal>(
    a: T,
    b: T,
) -> f64
{
    match a.steps_to(b)
    {
        0 => 1.0,
        1 => 0.6,
        2 => 0.3,
        _ => 0.0,
    }
}

/// Country closeness against the title's production countries
pub fn match_country(
    bucket: CountryBucket,
    countries: &[String],
) -> Closeness
{
    let Some(primary) = countries.first()
    else
    {
        return Closeness::Distant;
    };

    if bucket.contains(primary)
    {
        return Closeness::Exact;
    }

    // The complement bucket only ever looks at the primary country
    if bucket != CountryBucket::AsiaOther
        && countries
            .iter()
            .any(|c| bucket.contains(c))
    {
        return Closeness::Near;
    }

    Closeness::Distant
}

/// Runtime closeness; missing or out-of-band runtimes are distant
pub fn match_runtime(
    user: RuntimeTier,
    minutes: Option<i64>,
) -> Closeness
{
    match minutes
        .filter(|m| *m > 0)
        .and_then(RuntimeTier::for_minutes)
    {
        Some(tier) if tier == user => Closeness::Exact,
        Some(tier) if tier.steps_to(user) == 1 => Closeness::Near,
        _ => Closeness::Distant,
    }
}

/// Extra points for fresh titles: +4 within a year, +2 at two, +1 at three
pub fn recency_bonus(
    release_year: Option<i32>,
    current_year: i32,
) -> f64
{
    match release_year.map(|y| current_year.saturating_sub(y))
    {
        Some(age) if age <= 1 => 4.0,
        Some(2) => 2.0,
        Some(3) => 1.0,
        _ => 0.0,
    }
}

/// Score one title against the project.
///
/// `current_year` drives the recency bonus and must be supplied by the caller.
pub fn compute_similarity(
    user: &ProjectAttributes,
    title: &TitleRecord,
    current_year: i32,
) -> Similarity
{
    let mut tally = Tally {
        score: BASELINE,
        reasons: Vec::new(),
    };

    score_genre(&mut tally, user.genre, &title.genres);
    score_scale(&mut tally, user.scale, title.computed_scale.as_deref());

    score_distance(&mut tally, Dimension::Vfx, user.vfx, title.computed_vfx.as_deref());
    score_distance(&mut tally, Dimension::Action, user.action, title.computed_action.as_deref());
    score_distance(&mut tally, Dimension::Period, user.period, title.computed_period.as_deref());
    score_distance(
        &mut tally,
        Dimension::StarPower,
        user.star_power,
        title
            .computed_star_power
            .as_deref(),
    );

    if let Some(country) = user.country
    {
        score_country(&mut tally, country, &title.production_countries);
    }
    if let Some(runtime) = user.runtime
    {
        score_runtime(&mut tally, runtime, title.runtime);
    }

    tally.score += recency_bonus(title.release_year(), current_year);

    Similarity {
        score: tally
            .score
            .clamp(0.0, 100.0),
        reasons: tally.reasons,
    }
}

fn score_genre(
    tally: &mut Tally,
    bucket: GenreBucket,
    genres: &[String],
)
{
    // Absent genre data counts as a mismatch, unlike the distance attributes
    let Some(first) = genres.first()
    else
    {
        tally.penalize(Dimension::Genre, 1.0);
        return;
    };

    if matches_genre(bucket, genres)
    {
        tally.reward(Dimension::Genre, 1.0, Some(format!("Genre: {first}")));
    }
    else if related_genre(bucket, genres)
    {
        tally.reward(Dimension::Genre, NEAR_FACTOR, Some(format!("Genre: ~{first}")));
    }
    else
    {
        tally.penalize(Dimension::Genre, 1.0);
    }
}

fn score_scale(
    tally: &mut Tally,
    user: ScaleTier,
    stored: Option<&str>,
)
{
    let shown = stored.map(tier_name);

    match (match_scale(user, stored), shown)
    {
        (Closeness::Exact, Some(name)) =>
        {
            tally.reward(Dimension::Scale, 1.0, Some(format!("Scale: {name}")))
        }
        (Closeness::Near, Some(name)) =>
        {
            tally.reward(Dimension::Scale, NEAR_FACTOR, Some(format!("Scale: ~{name}")))
        }
        _ => tally.penalize(Dimension::Scale, 1.0),
    }
}

fn score_distance<T: Ordinal>(
    tally: &mut Tally,
    dim: Dimension,
    user: Option<T>,
    stored: Option<&str>,
)
{
    let stored = stored
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (Some(user), Some(raw)) = (user, stored)
    else
    {
        tally.penalize(dim, NO_DATA_FACTOR);
        return;
    };

    // An unrecognised stored label is as far away as it gets
    let closeness = T::from_label(raw)
        .map(|v| distance_score(user, v))
        .unwrap_or(0.0);

    if closeness >= 1.0
    {
        tally.reward(dim, 1.0, Some(format!("{}: {raw}", dim.display())));
    }
    else if closeness >= 0.6
    {
        tally.reward(dim, DISTANCE_FACTOR, Some(format!("{}: ~{raw}", dim.display())));
    }
    else if closeness >= 0.3
    {
        tally.penalize(dim, DISTANCE_FACTOR);
    }
    else
    {
        tally.penalize(dim, 1.0);
    }
}

fn score_country(
    tally: &mut Tally,
    bucket: CountryBucket,
    countries: &[String],
)
{
    match match_country(bucket, countries)
    {
        Closeness::Exact =>
        {
            let reason = countries
                .first()
                .map(|c| format!("Country: {c}"));
            tally.reward(Dimension::Country, 1.0, reason);
        }
        Closeness::Near => tally.reward(Dimension::Country, NEAR_FACTOR, None),
        Closeness::Distant => tally.penalize(Dimension::Country, 1.0),
    }
}

fn score_runtime(
    tally: &mut Tally,
    tier: RuntimeTier,
    minutes: Option<i64>,
)
{
    match match_runtime(tier, minutes)
    {
        Closeness::Exact =>
        {
            let reason = minutes.map(|m| format!("Runtime: {m}min"));
            tally.reward(Dimension::Runtime, 1.0, reason);
        }
        Closeness::Near => tally.reward(Dimension::Runtime, NEAR_FACTOR, None),
        Closeness::Distant => tally.penalize(Dimension::Runtime, 1.0),
    }
}
