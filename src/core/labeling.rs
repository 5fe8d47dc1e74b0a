//! Attribute labeling heuristics for stored titles.
//!
//! Derives the five `computed_*` labels from raw metadata: overview keywords
//! for the period, genres and budget for vfx, genres and crew jobs for action,
//! budget bands for scale, and actor tier lists for star power. Scoring never
//! calls into this module; it runs when a corpus is labeled.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::taxonomy::{ActionComplexity, Ordinal, PeriodEra, ScaleTier, StarPower, VfxIntensity};
use crate::core::title::TitleRecord;

/// Stored scale label for titles without budget data
pub const UNKNOWN_SCALE: &str = "Unknown";

const HISTORICAL_KEYWORDS: &[&str] = &[
    "medieval",
    "ancient",
    "victorian",
    "1800s",
    "civil war",
    "renaissance",
    "roman empire",
    "greek",
    "egyptian",
    "colonial",
    "18th century",
    "17th century",
    "16th century",
    "gladiator",
    "emperor",
    "rome",
    "roman",
    "viking",
    "samurai",
    "pirate",
    "musketeer",
    "napoleon",
    "revolution",
];

const PERIOD_KEYWORDS: &[&str] = &[
    "world war",
    "wwi",
    "wwii",
    "1920s",
    "1930s",
    "1940s",
    "1950s",
    "1960s",
    "1970s",
    "prohibition",
    "vietnam",
    "great depression",
    "titanic",
    "1912",
    "1910s",
    "holocaust",
    "nazi",
];

const RECENT_PAST_KEYWORDS: &[&str] = &["1980s", "1990s", "2000s", "cold war", "berlin wall", " 80s", " 90s"];

const FUTURISTIC_KEYWORDS: &[&str] = &[
    "future",
    "2100",
    "space station",
    "dystopia",
    "cyberpunk",
    "post-apocalyptic",
    "year 20",
    "ai uprising",
    "android",
    "spaceship",
    "interstellar",
    "galaxy",
    "alien planet",
];

const ACTION_GENRES: &[&str] = &["action", "adventure", "war"];
const STUNT_JOBS: &[&str] = &["stunt coordinator", "stunt double", "fight choreographer"];
const DIALOGUE_GENRES: &[&str] = &["drama", "comedy", "romance"];

/// Actor names grouped by marquee tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorTiers
{
    a_list: HashSet<String>,
    b_list: HashSet<String>,
}

/// On-disk shape: `{"tiers": {"A-List": {"actors": [...]}, ...}}`
#[derive(Debug, Deserialize, Serialize)]
struct TierFile
{
    tiers: HashMap<String, TierEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TierEntry
{
    #[serde(default)]
    actors: Vec<String>,
}

impl ActorTiers
{
    pub fn new<A, B>(
        a_list: A,
        b_list: B,
    ) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            a_list: a_list
                .into_iter()
                .map(Into::into)
                .collect(),
            b_list: b_list
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    /// Parse the tier file format; tiers other than A-List and B-List are ignored
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error>
    {
        let mut file: TierFile = serde_json::from_str(text)?;
        let mut take = |key: &str| {
            file.tiers
                .remove(key)
                .map(|e| e.actors)
                .unwrap_or_default()
        };
        let a_list = take(StarPower::AList.label());
        let b_list = take(StarPower::BList.label());
        Ok(Self::new(a_list, b_list))
    }

    pub fn is_empty(&self) -> bool
    {
        self.a_list
            .is_empty()
            && self
                .b_list
                .is_empty()
    }
}

fn lowered(values: &[String]) -> HashSet<String>
{
    values
        .iter()
        .map(|v| v.to_lowercase())
        .collect()
}

fn any_of(
    set: &HashSet<String>,
    wanted: &[&str],
) -> bool
{
    wanted
        .iter()
        .any(|w| set.contains(*w))
}

/// Period from overview and title keywords; defaults to contemporary
pub fn detect_period(
    overview: Option<&str>,
    title: &str,
) -> PeriodEra
{
    let text = format!("{} {}", overview.unwrap_or_default(), title).to_lowercase();
    if text
        .trim()
        .is_empty()
    {
        return PeriodEra::Contemporary;
    }

    let hit = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|k| text.contains(k))
    };

    // Order matters: the first matching era wins
    if hit(HISTORICAL_KEYWORDS)
    {
        PeriodEra::Historical
    }
    else if hit(PERIOD_KEYWORDS)
    {
        PeriodEra::Period
    }
    else if hit(RECENT_PAST_KEYWORDS)
    {
        PeriodEra::RecentPast
    }
    else if hit(FUTURISTIC_KEYWORDS)
    {
        PeriodEra::Futuristic
    }
    else
    {
        PeriodEra::Contemporary
    }
}

/// VFX intensity from genres and budget
pub fn detect_vfx(
    genres: &[String],
    budget: Option<i64>,
) -> VfxIntensity
{
    let genres = lowered(genres);
    let budget = budget.unwrap_or(0);

    let heavy = any_of(&genres, &["science fiction", "fantasy"]);
    let moderate = any_of(&genres, &["action", "adventure"]);
    let practical = any_of(&genres, &["horror", "thriller"]);

    if genres.contains("animation") || (heavy && budget >= 100_000_000)
    {
        VfxIntensity::Heavy
    }
    else if heavy || moderate
    {
        VfxIntensity::Moderate
    }
    else if practical || budget < 10_000_000
    {
        VfxIntensity::PracticalOnly
    }
    else
    {
        VfxIntensity::Light
    }
}

/// Action complexity from genres and crew jobs
pub fn detect_action(
    genres: &[String],
    crew_jobs: &[String],
) -> ActionComplexity
{
    let genres = lowered(genres);
    let jobs = lowered(crew_jobs);

    let action_genre = any_of(&genres, ACTION_GENRES);
    let stunt_crew = any_of(&jobs, STUNT_JOBS);

    match (action_genre, stunt_crew)
    {
        (true, true) => ActionComplexity::High,
        (true, false) | (false, true) => ActionComplexity::Moderate,
        (false, false) if any_of(&genres, DIALOGUE_GENRES) => ActionComplexity::DialogueDriven,
        (false, false) => ActionComplexity::Light,
    }
}

/// Scale tier from the raw budget; `None` when the budget is unknown
pub fn detect_scale(budget: Option<i64>) -> Option<ScaleTier>
{
    match budget?
    {
        b if b >= 100_000_000 => Some(ScaleTier::Blockbuster),
        b if b >= 50_000_000 => Some(ScaleTier::MajorStudio),
        b if b >= 20_000_000 => Some(ScaleTier::MidBudget),
        b if b >= 5_000_000 => Some(ScaleTier::Indie),
        b if b > 0 => Some(ScaleTier::Micro),
        _ => None,
    }
}

/// Star power from billing order: top three for A-list, top five for B-list
pub fn detect_star_power<'a>(
    cast: impl IntoIterator<Item = &'a str>,
    tiers: &ActorTiers,
) -> StarPower
{
    let top: Vec<&str> = cast
        .into_iter()
        .take(5)
        .collect();

    if top
        .iter()
        .take(3)
        .any(|n| {
            tiers
                .a_list
                .contains(*n)
        })
    {
        StarPower::AList
    }
    else if top
        .iter()
        .any(|n| {
            tiers
                .b_list
                .contains(*n)
        })
    {
        StarPower::BList
    }
    else if !top.is_empty()
    {
        StarPower::RisingStars
    }
    else
    {
        StarPower::EnsembleUnknown
    }
}

/// Fill a title's `computed_*` labels.
///
/// Existing labels are kept unless `overwrite` is set. Returns how many
/// labels were written.
pub fn label_title(
    title: &mut TitleRecord,
    tiers: &ActorTiers,
    overwrite: bool,
) -> usize
{
    let period = detect_period(title.overview.as_deref(), &title.title);
    let vfx = detect_vfx(&title.genres, title.budget());
    let action = detect_action(&title.genres, &title.crew_jobs);
    let scale = detect_scale(title.budget())
        .map(Ordinal::label)
        .unwrap_or(UNKNOWN_SCALE);
    let star_power = detect_star_power(title.cast_names(), tiers);

    let mut written = 0;
    let mut set = |slot: &mut Option<String>, value: &str| {
        let empty = slot
            .as_deref()
            .is_none_or(|s| {
                s.trim()
                    .is_empty()
            });
        if overwrite || empty
        {
            *slot = Some(value.to_string());
            written += 1;
        }
    };

    set(&mut title.computed_period, period.label());
    set(&mut title.computed_vfx, vfx.label());
    set(&mut title.computed_action, action.label());
    set(&mut title.computed_scale, scale);
    set(&mut title.computed_star_power, star_power.label());

    debug!(title = %title.title, written, "labeled title");
    written
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn strings(v: &[&str]) -> Vec<String>
    {
        v.iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_period_keyword_priority()
    {
        assert_eq!(detect_period(None, ""), PeriodEra::Contemporary);
        assert_eq!(
            detect_period(Some("A Roman general in a world war of the future"), "X"),
            PeriodEra::Historical
        );
        assert_eq!(detect_period(Some("Set during the Great Depression"), "X"), PeriodEra::Period);
        assert_eq!(detect_period(Some("Teens in the 1980s"), "X"), PeriodEra::RecentPast);
        assert_eq!(detect_period(Some("A dystopia"), "X"), PeriodEra::Futuristic);
        assert_eq!(detect_period(Some("Two friends open a bakery"), "X"), PeriodEra::Contemporary);
    }

    #[test]
    fn test_vfx_rules()
    {
        assert_eq!(detect_vfx(&strings(&["Animation", "Drama"]), None), VfxIntensity::Heavy);
        assert_eq!(
            detect_vfx(&strings(&["Science Fiction"]), Some(150_000_000)),
            VfxIntensity::Heavy
        );
        assert_eq!(
            detect_vfx(&strings(&["Science Fiction"]), Some(40_000_000)),
            VfxIntensity::Moderate
        );
        assert_eq!(detect_vfx(&strings(&["Horror"]), Some(40_000_000)), VfxIntensity::PracticalOnly);
        assert_eq!(detect_vfx(&strings(&["Drama"]), Some(2_000_000)), VfxIntensity::PracticalOnly);
        assert_eq!(detect_vfx(&strings(&["Drama"]), Some(30_000_000)), VfxIntensity::Light);
    }

    #[test]
    fn test_action_rules()
    {
        let stunts = strings(&["Stunt Coordinator"]);
        assert_eq!(detect_action(&strings(&["Action"]), &stunts), ActionComplexity::High);
        assert_eq!(detect_action(&strings(&["War"]), &[]), ActionComplexity::Moderate);
        assert_eq!(detect_action(&strings(&["Drama"]), &stunts), ActionComplexity::Moderate);
        assert_eq!(detect_action(&strings(&["Comedy"]), &[]), ActionComplexity::DialogueDriven);
        assert_eq!(detect_action(&strings(&["Documentary"]), &[]), ActionComplexity::Light);
    }

    #[test]
    fn test_scale_bands()
    {
        assert_eq!(detect_scale(Some(100_000_000)), Some(ScaleTier::Blockbuster));
        assert_eq!(detect_scale(Some(99_999_999)), Some(ScaleTier::MajorStudio));
        assert_eq!(detect_scale(Some(20_000_000)), Some(ScaleTier::MidBudget));
        assert_eq!(detect_scale(Some(5_000_000)), Some(ScaleTier::Indie));
        assert_eq!(detect_scale(Some(1)), Some(ScaleTier::Micro));
        assert_eq!(detect_scale(Some(0)), None);
        assert_eq!(detect_scale(None), None);
    }

    #[test]
    fn test_star_power_billing_windows()
    {
        let tiers = ActorTiers::new(["Star A"], ["Star B"]);

        let a_fourth = ["x", "y", "z", "Star A"];
        assert_eq!(detect_star_power(a_fourth, &tiers), StarPower::RisingStars);

        let a_third = ["x", "y", "Star A"];
        assert_eq!(detect_star_power(a_third, &tiers), StarPower::AList);

        let b_fifth = ["v", "w", "x", "y", "Star B"];
        assert_eq!(detect_star_power(b_fifth, &tiers), StarPower::BList);

        assert_eq!(detect_star_power(Vec::<&str>::new(), &tiers), StarPower::EnsembleUnknown);
    }

    #[test]
    fn test_tier_file_parsing()
    {
        let json = r#"{"tiers": {
            "A-List": {"actors": ["Star A"]},
            "B-List": {"actors": ["Star B"], "note": "ignored"},
            "C-List": {"actors": ["Nobody"]}
        }}"#;
        let tiers = ActorTiers::from_json(json).unwrap();
        assert_eq!(tiers, ActorTiers::new(["Star A"], ["Star B"]));
        assert!(!tiers.is_empty());
    }

    #[test]
    fn test_label_title_respects_existing_labels()
    {
        let mut t = TitleRecord::new("Quiet Drama");
        t.genres = strings(&["Drama"]);
        t.budget_raw = Some(30_000_000);
        t.computed_vfx = Some("Heavy".into());
        t.computed_scale = Some(" ".into());

        let written = label_title(&mut t, &ActorTiers::default(), false);
        assert_eq!(written, 4);
        assert_eq!(t.computed_vfx.as_deref(), Some("Heavy"));
        assert_eq!(t.computed_scale.as_deref(), Some("Mid-Budget ($20-50M)"));
        assert_eq!(t.computed_action.as_deref(), Some("Dialogue-Driven"));
        assert_eq!(t.computed_star_power.as_deref(), Some("Ensemble/Unknown"));

        let rewritten = label_title(&mut t, &ActorTiers::default(), true);
        assert_eq!(rewritten, 5);
        assert_eq!(t.computed_vfx.as_deref(), Some("Light"));
    }

    #[test]
    fn test_unknown_budget_gets_unknown_scale()
    {
        let mut t = TitleRecord::new("Mystery Budget");
        label_title(&mut t, &ActorTiers::default(), false);
        assert_eq!(t.computed_scale.as_deref(), Some(UNKNOWN_SCALE));
    }
}
