//! Attribute taxonomy for comparable-title matching.
//!
//! Every categorical attribute is a closed enum whose declaration order is
//! also its adjacency order: neighbours in the list are "close" for partial
//! credit. Lookup tables (genre buckets, country buckets, runtime bands) are
//! plain constants so scores are reproducible everywhere.

use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raised when a user-supplied attribute value is not part of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic, thiserror::Error)]
#[error("unknown {attribute} value '{value}'; {help}")]
#[diagnostic(code(prodcost::attribute))]
pub struct AttributeParseError
{
    pub attribute: &'static str,
    pub value: String,

    #[help]
    pub help: String,
}

/// A categorical attribute with a total order over its values
pub trait Ordinal: Copy + Eq + Sized + 'static
{
    /// Attribute name used in diagnostics and reasons
    const ATTRIBUTE: &'static str;

    /// All values in adjacency order
    const ALL: &'static [Self];

    /// Display label, identical to the label stored on labeled titles
    fn label(self) -> &'static str;

    /// Short kebab-case spelling accepted on the command line
    fn alias(self) -> &'static str;

    /// Position in the adjacency order
    fn index(self) -> usize;

    /// Number of adjacency steps between two values
    fn steps_to(
        self,
        other: Self,
    ) -> usize
    {
        self.index()
            .abs_diff(other.index())
    }

    /// Lenient label lookup.
    ///
    /// Matches the full label, the label without its parenthetical suffix
    /// (`"Mid-Budget ($20-50M)"` -> `"Mid-Budget"`), or the alias, ignoring
    /// ASCII case and surrounding whitespace.
    fn from_label(raw: &str) -> Option<Self>
    {
        let wanted = raw.trim();
        if wanted.is_empty()
        {
            return None;
        }

        let wanted_tier = tier_name(wanted);

        Self::ALL
            .iter()
            .copied()
            .find(|v| {
                let label = v.label();
                label.eq_ignore_ascii_case(wanted)
                    || tier_name(label).eq_ignore_ascii_case(wanted_tier)
                    || v.alias()
                        .eq_ignore_ascii_case(wanted)
            })
    }

    /// Strict parse for user input, with a diagnostic listing valid values
    fn parse_value(raw: &str) -> Result<Self, AttributeParseError>
    {
        Self::from_label(raw).ok_or_else(|| {
            let expected = Self::ALL
                .iter()
                .map(|v| format!("{} ({})", v.label(), v.alias()))
                .collect::<Vec<_>>()
                .join(", ");

            AttributeParseError {
                attribute: Self::ATTRIBUTE,
                value: raw.to_string(),
                help: format!("expected one of: {expected}"),
            }
        })
    }
}

/// Strip a parenthetical range suffix: `"Indie ($5-20M)"` -> `"Indie"`
pub fn tier_name(label: &str) -> &str
{
    label
        .split(" (")
        .next()
        .unwrap_or(label)
        .trim()
}

macro_rules! ordered_attribute {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $attr:literal
        {
            $($variant:ident => $label:literal | $alias:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name
        {
            $($variant,)+
        }

        impl Ordinal for $name
        {
            const ATTRIBUTE: &'static str = $attr;
            const ALL: &'static [Self] = &[$($name::$variant,)+];

            fn label(self) -> &'static str
            {
                match self
                {
                    $($name::$variant => $label,)+
                }
            }

            fn alias(self) -> &'static str
            {
                match self
                {
                    $($name::$variant => $alias,)+
                }
            }

            fn index(self) -> usize
            {
                self as usize
            }
        }

        impl fmt::Display for $name
        {
            fn fmt(
                &self,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result
            {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name
        {
            type Err = AttributeParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err>
            {
                <Self as Ordinal>::parse_value(s)
            }
        }

        impl Serialize for $name
        {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error>
            {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name
        {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>
            {
                let raw = String::deserialize(deserializer)?;
                <Self as Ordinal>::parse_value(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

ordered_attribute! {
    /// User-facing genre buckets
    pub enum GenreBucket as "genre"
    {
        ActionAdventure => "Action/Adventure" | "action-adventure",
        Drama => "Drama" | "drama",
        Comedy => "Comedy" | "comedy",
        HorrorThriller => "Horror/Thriller" | "horror-thriller",
        SciFiFantasy => "Sci-Fi/Fantasy" | "sci-fi-fantasy",
    }
}

ordered_attribute! {
    /// Production budget bands, coarsest to finest
    pub enum ScaleTier as "scale"
    {
        Blockbuster => "Blockbuster ($100M+)" | "blockbuster",
        MajorStudio => "Major Studio ($50-100M)" | "major-studio",
        MidBudget => "Mid-Budget ($20-50M)" | "mid-budget",
        Indie => "Indie ($5-20M)" | "indie",
        Micro => "Micro (<$5M)" | "micro",
    }
}

ordered_attribute! {
    /// Visual effects intensity
    pub enum VfxIntensity as "vfx"
    {
        Heavy => "Heavy" | "heavy",
        Moderate => "Moderate" | "moderate",
        Light => "Light" | "light",
        PracticalOnly => "Practical Only" | "practical-only",
    }
}

ordered_attribute! {
    /// Stunt and action complexity
    pub enum ActionComplexity as "action"
    {
        High => "High" | "high",
        Moderate => "Moderate" | "moderate",
        Light => "Light" | "light",
        DialogueDriven => "Dialogue-Driven" | "dialogue-driven",
    }
}

ordered_attribute! {
    /// Period or era the story is set in
    pub enum PeriodEra as "period"
    {
        Futuristic => "Futuristic" | "futuristic",
        Contemporary => "Contemporary" | "contemporary",
        RecentPast => "Recent Past (1980-2010)" | "recent-past",
        Period => "Period (1900-1980)" | "period",
        Historical => "Historical (pre-1900)" | "historical",
    }
}

ordered_attribute! {
    /// Marquee value of the lead cast
    pub enum StarPower as "star_power"
    {
        AList => "A-List" | "a-list",
        BList => "B-List" | "b-list",
        RisingStars => "Rising Stars" | "rising-stars",
        EnsembleUnknown => "Ensemble/Unknown" | "ensemble",
    }
}

ordered_attribute! {
    /// Production country buckets
    pub enum CountryBucket as "country"
    {
        Usa => "USA (Hollywood)" | "usa",
        Uk => "UK" | "uk",
        CanadaAustralia => "Canada/Australia" | "canada-australia",
        Europe => "Europe (non-UK)" | "europe",
        AsiaOther => "Asia/Other" | "asia-other",
    }
}

ordered_attribute! {
    /// Runtime bands in minutes
    pub enum RuntimeTier as "runtime"
    {
        Short => "Short" | "short",
        Standard => "Standard" | "standard",
        Long => "Long" | "long",
        Epic => "Epic" | "epic",
    }
}

impl GenreBucket
{
    /// Raw genre names that count as an exact bucket match
    pub const fn genres(self) -> &'static [&'static str]
    {
        match self
        {
            GenreBucket::ActionAdventure => &["Action", "Adventure"],
            GenreBucket::Drama => &["Drama"],
            GenreBucket::Comedy => &["Comedy"],
            GenreBucket::HorrorThriller => &["Horror", "Thriller"],
            GenreBucket::SciFiFantasy => &["Science Fiction", "Fantasy"],
        }
    }

    /// Raw genre names that earn partial credit when no exact match exists
    pub const fn related_genres(self) -> &'static [&'static str]
    {
        match self
        {
            GenreBucket::ActionAdventure => &["Thriller", "Science Fiction"],
            GenreBucket::Drama => &["Romance", "Crime"],
            GenreBucket::Comedy => &["Romance", "Family"],
            GenreBucket::HorrorThriller => &["Mystery", "Crime"],
            GenreBucket::SciFiFantasy => &["Adventure", "Action"],
        }
    }
}

/// Countries that belong to one of the explicit Western buckets
const USA_COUNTRIES: &[&str] = &["United States of America"];
const UK_COUNTRIES: &[&str] = &["United Kingdom"];
const CANADA_AUSTRALIA_COUNTRIES: &[&str] = &["Canada", "Australia"];
const EUROPE_COUNTRIES: &[&str] = &[
    "France",
    "Germany",
    "Spain",
    "Italy",
    "Belgium",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Ireland",
    "Austria",
    "Switzerland",
    "Poland",
    "Czech Republic",
    "Hungary",
    "Romania",
    "Portugal",
    "Greece",
];

impl CountryBucket
{
    /// Explicit country list; empty for the complement bucket
    pub const fn countries(self) -> &'static [&'static str]
    {
        match self
        {
            CountryBucket::Usa => USA_COUNTRIES,
            CountryBucket::Uk => UK_COUNTRIES,
            CountryBucket::CanadaAustralia => CANADA_AUSTRALIA_COUNTRIES,
            CountryBucket::Europe => EUROPE_COUNTRIES,
            CountryBucket::AsiaOther => &[],
        }
    }

    /// Whether `country` falls in this bucket
    pub fn contains(
        self,
        country: &str,
    ) -> bool
    {
        match self
        {
            CountryBucket::AsiaOther => !is_western(country),
            bucket => bucket
                .countries()
                .contains(&country),
        }
    }
}

/// True when the country appears in any explicit (non-complement) bucket
pub fn is_western(country: &str) -> bool
{
    CountryBucket::ALL
        .iter()
        .any(|b| {
            b.countries()
                .contains(&country)
        })
}

impl RuntimeTier
{
    /// Half-open `[low, high)` bounds in minutes
    pub const fn bounds(self) -> (i64, i64)
    {
        match self
        {
            RuntimeTier::Short => (0, 90),
            RuntimeTier::Standard => (90, 120),
            RuntimeTier::Long => (120, 150),
            RuntimeTier::Epic => (150, 999),
        }
    }

    /// Tier for a runtime in minutes; `None` outside every band
    pub fn for_minutes(minutes: i64) -> Option<Self>
    {
        Self::ALL
            .iter()
            .copied()
            .find(|t| {
                let (low, high) = t.bounds();
                (low..high).contains(&minutes)
            })
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_scale_label_strips_range_suffix()
    {
        assert_eq!(ScaleTier::from_label("Mid-Budget ($20-50M)"), Some(ScaleTier::MidBudget));
        assert_eq!(ScaleTier::from_label("Mid-Budget"), Some(ScaleTier::MidBudget));
        assert_eq!(ScaleTier::from_label("mid-budget"), Some(ScaleTier::MidBudget));
        assert_eq!(ScaleTier::from_label("Unknown"), None);
        assert_eq!(ScaleTier::from_label(""), None);
    }

    #[test]
    fn test_adjacency_steps_follow_declaration_order()
    {
        assert_eq!(VfxIntensity::Heavy.steps_to(VfxIntensity::PracticalOnly), 3);
        assert_eq!(PeriodEra::Futuristic.steps_to(PeriodEra::Contemporary), 1);
        assert_eq!(StarPower::BList.steps_to(StarPower::BList), 0);
        assert_eq!(ScaleTier::Blockbuster.steps_to(ScaleTier::Indie), 3);
    }

    #[test]
    fn test_parse_error_lists_valid_values()
    {
        let err = "Gigantic"
            .parse::<ScaleTier>()
            .unwrap_err();
        assert_eq!(err.attribute, "scale");
        assert_eq!(err.value, "Gigantic");
        assert!(
            err.help
                .contains("Micro (<$5M)")
        );
        // Plain Display output carries the valid values too
        assert!(
            err.to_string()
                .contains("Indie ($5-20M) (indie)")
        );
    }

    #[test]
    fn test_asia_other_is_complement_of_western_buckets()
    {
        assert!(CountryBucket::AsiaOther.contains("South Korea"));
        assert!(CountryBucket::AsiaOther.contains("Brazil"));
        assert!(!CountryBucket::AsiaOther.contains("France"));
        assert!(!CountryBucket::AsiaOther.contains("United States of America"));
        assert!(CountryBucket::Europe.contains("Greece"));
        assert!(!CountryBucket::Uk.contains("Ireland"));
    }

    #[test]
    fn test_runtime_bands_are_half_open()
    {
        assert_eq!(RuntimeTier::for_minutes(0), Some(RuntimeTier::Short));
        assert_eq!(RuntimeTier::for_minutes(89), Some(RuntimeTier::Short));
        assert_eq!(RuntimeTier::for_minutes(90), Some(RuntimeTier::Standard));
        assert_eq!(RuntimeTier::for_minutes(149), Some(RuntimeTier::Long));
        assert_eq!(RuntimeTier::for_minutes(150), Some(RuntimeTier::Epic));
        assert_eq!(RuntimeTier::for_minutes(999), None);
        assert_eq!(RuntimeTier::for_minutes(-5), None);
    }

    #[test]
    fn test_every_bucket_declares_related_genres()
    {
        for bucket in GenreBucket::ALL
        {
            let related = bucket.related_genres();
            assert!((1..=2).contains(&related.len()), "{bucket}");
        }
    }

    #[test]
    fn test_serde_uses_display_labels()
    {
        let json = serde_json::to_string(&PeriodEra::RecentPast).unwrap();
        assert_eq!(json, "\"Recent Past (1980-2010)\"");

        let back: PeriodEra = serde_json::from_str("\"recent-past\"").unwrap();
        assert_eq!(back, PeriodEra::RecentPast);
    }
}
