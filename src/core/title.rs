//! Stored title records.
//!
//! Mirrors the corpus JSON written by the ingestion pipeline. The engine only
//! reads these; labeling is the one place that fills in `computed_*` fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A billed cast member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastMember
{
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,

    /// Pass-through fields (profile urls and the like)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One historical production with its precomputed attribute labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord
{
    /// Display title
    #[serde(default)]
    pub title: String,

    /// Year-prefixed release date, e.g. `2021-07-16`
    #[serde(default)]
    pub release_date: Option<String>,

    /// Raw genre names as reported by the metadata source
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,

    /// Raw budget in currency units; zero or null means unknown
    #[serde(default, deserialize_with = "lenient_integer")]
    pub budget_raw: Option<i64>,

    #[serde(default)]
    pub computed_scale: Option<String>,
    #[serde(default)]
    pub computed_vfx: Option<String>,
    #[serde(default)]
    pub computed_action: Option<String>,
    #[serde(default)]
    pub computed_period: Option<String>,
    #[serde(default)]
    pub computed_star_power: Option<String>,

    /// Production countries, primary first
    #[serde(default, deserialize_with = "null_as_empty")]
    pub production_countries: Vec<String>,

    /// Runtime in minutes
    #[serde(default, deserialize_with = "lenient_integer")]
    pub runtime: Option<i64>,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub cast: Vec<CastMember>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub crew_jobs: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub production_companies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Everything else the ingestion pipeline stored, kept for round trips
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TitleRecord
{
    /// Start a record with just a display title
    pub fn new(title: impl Into<String>) -> Self
    {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Release year from the first four characters of the release date
    pub fn release_year(&self) -> Option<i32>
    {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| {
                y.parse::<i32>()
                    .ok()
            })
    }

    /// Positive budget, or `None` when unknown
    pub fn budget(&self) -> Option<i64>
    {
        self.budget_raw
            .filter(|b| *b > 0)
    }

    /// First listed production country
    pub fn primary_country(&self) -> Option<&str>
    {
        self.production_countries
            .first()
            .map(String::as_str)
    }

    /// Cast names in billing order
    pub fn cast_names(&self) -> impl Iterator<Item = &str>
    {
        self.cast
            .iter()
            .map(|c| c.name.as_str())
    }
}

/// Treat `null` like a missing list
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accept integers, floats (truncated) and numeric strings; anything else is `None`
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value
    {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok(),
        _ => None,
    })
}
