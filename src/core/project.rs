//! The user's project description, supplied fresh per query.

use serde::{Deserialize, Serialize};

use crate::core::taxonomy::{
    ActionComplexity,
    CountryBucket,
    GenreBucket,
    PeriodEra,
    RuntimeTier,
    ScaleTier,
    StarPower,
    VfxIntensity,
};

/// Attribute selection for a prospective project.
///
/// Genre and scale are required because they drive the hard filters; every
/// other attribute is optional and scored only when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAttributes
{
    pub genre: GenreBucket,
    pub scale: ScaleTier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vfx: Option<VfxIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionComplexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodEra>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_power: Option<StarPower>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeTier>,
}

impl ProjectAttributes
{
    pub fn new(
        genre: GenreBucket,
        scale: ScaleTier,
    ) -> Self
    {
        Self {
            genre,
            scale,
            vfx: None,
            action: None,
            period: None,
            star_power: None,
            country: None,
            runtime: None,
        }
    }

    pub fn with_vfx(
        mut self,
        vfx: VfxIntensity,
    ) -> Self
    {
        self.vfx = Some(vfx);
        self
    }

    pub fn with_action(
        mut self,
        action: ActionComplexity,
    ) -> Self
    {
        self.action = Some(action);
        self
    }

    pub fn with_period(
        mut self,
        period: PeriodEra,
    ) -> Self
    {
        self.period = Some(period);
        self
    }

    pub fn with_star_power(
        mut self,
        star_power: StarPower,
    ) -> Self
    {
        self.star_power = Some(star_power);
        self
    }

    pub fn with_country(
        mut self,
        country: CountryBucket,
    ) -> Self
    {
        self.country = Some(country);
        self
    }

    pub fn with_runtime(
        mut self,
        runtime: RuntimeTier,
    ) -> Self
    {
        self.runtime = Some(runtime);
        self
    }
}
