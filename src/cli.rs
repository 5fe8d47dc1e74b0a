use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::project::ProjectAttributes;
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

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "prodcost")]
#[command(about = "Estimate production budgets from comparable film and TV titles")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank comparable titles for a project
    Comps(CompsArgs),

    /// Rank comparables and compute a weighted budget estimate
    Estimate(EstimateArgs),

    /// Fill in computed attribute labels on a corpus file
    Label(LabelArgs),

    /// Initialize a prodcost.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Project attributes shared by `comps` and `estimate`
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Primary genre (e.g. "Drama", sci-fi-fantasy)
    #[arg(long)]
    pub genre: GenreBucket,

    /// Production scale tier (e.g. "Mid-Budget", indie)
    #[arg(long)]
    pub scale: ScaleTier,

    /// VFX intensity (heavy, moderate, light, practical-only)
    #[arg(long)]
    pub vfx: Option<VfxIntensity>,

    /// Action complexity (high, moderate, light, dialogue-driven)
    #[arg(long)]
    pub action: Option<ActionComplexity>,

    /// Period or era (futuristic, contemporary, recent-past, period, historical)
    #[arg(long)]
    pub period: Option<PeriodEra>,

    /// Star power (a-list, b-list, rising-stars, ensemble)
    #[arg(long)]
    pub star_power: Option<StarPower>,

    /// Production country (usa, uk, canada-australia, europe, asia-other)
    #[arg(long)]
    pub country: Option<CountryBucket>,

    /// Runtime band (short, standard, long, epic)
    #[arg(long)]
    pub runtime: Option<RuntimeTier>,
}

impl From<&ProjectArgs> for ProjectAttributes {
    fn from(args: &ProjectArgs) -> Self {
        ProjectAttributes {
            genre: args.genre,
            scale: args.scale,
            vfx: args.vfx,
            action: args.action,
            period: args.period,
            star_power: args.star_power,
            country: args.country,
            runtime: args.runtime,
        }
    }
}

/// Corpus and ranking options shared by `comps` and `estimate`
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Labeled corpus file (defaults to the configured corpus_path)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Maximum number of comparables
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Recency window in years
    #[arg(long)]
    pub max_years: Option<u32>,

    /// Treat this as the current year (defaults to the system clock)
    #[arg(long)]
    pub as_of_year: Option<i32>,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

#[derive(Debug, Parser)]
pub struct CompsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Debug, Parser)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Use raw budgets instead of inflation-adjusted ones
    #[arg(long)]
    pub no_normalize: bool,

    /// Year whose dollars budgets are normalized to
    #[arg(long)]
    pub target_year: Option<i32>,
}

#[derive(Debug, Parser)]
pub struct LabelArgs {
    /// Corpus file to label (defaults to the configured corpus_path)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Write the labeled corpus here instead of in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Actor tier file for star power (defaults to the configured actor_tiers_path)
    #[arg(long)]
    pub actor_tiers: Option<PathBuf>,

    /// Recompute labels that are already present
    #[arg(long)]
    pub overwrite: bool,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
