use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::inflation::DEFAULT_TARGET_YEAR;
use crate::core::selector::{DEFAULT_LIMIT, DEFAULT_MAX_YEARS};

/// Config file name written by `init`
pub const CONFIG_FILE: &str = "prodcost.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Labeled title corpus (`{"titles": [...]}`)
    pub corpus_path: PathBuf,

    /// Actor tier lists used by `label`
    pub actor_tiers_path: PathBuf,

    /// Default comparable selection settings
    pub selection: SelectionConfig,

    /// Default budget estimate settings
    pub estimate: EstimateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig
{
    pub limit: usize,
    pub max_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig
{
    pub normalize: bool,
    pub target_year: i32,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            corpus_path: PathBuf::from("data/titles_db.json"),
            actor_tiers_path: PathBuf::from("data/actor_tiers.json"),
            selection: SelectionConfig::default(),
            estimate: EstimateConfig::default(),
        }
    }
}

impl Default for SelectionConfig
{
    fn default() -> Self
    {
        Self {
            limit: DEFAULT_LIMIT,
            max_years: DEFAULT_MAX_YEARS,
        }
    }
}

impl Default for EstimateConfig
{
    fn default() -> Self
    {
        Self {
            normalize: true,
            target_year: DEFAULT_TARGET_YEAR,
        }
    }
}

impl Config
{
    /// Corpus path with `~` and `$VARS` expanded
    pub fn corpus_path(&self) -> PathBuf
    {
        expand_path(&self.corpus_path)
    }

    /// Actor tier path with `~` and `$VARS` expanded
    pub fn actor_tiers_path(&self) -> PathBuf
    {
        expand_path(&self.actor_tiers_path)
    }
}

/// Expand `~` and environment variables; leaves the path alone on failure
pub fn expand_path(path: &Path) -> PathBuf
{
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw)
    {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["prodcost.toml", "prodcost.yaml", "prodcost.json", ".prodcost.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // PRODCOST__SELECTION__LIMIT=8 style overrides
    builder = builder.add_source(
        config::Environment::with_prefix("PRODCOST")
            .prefix_separator("__")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILE);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
