//! **prodcost** - Comparable-title budget estimation for film and TV productions
//!
//! Ranks historical titles against a project's attribute profile and turns
//! the best matches into a recency-weighted, inflation-adjusted budget range.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Estimation engine - pure functions over in-memory titles
pub mod core {
    /// Ordered attribute enums and label parsing
    pub mod taxonomy;
    pub use taxonomy::{
        ActionComplexity, CountryBucket, GenreBucket, Ordinal, PeriodEra, RuntimeTier, ScaleTier,
        StarPower, VfxIntensity,
    };

    /// Stored title records as read from the corpus
    pub mod title;
    pub use title::{CastMember, TitleRecord};

    /// Attribute profile of the project being estimated
    pub mod project;
    pub use project::ProjectAttributes;

    /// Baseline-and-adjustment similarity scoring with match reasons
    pub mod similarity;
    pub use similarity::{Similarity, compute_similarity};

    /// Hard filters, ranking, and truncation
    pub mod selector;
    pub use selector::{Comparable, SelectOptions, select_comparables};

    /// CPI table and currency normalization
    pub mod inflation;
    pub use inflation::{adjust, format_currency};

    /// Recency-weighted low/base/high aggregation
    pub mod estimate;
    pub use estimate::{BudgetEstimate, EstimateOptions, EstimateOutcome, estimate_budget};

    /// Heuristics that compute the stored attribute labels
    pub mod labeling;
    pub use labeling::{ActorTiers, label_title};
}

/// Infrastructure - Configuration, corpus I/O, and logging
pub mod infra {
    /// Layered configuration with TOML init
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Corpus and actor tier file loading, atomic corpus writes
    pub mod corpus;
    pub use corpus::{Corpus, CorpusError, load_corpus, save_corpus};

    /// tracing-subscriber setup
    pub mod logging;
}

/// Command handlers
pub mod commands {
    /// Flag/config resolution and shared rendering
    pub mod query;

    pub mod comps;
    pub use comps::run as comps_run;

    pub mod estimate;
    pub use estimate::run as estimate_run;

    pub mod label;
    pub use label::run as label_run;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use commands::{comps_run, estimate_run, label_run};
pub use infra::{Config, load_config};
