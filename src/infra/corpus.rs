//! Corpus file I/O.
//!
//! The corpus is a JSON document `{"version": ..., "titles": [...]}` owned by
//! the ingestion pipeline. Loading snapshots it into memory; saving goes
//! through a temp file in the same directory and a rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::core::labeling::ActorTiers;
use crate::core::title::TitleRecord;

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum CorpusError
{
    #[error("cannot read {}; build the corpus with the ingestion scripts or pass --corpus", path.display())]
    #[diagnostic(code(prodcost::corpus::read))]
    Read
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid corpus file; expected a JSON object with a \"titles\" array", path.display())]
    #[diagnostic(code(prodcost::corpus::parse))]
    Parse
    {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "{} is not a valid actor tier file; expected {{\"tiers\": {{\"A-List\": {{\"actors\": [...]}}}}}}",
        path.display()
    )]
    #[diagnostic(code(prodcost::corpus::tiers))]
    Tiers
    {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}", path.display())]
    #[diagnostic(code(prodcost::corpus::write))]
    Write
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// In-memory snapshot of the title corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus
{
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub titles: Vec<TitleRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Corpus
{
    pub fn from_titles(titles: Vec<TitleRecord>) -> Self
    {
        Self {
            version: Some("1.0".to_string()),
            titles,
            extra: Map::new(),
        }
    }

    pub fn len(&self) -> usize
    {
        self.titles
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.titles
            .is_empty()
    }
}

/// Read and parse a corpus file
#[instrument]
pub fn load_corpus(path: &Path) -> Result<Corpus, CorpusError>
{
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let corpus: Corpus = serde_json::from_str(&text).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(titles = corpus.len(), "corpus loaded");
    Ok(corpus)
}

/// Write a corpus atomically (temp file + rename)
#[instrument(skip(corpus), fields(titles = corpus.len()))]
pub fn save_corpus(
    path: &Path,
    corpus: &Corpus,
) -> Result<(), CorpusError>
{
    let write_err = |source: std::io::Error| CorpusError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let json = serde_json::to_string_pretty(corpus).map_err(|e| write_err(e.into()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes())
        .map_err(write_err)?;
    tmp.write_all(b"\n")
        .map_err(write_err)?;
    tmp.persist(path)
        .map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Read actor tier lists for star power labeling
pub fn load_actor_tiers(path: &Path) -> Result<ActorTiers, CorpusError>
{
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ActorTiers::from_json(&text).map_err(|source| CorpusError::Tiers {
        path: path.to_path_buf(),
        source,
    })
}
