//! Shared test utilities for integration tests
//!
//! Provides a small labeled corpus on disk plus helpers to build
//! title records in memory.

#![allow(dead_code)]

use assert_fs::prelude::*;
use prodcost::core::TitleRecord;
use serde_json::{Value, json};

/// Year every fixture is evaluated against
pub const AS_OF: i32 = 2024;

/// Corpus used by the CLI tests.
///
/// Against a Drama / Mid-Budget project as of 2024 the expected ranking
/// is Quiet Harbor, Paper Lanterns, Crime Desk. Loud Machines fails the
/// scale gate and Old Ledger falls outside the six year window.
pub fn sample_titles() -> Value
{
    json!([
        {
            "title": "Paper Lanterns",
            "release_date": "2020-09-12",
            "genres": ["Romance", "Drama"],
            "budget_raw": 20000000,
            "computed_scale": "Mid-Budget ($20-50M)",
            "computed_vfx": "Light",
            "production_countries": ["United Kingdom"],
            "runtime": 104
        },
        {
            "title": "Loud Machines",
            "release_date": "2023-06-30",
            "genres": ["Action", "Science Fiction"],
            "budget_raw": 180000000,
            "computed_scale": "Blockbuster ($100M+)",
            "production_countries": ["United States of America"],
            "runtime": 141
        },
        {
            "title": "Quiet Harbor",
            "release_date": "2023-05-01",
            "genres": ["Drama"],
            "budget_raw": 30000000,
            "computed_scale": "Mid-Budget ($20-50M)",
            "production_countries": ["United States of America"],
            "runtime": 112
        },
        {
            "title": "Old Ledger",
            "release_date": "2015-02-02",
            "genres": ["Drama"],
            "budget_raw": 25000000,
            "computed_scale": "Mid-Budget ($20-50M)"
        },
        {
            "title": "Crime Desk",
            "release_date": "2022-03-01",
            "genres": ["Crime"],
            "budget_raw": null,
            "computed_scale": "Mid-Budget ($20-50M)",
            "runtime": "95"
        }
    ])
}

/// Write `{"version": "1.0", "titles": titles}` to `titles_db.json`
pub fn write_corpus(
    tmp: &assert_fs::TempDir,
    titles: Value,
) -> std::path::PathBuf
{
    let file = tmp.child("titles_db.json");
    let doc = json!({ "version": "1.0", "titles": titles });
    file.write_str(&serde_json::to_string_pretty(&doc).expect("serialize"))
        .expect("write corpus");
    file.path()
        .to_path_buf()
}

/// Temp dir holding the sample corpus
pub fn make_corpus_fixture() -> (assert_fs::TempDir, std::path::PathBuf)
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let path = write_corpus(&tmp, sample_titles());
    (tmp, path)
}

/// In-memory title with the fields the scorer reads
pub fn title(
    name: &str,
    year: i32,
    genres: &[&str],
    scale: &str,
    budget: Option<i64>,
) -> TitleRecord
{
    let mut t = TitleRecord::new(name);
    t.release_date = Some(format!("{year}-06-01"));
    t.genres = genres
        .iter()
        .map(|g| g.to_string())
        .collect();
    t.computed_scale = Some(scale.to_string());
    t.budget_raw = budget;
    t
}
