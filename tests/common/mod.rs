//! Shared test infrastructure for integration tests.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Expected shape of a fixture, loaded from fixture.json.
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    /// Book names in first-occurrence order.
    pub books: Vec<String>,
    /// Chapter numbers per book, in first-occurrence order.
    #[allow(dead_code)]
    pub chapters: BTreeMap<String, Vec<i32>>,
    /// Total number of verse rows.
    #[allow(dead_code)]
    pub verses: usize,
}

/// A fixture directory holding `verses.csv` and `fixture.json`.
pub struct TestFixture {
    pub fixture_dir: PathBuf,
    pub config: FixtureConfig,
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

impl TestFixture {
    /// Load a fixture by name from tests/fixtures/{name}/.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let fixture_dir = manifest_dir().join("tests/fixtures").join(name);
        let config_path = fixture_dir.join("fixture.json");
        let config: FixtureConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to read {}: {e}", config_path.display())
            })?)?;
        Ok(Self {
            fixture_dir,
            config,
        })
    }

    /// Fresh working directory with the fixture's verses.csv copied in.
    pub fn workspace(&self) -> anyhow::Result<TempDir> {
        let temp_dir = TempDir::new()?;
        std::fs::copy(
            self.fixture_dir.join("verses.csv"),
            temp_dir.path().join("verses.csv"),
        )?;
        Ok(temp_dir)
    }
}

/// Working directory containing a verses.csv with the given contents.
#[allow(dead_code)]
pub fn workspace_with(csv: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join("verses.csv"), csv).expect("write verses.csv");
    temp_dir
}

/// Run verse-tally with `dir` as the working directory.
pub fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_verse-tally"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("run verse-tally")
}

/// Parse a JSON file written by the binary.
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read JSON output");
    serde_json::from_str(&content).expect("parse JSON output")
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
