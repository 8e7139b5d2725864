//! JSON fixtures for tileshell tests. Each set lives in its own directory
//! under `fixtures/` and a fixture is addressed by its file stem.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// One directory of `<name>.json` fixtures.
#[derive(Copy, Clone, Debug)]
struct FixtureSet(&'static str);

impl FixtureSet {
    fn dir(self) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(self.0)
    }

    fn json(self, name: &str) -> Result<String> {
        if name.is_empty() || name.contains(['/', '\\', '.']) {
            bail!("invalid {} fixture name '{name}'", self.0);
        }
        let path = self.dir().join(format!("{name}.json"));
        fs::read_to_string(&path)
            .with_context(|| format!("unknown {} fixture '{name}' ({})", self.0, path.display()))
    }

    fn load<T: DeserializeOwned>(self, name: &str) -> Result<T> {
        let text = self.json(name)?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse {} fixture '{name}'", self.0))
    }

    fn names(self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.dir())? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Keyframe lists in Web Animations JSON form.
pub mod keyframes {
    use super::*;

    const SET: FixtureSet = FixtureSet("keyframes");

    pub fn names() -> Result<Vec<String>> {
        SET.names()
    }

    /// Raw text, for parsers that take JSON directly.
    pub fn json(name: &str) -> Result<String> {
        SET.json(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        SET.load(name)
    }
}

/// Carousel layout and gesture scenarios.
pub mod carousels {
    use super::*;

    const SET: FixtureSet = FixtureSet("carousels");

    pub fn names() -> Result<Vec<String>> {
        SET.names()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        SET.load(name)
    }
}
