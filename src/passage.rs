use std::fs;
use std::path::Path;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static PASSAGE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/passages");

/// The fixed target text of one session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    text: String,
    char_len: usize,
}

impl Passage {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::EmptyPassage);
        }
        let char_len = text.chars().count();
        Ok(Self { text, char_len })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars, which is the unit typed input is compared in.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn word_count(&self) -> usize {
        crate::scoring::word_count(&self.text)
    }
}

impl std::fmt::Display for Passage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Source of target passages for new sessions
pub trait TextProvider {
    fn select_passage(&self) -> Passage;
}

/// Passage sets compiled into the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PassageSet {
    Classic,
    Pangrams,
}

#[derive(Deserialize, Debug)]
struct PassageFile {
    name: String,
    passages: Vec<String>,
}

/// A non-empty pool of passages picked from uniformly at random
#[derive(Debug, Clone)]
pub struct PassagePool {
    name: String,
    passages: Vec<Passage>,
}

impl PassagePool {
    pub fn new(name: impl Into<String>, texts: Vec<String>) -> Result<Self> {
        let name = name.into();
        if texts.is_empty() {
            return Err(Error::EmptyPool(name));
        }
        let passages = texts
            .into_iter()
            .map(Passage::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, passages })
    }

    pub fn builtin(set: PassageSet) -> Result<Self> {
        Self::builtin_named(&set.to_string())
    }

    fn builtin_named(name: &str) -> Result<Self> {
        let file = PASSAGE_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::UnknownPassageSet(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::UnknownPassageSet(name.to_string()))?;
        Self::from_json(contents)
    }

    /// Load a pool from a JSON file shaped `{"name": ..., "passages": [...]}`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: PassageFile = serde_json::from_str(json)?;
        Self::new(file.name, file.passages)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }
}

impl TextProvider for PassagePool {
    fn select_passage(&self) -> Passage {
        let idx = rand::thread_rng().gen_range(0..self.passages.len());
        self.passages[idx].clone()
    }
}

/// Always hands out the same passage; backs `--prompt`
#[derive(Debug, Clone)]
pub struct FixedPassage(Passage);

impl FixedPassage {
    pub fn new(passage: Passage) -> Self {
        Self(passage)
    }
}

impl TextProvider for FixedPassage {
    fn select_passage(&self) -> Passage {
        self.0.clone()
    }
}
