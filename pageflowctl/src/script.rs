//! JSON inputs for `simulate`: the deck and the gesture script.

use anyhow::{Context, Result};
use pageflow_model::Page;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct DeckFile {
    pub pages: Vec<Page>,
}

/// One scripted interaction.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Drag `by` units away from the focused page over `duration_ms`, then
    /// release. `coast` continues under inertia before the snap decision.
    Drag {
        by: f32,
        #[serde(default)]
        velocity: Option<f32>,
        #[serde(default = "default_drag_ms")]
        duration_ms: u64,
        #[serde(default)]
        coast: Option<f32>,
    },
    Jump {
        index: usize,
        #[serde(default = "default_true")]
        animated: bool,
    },
    /// Tap on the indicator strip at `x` within a strip `width` wide.
    Tap { x: f32, width: f32 },
    /// The focused page's media reached its end.
    MediaEnded,
    Select { index: usize },
    Resize { width: f32 },
}

fn default_drag_ms() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {what} {}", path.display()))
}

pub fn load_deck(path: &Path) -> Result<Vec<Page>> {
    let deck: DeckFile = read_json(path, "deck")?;
    Ok(deck.pages)
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let script: Script = read_json(path, "script")?;
    Ok(script.steps)
}
