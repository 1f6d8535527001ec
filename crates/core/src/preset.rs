//! Preset module - starting grid templates
//!
//! A preset is a named template grid (colors and decoration tags). The board
//! copies the selected template every time it is reset, so a preset's size is
//! also the board's size. Besides the built-in catalog, presets can be loaded
//! from JSON:
//!
//! ```json
//! {
//!   "presets": [
//!     { "name": "Steps", "rows": ["....", "....", "R...", "RR.."] }
//!   ]
//! }
//! ```
//!
//! `rows` uses the grid dump format; an optional `tags` matrix of the same
//! shape sets decoration tags.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::grid::Grid;
use crate::types::{Tag, BOARD_HEIGHT, BOARD_WIDTH};

/// A named starting grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPreset {
    name: String,
    template: Grid,
}

impl BoardPreset {
    pub fn new(name: impl Into<String>, template: Grid) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    /// Parse a preset from dump rows and optional tags
    pub fn parse<S: AsRef<str>>(name: &str, rows: &[S], tags: Option<&[Vec<Tag>]>) -> Result<Self> {
        let template = Grid::from_debug_rows_with_tags(rows, tags)
            .with_context(|| format!("invalid preset {:?}", name))?;
        Ok(Self::new(name, template))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &Grid {
        &self.template
    }

    pub fn width(&self) -> usize {
        self.template.width()
    }

    pub fn height(&self) -> usize {
        self.template.height()
    }
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    presets: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
struct PresetEntry {
    name: String,
    rows: Vec<String>,
    #[serde(default)]
    tags: Option<Vec<Vec<Tag>>>,
}

/// Parse presets from a JSON document
pub fn presets_from_json(json: &str) -> Result<Vec<BoardPreset>> {
    let file: PresetFile = serde_json::from_str(json).context("malformed preset JSON")?;
    file.presets
        .iter()
        .map(|entry| BoardPreset::parse(&entry.name, entry.rows.as_slice(), entry.tags.as_deref()))
        .collect()
}

/// Load presets from a JSON file
pub fn load_presets(path: impl AsRef<Path>) -> Result<Vec<BoardPreset>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read presets from {}", path.display()))?;
    let presets = presets_from_json(&json)
        .with_context(|| format!("failed to load presets from {}", path.display()))?;
    debug!(path = %path.display(), count = presets.len(), "loaded presets");
    Ok(presets)
}

/// Blank rows on top of `bottom`, padded to `height`
fn stacked(width: usize, height: usize, bottom: &[&str]) -> Vec<String> {
    let mut rows = vec![".".repeat(width); height.saturating_sub(bottom.len())];
    rows.extend(bottom.iter().map(|row| row.to_string()));
    rows
}

/// The catalog shipped with the game
pub fn builtin_presets() -> Vec<BoardPreset> {
    let layouts: [(&str, usize, usize, &[&str]); 5] = [
        ("Classic", BOARD_WIDTH, BOARD_HEIGHT, &[]),
        (
            "Pyramid",
            BOARD_WIDTH,
            BOARD_HEIGHT,
            &["....WW....", "...WWWW...", "..WWWWWW..", ".WWWWWWWW."],
        ),
        (
            "Checkers",
            BOARD_WIDTH,
            BOARD_HEIGHT,
            &[
                "B.B.B.B.B.",
                ".B.B.B.B.B",
                "B.B.B.B.B.",
                ".B.B.B.B.B",
                "B.B.B.B.B.",
                ".B.B.B.B.B",
            ],
        ),
        (
            "Twin Wells",
            12,
            20,
            &["RRRR.RR.RRRR", "RRRR.RR.RRRR", "GGGG.GG.GGGG", "GGGG.GG.GGGG"],
        ),
        ("Narrow", 6, 16, &["Y....Y", "YY..YY"]),
    ];

    layouts
        .iter()
        .map(|&(name, width, height, bottom)| {
            BoardPreset::parse(name, stacked(width, height, bottom).as_slice(), None)
                .expect("built-in preset layouts are valid")
        })
        .collect()
}

/// Ordered presets plus the selected index
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<BoardPreset>,
    index: usize,
}

impl PresetCatalog {
    /// Create a catalog; `presets` must not be empty
    pub fn new(presets: Vec<BoardPreset>) -> Result<Self> {
        ensure!(!presets.is_empty(), "preset catalog is empty");
        Ok(Self { presets, index: 0 })
    }

    /// The built-in presets
    pub fn builtin() -> Self {
        Self {
            presets: builtin_presets(),
            index: 0,
        }
    }

    /// A catalog holding a single preset
    pub fn single(preset: BoardPreset) -> Self {
        Self {
            presets: vec![preset],
            index: 0,
        }
    }

    /// Append presets after the existing ones
    pub fn extend(&mut self, presets: impl IntoIterator<Item = BoardPreset>) {
        self.presets.extend(presets);
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &BoardPreset {
        &self.presets[self.index]
    }

    pub fn presets(&self) -> &[BoardPreset] {
        &self.presets
    }

    /// Select by index, wrapping past the end
    pub fn select(&mut self, index: usize) {
        self.index = index % self.presets.len();
    }

    /// Step back one preset, wrapping to the last
    pub fn previous(&mut self) {
        self.index = (self.index + self.presets.len() - 1) % self.presets.len();
    }

    /// Step forward one preset, wrapping to the first
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.presets.len();
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
