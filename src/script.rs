//! Declarative comic scripts.
//!
//! A script is a pure data document that can be serialized via Serde (JSON)
//! and built into a live [`Comic`] in one pass. Nesting mirrors ownership:
//! the comic owns panels, panels own characters, and each character lists
//! the dialog it speaks (appended to its panel's shared stack in document
//! order).

use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::comic::Comic;
use crate::config::{CharacterConfig, ComicConfig, DialogConfig, PanelConfig};
use crate::error::{StripletError, StripletResult};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComicScript {
    /// Comic-level options (flattened into the document root).
    #[serde(flatten)]
    pub comic: ComicConfig,
    /// Panels in strip order.
    pub panels: Vec<PanelScript>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelScript {
    #[serde(flatten)]
    pub config: PanelConfig,
    /// Characters in draw order.
    pub characters: Vec<CharacterScript>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterScript {
    #[serde(flatten)]
    pub config: CharacterConfig,
    /// Dialog spoken by this character, stacked in the owning panel.
    pub dialogs: Vec<DialogConfig>,
}

impl ComicScript {
    pub fn from_json(json: &str) -> StripletResult<Self> {
        serde_json::from_str(json)
            .context("parse comic script JSON")
            .map_err(StripletError::from)
    }

    /// Build the full comic, loading character assets relative to
    /// `assets_root`. Construction stops at the first failure, leaving the
    /// error to the caller.
    pub fn build(&self, assets_root: impl Into<PathBuf>) -> StripletResult<Comic> {
        let mut comic = Comic::new(&self.comic, assets_root)?;
        for panel in &self.panels {
            let panel_id = comic.add_panel(&panel.config)?;
            for character in &panel.characters {
                let character_id = comic.add_character(panel_id, &character.config)?;
                for dialog in &character.dialogs {
                    comic.add_dialog(character_id, dialog)?;
                }
            }
        }
        Ok(comic)
    }
}
