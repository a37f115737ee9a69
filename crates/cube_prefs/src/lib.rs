//! User preferences for animation speed and pointer interaction.
//!
//! Preferences are layered with the `config` crate: the built-in
//! `default.yaml` first, then an optional user file on top of it.

#![allow(missing_docs)] // field docs live in the structs that need them

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use eyre::Result;
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;

#[cfg(test)]
mod tests;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
}
impl Preferences {
    /// Loads preferences from the built-in defaults, overridden by `user_file`
    /// if it is given. If loading fails, the error is logged and the default
    /// preferences are returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                DEFAULT_PREFS.clone()
            })
    }

    /// Saves preferences to `path` as YAML, creating parent directories as
    /// needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }
}
