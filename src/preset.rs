//! Named tunings read from a TOML file.
//!
//! ```toml
//! [presets.ruibin]
//! name = "Ruibin Diao"
//! tuning = ["C2", "D2", "F2", "G2", "B♭2", "C3", "D3"]
//! ```
//!
//! A missing file is the same as a file with no presets.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::Result;
use crate::table::Tuning;

/// One named tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Preset {
    /// Display name, defaults to the preset key
    #[serde(default)]
    pub name: Option<String>,

    /// Open-string pitch names, validated when the preset is used
    pub tuning: Vec<String>,
}

impl Preset {
    /// Parse the preset's pitch names into a tuning.
    pub fn tuning(&self) -> Result<Tuning> {
        Tuning::parse(&self.tuning[..])
    }
}

#[derive(Debug, Default, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, Preset>,
}

/// All presets available to a session, keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presets(BTreeMap<String, Preset>);

impl Presets {
    /// Read presets from `path`. A missing file yields no presets.
    pub fn load(path: &Path) -> Result<Presets> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no preset file at {}", path.display());
                return Ok(Presets::default());
            }
            Err(e) => return Err(e.into()),
        };

        let presets = Presets::from_toml(&text)?;
        info!("loaded {} presets from {}", presets.len(), path.display());

        Ok(presets)
    }

    /// Parse presets from TOML text.
    pub fn from_toml(text: &str) -> Result<Presets> {
        let file: PresetFile = toml::from_str(text)?;
        Ok(Presets(file.presets))
    }

    /// Look up a preset by its key.
    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.0.get(key)
    }

    /// Display name for a preset: its `name`, or the key when unnamed.
    pub fn display_name<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        self.get(key).map(|p| p.name.as_deref().unwrap_or(key))
    }

    /// Preset keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
