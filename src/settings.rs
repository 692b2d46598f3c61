//! Progression settings persistence - save/load config to JSON file.
//!
//! `ProgressionPlugin::from_saved_settings` reads them at startup. The plugin never
//! writes them; hosts call [`save_settings`] after the player changes an option.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::locale::Locale;
use crate::trail::TrailConfig;

/// Persisted progression settings. Saved to `Documents/SudokuProgression/progression.json`.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProgressionSettings {
    #[serde(default)]
    pub locale: Locale,
    // Celebrations
    #[serde(default = "default_true")]
    pub show_milestones: bool,
    #[serde(default = "default_true")]
    pub enable_level_up_animation: bool,
    // Trail layout
    #[serde(default)]
    pub trail: TrailConfig,
}

fn default_true() -> bool { true }

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            show_milestones: true,
            enable_level_up_animation: true,
            trail: TrailConfig::default(),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let home = std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .ok()?;
    let dir = PathBuf::from(home).join("Documents").join("SudokuProgression");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("progression.json"))
}

pub fn save_settings(settings: &ProgressionSettings) {
    let Some(path) = settings_path() else { return };
    save_settings_to(settings, &path);
}

pub fn save_settings_to(settings: &ProgressionSettings, path: &std::path::Path) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                warn!("Failed to save progression settings: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize progression settings: {}", e),
    }
}

pub fn load_settings() -> ProgressionSettings {
    let Some(path) = settings_path() else { return ProgressionSettings::default() };
    load_settings_from(&path)
}

/// Unreadable or malformed files fall back to defaults.
pub fn load_settings_from(path: &std::path::Path) -> ProgressionSettings {
    match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Ignoring malformed progression settings: {}", e);
            ProgressionSettings::default()
        }),
        Err(_) => ProgressionSettings::default(),
    }
}
