//! Locale text lookup - level, path and milestone strings resolved per language.
//! Tables hold resolved strings; switching language means rebuilding the tables.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::ConfigError;

pub const BUILTIN_DE: &str = include_str!("data/locales/de.json");
pub const BUILTIN_EN: &str = include_str!("data/locales/en.json");

/// Languages shipped with the crate.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::De, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }

    fn builtin_json(self) -> &'static str {
        match self {
            Locale::De => BUILTIN_DE,
            Locale::En => BUILTIN_EN,
        }
    }
}

/// Resolves a stable key like `levels.3.name` to display text.
pub trait MessageLookup {
    fn lookup(&self, key: &str) -> Option<String>;

    /// Missing keys fall back to the key itself.
    fn text(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }
}

impl<F> MessageLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// A parsed JSON message catalog. Dotted keys walk nested objects and arrays.
#[derive(Clone, Debug)]
pub struct LocaleCatalog {
    root: Value,
}

impl LocaleCatalog {
    pub fn builtin(locale: Locale) -> Result<Self, ConfigError> {
        Self::from_json_str(locale.builtin_json())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(json)?;
        if !root.is_object() {
            return Err(ConfigError::CatalogShape);
        }
        Ok(Self { root })
    }
}

impl MessageLookup for LocaleCatalog {
    fn lookup(&self, key: &str) -> Option<String> {
        let pointer = format!("/{}", key.replace('.', "/"));
        self.root.pointer(&pointer).and_then(Value::as_str).map(str::to_owned)
    }
}
