//! Per-category plugin name exclusions.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::plugin_system::descriptor::Category;

/// Plugin names excluded from discovery, scoped per capability category.
///
/// A blacklisted name is never registered for that category, never visible
/// to listing, and never activatable. A plugin blacklisted in one category
/// may still register for another category it implements.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: BTreeMap<Category, BTreeSet<String>>,
}

impl Blacklist {
    /// Create an empty blacklist
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the blacklist from a merged configuration tree.
    ///
    /// Recognized keys under `blacklist`: the `plugins` group, which applies
    /// to every capability category, and per-category keys (`tunnel`,
    /// `input`, `output`). Groups belonging to subsystems outside this layer
    /// (`processors`, `schemas`) are ignored. Every value is expected to be
    /// a sequence of names.
    pub fn from_config(config: &Value) -> Self {
        let mut blacklist = Self::new();
        let Some(section) = config.get("blacklist").and_then(Value::as_object) else {
            return blacklist;
        };

        for (group, names) in section {
            let categories: Vec<Category> = match group.as_str() {
                "plugins" => Category::ALL.to_vec(),
                "tunnel" => vec![Category::Tunnel],
                "input" => vec![Category::Input],
                "output" => vec![Category::Output],
                other => {
                    log::debug!("Ignoring blacklist group '{}': not handled by this layer", other);
                    continue;
                }
            };
            let Some(names) = names.as_array() else {
                log::warn!("Blacklist group '{}' is not a sequence of names; ignoring", group);
                continue;
            };
            for name in names {
                match name.as_str() {
                    Some(name) => {
                        for category in &categories {
                            blacklist.insert(*category, name);
                        }
                    }
                    None => {
                        log::warn!("Ignoring non-string entry in blacklist group '{}'", group);
                    }
                }
            }
        }
        blacklist
    }

    /// Exclude a name from one category.
    pub fn insert(&mut self, category: Category, name: &str) {
        self.entries
            .entry(category)
            .or_default()
            .insert(name.to_string());
    }

    /// Whether a name is excluded for the given category.
    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.entries
            .get(&category)
            .is_some_and(|names| names.contains(name))
    }

    /// Whether no name is excluded anywhere.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }
}
