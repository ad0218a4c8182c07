//! Plugin metadata: capability categories, option schema, descriptor.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fixed role a plugin can fill.
///
/// Activation runs once per category; a plugin may implement several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Carries events between daemon instances
    Tunnel,
    /// Receives events from external producers
    Input,
    /// Delivers events to external consumers
    Output,
}

impl Category {
    /// The fixed category set, in activation order.
    pub const ALL: [Category; 3] = [Category::Tunnel, Category::Input, Category::Output];

    /// The configuration key naming this category's activation entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tunnel => "tunnel",
            Category::Input => "input",
            Category::Output => "output",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tunnel" => Ok(Category::Tunnel),
            "input" => Ok(Category::Input),
            "output" => Ok(Category::Output),
            other => Err(format!("unknown capability category '{}'", other)),
        }
    }
}

/// One declared configuration option of a plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Option name as it appears in an activation entry
    pub name: String,

    /// Default value applied when the entry omits the option. A null
    /// default means the option has no default.
    pub default: Value,

    /// Optional help text for schema listings
    pub help: Option<String>,
}

/// Represents a discoverable capability unit.
///
/// Created once at discovery time, immutable thereafter, and owned by the
/// [`PluginRegistry`](crate::plugin_system::registry::PluginRegistry) for
/// the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDescriptor {
    /// Declared plugin name, unique within each category
    pub name: String,

    /// Where the unit was discovered (for diagnostics)
    pub source: PathBuf,

    /// Capability categories the plugin implements
    pub categories: BTreeSet<Category>,

    /// Declared plugin version (optional)
    pub version: Option<semver::Version>,

    /// Declared option schema, in declaration order
    pub options: Vec<OptionSpec>,

    /// Optional human-readable description
    pub description: Option<String>,
}

impl PluginDescriptor {
    /// Create a new descriptor with an empty capability set and schema.
    pub fn new(name: &str, source: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            source,
            categories: BTreeSet::new(),
            version: None,
            options: Vec::new(),
            description: None,
        }
    }

    /// Add a capability category
    pub fn add_category(&mut self, category: Category) -> &mut Self {
        self.categories.insert(category);
        self
    }

    /// Add a declared option
    pub fn add_option(&mut self, name: &str, default: Value, help: Option<&str>) -> &mut Self {
        self.options.push(OptionSpec {
            name: name.to_string(),
            default,
            help: help.map(str::to_string),
        });
        self
    }

    /// Set the description
    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    /// Whether the plugin implements the given category
    pub fn implements(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}
