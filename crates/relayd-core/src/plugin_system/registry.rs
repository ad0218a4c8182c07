//! The `(category, name)`-keyed plugin registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::plugin_system::descriptor::{Category, PluginDescriptor};

/// Registry of discovered plugin descriptors.
///
/// Built once per orchestration run during discovery and read-only
/// afterwards. Re-registering an existing `(category, name)` key overwrites
/// silently: later plugin directories shadow earlier ones, which lets
/// override directories replace built-ins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    descriptors: BTreeMap<(Category, String), Arc<PluginDescriptor>>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register a descriptor under every category it implements.
    pub fn register(&mut self, descriptor: PluginDescriptor) {
        let descriptor = Arc::new(descriptor);
        for category in descriptor.categories.iter().copied() {
            self.register_for(category, Arc::clone(&descriptor));
        }
    }

    /// Register a descriptor under a single category.
    pub fn register_for(&mut self, category: Category, descriptor: Arc<PluginDescriptor>) {
        let key = (category, descriptor.name.clone());
        if let Some(previous) = self.descriptors.insert(key, descriptor) {
            log::debug!(
                "Plugin '{}' ({}) shadowed; earlier unit came from {}",
                previous.name,
                category,
                previous.source.display()
            );
        }
    }

    /// Look up a descriptor by category and declared name.
    pub fn lookup(&self, category: Category, name: &str) -> Option<Arc<PluginDescriptor>> {
        self.descriptors
            .get(&(category, name.to_string()))
            .cloned()
    }

    /// Whether the registry holds a descriptor for this category and name.
    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.descriptors.contains_key(&(category, name.to_string()))
    }

    /// All registered descriptors with their categories, in deterministic
    /// `(category, name)` order. Used for listing.
    pub fn all(&self) -> Vec<(Category, Arc<PluginDescriptor>)> {
        self.descriptors
            .iter()
            .map(|((category, _), descriptor)| (*category, Arc::clone(descriptor)))
            .collect()
    }

    /// Iterate over `(category, name)` keys and descriptors.
    pub fn iter(&self) -> impl Iterator<Item = (&(Category, String), &Arc<PluginDescriptor>)> {
        self.descriptors.iter()
    }

    /// Number of `(category, name)` registrations.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
