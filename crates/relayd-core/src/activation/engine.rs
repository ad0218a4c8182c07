//! The activation engine and its output types.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::activation::error::ActivationError;
use crate::plugin_system::descriptor::{Category, PluginDescriptor};
use crate::plugin_system::registry::PluginRegistry;

/// One plugin descriptor bound to one configuration entry.
///
/// Ownership passes to the runtime core once orchestration reaches `Ready`.
#[derive(Debug, Clone)]
pub struct ActivatedPlugin {
    /// The resolved descriptor
    pub descriptor: Arc<PluginDescriptor>,
    /// The category this binding activates
    pub category: Category,
    /// Per-entry options: the entry mapping minus its `name` key, with
    /// non-null schema defaults filled in for absent keys
    pub options: Map<String, Value>,
}

/// Ordered activation lists per capability category.
///
/// Built fresh each run and never mutated after the engine completes.
#[derive(Debug, Default)]
pub struct CategoryBuckets {
    buckets: BTreeMap<Category, Vec<ActivatedPlugin>>,
}

impl CategoryBuckets {
    /// The activation list for a category, in configuration entry order.
    pub fn get(&self, category: Category) -> &[ActivatedPlugin] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of activated plugins across all categories.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether every category's activation list is empty.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Iterate over categories and their activation lists.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ActivatedPlugin])> {
        self.buckets
            .iter()
            .map(|(category, list)| (*category, list.as_slice()))
    }
}

/// Resolves configuration entries against the registry, one category at a
/// time.
pub struct ActivationEngine<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> ActivationEngine<'a> {
    /// Create an engine over a completed registry
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    /// Activate every entry of one category section.
    ///
    /// `section` is the value under the category's key in the merged
    /// configuration; absent or null means no entries. Entry order is
    /// preserved. Unresolvable entries are reported and skipped.
    pub fn activate(
        &self,
        category: Category,
        section: Option<&Value>,
    ) -> (Vec<ActivatedPlugin>, Vec<ActivationError>) {
        let mut activated = Vec::new();
        let mut errors = Vec::new();

        let entries = match section {
            None | Some(Value::Null) => return (activated, errors),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                errors.push(ActivationError::NotASequence { category });
                return (activated, errors);
            }
        };

        for (index, entry) in entries.iter().enumerate() {
            let name = entry
                .as_object()
                .and_then(|entry| entry.get("name"))
                .and_then(Value::as_str);
            let Some(name) = name else {
                errors.push(ActivationError::MissingName { category, index });
                continue;
            };

            let Some(descriptor) = self.registry.lookup(category, name) else {
                errors.push(ActivationError::UnknownPlugin {
                    category,
                    index,
                    name: name.to_string(),
                });
                continue;
            };

            let options = build_options(&descriptor, entry);
            activated.push(ActivatedPlugin {
                descriptor,
                category,
                options,
            });
        }

        (activated, errors)
    }

    /// Activate the fixed category set against a merged configuration.
    ///
    /// The per-category results are independent; order between categories
    /// does not matter.
    pub fn activate_all(&self, config: &Value) -> (CategoryBuckets, Vec<ActivationError>) {
        let mut buckets = CategoryBuckets::default();
        let mut errors = Vec::new();

        for category in Category::ALL {
            let section = config.get(category.as_str());
            let (activated, mut category_errors) = self.activate(category, section);
            buckets.buckets.insert(category, activated);
            errors.append(&mut category_errors);
        }

        (buckets, errors)
    }
}

/// Entry options merged with the descriptor's declared defaults.
fn build_options(descriptor: &PluginDescriptor, entry: &Value) -> Map<String, Value> {
    let mut options = entry
        .as_object()
        .cloned()
        .unwrap_or_default();
    options.remove("name");

    for spec in &descriptor.options {
        if spec.default.is_null() {
            continue; // a null default means no default
        }
        if !options.contains_key(&spec.name) {
            options.insert(spec.name.clone(), spec.default.clone());
        }
    }
    options
}
