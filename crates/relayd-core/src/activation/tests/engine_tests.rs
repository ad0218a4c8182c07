use std::path::PathBuf;

use serde_json::json;

use crate::activation::engine::ActivationEngine;
use crate::activation::error::ActivationError;
use crate::plugin_system::descriptor::{Category, PluginDescriptor};
use crate::plugin_system::registry::PluginRegistry;

fn registry_with(names: &[(&str, Category)]) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for (name, category) in names {
        let mut descriptor =
            PluginDescriptor::new(name, PathBuf::from(format!("/plugins/{}.json", name)));
        descriptor.add_category(*category);
        registry.register(descriptor);
    }
    registry
}

#[test]
fn test_activation_preserves_entry_order() {
    let registry = registry_with(&[
        ("statsd", Category::Input),
        ("udp", Category::Input),
        ("syslog", Category::Input),
    ]);
    let engine = ActivationEngine::new(&registry);

    let section = json!([
        {"name": "udp"},
        {"name": "statsd"},
        {"name": "syslog"},
    ]);
    let (activated, errors) = engine.activate(Category::Input, Some(&section));

    assert!(errors.is_empty());
    let names: Vec<&str> = activated
        .iter()
        .map(|plugin| plugin.descriptor.name.as_str())
        .collect();
    assert_eq!(names, vec!["udp", "statsd", "syslog"]);
}

#[test]
fn test_unknown_plugin_is_reported_and_skipped() {
    let registry = registry_with(&[("statsd", Category::Input)]);
    let engine = ActivationEngine::new(&registry);

    let section = json!([
        {"name": "missing"},
        {"name": "statsd"},
    ]);
    let (activated, errors) = engine.activate(Category::Input, Some(&section));

    assert_eq!(activated.len(), 1);
    assert_eq!(activated[0].descriptor.name, "statsd");
    assert!(matches!(
        errors.as_slice(),
        [ActivationError::UnknownPlugin { index: 0, .. }]
    ));
}

#[test]
fn test_entry_without_name_is_reported_and_skipped() {
    let registry = registry_with(&[("statsd", Category::Input)]);
    let engine = ActivationEngine::new(&registry);

    let section = json!([
        {"port": 8125},
        "just-a-string",
        {"name": "statsd"},
    ]);
    let (activated, errors) = engine.activate(Category::Input, Some(&section));

    assert_eq!(activated.len(), 1);
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ActivationError::MissingName { .. })));
}

#[test]
fn test_plugin_registered_in_other_category_is_unknown_here() {
    let registry = registry_with(&[("statsd", Category::Input)]);
    let engine = ActivationEngine::new(&registry);

    let section = json!([{"name": "statsd"}]);
    let (activated, errors) = engine.activate(Category::Output, Some(&section));

    assert!(activated.is_empty());
    assert!(matches!(
        errors.as_slice(),
        [ActivationError::UnknownPlugin { .. }]
    ));
}

#[test]
fn test_absent_or_null_section_yields_empty_bucket() {
    let registry = registry_with(&[("statsd", Category::Input)]);
    let engine = ActivationEngine::new(&registry);

    let (activated, errors) = engine.activate(Category::Input, None);
    assert!(activated.is_empty());
    assert!(errors.is_empty());

    let null = json!(null);
    let (activated, errors) = engine.activate(Category::Input, Some(&null));
    assert!(activated.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn test_non_sequence_section_is_an_error() {
    let registry = registry_with(&[("statsd", Category::Input)]);
    let engine = ActivationEngine::new(&registry);

    let section = json!({"name": "statsd"});
    let (activated, errors) = engine.activate(Category::Input, Some(&section));

    assert!(activated.is_empty());
    assert!(matches!(
        errors.as_slice(),
        [ActivationError::NotASequence { category: Category::Input }]
    ));
}

#[test]
fn test_entry_options_exclude_name_and_apply_defaults() {
    let mut registry = PluginRegistry::new();
    let mut descriptor = PluginDescriptor::new("statsd", PathBuf::from("/plugins/statsd.json"));
    descriptor.add_category(Category::Input);
    descriptor.add_option("port", json!(8125), None);
    descriptor.add_option("host", json!("0.0.0.0"), None);
    descriptor.add_option("prefix", json!(null), None); // no default
    registry.register(descriptor);
    let engine = ActivationEngine::new(&registry);

    let section = json!([{"name": "statsd", "port": 9000}]);
    let (activated, errors) = engine.activate(Category::Input, Some(&section));

    assert!(errors.is_empty());
    let options = &activated[0].options;
    assert!(!options.contains_key("name"));
    assert_eq!(options.get("port"), Some(&json!(9000))); // entry wins
    assert_eq!(options.get("host"), Some(&json!("0.0.0.0"))); // default applied
    assert!(!options.contains_key("prefix")); // null default not inserted
}

#[test]
fn test_activate_all_builds_independent_buckets() {
    let registry = registry_with(&[
        ("statsd", Category::Input),
        ("carbon", Category::Output),
    ]);
    let engine = ActivationEngine::new(&registry);

    let config = json!({
        "input": [{"name": "statsd"}],
        "output": [{"name": "carbon"}, {"name": "nope"}],
    });
    let (buckets, errors) = engine.activate_all(&config);

    assert_eq!(buckets.get(Category::Input).len(), 1);
    assert_eq!(buckets.get(Category::Output).len(), 1);
    assert!(buckets.get(Category::Tunnel).is_empty());
    assert_eq!(buckets.total(), 2);
    assert!(!buckets.is_empty());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_end_to_end_example() {
    // config {"input": [{"name": "statsd"}], "output": []} with one
    // discovered input plugin and an empty blacklist
    let registry = registry_with(&[("statsd", Category::Input)]);
    let engine = ActivationEngine::new(&registry);

    let config = json!({"input": [{"name": "statsd"}], "output": []});
    let (buckets, errors) = engine.activate_all(&config);

    assert!(errors.is_empty());
    let input = buckets.get(Category::Input);
    assert_eq!(input.len(), 1);
    assert_eq!(input[0].descriptor.name, "statsd");
    assert!(input[0].options.is_empty());
    assert!(buckets.get(Category::Output).is_empty());
    assert!(buckets.get(Category::Tunnel).is_empty());
}
