use std::path::PathBuf;

use serde_json::json;

use crate::plugin_system::descriptor::{Category, PluginDescriptor};
use crate::plugin_system::registry::PluginRegistry;

fn descriptor(name: &str, categories: &[Category]) -> PluginDescriptor {
    let mut descriptor = PluginDescriptor::new(name, PathBuf::from(format!("/plugins/{}.json", name)));
    for category in categories {
        descriptor.add_category(*category);
    }
    descriptor
}

#[test]
fn test_register_and_lookup() {
    let mut registry = PluginRegistry::new();
    registry.register(descriptor("statsd", &[Category::Input]));

    let found = registry.lookup(Category::Input, "statsd").expect("not found");
    assert_eq!(found.name, "statsd");
    assert!(registry.contains(Category::Input, "statsd"));
    assert!(!registry.contains(Category::Output, "statsd"));
    assert!(registry.lookup(Category::Output, "statsd").is_none());
}

#[test]
fn test_multi_category_plugin_registers_under_each_category() {
    let mut registry = PluginRegistry::new();
    registry.register(descriptor("udp", &[Category::Input, Category::Output]));

    assert!(registry.contains(Category::Input, "udp"));
    assert!(registry.contains(Category::Output, "udp"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_reregistering_same_key_overwrites_silently() {
    let mut registry = PluginRegistry::new();

    let mut first = descriptor("statsd", &[Category::Input]);
    first.set_description("built-in");
    registry.register(first);

    let mut second = descriptor("statsd", &[Category::Input]);
    second.set_description("override");
    registry.register(second);

    // Last discovered wins; the key count is unchanged
    assert_eq!(registry.len(), 1);
    let found = registry.lookup(Category::Input, "statsd").unwrap();
    assert_eq!(found.description.as_deref(), Some("override"));
}

#[test]
fn test_all_lists_in_deterministic_order() {
    let mut registry = PluginRegistry::new();
    registry.register(descriptor("zebra", &[Category::Input]));
    registry.register(descriptor("alpha", &[Category::Input]));
    registry.register(descriptor("relay", &[Category::Tunnel]));

    let listed: Vec<(Category, String)> = registry
        .all()
        .into_iter()
        .map(|(category, descriptor)| (category, descriptor.name.clone()))
        .collect();

    // (category, name) order: tunnel sorts before input
    assert_eq!(
        listed,
        vec![
            (Category::Tunnel, "relay".to_string()),
            (Category::Input, "alpha".to_string()),
            (Category::Input, "zebra".to_string()),
        ]
    );
}

#[test]
fn test_descriptor_option_schema_is_ordered() {
    let mut descriptor = descriptor("statsd", &[Category::Input]);
    descriptor.add_option("port", json!(8125), Some("UDP listen port"));
    descriptor.add_option("host", json!("0.0.0.0"), None);

    let names: Vec<&str> = descriptor.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["port", "host"]);
}

#[test]
fn test_empty_registry() {
    let registry = PluginRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.all().is_empty());
}
