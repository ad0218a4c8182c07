use serde_json::json;

use crate::plugin_system::blacklist::Blacklist;
use crate::plugin_system::descriptor::Category;

#[test]
fn test_empty_config_yields_empty_blacklist() {
    let blacklist = Blacklist::from_config(&json!({}));
    assert!(blacklist.is_empty());
    assert!(!blacklist.contains(Category::Input, "statsd"));
}

#[test]
fn test_plugins_group_applies_to_every_category() {
    let config = json!({"blacklist": {"plugins": ["statsd"]}});
    let blacklist = Blacklist::from_config(&config);

    assert!(blacklist.contains(Category::Tunnel, "statsd"));
    assert!(blacklist.contains(Category::Input, "statsd"));
    assert!(blacklist.contains(Category::Output, "statsd"));
    assert!(!blacklist.contains(Category::Input, "udp"));
}

#[test]
fn test_per_category_key_scopes_to_one_category() {
    let config = json!({"blacklist": {"input": ["udp"]}});
    let blacklist = Blacklist::from_config(&config);

    assert!(blacklist.contains(Category::Input, "udp"));
    assert!(!blacklist.contains(Category::Output, "udp"));
    assert!(!blacklist.contains(Category::Tunnel, "udp"));
}

#[test]
fn test_out_of_scope_groups_are_ignored() {
    // processors/schemas belong to subsystems outside this layer
    let config = json!({"blacklist": {"processors": ["scrub"], "schemas": ["v1"]}});
    let blacklist = Blacklist::from_config(&config);
    assert!(blacklist.is_empty());
}

#[test]
fn test_malformed_groups_are_skipped() {
    let config = json!({"blacklist": {"plugins": "statsd", "input": [42, "udp"]}});
    let blacklist = Blacklist::from_config(&config);

    // the non-sequence group and the non-string entry are dropped
    assert!(!blacklist.contains(Category::Input, "statsd"));
    assert!(blacklist.contains(Category::Input, "udp"));
}
