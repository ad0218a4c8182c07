mod blacklist_tests;
mod registry_tests;
