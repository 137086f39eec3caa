// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use super::*;

fn spec(name: &str, services: &[&str]) -> GroupSpec {
    GroupSpec {
        name: name.to_string(),
        services: services.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn build_requires_at_least_one_service() {
    assert_eq!(
        GroupDescriptor::build(spec("db", &[])).unwrap_err(),
        ModelError::EmptyGroup("db".to_string())
    );
}

#[test]
fn build_accepts_dependencies() {
    let mut s = spec("api", &["server"]);
    s.dependencies = vec!["db".to_string()];
    let g = GroupDescriptor::build(s).unwrap();
    assert_eq!(g.dependencies, vec!["db"]);
}

#[test]
fn identifiers_includes_name_and_aliases() {
    let mut s = spec("db", &["postgres"]);
    s.aliases = vec!["database".to_string()];
    let g = GroupDescriptor::build(s).unwrap();
    assert_eq!(g.identifiers().collect::<Vec<_>>(), vec!["db", "database"]);
}
