// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn diff(entries: &[(&str, bool)]) -> RulesDiff {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn update_then_ignore_round_trip() {
    let mut state = RuleState::new();
    let none: [&str; 0] = [];

    state.update_rules(&diff(&[("a", true)]));
    assert_eq!(state.get_ignored_rules(&none).get("a"), Some(&true));

    state.update_rules(&diff(&[("a", false)]));
    assert!(state.get_ignored_rules(&none).get("a").is_none());
    assert!(state.is_empty());
}

#[test]
fn absent_keys_are_unchanged() {
    let mut state = RuleState::new();
    state.update_rules(&diff(&[("semi", true), ("quotes", true)]));
    state.update_rules(&diff(&[("indent", true)]));

    let fixable: Vec<&str> = state.fixable_rules().collect();
    assert_eq!(fixable, vec!["indent", "quotes", "semi"]);
}

#[test]
fn to_ignored_marks_each_rule() {
    let ignored = RuleState::to_ignored(&["no-console", "eol-last"]);
    assert_eq!(ignored.len(), 2);
    assert!(ignored.values().all(|v| *v));
}

#[test]
fn to_ignored_of_empty_list_is_empty() {
    let none: [String; 0] = [];
    assert!(RuleState::to_ignored(&none).is_empty());
}

#[test]
fn get_ignored_rules_combines_explicit_and_fixable() {
    let mut state = RuleState::new();
    state.update_rules(&diff(&[("semi", true), ("no-undef", false)]));

    let ignored = state.get_ignored_rules(&["eol-last".to_string()]);
    let keys: Vec<&str> = ignored.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["eol-last", "semi"]);
}

#[test]
fn explicit_rule_stays_ignored_even_if_not_fixable() {
    let mut state = RuleState::new();
    state.update_rules(&diff(&[("eol-last", false)]));
    let ignored = state.get_ignored_rules(&["eol-last"]);
    assert_eq!(ignored.get("eol-last"), Some(&true));
}
