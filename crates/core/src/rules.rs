// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-job rule memory.
//!
//! Tracks which rules the engine reported as auto-fixable so that they can
//! be suppressed while a buffer is being edited. The worker never touches
//! this; the host merges each job's `rulesDiff` after the job completes.

use crate::job::{RuleSuppressionSet, RulesDiff};
use std::collections::BTreeMap;

/// Known rule states, keyed by rule id (`true` = auto-fixable).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleState {
    rules: BTreeMap<String, bool>,
}

impl RuleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a job's diff. Keys absent from `diff` are left unchanged;
    /// `false` drops the rule from the fixable set.
    pub fn update_rules(&mut self, diff: &RulesDiff) {
        for (rule, fixable) in diff {
            if *fixable {
                self.rules.insert(rule.clone(), true);
            } else {
                self.rules.remove(rule);
            }
        }
    }

    /// Suppression set for exactly the given rules.
    pub fn to_ignored<S: AsRef<str>>(explicit: &[S]) -> RuleSuppressionSet {
        explicit
            .iter()
            .map(|rule| (rule.as_ref().to_string(), true))
            .collect()
    }

    /// Suppression set for the given rules plus every rule known to be fixable.
    pub fn get_ignored_rules<S: AsRef<str>>(&self, explicit: &[S]) -> RuleSuppressionSet {
        let mut ignored = Self::to_ignored(explicit);
        ignored.extend(self.fixable_rules().map(|rule| (rule.to_string(), true)));
        ignored
    }

    /// Rules currently known to be auto-fixable.
    pub fn fixable_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, fixable)| **fixable)
            .map(|(rule, _)| rule.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
