// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host-side lint and fix flows
//!
//! Turns an editor buffer into a job and applies the rule-suppression policy.
//! Only completed fix jobs update the shared [`RuleState`].

use crate::config_locator::ConfigLocator;
use crate::dispatcher::JobDispatcher;
use crate::error::JobError;
use crate::runner::FIX_SKIPPED;
use le_adapters::{PathFinder, WorkerAdapter};
use le_core::{
    Diagnostic, IdGen, JobKind, JobSpec, RuleState, RuleSuppressionSet, Settings, SettingsStore,
    UuidIdGen,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Warning shown instead of linting a remote buffer
pub const REMOTE_FILE_WARNING: &str = "Remote file open, linter-eslint is disabled for this file.";

/// Error shown when a fix is requested on unsaved changes
pub const SAVE_BEFORE_FIXING: &str = "Linter-ESLint: Please save before fixing";

/// An editor buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Absolute path, or a URL for remote buffers
    pub path: String,
    pub contents: String,
    /// Has unsaved changes
    pub modified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    Diagnostics(Vec<Diagnostic>),
    /// Remote buffers are not linted
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The worker applied fixes; `notify` is false for fixes run on save
    Fixed { message: String, notify: bool },
    /// Buffer has unsaved changes
    Modified,
    /// Nothing to fix in an empty buffer
    Empty,
    /// No project config and files without one are skipped
    Disabled,
}

/// Entry point for editor-facing requests
pub struct Host<W, F, G = UuidIdGen> {
    dispatcher: JobDispatcher<W, G>,
    locator: ConfigLocator<F>,
    settings: SettingsStore,
    rules: Mutex<RuleState>,
    project_root: Option<PathBuf>,
}

impl<W, F, G> Host<W, F, G>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    pub fn new(dispatcher: JobDispatcher<W, G>, finder: F, settings: SettingsStore) -> Self {
        Self {
            dispatcher,
            locator: ConfigLocator::new(finder),
            settings,
            rules: Mutex::new(RuleState::new()),
            project_root: None,
        }
    }

    /// Directory reported as `projectPath` for files beneath it
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    pub fn dispatcher(&self) -> &JobDispatcher<W, G> {
        &self.dispatcher
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Snapshot of the rule memory
    pub fn rules(&self) -> RuleState {
        self.rules.lock().clone()
    }

    pub async fn lint(&self, buffer: &Buffer) -> Result<LintOutcome, JobError> {
        if buffer.path.contains("://") {
            return Ok(LintOutcome::Remote);
        }

        let settings = self.settings.current();
        let rules = buffer.modified.then(|| self.modified_rules(&settings));
        let job = self.job(JobKind::Lint, buffer, &settings, rules);

        let response = self.dispatcher.send_job(job).await?;
        Ok(LintOutcome::Diagnostics(
            response.messages.diagnostics().to_vec(),
        ))
    }

    pub async fn fix(&self, buffer: &Buffer, on_save: bool) -> Result<FixOutcome, JobError> {
        if buffer.modified {
            return Ok(FixOutcome::Modified);
        }
        if buffer.contents.is_empty() {
            return Ok(FixOutcome::Empty);
        }

        let settings = self.settings.current();
        let file_dir = Path::new(&buffer.path)
            .parent()
            .unwrap_or_else(|| Path::new("/"));
        let disabled = self
            .locator
            .is_lint_disabled(file_dir, settings.engine.disable_when_no_eslint_config)
            .map_err(|e| JobError::Resolution(e.to_string()))?;
        if disabled {
            return Ok(FixOutcome::Disabled);
        }

        let rules = RuleState::to_ignored(&settings.ignored_rules_when_fixing);
        let job = self.job(JobKind::Fix, buffer, &settings, Some(rules));
        let response = self.dispatcher.send_job(job).await?;
        if response.messages.text() == Some(FIX_SKIPPED) {
            return Ok(FixOutcome::Disabled);
        }
        self.rules.lock().update_rules(&response.rules_diff);

        Ok(FixOutcome::Fixed {
            message: response.messages.text().unwrap_or_default().to_string(),
            notify: !on_save,
        })
    }

    /// Fix-on-save hook; does nothing unless enabled in the settings.
    pub async fn saved(&self, buffer: &Buffer) -> Result<Option<FixOutcome>, JobError> {
        if !self.settings.current().fix_on_save {
            return Ok(None);
        }
        self.fix(buffer, true).await.map(Some)
    }

    /// Stop the worker for good
    pub fn shutdown(&self) {
        self.dispatcher.kill(true);
    }

    fn modified_rules(&self, settings: &Settings) -> RuleSuppressionSet {
        if settings.ignore_fixable_rules_while_typing {
            self.rules
                .lock()
                .get_ignored_rules(&settings.ignored_rules_when_modified)
        } else {
            RuleState::to_ignored(&settings.ignored_rules_when_modified)
        }
    }

    fn job(
        &self,
        kind: JobKind,
        buffer: &Buffer,
        settings: &Settings,
        rules: Option<RuleSuppressionSet>,
    ) -> JobSpec {
        let file_path = PathBuf::from(&buffer.path);
        let project_path = self
            .project_root
            .as_ref()
            .filter(|root| file_path.starts_with(root))
            .map(|root| root.display().to_string())
            .unwrap_or_default();
        JobSpec {
            kind,
            contents: buffer.contents.clone(),
            config: settings.job_config(),
            rules,
            file_path,
            project_path,
        }
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
