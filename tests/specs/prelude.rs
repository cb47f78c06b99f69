//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running `le` against a temporary project.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

// Keep worker startup failures fast
const LE_WORKER_READY_MS: &str = "5000";

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn le_binary() -> PathBuf {
    binary_path("le")
}

pub fn worker_binary() -> PathBuf {
    binary_path("le-worker")
}

/// Create a CLI builder for le commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![
                (
                    "LE_WORKER_BINARY".into(),
                    worker_binary().to_string_lossy().into(),
                ),
                ("LE_WORKER_READY_MS".into(), LE_WORKER_READY_MS.into()),
                ("NO_COLOR".into(), "1".into()),
            ],
            stdin: None,
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Feed text to the command's stdin
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Build the command without running it
    pub fn command(self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(le_binary());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Parent settings and log filters must not leak into specs
        cmd.env_remove("LE_CONFIG");
        cmd.env_remove("LE_LOG");
        cmd.env_remove("RUST_LOG");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.timeout(std::time::Duration::from_secs(30));

        cmd
    }

    fn output(self) -> Output {
        self.command().output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Parse stdout as one JSON document
    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }

    /// Parse stdout as newline-delimited JSON
    pub fn stdout_lines_json(&self) -> Vec<serde_json::Value> {
        self.stdout()
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
            .collect()
    }
}

// =============================================================================
// Project
// =============================================================================

/// Stand-in for an engine installation: a shell script run through `sh`
/// via the `node_executable` setting. It prints `report` and exits with
/// `status`; fix runs print `fix_report` instead.
pub fn fake_engine_script(report: &str, fix_report: &str, status: i32) -> String {
    format!(
        "cat > /dev/null\n\
         case \" $* \" in\n\
         *\" --fix-dry-run \"*) printf '%s' '{fix_report}' ;;\n\
         *) printf '%s' '{report}' ;;\n\
         esac\n\
         exit {status}\n"
    )
}

/// Temporary test project directory with helper methods.
pub struct Project {
    dir: tempfile::TempDir,
    /// Isolated state directory for this test (LE_STATE_DIR)
    state_dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            state_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with an engine config, an installed fake engine, and
    /// settings that run the engine script through `sh`.
    pub fn with_engine(script: &str) -> Self {
        let project = Self::empty();
        project.file(".eslintrc.json", "{}");
        project.file(
            "node_modules/eslint/package.json",
            r#"{"name":"eslint","version":"8.57.0"}"#,
        );
        project.file("node_modules/eslint/lib/cli.js", "");
        project.file("node_modules/eslint/bin/eslint.js", script);
        project.settings("[engine]\nnode_executable = \"sh\"\n");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).unwrap()
    }

    /// Write the le settings file used by this project's commands
    pub fn settings(&self, toml: &str) {
        std::fs::write(self.settings_path(), toml).unwrap();
    }

    pub fn settings_path(&self) -> PathBuf {
        self.state_dir.path().join("config.toml")
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Run le in this project's context
    pub fn le(&self) -> CliBuilder {
        cli()
            .pwd(self.path())
            .env("LE_STATE_DIR", self.state_path())
            .env("LE_CONFIG", self.settings_path())
    }

    /// Worker log contents (for debugging test failures)
    pub fn worker_log(&self) -> Option<String> {
        std::fs::read_to_string(self.state_path().join("worker.log")).ok()
    }
}
