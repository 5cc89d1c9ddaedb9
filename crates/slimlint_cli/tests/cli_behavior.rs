//! Integration tests for CLI behavior
//!
//! A shell script stands in for slim-lint, so the `check` tests only run on
//! unix.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a command for the slimlint CLI
fn slimlint_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_slimlint"))
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        slimlint_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("check"))
            .stdout(predicate::str::contains("lsp"));
    }

    #[test]
    fn shows_version_with_flag() {
        slimlint_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn check_requires_files() {
        slimlint_cmd()
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("<FILES>"));
    }
}

#[cfg(unix)]
mod check_command {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const WARN_SCRIPT: &str = "for last; do :; done\n\
                               echo \"$last:1 [W] LineLength: Line is too long. [95/80]\"";

    struct Project {
        dir: TempDir,
    }

    impl Project {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("index.slim"), "p Hello\n").unwrap();
            Self { dir }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn script(&self, body: &str) -> String {
            let path = self.root().join("fake-slim-lint.sh");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            format!("sh {}", path.display())
        }

        fn file(&self, name: &str) -> PathBuf {
            self.root().join(name)
        }

        fn check(&self, body: &str) -> Command {
            let mut cmd = slimlint_cmd();
            cmd.current_dir(self.root())
                .arg("check")
                .arg("--executable")
                .arg(self.script(body));
            cmd
        }
    }

    #[test]
    fn reports_warnings_and_succeeds() {
        let project = Project::new();

        project
            .check(WARN_SCRIPT)
            .arg("index.slim")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "1:1 warning LineLength: Line is too long. [95/80]",
            ))
            .stdout(predicate::str::contains("Checked 1 files, found 1 issues"));
    }

    #[test]
    fn errors_exit_with_one() {
        let project = Project::new();

        project
            .check("for last; do :; done\necho \"$last:1 [E] Tab: Tab detected\"\nexit 65")
            .arg("index.slim")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("1:1 error Tab: Tab detected"));
    }

    #[test]
    fn clean_file_reports_no_issues() {
        let project = Project::new();

        project
            .check("exit 0")
            .arg("index.slim")
            .assert()
            .success()
            .stdout(predicate::str::contains("found 0 issues"));
    }

    #[test]
    fn json_output_lists_diagnostics() {
        let project = Project::new();

        let output = project
            .check(WARN_SCRIPT)
            .args(["--format", "json"])
            .arg("index.slim")
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json[0]["path"], "index.slim");
        let diag = &json[0]["diagnostics"][0];
        assert_eq!(diag["line"], 0);
        assert_eq!(diag["severity"], "warning");
        assert_eq!(diag["rule_name"], "LineLength");
        assert_eq!(diag["range"]["end_character"], 7);
    }

    #[test]
    fn passes_existing_rules_file() {
        let project = Project::new();
        std::fs::write(project.file("rules.yml"), "linters: {}\n").unwrap();

        project
            .check("echo \"$3:1 [W] Config: $1 $2\"")
            .args(["--config", "rules.yml"])
            .arg("index.slim")
            .assert()
            .success()
            .stdout(predicate::str::contains("--config"))
            .stdout(predicate::str::contains("rules.yml"));
    }

    #[test]
    fn tool_stderr_is_a_failure() {
        let project = Project::new();

        project
            .check("echo 'undefined method' >&2\nexit 1")
            .arg("index.slim")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("undefined method"));
    }

    #[test]
    fn missing_executable_is_a_failure() {
        let project = Project::new();

        slimlint_cmd()
            .current_dir(project.root())
            .args(["check", "--executable", "definitely-not-slim-lint-xyz"])
            .arg("index.slim")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("executable not found"));
    }

    #[test]
    fn timeout_kills_slow_runs() {
        let project = Project::new();

        project
            .check("sleep 5")
            .args(["--timeout", "1"])
            .arg("index.slim")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("was killed"));
    }

    #[test]
    fn skips_non_slim_files() {
        let project = Project::new();
        std::fs::write(project.file("index.html"), "<p>Hello</p>\n").unwrap();

        project
            .check(WARN_SCRIPT)
            .arg("index.html")
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 0 files"))
            .stderr(predicate::str::contains("not a Slim template"));
    }
}
