//! Integration tests for the injectlint command line
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMPONENT_CLASS: &str = r#"package com.example.di;

import dagger.Component;

@Component
public class AppComponent {
}
"#;

const CLEAN_MODULE: &str = r#"package com.example.di

import dagger.Module
import dagger.Provides
import dagger.hilt.InstallIn
import dagger.hilt.components.SingletonComponent

@Module
@InstallIn(SingletonComponent::class)
object ClockModule {
    @Provides
    fun provideZone(): String = "UTC"
}
"#;

fn setup_project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, content) in files {
        let path = temp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    temp
}

fn injectlint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("injectlint").unwrap();
    cmd.arg(dir).env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_clean_project_succeeds() {
    let temp = setup_project(&[("src/ClockModule.kt", CLEAN_MODULE)]);
    injectlint(temp.path()).assert().success();
}

#[test]
fn cli_error_findings_fail() {
    let temp = setup_project(&[("src/AppComponent.java", COMPONENT_CLASS)]);
    injectlint(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ComponentMustBeAbstract"));
}

#[test]
fn cli_disable_issue() {
    let temp = setup_project(&[("src/AppComponent.java", COMPONENT_CLASS)]);
    injectlint(temp.path())
        .args(["--disable", "ComponentMustBeAbstract"])
        .assert()
        .success();
}

#[test]
fn cli_json_output_is_parseable() {
    let temp = setup_project(&[
        ("src/AppComponent.java", COMPONENT_CLASS),
        ("src/ClockModule.kt", CLEAN_MODULE),
    ]);
    let output = injectlint(temp.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tool"], "injectlint");
    assert_eq!(value["summary"]["errors"], 1);
    assert_eq!(value["findings"][0]["id"], "ComponentMustBeAbstract");
    assert_eq!(value["findings"][0]["file"], "src/AppComponent.java");
}

#[test]
fn cli_sarif_to_file() {
    let temp = setup_project(&[("src/AppComponent.java", COMPONENT_CLASS)]);
    let report = temp.path().join("report.sarif");
    injectlint(temp.path())
        .args(["--format", "sarif", "--output"])
        .arg(&report)
        .assert()
        .code(1);

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["version"], "2.1.0");
    assert_eq!(value["runs"][0]["results"][0]["ruleId"], "ComponentMustBeAbstract");
}

#[test]
fn cli_list_issues() {
    let temp = TempDir::new().unwrap();
    injectlint(temp.path())
        .arg("--list-issues")
        .assert()
        .success()
        .stdout(predicate::str::contains("AnvilJavaUsage"))
        .stdout(predicate::str::contains("MissingInstallIn"))
        .stdout(predicate::str::contains("[off by default]"));
}

#[test]
fn cli_baseline_hides_known_findings() {
    let temp = setup_project(&[("src/AppComponent.java", COMPONENT_CLASS)]);
    let baseline = temp.path().join("baseline.json");

    injectlint(temp.path())
        .arg("--generate-baseline")
        .arg(&baseline)
        .assert()
        .code(1);
    assert!(baseline.exists());

    injectlint(temp.path())
        .arg("--baseline")
        .arg(&baseline)
        .assert()
        .success()
        .stdout(predicate::str::contains("No new issues found"));
}

#[test]
fn cli_fix_rewrites_files() {
    let temp = setup_project(&[("src/AppComponent.java", COMPONENT_CLASS)]);
    let file = temp.path().join("src/AppComponent.java");

    // Findings are reported before fixing, so the run still fails
    injectlint(temp.path()).arg("--fix").assert().code(1);
    assert!(fs::read_to_string(&file)
        .unwrap()
        .contains("public interface AppComponent"));

    injectlint(temp.path()).assert().success();
}

#[test]
fn cli_dry_run_previews() {
    let temp = setup_project(&[("src/AppComponent.java", COMPONENT_CLASS)]);
    let file = temp.path().join("src/AppComponent.java");

    injectlint(temp.path())
        .arg("--dry-run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("+ interface"));
    assert_eq!(fs::read_to_string(&file).unwrap(), COMPONENT_CLASS);
}

#[test]
fn cli_config_file_severity() {
    let temp = setup_project(&[
        ("src/AppComponent.java", COMPONENT_CLASS),
        (
            "injectlint.toml",
            "[severity]\nComponentMustBeAbstract = \"warning\"\n",
        ),
    ]);
    injectlint(temp.path()).assert().success();
}

#[test]
fn cli_completions() {
    let mut cmd = Command::cargo_bin("injectlint").unwrap();
    cmd.args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("injectlint"));
}
