//! Integration tests for the Dagger, Anvil and Hilt rules
//!
//! Each test parses fixture sources, builds the declaration graph and runs
//! the full rule set with the default configuration.

use injectlint::analysis::{Fix, Issue, Severity};
use injectlint::config::Config;
use injectlint::discovery::{FileType, SourceFile};
use injectlint::graph::{Graph, GraphBuilder, Language};
use injectlint::refactor::FixApplier;
use injectlint::{lint, Finding};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn build_files(paths: &[PathBuf]) -> Graph {
    let mut builder = GraphBuilder::new();
    for path in paths {
        let file_type = FileType::from_path(path).expect("Unsupported fixture");
        builder
            .process_file(&SourceFile::new(path.clone(), file_type))
            .expect("Failed to process file");
    }
    builder.build()
}

/// Lint one fixture file with the default configuration
fn lint_fixture(relative: &str) -> Vec<Finding> {
    let path = fixtures_path().join(relative);
    if !path.exists() {
        panic!("Fixture not found: {:?}", path);
    }
    lint(&build_files(&[path]), &Config::default())
}

fn lint_source(name: &str, language: Language, source: &str) -> Vec<Finding> {
    let mut builder = GraphBuilder::new();
    builder
        .process_source(Path::new(name), language, source)
        .expect("Failed to parse source");
    lint(&builder.build(), &Config::default())
}

fn of_issue(findings: &[Finding], issue: Issue) -> Vec<&Finding> {
    findings.iter().filter(|f| f.issue == issue).collect()
}

fn declarations(findings: &[Finding], issue: Issue) -> Vec<String> {
    let mut names: Vec<_> = of_issue(findings, issue)
        .iter()
        .map(|f| f.declaration.clone())
        .collect();
    names.sort();
    names
}

/// Copy a fixture into a fresh directory so fixes can rewrite it
fn copy_fixture(relative: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let source = fixtures_path().join(relative);
    let target = dir.path().join(source.file_name().unwrap());
    fs::copy(&source, &target).unwrap();
    (dir, target)
}

mod dagger_tests {
    use super::*;

    #[test]
    fn test_component_class_must_be_abstract() {
        let findings = lint_fixture("java/AppComponent.java");
        let hits = of_issue(&findings, Issue::ComponentMustBeAbstract);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].declaration, "com.example.di.AppComponent");
        assert_eq!(hits[0].severity, Severity::Error);

        let Some(Fix::Single(fix)) = &hits[0].fix else {
            panic!("expected a single fix");
        };
        assert_eq!(fix.edits.len(), 1);
        assert_eq!(fix.edits[0].replacement, "interface");
    }

    #[test]
    fn test_final_component_class_has_no_fix() {
        let source = "package com.example.di;\n\nimport dagger.Component;\n\n@Component\npublic final class AppComponent {\n}\n";
        let findings = lint_source("AppComponent.java", Language::Java, source);
        let hits = of_issue(&findings, Issue::ComponentMustBeAbstract);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].fix.is_none());
    }

    #[test]
    fn test_java_provides_should_be_static() {
        let findings = lint_fixture("java/NetworkModule.java");
        let hits = of_issue(&findings, Issue::ProvidesMethodShouldBeStatic);
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].declaration,
            "com.example.di.NetworkModule.provideBaseUrl"
        );
        assert!(hits[0].fix.is_some());
        assert!(of_issue(&findings, Issue::MissingInstallIn).is_empty());
    }

    #[test]
    fn test_kotlin_object_provides_are_static() {
        let findings = lint_fixture("kotlin/provides_modules.kt");
        assert_eq!(
            declarations(&findings, Issue::ProvidesMethodShouldBeStatic),
            vec!["com.example.di.StorageModule.provideDatabaseName"]
        );
        // Kotlin has no keyword to insert
        let hit = of_issue(&findings, Issue::ProvidesMethodShouldBeStatic)[0];
        assert!(hit.fix.is_none());
        assert!(hit.message.contains("object"));
    }

    #[test]
    fn test_invalid_component_methods() {
        let findings = lint_fixture("java/ShopComponent.java");
        assert_eq!(
            declarations(&findings, Issue::InvalidComponentMethod),
            vec![
                "com.example.shop.ShopComponent.merge",
                "com.example.shop.ShopComponent.refresh",
            ]
        );
        assert!(of_issue(&findings, Issue::ComponentMustBeAbstract).is_empty());
    }

    #[test]
    fn test_binds_parameter_count() {
        let findings = lint_fixture("kotlin/dagger_bindings.kt");
        assert_eq!(
            declarations(&findings, Issue::BindsWrongParameterCount),
            vec!["com.example.logging.LoggingModule.bindNothing"]
        );
        assert!(of_issue(&findings, Issue::BindsMustBeAbstract).is_empty());
        assert!(of_issue(&findings, Issue::BindsTypeMismatch).is_empty());
    }

    #[test]
    fn test_binding_methods_outside_module() {
        let findings = lint_fixture("kotlin/dagger_bindings.kt");
        assert_eq!(
            declarations(&findings, Issue::MissingModuleAnnotation),
            vec!["com.example.logging.NotAModule"]
        );
        assert_eq!(
            declarations(&findings, Issue::BindsOverProvides),
            vec!["com.example.logging.NotAModule.provideLogger"]
        );
    }

    #[test]
    fn test_scopes() {
        let findings = lint_fixture("kotlin/dagger_bindings.kt");
        assert_eq!(
            declarations(&findings, Issue::MultipleScopes),
            vec!["com.example.logging.DoubleScoped"]
        );
        assert_eq!(
            declarations(&findings, Issue::ScopedWithoutInjectConstructor),
            vec!["com.example.logging.ScopedNoInject"]
        );
    }
}

mod anvil_tests {
    use super::*;

    const ANVIL_ANNOTATIONS: &[&str] = &[
        "com.squareup.anvil.annotations.ContributesTo",
        "com.squareup.anvil.annotations.ContributesBinding",
        "com.squareup.anvil.annotations.ContributesMultibinding",
        "com.squareup.anvil.annotations.ContributesSubcomponent",
        "com.squareup.anvil.annotations.MergeComponent",
        "com.squareup.anvil.annotations.MergeSubcomponent",
        "com.squareup.anvil.annotations.compat.MergeModules",
    ];

    #[test]
    fn test_missing_contributes_binding_offers_alternatives() {
        let findings = lint_fixture("kotlin/anvil_contributions.kt");
        let hits = of_issue(&findings, Issue::MissingContributesBinding);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].declaration, "com.example.data.RealRepository");

        let Some(Fix::Alternatives(options)) = &hits[0].fix else {
            panic!("expected alternative fixes");
        };
        assert_eq!(options.len(), 2);
        assert!(options[0].description.contains("@ContributesBinding"));
        assert!(options[1].description.contains("@ContributesMultibinding"));
    }

    #[test]
    fn test_missing_contributes_binding_for_superclass() {
        let source = "package com.example.data\n\nimport javax.inject.Inject\n\nabstract class BaseRepo\n\nclass RealRepo @Inject constructor() : BaseRepo()\n";
        let findings = lint_source("RealRepo.kt", Language::Kotlin, source);
        assert_eq!(
            declarations(&findings, Issue::MissingContributesBinding),
            vec!["com.example.data.RealRepo"]
        );
    }

    #[test]
    fn test_java_usage_reported_once() {
        let findings = lint_fixture("java/RealSession.java");
        let hits = of_issue(&findings, Issue::AnvilJavaUsage);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].message.contains("@ContributesBinding"));
        assert_eq!(hits[0].severity, Severity::Error);
    }

    #[test]
    fn test_every_anvil_annotation_rejected_in_java() {
        for qualified in ANVIL_ANNOTATIONS {
            let simple = qualified.rsplit('.').next().unwrap();
            let source = format!(
                "package com.example;\n\nimport {};\n\n@{}(AppScope.class)\npublic interface Thing {{\n}}\n",
                qualified, simple
            );
            let findings = lint_source("Thing.java", Language::Java, &source);
            let hits = of_issue(&findings, Issue::AnvilJavaUsage);
            assert_eq!(hits.len(), 1, "expected one finding for @{}", simple);
            assert!(hits[0].message.contains(simple));
        }
    }

    #[test]
    fn test_anvil_annotations_fine_in_kotlin() {
        let source = "package com.example\n\nimport com.squareup.anvil.annotations.MergeComponent\n\n@MergeComponent(AppScope::class)\ninterface AppComponent\n";
        let findings = lint_source("AppComponent.kt", Language::Kotlin, source);
        assert!(of_issue(&findings, Issue::AnvilJavaUsage).is_empty());
    }
}

mod hilt_tests {
    use super::*;

    #[test]
    fn test_android_entry_points() {
        let findings = lint_fixture("kotlin/hilt_android.kt");
        assert_eq!(
            declarations(&findings, Issue::MissingHiltAndroidApp),
            vec!["com.example.app.App"]
        );
        assert_eq!(
            declarations(&findings, Issue::MissingAndroidEntryPoint),
            vec!["com.example.app.MainActivity"]
        );
    }

    #[test]
    fn test_view_models() {
        let findings = lint_fixture("kotlin/hilt_android.kt");
        assert_eq!(
            declarations(&findings, Issue::MissingHiltViewModel),
            vec!["com.example.app.HomeViewModel"]
        );
        assert_eq!(
            declarations(&findings, Issue::UnnecessaryHiltViewModel),
            vec!["com.example.app.SettingsViewModel"]
        );
    }

    #[test]
    fn test_entry_point_must_be_interface() {
        let findings = lint_fixture("kotlin/hilt_android.kt");
        assert_eq!(
            declarations(&findings, Issue::EntryPointMustBeInterface),
            vec!["com.example.app.WorkerEntryPoint"]
        );
        assert_eq!(
            declarations(&findings, Issue::MissingInstallIn),
            vec!["com.example.app.WorkerEntryPoint"]
        );
    }

    #[test]
    fn test_modules_without_install_in() {
        let findings = lint_fixture("kotlin/provides_modules.kt");
        assert_eq!(
            declarations(&findings, Issue::MissingInstallIn),
            vec!["com.example.di.NetworkModule", "com.example.di.StorageModule"]
        );
    }

    #[test]
    fn test_disable_install_in_check_module() {
        let source = "package com.example.di\n\nimport dagger.Module\nimport dagger.Provides\nimport dagger.hilt.migration.DisableInstallInCheck\n\n@Module\n@DisableInstallInCheck\nobject LegacyModule {\n    @Provides\n    fun name(): String = \"x\"\n}\n";
        let findings = lint_source("LegacyModule.kt", Language::Kotlin, source);
        assert!(of_issue(&findings, Issue::MissingInstallIn).is_empty());
    }

    #[test]
    fn test_assisted_view_model_keeps_annotation() {
        let source = "package com.example.app\n\nimport androidx.lifecycle.ViewModel\nimport dagger.assisted.Assisted\nimport dagger.assisted.AssistedInject\nimport dagger.hilt.android.lifecycle.HiltViewModel\n\n@HiltViewModel(assistedFactory = DetailViewModel.Factory::class)\nclass DetailViewModel @AssistedInject constructor(@Assisted val id: String) : ViewModel()\n";
        let findings = lint_source("DetailViewModel.kt", Language::Kotlin, source);
        assert!(of_issue(&findings, Issue::UnnecessaryHiltViewModel).is_empty());
        assert!(of_issue(&findings, Issue::MissingHiltViewModel).is_empty());
    }

    #[test]
    fn test_family_filter_turns_hilt_off() {
        let path = fixtures_path().join("kotlin/hilt_android.kt");
        let graph = build_files(&[path]);
        let config = Config::from_toml("families = [\"dagger\", \"anvil\"]\n").unwrap();
        let findings = lint(&graph, &config);
        assert!(findings.iter().all(|f| f.issue.family().as_str() != "hilt"));
    }
}

mod suppression_tests {
    use super::*;

    #[test]
    fn test_file_and_type_suppressions() {
        let findings = lint_fixture("kotlin/suppressed.kt");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_disabled_issue() {
        let path = fixtures_path().join("java/AppComponent.java");
        let graph = build_files(&[path]);
        let mut config = Config::default();
        config.disable.push("ComponentMustBeAbstract".to_string());
        config.sanitize();
        assert!(of_issue(&lint(&graph, &config), Issue::ComponentMustBeAbstract).is_empty());
    }

    #[test]
    fn test_severity_override() {
        let path = fixtures_path().join("java/AppComponent.java");
        let graph = build_files(&[path]);
        let config =
            Config::from_toml("[severity]\nComponentMustBeAbstract = \"warning\"\n").unwrap();
        let findings = lint(&graph, &config);
        assert_eq!(
            of_issue(&findings, Issue::ComponentMustBeAbstract)[0].severity,
            Severity::Warning
        );
    }
}

mod fix_tests {
    use super::*;

    #[test]
    fn test_fix_component_keyword() {
        let (_dir, path) = copy_fixture("java/AppComponent.java");
        let findings = lint(&build_files(&[path.clone()]), &Config::default());

        let summary = FixApplier::new(false, false).apply(&findings).unwrap();
        assert_eq!(summary.fixes_applied, 1);
        assert_eq!(summary.files_changed, 1);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("public interface AppComponent"));
        assert!(!content.contains("public class"));

        // A second run finds nothing left to fix
        let again = lint(&build_files(&[path]), &Config::default());
        assert!(of_issue(&again, Issue::ComponentMustBeAbstract).is_empty());
    }

    #[test]
    fn test_fix_static_provides() {
        let (_dir, path) = copy_fixture("java/NetworkModule.java");
        let findings = lint(&build_files(&[path.clone()]), &Config::default());
        FixApplier::new(false, false).apply(&findings).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("static String provideBaseUrl()"));
        assert!(content.contains("static String provideUserAgent()"));
        assert!(!content.contains("static static"));
    }

    #[test]
    fn test_alternatives_skipped_without_prompt() {
        let (_dir, path) = copy_fixture("kotlin/anvil_contributions.kt");
        let before = fs::read_to_string(&path).unwrap();
        let findings = lint(&build_files(&[path.clone()]), &Config::default());

        let summary = FixApplier::new(false, false).apply(&findings).unwrap();
        assert_eq!(summary.fixes_applied, 0);
        assert!(summary.fixes_skipped >= 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let (_dir, path) = copy_fixture("java/AppComponent.java");
        let before = fs::read_to_string(&path).unwrap();
        let findings = lint(&build_files(&[path.clone()]), &Config::default());

        let summary = FixApplier::new(false, true).apply(&findings).unwrap();
        assert_eq!(summary.fixes_applied, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
