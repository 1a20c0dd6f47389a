//! Integration tests for the tree-sitter front end
//!
//! These tests parse real Kotlin and Java sources and check the
//! declaration graph the detectors see.

use injectlint::config::Config;
use injectlint::discovery::{FileFinder, FileType, SourceFile};
use injectlint::graph::{
    BodyShape, DeclarationKind, Graph, GraphBuilder, ImportAnchor, Language, ParallelGraphBuilder,
};
use std::path::{Path, PathBuf};

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn build_source(name: &str, source: &str) -> Graph {
    let language = if name.ends_with(".java") {
        Language::Java
    } else {
        Language::Kotlin
    };
    let mut builder = GraphBuilder::new();
    builder
        .process_source(Path::new(name), language, source)
        .expect("Failed to parse source");
    builder.build()
}

fn build_fixture(relative: &str) -> Graph {
    let path = fixtures_path().join(relative);
    if !path.exists() {
        panic!("Fixture not found: {:?}", path);
    }
    let file_type = FileType::from_path(&path).expect("Unsupported fixture");
    let mut builder = GraphBuilder::new();
    builder
        .process_file(&SourceFile::new(path, file_type))
        .expect("Failed to process file");
    builder.build()
}

mod kotlin_tests {
    use super::*;

    #[test]
    fn test_class_with_inject_constructor() {
        let graph = build_fixture("kotlin/anvil_contributions.kt");
        let class = graph.find_type("com.example.data.RealRepository").unwrap();
        assert_eq!(class.kind, DeclarationKind::Class);
        assert_eq!(
            class.super_types[0].qualified_name.as_deref(),
            Some("com.example.data.Repository")
        );
        assert!(!class.super_types[0].invoked);

        let ctor = graph
            .children_of(class)
            .find(|d| d.kind == DeclarationKind::Constructor)
            .unwrap();
        assert_eq!(
            ctor.annotations[0].qualified_name.as_deref(),
            Some("javax.inject.Inject")
        );

        let iface = graph.find_type("com.example.data.Repository").unwrap();
        assert_eq!(iface.kind, DeclarationKind::Interface);
    }

    #[test]
    fn test_object_and_expression_bodies() {
        let graph = build_fixture("kotlin/provides_modules.kt");
        let object = graph.find_type("com.example.di.NetworkModule").unwrap();
        assert_eq!(object.kind, DeclarationKind::Object);

        let provide = graph.children_of(object).next().unwrap();
        assert_eq!(provide.name, "provideBaseUrl");
        assert_eq!(
            provide.return_type.as_ref().map(|t| t.name.as_str()),
            Some("String")
        );
        assert_eq!(provide.body, Some(BodyShape::Other));
    }

    #[test]
    fn test_extension_receiver_is_first_parameter() {
        let graph = build_fixture("kotlin/dagger_bindings.kt");
        let receiver = graph
            .declarations()
            .find(|d| d.name == "bindReceiver")
            .unwrap();
        assert_eq!(receiver.parameters.len(), 1);
        assert_eq!(receiver.parameters[0].name, "<this>");
        assert_eq!(
            receiver.parameters[0]
                .type_ref
                .as_ref()
                .and_then(|t| t.qualified_name.as_deref()),
            Some("com.example.logging.ConsoleLogger")
        );
    }

    #[test]
    fn test_constructor_call_body() {
        let graph = build_source(
            "Module.kt",
            "package com.example\n\nclass Client\n\nclass M {\n    fun client(): Client {\n        return Client()\n    }\n}\n",
        );
        let method = graph.declarations().find(|d| d.name == "client").unwrap();
        match &method.body {
            Some(BodyShape::ConstructorCall(t)) => {
                assert_eq!(t.qualified_name.as_deref(), Some("com.example.Client"))
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_platform_supertypes_resolve() {
        let graph = build_fixture("kotlin/hilt_android.kt");
        assert!(graph.reaches("com.example.app.MainActivity", "android.app.Activity"));
        assert!(graph.reaches("com.example.app.App", "android.app.Application"));
        let activity = graph.find_type("com.example.app.MainActivity").unwrap();
        assert!(activity.super_types[0].invoked);

        let field = graph
            .children_of(activity)
            .find(|d| d.kind == DeclarationKind::Property)
            .unwrap();
        assert!(field.has_modifier("lateinit"));
        assert_eq!(
            field.annotations[0].qualified_name.as_deref(),
            Some("javax.inject.Inject")
        );
    }

    #[test]
    fn test_file_annotations_and_import_anchor() {
        let graph = build_fixture("kotlin/suppressed.kt");
        let info = graph.files().next().unwrap();
        assert_eq!(info.package.as_deref(), Some("com.example.quiet"));
        assert_eq!(info.file_annotations.len(), 1);
        assert_eq!(
            info.file_annotations[0].qualified_name.as_deref(),
            Some("kotlin.Suppress")
        );
        assert!(matches!(info.import_anchor, ImportAnchor::AfterImports(_)));
    }
}

mod java_tests {
    use super::*;

    #[test]
    fn test_class_keyword_range() {
        let path = fixtures_path().join("java/AppComponent.java");
        let source = std::fs::read_to_string(&path).unwrap();
        let graph = build_fixture("java/AppComponent.java");
        let component = graph.find_type("com.example.di.AppComponent").unwrap();
        assert_eq!(component.language, Language::Java);
        let (start, end) = component.keyword_range.unwrap();
        assert_eq!(&source[start..end], "class");
        let names: Vec<_> = component
            .annotations
            .iter()
            .filter_map(|a| a.qualified_name.as_deref())
            .collect();
        assert_eq!(names, vec!["javax.inject.Singleton", "dagger.Component"]);
    }

    #[test]
    fn test_interface_methods_are_abstract() {
        let graph = build_fixture("java/ShopComponent.java");
        let component = graph.find_type("com.example.shop.ShopComponent").unwrap();
        let methods: Vec<_> = graph.children_of(component).collect();
        assert_eq!(methods.len(), 4);
        assert!(methods.iter().all(|m| m.has_modifier("abstract")));
        let merge = methods.iter().find(|m| m.name == "merge").unwrap();
        assert_eq!(merge.parameters.len(), 2);
    }

    #[test]
    fn test_static_modifier_and_return_body() {
        let graph = build_fixture("java/NetworkModule.java");
        let user_agent = graph
            .declarations()
            .find(|d| d.name == "provideUserAgent")
            .unwrap();
        assert!(user_agent.has_modifier("static"));
        let base_url = graph
            .declarations()
            .find(|d| d.name == "provideBaseUrl")
            .unwrap();
        assert!(!base_url.has_modifier("static"));
        assert!(base_url.type_range.is_some());
        assert_eq!(base_url.body, Some(BodyShape::Other));
    }

    #[test]
    fn test_identity_provider_body() {
        let graph = build_source(
            "M.java",
            "package com.example;\n\nclass M {\n    Repo repo(RealRepo real) {\n        return real;\n    }\n}\n",
        );
        let method = graph.declarations().find(|d| d.name == "repo").unwrap();
        assert_eq!(method.body, Some(BodyShape::Identifier("real".to_string())));
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_discovery_and_parallel_build() {
        let config = Config::default();
        let files = FileFinder::new(&config).find_files(&fixtures_path()).unwrap();
        assert_eq!(files.len(), 9);

        let graph = ParallelGraphBuilder::new().build_from_files(&files).unwrap();
        assert_eq!(graph.files().count(), 9);
        assert!(graph.find_type("com.example.di.AppComponent").is_some());
        assert!(graph.find_type("com.example.data.RealRepository").is_some());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let config = Config::default();
        let files = FileFinder::new(&config).find_files(&fixtures_path()).unwrap();

        let mut builder = GraphBuilder::new();
        for file in &files {
            builder.process_file(file).unwrap();
        }
        let sequential = builder.build();
        let parallel = ParallelGraphBuilder::new().build_from_files(&files).unwrap();

        let mut a: Vec<_> = sequential.declarations().map(|d| d.fq_name.clone()).collect();
        let mut b: Vec<_> = parallel.declarations().map(|d| d.fq_name.clone()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
