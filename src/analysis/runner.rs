//! Single-pass lint runner

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

use super::detectors::Detector;
use super::{is_suppressed, Finding, Issue, NodeKind, Severity};
use crate::config::Config;
use crate::graph::{Declaration, Graph};

/// Drives detectors over every declaration of a graph.
///
/// The dispatch table from node kind to detectors is built once; a detector
/// whose issues are all disabled is never visited.
pub struct LintRunner {
    detectors: Vec<Box<dyn Detector>>,
    dispatch: HashMap<NodeKind, Vec<usize>>,
    enabled: HashSet<Issue>,
    severities: HashMap<Issue, Severity>,
    parallel: bool,
}

impl LintRunner {
    /// Runner with every issue at its default enablement and severity
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        let enabled = Issue::ALL
            .iter()
            .copied()
            .filter(|i| i.enabled_by_default())
            .collect();
        let mut runner = Self {
            detectors,
            dispatch: HashMap::new(),
            enabled,
            severities: HashMap::new(),
            parallel: true,
        };
        runner.build_dispatch();
        runner
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.enabled = Issue::ALL
            .iter()
            .copied()
            .filter(|i| config.issue_enabled(*i))
            .collect();
        self.severities = Issue::ALL
            .iter()
            .map(|i| (*i, config.severity_for(*i)))
            .filter(|(i, s)| *s != i.default_severity())
            .collect();
        self.parallel = config.parallel;
        self.build_dispatch();
        self
    }

    /// Turn on issues regardless of their default
    pub fn enable(mut self, issues: &[Issue]) -> Self {
        self.enabled.extend(issues.iter().copied());
        self.build_dispatch();
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn detectors(&self) -> &[Box<dyn Detector>] {
        &self.detectors
    }

    pub fn is_enabled(&self, issue: Issue) -> bool {
        self.enabled.contains(&issue)
    }

    fn build_dispatch(&mut self) {
        self.dispatch.clear();
        for (index, detector) in self.detectors.iter().enumerate() {
            if !detector.issues().iter().any(|i| self.enabled.contains(i)) {
                continue;
            }
            for kind in detector.node_kinds() {
                self.dispatch.entry(*kind).or_default().push(index);
            }
        }
        debug!(
            "Dispatch table: {} detectors over {} node kinds",
            self.detectors.len(),
            self.dispatch.len()
        );
    }

    /// Visit every declaration once and return the surviving findings,
    /// sorted by file, line, column and issue id
    pub fn run(&self, graph: &Graph) -> Vec<Finding> {
        let declarations = graph.declaration_list();
        let mut findings: Vec<Finding> = if self.parallel {
            declarations
                .par_iter()
                .flat_map_iter(|decl| self.visit(graph, decl))
                .collect()
        } else {
            declarations
                .iter()
                .flat_map(|decl| self.visit(graph, decl))
                .collect()
        };

        findings.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
                .then(a.id().cmp(b.id()))
                .then(a.message.cmp(&b.message))
        });
        findings.dedup_by(|a, b| {
            a.issue == b.issue
                && a.location.file == b.location.file
                && a.location.start_byte == b.location.start_byte
                && a.message == b.message
        });
        debug!("{} findings after filtering", findings.len());
        findings
    }

    fn visit(&self, graph: &Graph, decl: &Declaration) -> Vec<Finding> {
        let Some(indices) = self.dispatch.get(&NodeKind::of(decl.kind)) else {
            return Vec::new();
        };
        let mut raw = Vec::new();
        for &index in indices {
            let detector = &self.detectors[index];
            let result = catch_unwind(AssertUnwindSafe(|| {
                let mut found = Vec::new();
                detector.visit(graph, decl, &mut found);
                found
            }));
            match result {
                Ok(found) => raw.extend(found),
                Err(_) => warn!(
                    "Detector for {} failed on '{}', skipping",
                    detector
                        .issues()
                        .iter()
                        .map(|i| i.id())
                        .collect::<Vec<_>>()
                        .join("/"),
                    decl.fq_name
                ),
            }
        }

        raw.into_iter()
            .filter(|f| self.enabled.contains(&f.issue))
            .filter(|f| !is_suppressed(graph, decl, f.issue))
            .map(|f| match self.severities.get(&f.issue) {
                Some(severity) => f.with_severity(*severity),
                None => f,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::detectors::dagger::{BindsMethodDetector, MultipleScopesDetector};
    use crate::analysis::detectors::anvil::MissingContributesToDetector;
    use crate::analysis::Sink;
    use crate::graph::testing::DeclBuilder;

    fn binds_graph() -> Graph {
        let mut graph = Graph::new();
        let module = DeclBuilder::class("com.example.DataModule")
            .annotated("dagger.Module")
            .build();
        graph.add_declaration(
            DeclBuilder::method("bindA")
                .in_type(&module)
                .annotated("dagger.Binds")
                .param("a", "com.example.A")
                .returns("com.example.A")
                .has_body()
                .build(),
        );
        graph.add_declaration(
            DeclBuilder::method("bindB")
                .in_type(&module)
                .annotated("dagger.Binds")
                .annotated_with("kotlin.Suppress", &[(None, "\"BindsMustBeAbstract\"")])
                .param("b", "com.example.B")
                .returns("com.example.B")
                .has_body()
                .build(),
        );
        graph.add_declaration(module);
        graph
    }

    #[test]
    fn test_suppressed_findings_dropped() {
        let graph = binds_graph();
        let runner = LintRunner::new(vec![Box::new(BindsMethodDetector::new())]);
        let findings = runner.run(&graph);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("bindA"));
    }

    #[test]
    fn test_disabled_issue_and_severity_override() {
        let graph = binds_graph();
        let mut config = Config::default();
        config.disable = vec!["BindsMustBeAbstract".to_string()];
        let runner = LintRunner::new(vec![Box::new(BindsMethodDetector::new())]).with_config(&config);
        assert!(runner.run(&graph).is_empty());

        let mut config = Config::default();
        config
            .severity
            .insert("BindsMustBeAbstract".to_string(), Severity::Warning);
        let runner = LintRunner::new(vec![Box::new(BindsMethodDetector::new())]).with_config(&config);
        let findings = runner.run(&graph);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_off_by_default_detector_not_dispatched() {
        let mut graph = Graph::new();
        graph.add_declaration(
            DeclBuilder::object("com.example.NetworkModule")
                .annotated("dagger.Module")
                .build(),
        );
        let runner = LintRunner::new(vec![Box::new(MissingContributesToDetector::new())]);
        assert!(runner.run(&graph).is_empty());
        let runner = runner.enable(&[Issue::MissingContributesTo]);
        assert_eq!(runner.run(&graph).len(), 1);
    }

    #[test]
    fn test_runs_are_identical() {
        let mut graph = binds_graph();
        graph.add_declaration(
            DeclBuilder::class("com.example.Cache")
                .annotated("javax.inject.Singleton")
                .annotated("dagger.Reusable")
                .build(),
        );
        let runner = LintRunner::new(vec![
            Box::new(MultipleScopesDetector::new()),
            Box::new(BindsMethodDetector::new()),
        ]);
        let first: Vec<_> = runner.run(&graph).iter().map(|f| f.message.clone()).collect();
        let second: Vec<_> = runner
            .parallel(false)
            .run(&graph)
            .iter()
            .map(|f| f.message.clone())
            .collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    struct PanickingDetector;

    impl Detector for PanickingDetector {
        fn issues(&self) -> &'static [Issue] {
            &[Issue::MultipleScopes]
        }

        fn node_kinds(&self) -> &'static [NodeKind] {
            &[NodeKind::Method]
        }

        fn visit(&self, _graph: &Graph, _decl: &Declaration, _sink: &mut dyn Sink) {
            panic!("boom");
        }
    }

    #[test]
    fn test_panicking_detector_is_isolated() {
        let graph = binds_graph();
        let runner = LintRunner::new(vec![
            Box::new(PanickingDetector),
            Box::new(BindsMethodDetector::new()),
        ]);
        assert_eq!(runner.run(&graph).len(), 1);
    }
}
