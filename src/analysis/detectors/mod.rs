// Detectors for misuse of Dagger, Anvil and Hilt annotations.
// Each detector subscribes to node kinds and reports through a Sink;
// none keeps state between visits.

pub mod anvil;
pub mod dagger;
pub mod hilt;

use crate::analysis::{Finding, Issue, NodeKind, Sink};
use crate::graph::{Declaration, Graph};

/// A rule implementation. One detector may report several issues.
pub trait Detector: Send + Sync {
    /// Issues this detector can report
    fn issues(&self) -> &'static [Issue];

    /// Node kinds the detector wants to visit
    fn node_kinds(&self) -> &'static [NodeKind];

    fn visit(&self, graph: &Graph, decl: &Declaration, sink: &mut dyn Sink);

    /// Visit every subscribed declaration of the graph, without
    /// suppression or configuration filtering
    fn detect(&self, graph: &Graph) -> Vec<Finding> {
        let mut findings = Vec::new();
        for decl in graph.declarations() {
            if self.node_kinds().contains(&NodeKind::of(decl.kind)) {
                self.visit(graph, decl, &mut findings);
            }
        }
        findings
    }
}
