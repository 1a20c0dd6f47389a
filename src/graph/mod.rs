//! Declaration graph
//!
//! The read-only view of the analyzed sources that every rule queries:
//! declarations with their annotations, members and supertypes, plus an
//! inheritance graph (user types and known platform types) for
//! supertype-chain questions.

mod builder;
mod declaration;
pub mod platform;
mod resolve;
mod types;

pub use builder::{GraphBuilder, ParallelGraphBuilder};
pub use declaration::{
    Annotation, AnnotationArgument, BodyShape, Declaration, DeclarationId, DeclarationKind,
    Language, Location, Parameter,
};
pub use resolve::{Import, Resolver};
pub use types::{split_top_level, TypeRef, UNIVERSAL_ROOTS};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-file information the rules and fixes need
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub language: Language,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    /// Where a new import line goes
    pub import_anchor: ImportAnchor,
    /// `@file:` annotations (Kotlin)
    pub file_annotations: Vec<Annotation>,
}

/// Insertion point for new imports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImportAnchor {
    /// End of the last import directive
    AfterImports(usize),
    /// End of the package directive
    AfterPackage(usize),
    FileStart,
}

impl FileInfo {
    pub fn new(path: PathBuf, language: Language) -> Self {
        Self {
            path,
            language,
            package: None,
            imports: Vec::new(),
            import_anchor: ImportAnchor::FileStart,
            file_annotations: Vec::new(),
        }
    }

    /// Offset and text of an edit importing `qualified`
    pub fn import_edit(&self, qualified: &str) -> (usize, String) {
        let directive = match self.language {
            Language::Kotlin => format!("import {}", qualified),
            Language::Java => format!("import {};", qualified),
        };
        match self.import_anchor {
            ImportAnchor::AfterImports(offset) => (offset, format!("\n{}", directive)),
            ImportAnchor::AfterPackage(offset) => (offset, format!("\n\n{}", directive)),
            ImportAnchor::FileStart => (0, format!("{}\n\n", directive)),
        }
    }

    /// Whether `qualified` is visible under its simple name in this file
    pub fn imports_type(&self, qualified: &str) -> bool {
        let (pkg, _) = qualified.rsplit_once('.').unwrap_or(("", qualified));
        self.package.as_deref() == Some(pkg)
            || self.imports.iter().any(|i| {
                (!i.wildcard && i.alias.is_none() && i.path == qualified)
                    || (i.wildcard && i.path == pkg)
            })
    }
}

/// All declarations of the analyzed sources
#[derive(Debug)]
pub struct Graph {
    declarations: Vec<Declaration>,
    index: HashMap<DeclarationId, usize>,
    children: HashMap<DeclarationId, Vec<DeclarationId>>,
    types_by_name: HashMap<String, DeclarationId>,
    hierarchy: DiGraph<String, ()>,
    hierarchy_nodes: HashMap<String, NodeIndex>,
    files: HashMap<PathBuf, FileInfo>,
}

impl Graph {
    pub fn new() -> Self {
        let mut graph = Self {
            declarations: Vec::new(),
            index: HashMap::new(),
            children: HashMap::new(),
            types_by_name: HashMap::new(),
            hierarchy: DiGraph::new(),
            hierarchy_nodes: HashMap::new(),
            files: HashMap::new(),
        };
        for (child, parent) in platform::PLATFORM_SUPERTYPES {
            graph.add_supertype_edge(child, parent);
        }
        graph
    }

    pub fn add_file(&mut self, info: FileInfo) {
        self.files.insert(info.path.clone(), info);
    }

    pub fn file(&self, path: &Path) -> Option<&FileInfo> {
        self.files.get(path)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileInfo> {
        self.files.values()
    }

    pub fn add_declaration(&mut self, decl: Declaration) {
        if self.index.contains_key(&decl.id) {
            return;
        }

        if let Some(parent) = &decl.parent {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(decl.id.clone());
        }

        if decl.kind.is_type() {
            self.types_by_name
                .entry(decl.fq_name.clone())
                .or_insert_with(|| decl.id.clone());
            self.node_for(&decl.fq_name);
            let supers: Vec<String> = decl
                .super_types
                .iter()
                .filter(|t| !t.is_universal_root())
                .filter_map(|t| t.qualified_name.clone())
                .collect();
            for sup in supers {
                self.add_supertype_edge(&decl.fq_name, &sup);
            }
        }

        self.index.insert(decl.id.clone(), self.declarations.len());
        self.declarations.push(decl);
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn declaration_list(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn get_declaration(&self, id: &DeclarationId) -> Option<&Declaration> {
        self.index.get(id).map(|&i| &self.declarations[i])
    }

    pub fn get_children(&self, id: &DeclarationId) -> &[DeclarationId] {
        self.children.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Direct members of a declaration, in source order
    pub fn children_of<'a>(&'a self, decl: &Declaration) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.get_children(&decl.id)
            .iter()
            .filter_map(move |id| self.get_declaration(id))
    }

    pub fn parent_of(&self, decl: &Declaration) -> Option<&Declaration> {
        decl.parent.as_ref().and_then(|p| self.get_declaration(p))
    }

    /// Find a type declaration by qualified name
    pub fn find_type(&self, fq_name: &str) -> Option<&Declaration> {
        self.types_by_name
            .get(fq_name)
            .and_then(|id| self.get_declaration(id))
    }

    /// Whether the inheritance graph knows this qualified name at all
    pub fn knows_type(&self, fq_name: &str) -> bool {
        self.hierarchy_nodes.contains_key(fq_name)
    }

    /// Whether `from` reaches `to` by following supertype edges
    pub fn reaches(&self, from: &str, to: &str) -> bool {
        let (Some(&start), Some(&target)) = (self.hierarchy_nodes.get(from), self.hierarchy_nodes.get(to))
        else {
            return false;
        };
        if start == target {
            return false;
        }
        let mut bfs = Bfs::new(&self.hierarchy, start);
        while let Some(nx) = bfs.next(&self.hierarchy) {
            if nx == target {
                return true;
            }
        }
        false
    }

    /// All transitive supertypes of a qualified type name
    pub fn supertypes_of(&self, fq_name: &str) -> Vec<&str> {
        let Some(&start) = self.hierarchy_nodes.get(fq_name) else {
            return Vec::new();
        };
        let mut bfs = Bfs::new(&self.hierarchy, start);
        let mut result = Vec::new();
        while let Some(nx) = bfs.next(&self.hierarchy) {
            if nx != start {
                result.push(self.hierarchy[nx].as_str());
            }
        }
        result
    }

    /// Direct supertype names recorded for a qualified type
    pub fn direct_supertypes_of(&self, fq_name: &str) -> Vec<&str> {
        let Some(&start) = self.hierarchy_nodes.get(fq_name) else {
            return Vec::new();
        };
        self.hierarchy
            .neighbors(start)
            .map(|nx| self.hierarchy[nx].as_str())
            .collect()
    }

    fn node_for(&mut self, name: &str) -> NodeIndex {
        if let Some(&nx) = self.hierarchy_nodes.get(name) {
            return nx;
        }
        let nx = self.hierarchy.add_node(name.to_string());
        self.hierarchy_nodes.insert(name.to_string(), nx);
        nx
    }

    fn add_supertype_edge(&mut self, child: &str, parent: &str) {
        let c = self.node_for(child);
        let p = self.node_for(parent);
        self.hierarchy.update_edge(c, p, ());
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod testing;
