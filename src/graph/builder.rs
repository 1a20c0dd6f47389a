//! Graph construction: parse files, then resolve written names

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use super::{platform, BodyShape, DeclarationId, FileInfo, Graph, Language, Resolver, TypeRef};
use crate::analysis::annotations;
use crate::discovery::SourceFile;
use crate::error::Result;
use crate::parser::{parser_for, ParsedFile};

/// Sequential graph builder
///
/// Files are parsed one at a time with [`GraphBuilder::process_file`];
/// [`GraphBuilder::build`] resolves every annotation and type name against
/// the complete set of declared types before producing the [`Graph`].
pub struct GraphBuilder {
    parsed: Vec<ParsedFile>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { parsed: Vec::new() }
    }

    pub fn process_file(&mut self, file: &SourceFile) -> Result<()> {
        let source = file.read_contents()?;
        self.process_source(&file.path, file.language(), &source)
    }

    /// Parse source text directly, without touching the file system
    pub fn process_source(&mut self, path: &Path, language: Language, source: &str) -> Result<()> {
        let parsed = parser_for(language).parse(path, source)?;
        self.parsed.push(parsed);
        Ok(())
    }

    pub fn add_parsed(&mut self, parsed: ParsedFile) {
        self.parsed.push(parsed);
    }

    pub fn build(self) -> Graph {
        let mut known: HashSet<String> = self
            .parsed
            .iter()
            .flat_map(|p| p.declarations.iter())
            .filter(|d| d.kind.is_type())
            .map(|d| d.fq_name.clone())
            .collect();
        known.extend(annotations::known_names().map(String::from));
        for (child, parent) in platform::PLATFORM_SUPERTYPES {
            known.insert(child.to_string());
            known.insert(parent.to_string());
        }

        let resolver = Resolver::new(&known);
        let mut graph = Graph::new();
        for mut parsed in self.parsed {
            resolve_file(&resolver, &mut parsed);
            for decl in parsed.declarations {
                graph.add_declaration(decl);
            }
            graph.add_file(parsed.info);
        }
        debug!("Graph built with {} declarations", graph.len());
        graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses files in parallel with rayon
pub struct ParallelGraphBuilder;

impl ParallelGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Files that fail to read or parse are logged and skipped
    pub fn build_from_files(&self, files: &[SourceFile]) -> Result<Graph> {
        let parsed: Vec<ParsedFile> = files
            .par_iter()
            .filter_map(|file| match parse_one(file) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Skipping {}: {}", file.path.display(), e);
                    None
                }
            })
            .collect();

        let mut builder = GraphBuilder::new();
        for p in parsed {
            builder.add_parsed(p);
        }
        Ok(builder.build())
    }
}

impl Default for ParallelGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_one(file: &SourceFile) -> Result<ParsedFile> {
    let source = file.read_contents()?;
    parser_for(file.language()).parse(&file.path, &source)
}

fn resolve_file(resolver: &Resolver, parsed: &mut ParsedFile) {
    let info = &parsed.info;

    // Enclosing type names, innermost first, for every declaration
    let type_names: HashMap<DeclarationId, (String, Option<DeclarationId>)> = parsed
        .declarations
        .iter()
        .filter(|d| d.kind.is_type())
        .map(|d| (d.id.clone(), (d.fq_name.clone(), d.parent.clone())))
        .collect();
    let enclosing_of = |start: Option<&DeclarationId>| -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = start.cloned();
        while let Some(id) = current {
            match type_names.get(&id) {
                Some((fq, parent)) => {
                    chain.push(fq.clone());
                    current = parent.clone();
                }
                None => break,
            }
        }
        chain
    };

    let file_annotations: Vec<_> = info
        .file_annotations
        .iter()
        .cloned()
        .map(|mut a| {
            a.qualified_name = resolver.resolve(&a.name, info, &[]);
            a
        })
        .collect();

    for decl in parsed.declarations.iter_mut() {
        let members = if decl.kind.is_type() {
            enclosing_of(Some(&decl.id))
        } else {
            enclosing_of(decl.parent.as_ref())
        };
        let outer = enclosing_of(decl.parent.as_ref());

        for ann in decl.annotations.iter_mut() {
            ann.qualified_name = resolver.resolve(&ann.name, info, &outer);
        }
        for t in decl.super_types.iter_mut() {
            resolve_type(resolver, info, &outer, t);
        }
        for param in decl.parameters.iter_mut() {
            for ann in param.annotations.iter_mut() {
                ann.qualified_name = resolver.resolve(&ann.name, info, &members);
            }
            if let Some(t) = param.type_ref.as_mut() {
                resolve_type(resolver, info, &members, t);
            }
        }
        if let Some(t) = decl.return_type.as_mut() {
            resolve_type(resolver, info, &members, t);
        }
        if let Some(BodyShape::ConstructorCall(t)) = decl.body.as_mut() {
            resolve_type(resolver, info, &members, t);
        }
    }

    parsed.info.file_annotations = file_annotations;
}

fn resolve_type(resolver: &Resolver, info: &FileInfo, enclosing: &[String], t: &mut TypeRef) {
    if t.name.starts_with('(') {
        return;
    }
    t.qualified_name = resolver.resolve(&t.name, info, enclosing);
}
