//! Java front end (tree-sitter-java)

use std::path::Path;
use tracing::debug;
use tree_sitter::Node;

use super::common::{
    child_of_kind, children, declaration_id, location, named_children, node_text,
    parse_annotations, trimmed_end, ParsedFile, Parser, Scope,
};
use crate::error::{InjectLintError, Result};
use crate::graph::{
    Annotation, BodyShape, Declaration, DeclarationKind, FileInfo, Import, ImportAnchor, Language,
    Parameter, TypeRef,
};

pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for JavaParser {
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|source| InjectLintError::Grammar {
                language: "Java",
                source,
            })?;
        let tree = parser.parse(source, None).ok_or_else(|| InjectLintError::Parse {
            path: path.to_path_buf(),
        })?;

        let mut walker = JavaWalker {
            path,
            source,
            info: FileInfo::new(path.to_path_buf(), Language::Java),
            declarations: Vec::new(),
        };
        walker.walk_file(tree.root_node());
        debug!(
            "Parsed {} ({} declarations)",
            path.display(),
            walker.declarations.len()
        );

        Ok(ParsedFile {
            info: walker.info,
            declarations: walker.declarations,
        })
    }
}

struct JavaWalker<'a> {
    path: &'a Path,
    source: &'a str,
    info: FileInfo,
    declarations: Vec<Declaration>,
}

impl<'a> JavaWalker<'a> {
    fn text(&self, node: Node) -> &'a str {
        node_text(node, self.source)
    }

    fn walk_file(&mut self, root: Node) {
        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    let package = self
                        .text(child)
                        .trim()
                        .trim_start_matches("package")
                        .trim_end_matches(';')
                        .trim();
                    // Annotated packages (package-info.java) are rare enough to skip
                    if !package.is_empty() && !package.starts_with('@') {
                        self.info.package = Some(package.to_string());
                        if self.info.import_anchor == ImportAnchor::FileStart {
                            self.info.import_anchor =
                                ImportAnchor::AfterPackage(trimmed_end(child, self.source));
                        }
                    }
                }
                "import_declaration" => {
                    if let Some(import) = Import::parse(self.text(child)) {
                        self.info.imports.push(import);
                        self.info.import_anchor =
                            ImportAnchor::AfterImports(trimmed_end(child, self.source));
                    }
                }
                _ => self.declaration(child, None),
            }
        }
    }

    fn declaration(&mut self, node: Node, parent: Option<&Scope>) {
        match node.kind() {
            "class_declaration" => self.type_declaration(node, parent, DeclarationKind::Class),
            "interface_declaration" => {
                self.type_declaration(node, parent, DeclarationKind::Interface)
            }
            "annotation_type_declaration" => {
                self.type_declaration(node, parent, DeclarationKind::AnnotationClass)
            }
            "enum_declaration" => self.type_declaration(node, parent, DeclarationKind::Enum),
            "method_declaration" => self.method(node, parent),
            "constructor_declaration" => self.constructor(node, parent),
            "field_declaration" | "constant_declaration" => self.field(node, parent),
            _ => {}
        }
    }

    fn new_declaration(
        &self,
        node: Node,
        name: &str,
        kind: DeclarationKind,
        parent: Option<&Scope>,
    ) -> Declaration {
        let mut decl = Declaration::new(
            declaration_id(self.path, node),
            name.to_string(),
            kind,
            location(self.path, node),
            Language::Java,
        );
        decl.fq_name = match (parent, &self.info.package) {
            (Some(p), _) => format!("{}.{}", p.fq_name, name),
            (None, Some(pkg)) => format!("{}.{}", pkg, name),
            (None, None) => name.to_string(),
        };
        decl.parent = parent.map(|p| p.id.clone());
        decl
    }

    /// Annotations and keyword modifiers of a declaration
    fn modifiers(&self, node: Node) -> (Vec<Annotation>, Vec<String>) {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        if let Some(mods) = child_of_kind(node, "modifiers") {
            for m in children(mods) {
                match m.kind() {
                    "annotation" | "marker_annotation" => {
                        annotations
                            .extend(parse_annotations(self.text(m), &location(self.path, m)));
                    }
                    _ if !m.is_named() => modifiers.push(self.text(m).to_string()),
                    _ => {}
                }
            }
        }
        (annotations, modifiers)
    }

    fn type_declaration(&mut self, node: Node, parent: Option<&Scope>, kind: DeclarationKind) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);
        let (annotations, mut modifiers) = self.modifiers(node);

        // Members of interfaces are implicitly static
        if parent.is_some_and(|p| p.kind == DeclarationKind::Interface) {
            modifiers.push("static".to_string());
        }

        let mut decl = self.new_declaration(node, name, kind, parent);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.keyword_range = children(node)
            .into_iter()
            .find(|c| {
                !c.is_named() && matches!(c.kind(), "class" | "interface" | "enum" | "@interface")
            })
            .map(|c| (c.start_byte(), c.end_byte()));

        if let Some(superclass) = node.child_by_field_name("superclass") {
            if let Some(t) = named_children(superclass)
                .into_iter()
                .next()
                .and_then(|t| TypeRef::parse(self.text(t)))
            {
                decl.super_types.push(TypeRef { invoked: true, ..t });
            }
        }
        let interfaces = node
            .child_by_field_name("interfaces")
            .or_else(|| child_of_kind(node, "extends_interfaces"));
        if let Some(list) = interfaces.and_then(|i| child_of_kind(i, "type_list")) {
            decl.super_types.extend(
                named_children(list)
                    .into_iter()
                    .filter_map(|t| TypeRef::parse(self.text(t))),
            );
        }

        let body = node.child_by_field_name("body");
        decl.has_body = body.is_some();
        let scope = Scope::of(&decl);
        self.declarations.push(decl);

        if let Some(body) = body {
            self.members(body, &scope);
        }
    }

    fn members(&mut self, body: Node, scope: &Scope) {
        for member in named_children(body) {
            match member.kind() {
                "enum_body_declarations" => self.members(member, scope),
                _ => self.declaration(member, Some(scope)),
            }
        }
    }

    fn parameters(&self, node: Node) -> Vec<Parameter> {
        let Some(params) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        named_children(params)
            .into_iter()
            .filter(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"))
            .filter_map(|p| {
                let name = p
                    .child_by_field_name("name")
                    .or_else(|| {
                        child_of_kind(p, "variable_declarator")
                            .and_then(|d| d.child_by_field_name("name"))
                    })?;
                let type_ref = p
                    .child_by_field_name("type")
                    .or_else(|| {
                        named_children(p)
                            .into_iter()
                            .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
                    })
                    .and_then(|t| TypeRef::parse(self.text(t)));
                let (annotations, _) = self.modifiers(p);
                Some(Parameter {
                    name: self.text(name).to_string(),
                    type_ref,
                    annotations,
                })
            })
            .collect()
    }

    fn method(&mut self, node: Node, parent: Option<&Scope>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let (annotations, mut modifiers) = self.modifiers(node);
        let in_interface = parent.is_some_and(|p| {
            matches!(p.kind, DeclarationKind::Interface | DeclarationKind::AnnotationClass)
        });
        let body = node.child_by_field_name("body");
        if in_interface && body.is_none() && !modifiers.iter().any(|m| m == "abstract") {
            modifiers.push("abstract".to_string());
        }

        let mut decl =
            self.new_declaration(node, self.text(name_node), DeclarationKind::Method, parent);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.parameters = self.parameters(node);
        if let Some(type_node) = node.child_by_field_name("type") {
            decl.return_type = TypeRef::parse(self.text(type_node));
            // `static` goes before the type parameters when there are any
            let start = node
                .child_by_field_name("type_parameters")
                .or_else(|| child_of_kind(node, "type_parameters"))
                .map(|tp| tp.start_byte())
                .unwrap_or(type_node.start_byte());
            decl.type_range = Some((start, type_node.end_byte()));
        }
        decl.has_body = body.is_some();
        decl.body = body
            .and_then(|b| self.returned_expression(b))
            .map(|e| self.body_shape(e));

        self.declarations.push(decl);
    }

    fn constructor(&mut self, node: Node, parent: Option<&Scope>) {
        let Some(scope) = parent else {
            return;
        };
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let (annotations, modifiers) = self.modifiers(node);
        let mut decl =
            self.new_declaration(node, self.text(name_node), DeclarationKind::Constructor, parent);
        decl.fq_name = format!("{}.<init>", scope.fq_name);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.parameters = self.parameters(node);
        decl.has_body = true;
        self.declarations.push(decl);
    }

    fn field(&mut self, node: Node, parent: Option<&Scope>) {
        let (annotations, modifiers) = self.modifiers(node);
        let type_node = node.child_by_field_name("type");
        let declarators: Vec<Node> = named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "variable_declarator")
            .collect();

        for declarator in declarators {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            let mut decl =
                self.new_declaration(declarator, self.text(name_node), DeclarationKind::Field, parent);
            decl.location = location(self.path, node);
            decl.annotations = annotations.clone();
            decl.modifiers = modifiers.clone();
            if let Some(t) = type_node {
                decl.return_type = TypeRef::parse(self.text(t));
                decl.type_range = Some((t.start_byte(), t.end_byte()));
            }
            self.declarations.push(decl);
        }
    }

    /// The expression of a block that is exactly `return <expr>;`
    fn returned_expression<'t>(&self, block: Node<'t>) -> Option<Node<'t>> {
        let statements = named_children(block);
        let [only] = statements.as_slice() else {
            return None;
        };
        if only.kind() != "return_statement" {
            return None;
        }
        named_children(*only).into_iter().next()
    }

    fn body_shape(&self, expr: Node) -> BodyShape {
        match expr.kind() {
            "parenthesized_expression" => named_children(expr)
                .into_iter()
                .next()
                .map(|inner| self.body_shape(inner))
                .unwrap_or(BodyShape::Other),
            "identifier" => BodyShape::Identifier(self.text(expr).to_string()),
            "object_creation_expression" => {
                // An anonymous class body makes this something else entirely
                if child_of_kind(expr, "class_body").is_some() {
                    return BodyShape::Other;
                }
                expr.child_by_field_name("type")
                    .and_then(|t| TypeRef::parse(self.text(t)))
                    .map(BodyShape::ConstructorCall)
                    .unwrap_or(BodyShape::Other)
            }
            _ => BodyShape::Other,
        }
    }
}
