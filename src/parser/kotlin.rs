//! Kotlin front end (tree-sitter-kotlin)

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

const TYPE_KINDS: &[&str] = &[
    "user_type",
    "nullable_type",
    "type_reference",
    "function_type",
    "parenthesized_type",
    "non_nullable_type",
    "not_nullable_type",
];

pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KotlinParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for KotlinParser {
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_kotlin::language())
            .map_err(|source| InjectLintError::Grammar {
                language: "Kotlin",
                source,
            })?;
        let tree = parser.parse(source, None).ok_or_else(|| InjectLintError::Parse {
            path: path.to_path_buf(),
        })?;

        let mut walker = KotlinWalker {
            path,
            source,
            info: FileInfo::new(path.to_path_buf(), Language::Kotlin),
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

struct KotlinWalker<'a> {
    path: &'a Path,
    source: &'a str,
    info: FileInfo,
    declarations: Vec<Declaration>,
}

impl<'a> KotlinWalker<'a> {
    fn text(&self, node: Node) -> &'a str {
        node_text(node, self.source)
    }

    fn walk_file(&mut self, root: Node) {
        for child in named_children(root) {
            match child.kind() {
                "package_header" => {
                    let package = self.text(child).trim().trim_start_matches("package").trim();
                    let package = package.trim_end_matches(';').trim();
                    if !package.is_empty() {
                        self.info.package = Some(package.to_string());
                        if self.info.import_anchor == ImportAnchor::FileStart {
                            self.info.import_anchor =
                                ImportAnchor::AfterPackage(trimmed_end(child, self.source));
                        }
                    }
                }
                "import_list" => {
                    for import in named_children(child) {
                        self.import(import);
                    }
                }
                "import_header" => self.import(child),
                "file_annotation" => {
                    let loc = location(self.path, child);
                    let anns = parse_annotations(self.text(child), &loc);
                    self.info.file_annotations.extend(anns);
                }
                _ => self.declaration(child, None),
            }
        }
    }

    fn import(&mut self, node: Node) {
        if node.kind() != "import_header" {
            return;
        }
        if let Some(import) = Import::parse(self.text(node)) {
            self.info.imports.push(import);
            self.info.import_anchor = ImportAnchor::AfterImports(trimmed_end(node, self.source));
        }
    }

    fn declaration(&mut self, node: Node, parent: Option<&Scope>) {
        match node.kind() {
            "class_declaration" => self.class(node, parent),
            "object_declaration" => self.object(node, parent, DeclarationKind::Object),
            "companion_object" => self.object(node, parent, DeclarationKind::CompanionObject),
            "function_declaration" => self.function(node, parent),
            "property_declaration" => self.property(node, parent),
            "secondary_constructor" => self.secondary_constructor(node, parent),
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
            Language::Kotlin,
        );
        decl.fq_name = match (parent, &self.info.package) {
            (Some(p), _) => format!("{}.{}", p.fq_name, name),
            (None, Some(pkg)) => format!("{}.{}", pkg, name),
            (None, None) => name.to_string(),
        };
        decl.parent = parent.map(|p| p.id.clone());
        decl
    }

    /// Annotations and modifier keywords from a `modifiers` child
    fn modifiers(&self, node: Node) -> (Vec<Annotation>, Vec<String>) {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "modifiers" | "parameter_modifiers" => {
                    for m in named_children(child) {
                        if m.kind() == "annotation" {
                            annotations.extend(parse_annotations(
                                self.text(m),
                                &location(self.path, m),
                            ));
                        } else {
                            modifiers.extend(self.text(m).split_whitespace().map(String::from));
                        }
                    }
                }
                "annotation" => {
                    annotations.extend(parse_annotations(self.text(child), &location(self.path, child)));
                }
                _ => {}
            }
        }
        (annotations, modifiers)
    }

    fn class(&mut self, node: Node, parent: Option<&Scope>) {
        let Some(name_node) = child_of_kind(node, "type_identifier") else {
            return;
        };
        let name = self.text(name_node);
        let (annotations, modifiers) = self.modifiers(node);

        let mut keyword_range = None;
        let mut is_interface = false;
        let mut is_enum = false;
        for child in children(node) {
            match child.kind() {
                "enum" if !child.is_named() => is_enum = true,
                "class" if !child.is_named() => {
                    keyword_range = Some((child.start_byte(), child.end_byte()));
                }
                "interface" if !child.is_named() => {
                    keyword_range = Some((child.start_byte(), child.end_byte()));
                    is_interface = true;
                }
                _ => {}
            }
        }

        let kind = if is_interface {
            DeclarationKind::Interface
        } else if modifiers.iter().any(|m| m == "annotation") {
            DeclarationKind::AnnotationClass
        } else if is_enum || modifiers.iter().any(|m| m == "enum") {
            DeclarationKind::Enum
        } else {
            DeclarationKind::Class
        };

        let mut decl = self.new_declaration(node, name, kind, parent);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.keyword_range = keyword_range;
        decl.super_types = self.supertypes(node);

        let scope = Scope::of(&decl);
        let body = child_of_kind(node, "class_body").or_else(|| child_of_kind(node, "enum_class_body"));
        decl.has_body = body.is_some();
        self.declarations.push(decl);

        if let Some(ctor) = child_of_kind(node, "primary_constructor") {
            self.primary_constructor(ctor, name, &scope);
        }
        if let Some(body) = body {
            self.members(body, &scope);
        }
    }

    fn object(&mut self, node: Node, parent: Option<&Scope>, kind: DeclarationKind) {
        let name = match child_of_kind(node, "type_identifier") {
            Some(n) => self.text(n),
            None if kind == DeclarationKind::CompanionObject => "Companion",
            None => return,
        };
        let (annotations, modifiers) = self.modifiers(node);

        let mut decl = self.new_declaration(node, name, kind, parent);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.super_types = self.supertypes(node);
        decl.keyword_range = children(node)
            .into_iter()
            .find(|c| !c.is_named() && c.kind() == "object")
            .map(|c| (c.start_byte(), c.end_byte()));

        let scope = Scope::of(&decl);
        let body = child_of_kind(node, "class_body");
        decl.has_body = body.is_some();
        self.declarations.push(decl);

        if let Some(body) = body {
            self.members(body, &scope);
        }
    }

    fn members(&mut self, body: Node, scope: &Scope) {
        for member in named_children(body) {
            match member.kind() {
                "enum_entry" => {}
                _ => self.declaration(member, Some(scope)),
            }
        }
    }

    fn supertypes(&self, node: Node) -> Vec<TypeRef> {
        let mut result = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "delegation_specifiers" => {
                    for spec in named_children(child) {
                        self.delegation_specifier(spec, &mut result);
                    }
                }
                "delegation_specifier" | "annotated_delegation_specifier" => {
                    self.delegation_specifier(child, &mut result)
                }
                _ => {}
            }
        }
        result
    }

    fn delegation_specifier(&self, node: Node, out: &mut Vec<TypeRef>) {
        match node.kind() {
            "annotated_delegation_specifier" => {
                if let Some(inner) = child_of_kind(node, "delegation_specifier") {
                    self.delegation_specifier(inner, out);
                }
            }
            "delegation_specifier" => {
                for inner in named_children(node) {
                    match inner.kind() {
                        "constructor_invocation" => {
                            if let Some(t) = child_of_kind(inner, "user_type")
                                .and_then(|u| TypeRef::parse(self.text(u)))
                            {
                                out.push(TypeRef { invoked: true, ..t });
                            }
                        }
                        "user_type" => out.extend(TypeRef::parse(self.text(inner))),
                        "explicit_delegation" => {
                            if let Some(u) = child_of_kind(inner, "user_type") {
                                out.extend(TypeRef::parse(self.text(u)));
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn primary_constructor(&mut self, node: Node, class_name: &str, scope: &Scope) {
        let (annotations, modifiers) = self.modifiers(node);
        let mut decl = self.new_declaration(node, class_name, DeclarationKind::Constructor, Some(scope));
        decl.fq_name = format!("{}.<init>", scope.fq_name);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.has_body = true;
        // Some grammar versions wrap the parameters in `class_parameters`
        let params = child_of_kind(node, "class_parameters").unwrap_or(node);
        decl.parameters = named_children(params)
            .into_iter()
            .filter(|p| p.kind() == "class_parameter")
            .filter_map(|p| self.parameter(p))
            .collect();
        self.declarations.push(decl);
    }

    fn secondary_constructor(&mut self, node: Node, parent: Option<&Scope>) {
        let Some(scope) = parent else {
            return;
        };
        let (annotations, modifiers) = self.modifiers(node);
        let name = scope.fq_name.rsplit('.').next().unwrap_or(&scope.fq_name).to_string();
        let mut decl = self.new_declaration(node, &name, DeclarationKind::Constructor, Some(scope));
        decl.fq_name = format!("{}.<init>", scope.fq_name);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.has_body = true;
        decl.parameters = self.function_parameters(node);
        self.declarations.push(decl);
    }

    fn function_parameters(&self, node: Node) -> Vec<Parameter> {
        let Some(params) = child_of_kind(node, "function_value_parameters") else {
            return Vec::new();
        };
        let mut result = Vec::new();
        let mut pending_annotations = Vec::new();
        for child in named_children(params) {
            match child.kind() {
                "parameter_modifiers" => {
                    for m in named_children(child) {
                        if m.kind() == "annotation" {
                            pending_annotations
                                .extend(parse_annotations(self.text(m), &location(self.path, m)));
                        }
                    }
                }
                "parameter" => {
                    if let Some(mut p) = self.parameter(child) {
                        p.annotations.append(&mut pending_annotations);
                        result.push(p);
                    }
                }
                _ => {}
            }
        }
        result
    }

    fn parameter(&self, node: Node) -> Option<Parameter> {
        let name = child_of_kind(node, "simple_identifier")?;
        let type_ref = named_children(node)
            .into_iter()
            .find(|c| TYPE_KINDS.contains(&c.kind()))
            .and_then(|t| TypeRef::parse(self.text(t)));
        let (annotations, _) = self.modifiers(node);
        Some(Parameter {
            name: self.text(name).to_string(),
            type_ref,
            annotations,
        })
    }

    fn function(&mut self, node: Node, parent: Option<&Scope>) {
        let Some(name_node) = child_of_kind(node, "simple_identifier") else {
            return;
        };
        let (annotations, modifiers) = self.modifiers(node);
        let mut decl = self.new_declaration(node, self.text(name_node), DeclarationKind::Method, parent);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.parameters = self.function_parameters(node);

        // `fun Foo.bar()`: the receiver is an implicit first parameter
        let receiver = named_children(node)
            .into_iter()
            .take_while(|c| c.id() != name_node.id())
            .find(|c| TYPE_KINDS.contains(&c.kind()));
        if let Some(receiver) = receiver {
            decl.parameters.insert(
                0,
                Parameter {
                    name: "<this>".to_string(),
                    type_ref: TypeRef::parse(self.text(receiver)),
                    annotations: Vec::new(),
                },
            );
        }

        // The return type follows the parameter list
        let mut after_params = false;
        let mut declared_type = None;
        let mut body = None;
        for child in named_children(node) {
            match child.kind() {
                "function_value_parameters" => after_params = true,
                "function_body" => body = Some(child),
                kind if after_params && declared_type.is_none() && TYPE_KINDS.contains(&kind) => {
                    declared_type = TypeRef::parse(self.text(child));
                }
                _ => {}
            }
        }

        decl.has_body = body.is_some();
        let expression_body = body.and_then(|b| {
            children(b)
                .first()
                .filter(|first| first.kind() == "=")
                .and_then(|_| named_children(b).into_iter().next())
        });
        decl.return_type = match declared_type {
            Some(t) => Some(t),
            None if expression_body.is_some() => None,
            None => TypeRef::parse("Unit"),
        };
        decl.body = match (expression_body, body) {
            (Some(expr), _) => Some(self.body_shape(expr)),
            (None, Some(block)) => self.returned_expression(block).map(|e| self.body_shape(e)),
            (None, None) => None,
        };

        self.declarations.push(decl);
    }

    /// The expression of a block body that is exactly `return <expr>`
    fn returned_expression<'t>(&self, block: Node<'t>) -> Option<Node<'t>> {
        let statements = child_of_kind(block, "statements").or_else(|| {
            child_of_kind(block, "block").and_then(|b| child_of_kind(b, "statements"))
        })?;
        let stmts = named_children(statements);
        let [only] = stmts.as_slice() else {
            return None;
        };
        if only.kind() != "jump_expression" || !self.text(*only).trim_start().starts_with("return") {
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
            "simple_identifier" => BodyShape::Identifier(self.text(expr).to_string()),
            "call_expression" => {
                let parts = named_children(expr);
                let (Some(callee), Some(suffix)) = (parts.first(), parts.get(1)) else {
                    return BodyShape::Other;
                };
                if suffix.kind() != "call_suffix" {
                    return BodyShape::Other;
                }
                let callee_text: String = self
                    .text(*callee)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                let callable = matches!(callee.kind(), "simple_identifier" | "navigation_expression");
                if callable && looks_like_type_name(&callee_text) {
                    match TypeRef::parse(&callee_text) {
                        Some(t) => BodyShape::ConstructorCall(t),
                        None => BodyShape::Other,
                    }
                } else {
                    BodyShape::Other
                }
            }
            _ => BodyShape::Other,
        }
    }

    fn property(&mut self, node: Node, parent: Option<&Scope>) {
        let Some(var) = child_of_kind(node, "variable_declaration") else {
            return;
        };
        let Some(name_node) = child_of_kind(var, "simple_identifier") else {
            return;
        };
        let (annotations, mut modifiers) = self.modifiers(node);
        if let Some(binding) = child_of_kind(node, "binding_pattern_kind") {
            modifiers.push(self.text(binding).trim().to_string());
        }

        let mut decl = self.new_declaration(node, self.text(name_node), DeclarationKind::Property, parent);
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.return_type = named_children(var)
            .into_iter()
            .find(|c| TYPE_KINDS.contains(&c.kind()))
            .and_then(|t| TypeRef::parse(self.text(t)));
        self.declarations.push(decl);
    }
}

/// `Foo`, `com.example.Foo` or `Outer.Inner`: the last segment starts upper case
fn looks_like_type_name(text: &str) -> bool {
    let segments: Vec<&str> = text.split('.').collect();
    let Some(last) = segments.last() else {
        return false;
    };
    last.starts_with(|c: char| c.is_uppercase())
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_'))
}
