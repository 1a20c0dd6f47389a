use serde::Serialize;
use std::path::PathBuf;

use super::types::TypeRef;

/// Unique identifier for a declaration: the file it lives in plus its byte span
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclarationId {
    pub file: PathBuf,
    pub start: usize,
    pub end: usize,
}

impl DeclarationId {
    pub fn new(file: PathBuf, start: usize, end: usize) -> Self {
        Self { file, start, end }
    }
}

/// Source location of a declaration or annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize, start_byte: usize, end_byte: usize) -> Self {
        Self {
            file,
            line,
            column,
            start_byte,
            end_byte,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Kotlin,
    Java,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Kotlin => "kotlin",
            Language::Java => "java",
        }
    }

    /// Class literal syntax, `Foo::class` or `Foo.class`
    pub fn class_literal(&self, name: &str) -> String {
        match self {
            Language::Kotlin => format!("{}::class", name),
            Language::Java => format!("{}.class", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Interface,
    AnnotationClass,
    Enum,
    /// Kotlin `object`
    Object,
    /// Kotlin `companion object`
    CompanionObject,
    Constructor,
    Method,
    /// Kotlin property
    Property,
    /// Java field
    Field,
}

impl DeclarationKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::AnnotationClass => "annotation",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Object => "object",
            DeclarationKind::CompanionObject => "companion object",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Method => "method",
            DeclarationKind::Property => "property",
            DeclarationKind::Field => "field",
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Interface
                | DeclarationKind::AnnotationClass
                | DeclarationKind::Enum
                | DeclarationKind::Object
                | DeclarationKind::CompanionObject
        )
    }
}

/// A single annotation argument, `name = value` or a positional `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationArgument {
    pub name: Option<String>,
    pub value: String,
}

/// An annotation attached to a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Name as written in source, without `@` or a use-site target
    pub name: String,
    /// Fully qualified name once resolved through imports
    pub qualified_name: Option<String>,
    pub arguments: Vec<AnnotationArgument>,
    pub location: Location,
}

impl Annotation {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            qualified_name: None,
            arguments: Vec::new(),
            location,
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Look up an argument by name; `value` also matches the first positional argument
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .or_else(|| {
                if name == "value" {
                    self.arguments.iter().find(|a| a.name.is_none())
                } else {
                    None
                }
            })
            .map(|a| a.value.as_str())
    }
}

/// A method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_ref: Option<TypeRef>,
    pub annotations: Vec<Annotation>,
}

/// Syntactic shape of a method body that consists of a single returned expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum BodyShape {
    /// `Foo(...)` in Kotlin, `new Foo(...)` in Java
    ConstructorCall(TypeRef),
    /// A bare name, e.g. returning a parameter
    Identifier(String),
    Other,
}

/// A declaration in the analyzed sources
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    pub id: DeclarationId,
    pub name: String,
    pub fq_name: String,
    pub kind: DeclarationKind,
    pub location: Location,
    pub language: Language,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<String>,
    pub parent: Option<DeclarationId>,
    /// Direct supertypes as written; the implicit root is never listed
    pub super_types: Vec<TypeRef>,
    pub parameters: Vec<Parameter>,
    /// `None` when the return type is inferred and not written down
    pub return_type: Option<TypeRef>,
    pub has_body: bool,
    /// Present when the body is exactly one returned expression
    pub body: Option<BodyShape>,
    /// Byte range of the `class`/`interface` keyword
    pub keyword_range: Option<(usize, usize)>,
    /// Byte range of the declared type (Java methods and fields)
    pub type_range: Option<(usize, usize)>,
}

impl Declaration {
    pub fn new(
        id: DeclarationId,
        name: String,
        kind: DeclarationKind,
        location: Location,
        language: Language,
    ) -> Self {
        Self {
            id,
            fq_name: name.clone(),
            name,
            kind,
            location,
            language,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            parent: None,
            super_types: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            has_body: false,
            body: None,
            keyword_range: None,
            type_range: None,
        }
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn is_kotlin(&self) -> bool {
        self.language == Language::Kotlin
    }
}
