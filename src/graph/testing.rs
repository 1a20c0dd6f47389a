//! Hand-built declarations for unit tests

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_OFFSET: AtomicUsize = AtomicUsize::new(1);

/// Resolved type reference for a qualified name, e.g. `com.example.Foo`
pub fn type_ref(qualified: &str) -> TypeRef {
    let mut t = TypeRef::parse(qualified.rsplit('.').next().unwrap_or(qualified))
        .expect("valid type");
    if qualified.contains('.') {
        t.qualified_name = Some(qualified.to_string());
    }
    t
}

pub struct DeclBuilder {
    decl: Declaration,
}

impl DeclBuilder {
    fn base(fq: &str, kind: DeclarationKind) -> Self {
        let start = NEXT_OFFSET.fetch_add(100, Ordering::SeqCst);
        let path = PathBuf::from("Test.kt");
        let name = fq.rsplit('.').next().unwrap_or(fq).to_string();
        let line = start / 100 + 1;
        let mut decl = Declaration::new(
            DeclarationId::new(path.clone(), start, start + 50),
            name,
            kind,
            Location::new(path, line, 1, start, start + 50),
            Language::Kotlin,
        );
        decl.fq_name = fq.to_string();
        if kind.is_type() {
            decl.keyword_range = Some((start, start + 5));
        }
        if kind == DeclarationKind::Method {
            decl.return_type = Some(type_ref("kotlin.Unit"));
        }
        Self { decl }
    }

    pub fn class(fq: &str) -> Self {
        Self::base(fq, DeclarationKind::Class)
    }

    pub fn interface(fq: &str) -> Self {
        Self::base(fq, DeclarationKind::Interface)
    }

    pub fn annotation_class(fq: &str) -> Self {
        Self::base(fq, DeclarationKind::AnnotationClass)
    }

    pub fn object(fq: &str) -> Self {
        Self::base(fq, DeclarationKind::Object)
    }

    pub fn companion() -> Self {
        Self::base("Companion", DeclarationKind::CompanionObject)
    }

    pub fn method(name: &str) -> Self {
        Self::base(name, DeclarationKind::Method)
    }

    pub fn constructor() -> Self {
        Self::base("<init>", DeclarationKind::Constructor)
    }

    pub fn property(name: &str) -> Self {
        Self::base(name, DeclarationKind::Property)
    }

    pub fn field(name: &str) -> Self {
        Self::base(name, DeclarationKind::Field)
    }

    pub fn java(mut self) -> Self {
        self.decl.language = Language::Java;
        self.set_file("Test.java");
        if self.decl.kind == DeclarationKind::Method {
            self.decl.return_type = TypeRef::parse("void");
        }
        self
    }

    fn set_file(&mut self, file: &str) {
        let path = PathBuf::from(file);
        self.decl.id.file = path.clone();
        self.decl.location.file = path;
    }

    /// Nest this declaration inside `parent`
    pub fn in_type(mut self, parent: &Declaration) -> Self {
        self.decl.parent = Some(parent.id.clone());
        self.decl.fq_name = format!("{}.{}", parent.fq_name, self.decl.name);
        let java = parent.language == Language::Java;
        if java && self.decl.language != Language::Java {
            self = self.java();
        }
        self
    }

    pub fn annotated(mut self, qualified: &str) -> Self {
        let simple = qualified.rsplit('.').next().unwrap_or(qualified);
        let mut ann = Annotation::new(simple, self.decl.location.clone());
        ann.qualified_name = Some(qualified.to_string());
        self.decl.annotations.push(ann);
        self
    }

    pub fn annotated_with(mut self, qualified: &str, args: &[(Option<&str>, &str)]) -> Self {
        self = self.annotated(qualified);
        if let Some(ann) = self.decl.annotations.last_mut() {
            ann.arguments = args
                .iter()
                .map(|(name, value)| AnnotationArgument {
                    name: name.map(String::from),
                    value: value.to_string(),
                })
                .collect();
        }
        self
    }

    /// Annotation whose declaration could not be found
    pub fn unresolved_annotation(mut self, name: &str) -> Self {
        self.decl
            .annotations
            .push(Annotation::new(name, self.decl.location.clone()));
        self
    }

    pub fn modifier(mut self, modifier: &str) -> Self {
        self.decl.modifiers.push(modifier.to_string());
        self
    }

    /// Superclass, written `: Base()` in Kotlin
    pub fn extends(mut self, qualified: &str) -> Self {
        let mut t = type_ref(qualified);
        t.invoked = true;
        self.decl.super_types.push(t);
        self
    }

    pub fn implements(mut self, qualified: &str) -> Self {
        self.decl.super_types.push(type_ref(qualified));
        self
    }

    pub fn implements_generic(mut self, qualified: &str, args: &[&str]) -> Self {
        let mut t = type_ref(qualified);
        t.type_arguments = args.iter().map(|a| a.to_string()).collect();
        t.text = format!("{}<{}>", t.name, args.join(", "));
        self.decl.super_types.push(t);
        self
    }

    pub fn param(mut self, name: &str, qualified: &str) -> Self {
        self.decl.parameters.push(Parameter {
            name: name.to_string(),
            type_ref: Some(type_ref(qualified)),
            annotations: Vec::new(),
        });
        self
    }

    pub fn returns(mut self, qualified: &str) -> Self {
        self.decl.return_type = Some(type_ref(qualified));
        self
    }

    pub fn returns_void(mut self) -> Self {
        self.decl.return_type = match self.decl.language {
            Language::Kotlin => Some(type_ref("kotlin.Unit")),
            Language::Java => TypeRef::parse("void"),
        };
        self
    }

    pub fn returns_inferred(mut self) -> Self {
        self.decl.return_type = None;
        self
    }

    pub fn with_body(mut self, shape: BodyShape) -> Self {
        self.decl.has_body = true;
        self.decl.body = Some(shape);
        self
    }

    pub fn has_body(mut self) -> Self {
        self.decl.has_body = true;
        self
    }

    pub fn build(self) -> Declaration {
        self.decl
    }
}
