use serde::Serialize;
use std::collections::HashSet;

use super::{FileInfo, Language};

/// An import directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Imported path without the trailing `.*`
    pub path: String,
    pub alias: Option<String>,
    pub wildcard: bool,
}

impl Import {
    /// Parse `import a.b.C`, `import a.b.*`, `import a.b.C as D` or `import static a.b.C.d;`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().trim_end_matches(';').trim();
        let text = text.strip_prefix("import")?.trim_start();
        let text = text.strip_prefix("static ").unwrap_or(text).trim();

        let (path, alias) = match text.split_once(" as ") {
            Some((p, a)) => (p.trim(), Some(a.trim().to_string())),
            None => (text, None),
        };
        let path: String = path.split_whitespace().collect();
        if path.is_empty() {
            return None;
        }

        match path.strip_suffix(".*") {
            Some(pkg) => Some(Self {
                path: pkg.to_string(),
                alias: None,
                wildcard: true,
            }),
            None => Some(Self {
                path,
                alias,
                wildcard: false,
            }),
        }
    }

    /// The simple name this import makes visible
    pub fn visible_name(&self) -> Option<&str> {
        if self.wildcard {
            return None;
        }
        self.alias
            .as_deref()
            .or_else(|| self.path.rsplit('.').next())
    }
}

const KOTLIN_IMPLICIT: &[(&str, &str)] = &[
    ("Any", "kotlin.Any"),
    ("Unit", "kotlin.Unit"),
    ("Nothing", "kotlin.Nothing"),
    ("String", "kotlin.String"),
    ("Int", "kotlin.Int"),
    ("Long", "kotlin.Long"),
    ("Boolean", "kotlin.Boolean"),
    ("Suppress", "kotlin.Suppress"),
];

const JAVA_IMPLICIT: &[(&str, &str)] = &[
    ("Object", "java.lang.Object"),
    ("String", "java.lang.String"),
    ("Void", "java.lang.Void"),
    ("Integer", "java.lang.Integer"),
    ("Long", "java.lang.Long"),
    ("Boolean", "java.lang.Boolean"),
    ("SuppressWarnings", "java.lang.SuppressWarnings"),
];

/// Resolves names written in a file to qualified names
///
/// Lookup order: explicit imports, enclosing types, already-qualified
/// names, the file's package, wildcard imports, implicit language imports.
/// Anything else stays unresolved.
pub struct Resolver<'a> {
    known: &'a HashSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(known: &'a HashSet<String>) -> Self {
        Self { known }
    }

    pub fn resolve(&self, written: &str, file: &FileInfo, enclosing: &[String]) -> Option<String> {
        let written = written.trim();
        if written.is_empty() {
            return None;
        }
        let (head, rest) = match written.split_once('.') {
            Some((h, r)) => (h, Some(r)),
            None => (written, None),
        };

        for import in &file.imports {
            if import.visible_name() == Some(head) {
                return Some(match rest {
                    Some(r) => format!("{}.{}", import.path, r),
                    None => import.path.clone(),
                });
            }
        }

        for outer in enclosing {
            let candidate = format!("{}.{}", outer, written);
            if self.known.contains(&candidate) {
                return Some(candidate);
            }
        }

        if rest.is_some()
            && (self.known.contains(written) || head.starts_with(|c: char| c.is_lowercase()))
        {
            return Some(written.to_string());
        }

        let local = match &file.package {
            Some(pkg) => format!("{}.{}", pkg, written),
            None => written.to_string(),
        };
        if self.known.contains(&local) {
            return Some(local);
        }

        for import in file.imports.iter().filter(|i| i.wildcard) {
            let candidate = format!("{}.{}", import.path, written);
            if self.known.contains(&candidate) {
                return Some(candidate);
            }
        }

        let implicit = match file.language {
            Language::Kotlin => KOTLIN_IMPLICIT,
            Language::Java => JAVA_IMPLICIT,
        };
        implicit
            .iter()
            .find(|(simple, _)| *simple == written)
            .map(|(_, q)| q.to_string())
    }
}
