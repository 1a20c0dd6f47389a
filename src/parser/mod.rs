mod common;
mod java;
mod kotlin;

pub use common::{string_values, ParsedFile, Parser};
pub use java::JavaParser;
pub use kotlin::KotlinParser;

use crate::graph::Language;

/// Front end for a source language
pub fn parser_for(language: Language) -> Box<dyn Parser> {
    match language {
        Language::Kotlin => Box::new(KotlinParser::new()),
        Language::Java => Box::new(JavaParser::new()),
    }
}
