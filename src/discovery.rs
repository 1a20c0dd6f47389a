//! Source file discovery
//!
//! Walks the project with the `ignore` crate, so `.gitignore` files are
//! respected, and keeps Kotlin and Java sources that are not excluded by
//! the configured globs.

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{InjectLintError, Result};
use crate::graph::Language;

/// Directories never worth descending into
const SKIPPED_DIRS: &[&str] = &[".git", ".gradle", ".idea", "build", "node_modules"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Kotlin,
    Java,
}

impl FileType {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("kt") | Some("kts") => Some(FileType::Kotlin),
            Some("java") => Some(FileType::Java),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_type: FileType,
}

impl SourceFile {
    pub fn new(path: PathBuf, file_type: FileType) -> Self {
        Self { path, file_type }
    }

    pub fn language(&self) -> Language {
        match self.file_type {
            FileType::Kotlin => Language::Kotlin,
            FileType::Java => Language::Java,
        }
    }

    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| InjectLintError::io(&self.path, e))
    }
}

pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Every Kotlin/Java source under the configured targets of `root`,
    /// sorted by path
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        if !root.exists() {
            return Err(InjectLintError::io(
                root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
            ));
        }
        if root.is_file() {
            return Ok(FileType::from_path(root)
                .map(|t| vec![SourceFile::new(root.to_path_buf(), t)])
                .unwrap_or_default());
        }

        let targets: Vec<PathBuf> = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config
                .targets
                .iter()
                .map(|t| root.join(t))
                .filter(|t| {
                    let exists = t.exists();
                    if !exists {
                        warn!("Target directory not found: {}", t.display());
                    }
                    exists
                })
                .collect()
        };

        let mut files = Vec::new();
        for target in &targets {
            self.walk(root, target, &mut files)?;
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup();
        debug!("Found {} source files", files.len());
        Ok(files)
    }

    fn walk(&self, root: &Path, target: &Path, files: &mut Vec<SourceFile>) -> Result<()> {
        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.config.exclude {
            // A leading `!` turns an override glob into an ignore rule
            if let Err(e) = overrides.add(&format!("!{}", pattern)) {
                warn!("Ignoring invalid exclude pattern '{}': {}", pattern, e);
            }
        }
        let overrides = overrides.build().map_err(|e| InjectLintError::Config {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut builder = WalkBuilder::new(target);
        builder.hidden(false).parents(true).overrides(overrides);
        let walker = builder
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Some(file_type) = FileType::from_path(entry.path()) {
                files.push(SourceFile::new(entry.path().to_path_buf(), file_type));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("app/src/main/java/com/example");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("App.kt"), "class App").unwrap();
        fs::write(src.join("Module.java"), "class Module {}").unwrap();
        fs::write(src.join("notes.txt"), "").unwrap();
        let generated = dir.path().join("app/src/generated");
        fs::create_dir_all(&generated).unwrap();
        fs::write(generated.join("Gen.kt"), "class Gen").unwrap();
        let build = dir.path().join("app/build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("Out.kt"), "class Out").unwrap();
        dir
    }

    fn names(files: &[SourceFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_finds_kotlin_and_java() {
        let dir = project();
        let config = Config::default();
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["Gen.kt", "App.kt", "Module.java"]);
        assert_eq!(files[1].language(), Language::Kotlin);
        assert_eq!(files[2].language(), Language::Java);
    }

    #[test]
    fn test_exclude_globs() {
        let dir = project();
        let mut config = Config::default();
        config.exclude = vec!["**/generated/**".to_string()];
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["App.kt", "Module.java"]);
    }

    #[test]
    fn test_targets() {
        let dir = project();
        let mut config = Config::default();
        config.targets = vec![PathBuf::from("app/src/generated"), PathBuf::from("missing")];
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["Gen.kt"]);
    }

    #[test]
    fn test_single_file_and_missing_path() {
        let dir = project();
        let config = Config::default();
        let file = dir.path().join("app/src/main/java/com/example/App.kt");
        assert_eq!(FileFinder::new(&config).find_files(&file).unwrap().len(), 1);
        assert!(FileFinder::new(&config)
            .find_files(&dir.path().join("nope"))
            .is_err());
    }
}
