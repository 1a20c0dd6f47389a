//! Configuration file support
//!
//! Loaded from `--config` or the first of [`CONFIG_FILE_NAMES`] found in the
//! project root. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! exclude = ["**/build/**"]
//! disable = ["MissingHiltAndroidApp"]
//! families = ["dagger", "anvil"]
//!
//! [severity]
//! BindsOverProvides = "error"
//!
//! [dagger]
//! field_injection_allowed_types = ["com.example.BaseActivity"]
//! use_androidx = true
//!
//! [anvil]
//! default_scope = "com.example.AppScope"
//! custom_scopes = ["com.example.UserScope"]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::analysis::annotations::{
    FIELD_INJECTION_ALLOWED_ANDROIDX, FIELD_INJECTION_ALLOWED_SUPPORT, HILT_ENTRY_POINT_BASES,
};
use crate::analysis::{Family, Issue, Severity};
use crate::error::{InjectLintError, Result};

pub const CONFIG_FILE_NAMES: &[&str] = &[
    "injectlint.toml",
    ".injectlint.toml",
    "injectlint.yml",
    ".injectlint.yml",
    "injectlint.yaml",
];

/// Dotted Java/Kotlin name such as `AppScope` or `com.example.AppScope`
static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories to analyze, relative to the project root
    pub targets: Vec<PathBuf>,
    /// Glob patterns of files to skip
    pub exclude: Vec<String>,
    /// Issues to turn on in addition to the enabled-by-default ones
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    /// Rule families to run; empty means all
    pub families: Vec<Family>,
    /// Per-issue severity overrides
    pub severity: BTreeMap<String, Severity>,
    pub dagger: DaggerOptions,
    pub anvil: AnvilOptions,
    pub hilt: HiltOptions,
    /// Parse files in parallel
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaggerOptions {
    /// Extra base classes whose subclasses may use field injection
    pub field_injection_allowed_types: Vec<String>,
    /// Use the AndroidX allow-list instead of the support library one
    pub use_androidx: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnvilOptions {
    pub default_scope: String,
    /// Scopes offered as alternatives next to the default one
    pub custom_scopes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiltOptions {
    /// Extra lifecycle base classes that Hilt injects with `@AndroidEntryPoint`
    pub entry_point_bases: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            exclude: Vec::new(),
            enable: Vec::new(),
            disable: Vec::new(),
            families: Vec::new(),
            severity: BTreeMap::new(),
            dagger: DaggerOptions::default(),
            anvil: AnvilOptions::default(),
            hilt: HiltOptions::default(),
            parallel: true,
        }
    }
}

impl Default for DaggerOptions {
    fn default() -> Self {
        Self {
            field_injection_allowed_types: Vec::new(),
            use_androidx: true,
        }
    }
}

impl Default for AnvilOptions {
    fn default() -> Self {
        Self {
            default_scope: "AppScope".to_string(),
            custom_scopes: Vec::new(),
        }
    }
}

enum Format {
    Toml,
    Yaml,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InjectLintError::io(path, e))?;
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Format::Yaml,
            _ => Format::Toml,
        };
        let mut config = Self::parse(&content, format).map_err(|message| {
            InjectLintError::Config {
                path: path.to_path_buf(),
                message,
            }
        })?;
        config.sanitize();
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// First config file found in `root`, or the defaults
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        for name in CONFIG_FILE_NAMES {
            let candidate = root.join(name);
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config =
            Self::parse(content, Format::Toml).map_err(|message| InjectLintError::Config {
                path: PathBuf::from("<string>"),
                message,
            })?;
        config.sanitize();
        Ok(config)
    }

    fn parse(content: &str, format: Format) -> std::result::Result<Self, String> {
        match format {
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Yaml if content.trim().is_empty() => Ok(Self::default()),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Drop malformed entries instead of failing the whole run
    pub fn sanitize(&mut self) {
        retain_valid_names(
            "dagger.field_injection_allowed_types",
            &mut self.dagger.field_injection_allowed_types,
        );
        retain_valid_names("anvil.custom_scopes", &mut self.anvil.custom_scopes);
        retain_valid_names("hilt.entry_point_bases", &mut self.hilt.entry_point_bases);
        let default_scope = self.anvil.default_scope.trim().to_string();
        if QUALIFIED_NAME.is_match(&default_scope) {
            self.anvil.default_scope = default_scope;
        } else {
            warn!(
                "Ignoring malformed anvil.default_scope '{}'",
                self.anvil.default_scope
            );
            self.anvil.default_scope = AnvilOptions::default().default_scope;
        }

        retain_known_issues("enable", &mut self.enable);
        retain_known_issues("disable", &mut self.disable);
        self.severity.retain(|id, _| {
            let known = Issue::from_id(id).is_some();
            if !known {
                warn!("Ignoring severity override for unknown issue '{}'", id);
            }
            known
        });
    }

    pub fn family_enabled(&self, family: Family) -> bool {
        self.families.is_empty() || self.families.contains(&family)
    }

    /// `disable` wins over `enable`, which wins over the issue default
    pub fn issue_enabled(&self, issue: Issue) -> bool {
        let listed = |ids: &[String]| ids.iter().any(|id| id.eq_ignore_ascii_case(issue.id()));
        if !self.family_enabled(issue.family()) || listed(&self.disable) {
            return false;
        }
        listed(&self.enable) || issue.enabled_by_default()
    }

    pub fn severity_for(&self, issue: Issue) -> Severity {
        self.severity
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(issue.id()))
            .map(|(_, s)| *s)
            .unwrap_or_else(|| issue.default_severity())
    }

    /// Allow-list for field injection, the built-in variant plus configured types
    pub fn field_injection_allowed(&self) -> Vec<String> {
        let builtin = if self.dagger.use_androidx {
            FIELD_INJECTION_ALLOWED_ANDROIDX
        } else {
            FIELD_INJECTION_ALLOWED_SUPPORT
        };
        builtin
            .iter()
            .map(|s| s.to_string())
            .chain(self.dagger.field_injection_allowed_types.iter().cloned())
            .collect()
    }

    /// Default scope followed by the custom ones, without duplicates
    pub fn anvil_scopes(&self) -> Vec<String> {
        let mut scopes = vec![self.anvil.default_scope.clone()];
        for scope in &self.anvil.custom_scopes {
            if !scopes.contains(scope) {
                scopes.push(scope.clone());
            }
        }
        scopes
    }

    pub fn hilt_entry_point_bases(&self) -> Vec<String> {
        HILT_ENTRY_POINT_BASES
            .iter()
            .map(|s| s.to_string())
            .chain(self.hilt.entry_point_bases.iter().cloned())
            .collect()
    }
}

fn retain_valid_names(key: &str, names: &mut Vec<String>) {
    names.retain(|name| {
        let valid = QUALIFIED_NAME.is_match(name.trim());
        if !valid {
            warn!("Ignoring malformed entry '{}' in {}", name, key);
        }
        valid
    });
    for name in names.iter_mut() {
        *name = name.trim().to_string();
    }
}

fn retain_known_issues(key: &str, ids: &mut Vec<String>) {
    ids.retain(|id| {
        let known = Issue::from_id(id).is_some();
        if !known {
            warn!("Ignoring unknown issue id '{}' in {}", id, key);
        }
        known
    });
}
