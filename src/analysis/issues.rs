//! Issue catalogue
//!
//! Every diagnostic the detectors can report. The variant names double as
//! the stable issue ids used by suppression annotations, configuration and
//! baseline files, so they must never be renamed.

use serde::{Deserialize, Serialize};

use crate::graph::Declaration;

/// Rule family, one per framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Dagger,
    Anvil,
    Hilt,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Dagger, Family::Anvil, Family::Hilt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Dagger => "dagger",
            Family::Anvil => "anvil",
            Family::Hilt => "hilt",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The framework's compiler rejects the code
    Correctness,
    /// Compiles, but works against the framework
    Usability,
    Performance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Correctness => "correctness",
            Category::Usability => "usability",
            Category::Performance => "performance",
        }
    }
}

const DAGGER_DOCS: &str = "https://dagger.dev/dev-guide/";
const ANVIL_DOCS: &str = "https://github.com/square/anvil";
const HILT_DOCS: &str = "https://dagger.dev/hilt/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Issue {
    // Dagger
    BindsMustBeAbstract,
    BindsTypeMismatch,
    BindsWrongParameterCount,
    MissingModuleAnnotation,
    MultipleScopes,
    ProvidesMethodShouldBeStatic,
    ComponentMustBeAbstract,
    InvalidComponentMethod,
    ScopedWithoutInjectConstructor,
    ConstructorInjectionOverFieldInjection,
    ConstructorInjectionOverProvidesMethod,
    BindsOverProvides,

    // Anvil
    AnvilJavaUsage,
    ContributesBindingMustHaveSuper,
    MissingContributesBinding,
    MissingContributesTo,

    // Hilt
    MissingAndroidEntryPoint,
    MissingHiltAndroidApp,
    MissingHiltViewModel,
    UnnecessaryHiltViewModel,
    EntryPointMustBeInterface,
    MissingInstallIn,
}

impl Issue {
    pub const ALL: [Issue; 22] = [
        Issue::BindsMustBeAbstract,
        Issue::BindsTypeMismatch,
        Issue::BindsWrongParameterCount,
        Issue::MissingModuleAnnotation,
        Issue::MultipleScopes,
        Issue::ProvidesMethodShouldBeStatic,
        Issue::ComponentMustBeAbstract,
        Issue::InvalidComponentMethod,
        Issue::ScopedWithoutInjectConstructor,
        Issue::ConstructorInjectionOverFieldInjection,
        Issue::ConstructorInjectionOverProvidesMethod,
        Issue::BindsOverProvides,
        Issue::AnvilJavaUsage,
        Issue::ContributesBindingMustHaveSuper,
        Issue::MissingContributesBinding,
        Issue::MissingContributesTo,
        Issue::MissingAndroidEntryPoint,
        Issue::MissingHiltAndroidApp,
        Issue::MissingHiltViewModel,
        Issue::UnnecessaryHiltViewModel,
        Issue::EntryPointMustBeInterface,
        Issue::MissingInstallIn,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Issue::BindsMustBeAbstract => "BindsMustBeAbstract",
            Issue::BindsTypeMismatch => "BindsTypeMismatch",
            Issue::BindsWrongParameterCount => "BindsWrongParameterCount",
            Issue::MissingModuleAnnotation => "MissingModuleAnnotation",
            Issue::MultipleScopes => "MultipleScopes",
            Issue::ProvidesMethodShouldBeStatic => "ProvidesMethodShouldBeStatic",
            Issue::ComponentMustBeAbstract => "ComponentMustBeAbstract",
            Issue::InvalidComponentMethod => "InvalidComponentMethod",
            Issue::ScopedWithoutInjectConstructor => "ScopedWithoutInjectConstructor",
            Issue::ConstructorInjectionOverFieldInjection => {
                "ConstructorInjectionOverFieldInjection"
            }
            Issue::ConstructorInjectionOverProvidesMethod => {
                "ConstructorInjectionOverProvidesMethod"
            }
            Issue::BindsOverProvides => "BindsOverProvides",
            Issue::AnvilJavaUsage => "AnvilJavaUsage",
            Issue::ContributesBindingMustHaveSuper => "ContributesBindingMustHaveSuper",
            Issue::MissingContributesBinding => "MissingContributesBinding",
            Issue::MissingContributesTo => "MissingContributesTo",
            Issue::MissingAndroidEntryPoint => "MissingAndroidEntryPoint",
            Issue::MissingHiltAndroidApp => "MissingHiltAndroidApp",
            Issue::MissingHiltViewModel => "MissingHiltViewModel",
            Issue::UnnecessaryHiltViewModel => "UnnecessaryHiltViewModel",
            Issue::EntryPointMustBeInterface => "EntryPointMustBeInterface",
            Issue::MissingInstallIn => "MissingInstallIn",
        }
    }

    /// Look up an issue by id, ignoring case
    pub fn from_id(id: &str) -> Option<Issue> {
        Issue::ALL
            .iter()
            .copied()
            .find(|issue| issue.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn family(&self) -> Family {
        match self {
            Issue::AnvilJavaUsage
            | Issue::ContributesBindingMustHaveSuper
            | Issue::MissingContributesBinding
            | Issue::MissingContributesTo => Family::Anvil,
            Issue::MissingAndroidEntryPoint
            | Issue::MissingHiltAndroidApp
            | Issue::MissingHiltViewModel
            | Issue::UnnecessaryHiltViewModel
            | Issue::EntryPointMustBeInterface
            | Issue::MissingInstallIn => Family::Hilt,
            _ => Family::Dagger,
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Issue::BindsMustBeAbstract
            | Issue::BindsTypeMismatch
            | Issue::BindsWrongParameterCount
            | Issue::ComponentMustBeAbstract
            | Issue::InvalidComponentMethod
            | Issue::AnvilJavaUsage
            | Issue::ContributesBindingMustHaveSuper
            | Issue::EntryPointMustBeInterface => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn enabled_by_default(&self) -> bool {
        !matches!(
            self,
            Issue::ConstructorInjectionOverFieldInjection | Issue::MissingContributesTo
        )
    }

    pub fn category(&self) -> Category {
        match self.default_severity() {
            Severity::Error => Category::Correctness,
            Severity::Warning => match self {
                Issue::ProvidesMethodShouldBeStatic | Issue::BindsOverProvides => {
                    Category::Performance
                }
                Issue::MultipleScopes
                | Issue::MissingModuleAnnotation
                | Issue::ScopedWithoutInjectConstructor
                | Issue::MissingAndroidEntryPoint
                | Issue::MissingHiltAndroidApp
                | Issue::MissingHiltViewModel
                | Issue::MissingInstallIn => Category::Correctness,
                _ => Category::Usability,
            },
        }
    }

    /// 1 (lowest) to 10 (highest)
    pub fn priority(&self) -> u8 {
        match self {
            Issue::BindsMustBeAbstract
            | Issue::BindsTypeMismatch
            | Issue::BindsWrongParameterCount
            | Issue::ComponentMustBeAbstract
            | Issue::InvalidComponentMethod
            | Issue::AnvilJavaUsage
            | Issue::EntryPointMustBeInterface => 9,
            Issue::ContributesBindingMustHaveSuper => 8,
            Issue::MissingModuleAnnotation
            | Issue::MultipleScopes
            | Issue::MissingAndroidEntryPoint
            | Issue::MissingHiltAndroidApp
            | Issue::MissingHiltViewModel
            | Issue::MissingInstallIn => 7,
            Issue::ScopedWithoutInjectConstructor | Issue::UnnecessaryHiltViewModel => 6,
            Issue::ProvidesMethodShouldBeStatic | Issue::BindsOverProvides => 5,
            Issue::ConstructorInjectionOverProvidesMethod
            | Issue::MissingContributesBinding
            | Issue::MissingContributesTo => 4,
            Issue::ConstructorInjectionOverFieldInjection => 3,
        }
    }

    pub fn brief(&self) -> &'static str {
        match self {
            Issue::BindsMustBeAbstract => "@Binds method must be abstract",
            Issue::BindsTypeMismatch => "@Binds parameter is not assignable to the return type",
            Issue::BindsWrongParameterCount => "@Binds method must have exactly one parameter",
            Issue::MissingModuleAnnotation => "Binding methods declared outside a @Module",
            Issue::MultipleScopes => "More than one scope annotation",
            Issue::ProvidesMethodShouldBeStatic => "@Provides method should be static",
            Issue::ComponentMustBeAbstract => "Component must be an interface or abstract class",
            Issue::InvalidComponentMethod => "Invalid component method",
            Issue::ScopedWithoutInjectConstructor => "Scoped class without @Inject constructor",
            Issue::ConstructorInjectionOverFieldInjection => {
                "Prefer constructor injection over field injection"
            }
            Issue::ConstructorInjectionOverProvidesMethod => {
                "Prefer constructor injection over a @Provides method"
            }
            Issue::BindsOverProvides => "Prefer @Binds over @Provides",
            Issue::AnvilJavaUsage => "Anvil annotation used in Java",
            Issue::ContributesBindingMustHaveSuper => "Contributed binding has no supertype",
            Issue::MissingContributesBinding => "Injectable implementation is not contributed",
            Issue::MissingContributesTo => "Module is not contributed to a scope",
            Issue::MissingAndroidEntryPoint => "Field injection without @AndroidEntryPoint",
            Issue::MissingHiltAndroidApp => "Application without @HiltAndroidApp",
            Issue::MissingHiltViewModel => "Injected ViewModel without @HiltViewModel",
            Issue::UnnecessaryHiltViewModel => "@HiltViewModel without @Inject constructor",
            Issue::EntryPointMustBeInterface => "Entry point must be an interface",
            Issue::MissingInstallIn => "Module or entry point without @InstallIn",
        }
    }

    pub fn explanation(&self) -> String {
        let (text, docs) = match self {
            Issue::BindsMustBeAbstract => (
                "Dagger implements @Binds methods itself; a concrete @Binds method is rejected \
                 at compile time. Declare it abstract, or in an interface.",
                DAGGER_DOCS,
            ),
            Issue::BindsTypeMismatch => (
                "A @Binds method tells Dagger to satisfy its return type with its parameter, \
                 so the parameter type must be assignable to the return type. A Unit or void \
                 return type never names a binding.",
                DAGGER_DOCS,
            ),
            Issue::BindsWrongParameterCount => (
                "A @Binds method delegates one type to another and must declare exactly one \
                 parameter (a Kotlin extension receiver counts as the parameter).",
                DAGGER_DOCS,
            ),
            Issue::MissingModuleAnnotation => (
                "@Binds, @Provides, @Multibinds and @BindsOptionalOf methods are only \
                 discovered inside a class or interface annotated with @Module. Binding \
                 methods in a companion object belong to the enclosing type.",
                DAGGER_DOCS,
            ),
            Issue::MultipleScopes => (
                "A binding can only live in one scope. Dagger rejects declarations that carry \
                 more than one annotation which is itself annotated with @Scope.",
                DAGGER_DOCS,
            ),
            Issue::ProvidesMethodShouldBeStatic => (
                "Static @Provides methods let Dagger call the method without creating the \
                 module instance. In Java declare the method static; in Kotlin move it into \
                 an object or companion object.",
                DAGGER_DOCS,
            ),
            Issue::ComponentMustBeAbstract => (
                "Dagger generates the implementation of a component, so a type annotated with \
                 @Component, @Subcomponent, @MergeComponent or @MergeSubcomponent must be an \
                 interface or an abstract class.",
                DAGGER_DOCS,
            ),
            Issue::InvalidComponentMethod => (
                "Abstract component methods are either provision methods (no parameters, a \
                 non-void return type) or members-injection methods (one parameter, returning \
                 void or the parameter type). Anything else fails to compile.",
                DAGGER_DOCS,
            ),
            Issue::ScopedWithoutInjectConstructor => (
                "A scope annotation on a class only takes effect when Dagger creates the class \
                 through an @Inject constructor. Without one the annotation does nothing.",
                DAGGER_DOCS,
            ),
            Issue::ConstructorInjectionOverFieldInjection => (
                "Field injection hides dependencies and leaves objects half-initialised. Use \
                 constructor injection unless the framework instantiates the class (activities, \
                 fragments, services, views and similar lifecycle types).",
                DAGGER_DOCS,
            ),
            Issue::ConstructorInjectionOverProvidesMethod => (
                "A @Provides method that only calls a constructor duplicates what an @Inject \
                 constructor on that class would do. Annotate the constructor instead.",
                DAGGER_DOCS,
            ),
            Issue::BindsOverProvides => (
                "A @Provides method that returns its parameter, or constructs a subtype of its \
                 return type, is a type binding. @Binds declares the same thing without a \
                 generated method call.",
                DAGGER_DOCS,
            ),
            Issue::AnvilJavaUsage => (
                "Anvil is a Kotlin compiler plugin and never sees Java sources. Its annotations \
                 in Java files are silently ignored, so the contribution is lost.",
                ANVIL_DOCS,
            ),
            Issue::ContributesBindingMustHaveSuper => (
                "@ContributesBinding binds a class to its supertype. Without a supertype other \
                 than Any there is nothing to bind; use boundType = Any::class if that is \
                 really intended. Modules should use @ContributesTo instead.",
                ANVIL_DOCS,
            ),
            Issue::MissingContributesBinding => (
                "This class has an @Inject constructor and a supertype but is not contributed \
                 with @ContributesBinding or @ContributesMultibinding, so the binding to the \
                 supertype has to be written by hand.",
                ANVIL_DOCS,
            ),
            Issue::MissingContributesTo => (
                "Modules annotated with @ContributesTo are merged into every component of the \
                 scope automatically. Without it the module must be listed by hand.",
                ANVIL_DOCS,
            ),
            Issue::MissingAndroidEntryPoint => (
                "Hilt only injects fields of Android classes annotated with \
                 @AndroidEntryPoint. Without it the @Inject fields stay null.",
                HILT_DOCS,
            ),
            Issue::MissingHiltAndroidApp => (
                "Hilt needs the Application class annotated with @HiltAndroidApp to generate \
                 the application-level component.",
                HILT_DOCS,
            ),
            Issue::MissingHiltViewModel => (
                "ViewModels with an @Inject constructor must be annotated with @HiltViewModel \
                 to be created by the Hilt ViewModel factory.",
                HILT_DOCS,
            ),
            Issue::UnnecessaryHiltViewModel => (
                "@HiltViewModel requires an @Inject constructor. Without one Hilt fails to \
                 compile; remove the annotation or add the constructor.",
                HILT_DOCS,
            ),
            Issue::EntryPointMustBeInterface => (
                "@EntryPoint, @EarlyEntryPoint and @DefineComponent types must be interfaces.",
                HILT_DOCS,
            ),
            Issue::MissingInstallIn => (
                "Hilt modules and entry points must say which component they are installed in \
                 with @InstallIn. Modules contributed by Anvil are exempt.",
                HILT_DOCS,
            ),
        };
        format!("{}\n\nSee {}", text, docs)
    }

    /// Message used when a detector does not supply its own
    pub fn default_message(&self, decl: &Declaration) -> String {
        match self {
            Issue::BindsMustBeAbstract => format!("@Binds method '{}' must be abstract", decl.name),
            Issue::BindsTypeMismatch => format!(
                "@Binds method '{}' binds a parameter that is not a subtype of its return type",
                decl.name
            ),
            Issue::BindsWrongParameterCount => format!(
                "@Binds method '{}' must have exactly one parameter",
                decl.name
            ),
            Issue::MissingModuleAnnotation => format!(
                "{} '{}' declares binding methods but is not annotated with @Module",
                decl.kind.display_name(),
                decl.name
            ),
            Issue::MultipleScopes => format!(
                "{} '{}' has more than one scope annotation",
                decl.kind.display_name(),
                decl.name
            ),
            Issue::ProvidesMethodShouldBeStatic => {
                format!("@Provides method '{}' should be static", decl.name)
            }
            Issue::ComponentMustBeAbstract => format!(
                "Component '{}' must be an interface or abstract class",
                decl.name
            ),
            Issue::InvalidComponentMethod => format!(
                "'{}' is neither a provision method nor a members-injection method",
                decl.name
            ),
            Issue::ScopedWithoutInjectConstructor => format!(
                "'{}' has a scope annotation but no @Inject constructor",
                decl.name
            ),
            Issue::ConstructorInjectionOverFieldInjection => format!(
                "Prefer constructor injection over field injection for '{}'",
                decl.name
            ),
            Issue::ConstructorInjectionOverProvidesMethod => format!(
                "@Provides method '{}' only calls a constructor; use an @Inject constructor instead",
                decl.name
            ),
            Issue::BindsOverProvides => format!(
                "@Provides method '{}' can be replaced with @Binds",
                decl.name
            ),
            Issue::AnvilJavaUsage => format!(
                "Anvil annotations are not processed in Java ('{}')",
                decl.name
            ),
            Issue::ContributesBindingMustHaveSuper => format!(
                "'{}' is contributed as a binding but has no supertype to bind to",
                decl.name
            ),
            Issue::MissingContributesBinding => format!(
                "'{}' has a supertype but is not annotated with @ContributesBinding",
                decl.name
            ),
            Issue::MissingContributesTo => {
                format!("Module '{}' is not annotated with @ContributesTo", decl.name)
            }
            Issue::MissingAndroidEntryPoint => format!(
                "'{}' uses field injection but is not annotated with @AndroidEntryPoint",
                decl.name
            ),
            Issue::MissingHiltAndroidApp => format!(
                "Application '{}' is not annotated with @HiltAndroidApp",
                decl.name
            ),
            Issue::MissingHiltViewModel => format!(
                "ViewModel '{}' has an @Inject constructor but is not annotated with @HiltViewModel",
                decl.name
            ),
            Issue::UnnecessaryHiltViewModel => format!(
                "'{}' is annotated with @HiltViewModel but has no @Inject constructor",
                decl.name
            ),
            Issue::EntryPointMustBeInterface => {
                format!("Entry point '{}' must be an interface", decl.name)
            }
            Issue::MissingInstallIn => format!(
                "'{}' is not annotated with @InstallIn",
                decl.name
            ),
        }
    }

    pub fn definition(&self) -> IssueDefinition {
        IssueDefinition {
            id: self.id(),
            brief: self.brief(),
            explanation: self.explanation(),
            category: self.category(),
            priority: self.priority(),
            severity: self.default_severity(),
            enabled_by_default: self.enabled_by_default(),
            family: self.family(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Static description of an issue, as exposed by the registries
#[derive(Debug, Clone, Serialize)]
pub struct IssueDefinition {
    pub id: &'static str,
    pub brief: &'static str,
    pub explanation: String,
    pub category: Category,
    pub priority: u8,
    pub severity: Severity,
    pub enabled_by_default: bool,
    pub family: Family,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_round_trip() {
        let ids: HashSet<_> = Issue::ALL.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), Issue::ALL.len());
        for issue in Issue::ALL {
            assert_eq!(Issue::from_id(issue.id()), Some(issue));
        }
        assert_eq!(
            Issue::from_id("bindsmustbeabstract"),
            Some(Issue::BindsMustBeAbstract)
        );
        assert_eq!(Issue::from_id("NoSuchIssue"), None);
    }

    #[test]
    fn test_compiler_failures_are_errors() {
        for issue in [
            Issue::BindsMustBeAbstract,
            Issue::BindsTypeMismatch,
            Issue::ComponentMustBeAbstract,
            Issue::InvalidComponentMethod,
            Issue::EntryPointMustBeInterface,
        ] {
            assert_eq!(issue.default_severity(), Severity::Error);
            assert_eq!(issue.category(), Category::Correctness);
        }
        assert_eq!(Issue::BindsOverProvides.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_disabled_by_default() {
        let disabled: Vec<_> = Issue::ALL
            .iter()
            .filter(|i| !i.enabled_by_default())
            .collect();
        assert_eq!(
            disabled,
            vec![
                &Issue::ConstructorInjectionOverFieldInjection,
                &Issue::MissingContributesTo
            ]
        );
    }

    #[test]
    fn test_explanations_link_documentation() {
        for issue in Issue::ALL {
            let explanation = issue.explanation();
            assert!(explanation.contains("https://"), "{}", issue);
            assert!((1..=10).contains(&issue.priority()));
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
    }
}
