//! Annotation registry
//!
//! One closed alias set per DI concept. Rules always ask for a [`Concept`]
//! and never compare against a single hard-coded annotation name, so the
//! Dagger, `javax.inject`/`jakarta.inject`, Anvil and Hilt spellings of a
//! concept are recognised everywhere at once.

/// A DI concept that one or more annotations realise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concept {
    Inject,
    /// Constructor injection with runtime parameters from a factory
    AssistedInject,
    Binds,
    Provides,
    Multibinds,
    BindsOptionalOf,
    Module,
    /// Meta-annotation that turns an annotation into a scope
    ScopeMarker,
    /// Scopes from libraries whose declarations are only available as binaries
    KnownScope,
    /// Component-like types whose implementation is generated
    Component,
    Subcomponent,
    /// Every Anvil annotation
    Anvil,
    AnvilBinding,
    AnvilModule,
    HiltEntryPoint,
    HiltDefineComponent,
    HiltInstallIn,
    /// Opts a Hilt module out of the `@InstallIn` requirement
    HiltDisableInstallInCheck,
    HiltAndroidEntryPoint,
    HiltAndroidApp,
    HiltViewModel,
    Suppress,
}

const INJECT: &[&str] = &["javax.inject.Inject", "jakarta.inject.Inject"];
const ASSISTED_INJECT: &[&str] = &["dagger.assisted.AssistedInject"];
const BINDS: &[&str] = &["dagger.Binds"];
const PROVIDES: &[&str] = &["dagger.Provides"];
const MULTIBINDS: &[&str] = &["dagger.multibindings.Multibinds"];
const BINDS_OPTIONAL_OF: &[&str] = &["dagger.BindsOptionalOf"];
const MODULE: &[&str] = &["dagger.Module"];
const SCOPE_MARKER: &[&str] = &["javax.inject.Scope", "jakarta.inject.Scope"];
const KNOWN_SCOPE: &[&str] = &[
    "javax.inject.Singleton",
    "jakarta.inject.Singleton",
    "dagger.Reusable",
    "com.squareup.anvil.annotations.optional.SingleIn",
    "dagger.hilt.android.scopes.ActivityScoped",
    "dagger.hilt.android.scopes.ActivityRetainedScoped",
    "dagger.hilt.android.scopes.FragmentScoped",
    "dagger.hilt.android.scopes.ServiceScoped",
    "dagger.hilt.android.scopes.ViewScoped",
    "dagger.hilt.android.scopes.ViewModelScoped",
];
const COMPONENT: &[&str] = &[
    "dagger.Component",
    "dagger.Subcomponent",
    "com.squareup.anvil.annotations.MergeComponent",
    "com.squareup.anvil.annotations.MergeSubcomponent",
];
const SUBCOMPONENT: &[&str] = &[
    "dagger.Subcomponent",
    "com.squareup.anvil.annotations.MergeSubcomponent",
    "com.squareup.anvil.annotations.ContributesSubcomponent",
];
const ANVIL: &[&str] = &[
    "com.squareup.anvil.annotations.ContributesTo",
    "com.squareup.anvil.annotations.ContributesBinding",
    "com.squareup.anvil.annotations.ContributesMultibinding",
    "com.squareup.anvil.annotations.ContributesSubcomponent",
    "com.squareup.anvil.annotations.MergeComponent",
    "com.squareup.anvil.annotations.MergeSubcomponent",
    "com.squareup.anvil.annotations.compat.MergeModules",
];
const ANVIL_BINDING: &[&str] = &[
    "com.squareup.anvil.annotations.ContributesBinding",
    "com.squareup.anvil.annotations.ContributesMultibinding",
];
const ANVIL_MODULE: &[&str] = &["com.squareup.anvil.annotations.ContributesTo"];
const HILT_ENTRY_POINT: &[&str] = &["dagger.hilt.EntryPoint", "dagger.hilt.android.EarlyEntryPoint"];
const HILT_DEFINE_COMPONENT: &[&str] = &["dagger.hilt.DefineComponent"];
const HILT_INSTALL_IN: &[&str] = &["dagger.hilt.InstallIn", "dagger.hilt.testing.TestInstallIn"];
const HILT_DISABLE_INSTALL_IN_CHECK: &[&str] = &["dagger.hilt.migration.DisableInstallInCheck"];
const HILT_ANDROID_ENTRY_POINT: &[&str] = &["dagger.hilt.android.AndroidEntryPoint"];
const HILT_ANDROID_APP: &[&str] = &["dagger.hilt.android.HiltAndroidApp"];
const HILT_VIEW_MODEL: &[&str] = &["dagger.hilt.android.lifecycle.HiltViewModel"];
const SUPPRESS: &[&str] = &["kotlin.Suppress", "java.lang.SuppressWarnings"];

impl Concept {
    pub const ALL: [Concept; 22] = [
        Concept::Inject,
        Concept::AssistedInject,
        Concept::Binds,
        Concept::Provides,
        Concept::Multibinds,
        Concept::BindsOptionalOf,
        Concept::Module,
        Concept::ScopeMarker,
        Concept::KnownScope,
        Concept::Component,
        Concept::Subcomponent,
        Concept::Anvil,
        Concept::AnvilBinding,
        Concept::AnvilModule,
        Concept::HiltEntryPoint,
        Concept::HiltDefineComponent,
        Concept::HiltInstallIn,
        Concept::HiltDisableInstallInCheck,
        Concept::HiltAndroidEntryPoint,
        Concept::HiltAndroidApp,
        Concept::HiltViewModel,
        Concept::Suppress,
    ];

    /// Qualified names of every annotation realising this concept
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Concept::Inject => INJECT,
            Concept::AssistedInject => ASSISTED_INJECT,
            Concept::Binds => BINDS,
            Concept::Provides => PROVIDES,
            Concept::Multibinds => MULTIBINDS,
            Concept::BindsOptionalOf => BINDS_OPTIONAL_OF,
            Concept::Module => MODULE,
            Concept::ScopeMarker => SCOPE_MARKER,
            Concept::KnownScope => KNOWN_SCOPE,
            Concept::Component => COMPONENT,
            Concept::Subcomponent => SUBCOMPONENT,
            Concept::Anvil => ANVIL,
            Concept::AnvilBinding => ANVIL_BINDING,
            Concept::AnvilModule => ANVIL_MODULE,
            Concept::HiltEntryPoint => HILT_ENTRY_POINT,
            Concept::HiltDefineComponent => HILT_DEFINE_COMPONENT,
            Concept::HiltInstallIn => HILT_INSTALL_IN,
            Concept::HiltDisableInstallInCheck => HILT_DISABLE_INSTALL_IN_CHECK,
            Concept::HiltAndroidEntryPoint => HILT_ANDROID_ENTRY_POINT,
            Concept::HiltAndroidApp => HILT_ANDROID_APP,
            Concept::HiltViewModel => HILT_VIEW_MODEL,
            Concept::Suppress => SUPPRESS,
        }
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.aliases().contains(&qualified_name)
    }
}

/// Methods that only make sense inside a `@Module`
pub const MODULE_METHODS: &[Concept] = &[
    Concept::Binds,
    Concept::Provides,
    Concept::Multibinds,
    Concept::BindsOptionalOf,
];

/// Annotations a fix may add, by qualified name
pub mod added {
    pub const MODULE: &str = "dagger.Module";
    pub const CONTRIBUTES_TO: &str = "com.squareup.anvil.annotations.ContributesTo";
    pub const CONTRIBUTES_BINDING: &str = "com.squareup.anvil.annotations.ContributesBinding";
    pub const CONTRIBUTES_MULTIBINDING: &str =
        "com.squareup.anvil.annotations.ContributesMultibinding";
    pub const ANDROID_ENTRY_POINT: &str = "dagger.hilt.android.AndroidEntryPoint";
    pub const HILT_ANDROID_APP: &str = "dagger.hilt.android.HiltAndroidApp";
    pub const HILT_VIEW_MODEL: &str = "dagger.hilt.android.lifecycle.HiltViewModel";
    pub const INSTALL_IN: &str = "dagger.hilt.InstallIn";
    pub const SINGLETON_COMPONENT: &str = "dagger.hilt.components.SingletonComponent";
}

/// Lifecycle classes Hilt can inject with `@AndroidEntryPoint`
pub const HILT_ENTRY_POINT_BASES: &[&str] = &[
    "androidx.activity.ComponentActivity",
    "androidx.fragment.app.Fragment",
    "android.view.View",
    "android.app.Service",
    "android.content.BroadcastReceiver",
];

pub const APPLICATION_BASE: &str = "android.app.Application";

pub const VIEW_MODEL_BASE: &str = "androidx.lifecycle.ViewModel";

/// Framework-instantiated classes where field injection is the only option
pub const FIELD_INJECTION_ALLOWED_ANDROIDX: &[&str] = &[
    "android.app.Activity",
    "android.app.Fragment",
    "android.app.Service",
    "android.content.BroadcastReceiver",
    "android.content.ContentProvider",
    "android.app.Application",
    "android.view.View",
    "androidx.fragment.app.Fragment",
];

/// Same as [`FIELD_INJECTION_ALLOWED_ANDROIDX`] for the support library
pub const FIELD_INJECTION_ALLOWED_SUPPORT: &[&str] = &[
    "android.app.Activity",
    "android.app.Fragment",
    "android.app.Service",
    "android.content.BroadcastReceiver",
    "android.content.ContentProvider",
    "android.app.Application",
    "android.view.View",
    "android.support.v4.app.Fragment",
];

/// Every qualified name this module knows about, for name resolution
pub fn known_names() -> impl Iterator<Item = &'static str> {
    Concept::ALL
        .into_iter()
        .flat_map(|c| c.aliases().iter().copied())
        .chain(HILT_ENTRY_POINT_BASES.iter().copied())
        .chain([APPLICATION_BASE, VIEW_MODEL_BASE, added::SINGLETON_COMPONENT])
        .chain(FIELD_INJECTION_ALLOWED_ANDROIDX.iter().copied())
        .chain(FIELD_INJECTION_ALLOWED_SUPPORT.iter().copied())
}
