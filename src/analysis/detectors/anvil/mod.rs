// Anvil rules. Anvil only processes Kotlin sources.

mod contributes_binding_super;
mod java_usage;
mod missing_contributes_binding;
mod missing_contributes_to;

pub use contributes_binding_super::ContributesBindingSuperDetector;
pub use java_usage::AnvilJavaUsageDetector;
pub use missing_contributes_binding::MissingContributesBindingDetector;
pub use missing_contributes_to::MissingContributesToDetector;
