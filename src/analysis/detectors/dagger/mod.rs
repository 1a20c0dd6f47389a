// Core Dagger and javax.inject rules

mod binds_method;
mod component_abstract;
mod component_method;
mod field_injection;
mod missing_module;
mod multiple_scopes;
mod provides_body;
mod scoped_without_inject;
mod static_provides;

pub use binds_method::BindsMethodDetector;
pub use component_abstract::ComponentAbstractDetector;
pub use component_method::{classify_component_method, ComponentMethodDetector, ComponentMethodShape};
pub use field_injection::FieldInjectionDetector;
pub use missing_module::MissingModuleDetector;
pub use multiple_scopes::MultipleScopesDetector;
pub use provides_body::ProvidesBodyDetector;
pub use scoped_without_inject::ScopedWithoutInjectDetector;
pub use static_provides::StaticProvidesDetector;
