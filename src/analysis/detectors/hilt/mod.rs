// Hilt rules for Android entry points, view models and modules

mod android_entry_point;
mod entry_point_interface;
mod hilt_android_app;
mod hilt_view_model;
mod install_in;

pub use android_entry_point::AndroidEntryPointDetector;
pub use entry_point_interface::EntryPointInterfaceDetector;
pub use hilt_android_app::HiltAndroidAppDetector;
pub use hilt_view_model::HiltViewModelDetector;
pub use install_in::InstallInDetector;
