//! Fix application: picks one fix per finding and rewrites the files

mod applier;
mod editor;

pub use applier::{AutoChooser, FixApplier, FixChooser, FixSummary, PromptChooser};
pub use editor::{EditOutcome, FileEditor};
