//! Turning a directory name into a single revealed directory.

mod chooser;
mod navigator;
mod resolution;

pub use chooser::{AbortChooser, Chooser, FirstChooser};
pub use navigator::{NavigationError, NavigationOutcome, Navigator};
pub use resolution::{Candidate, Resolution};
