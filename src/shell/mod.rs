//! Terminal front end: what the user sees and how they pick between matches.

mod presenter;
mod prompt_chooser;

pub use presenter::Presenter;
pub use prompt_chooser::PromptChooser;
