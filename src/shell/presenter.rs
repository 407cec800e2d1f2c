use colored::Colorize;
use supports_color::Stream;

use crate::filesystem::{Collapsible, TreeItem};
use crate::navigation::Candidate;

/// Formats what the shell shows a user.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    colors: bool,
}

impl Presenter {
    /// Colours output only when `stream`, the one the text goes to, can
    /// show them.
    pub fn detect(stream: Stream) -> Self {
        if supports_color::on(stream).is_some() {
            Self { colors: true }
        } else {
            Self::plain()
        }
    }

    pub fn plain() -> Self {
        Self { colors: false }
    }

    /// One line of a directory listing. Directories end with `/`.
    pub fn tree_item(&self, item: &TreeItem) -> String {
        match item.collapsible {
            Collapsible::Collapsed if self.colors => {
                format!("{}/", item.label).blue().bold().to_string()
            }
            Collapsible::Collapsed => format!("{}/", item.label),
            Collapsible::None => item.label.clone(),
        }
    }

    /// One numbered entry of a pick list, counted from 1.
    pub fn candidate(&self, number: usize, candidate: &Candidate) -> String {
        if self.colors {
            format!(
                "{:>3}) {}  {}",
                number,
                candidate.label.bold(),
                candidate.description.dimmed()
            )
        } else {
            format!(
                "{:>3}) {}  {}",
                number, candidate.label, candidate.description
            )
        }
    }
}
