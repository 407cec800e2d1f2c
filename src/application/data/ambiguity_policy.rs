use clap::ValueEnum;

/// How the shell settles a query that matches several directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum AmbiguityPolicy {
    /// List the matches and ask for a number on stdin.
    #[default]
    Prompt,
    /// Take the first match in discovery order.
    First,
    /// Give up without choosing.
    Abort,
}
