use crate::navigation::Candidate;

/// Picks one of several ambiguous matches.
pub trait Chooser {
    /// Index into `candidates` of the chosen match, or `None` to abort.
    async fn choose(&mut self, candidates: &[Candidate]) -> Option<usize>;
}

/// Always takes the first match in discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    async fn choose(&mut self, candidates: &[Candidate]) -> Option<usize> {
        if candidates.is_empty() { None } else { Some(0) }
    }
}

/// Refuses to choose, so ambiguous queries abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortChooser;

impl Chooser for AbortChooser {
    async fn choose(&mut self, _candidates: &[Candidate]) -> Option<usize> {
        None
    }
}
