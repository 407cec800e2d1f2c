use crate::filesystem::{Node, NodeId};

/// A match as shown to whoever picks between several of them.
///
/// Labels of competing matches are identical, so `description` carries the
/// full identifier to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub identifier: NodeId,
    pub description: String,
}

impl From<&Node> for Candidate {
    fn from(node: &Node) -> Self {
        Candidate {
            label: node.label().to_string(),
            identifier: node.id().clone(),
            description: node.id().display().to_string(),
        }
    }
}

/// Search results classified by how many targets they name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    Unique(Node),
    Ambiguous(Vec<Node>),
}

impl From<Vec<Node>> for Resolution {
    fn from(mut matches: Vec<Node>) -> Self {
        match matches.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Unique(matches.remove(0)),
            _ => Resolution::Ambiguous(matches),
        }
    }
}

impl Resolution {
    pub fn candidates(&self) -> Vec<Candidate> {
        match self {
            Resolution::NotFound => Vec::new(),
            Resolution::Unique(node) => vec![Candidate::from(node)],
            Resolution::Ambiguous(nodes) => nodes.iter().map(Candidate::from).collect(),
        }
    }
}
