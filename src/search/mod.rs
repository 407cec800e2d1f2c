mod cancellation;
mod engine;

pub use cancellation::CancellationToken;
pub use engine::{SearchEngine, SearchError};
