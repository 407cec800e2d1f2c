mod ambiguity_policy;
mod log_level;

pub use ambiguity_policy::AmbiguityPolicy;
pub use log_level::LogLevel;
