mod host_config;

pub use host_config::{HostConfig, HostConfigError};
