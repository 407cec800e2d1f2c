use std::{
    borrow::Cow,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::{application::data::AmbiguityPolicy, ext::BestEffortPathExt};

const HOST_CONFIG_FILE_NAME: &str = "dirfind.yaml";

fn get_host_config_path(root: &Path) -> PathBuf {
    root.join(HOST_CONFIG_FILE_NAME)
}

/// Shell settings read from `dirfind.yaml` in the workspace root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    pub ambiguity: AmbiguityPolicy,
}

impl HostConfig {
    pub async fn read(root: &Path) -> Result<Self, HostConfigError> {
        Self::from_path(get_host_config_path(root)).await
    }

    /// Reads the config at `path`. A missing file means defaults.
    pub async fn from_path(path: PathBuf) -> Result<Self, HostConfigError> {
        debug!("Opening host config: {}", path.best_effort_path_display());
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No host config found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).context(ReadSnafu {
                    file_path: path.best_effort_path_display(),
                });
            }
        };

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_ambiguity(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<AmbiguityPolicy, HostConfigError> {
        let Some(value) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("ambiguity"))))
        else {
            return Ok(AmbiguityPolicy::default());
        };

        let raw = value.as_str().ok_or(HostConfigError::AmbiguityNotString)?;
        AmbiguityPolicy::from_str(raw, true).map_err(|_| HostConfigError::UnknownAmbiguity {
            value: raw.to_string(),
        })
    }
}

impl TryFrom<&str> for HostConfig {
    type Error = HostConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents =
            Yaml::load_from_str(contents).map_err(|e| HostConfigError::ParseError { source: e })?;
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };

        let top_level = document
            .as_mapping()
            .ok_or(HostConfigError::TopLevelNotMap)?;

        Ok(HostConfig {
            ambiguity: Self::parse_ambiguity(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum HostConfigError {
    #[snafu(display("Failed to read the host config: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Host config is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the host config"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of host config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'ambiguity' should be a string"))]
    AmbiguityNotString,
    #[snafu(display(
        "Unknown ambiguity policy '{}', expected prompt, first or abort",
        value
    ))]
    UnknownAmbiguity { value: String },
}
