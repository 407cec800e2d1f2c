use std::io::{self, Write};
use std::path::{Component, Path};

use compio::runtime::spawn;
use futures::StreamExt;
use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::data::AmbiguityPolicy;
use crate::cli::Command;
use crate::config::{HostConfig, HostConfigError};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{LocalFilesystem, NodeId, TreeEvent, TreeModel, TreeModelCreationError};
use crate::navigation::{AbortChooser, FirstChooser, NavigationError, NavigationOutcome, Navigator};
use crate::shell::{Presenter, PromptChooser};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let presenter = Presenter::detect(Stream::Stdout);
        Self::run_with_output(app_config, presenter, &mut io::stdout().lock()).await
    }

    /// Runs `app_config`, writing everything meant for stdout to `out`
    /// formatted by `presenter`.
    pub async fn run_with_output(
        app_config: RuntimeConfig,
        presenter: Presenter,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let tree = TreeModel::open(&app_config.root)
            .await
            .context(TreeSnafu)?;

        match app_config.command {
            Command::Find { name, all: true, .. } => {
                Self::find_all(Navigator::new(tree), &name, presenter, out).await
            }
            Command::Find { name, pick, .. } => {
                let host_config = HostConfig::read(tree.root())
                    .await
                    .context(HostConfigSnafu)?;
                debug!("Loaded host config: {:?}", host_config);
                let policy = pick.unwrap_or(host_config.ambiguity);

                Self::find(tree, &name, policy, out).await
            }
            Command::Ls { dir } => {
                let dir = match dir {
                    Some(dir) => {
                        ensure_inside_workspace(&dir)?;
                        tree.root().join(dir)
                    }
                    None => tree.root().clone(),
                };
                Self::list(&tree, &dir, presenter, out).await
            }
        }
    }

    async fn find(
        tree: TreeModel,
        name: &str,
        policy: AmbiguityPolicy,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let mut navigator = Navigator::new(tree);
        let mut events = navigator.subscribe();

        let token = navigator.cancellation_token();
        let prompt_token = token.clone();
        spawn(async move {
            if compio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, stopping the search");
                token.cancel();
            }
        })
        .detach();

        let outcome = match policy {
            AmbiguityPolicy::Prompt => {
                navigator
                    .navigate(name, &mut PromptChooser::stdio(prompt_token))
                    .await
            }
            AmbiguityPolicy::First => navigator.navigate(name, &mut FirstChooser).await,
            AmbiguityPolicy::Abort => navigator.navigate(name, &mut AbortChooser).await,
        }
        .context(NavigationSnafu)?;

        match outcome {
            NavigationOutcome::Revealed(_) => {}
            NavigationOutcome::NotFound { query } => {
                return DirectoryNotFoundSnafu { query }.fail();
            }
            NavigationOutcome::Aborted => {
                return SelectionAbortedSnafu { query: name }.fail();
            }
        }

        // Closing the navigator ends the event stream once it is drained.
        drop(navigator);
        while let Some(event) = events.next().await {
            match event {
                TreeEvent::Reveal(id) => {
                    writeln!(out, "{}", id.display()).context(OutputSnafu)?;
                }
                TreeEvent::Refresh => debug!("Tree refresh requested"),
            }
        }

        Ok(())
    }

    async fn find_all(
        navigator: Navigator<LocalFilesystem>,
        name: &str,
        presenter: Presenter,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let candidates = navigator.find_directories_by_name(name).await;
        if candidates.is_empty() {
            return DirectoryNotFoundSnafu { query: name }.fail();
        }

        for (index, candidate) in candidates.iter().enumerate() {
            writeln!(out, "{}", presenter.candidate(index + 1, candidate)).context(OutputSnafu)?;
        }
        Ok(())
    }

    async fn list(
        tree: &TreeModel,
        dir: &NodeId,
        presenter: Presenter,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        debug!("Listing {}", dir.best_effort_path_display());
        for node in tree.list_children(dir).await {
            let item = tree.tree_item(&node);
            if let Some(target) = &item.open_target {
                debug!("{} opens {}", item.label, target.display());
            }
            writeln!(out, "{}", presenter.tree_item(&item)).context(OutputSnafu)?;
        }
        Ok(())
    }
}

/// Accepts only paths that stay below the workspace root once joined to it.
fn ensure_inside_workspace(dir: &Path) -> Result<(), ApplicationError> {
    let escapes = dir.components().any(|component| {
        matches!(
            component,
            Component::Prefix(_) | Component::RootDir | Component::ParentDir
        )
    });
    ensure!(
        !escapes,
        OutsideWorkspaceSnafu {
            dir: dir.display().to_string()
        }
    );
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while opening the workspace"))]
    TreeError { source: TreeModelCreationError },
    #[snafu(display("Critical failure encountered while reading the host config"))]
    HostConfigError { source: HostConfigError },
    #[snafu(display("Failed to settle on a directory"))]
    NavigationError { source: NavigationError },
    #[snafu(display("Folder \"{}\" not found", query))]
    DirectoryNotFound { query: String },
    #[snafu(display("No folder chosen among the matches for \"{}\"", query))]
    SelectionAborted { query: String },
    #[snafu(display("'{}' is not a directory inside the workspace", dir))]
    OutsideWorkspace { dir: String },
    #[snafu(display("Failed to write output"))]
    OutputError { source: io::Error },
}
