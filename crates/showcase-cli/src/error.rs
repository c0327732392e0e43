//! Top-level error type of the previewer.

use thiserror::Error;

use showcase::ShowcaseError;

use crate::{config::ConfigError, scenario::ScenarioError};

/// Errors returned by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Showcase(#[from] ShowcaseError),
}
