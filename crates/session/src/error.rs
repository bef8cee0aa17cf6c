use thiserror::Error;

use memberhub_core::ConfigError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn session monitor worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("session monitor worker has stopped")]
    WorkerGone,
}
