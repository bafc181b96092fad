use thiserror::Error;

/// Error type for controller management operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// The runtime thread could not be spawned.
    #[error("Runtime thread failed: {0}")]
    Thread(#[from] std::io::Error),
}

/// Convenient result alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
