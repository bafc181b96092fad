use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid device address: {0}")]
    InvalidAddress(String),
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
