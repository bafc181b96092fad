mod parse;
mod profile;

use thiserror::Error;

pub use profile::ProfileV1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid button: {0}")]
    InvalidButton(String),
    #[error("invalid action for {0}: {1}")]
    InvalidAction(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
