use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to reach the quotation server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The quotation server did not answer within {0:?}")]
    Timeout(Duration),

    #[error("The quotation server answered with status {0}")]
    Status(StatusCode),

    #[error("Failed to decode the quotation: {0}")]
    Decode(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
