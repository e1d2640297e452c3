use thiserror::Error;

use tr_network::NetworkError;

#[derive(Debug, Error)]
pub enum DecideError {
    #[error("decision engine configuration error: {0}")]
    Config(String),

    #[error("malformed network snapshot: {0}")]
    Network(#[from] NetworkError),
}

pub type DecideResult<T> = Result<T, DecideError>;
