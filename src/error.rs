//! Typed error taxonomy for the core. Call sites match on variants to select
//! the failure policy from the design doc (collapse-to-solo, skip-finger,
//! surface-to-shell, etc.) instead of propagating a raw transport error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("rpc to {address} failed: {status}")]
    Rpc { address: String, status: tonic::Status },

    #[error("rpc to {address} timed out")]
    Timeout { address: String },

    #[error("lookup for key exceeded hop limit")]
    HopLimitExceeded,

    #[error("no node found for key")]
    NotFound,

    #[error("file {0:?} not found in local bucket")]
    FileNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ChordResult<T> = Result<T, ChordError>;
