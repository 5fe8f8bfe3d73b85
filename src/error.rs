use thiserror::Error;

use crate::core::Kind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("unknown error policy `{0}`")]
    UnknownPolicy(String),

    /// A buffer's unit width does not match the encoding it was declared as.
    #[error("{kind} uses {expected}-bit code units, buffer holds {actual}-bit units")]
    UnitMismatch { kind: Kind, expected: u32, actual: u32 },

    #[error("{len} bytes is not a whole number of {unit_bytes}-byte code units")]
    PartialUnit { len: usize, unit_bytes: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
