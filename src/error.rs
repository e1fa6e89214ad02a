// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a patch run. Nothing is written once one of these is
/// returned.
#[derive(Debug, Error)]
pub enum Error {
    /// An input file (debug dump or module document) does not exist.
    #[error("{kind} not found at {}", .path.display())]
    ResourceNotFound { kind: &'static str, path: PathBuf },

    /// The module document could not be parsed as JSON.
    #[error("malformed document {}: {source}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A tag-assignment record matched but one of its integer fields did not
    /// parse.
    #[error("malformed tag record for {record}: {field} = '{value}' is not a valid integer")]
    MalformedTagRecord {
        record: String,
        field: &'static str,
        value: String,
    },

    /// Reading or writing a file failed for a reason other than absence.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The patched document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Error::Io { path, source }
    }
}
