use std::path::PathBuf;

use thiserror::Error;

/// Rejected user actions. Gateway failures never show up here.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("input is empty")]
    EmptyInput,

    #[error("a request is already in progress")]
    Busy,

    #[error("no file is loaded")]
    NoActiveFile,

    #[error("there are no notes to summarize")]
    NoNotes,

    #[error("there is no generated plan")]
    NoPlan,

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a UTF-8 text file", path.display())]
    NotUtf8 { path: PathBuf },
}
