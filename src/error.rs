use thiserror::Error;

use crate::picker::PickerError;
use crate::terraform::{ScanError, StateError};

/// Everything that aborts a run. The first two variants are the expected
/// operator-facing cases; `main` prints their messages to stdout. The rest
/// are rendered as errors.
#[derive(Debug, Error)]
pub enum TfpruneError {
    #[error("no terraform state found")]
    StateUnavailable(#[source] StateError),

    #[error("no resources available for removal")]
    NoCandidates,

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Picker(#[from] PickerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
