use std::io;

use thiserror::Error;

use crate::result::ConversionFailure;

/// Returned when a conversion was cancelled before it could finish.
///
/// Work already done stays on disk; no report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("conversion was cancelled")]
pub struct Cancelled;

/// Why the pipeline stopped early.
#[derive(Debug)]
pub(crate) enum Abort {
  Failed(ConversionFailure),
  Cancelled(Cancelled),
}

impl From<ConversionFailure> for Abort {
  fn from(failure: ConversionFailure) -> Self {
    Self::Failed(failure)
  }
}

impl From<Cancelled> for Abort {
  fn from(cancelled: Cancelled) -> Self {
    Self::Cancelled(cancelled)
  }
}

impl From<io::Error> for Abort {
  fn from(err: io::Error) -> Self {
    Self::Failed(err.into())
  }
}

impl From<fs_extra::error::Error> for ConversionFailure {
  fn from(err: fs_extra::error::Error) -> Self {
    use fs_extra::error::ErrorKind;

    let message = err.to_string();
    match err.kind {
      ErrorKind::Io(io_err) => io_err.into(),
      ErrorKind::PermissionDenied => {
        Self::SecurityErrorOccurred(io::Error::new(
          io::ErrorKind::PermissionDenied,
          message,
        ))
      },
      ErrorKind::NotFound => {
        Self::IoErrorOccurred(io::Error::new(io::ErrorKind::NotFound, message))
      },
      _ => Self::IoErrorOccurred(io::Error::other(message)),
    }
  }
}
