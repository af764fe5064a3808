use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not determine archive format")]
    UnknownFormat,

    #[error("unsupported compression codec (rebuild with the matching feature)")]
    UnsupportedCodec,

    #[error("archive is corrupted")]
    Corrupted,

    #[error("entry path is not valid")]
    InvalidPath,

    #[error("entry '{entry}' escapes the destination: resolves to '{resolved}'")]
    PathEscape { entry: PathBuf, resolved: PathBuf },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
