//! Archive format probing and extraction for Moodle course backups.
//!
//! An `.mbz` package is one of three containers: a zip archive, a tar
//! archive (optionally compressed), or a raw gzip stream. Nothing here
//! trusts the filename; [`detect_format`] probes file signatures and the
//! extraction routines in [`extract`] handle the matched container.
//!
//! # Architecture
//!
//! - `detect.rs` - Signature-based format detection
//! - `format.rs` - Format enums and the tar decompression codec
//! - `sanitize.rs` - Entry path validation (zip-slip prevention)
//! - `extract/` - Per-format implementations

pub use detect::detect_format;
pub use error::{Error, Result};
pub use extract::{Report, extract};
pub use format::{ArchiveFormat, TarCompress};

mod detect;
mod error;
pub mod extract;
mod format;
mod sanitize;
