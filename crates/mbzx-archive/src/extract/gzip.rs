use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{Error, Result};
use crate::extract::Report;
use crate::format::ArchiveFormat;

/// Decompress a bare gzip stream into `<base>_decompressed` under `dest`.
///
/// This branch assumes no internal directory structure; a stream that
/// actually wraps several files still flattens to the one output.
pub(super) fn extract_gzip<R: Read>(reader: R, dest: &Path) -> Result<Report> {
    let stem = dest
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(Error::InvalidPath)?;
    let out_path = dest.join(format!("{stem}_decompressed"));

    let mut decoder = GzDecoder::new(reader);
    let mut out = File::create(&out_path).map_err(|source| Error::ExtractionFailed {
        path: out_path.clone(),
        source,
    })?;
    let bytes = io::copy(&mut decoder, &mut out).map_err(|source| Error::ExtractionFailed {
        path: out_path.clone(),
        source,
    })?;

    Ok(Report {
        format: ArchiveFormat::Gzip,
        entries: 1,
        bytes,
    })
}
