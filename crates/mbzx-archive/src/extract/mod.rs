use std::io::{Read, Seek};
use std::path::Path;

use crate::error::Result;
use crate::format::ArchiveFormat;

mod gzip;
mod tar;
mod zip;

/// Summary of one extraction run.
#[derive(Clone, Copy, Debug)]
pub struct Report {
    pub format: ArchiveFormat,
    pub entries: u64,
    pub bytes: u64,
}

/// Extract a probed archive into `dest`.
///
/// `dest` must already exist and be empty; the caller owns its lifecycle.
/// The raw-gzip branch names its single output after `dest`'s final
/// component (`<base>_decompressed`).
pub fn extract<R: Read + Seek>(reader: R, format: ArchiveFormat, dest: &Path) -> Result<Report> {
    match format {
        ArchiveFormat::Zip => zip::extract_zip(reader, dest),
        ArchiveFormat::Tar(codec) => tar::extract_tar(reader, codec, dest),
        ArchiveFormat::Gzip => gzip::extract_gzip(reader, dest),
    }
}
