use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::Report;
use crate::format::{ArchiveFormat, TarCompress};
use crate::sanitize::sanitize_entry_path;

pub(super) fn extract_tar<R: Read>(reader: R, codec: TarCompress, dest: &Path) -> Result<Report> {
    let decoder = codec.decoder(reader)?;
    let mut archive = tar::Archive::new(decoder);
    let mut entries = 0u64;
    let mut bytes = 0u64;

    for entry in archive.entries().map_err(|_| Error::Corrupted)? {
        let mut entry = entry.map_err(|_| Error::Corrupted)?;
        let raw_path = entry.path().map_err(|_| Error::InvalidPath)?.into_owned();
        let out_path = sanitize_entry_path(&raw_path, dest)?;
        let size = entry.header().size().unwrap_or(0);

        // unpack_in re-validates the path and refuses escaping symlink
        // targets on top of our own check
        let unpacked = entry
            .unpack_in(dest)
            .map_err(|source| Error::ExtractionFailed {
                path: out_path.clone(),
                source,
            })?;
        if !unpacked {
            return Err(Error::PathEscape {
                entry: raw_path,
                resolved: out_path,
            });
        }

        entries += 1;
        bytes += size;
    }

    Ok(Report {
        format: ArchiveFormat::Tar(codec),
        entries,
        bytes,
    })
}
