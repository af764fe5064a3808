use std::fs;
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::Report;
use crate::format::ArchiveFormat;
use crate::sanitize::sanitize_entry_path;

pub(super) fn extract_zip<R: Read + Seek>(reader: R, dest: &Path) -> Result<Report> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|_| Error::Corrupted)?;
    let mut entries = 0u64;
    let mut bytes = 0u64;

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|_| Error::Corrupted)?;
        let raw_path = file.enclosed_name().ok_or(Error::InvalidPath)?;
        let out_path = sanitize_entry_path(&raw_path, dest)?;

        if file.is_dir() {
            fs::create_dir_all(&out_path).map_err(|source| Error::ExtractionFailed {
                path: out_path.clone(),
                source,
            })?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|source| Error::ExtractionFailed {
                    path: out_path.clone(),
                    source,
                })?;
            }
            let mut out = fs::File::create(&out_path).map_err(|source| Error::ExtractionFailed {
                path: out_path.clone(),
                source,
            })?;
            bytes += io::copy(&mut file, &mut out).map_err(|source| Error::ExtractionFailed {
                path: out_path.clone(),
                source,
            })?;

            #[cfg(unix)]
            restore_mode(&out_path, file.unix_mode()).map_err(|source| {
                Error::ExtractionFailed {
                    path: out_path.clone(),
                    source,
                }
            })?;
        }
        entries += 1;
    }

    Ok(Report {
        format: ArchiveFormat::Zip,
        entries,
        bytes,
    })
}

// Zip entries from unix hosts carry a mode; keep the exec bits so
// extracted scripts stay runnable.
#[cfg(unix)]
fn restore_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode
        && mode & 0o111 != 0
    {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))?;
    }
    Ok(())
}
