use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Validate an archive entry path and resolve it under `base`.
///
/// Rejects absolute paths and any path whose `..` components would climb
/// out of the destination. Returns the full on-disk path for the entry.
pub fn sanitize_entry_path(entry: &Path, base: &Path) -> Result<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in entry.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(Error::PathEscape {
                    entry: entry.to_path_buf(),
                    resolved: entry.to_path_buf(),
                });
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(Error::PathEscape {
                        entry: entry.to_path_buf(),
                        resolved: base.to_path_buf(),
                    });
                }
            }
            Component::Normal(part) => parts.push(part),
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath);
    }

    let resolved = base.join(parts.iter().collect::<PathBuf>());
    if !resolved.starts_with(base) {
        return Err(Error::PathEscape {
            entry: entry.to_path_buf(),
            resolved,
        });
    }

    Ok(resolved)
}
