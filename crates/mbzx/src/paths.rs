use std::io;
use std::path::PathBuf;

/// Directory holding the raw `.mbz` packages, relative to the install root.
pub const SOURCE_DIR: &str = "raw-mbz-files";

/// Root for per-course extraction folders, relative to the install root.
pub const DEST_DIR: &str = "courses-extracted";

/// Suffix of candidate backup files listed in error output.
pub const MBZ_EXT: &str = "mbz";

/// Install root the fixed directories are resolved against.
pub fn install_root() -> io::Result<PathBuf> {
    std::env::current_dir()
}
