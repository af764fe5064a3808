use std::fs::{self, File};
use std::path::{Path, PathBuf};

use console::style;
use mbzx_archive::{Report, detect_format, extract};

use crate::paths::{self, MBZ_EXT};

/// Failures terminal to one extraction run. No retries, no recovery.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Source directory '{}' does not exist", .0.display())]
    SourceDirMissing(PathBuf),

    #[error("File '{filename}' not found in '{}'", source_dir.display())]
    FileNotFound {
        filename: String,
        source_dir: PathBuf,
    },

    #[error("Could not determine archive format for '{0}'")]
    UnknownFormat(String),

    #[error("could not extract '{filename}': {source}")]
    Extraction {
        filename: String,
        source: mbzx_archive::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One extraction request: a filename resolved against the fixed source
/// directory, landing under the fixed destination root.
pub struct ExtractJob {
    filename: String,
    source_dir: PathBuf,
    dest_root: PathBuf,
}

impl ExtractJob {
    pub fn new(filename: String, source_dir: PathBuf, dest_root: PathBuf) -> Self {
        Self {
            filename,
            source_dir,
            dest_root,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Run the job: locate, prepare the course folder, probe, extract.
    ///
    /// The course folder is overwritten wholesale: deleted if present,
    /// then recreated empty. A deletion failure aborts the run rather
    /// than extracting into a half-deleted folder. On `UnknownFormat`
    /// the freshly created empty folder is left in place.
    pub fn run(&self) -> Result<Report, JobError> {
        if !self.source_dir.is_dir() {
            return Err(JobError::SourceDirMissing(self.source_dir.clone()));
        }

        // Only bare filenames resolve; anything with a separator cannot
        // name a file inside the source directory.
        let not_found = || JobError::FileNotFound {
            filename: self.filename.clone(),
            source_dir: self.source_dir.clone(),
        };
        if Path::new(&self.filename).file_name() != Some(self.filename.as_ref()) {
            return Err(not_found());
        }
        let mbz_file = self.source_dir.join(&self.filename);
        if !mbz_file.is_file() {
            return Err(not_found());
        }

        let course_name = Path::new(&self.filename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.filename)
            .to_owned();
        let course_folder = self.dest_root.join(&course_name);

        println!("Extracting: {}", style(&self.filename).cyan());

        fs::create_dir_all(&self.dest_root)?;
        if course_folder.exists() {
            println!(
                "  → Removing existing folder: {}",
                style(&course_name).yellow()
            );
            fs::remove_dir_all(&course_folder)?;
        }
        fs::create_dir_all(&course_folder)?;

        let mut file = File::open(&mbz_file)?;
        let Some(format) = detect_format(&mut file)? else {
            return Err(JobError::UnknownFormat(self.filename.clone()));
        };

        let report =
            extract(file, format, &course_folder).map_err(|source| JobError::Extraction {
                filename: self.filename.clone(),
                source,
            })?;

        println!(
            "  → Extracted ({}) to: {}",
            report.format,
            style(display_path(&course_folder).display()).green()
        );
        println!("{}", style("Extraction complete!").green());
        Ok(report)
    }
}

// Show paths relative to the install root when they are under it.
fn display_path(path: &Path) -> PathBuf {
    paths::install_root()
        .ok()
        .and_then(|root| path.strip_prefix(root).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Names of `.mbz` files present in the source directory, sorted.
pub fn available_mbz(source_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(source_dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == MBZ_EXT))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

/// Print the candidate listing used by the not-found and no-argument paths.
pub fn print_available(source_dir: &Path) {
    println!("Available .mbz files:");
    let names = available_mbz(source_dir);
    if names.is_empty() {
        println!("  (none)");
    } else {
        for name in names {
            println!("  - {name}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    struct Fixture {
        _temp: TempDir,
        source: PathBuf,
        dest: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("raw-mbz-files");
        let dest = temp.path().join("courses-extracted");
        fs::create_dir(&source).unwrap();
        Fixture {
            source,
            dest,
            _temp: temp,
        }
    }

    fn write_zip_mbz(dir: &Path, name: &str) {
        let mut writer = zip::ZipWriter::new(File::create(dir.join(name)).unwrap());
        let options = SimpleFileOptions::default();
        writer.start_file("moodle_backup.xml", options).unwrap();
        writer.write_all(b"<moodle_backup/>").unwrap();
        writer.start_file("course/course.xml", options).unwrap();
        writer.write_all(b"<course/>").unwrap();
        writer.finish().unwrap();
    }

    fn job(fx: &Fixture, filename: &str) -> ExtractJob {
        ExtractJob::new(filename.into(), fx.source.clone(), fx.dest.clone())
    }

    #[test]
    fn extracts_zip_into_course_folder() {
        let fx = fixture();
        write_zip_mbz(&fx.source, "course-571.mbz");

        let report = job(&fx, "course-571.mbz").run().unwrap();
        assert_eq!(report.entries, 2);

        let folder = fx.dest.join("course-571");
        assert_eq!(
            fs::read(folder.join("moodle_backup.xml")).unwrap(),
            b"<moodle_backup/>"
        );
        assert_eq!(
            fs::read(folder.join("course/course.xml")).unwrap(),
            b"<course/>"
        );
    }

    #[test]
    fn rerun_replaces_previous_contents() {
        let fx = fixture();
        write_zip_mbz(&fx.source, "course-571.mbz");

        let folder = fx.dest.join("course-571");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("stale.txt"), b"left over").unwrap();

        job(&fx, "course-571.mbz").run().unwrap();

        assert!(!folder.join("stale.txt").exists());
        assert!(folder.join("moodle_backup.xml").exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let fx = fixture();
        write_zip_mbz(&fx.source, "course-1.mbz");
        fs::write(fx.source.join("notes.txt"), b"not a backup").unwrap();

        let err = job(&fx, "course-571.mbz").run().unwrap_err();
        assert!(matches!(err, JobError::FileNotFound { .. }));

        assert_eq!(available_mbz(&fx.source), vec!["course-1.mbz".to_string()]);
    }

    #[test]
    fn filename_with_separator_is_not_found() {
        let fx = fixture();
        let err = job(&fx, "../course-571.mbz").run().unwrap_err();
        assert!(matches!(err, JobError::FileNotFound { .. }));
    }

    #[test]
    fn missing_source_dir_fails() {
        let fx = fixture();
        fs::remove_dir(&fx.source).unwrap();

        let err = job(&fx, "course-571.mbz").run().unwrap_err();
        assert!(matches!(err, JobError::SourceDirMissing(_)));
    }

    #[test]
    fn unknown_format_leaves_empty_folder() {
        let fx = fixture();
        fs::write(fx.source.join("junk.mbz"), b"definitely not an archive").unwrap();

        let err = job(&fx, "junk.mbz").run().unwrap_err();
        assert!(matches!(err, JobError::UnknownFormat(_)));

        let folder = fx.dest.join("junk");
        assert!(folder.is_dir());
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 0);
    }

    #[test]
    fn raw_gzip_creates_decompressed_file() {
        let fx = fixture();
        let mut enc = GzEncoder::new(
            File::create(fx.source.join("blob.mbz")).unwrap(),
            Compression::default(),
        );
        enc.write_all(b"single stream payload").unwrap();
        enc.finish().unwrap();

        job(&fx, "blob.mbz").run().unwrap();

        assert_eq!(
            fs::read(fx.dest.join("blob/blob_decompressed")).unwrap(),
            b"single stream payload"
        );
    }

    #[test]
    fn available_listing_is_empty_for_empty_dir() {
        let fx = fixture();
        assert!(available_mbz(&fx.source).is_empty());
    }
}
