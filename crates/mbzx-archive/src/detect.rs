use std::io::{self, Read, Seek};

use flate2::read::GzDecoder;

use crate::format::{ArchiveFormat, TarCompress};

/// One tar header block; also the upper bound on probed bytes.
const PROBE_LEN: usize = 512;

/// Probe a reader for its container format.
///
/// Detection is by signature, never by filename, and follows a fixed
/// priority: zip, then tar (plain or compressed), then raw gzip. A gzip
/// magic alone is ambiguous between a compressed tar and a bare stream,
/// so the decompressed prefix is checked for a tar header before the raw
/// branch is chosen. The reader is rewound to the start before returning.
pub fn detect_format<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let header = read_prefix(&mut *reader, PROBE_LEN)?;
    reader.rewind()?;

    let format = match header.as_slice() {
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => match read_prefix(GzDecoder::new(&mut *reader), PROBE_LEN) {
            Ok(prefix) if is_tar_header(&prefix) => Some(ArchiveFormat::Tar(TarCompress::Gzip)),
            Ok(_) => Some(ArchiveFormat::Gzip),
            // Corrupt gzip framing: no branch can handle it
            Err(_) => None,
        },
        #[cfg(feature = "xz")]
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => {
            match read_prefix(xz2::read::XzDecoder::new(&mut *reader), PROBE_LEN) {
                Ok(prefix) if is_tar_header(&prefix) => Some(ArchiveFormat::Tar(TarCompress::Xz)),
                _ => None,
            }
        }
        #[cfg(feature = "zstd")]
        [0x28, 0xB5, 0x2F, 0xFD, ..] => {
            match zstd::stream::Decoder::new(&mut *reader)
                .and_then(|d| read_prefix(d, PROBE_LEN))
            {
                Ok(prefix) if is_tar_header(&prefix) => Some(ArchiveFormat::Tar(TarCompress::Zstd)),
                _ => None,
            }
        }
        _ => {
            if is_tar_header(&header) {
                Some(ArchiveFormat::Tar(TarCompress::None))
            } else {
                None
            }
        }
    };

    reader.rewind()?;
    Ok(format)
}

/// Read up to `len` bytes, tolerating shorter inputs.
fn read_prefix<R: Read>(mut reader: R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

// Accepts both POSIX "ustar\0" and the GNU "ustar " variant.
fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= PROBE_LEN && data[257..262] == *b"ustar"
}
