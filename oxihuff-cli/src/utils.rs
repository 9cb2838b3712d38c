//! Utility functions for the CLI.

use oxihuff_core::{SessionKind, SessionStats, StatsSink};
use std::fs::{File, Metadata};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Open the encoder input, returning it with its permission bits.
///
/// Standard input cannot be rewound, so it is copied into an anonymous
/// temporary file first. Its permission bits are reported as zero.
pub fn open_seekable_input(path: Option<&Path>) -> io::Result<(File, u16)> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let permissions = permission_bits(&file.metadata()?);
            Ok((file, permissions))
        }
        None => {
            let mut staged = tempfile::tempfile()?;
            let copied = io::copy(&mut io::stdin().lock(), &mut staged)?;
            staged.seek(SeekFrom::Start(0))?;
            debug!(bytes = copied, "staged stdin in a temporary file");
            Ok((staged, 0))
        }
    }
}

/// Open the decoder input.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn io::Read>> {
    Ok(match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    })
}

/// Create the output, buffered.
pub fn create_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Refuse to write over the file being read.
///
/// Creating the output truncates it, so an input that is also the output
/// would be emptied before it is read.
pub fn ensure_distinct(input: Option<&Path>, output: Option<&Path>) -> io::Result<()> {
    let (Some(input), Some(output)) = (input, output) else {
        return Ok(());
    };
    if !output.exists() {
        return Ok(());
    }
    if std::fs::canonicalize(input)? == std::fs::canonicalize(output)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("input and output are the same file: {}", output.display()),
        ));
    }
    Ok(())
}

/// Delete the output of a failed session.
pub fn discard_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed incomplete output"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove incomplete output"),
    }
}

/// Permission bits of a file, as stored in the stream header.
#[cfg(unix)]
pub fn permission_bits(metadata: &Metadata) -> u16 {
    use std::os::unix::fs::PermissionsExt;
    (metadata.permissions().mode() & 0o7777) as u16
}

/// Permission bits of a file, as stored in the stream header.
#[cfg(not(unix))]
pub fn permission_bits(_metadata: &Metadata) -> u16 {
    0
}

/// Apply header permission bits to a file. Zero means "not recorded".
#[cfg(unix)]
pub fn apply_permissions(path: &Path, mode: u16) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if mode == 0 {
        return Ok(());
    }
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(u32::from(mode)))
}

/// Apply header permission bits to a file. Zero means "not recorded".
#[cfg(not(unix))]
pub fn apply_permissions(_path: &Path, _mode: u16) -> io::Result<()> {
    Ok(())
}

/// Prints session statistics to stderr.
pub struct StderrStats;

impl StatsSink for StderrStats {
    fn record(&mut self, kind: SessionKind, stats: &SessionStats) {
        eprint!("{}", format_stats(kind, stats));
    }
}

/// Three-line statistics summary.
pub fn format_stats(kind: SessionKind, stats: &SessionStats) -> String {
    let compressing = kind.is_compress();
    let compressed = stats.compressed_size(compressing);
    let uncompressed = stats.uncompressed_size(compressing);
    let saving = stats.space_saving(compressing);
    match kind {
        SessionKind::Compress => format!(
            "Uncompressed file size: {uncompressed} bytes\n\
             Compressed file size: {compressed} bytes\n\
             Space saving: {saving:.2}%\n"
        ),
        SessionKind::Decompress => format!(
            "Compressed file size: {compressed} bytes\n\
             Decompressed file size: {uncompressed} bytes\n\
             Space saving: {saving:.2}%\n"
        ),
    }
}
