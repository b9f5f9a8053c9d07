//! Destination files: validation, conflict handling, temp file and finalize.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use super::request::{ConflictAction, DownloadError};

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Upper bound on `name (n).ext` candidates tried before giving up.
const MAX_UNIQUIFY: u32 = 10_000;

/// Path for the temp file: appends `.part` to the final path (e.g. `file.iso` → `file.iso.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// A destination must be a plain relative path that stays under the download root.
pub fn validate_destination(destination: &Path) -> Result<(), DownloadError> {
    let mut has_name = false;
    for component in destination.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            _ => {
                return Err(DownloadError::InvalidFilename(
                    destination.display().to_string(),
                ))
            }
        }
    }
    if !has_name {
        return Err(DownloadError::InvalidFilename(destination.display().to_string()));
    }
    Ok(())
}

/// `n`-th alternative for `path`: `dir/name (n).ext`.
pub fn numbered_path(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    };
    path.with_file_name(name)
}

/// Claims the destination file and returns its path.
///
/// Uniquify creates the first free candidate with create-new semantics, so
/// concurrent downloads of the same filename each get their own name.
/// Overwrite claims `path` as is.
pub fn claim(path: &Path, conflict: ConflictAction) -> io::Result<PathBuf> {
    match conflict {
        ConflictAction::Overwrite => {
            File::create(path)?;
            Ok(path.to_path_buf())
        }
        ConflictAction::Uniquify => {
            for n in 0..MAX_UNIQUIFY {
                let candidate = if n == 0 {
                    path.to_path_buf()
                } else {
                    numbered_path(path, n)
                };
                match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                    Ok(_) => return Ok(candidate),
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                    Err(e) => return Err(e),
                }
            }
            Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("no free name for {}", path.display()),
            ))
        }
    }
}

/// Rename the finished temp file over the claimed destination.
pub fn finalize(temp: &Path, final_path: &Path) -> io::Result<()> {
    std::fs::rename(temp, final_path)
}

/// Best-effort removal of the temp file and the claimed destination after a failure.
pub fn discard(temp: &Path, claimed: &Path) {
    for path in [temp, claimed] {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed partial download"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), "could not remove: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("MyParts/widget.stp"));
        assert_eq!(p, Path::new("MyParts/widget.stp.part"));
    }

    #[test]
    fn numbered_paths() {
        assert_eq!(
            numbered_path(Path::new("d/widget.stp"), 1),
            Path::new("d/widget (1).stp")
        );
        assert_eq!(numbered_path(Path::new("d/README"), 2), Path::new("d/README (2)"));
        assert_eq!(numbered_path(Path::new("d/.hidden"), 1), Path::new("d/.hidden (1)"));
    }

    #[test]
    fn destination_validation() {
        assert!(validate_destination(Path::new("MyParts/widget.stp")).is_ok());
        assert!(validate_destination(Path::new("a/b/c.txt")).is_ok());
        for bad in ["/etc/passwd", "MyParts/..", "../x", "", "."] {
            assert!(
                matches!(
                    validate_destination(Path::new(bad)),
                    Err(DownloadError::InvalidFilename(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn uniquify_never_reuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("widget.stp");
        std::fs::write(&target, b"old").unwrap();

        let first = claim(&target, ConflictAction::Uniquify).unwrap();
        let second = claim(&target, ConflictAction::Uniquify).unwrap();
        assert_eq!(first, dir.path().join("widget (1).stp"));
        assert_eq!(second, dir.path().join("widget (2).stp"));
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
    }

    #[test]
    fn overwrite_claims_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("widget.stp");
        std::fs::write(&target, b"old").unwrap();
        assert_eq!(claim(&target, ConflictAction::Overwrite).unwrap(), target);
        assert!(std::fs::read(&target).unwrap().is_empty());
    }

    #[test]
    fn finalize_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        let claimed = claim(&target, ConflictAction::Uniquify).unwrap();
        let tmp = temp_path(&claimed);
        std::fs::write(&tmp, b"body").unwrap();
        finalize(&tmp, &claimed).unwrap();
        assert!(!tmp.exists());
        assert_eq!(std::fs::read(&claimed).unwrap(), b"body");

        let other = claim(&target, ConflictAction::Uniquify).unwrap();
        let other_tmp = temp_path(&other);
        std::fs::write(&other_tmp, b"partial").unwrap();
        discard(&other_tmp, &other);
        assert!(!other.exists() && !other_tmp.exists());
    }
}
