//! Whole-file reads and atomic writes.

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure talking to the filesystem.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read the full contents of `path`.
pub fn read_all(path: &Path) -> Result<Vec<u8>, EditorError> {
    fs::read(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the contents of `path` with `bytes`.
///
/// Data goes to a sibling temporary file that is renamed over the target, so
/// readers observe either the old or the new contents. An existing file keeps
/// its permissions, and a symlink keeps pointing at the file it names.
pub fn write_all(path: &Path, bytes: &[u8]) -> Result<(), EditorError> {
    let target = resolve_symlink(path);
    let tmp = temp_sibling(&target);
    let result = write_and_sync(&tmp, bytes)
        .and_then(|()| copy_permissions(&target, &tmp))
        .and_then(|()| fs::rename(&tmp, &target));
    result.map_err(|source| {
        let _ = fs::remove_file(&tmp);
        EditorError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Decode file bytes as UTF-8, replacing invalid sequences with U+FFFD.
///
/// The flag is `true` when a replacement happened.
pub fn decode(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    let text = String::from_utf8_lossy(bytes);
    let lossy = matches!(text, Cow::Owned(_));
    (text, lossy)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// The file a symlink points at; any other path is returned as is.
fn resolve_symlink(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn copy_permissions(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::metadata(from) {
        Ok(meta) => fs::set_permissions(to, meta.permissions()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "untitled".into(), |name| name.to_string_lossy());
    path.with_file_name(format!(".{name}.platon-tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        write_all(&path, b"hello\n").unwrap();
        assert_eq!(read_all(&path).unwrap(), b"hello\n");
    }

    #[test]
    fn test_write_replaces_existing_file_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "old contents that are longer").unwrap();
        write_all(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_all(&path).unwrap_err();
        assert!(matches!(err, EditorError::Read { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("note.txt");
        let err = write_all(&path, b"x").unwrap_err();
        assert!(matches!(err, EditorError::Write { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_executable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.sh");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        write_all(&path, b"#!/bin/sh\necho hi\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink_updates_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, "old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        write_all(&link, b"new").unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_decode_valid_utf8_is_borrowed() {
        let (text, lossy) = decode("héllo".as_bytes());
        assert_eq!(text, "héllo");
        assert!(!lossy);
    }

    #[test]
    fn test_decode_invalid_utf8_replaces() {
        let (text, lossy) = decode(b"ab\xffcd");
        assert_eq!(text, "ab\u{FFFD}cd");
        assert!(lossy);
    }
}
