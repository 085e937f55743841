// Cursor theme discovery: a theme arrives either as a directory tree or as
// a zip archive of one.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Root of a cursor theme. Zip archives are extracted into a scratch
/// directory that lives exactly as long as this value.
pub enum ThemeSource {
    Dir(PathBuf),
    Zip { root: PathBuf, _scratch: TempDir },
}

impl ThemeSource {
    /// Open a theme directory in place, or extract a `.zip` of one.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(ThemeSource::Dir(path.to_path_buf()));
        }

        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if path.is_file() && is_zip {
            let scratch = TempDir::new().context("failed to create scratch directory")?;
            let file = fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let mut archive = ZipArchive::new(file)
                .with_context(|| format!("failed to read zip archive {}", path.display()))?;
            archive
                .extract(scratch.path())
                .with_context(|| format!("failed to extract {}", path.display()))?;
            return Ok(ThemeSource::Zip {
                root: scratch.path().to_path_buf(),
                _scratch: scratch,
            });
        }

        bail!("{} is neither a directory nor a zip archive", path.display());
    }

    pub fn root(&self) -> &Path {
        match self {
            ThemeSource::Dir(path) => path,
            ThemeSource::Zip { root, .. } => root,
        }
    }
}

/// Collect candidate cursor files under a theme root: regular files without
/// an extension whose first bytes carry the XCursor magic. Sorted by
/// lowercased file name so sheet order is stable across filesystems.
pub fn find_cursor_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_none() && has_cursor_magic(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort_by_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(files)
}

fn has_cursor_magic(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    match fs::File::open(path) {
        Ok(mut file) => file.read_exact(&mut magic).is_ok() && magic == *b"Xcur",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn fake_cursor_bytes() -> Vec<u8> {
        let mut data = b"Xcur".to_vec();
        data.extend_from_slice(&[0u8; 12]);
        data
    }

    #[test]
    fn test_find_skips_non_cursor_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("left_ptr"), fake_cursor_bytes()).unwrap();
        fs::write(temp.path().join("index.theme"), b"[Icon Theme]").unwrap();
        fs::write(temp.path().join("notes"), b"plain text").unwrap();
        fs::create_dir(temp.path().join("cursors")).unwrap();
        fs::write(temp.path().join("cursors").join("wait"), fake_cursor_bytes()).unwrap();

        let files = find_cursor_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["left_ptr", "wait"]);
    }

    #[test]
    fn test_ordering_ignores_case() {
        let temp = TempDir::new().unwrap();
        for name in ["Zoom", "arrow", "Move"] {
            fs::write(temp.path().join(name), fake_cursor_bytes()).unwrap();
        }

        let files = find_cursor_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["arrow", "Move", "Zoom"]);
    }

    #[test]
    fn test_open_rejects_other_files() {
        let temp = TempDir::new().unwrap();
        let stray = temp.path().join("theme.tar");
        fs::write(&stray, b"not a theme").unwrap();

        assert!(ThemeSource::open(&stray).is_err());
        assert!(ThemeSource::open(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_zip_source_extracts() {
        let temp = TempDir::new().unwrap();
        let zip_path = temp.path().join("theme.zip");

        let file = fs::File::create(&zip_path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("theme/cursors/left_ptr", options).unwrap();
        zip.write_all(&fake_cursor_bytes()).unwrap();
        zip.start_file("theme/index.theme", options).unwrap();
        zip.write_all(b"[Icon Theme]").unwrap();
        zip.finish().unwrap();

        let source = ThemeSource::open(&zip_path).unwrap();
        let files = find_cursor_files(source.root()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("theme/cursors/left_ptr"));
    }
}
