//! JSON file persistence shared by the credential and vault stores.
//!
//! Both stores keep their whole mapping in memory and rewrite the full
//! file after every mutation.  Writes go to a temp file in the same
//! directory and are renamed over the target, so readers never see a
//! half-written file.  Output is pretty-printed with a 4-space indent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{PassvaultError, Result};

/// Load a JSON mapping from `path`.
///
/// A missing or empty file yields `T::default()`.
pub fn read_json<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no file yet, starting empty");
        return Ok(T::default());
    }

    let data = fs::read(path)?;
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(&data).map_err(|e| {
        PassvaultError::SerializationError(format!("{}: {e}", path.display()))
    })
}

/// Write `value` as JSON to `path` **atomically**.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| PassvaultError::SerializationError(format!("{}: {e}", path.display())))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    fs::write(&tmp_path, &buf)?;

    if let Err(e) = commit(&tmp_path, path) {
        // The original error is what matters; a leftover temp file is
        // overwritten by the next save anyway.
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    tracing::debug!(path = %path.display(), bytes = buf.len(), "wrote file");

    Ok(())
}

/// Sibling temp file used while writing `path`.
///
/// It lives in the same directory so the final rename stays atomic.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Restrict the temp file to its owner and move it over `path`.
fn commit(tmp_path: &Path, path: &Path) -> Result<()> {
    // Owner-only: the file holds password and passkey digests.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_default() {
        let tmp = TempDir::new().unwrap();
        let map: IndexMap<String, String> = read_json(&tmp.path().join("nope.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn blank_file_reads_as_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        let map: IndexMap<String, String> = read_json(&path).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn write_uses_four_space_indent_and_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        let mut map = IndexMap::new();
        map.insert("zeta".to_string(), "1".to_string());
        map.insert("alpha".to_string(), "2".to_string());

        write_json(&path, &map).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"zeta\": \"1\",\n    \"alpha\": \"2\"\n}");
        assert!(!tmp.path().join(".out.json.tmp").exists());

        let back: IndexMap<String, String> = read_json(&path).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
    }

    #[test]
    fn write_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("users.json");
        write_json(&path, &IndexMap::<String, String>::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_serialization_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let result: Result<IndexMap<String, String>> = read_json(&path);
        assert!(matches!(result, Err(PassvaultError::SerializationError(_))));
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        // A non-empty directory cannot be replaced by a file.
        fs::create_dir_all(path.join("occupied")).unwrap();

        let result = write_json(&path, &IndexMap::<String, String>::new());

        assert!(matches!(result, Err(PassvaultError::Io(_))));
        assert!(!temp_path(&path).exists());
        assert!(path.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.json");
        write_json(&path, &IndexMap::<String, String>::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("/srv/vault/data.json")),
            PathBuf::from("/srv/vault/.data.json.tmp")
        );
        assert_eq!(temp_path(Path::new("data.json")), PathBuf::from("./.data.json.tmp"));
    }
}
