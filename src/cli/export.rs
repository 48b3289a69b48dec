use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::api::endpoints::EXPORT_FILENAME;
use crate::core::outcome::Payload;
use crate::insights::text::Rendered;

/// Writes an export payload to `dir/my-learning-data.json`, replacing any
/// earlier export. JSON payloads are pretty-printed.
pub fn save_export(dir: &Path, payload: &Payload) -> io::Result<PathBuf> {
    let bytes = match payload {
        Payload::Binary(bytes) => bytes.clone(),
        Payload::Json(value) => serde_json::to_vec_pretty(value)?,
    };
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILENAME);
    let tmp = dir.join(format!("{EXPORT_FILENAME}.tmp"));
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, &path)?;
    info!("Export saved to {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Saves the export and describes where it went.
pub fn render(dir: &Path, payload: &Payload) -> Rendered {
    let path = save_export(dir, payload).map_err(|e| format!("could not save export: {e}"))?;
    Ok(vec![format!("Saved your learning data to {}", path.display())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_export(dir.path(), &Payload::Binary(vec![7u8; 42])).unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("my-learning-data.json"));
        assert_eq!(fs::read(&path).unwrap().len(), 42);
        assert!(!dir.path().join("my-learning-data.json.tmp").exists());
    }

    #[test]
    fn test_save_export_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let path = save_export(&nested, &Payload::Json(serde_json::json!({"a": 1}))).unwrap();
        assert!(path.starts_with(&nested));
    }
}
