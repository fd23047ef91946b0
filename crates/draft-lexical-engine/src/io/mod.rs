use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::models::draft::RawDocument;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a raw Draft document from a JSON file
pub fn read_document(path: &Path) -> Result<RawDocument, IoError> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an arbitrary JSON file (for documents carrying embedded draft
/// payloads)
pub fn read_json(path: &Path) -> Result<Value, IoError> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a converted tree as compact JSON
pub fn write_json(path: &Path, value: &Value) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    let content = serde_json::to_string(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(IoError::Io)
}

fn read_to_string(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(
            &path,
            r#"{"blocks": [{"text": "hello", "type": "unstyled"}], "entityMap": {}}"#,
        )
        .unwrap();

        let document = read_document(&path).unwrap();
        assert_eq!(document.blocks.len(), 1);
        assert_eq!(document.blocks[0].text, "hello");
    }

    #[test]
    fn test_read_document_not_found() {
        let result = read_document(Path::new("/this/path/does/not/exist.json"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_read_document_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        let result = read_document(&path);
        assert!(matches!(result, Err(IoError::Json { .. })));
    }

    #[test]
    fn test_read_document_malformed_block() {
        // A block without text is malformed, not merely empty
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, r#"{"blocks": [{"type": "unstyled"}]}"#).unwrap();

        let result = read_document(&path);
        assert!(matches!(result, Err(IoError::Json { .. })));
    }

    #[test]
    fn test_write_and_read_json_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let value = json!({"type": "root", "children": []});

        write_json(&path, &value).unwrap();
        assert_eq!(read_json(&path).unwrap(), value);
    }

    #[test]
    fn test_write_json_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.json");

        write_json(&path, &json!({})).unwrap();
        assert!(path.exists());
    }
}
