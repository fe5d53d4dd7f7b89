use crate::core::{Result, Storage};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    /// Overwrites any existing file; returns the full path written.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_creates_parents_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        storage.write_file("nested/out.json", b"first").await.unwrap();
        let written = storage.write_file("nested/out.json", b"[]").await.unwrap();

        assert!(written.ends_with("out.json"));
        let content = fs::read_to_string(temp_dir.path().join("nested/out.json")).unwrap();
        assert_eq!(content, "[]");
    }
}
