use crate::core::Storage;
use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // The handle is flushed here and closed on drop, on success or error.
        let mut writer = BufWriter::new(File::create(&full_path)?);
        writer.write_all(data)?;
        writer.flush()?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("alldata.txt", b"first version\n").unwrap();
        let path = storage.write_file("alldata.txt", b"second\n").unwrap();

        assert_eq!(path, temp_dir.path().join("alldata.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "second\n");
    }

    #[test]
    fn test_write_file_creates_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested/output");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        let path = storage.write_file("students.csv", b"a,b\n").unwrap();
        assert!(path.exists());
    }
}
