use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::path::Path;

/// Filesystem storage. Sources are read from the path given; outputs land
/// in `base_path`, which must already exist.
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
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EtlError::SourceNotFound {
                path: path.to_string(),
            },
            _ => EtlError::IoError(e),
        })
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(name);
        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(&full_path, data).map_err(|source| EtlError::WriteFailure {
            path: full_path.display().to_string(),
            source,
        })
    }

    fn output_location(&self, name: &str) -> String {
        Path::new(&self.base_path).join(name).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap().to_string();
        let storage = LocalStorage::new(base);

        storage.write_file("report.txt", b"hello").unwrap();
        let location = storage.output_location("report.txt");
        assert_eq!(storage.read_file(&location).unwrap(), b"hello");
    }

    #[test]
    fn test_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let missing = temp_dir.path().join("nope.csv");

        let err = storage.read_file(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, EtlError::SourceNotFound { .. }));
    }

    #[test]
    fn test_missing_output_directory_is_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("does-not-exist");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        let err = storage.write_file("report.txt", b"x").unwrap_err();
        assert!(matches!(err, EtlError::WriteFailure { .. }));
    }
}
