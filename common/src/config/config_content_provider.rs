use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::ConfigError;

pub trait ConfigContentProvider {
    /// `Ok(None)` means nothing has been stored yet.
    fn get_config_content(&self) -> Result<Option<String>, ConfigError>;
    fn set_config_content(&self, content: &str) -> Result<(), ConfigError>;
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        // Rename over the old file so a crash mid-write never leaves it truncated.
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content)?;
        if let Err(err) = std::fs::rename(&temp_path, &self.file_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(ConfigError::Io(err));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path(name: &str) -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("snake_{}_{}.yaml", name, random_number))
    }

    #[test]
    fn test_missing_file_is_none() {
        let provider = FileContentConfigProvider::new(get_temp_file_path("missing"));
        assert!(provider.get_config_content().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let path = get_temp_file_path("provider");
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("a: 1\n").unwrap();
        assert_eq!(provider.get_config_content().unwrap().as_deref(), Some("a: 1\n"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_overwrite_replaces_content_and_leaves_no_temp_file() {
        let path = get_temp_file_path("overwrite");
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("a: 1\nb: 2\n").unwrap();
        provider.set_config_content("a: 3\n").unwrap();

        assert_eq!(provider.get_config_content().unwrap().as_deref(), Some("a: 3\n"));
        assert!(!provider.temp_path().exists());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = get_temp_file_path("nested_dir");
        let path = dir.join("store.yaml");
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("x").unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
