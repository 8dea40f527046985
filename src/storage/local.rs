use super::Storage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct LocalStorage {
    base_path: PathBuf,
    name: String,
}

impl LocalStorage {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        let name = format!("local:{}", base_path.display());
        Ok(Self { base_path, name })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    fn write(&self, name: &str, data: &[u8]) -> io::Result<PathBuf> {
        let full_path = self.resolve(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 使用临时文件写入，然后原子重命名
        let temp_path = full_path.with_extension("tmp");
        fs::write(&temp_path, data)?;
        if let Err(e) = fs::rename(&temp_path, &full_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        Ok(full_path)
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let name = name.trim_start_matches('/').trim_start_matches('\\');
        self.base_path.join(name)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("icons")).unwrap();

        let path = storage.write("icon16.png", b"first").unwrap();
        assert_eq!(path, dir.path().join("icons").join("icon16.png"));
        assert_eq!(fs::read(&path).unwrap(), b"first");

        storage.write("icon16.png", b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // 不留下临时文件
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_resolve_strips_leading_separator() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();
        assert_eq!(
            storage.resolve("/orbit.png"),
            storage.base_path().join("orbit.png")
        );
        assert!(storage.name().starts_with("local:"));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        // base_path 是一个普通文件，写入必然失败
        let storage = LocalStorage {
            base_path: blocker,
            name: "local:blocker".into(),
        };
        assert!(storage.write("icon16.png", b"data").is_err());
    }
}
