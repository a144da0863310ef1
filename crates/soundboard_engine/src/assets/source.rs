//! Where asset bytes come from

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

use super::AssetError;

/// Read-only lookup of asset bytes by relative path
pub trait AssetSource {
    /// Read the whole asset at `path`
    fn read(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError>;

    /// Check whether an asset exists without reading it
    fn contains(&self, path: &str) -> bool;
}

/// Assets stored in a directory on disk
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
}

impl FileSystemSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl AssetSource for FileSystemSource {
    fn read(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        let full_path = self.resolve(path);
        log::debug!("Reading asset from: {:?}", full_path);

        match std::fs::read(&full_path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(full_path.display().to_string()))
            }
            Err(e) => Err(AssetError::Io {
                path: full_path.display().to_string(),
                source: e,
            }),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}

/// Assets held in memory, typically `include_bytes!` tables
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedSource {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from static data
    pub fn from_static(entries: &[(&str, &'static [u8])]) -> Self {
        let mut source = Self::new();
        for (path, bytes) in entries {
            source.insert_static(path, *bytes);
        }
        source
    }

    /// Add static bytes under `path`
    pub fn insert_static(&mut self, path: &str, bytes: &'static [u8]) {
        self.entries.insert(path.to_string(), Cow::Borrowed(bytes));
    }

    /// Add owned bytes under `path`
    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
        self.entries.insert(path.to_string(), Cow::Owned(bytes));
    }

    /// Number of stored assets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for EmbeddedSource {
    fn read(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        self.entries
            .get(path)
            .map(|bytes| Cow::Borrowed(bytes.as_ref()))
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_lookup() {
        static SOUND: &[u8] = b"ID3 fake";
        let mut source = EmbeddedSource::from_static(&[("sound/cow.mp3", SOUND)]);
        source.insert("image/cow.jpg", vec![1, 2, 3]);

        assert_eq!(source.len(), 2);
        assert!(source.contains("sound/cow.mp3"));
        assert_eq!(source.read("image/cow.jpg").unwrap().as_ref(), &[1, 2, 3]);
        assert!(matches!(
            source.read("image/horse.jpg"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_filesystem_missing_file() {
        let root = tempfile::tempdir().unwrap();
        let source = FileSystemSource::new(root.path().join("missing"));
        assert!(!source.contains("image/cow.jpg"));
        assert!(matches!(
            source.read("image/cow.jpg"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_filesystem_reads_relative_to_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("sound")).unwrap();
        std::fs::write(root.path().join("sound/cat.mp3"), b"meow").unwrap();

        let source = FileSystemSource::new(root.path());
        assert!(source.contains("sound/cat.mp3"));
        let bytes = source.read("sound/cat.mp3").unwrap().into_owned();

        assert_eq!(bytes, b"meow");
    }
}
