// Accepted images and the session list that owns them.

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::error::Error;

/// File extensions accepted as input (compared case-insensitively)
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// One uploaded image: its display label plus the raw file bytes.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageItem {
    pub label: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageItem {
    /// Build an item from a file name and its contents.
    ///
    /// Fails with `UnsupportedFile` unless the name ends in a PNG or JPEG
    /// extension.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self, Error> {
        if !is_accepted(file_name) {
            return Err(Error::UnsupportedFile(file_name.to_string()));
        }
        Ok(Self {
            label: display_label(file_name).to_string(),
            file_name: file_name.to_string(),
            bytes,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::UnsupportedFile(path.display().to_string()))?;
        if !is_accepted(&file_name) {
            return Err(Error::UnsupportedFile(file_name));
        }
        let bytes = std::fs::read(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(&file_name, bytes)
    }
}

/// File name with its final extension removed (`"a.b.jpg"` -> `"a.b"`).
pub fn display_label(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

pub fn is_accepted(file_name: &str) -> bool {
    match file_name.rfind('.') {
        Some(idx) => {
            let ext = file_name[idx + 1..].to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

// ============================================================================
// Item List
// ============================================================================

/// Ordered list of accepted images. Every edit bumps the version.
#[derive(Debug, Default, Clone)]
pub struct ItemList {
    items: Vec<Arc<ImageItem>>,
    version: u64,
}

/// Immutable copy of the list taken at the start of a generation pass.
#[derive(Debug, Clone)]
pub struct ItemSnapshot {
    pub version: u64,
    pub items: Vec<Arc<ImageItem>>,
}

impl ItemSnapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ImageItem) {
        self.items.push(Arc::new(item));
        self.version += 1;
    }

    /// Add every accepted file; files with other extensions are skipped with a
    /// warning. Returns the number of files added.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<usize, Error> {
        let mut added = 0;
        for path in paths {
            let path = path.as_ref();
            match ImageItem::from_path(path) {
                Ok(item) => {
                    debug!("Accepted {} as '{}'", item.file_name, item.label);
                    self.push(item);
                    added += 1;
                }
                Err(Error::UnsupportedFile(name)) => {
                    warn!("Skipping {}: only PNG and JPEG files are accepted", name);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Remove the item at 0-based `position`; later items move up by one.
    pub fn remove(&mut self, position: usize) -> Result<Arc<ImageItem>, Error> {
        if position >= self.items.len() {
            return Err(Error::InvalidPosition {
                position,
                len: self.items.len(),
            });
        }
        self.version += 1;
        Ok(self.items.remove(position))
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            version: self.version,
            items: self.items.clone(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageItem> {
        self.items.iter().map(|i| i.as_ref())
    }
}
