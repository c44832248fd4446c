// ABOUTME: Local JSON mirror of created resources
// ABOUTME: One directory per resource type, one file per entity, read when the platform cannot answer

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::pipeline::ListingStrategy;
use crate::{StorageResult, StoredResource};

/// Directory of `*.json` files, each holding one stored resource
pub struct FallbackStore<T> {
    dir: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for FallbackStore<T> {
    fn clone(&self) -> Self {
        Self::new(self.dir.clone())
    }
}

impl<T> FallbackStore<T> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            _marker: PhantomData,
        }
    }
}

impl<T: StoredResource> FallbackStore<T> {
    /// Read every JSON file in the directory. Unreadable or malformed files
    /// are skipped; a missing directory yields an empty list.
    pub async fn load_all(&self) -> StorageResult<Vec<T>> {
        if fs::metadata(&self.dir).await.is_err() {
            debug!("Fallback directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.dir).await?;
        let mut items = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match read_entity::<T>(&path).await {
                Ok(item) => items.push(item),
                Err(e) => warn!("Skipping fallback file {}: {}", path.display(), e),
            }
        }

        items.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(items)
    }

    /// Write `<id>.json`, replacing any previous mirror of the same id
    pub async fn save(&self, entity: &T) -> StorageResult<PathBuf> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(format!("{}.json", file_stem(entity.id())));
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(entity)?;

        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!("Mirrored {} to {}", entity.id(), path.display());
        Ok(path)
    }

    /// Best-effort mirror; failures are logged only
    pub async fn mirror(&self, entity: &T) {
        if let Err(e) = self.save(entity).await {
            warn!(
                "Failed to mirror {} into {}: {}",
                entity.id(),
                self.dir.display(),
                e
            );
        }
    }
}

#[async_trait]
impl<T: StoredResource + 'static> ListingStrategy<T> for FallbackStore<T> {
    fn name(&self) -> &'static str {
        "local files"
    }

    async fn extract(&self) -> Option<Vec<T>> {
        match self.load_all().await {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(
                    "Error reading fallback directory {}: {}",
                    self.dir.display(),
                    e
                );
                None
            }
        }
    }
}

async fn read_entity<T: StoredResource>(path: &Path) -> StorageResult<T> {
    let raw = fs::read(path).await?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Keep file names to a safe character set
fn file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem
    }
}
