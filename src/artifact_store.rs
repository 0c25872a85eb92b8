use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::artifacts::ArtifactInfo;
use crate::classifier::LoadError;

/// On-disk cache for pretrained artifacts (model file + vocabulary
/// metadata).
///
/// Downloads are serialized by an async mutex so concurrent callers never
/// race on the same files; everything else is plain filesystem state.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    cache_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactStore {
    /// Creates a store rooted at the default cache directory.
    pub fn new_default() -> std::io::Result<Self> {
        Self::new(Self::default_cache_dir())
    }

    /// Resolves the default cache directory.
    pub fn default_cache_dir() -> PathBuf {
        if let Ok(path) = env::var("SENTISCORE_CACHE") {
            return PathBuf::from(path).join("artifacts");
        }

        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("sentiscore").join("artifacts");
        }

        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("sentiscore").join("artifacts");
        }

        env::temp_dir().join("sentiscore").join("artifacts")
    }

    pub fn new<P: AsRef<Path>>(cache_dir: P) -> std::io::Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            cache_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn model_path(&self, info: &ArtifactInfo) -> PathBuf {
        self.cache_dir.join(info.name).join("model.onnx")
    }

    pub fn metadata_path(&self, info: &ArtifactInfo) -> PathBuf {
        self.cache_dir.join(info.name).join("metadata.json")
    }

    pub fn is_downloaded(&self, info: &ArtifactInfo) -> bool {
        let model_path = self.model_path(info);
        let metadata_path = self.metadata_path(info);
        log::debug!(
            "checking artifact cache: model {:?} (exists: {}), metadata {:?} (exists: {})",
            model_path,
            model_path.exists(),
            metadata_path,
            metadata_path.exists()
        );
        model_path.exists() && metadata_path.exists()
    }

    /// Downloads both artifact files, verifying hashes where known.
    /// On any failure both files are removed so a partial download never
    /// passes for a complete one.
    pub async fn download(&self, info: &ArtifactInfo) -> Result<(), LoadError> {
        let _lock = self.download_lock.lock().await;

        let artifact_dir = self.cache_dir.join(info.name);
        fs::create_dir_all(&artifact_dir)?;

        let model_result = self
            .fetch_file(info.model_url, &self.model_path(info), info.model_hash, "model")
            .await;
        let metadata_result = self
            .fetch_file(
                info.metadata_url,
                &self.metadata_path(info),
                info.metadata_hash,
                "metadata",
            )
            .await;

        match (model_result, metadata_result) {
            (Ok(()), Ok(())) => {
                log::info!("artifact '{}' ready to use", info.name);
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("failed to fetch artifact '{}': {}", info.name, e);
                let _ = self.remove_download(info);
                Err(e)
            }
        }
    }

    async fn fetch_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: Option<&str>,
        file_type: &str,
    ) -> Result<(), LoadError> {
        if path.exists() {
            match expected_hash {
                Some(hash) if !verify_file(path, hash)? => {
                    log::warn!("cached {} file failed verification, redownloading", file_type);
                }
                _ => {
                    log::debug!("cached {} file at {:?} is usable", file_type, path);
                    return Ok(());
                }
            }
        }

        log::info!("downloading {} file from {} to {:?}", file_type, url, path);
        let response = reqwest::get(url).await?;
        let bytes = response.error_for_status()?.bytes().await?;
        log::debug!("downloaded {} bytes", bytes.len());

        if let Some(expected) = expected_hash {
            let actual = hex_digest(&bytes);
            if actual != expected {
                return Err(LoadError::HashMismatch {
                    file_type: file_type.to_string(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;

        if let Some(expected) = expected_hash {
            if !verify_file(path, expected)? {
                return Err(LoadError::VerificationFailed);
            }
        }

        Ok(())
    }

    pub fn remove_download(&self, info: &ArtifactInfo) -> Result<(), LoadError> {
        for path in [self.model_path(info), self.metadata_path(info)] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Downloads the artifact pair unless a usable copy is already cached.
    pub async fn ensure_downloaded(&self, info: &ArtifactInfo) -> Result<(), LoadError> {
        if self.is_downloaded(info) {
            log::debug!("artifact '{}' already cached", info.name);
            return Ok(());
        }
        self.download(info).await
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn verify_file(path: &Path, expected_hash: &str) -> Result<bool, LoadError> {
    let bytes = fs::read(path)?;
    Ok(hex_digest(&bytes) == expected_hash)
}
