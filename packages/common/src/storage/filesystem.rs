use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use super::error::StorageError;
use super::hash::ContentHash;
use super::name::{ImageName, validate_requested_name};
use super::traits::{BoxReader, ImageStore, ResolvedImage};

/// Filesystem-backed image store.
///
/// Images live flat in `{image_dir}/{sha256 hex}.jpg`. Writes are staged in
/// `{image_dir}/.tmp` and renamed into place.
pub struct FilesystemImageStore {
    image_dir: PathBuf,
    default_image: String,
    max_size: u64,
}

impl FilesystemImageStore {
    /// Create a new filesystem image store.
    pub async fn new(
        image_dir: PathBuf,
        default_image: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let default_image = default_image.into();
        validate_requested_name(&default_image)?;

        fs::create_dir_all(&image_dir).await?;
        fs::create_dir_all(image_dir.join(".tmp")).await?;

        if !fs::try_exists(image_dir.join(&default_image)).await? {
            warn!(
                image_dir = %image_dir.display(),
                default_image = %default_image,
                "Default image is missing; requests for unknown images will fail"
            );
        }

        Ok(Self {
            image_dir,
            default_image,
            max_size,
        })
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Compute the filesystem path for a stored image.
    fn image_path(&self, name: &ImageName) -> PathBuf {
        self.image_dir.join(name.as_filename())
    }

    /// Join a validated flat filename onto the image directory.
    fn contained_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.image_dir.join(filename)),
            _ => Err(StorageError::InvalidName(format!(
                "{filename} escapes the image directory"
            ))),
        }
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.image_dir
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Open a regular file, mapping absence to `Ok(None)`.
    async fn open_file(path: &Path) -> Result<Option<(fs::File, u64)>, StorageError> {
        match fs::File::open(path).await {
            Ok(file) => {
                let meta = file.metadata().await?;
                if meta.is_file() {
                    Ok(Some((file, meta.len())))
                } else {
                    Ok(None)
                }
            }
            // A name the filesystem cannot hold (e.g. too long) cannot be stored either.
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::NotFound | ErrorKind::InvalidFilename | ErrorKind::NotADirectory
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write_temp(
        &self,
        temp_path: &Path,
        name: &ImageName,
        mut reader: BoxReader,
    ) -> Result<u64, StorageError> {
        let mut hasher = Sha256::new();
        let mut total_bytes: u64 = 0;

        let mut buf = vec![0u8; 64 * 1024];
        let mut temp_file = fs::File::create(temp_path)
            .await
            .map_err(StorageError::Write)?;

        loop {
            let n = reader.read(&mut buf).await.map_err(StorageError::Read)?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            hasher.update(&buf[..n]);
            temp_file
                .write_all(&buf[..n])
                .await
                .map_err(StorageError::Write)?;
        }

        temp_file.flush().await.map_err(StorageError::Write)?;
        temp_file.sync_all().await.map_err(StorageError::Write)?;

        let written = ContentHash::from_bytes(hasher.finalize().into());
        if &written != name.hash() {
            return Err(StorageError::Write(std::io::Error::new(
                ErrorKind::InvalidData,
                format!("payload digest {written} does not match {name}"),
            )));
        }

        Ok(total_bytes)
    }
}

/// Staging file under `.tmp`, removed on drop unless persisted.
///
/// Covers early returns as well as a save future dropped mid-write.
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// The file was renamed into place; nothing to clean up.
    fn persist(mut self) {
        self.persisted = true;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn save(&self, name: &ImageName, reader: BoxReader) -> Result<u64, StorageError> {
        let temp = TempFile::new(self.temp_path());
        let total_bytes = self.write_temp(temp.path(), name, reader).await?;

        let image_path = self.image_path(name);

        // Same digest means same bytes; keep the existing file.
        if fs::try_exists(&image_path).await.unwrap_or(false) {
            debug!(image = %name, "Image already stored");
            return Ok(total_bytes);
        }

        fs::rename(temp.path(), &image_path)
            .await
            .map_err(StorageError::Write)?;
        temp.persist();

        debug!(image = %name, size = total_bytes, "Image stored");
        Ok(total_bytes)
    }

    async fn resolve(&self, requested: &str) -> Result<ResolvedImage, StorageError> {
        let requested = validate_requested_name(requested)?;
        let path = self.contained_path(requested)?;

        if let Some((file, size)) = Self::open_file(&path).await? {
            return Ok(ResolvedImage {
                served_name: requested.to_string(),
                size,
                is_fallback: false,
                reader: Box::new(BufReader::new(file)),
            });
        }

        debug!("Image not found: {}", path.display());

        let default_path = self.contained_path(&self.default_image)?;
        match Self::open_file(&default_path).await? {
            Some((file, size)) => Ok(ResolvedImage {
                served_name: self.default_image.clone(),
                size,
                is_fallback: true,
                reader: Box::new(BufReader::new(file)),
            }),
            None => Err(StorageError::NotFound(self.default_image.clone())),
        }
    }

    async fn exists(&self, name: &ImageName) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.image_path(name)).await?)
    }
}
