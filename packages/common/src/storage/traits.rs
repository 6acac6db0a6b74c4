use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::name::ImageName;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// An image payload resolved for serving.
pub struct ResolvedImage {
    /// Filename that is actually served (the default image on fallback).
    pub served_name: String,
    /// Size of the served payload in bytes.
    pub size: u64,
    /// Whether the requested image was missing and the default was substituted.
    pub is_fallback: bool,
    pub reader: BoxReader,
}

impl ResolvedImage {
    /// Read the whole payload into memory.
    pub async fn into_bytes(mut self) -> Result<Vec<u8>, StorageError> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }
}

/// Content-addressed image storage.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist an image payload under `name`, replacing any existing file.
    ///
    /// Returns the number of bytes written.
    async fn save(&self, name: &ImageName, reader: BoxReader) -> Result<u64, StorageError>;

    /// Persist an in-memory payload under its content-derived name.
    async fn save_bytes(&self, data: &[u8]) -> Result<ImageName, StorageError> {
        let name = ImageName::for_bytes(data);
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.save(&name, reader).await?;
        Ok(name)
    }

    /// Resolve a client-requested filename to a payload.
    ///
    /// Missing images degrade to the default image; only a missing default is
    /// reported as [`StorageError::NotFound`].
    async fn resolve(&self, requested: &str) -> Result<ResolvedImage, StorageError>;

    /// Check whether an image is stored.
    async fn exists(&self, name: &ImageName) -> Result<bool, StorageError>;
}

/// A source of image bytes that can be opened more than once.
///
/// Each call to [`ImageSource::open`] yields an independent reader positioned
/// at the start of the payload.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn open(&self) -> std::io::Result<BoxReader>;
}

#[async_trait]
impl ImageSource for Vec<u8> {
    async fn open(&self) -> std::io::Result<BoxReader> {
        Ok(Box::new(Cursor::new(self.clone())))
    }
}
