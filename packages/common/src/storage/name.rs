use std::fmt;

use serde::{Serialize, Serializer};

use super::error::StorageError;
use super::hash::ContentHash;
use super::traits::BoxReader;

/// Extension appended to every stored image, whatever its actual format.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Content-derived filename of a stored image: `<sha256 hex>.jpg`.
///
/// Only constructible from a [`ContentHash`], so it is always a flat,
/// lowercase-hex name that cannot escape the image directory.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageName(ContentHash);

impl ImageName {
    pub fn from_hash(hash: ContentHash) -> Self {
        Self(hash)
    }

    /// Derive the name for an in-memory payload.
    pub fn for_bytes(data: &[u8]) -> Self {
        Self(ContentHash::compute(data))
    }

    /// Parse a stored image filename back into its digest.
    pub fn parse(name: &str) -> Result<Self, StorageError> {
        let digest = name
            .strip_suffix(IMAGE_EXTENSION)
            .ok_or_else(|| StorageError::InvalidName(format!("{name} does not end with .jpg")))?;
        if digest.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(StorageError::InvalidName(format!(
                "{name} is not a lowercase digest"
            )));
        }
        ContentHash::from_hex(digest)
            .map(Self)
            .map_err(|e| StorageError::InvalidName(e.to_string()))
    }

    pub fn hash(&self) -> &ContentHash {
        &self.0
    }

    pub fn digest(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_filename(&self) -> String {
        format!("{}{IMAGE_EXTENSION}", self.0.to_hex())
    }
}

impl fmt::Debug for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageName({})", self.as_filename())
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{IMAGE_EXTENSION}", self.0)
    }
}

impl Serialize for ImageName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_filename())
    }
}

/// Consume an image stream and derive its storage filename.
///
/// The stream is read exactly once. Callers that need the bytes again for
/// storage must open a fresh reader.
pub async fn name_image(reader: BoxReader, max_size: u64) -> Result<ImageName, StorageError> {
    let (hash, _) = ContentHash::compute_stream(reader, max_size).await?;
    Ok(ImageName::from_hash(hash))
}

/// Validate a client-supplied image filename before it touches the filesystem.
///
/// The name must end with `.jpg` (case-sensitive) and be a single flat path
/// component.
pub fn validate_requested_name(requested: &str) -> Result<&str, StorageError> {
    if !requested.ends_with(IMAGE_EXTENSION) {
        return Err(StorageError::InvalidName(
            "Image path does not end with .jpg".into(),
        ));
    }

    if requested.contains('\0') {
        return Err(StorageError::InvalidName(
            "null bytes are not allowed".into(),
        ));
    }

    if requested.chars().any(|c| c.is_ascii_control()) {
        return Err(StorageError::InvalidName(
            "control characters are not allowed".into(),
        ));
    }

    if requested.contains('/') || requested.contains('\\') {
        return Err(StorageError::InvalidName(
            "path separators are not allowed".into(),
        ));
    }

    if requested.starts_with('.') {
        return Err(StorageError::InvalidName(
            "hidden files (starting with '.') are not allowed".into(),
        ));
    }

    Ok(requested)
}
