use std::path::PathBuf;

use async_trait::async_trait;
use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};
use common::storage::{BoxReader, ImageSource};
use tokio::io::{AsyncWriteExt, BufReader};
use uuid::Uuid;

use crate::catalog::validate_label;
use crate::error::AppError;
use crate::state::AppState;

/// An uploaded image spooled to a temp file.
///
/// The file is removed when the value is dropped.
pub struct SpooledImage {
    path: PathBuf,
    size: u64,
}

impl SpooledImage {
    /// Stream a multipart field to a temp file, enforcing `max_size`.
    pub async fn from_field(mut field: Field<'_>, max_size: u64) -> Result<Self, AppError> {
        let mut spooled = Self {
            path: std::env::temp_dir().join(format!("listing-upload-{}", Uuid::new_v4())),
            size: 0,
        };

        let mut temp_file = tokio::fs::File::create(&spooled.path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Read(format!("Unable to read the image upload: {e}")))?
        {
            spooled.size += chunk.len() as u64;
            if spooled.size > max_size {
                return Err(AppError::Validation(format!(
                    "Image exceeds maximum size of {max_size} bytes"
                )));
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
        }

        temp_file
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;

        Ok(spooled)
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for SpooledImage {
    fn drop(&mut self) {
        // Best effort.
        let _ = std::fs::remove_file(&self.path);
    }
}

#[async_trait]
impl ImageSource for SpooledImage {
    async fn open(&self) -> std::io::Result<BoxReader> {
        let file = tokio::fs::File::open(&self.path).await?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Validated multipart body of `POST /items`.
pub struct ItemUpload {
    pub name: String,
    pub category: String,
    pub image: SpooledImage,
}

impl FromRequest<AppState> for ItemUpload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let max_size = state.config.storage.max_image_size;
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut name: Option<String> = None;
        let mut category: Option<String> = None;
        let mut image: Option<SpooledImage> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Read(format!("Multipart error: {e}")))?
        {
            match field.name() {
                Some("name") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Read(format!("Failed to read name: {e}")))?;
                    name = Some(text);
                }
                Some("category") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Read(format!("Failed to read category: {e}")))?;
                    category = Some(text);
                }
                Some("image") => {
                    if field.file_name().is_none() {
                        return Err(AppError::Validation(
                            "'image' must be a file part".into(),
                        ));
                    }
                    image = Some(SpooledImage::from_field(field, max_size).await?);
                }
                _ => {} // Ignore unknown fields.
            }
        }

        let name = name.ok_or_else(|| AppError::Validation("Missing 'name' field".into()))?;
        let category =
            category.ok_or_else(|| AppError::Validation("Missing 'category' field".into()))?;
        let image = image.ok_or_else(|| AppError::Validation("Missing 'image' field".into()))?;

        let name = validate_label(&name, "Item name")?.to_string();
        let category = validate_label(&category, "Category")?.to_string();
        if image.size() == 0 {
            return Err(AppError::Validation("Image must not be empty".into()));
        }

        Ok(ItemUpload {
            name,
            category,
            image,
        })
    }
}
