//! Category and item registration on top of the relational store and the
//! image store.

mod category;
mod error;
mod item;

pub use category::{CategoryIndex, CategoryRegistrar};
pub use error::CatalogError;
pub use item::{ItemRegistrar, NewItem, RegisteredItem};

/// Maximum length, in characters, of item and category names.
pub const MAX_LABEL_CHARS: usize = 256;

/// Validate a free-text label (1-256 Unicode characters after trimming).
pub fn validate_label<'a>(value: &'a str, field: &str) -> Result<&'a str, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_LABEL_CHARS {
        return Err(CatalogError::Validation(format!(
            "{field} must be at most {MAX_LABEL_CHARS} characters"
        )));
    }
    Ok(trimmed)
}
