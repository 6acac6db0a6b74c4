mod error;
mod hash;
mod name;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use hash::ContentHash;
pub use name::{IMAGE_EXTENSION, ImageName, name_image, validate_requested_name};
pub use traits::{BoxReader, ImageSource, ImageStore, ResolvedImage};
