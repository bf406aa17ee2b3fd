//! Work-photo upload validation.
//!
//! A submission replaces the provider's entire photo set, so the batch rules
//! (count, content type, size) are enforced before any storage call is made.

use std::fmt;

/// Minimum number of photos per submission.
pub const PHOTO_MIN: usize = 3;
/// Maximum number of photos per submission.
pub const PHOTO_MAX: usize = 8;
/// Maximum size of a single photo in bytes.
pub const PHOTO_MAX_BYTES: usize = 8 * 1024 * 1024;

/// Content types the marketplace accepts for work photos.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Validation errors returned by the work-photo constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkPhotoValidationError {
    TooFewPhotos { min: usize },
    TooManyPhotos { max: usize },
    EmptyFile { file_name: String },
    FileTooLarge { file_name: String, max_bytes: usize },
    UnsupportedContentType { file_name: String, content_type: String },
    EmptyFileName,
}

impl fmt::Display for WorkPhotoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPhotos { min } => {
                write!(f, "at least {min} work photos are required")
            }
            Self::TooManyPhotos { max } => {
                write!(f, "at most {max} work photos may be uploaded")
            }
            Self::EmptyFile { file_name } => write!(f, "photo {file_name} is empty"),
            Self::FileTooLarge {
                file_name,
                max_bytes,
            } => write!(f, "photo {file_name} exceeds {max_bytes} bytes"),
            Self::UnsupportedContentType {
                file_name,
                content_type,
            } => write!(
                f,
                "photo {file_name} has unsupported content type {content_type}"
            ),
            Self::EmptyFileName => write!(f, "photo file name must not be empty"),
        }
    }
}

impl std::error::Error for WorkPhotoValidationError {}

/// One decoded photo awaiting upload.
///
/// ## Invariants
/// - `content_type` is one of [`ALLOWED_CONTENT_TYPES`].
/// - `bytes` is non-empty and at most [`PHOTO_MAX_BYTES`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPhoto {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl WorkPhoto {
    /// Validate and construct a [`WorkPhoto`].
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, WorkPhotoValidationError> {
        let file_name = file_name.into();
        let content_type = content_type.into();

        if file_name.trim().is_empty() {
            return Err(WorkPhotoValidationError::EmptyFileName);
        }
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(WorkPhotoValidationError::UnsupportedContentType {
                file_name,
                content_type,
            });
        }
        if bytes.is_empty() {
            return Err(WorkPhotoValidationError::EmptyFile { file_name });
        }
        if bytes.len() > PHOTO_MAX_BYTES {
            return Err(WorkPhotoValidationError::FileTooLarge {
                file_name,
                max_bytes: PHOTO_MAX_BYTES,
            });
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Original file name as submitted.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Validated content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Decoded photo bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A full photo submission, bounded to [`PHOTO_MIN`]..=[`PHOTO_MAX`] photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPhotoBatch(Vec<WorkPhoto>);

impl WorkPhotoBatch {
    /// Validate the batch size and construct a [`WorkPhotoBatch`].
    pub fn new(photos: Vec<WorkPhoto>) -> Result<Self, WorkPhotoValidationError> {
        if photos.len() < PHOTO_MIN {
            return Err(WorkPhotoValidationError::TooFewPhotos { min: PHOTO_MIN });
        }
        if photos.len() > PHOTO_MAX {
            return Err(WorkPhotoValidationError::TooManyPhotos { max: PHOTO_MAX });
        }
        Ok(Self(photos))
    }

    /// Photos in submission order.
    pub fn as_slice(&self) -> &[WorkPhoto] {
        &self.0
    }

    /// Number of photos in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the batch holds no photos; unreachable for validated batches.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
