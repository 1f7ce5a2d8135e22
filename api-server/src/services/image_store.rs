//! Recipe Image Storage
//!
//! Recipes carry their image inline as a base64 data URL. This module
//! decodes and validates the payload (PNG/JPEG/WebP, 5 MB cap) and writes
//! it under `<media_dir>/recipes/images/`, returning the relative path
//! stored on the recipe row.

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use uuid::Uuid;

use crate::utils::{AppError, ErrorCode};

/// Maximum decoded file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Directory under media_dir where recipe images live
const RECIPE_IMAGE_DIR: &str = "recipes/images";

/// Public URL for a stored relative path
pub fn media_url(relative_path: &str) -> String {
    format!("/media/{relative_path}")
}

/// Decode, validate and persist a base64 image; returns the relative path
///
/// Accepts `data:image/png;base64,<payload>` data URLs as well as bare
/// base64 payloads.
pub fn store_base64_image(media_dir: &Path, data: &str) -> Result<String, AppError> {
    let payload = strip_data_url_prefix(data);

    let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidImageFile,
            format!("Image is not valid base64: {e}"),
        )
    })?;

    if bytes.is_empty() {
        return Err(AppError::new(ErrorCode::InvalidImageFile));
    }
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("Image is {} bytes, max {}", bytes.len(), MAX_FILE_SIZE),
        ));
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| AppError::new(ErrorCode::UnsupportedFileFormat))?;
    let extension = match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpg",
        ImageFormat::WebP => "webp",
        _ => return Err(AppError::new(ErrorCode::UnsupportedFileFormat)),
    };

    // Fully decode to reject truncated/corrupted files
    image::load_from_memory(&bytes).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
    })?;

    let relative_path = format!("{RECIPE_IMAGE_DIR}/{}.{extension}", Uuid::new_v4());
    let target = media_dir.join(&relative_path);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to create image dir: {e}"),
            )
        })?;
    }
    fs::write(&target, &bytes).map_err(|e| {
        AppError::with_message(
            ErrorCode::FileStorageFailed,
            format!("Failed to write image: {e}"),
        )
    })?;

    Ok(relative_path)
}

fn strip_data_url_prefix(data: &str) -> &str {
    if let Some(rest) = data.strip_prefix("data:")
        && let Some((_mime, payload)) = rest.split_once(";base64,")
    {
        return payload;
    }
    data
}
