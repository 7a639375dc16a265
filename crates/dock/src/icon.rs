use crate::errors::{DockErrorCode, dock_error};
use crate::{AppResult, ResultExt};
use anyhow::Context;
use base64::Engine as _;
use image::ImageFormat;
use std::path::Path;

pub const DEFAULT_APP_ICON: &str = "application-default-icon";
const DATA_URI_IMAGE_PREFIX: &str = "data:image";

pub fn is_data_uri_image(icon: &str) -> bool {
    icon.starts_with(DATA_URI_IMAGE_PREFIX)
}

/// Decodes a base64 `data:image/...` URI and stores it as PNG at `dest`.
pub fn data_uri_to_png(uri: &str, dest: &Path) -> AppResult<()> {
    let (header, payload) = uri.split_once(',').ok_or_else(|| {
        dock_error(DockErrorCode::IconDecodeFailed, "icon data uri has no payload")
    })?;
    if !header.ends_with(";base64") {
        return Err(
            dock_error(DockErrorCode::IconDecodeFailed, "icon data uri is not base64")
                .with_context("header", header),
        );
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .with_context(|| "invalid base64 icon payload".to_string())
        .with_code(
            DockErrorCode::IconDecodeFailed.as_str(),
            "failed to decode icon",
        )?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("unsupported icon image: {header}"))
        .with_code(
            DockErrorCode::IconDecodeFailed.as_str(),
            "failed to decode icon",
        )?;
    image
        .save_with_format(dest, ImageFormat::Png)
        .with_context(|| format!("failed to write icon: {}", dest.display()))
        .with_code(
            DockErrorCode::IconWriteFailed.as_str(),
            "failed to write icon",
        )
        .with_ctx("iconFile", dest.display().to_string())?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/icon/icon_tests.rs"]
mod tests;
