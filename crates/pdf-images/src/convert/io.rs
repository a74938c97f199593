//! Image loading and document saving

use crate::render::{ImageSamples, encode_samples};
use crate::types::*;
use image::ImageReader;
use lopdf::Document;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// A decoded image: its descriptor plus the samples the writer embeds
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub descriptor: ImageDescriptor,
    pub samples: ImageSamples,
}

/// One input that could not be used
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    /// Position in the input list
    pub index: usize,
    pub path: PathBuf,
    pub message: String,
}

/// Result of loading a batch: usable images in input order plus failures
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub images: Vec<LoadedImage>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn descriptors(&self) -> Vec<ImageDescriptor> {
        self.images.iter().map(|i| i.descriptor.clone()).collect()
    }

    /// One-line summary when some inputs failed
    pub fn warning(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }

        let names: Vec<String> = self
            .failures
            .iter()
            .map(|f| f.path.display().to_string())
            .collect();
        Some(format!(
            "{} of {} images could not be loaded: {}",
            self.failures.len(),
            self.failures.len() + self.images.len(),
            names.join(", ")
        ))
    }
}

/// Identify, decode and prepare one image from its bytes.
///
/// The format is checked from the header first, so unsupported formats are
/// rejected without decoding. Truncated or corrupt pixel data fails here,
/// not when the document is written.
pub fn decode_image(
    bytes: Vec<u8>,
    source_ref: ImageRef,
    display_name: impl Into<String>,
) -> Result<LoadedImage> {
    let reader = ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| ImagesError::InvalidInput("Unrecognized image format".to_string()))?;
    let media_type = MediaType::from_image_format(format).ok_or_else(|| {
        ImagesError::InvalidInput(format!("Unsupported media type: {:?}", format))
    })?;
    let (width, height) = reader.into_dimensions()?;

    let descriptor = ImageDescriptor::new(width, height, media_type, source_ref, display_name)?;
    let samples = encode_samples(media_type, &bytes)?;
    Ok(LoadedImage {
        descriptor,
        samples,
    })
}

/// Load a single image file
pub async fn load_image(path: impl AsRef<Path>, source_ref: ImageRef) -> Result<LoadedImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tokio::task::spawn_blocking(move || decode_image(bytes, source_ref, display_name)).await?
}

/// Load many images concurrently.
///
/// Results keep input order. A failing file is recorded in the report and
/// does not stop the others. Each image's `source_ref` is its input index.
pub async fn load_images(paths: &[impl AsRef<Path>]) -> LoadReport {
    let handles: Vec<_> = paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let path = path.as_ref().to_owned();
            tokio::spawn(async move { load_image(path, ImageRef(index as u64)).await })
        })
        .collect();

    let mut report = LoadReport::default();
    for (index, (handle, path)) in handles.into_iter().zip(paths).enumerate() {
        let path = path.as_ref().to_owned();
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(ImagesError::from(e)),
        };

        match result {
            Ok(image) => {
                log::debug!(
                    "Loaded {} ({}x{} {})",
                    image.descriptor.display_name,
                    image.descriptor.pixel_width,
                    image.descriptor.pixel_height,
                    image.descriptor.media_type.mime_type()
                );
                report.images.push(image);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                report.failures.push(LoadFailure {
                    index,
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

/// Save the finished document.
///
/// Bytes go to a sibling `.part` file that is renamed into place, so a
/// failed export never leaves a partial PDF at `path`.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || crate::render::document_to_bytes(&mut doc))
        .await??;

    let mut part = path.clone().into_os_string();
    part.push(".part");
    let part = PathBuf::from(part);

    let written = async {
        tokio::fs::write(&part, &bytes).await?;
        tokio::fs::rename(&part, &path).await
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }

    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
