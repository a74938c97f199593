//! Image-to-PDF conversion
//!
//! This module orchestrates a conversion:
//! 1. Load the input images (per-image failures are tolerated)
//! 2. Lay out one page per image
//! 3. Write the document and save it under the resolved filename

mod io;

pub use io::{
    LoadFailure, LoadReport, LoadedImage, decode_image, load_image, load_images, save_pdf,
};

use crate::layout::layout_pages;
use crate::options::ConversionOptions;
use crate::render::write_document;
use crate::types::*;
use chrono::Local;
use std::path::PathBuf;

/// What a finished conversion produced
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub path: PathBuf,
    pub pages: usize,
    pub failures: Vec<LoadFailure>,
}

/// Load and lay out the inputs without writing anything.
pub async fn plan(options: &ConversionOptions) -> Result<(LoadReport, Vec<PagePlacement>)> {
    options.validate()?;

    let report = load_images(&options.input_files).await;
    if let Some(warning) = report.warning() {
        log::warn!("{}", warning);
    }
    if report.images.is_empty() {
        return Err(ImagesError::NoImages);
    }

    let placements = layout_pages(&report.descriptors(), &options.layout)?;
    Ok((report, placements))
}

/// Main conversion function
pub async fn convert(options: &ConversionOptions) -> Result<ConversionOutcome> {
    let (report, placements) = plan(options).await?;
    let pages = placements.len();

    let layout = options.layout;
    let title = options.title.clone();
    let LoadReport { images, failures } = report;

    let doc = tokio::task::spawn_blocking(move || {
        write_document(&images, &placements, &layout, title.as_deref())
    })
    .await??;

    let path = options.output_path(Local::now().naive_local());
    save_pdf(doc, &path).await?;

    log::info!("Converted {} images → {}", pages, path.display());
    Ok(ConversionOutcome {
        path,
        pages,
        failures,
    })
}
