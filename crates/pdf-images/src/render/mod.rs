//! PDF writing for image pages
//!
//! This module turns placements into a lopdf document:
//! - Embedding each source image once as an image XObject
//! - Building one page per placement, in order
//! - Catalog, page tree and Info dictionary

mod page;
mod xobject;

pub use page::*;
pub use xobject::{ImageSamples, create_image_xobject, encode_samples};

use crate::constants::PRODUCER;
use crate::convert::LoadedImage;
use crate::options::LayoutConfig;
use crate::types::{ImageRef, ImagesError, PagePlacement, Result};
use chrono::Local;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Build a document with one page per placement.
///
/// Every placement's `source_ref` must name one of `images`.
pub fn write_document(
    images: &[LoadedImage],
    placements: &[PagePlacement],
    config: &LayoutConfig,
    title: Option<&str>,
) -> Result<Document> {
    if placements.is_empty() {
        return Err(ImagesError::NoImages);
    }

    let by_ref: HashMap<ImageRef, &LoadedImage> = images
        .iter()
        .map(|image| (image.descriptor.source_ref, image))
        .collect();

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let margin_mm = config.margin_mode.width_mm();

    let mut xobject_cache: HashMap<ImageRef, ObjectId> = HashMap::new();
    let mut kids = Vec::with_capacity(placements.len());

    for (idx, placement) in placements.iter().enumerate() {
        let image = by_ref.get(&placement.source_ref).ok_or_else(|| {
            ImagesError::InvalidInput(format!(
                "Page {} refers to unknown image {:?}",
                idx + 1,
                placement.source_ref
            ))
        })?;

        let xobject_id = match xobject_cache.get(&placement.source_ref) {
            Some(&id) => id,
            None => {
                let id = create_image_xobject(&mut doc, &image.samples);
                xobject_cache.insert(placement.source_ref, id);
                id
            }
        };

        let page_id = render_image_page(&mut doc, pages_id, placement, xobject_id, margin_mm)?;
        log::debug!(
            "Page {}: {} on {}x{}mm at ({}, {}) scale {}",
            idx + 1,
            image.descriptor.display_name,
            placement.page_width,
            placement.page_height,
            placement.draw_x,
            placement.draw_y,
            placement.scale
        );
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(title));
    doc.trailer.set("Info", info_id);

    Ok(doc)
}

/// Serialize a document to PDF bytes
pub fn document_to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

fn info_dictionary(title: Option<&str>) -> Dictionary {
    let mut info = Dictionary::new();
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        // PDFDocEncoding for ASCII, UTF-16BE otherwise
        info.set("Title", lopdf::text_string(title));
    }
    info.set("Producer", Object::string_literal(PRODUCER));
    info.set(
        "CreationDate",
        Object::string_literal(Local::now().format("D:%Y%m%d%H%M%S").to_string()),
    );
    info
}
