//! Output page rendering
//!
//! Placements are measured in millimetres from the page's top-left corner.
//! PDF user space is points from the bottom-left, so every rectangle is
//! converted and flipped here.

use crate::constants::{IMAGE_RESOURCE_NAME, mm_to_pt};
use crate::types::{PagePlacement, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Image rectangle in PDF user space (points, bottom-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PdfRect {
    pub fn from_placement(placement: &PagePlacement) -> Self {
        let bottom_mm = placement.page_height - placement.draw_y - placement.draw_height;
        Self {
            x: mm_to_pt(placement.draw_x),
            y: mm_to_pt(bottom_mm),
            width: mm_to_pt(placement.draw_width),
            height: mm_to_pt(placement.draw_height),
        }
    }
}

/// Render one output page showing `image_xobject` as the placement says.
///
/// # Arguments
/// * `output` - The output document
/// * `parent_pages_id` - The parent Pages object ID
/// * `placement` - Page size and image rectangle
/// * `image_xobject` - The image XObject drawn on the page
/// * `margin_mm` - Frame recorded as the page's TrimBox (0 = none)
pub fn render_image_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    placement: &PagePlacement,
    image_xobject: ObjectId,
    margin_mm: f32,
) -> Result<ObjectId> {
    let page_width_pt = mm_to_pt(placement.page_width);
    let page_height_pt = mm_to_pt(placement.page_height);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt),
            Object::Real(page_height_pt),
        ]),
    );

    if let Some(trim_box) = trim_box(page_width_pt, page_height_pt, mm_to_pt(margin_mm)) {
        page_dict.set("TrimBox", trim_box);
    }

    let mut xobjects = Dictionary::new();
    xobjects.set(IMAGE_RESOURCE_NAME, Object::Reference(image_xobject));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = generate_draw_command(IMAGE_RESOURCE_NAME, &PdfRect::from_placement(placement));
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Content stream command drawing a unit-square image into `rect`.
pub fn generate_draw_command(xobject_name: &str, rect: &PdfRect) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}

/// Page frame inset by `margin_pt`, if the margin leaves any page behind.
fn trim_box(width_pt: f32, height_pt: f32, margin_pt: f32) -> Option<Object> {
    if margin_pt <= 0.0 || margin_pt * 2.0 >= width_pt || margin_pt * 2.0 >= height_pt {
        return None;
    }

    Some(Object::Array(vec![
        Object::Real(margin_pt),
        Object::Real(margin_pt),
        Object::Real(width_pt - margin_pt),
        Object::Real(height_pt - margin_pt),
    ]))
}
