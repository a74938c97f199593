//! Image placement on a page
//!
//! Units are millimetres with a top-left origin. An image pixel counts as
//! one millimetre before scaling, so an `Auto` page is exactly the image's
//! pixel size.

use crate::options::LayoutConfig;
use crate::types::{
    Alignment, HorizontalAlign, ImageDescriptor, ImagesError, Orientation, PagePlacement,
    Result, VerticalAlign,
};

/// Resolve the page (width, height) for an image.
///
/// `PageSize::Auto` adopts the image's pixel size and ignores orientation.
/// Named sizes are taken from the portrait table and swapped for landscape.
pub fn page_dimensions(image: &ImageDescriptor, config: &LayoutConfig) -> (f32, f32) {
    let Some((w, h)) = config.page_size.dimensions_mm() else {
        return (image.pixel_width as f32, image.pixel_height as f32);
    };

    let landscape = match config.orientation {
        Orientation::Portrait => false,
        Orientation::Landscape => true,
        Orientation::Auto => image.is_landscape(),
    };

    if landscape { (h, w) } else { (w, h) }
}

/// Scale factor for an image of `src_width` x `src_height` on the page.
///
/// Fit-to-page picks the largest uniform scale that keeps both axes on the
/// page. Otherwise the image keeps its native size and may overflow.
pub fn calculate_scale(
    src_width: f32,
    src_height: f32,
    page_width: f32,
    page_height: f32,
    fit_to_page: bool,
) -> f32 {
    if fit_to_page {
        let scale_w = page_width / src_width;
        let scale_h = page_height / src_height;
        scale_w.min(scale_h)
    } else {
        1.0
    }
}

/// Offset (x, y) of a `draw_width` x `draw_height` rectangle on the page.
///
/// Residual space may be negative when the image overflows; the same
/// formulas still apply.
pub fn align_offset(
    alignment: Alignment,
    page_width: f32,
    page_height: f32,
    draw_width: f32,
    draw_height: f32,
) -> (f32, f32) {
    let x = match alignment.horizontal() {
        HorizontalAlign::Left => 0.0,
        HorizontalAlign::Center => (page_width - draw_width) / 2.0,
        HorizontalAlign::Right => page_width - draw_width,
    };

    let y = match alignment.vertical() {
        VerticalAlign::Top => 0.0,
        VerticalAlign::Middle => (page_height - draw_height) / 2.0,
        VerticalAlign::Bottom => page_height - draw_height,
    };

    (x, y)
}

/// Compute the page and draw rectangle for one image.
pub fn compute_placement(image: &ImageDescriptor, config: &LayoutConfig) -> Result<PagePlacement> {
    image.validate()?;

    let (page_width, page_height) = page_dimensions(image, config);
    let src_width = image.pixel_width as f32;
    let src_height = image.pixel_height as f32;

    if config.page_size.dimensions_mm().is_none() {
        // The page is the image: nothing to scale or align
        return Ok(PagePlacement {
            page_width,
            page_height,
            draw_x: 0.0,
            draw_y: 0.0,
            draw_width: src_width,
            draw_height: src_height,
            scale: 1.0,
            source_ref: image.source_ref,
        });
    }

    let scale = calculate_scale(
        src_width,
        src_height,
        page_width,
        page_height,
        config.fit_to_page,
    );
    let draw_width = src_width * scale;
    let draw_height = src_height * scale;

    let (draw_x, draw_y) = align_offset(
        config.alignment,
        page_width,
        page_height,
        draw_width,
        draw_height,
    );

    Ok(PagePlacement {
        page_width,
        page_height,
        draw_x,
        draw_y,
        draw_width,
        draw_height,
        scale,
        source_ref: image.source_ref,
    })
}

/// Compute one placement per image, in input order.
pub fn layout_pages(images: &[ImageDescriptor], config: &LayoutConfig) -> Result<Vec<PagePlacement>> {
    images
        .iter()
        .enumerate()
        .map(|(idx, image)| {
            compute_placement(image, config).map_err(|e| match e {
                ImagesError::InvalidInput(msg) => {
                    ImagesError::InvalidInput(format!("image #{}: {}", idx + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageRef, MediaType, PageSize};

    fn image(width: u32, height: u32) -> ImageDescriptor {
        ImageDescriptor {
            pixel_width: width,
            pixel_height: height,
            media_type: MediaType::Jpeg,
            source_ref: ImageRef(7),
            display_name: "test.jpg".to_string(),
        }
    }

    fn config(page_size: PageSize, fit_to_page: bool, alignment: Alignment) -> LayoutConfig {
        LayoutConfig {
            page_size,
            fit_to_page,
            alignment,
            ..Default::default()
        }
    }

    #[test]
    fn test_scale_fit() {
        // Width-limited
        let scale = calculate_scale(3000.0, 2000.0, 210.0, 297.0, true);
        assert!((scale - 0.07).abs() < 1e-6);

        // Height-limited
        let scale = calculate_scale(1000.0, 4000.0, 210.0, 297.0, true);
        assert!((scale - 297.0 / 4000.0).abs() < 1e-6);

        // Small images are scaled up
        let scale = calculate_scale(100.0, 100.0, 200.0, 300.0, true);
        assert!((scale - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_native() {
        assert_eq!(calculate_scale(3000.0, 2000.0, 210.0, 297.0, false), 1.0);
    }

    #[test]
    fn test_a4_mid_middle_scenario() {
        let cfg = config(PageSize::A4, true, Alignment::MidMiddle);
        let p = compute_placement(&image(3000, 2000), &cfg).unwrap();

        assert_eq!((p.page_width, p.page_height), (210.0, 297.0));
        assert!((p.scale - 0.07).abs() < 1e-6);
        assert!((p.draw_width - 210.0).abs() < 1e-3);
        assert!((p.draw_height - 140.0).abs() < 1e-3);
        assert!(p.draw_x.abs() < 1e-3);
        assert!((p.draw_y - 78.5).abs() < 1e-3);
    }

    #[test]
    fn test_auto_page_ignores_alignment_and_fit() {
        for alignment in Alignment::ALL {
            for fit in [true, false] {
                let p = compute_placement(&image(640, 480), &config(PageSize::Auto, fit, alignment))
                    .unwrap();
                assert_eq!((p.page_width, p.page_height), (640.0, 480.0));
                assert_eq!((p.draw_x, p.draw_y), (0.0, 0.0));
                assert_eq!((p.draw_width, p.draw_height), (640.0, 480.0));
                assert_eq!(p.scale, 1.0);
            }
        }
    }

    #[test]
    fn test_alignment_offsets() {
        let (x, y) = align_offset(Alignment::BottomRight, 200.0, 300.0, 50.0, 100.0);
        assert_eq!((x, y), (150.0, 200.0));

        let (x, y) = align_offset(Alignment::TopMiddle, 200.0, 300.0, 50.0, 100.0);
        assert_eq!((x, y), (75.0, 0.0));

        let (x, y) = align_offset(Alignment::MidLeft, 200.0, 300.0, 50.0, 100.0);
        assert_eq!((x, y), (0.0, 100.0));
    }

    #[test]
    fn test_overflow_is_not_clipped() {
        let cfg = config(PageSize::A5, false, Alignment::BottomRight);
        let p = compute_placement(&image(400, 300), &cfg).unwrap();

        assert_eq!((p.draw_width, p.draw_height), (400.0, 300.0));
        assert_eq!(p.draw_x, 148.0 - 400.0);
        assert_eq!(p.draw_y, 210.0 - 300.0);
    }

    #[test]
    fn test_orientation() {
        let wide = image(300, 200);
        let tall = image(200, 300);

        let mut cfg = config(PageSize::A4, true, Alignment::TopLeft);
        assert_eq!(page_dimensions(&wide, &cfg), (210.0, 297.0));

        cfg.orientation = Orientation::Landscape;
        assert_eq!(page_dimensions(&tall, &cfg), (297.0, 210.0));

        cfg.orientation = Orientation::Auto;
        assert_eq!(page_dimensions(&wide, &cfg), (297.0, 210.0));
        assert_eq!(page_dimensions(&tall, &cfg), (210.0, 297.0));
    }

    #[test]
    fn test_zero_size_rejected() {
        let cfg = LayoutConfig::default();
        let result = compute_placement(&image(0, 100), &cfg);
        assert!(matches!(result, Err(ImagesError::InvalidInput(_))));
    }

    #[test]
    fn test_layout_pages_names_failing_image() {
        let cfg = LayoutConfig::default();
        let result = layout_pages(&[image(10, 10), image(10, 0)], &cfg);
        match result {
            Err(ImagesError::InvalidInput(msg)) => assert!(msg.contains("image #2")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
