use pdf_images::layout::page_dimensions;
use pdf_images::*;

const EPSILON: f32 = 1e-3;

fn image(width: u32, height: u32, id: u64) -> ImageDescriptor {
    ImageDescriptor::new(width, height, MediaType::Jpeg, ImageRef(id), format!("{}.jpg", id))
        .unwrap()
}

fn fit_config(page_size: PageSize, alignment: Alignment) -> LayoutConfig {
    LayoutConfig {
        page_size,
        fit_to_page: true,
        alignment,
        ..Default::default()
    }
}

const SAMPLE_SIZES: [(u32, u32); 6] = [
    (3000, 2000),
    (2000, 3000),
    (640, 480),
    (50, 50),
    (10000, 10),
    (7, 9000),
];

#[test]
fn test_wide_photo_on_a4_centred() {
    let p = compute_placement(
        &image(3000, 2000, 1),
        &fit_config(PageSize::A4, Alignment::MidMiddle),
    )
    .unwrap();

    assert_eq!(p.page_width, 210.0);
    assert_eq!(p.page_height, 297.0);
    assert!((p.scale - 0.07).abs() < 1e-6);
    assert!((p.draw_width - 210.0).abs() < EPSILON);
    assert!((p.draw_height - 140.0).abs() < EPSILON);
    assert!(p.draw_x.abs() < EPSILON);
    assert!((p.draw_y - 78.5).abs() < EPSILON);
}

#[test]
fn test_fit_to_page_stays_inside_and_keeps_aspect() {
    for size in PageSize::ALL {
        if size == PageSize::Auto {
            continue;
        }
        for orientation in [Orientation::Portrait, Orientation::Landscape, Orientation::Auto] {
            for &(w, h) in &SAMPLE_SIZES {
                let cfg = LayoutConfig {
                    orientation,
                    ..fit_config(size, Alignment::BottomRight)
                };
                let p = compute_placement(&image(w, h, 0), &cfg).unwrap();

                assert!(p.draw_width <= p.page_width * (1.0 + 1e-5), "{:?}", p);
                assert!(p.draw_height <= p.page_height * (1.0 + 1e-5), "{:?}", p);

                let image_ratio = w as f32 / h as f32;
                let draw_ratio = p.draw_width / p.draw_height;
                assert!(
                    (draw_ratio / image_ratio - 1.0).abs() < 1e-4,
                    "aspect changed for {}x{}: {:?}",
                    w,
                    h,
                    p
                );

                // One axis touches the page edge
                let touches = (p.draw_width - p.page_width).abs() < EPSILON
                    || (p.draw_height - p.page_height).abs() < EPSILON;
                assert!(touches, "{:?}", p);
            }
        }
    }
}

#[test]
fn test_mid_middle_centres_when_fitting() {
    for &(w, h) in &SAMPLE_SIZES {
        let p = compute_placement(
            &image(w, h, 0),
            &fit_config(PageSize::Letter, Alignment::MidMiddle),
        )
        .unwrap();
        assert!((p.draw_x - (p.page_width - p.draw_width) / 2.0).abs() < EPSILON);
        assert!((p.draw_y - (p.page_height - p.draw_height) / 2.0).abs() < EPSILON);
    }
}

#[test]
fn test_top_left_is_origin_regardless_of_scale() {
    for fit in [true, false] {
        for &(w, h) in &SAMPLE_SIZES {
            let cfg = LayoutConfig {
                fit_to_page: fit,
                alignment: Alignment::TopLeft,
                page_size: PageSize::A3,
                ..Default::default()
            };
            let p = compute_placement(&image(w, h, 0), &cfg).unwrap();
            assert_eq!((p.draw_x, p.draw_y), (0.0, 0.0));
        }
    }
}

#[test]
fn test_bottom_right_touches_far_corner() {
    let p = compute_placement(
        &image(1000, 500, 0),
        &fit_config(PageSize::A4, Alignment::BottomRight),
    )
    .unwrap();
    assert!((p.draw_x + p.draw_width - p.page_width).abs() < EPSILON);
    assert!((p.draw_y + p.draw_height - p.page_height).abs() < EPSILON);
}

#[test]
fn test_auto_page_adopts_image_size() {
    for alignment in Alignment::ALL {
        for fit in [true, false] {
            for orientation in [Orientation::Portrait, Orientation::Landscape] {
                let cfg = LayoutConfig {
                    page_size: PageSize::Auto,
                    orientation,
                    fit_to_page: fit,
                    alignment,
                    ..Default::default()
                };
                let p = compute_placement(&image(1200, 800, 3), &cfg).unwrap();
                assert_eq!((p.page_width, p.page_height), (1200.0, 800.0));
                assert_eq!((p.draw_x, p.draw_y), (0.0, 0.0));
                assert_eq!(p.scale, 1.0);
            }
        }
    }
}

#[test]
fn test_native_size_without_fit() {
    let cfg = LayoutConfig {
        page_size: PageSize::A4,
        fit_to_page: false,
        alignment: Alignment::MidMiddle,
        ..Default::default()
    };
    let p = compute_placement(&image(100, 50, 0), &cfg).unwrap();
    assert_eq!(p.scale, 1.0);
    assert_eq!((p.draw_width, p.draw_height), (100.0, 50.0));
    assert_eq!((p.draw_x, p.draw_y), (55.0, 123.5));
}

#[test]
fn test_landscape_swaps_named_size() {
    let cfg = LayoutConfig {
        page_size: PageSize::Legal,
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    assert_eq!(page_dimensions(&image(10, 20, 0), &cfg), (356.0, 216.0));
}

#[test]
fn test_compute_placement_is_deterministic() {
    let cfg = fit_config(PageSize::Tabloid, Alignment::BottomMiddle);
    let img = image(1234, 987, 5);
    let first = compute_placement(&img, &cfg).unwrap();
    let second = compute_placement(&img, &cfg).unwrap();

    assert_eq!(first.draw_x.to_bits(), second.draw_x.to_bits());
    assert_eq!(first.draw_y.to_bits(), second.draw_y.to_bits());
    assert_eq!(first.draw_width.to_bits(), second.draw_width.to_bits());
    assert_eq!(first.draw_height.to_bits(), second.draw_height.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_layout_pages_preserves_order() {
    let images: Vec<ImageDescriptor> = SAMPLE_SIZES
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| image(w, h, 100 + i as u64))
        .collect();

    let placements = layout_pages(&images, &LayoutConfig::default()).unwrap();
    assert_eq!(placements.len(), images.len());
    for (image, placement) in images.iter().zip(&placements) {
        assert_eq!(placement.source_ref, image.source_ref);
    }
}

#[test]
fn test_layout_pages_empty() {
    assert!(layout_pages(&[], &LayoutConfig::default()).unwrap().is_empty());
}
