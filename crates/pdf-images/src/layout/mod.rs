//! Layout calculation for image pages
//!
//! Turns an image's pixel size and a [`LayoutConfig`](crate::LayoutConfig)
//! into one page placement:
//! - Page size (named table, orientation, or the image's own size)
//! - Scale (fit-to-page or native)
//! - Position (alignment of the scaled image on the page)

mod placement;

pub use placement::*;
