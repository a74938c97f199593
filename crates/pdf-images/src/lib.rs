pub mod convert;
mod constants;
mod filename;
pub mod layout;
mod options;
pub mod render;
mod types;

pub use constants::mm_to_pt;
pub use convert::{
    ConversionOutcome, LoadFailure, LoadReport, LoadedImage, convert, decode_image, load_image,
    load_images, plan, save_pdf,
};
pub use filename::{DEFAULT_FILE_NAME, PDF_EXTENSION, resolve_file_name, resolve_file_name_now};
pub use layout::{compute_placement, layout_pages};
pub use options::*;
pub use render::{document_to_bytes, write_document};
pub use types::*;
