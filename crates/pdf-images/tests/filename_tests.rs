use chrono::{NaiveDate, NaiveDateTime};
use pdf_images::*;

fn march_5th() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

#[test]
fn test_empty_name_with_timestamp() {
    assert_eq!(
        resolve_file_name("", true, march_5th()),
        "CalcForEverything_ImagesToPdf_05032024_143000.pdf"
    );
}

#[test]
fn test_empty_name_without_timestamp() {
    assert_eq!(
        resolve_file_name("", false, march_5th()),
        format!("{}.{}", DEFAULT_FILE_NAME, PDF_EXTENSION)
    );
    assert_eq!(
        resolve_file_name("   ", false, march_5th()),
        "CalcForEverything_ImagesToPdf.pdf"
    );
}

#[test]
fn test_given_name() {
    assert_eq!(resolve_file_name("album", false, march_5th()), "album.pdf");
    assert_eq!(
        resolve_file_name("album", true, march_5th()),
        "album_05032024_143000.pdf"
    );
}

#[test]
fn test_existing_extension_not_doubled() {
    assert_eq!(resolve_file_name("album.pdf", false, march_5th()), "album.pdf");
    assert_eq!(
        resolve_file_name("album.PDF", true, march_5th()),
        "album_05032024_143000.pdf"
    );
}

#[test]
fn test_names_passed_through() {
    // Not validated or sanitised
    assert_eq!(
        resolve_file_name("Été 2024 (copy)", false, march_5th()),
        "Été 2024 (copy).pdf"
    );
}

#[test]
fn test_now_variant_has_timestamp_shape() {
    let name = resolve_file_name_now("x", true);
    // x_ddMMyyyy_HHmmss.pdf
    assert_eq!(name.len(), "x_05032024_143000.pdf".len());
    assert!(name.starts_with("x_"));
    assert!(name.ends_with(".pdf"));
}
