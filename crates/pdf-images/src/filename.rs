//! Output filename resolution

use chrono::{Local, NaiveDateTime};

use crate::constants::TIMESTAMP_FORMAT;

/// Used when no document name is given
pub const DEFAULT_FILE_NAME: &str = "CalcForEverything_ImagesToPdf";

pub const PDF_EXTENSION: &str = "pdf";

/// Build the output filename.
///
/// An empty (or blank) name becomes [`DEFAULT_FILE_NAME`]. A trailing
/// `.pdf` on the given name is dropped so the extension is never doubled.
/// With `append_date_time`, `_ddMMyyyy_HHmmss` from `now` goes before the
/// extension.
pub fn resolve_file_name(name: &str, append_date_time: bool, now: NaiveDateTime) -> String {
    let name = name.trim();
    let mut stem = strip_pdf_extension(name).trim_end();
    if stem.is_empty() {
        stem = DEFAULT_FILE_NAME;
    }

    if append_date_time {
        format!(
            "{}_{}.{}",
            stem,
            now.format(TIMESTAMP_FORMAT),
            PDF_EXTENSION
        )
    } else {
        format!("{}.{}", stem, PDF_EXTENSION)
    }
}

/// [`resolve_file_name`] stamped with the local time
pub fn resolve_file_name_now(name: &str, append_date_time: bool) -> String {
    resolve_file_name(name, append_date_time, Local::now().naive_local())
}

fn strip_pdf_extension(name: &str) -> &str {
    let suffix_len = PDF_EXTENSION.len() + 1;
    if name.len() >= suffix_len {
        let split = name.len() - suffix_len;
        if name.is_char_boundary(split) {
            let (stem, ext) = name.split_at(split);
            if ext.eq_ignore_ascii_case(".pdf") {
                return stem;
            }
        }
    }
    name
}
