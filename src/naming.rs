//! Document title and output file name derived from the candidate and the date.

use chrono::{Datelike, NaiveDate};

/// Month and year as in `October-2026`.
pub fn date_label(date: impl Datelike) -> String {
    match NaiveDate::from_ymd_opt(date.year(), date.month(), 1) {
        Some(first) => first.format("%B-%Y").to_string(),
        None => format!("{:02}-{}", date.month(), date.year()),
    }
}

/// Title stored in the PDF metadata, e.g. `Candidate Name - CV - October-2026`.
pub fn document_title(candidate: &str, date: impl Datelike) -> String {
    format!("{} - CV - {}", candidate, date_label(date))
}

/// File name the résumé is written to.
pub fn output_file_name(candidate: &str, date: impl Datelike) -> String {
    format!("{}.pdf", document_title(candidate, date))
}
