//! Plain-text rendering of directory results.

use std::fmt::Write as _;

use studex_domain::{FailureKind, StudentRecord};

/// One line per record: identifier, name, roll number and image URL,
/// tab-separated.
pub fn roster(
    records: &[StudentRecord],
    empty: &str,
    image_url: impl Fn(&StudentRecord) -> String,
) -> String {
    if records.is_empty() {
        return format!("{empty}\n");
    }
    records.iter().fold(String::new(), |mut out, record| {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            record.id,
            record.display_name(),
            record.roll_no.as_deref().unwrap_or("-"),
            image_url(record)
        );
        out
    })
}

/// Detail view of one record.
pub fn detail(record: &StudentRecord, image_url: &str) -> String {
    let mut out = format!("{}\n", record.display_name());
    let fields = record.detail_fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        let _ = writeln!(out, "  {label:<width$}  {value}");
    }
    let _ = writeln!(out, "  {:<width$}  {image_url}", "Image");
    out
}

/// Failure line for stderr.
pub fn failure(kind: FailureKind, message: &str) -> String {
    if kind.is_retryable() {
        format!("{}: {message} (try again)", kind.title())
    } else {
        format!("{}: {message}", kind.title())
    }
}
