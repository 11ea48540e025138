use std::fmt::Write;

use apod_fetch::ImageRecord;
use console::style;

/// Long-form listing: title, date, credit, explanation and full-size link.
pub fn render_details(records: &[ImageRecord]) -> String {
    let mut out = String::new();
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{} {}",
            style(&record.date).dim(),
            style(&record.title).bold()
        );
        if let Some(copyright) = record.copyright.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            let _ = writeln!(out, "© {copyright}");
        }
        if !record.explanation.trim().is_empty() {
            let _ = writeln!(out, "{}", record.explanation.trim());
        }
        if let Some(url) = record.best_detail_url() {
            let _ = writeln!(out, "{}", style(url).underlined());
        }
    }
    out
}
