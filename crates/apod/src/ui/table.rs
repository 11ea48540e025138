use apod_fetch::ImageRecord;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

#[derive(Debug, Clone, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "DATE")]
    pub date: String,
    #[tabled(rename = "TITLE")]
    pub title: String,
    #[tabled(rename = "TYPE")]
    pub media_type: String,
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&ImageRecord> for RecordRow {
    fn from(record: &ImageRecord) -> Self {
        Self {
            date: record.date.clone(),
            title: record.title.clone(),
            media_type: if record.media_type.is_empty() {
                "-".to_string()
            } else {
                record.media_type.clone()
            },
            url: record.best_url().unwrap_or("-").to_string(),
        }
    }
}

/// Render `records` as a table with a count footer.
pub fn records_table(records: &[ImageRecord]) -> Table {
    let mut table = Table::new(records.iter().map(RecordRow::from));
    table
        .with(Panel::footer(format!("{} image(s)", records.len())))
        .with(Style::blank());
    table
}
