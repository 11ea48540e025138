//! Terminal presentation: spinner, tables, details and prompts.

mod details;
mod prompt;
mod table;
mod tracker;

pub use details::render_details;
pub use prompt::{Answer, ask_retry};
pub use table::records_table;
pub use tracker::FetchTracker;
