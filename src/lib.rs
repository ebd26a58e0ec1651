pub mod cli;
pub mod config;
pub mod diary_entry;
pub mod diary_state;
pub mod logging;
pub mod ui;

pub use config::Config;
pub use diary_entry::DiaryEntry;
pub use diary_state::{AddDialog, AddRejected, DiarySnapshot, DiaryState, IdPolicy};
