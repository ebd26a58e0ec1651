use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct DiaryEntry {
    pub id: usize,
    pub created: DateTime<Local>,
    pub title: String,
    pub body: String,
}

impl DiaryEntry {
    pub fn new(id: usize, title: String, body: String) -> Self {
        DiaryEntry {
            id,
            created: Local::now(),
            title,
            body,
        }
    }

    /// First line of the body, used as the one-line preview in the list.
    pub fn preview(&self) -> &str {
        self.body.lines().next().unwrap_or("")
    }
}
