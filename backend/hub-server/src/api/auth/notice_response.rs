use serde::Serialize;

/// One-line status message for the client to display
#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub notice: String,
}

impl NoticeResponse {
    pub fn new(notice: &str) -> Self {
        Self {
            notice: notice.to_string(),
        }
    }
}
