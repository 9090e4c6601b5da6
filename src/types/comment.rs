// src/types/comment.rs

use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitComment {
    pub id: u64,
    pub user: Option<String>,
    pub body: String,
    /// File the comment is attached to; `None` for commit-level comments.
    pub path: Option<String>,
    /// Line offset into the file's patch, counted from the first hunk header.
    pub position: Option<u32>,
    pub line: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CommitComment {
    #[cfg(test)]
    pub fn is_line_comment(&self) -> bool {
        self.path.is_some() && self.position.is_some()
    }
}
