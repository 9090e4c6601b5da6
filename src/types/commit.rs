// src/types/commit.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Author or committer of a commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Hosting account login, when the identity maps to a known user.
    pub login: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl CommitIdentity {
    /// Name shown in the UI: the account login when there is one, else the raw name.
    pub fn display_name(&self) -> Option<&str> {
        self.login.as_deref().or(self.name.as_deref())
    }

    /// Key used for avatar lookups.
    pub fn avatar_key(&self) -> Option<&str> {
        self.login
            .as_deref()
            .or(self.email.as_deref())
            .or(self.name.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentRef {
    pub sha: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    #[default]
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

impl FileStatus {
    pub fn marker(self) -> &'static str {
        match self {
            FileStatus::Added => "A",
            FileStatus::Removed => "D",
            FileStatus::Modified | FileStatus::Changed => "M",
            FileStatus::Renamed => "R",
            FileStatus::Copied => "C",
            FileStatus::Unchanged => "=",
            FileStatus::Unknown => "?",
        }
    }
}

/// A file touched by a commit, with its unified patch text when available.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CommitFile {
    #[serde(default)]
    pub sha: Option<String>,
    pub filename: String,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub patch: Option<String>,
    #[serde(default)]
    pub previous_filename: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepositoryCommit {
    pub sha: String,
    pub message: String,
    pub author: Option<CommitIdentity>,
    pub committer: Option<CommitIdentity>,
    pub parents: Vec<ParentRef>,
    pub files: Vec<CommitFile>,
    pub comment_count: u32,
}
