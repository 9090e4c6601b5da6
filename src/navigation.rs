// src/navigation.rs

use crate::types::comment::CommitComment;
use crate::types::commit::{CommitFile, ParentRef};
use crate::types::repo_id::RepoId;

/// What a row of the commit list refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitRow {
    Parent(ParentRef),
    File(CommitFile),
    Line,
    Comment(CommitComment),
}

/// A screen to open next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Commit {
        repo: RepoId,
        sha: String,
    },
    File {
        repo: RepoId,
        base: String,
        file: CommitFile,
    },
}

/// Maps an activated row to the screen it opens. Rows that are neither a
/// parent nor a file open nothing.
pub fn route(repo: &RepoId, base: &str, row: Option<&CommitRow>) -> Option<Navigation> {
    match row? {
        CommitRow::Parent(parent) => Some(Navigation::Commit {
            repo: repo.clone(),
            sha: parent.sha.clone(),
        }),
        CommitRow::File(file) => Some(Navigation::File {
            repo: repo.clone(),
            base: base.to_string(),
            file: file.clone(),
        }),
        CommitRow::Line | CommitRow::Comment(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoId {
        RepoId::new("octo", "hello")
    }

    #[test]
    fn parent_rows_open_commits() {
        let row = CommitRow::Parent(ParentRef {
            sha: "deadbeef".into(),
        });
        assert_eq!(
            route(&repo(), "base", Some(&row)),
            Some(Navigation::Commit {
                repo: repo(),
                sha: "deadbeef".into()
            })
        );
    }

    #[test]
    fn file_rows_open_file_diffs() {
        let file = CommitFile {
            filename: "src/lib.rs".into(),
            ..CommitFile::default()
        };
        let row = CommitRow::File(file.clone());
        assert_eq!(
            route(&repo(), "base", Some(&row)),
            Some(Navigation::File {
                repo: repo(),
                base: "base".into(),
                file
            })
        );
    }

    #[test]
    fn other_rows_do_nothing() {
        assert_eq!(route(&repo(), "base", Some(&CommitRow::Line)), None);
        assert_eq!(route(&repo(), "base", None), None);
    }
}
