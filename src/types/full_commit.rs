// src/types/full_commit.rs

use std::collections::BTreeMap;

use super::comment::CommitComment;
use super::commit::{CommitFile, RepositoryCommit};

/// A changed file together with the line comments left on its patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullCommitFile {
    pub file: CommitFile,
    comments: BTreeMap<u32, Vec<CommitComment>>,
}

impl FullCommitFile {
    pub fn new(file: CommitFile) -> Self {
        Self {
            file,
            comments: BTreeMap::new(),
        }
    }

    fn add(&mut self, position: u32, comment: CommitComment) {
        self.comments.entry(position).or_default().push(comment);
    }

    pub fn comments_at(&self, position: u32) -> &[CommitComment] {
        self.comments
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Comments at `position` or later, in position order.
    pub fn comments_from(&self, position: u32) -> impl Iterator<Item = &CommitComment> + '_ {
        self.comments.range(position..).flat_map(|(_, comments)| comments.iter())
    }

    #[cfg(test)]
    pub fn comment_count(&self) -> usize {
        self.comments.values().map(Vec::len).sum()
    }
}

/// Everything the commit screen renders: the commit, its files with line
/// comments, and the remaining commit-level comments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullCommit {
    pub commit: RepositoryCommit,
    pub files: Vec<FullCommitFile>,
    pub comments: Vec<CommitComment>,
}

impl FullCommit {
    pub fn new(commit: RepositoryCommit, comments: Vec<CommitComment>) -> Self {
        let mut files: Vec<FullCommitFile> = commit
            .files
            .iter()
            .cloned()
            .map(FullCommitFile::new)
            .collect();
        let mut general = Vec::new();

        for comment in comments {
            let target = match (&comment.path, comment.position) {
                (Some(path), Some(position)) => files
                    .iter_mut()
                    .find(|f| &f.file.filename == path)
                    .map(|f| (f, position)),
                _ => None,
            };
            match target {
                Some((file, position)) => file.add(position, comment),
                None => general.push(comment),
            }
        }

        Self {
            commit,
            files,
            comments: general,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> CommitFile {
        CommitFile {
            filename: name.to_string(),
            ..CommitFile::default()
        }
    }

    fn comment(id: u64, path: Option<&str>, position: Option<u32>) -> CommitComment {
        CommitComment {
            id,
            user: Some("octocat".to_string()),
            body: format!("comment {id}"),
            path: path.map(str::to_string),
            position,
            line: None,
            created_at: None,
        }
    }

    #[test]
    fn partitions_line_comments_from_general_comments() {
        let commit = RepositoryCommit {
            sha: "abc".to_string(),
            files: vec![file("a.rs"), file("b.rs")],
            ..RepositoryCommit::default()
        };
        let full = FullCommit::new(
            commit,
            vec![
                comment(1, Some("a.rs"), Some(2)),
                comment(2, None, None),
                comment(3, Some("b.rs"), None),
                comment(4, Some("missing.rs"), Some(1)),
                comment(5, Some("a.rs"), Some(2)),
            ],
        );

        let ids: Vec<u64> = full.files[0].comments_at(2).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert!(full.files[0].comments_at(1).is_empty());
        assert_eq!(full.files[1].comment_count(), 0);
        assert_eq!(full.files[0].comments_from(3).count(), 0);
        assert_eq!(full.files[0].comments_from(0).count(), 2);

        let general: Vec<u64> = full.comments.iter().map(|c| c.id).collect();
        assert_eq!(general, vec![2, 3, 4]);
    }

    #[test]
    fn keeps_file_order() {
        let commit = RepositoryCommit {
            files: vec![file("z"), file("a")],
            ..RepositoryCommit::default()
        };
        let full = FullCommit::new(commit, Vec::new());
        let names: Vec<&str> = full.files.iter().map(|f| f.file.filename.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }
}
