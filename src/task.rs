// src/task.rs

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::commit_utils;
use crate::error::LoadError;
use crate::git::LocalRepo;
use crate::github::GitHubClient;
use crate::types::comment::CommitComment;
use crate::types::commit::RepositoryCommit;
use crate::types::full_commit::FullCommit;
use crate::types::repo_id::RepoId;

/// Where commits are loaded from.
#[derive(Clone)]
pub enum CommitSource {
    Remote(GitHubClient),
    Local(LocalRepo),
}

impl CommitSource {
    pub async fn load(&self, repo: &RepoId, base: &str) -> Result<FullCommit, LoadError> {
        match self {
            CommitSource::Remote(client) => {
                let commit = client.commit(repo, base).await?;
                let comments = if commit.comment_count > 0 {
                    client.comments(repo, &commit.sha).await?
                } else {
                    Vec::new()
                };
                Ok(assemble(commit, comments))
            }
            CommitSource::Local(local) => {
                let local = local.clone();
                let base = base.to_string();
                let commit = tokio::task::spawn_blocking(move || local.load_commit(&base)).await??;
                Ok(assemble(commit, Vec::new()))
            }
        }
    }
}

/// Sorts the files for display and groups the comments onto them.
pub fn assemble(mut commit: RepositoryCommit, comments: Vec<CommitComment>) -> FullCommit {
    commit_utils::sort_files(&mut commit.files);
    FullCommit::new(commit, comments)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub repo: RepoId,
    pub base: String,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub id: u64,
    pub result: Result<FullCommit, LoadError>,
}

/// Runs commit fetches in the background and reports each result on a channel.
pub struct RefreshCommitTask {
    source: Arc<CommitSource>,
    sender: mpsc::Sender<FetchOutcome>,
}

impl RefreshCommitTask {
    pub fn new(source: CommitSource, sender: mpsc::Sender<FetchOutcome>) -> Self {
        Self {
            source: Arc::new(source),
            sender,
        }
    }

    pub fn execute(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            info!(repo = %request.repo, base = %request.base, "loading commit");
            let result = source.load(&request.repo, &request.base).await;
            match &result {
                Ok(full) => info!(
                    sha = %full.commit.sha,
                    files = full.files.len(),
                    comments = full.comments.len(),
                    "commit loaded"
                ),
                Err(e) => warn!(base = %request.base, "commit load failed: {e}"),
            }
            let _ = sender
                .send(FetchOutcome {
                    id: request.id,
                    result,
                })
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::commit::CommitFile;

    #[test]
    fn assemble_sorts_files_before_grouping() {
        let commit = RepositoryCommit {
            files: vec![
                CommitFile {
                    filename: "src/main.rs".into(),
                    ..CommitFile::default()
                },
                CommitFile {
                    filename: "Cargo.toml".into(),
                    ..CommitFile::default()
                },
            ],
            ..RepositoryCommit::default()
        };
        let full = assemble(commit, Vec::new());
        assert_eq!(full.commit.files[0].filename, "Cargo.toml");
        assert_eq!(full.files[0].file.filename, "Cargo.toml");
    }

    #[tokio::test]
    async fn local_failures_are_reported_on_the_channel() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        git2::Repository::init(temp.path()).expect("init");
        let (tx, mut rx) = mpsc::channel(1);
        let task = RefreshCommitTask::new(CommitSource::Local(LocalRepo::new(temp.path())), tx);

        task.execute(FetchRequest {
            id: 7,
            repo: RepoId::new("local", "empty"),
            base: "HEAD".into(),
        });

        let outcome = rx.recv().await.expect("outcome");
        assert_eq!(outcome.id, 7);
        assert!(outcome.result.is_err());
    }
}
