// src/git.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::{self, Commit, Delta, DiffFindOptions, DiffFormat, ErrorCode, Repository, Signature};

use crate::error::LoadError;
use crate::types::commit::{CommitFile, CommitIdentity, FileStatus, ParentRef, RepositoryCommit};
use crate::types::repo_id::RepoId;

/// Commit source backed by a repository on disk.
#[derive(Clone, Debug)]
pub struct LocalRepo {
    path: PathBuf,
}

impl LocalRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Identifier shown in titles; local repositories have no owner.
    pub fn repo_id(&self) -> RepoId {
        let name = self
            .path
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "repository".to_string());
        RepoId::new("local", name)
    }

    /// Blocking; run it off the UI task.
    pub fn load_commit(&self, base: &str) -> Result<RepositoryCommit, LoadError> {
        let repo = Repository::discover(&self.path)?;
        let commit = find_commit(&repo, base)?;
        build_commit(&repo, &commit)
    }
}

fn find_commit<'r>(repo: &'r Repository, base: &str) -> Result<Commit<'r>, LoadError> {
    let object = repo.revparse_single(base).map_err(|e| match e.code() {
        ErrorCode::NotFound | ErrorCode::Ambiguous => LoadError::NotFound(base.to_string()),
        _ => LoadError::Git(e),
    })?;
    Ok(object.peel_to_commit()?)
}

fn timestamp(signature: &Signature) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(signature.when().seconds(), 0).single()
}

fn identity(signature: &Signature) -> CommitIdentity {
    CommitIdentity {
        name: signature.name().map(str::to_string),
        email: signature.email().map(str::to_string),
        login: None,
        date: timestamp(signature),
    }
}

fn file_status(delta: Delta) -> FileStatus {
    match delta {
        Delta::Added | Delta::Untracked => FileStatus::Added,
        Delta::Deleted => FileStatus::Removed,
        Delta::Modified => FileStatus::Modified,
        Delta::Renamed => FileStatus::Renamed,
        Delta::Copied => FileStatus::Copied,
        Delta::Typechange => FileStatus::Changed,
        Delta::Unmodified => FileStatus::Unchanged,
        _ => FileStatus::Unknown,
    }
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

fn build_commit(repo: &Repository, commit: &Commit) -> Result<RepositoryCommit, LoadError> {
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };
    let tree = commit.tree()?;
    let mut diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

    let mut files = Vec::new();
    let mut index_by_path = HashMap::new();
    for delta in diff.deltas() {
        let new_path = path_string(delta.new_file().path());
        let old_path = path_string(delta.old_file().path());
        let filename = new_path.clone().or_else(|| old_path.clone()).unwrap_or_default();
        let status = file_status(delta.status());
        index_by_path.insert(filename.clone(), files.len());
        files.push(CommitFile {
            sha: Some(delta.new_file().id().to_string()),
            filename,
            status,
            additions: 0,
            deletions: 0,
            patch: None,
            previous_filename: if status == FileStatus::Renamed { old_path } else { None },
        });
    }

    diff.print(DiffFormat::Patch, |delta, _hunk, line| {
        let path = path_string(delta.new_file().path()).or_else(|| path_string(delta.old_file().path()));
        let Some(file) = path
            .and_then(|p| index_by_path.get(&p).copied())
            .and_then(|i| files.get_mut(i))
        else {
            return true;
        };
        let content = String::from_utf8_lossy(line.content());
        let text = match line.origin() {
            '+' => {
                file.additions += 1;
                format!("+{content}")
            }
            '-' => {
                file.deletions += 1;
                format!("-{content}")
            }
            ' ' => format!(" {content}"),
            'H' => content.into_owned(),
            _ => return true,
        };
        let patch = file.patch.get_or_insert_with(String::new);
        patch.push_str(&text);
        if !text.ends_with('\n') {
            patch.push('\n');
        }
        true
    })?;

    for file in &mut files {
        if let Some(patch) = &mut file.patch {
            patch.truncate(patch.trim_end_matches('\n').len());
        }
    }

    Ok(RepositoryCommit {
        sha: commit.id().to_string(),
        message: commit.message().unwrap_or_default().trim_end().to_string(),
        author: Some(identity(&commit.author())),
        committer: Some(identity(&commit.committer())),
        parents: commit
            .parent_ids()
            .map(|id| ParentRef { sha: id.to_string() })
            .collect(),
        files,
        comment_count: 0,
    })
}
