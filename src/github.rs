// src/github.rs

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::error::LoadError;
use crate::types::comment::CommitComment;
use crate::types::commit::{CommitFile, CommitIdentity, ParentRef, RepositoryCommit};
use crate::types::repo_id::RepoId;

const COMMENTS_PER_PAGE: usize = 100;

#[derive(Deserialize)]
struct WireUser {
    login: String,
}

#[derive(Deserialize)]
struct WireSignature {
    name: Option<String>,
    email: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct WireCommitDetail {
    #[serde(default)]
    message: String,
    author: Option<WireSignature>,
    committer: Option<WireSignature>,
    #[serde(default)]
    comment_count: u32,
}

#[derive(Deserialize)]
struct WireParent {
    sha: String,
}

#[derive(Deserialize)]
struct WireCommit {
    sha: String,
    commit: WireCommitDetail,
    author: Option<WireUser>,
    committer: Option<WireUser>,
    #[serde(default)]
    parents: Vec<WireParent>,
    #[serde(default)]
    files: Vec<CommitFile>,
}

#[derive(Deserialize)]
struct WireComment {
    id: u64,
    #[serde(default)]
    body: String,
    user: Option<WireUser>,
    path: Option<String>,
    position: Option<u32>,
    line: Option<u32>,
    created_at: Option<DateTime<Utc>>,
}

fn identity(signature: Option<WireSignature>, user: Option<WireUser>) -> Option<CommitIdentity> {
    let login = user.map(|u| u.login);
    match signature {
        Some(sig) => Some(CommitIdentity {
            name: sig.name,
            email: sig.email,
            login,
            date: sig.date,
        }),
        None => login.map(|login| CommitIdentity {
            login: Some(login),
            ..CommitIdentity::default()
        }),
    }
}

impl From<WireCommit> for RepositoryCommit {
    fn from(wire: WireCommit) -> Self {
        RepositoryCommit {
            sha: wire.sha,
            message: wire.commit.message,
            author: identity(wire.commit.author, wire.author),
            committer: identity(wire.commit.committer, wire.committer),
            parents: wire
                .parents
                .into_iter()
                .map(|p| ParentRef { sha: p.sha })
                .collect(),
            files: wire.files,
            comment_count: wire.commit.comment_count,
        }
    }
}

impl From<WireComment> for CommitComment {
    fn from(wire: WireComment) -> Self {
        CommitComment {
            id: wire.id,
            user: wire.user.map(|u| u.login),
            body: wire.body,
            path: wire.path,
            position: wire.position,
            line: wire.line,
            created_at: wire.created_at,
        }
    }
}

pub fn parse_commit(json: &str) -> Result<RepositoryCommit, LoadError> {
    let wire: WireCommit = serde_json::from_str(json)?;
    Ok(wire.into())
}

pub fn parse_comments(json: &str) -> Result<Vec<CommitComment>, LoadError> {
    let wire: Vec<WireComment> = serde_json::from_str(json)?;
    Ok(wire.into_iter().map(CommitComment::from).collect())
}

/// Minimal client for the commit endpoints of the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn commit_url(&self, repo: &RepoId, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_url, repo.owner, repo.name, sha
        )
    }

    async fn get(&self, url: &str, not_found: &str) -> Result<String, LoadError> {
        debug!("GET {url}");
        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("commit_view/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(LoadError::NotFound(not_found.to_string()))
            }
            status if !status.is_success() => Err(LoadError::Status {
                url: url.to_string(),
                status,
            }),
            _ => Ok(response.text().await?),
        }
    }

    pub async fn commit(&self, repo: &RepoId, sha: &str) -> Result<RepositoryCommit, LoadError> {
        let body = self.get(&self.commit_url(repo, sha), sha).await?;
        parse_commit(&body)
    }

    pub async fn comments(&self, repo: &RepoId, sha: &str) -> Result<Vec<CommitComment>, LoadError> {
        let mut comments = Vec::new();
        for page in 1.. {
            let url = format!(
                "{}/comments?per_page={COMMENTS_PER_PAGE}&page={page}",
                self.commit_url(repo, sha)
            );
            let batch = parse_comments(&self.get(&url, sha).await?)?;
            let done = batch.len() < COMMENTS_PER_PAGE;
            comments.extend(batch);
            if done {
                break;
            }
        }
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMIT: &str = r#"{
        "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
        "commit": {
            "message": "Fix all the bugs\n\nLonger description",
            "author": {"name": "Monalisa Octocat", "email": "mona@github.com", "date": "2011-04-14T16:00:49Z"},
            "committer": {"name": "Hubot", "email": "hubot@github.com", "date": "2011-04-15T10:00:00Z"},
            "comment_count": 2
        },
        "author": {"login": "octocat", "id": 1},
        "committer": null,
        "parents": [{"sha": "7638417db6d59f3c431d3e1f261cc637155684cd", "url": "x"}],
        "files": [
            {"filename": "file1.txt", "additions": 10, "deletions": 2, "changes": 12,
             "status": "modified", "patch": "@@ -29,7 +29,9 @@\n-a\n+b"},
            {"filename": "logo.png", "status": "added", "additions": 0, "deletions": 0},
            {"filename": "weird", "status": "something-new"}
        ]
    }"#;

    #[test]
    fn parses_commit_payload() {
        let commit = parse_commit(COMMIT).unwrap();
        assert_eq!(commit.sha, "6dcb09b5b57875f334f61aebed695e2e4193db5e");
        assert_eq!(commit.comment_count, 2);
        assert_eq!(commit.parents.len(), 1);

        let author = commit.author.as_ref().unwrap();
        assert_eq!(author.display_name(), Some("octocat"));
        assert_eq!(author.email.as_deref(), Some("mona@github.com"));

        let committer = commit.committer.as_ref().unwrap();
        assert_eq!(committer.display_name(), Some("Hubot"));
        assert!(committer.login.is_none());

        assert_eq!(commit.files.len(), 3);
        assert_eq!(commit.files[0].additions, 10);
        assert!(commit.files[1].patch.is_none());
        assert_eq!(commit.files[2].status, crate::types::commit::FileStatus::Unknown);
    }

    #[test]
    fn parses_comment_payload() {
        let json = r#"[
            {"id": 1, "body": "nice", "user": {"login": "octocat"}, "path": "file1.txt",
             "position": 4, "line": 14, "created_at": "2011-04-14T16:00:49Z"},
            {"id": 2, "body": "overall", "user": null, "path": null, "position": null,
             "line": null, "created_at": "2011-04-14T16:00:49Z"}
        ]"#;
        let comments = parse_comments(json).unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments[0].is_line_comment());
        assert_eq!(comments[0].user.as_deref(), Some("octocat"));
        assert!(!comments[1].is_line_comment());
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        assert!(matches!(parse_commit("{}"), Err(LoadError::Decode(_))));
    }

    #[test]
    fn builds_commit_urls() {
        let client = GitHubClient::new("https://api.github.com/", None);
        assert_eq!(
            client.commit_url(&RepoId::new("octo", "hello"), "abc"),
            "https://api.github.com/repos/octo/hello/commits/abc"
        );
    }
}
