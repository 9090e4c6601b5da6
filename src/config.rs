// src/config.rs

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use crate::git::LocalRepo;
use crate::github::GitHubClient;
use crate::task::CommitSource;
use crate::types::repo_id::RepoId;

#[derive(Parser, Debug)]
#[command(name = "commit_view")]
#[command(about = "Terminal viewer for one commit: message, parents, diffs and comments", long_about = None)]
pub struct Cli {
    /// Commit to show (sha, branch or any revision the source resolves)
    pub base: String,

    /// Hosted repository as <owner>/<name>
    #[arg(long, short)]
    pub repo: Option<RepoId>,

    /// Read from a local git repository instead of the API (default: current dir)
    #[arg(long, short, conflicts_with = "repo")]
    pub local: Option<PathBuf>,

    /// Base URL of the REST API
    #[arg(long, env = "COMMIT_VIEW_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// API token sent as a bearer token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Where log output goes; the terminal belongs to the UI
    #[arg(long, default_value = "commit_view.log")]
    pub log_file: PathBuf,
}

pub struct Config {
    pub repo: RepoId,
    pub base: String,
    pub source: CommitSource,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        if cli.base.trim().is_empty() {
            bail!("commit reference must not be empty");
        }

        let (repo, source) = match cli.repo {
            Some(repo) => {
                let url = reqwest::Url::parse(&cli.api_url)
                    .with_context(|| format!("invalid API url `{}`", cli.api_url))?;
                if !matches!(url.scheme(), "http" | "https") {
                    bail!("API url must be http(s), got `{}`", cli.api_url);
                }
                let client = GitHubClient::new(&cli.api_url, cli.token);
                (repo, CommitSource::Remote(client))
            }
            None => {
                let local = LocalRepo::new(cli.local.unwrap_or_else(|| PathBuf::from(".")));
                (local.repo_id(), CommitSource::Local(local))
            }
        };

        Ok(Self {
            repo,
            base: cli.base.trim().to_string(),
            source,
            log_file: cli.log_file,
        })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, CommitSource::Remote(_))
    }
}
