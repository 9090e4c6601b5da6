// src/commit_screen.rs

use chrono::{DateTime, Utc};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::ListState;

use crate::avatar::AvatarLoader;
use crate::comment_renderer;
use crate::commit_utils;
use crate::diff_styler::DiffStyler;
use crate::list::HeaderFooterList;
use crate::navigation::{self, CommitRow, Navigation};
use crate::types::comment::CommitComment;
use crate::types::commit::{CommitFile, CommitIdentity, FileStatus, RepositoryCommit};
use crate::types::full_commit::{FullCommit, FullCommitFile};
use crate::types::repo_id::RepoId;

pub enum LoadState {
    Loading,
    Loaded(Box<FullCommit>),
}

/// Commit details with diff output for every changed file.
pub struct CommitScreen {
    pub repo: RepoId,
    pub base: String,
    pub request_id: u64,
    pub state: LoadState,
    pub list: HeaderFooterList<CommitRow>,
    pub list_state: ListState,
    styler: DiffStyler,
}

impl CommitScreen {
    pub fn new(repo: RepoId, base: impl Into<String>, request_id: u64) -> Self {
        Self {
            repo,
            base: base.into(),
            request_id,
            state: LoadState::Loading,
            list: HeaderFooterList::new(),
            list_state: ListState::default(),
            styler: DiffStyler::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn title(&self) -> String {
        match &self.state {
            LoadState::Loaded(full) => format!(
                "{} @ {}",
                self.repo,
                commit_utils::abbreviate(&full.commit.sha)
            ),
            LoadState::Loading => format!("{} @ {}", self.repo, self.base),
        }
    }

    /// Rebuilds every row from `full` and makes it the displayed snapshot.
    pub fn update_list(&mut self, full: FullCommit, avatars: &mut AvatarLoader, now: DateTime<Utc>) {
        self.styler.set_files(&full.commit.files);
        self.list.clear();

        self.add_commit_details(&full.commit, avatars, now);
        self.add_commit_parents(&full.commit);
        self.add_diff_stats(&full.commit);

        for file in &full.files {
            self.add_file(file, now);
        }
        for comment in &full.comments {
            self.add_comment(comment, "", now);
        }

        self.list.add_footer(vec![Spans::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        ))]);

        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some(selected.min(self.list.len().saturating_sub(1))));
        self.state = LoadState::Loaded(Box::new(full));
    }

    fn identity_line(
        avatars: &mut AvatarLoader,
        identity: &CommitIdentity,
        name: &str,
        verb: &str,
        date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Spans<'static> {
        let mut when = verb.to_string();
        if let Some(date) = date {
            when.push(' ');
            when.push_str(&commit_utils::relative_date(date, now));
        }
        Spans::from(vec![
            avatars.bind(identity),
            Span::raw(" "),
            Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(when, Style::default().fg(Color::DarkGray)),
        ])
    }

    fn add_commit_details(
        &mut self,
        commit: &RepositoryCommit,
        avatars: &mut AvatarLoader,
        now: DateTime<Utc>,
    ) {
        let mut lines = Vec::new();
        for (i, line) in commit.message.lines().enumerate() {
            let style = if i == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Spans::from(Span::styled(line.to_string(), style)));
        }
        lines.push(Spans::default());

        let author = commit_utils::author(commit);
        let author_date = commit_utils::author_date(commit);
        let committer = commit_utils::committer(commit);
        let committer_date = commit_utils::committer_date(commit);

        if let (Some(name), Some(identity)) = (author, commit.author.as_ref()) {
            lines.push(Self::identity_line(
                avatars,
                identity,
                name,
                "authored",
                author_date,
                now,
            ));
        }

        if commit_utils::is_different_committer(author, author_date, committer, committer_date) {
            if let (Some(name), Some(identity)) = (committer, commit.committer.as_ref()) {
                lines.push(Self::identity_line(
                    avatars,
                    identity,
                    name,
                    "committed",
                    committer_date,
                    now,
                ));
            }
        }

        self.list.add_header(lines, None);
    }

    fn add_commit_parents(&mut self, commit: &RepositoryCommit) {
        for parent in &commit.parents {
            let line = Spans::from(vec![
                Span::raw("Parent "),
                Span::styled(
                    commit_utils::abbreviate(&parent.sha).to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]);
            self.list
                .add_header(vec![line], Some(CommitRow::Parent(parent.clone())));
        }
    }

    fn add_diff_stats(&mut self, commit: &RepositoryCommit) {
        let summary = commit_utils::format_stats(&commit.files);
        self.list.add_header(
            vec![Spans::from(Span::styled(
                summary,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ))],
            None,
        );
    }

    fn file_header(file: &CommitFile) -> Spans<'static> {
        let status_style = match file.status {
            FileStatus::Added => Style::default().fg(Color::Green),
            FileStatus::Removed => Style::default().fg(Color::Red),
            FileStatus::Renamed | FileStatus::Copied => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::Yellow),
        };
        let name = match &file.previous_filename {
            Some(previous) => format!("{previous} → {}", file.filename),
            None => file.filename.clone(),
        };
        Spans::from(vec![
            Span::styled(format!("{} ", file.status.marker()), status_style),
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!("+{}", file.additions), Style::default().fg(Color::Green)),
            Span::raw(" "),
            Span::styled(format!("-{}", file.deletions), Style::default().fg(Color::Red)),
        ])
    }

    fn add_file(&mut self, file: &FullCommitFile, now: DateTime<Utc>) {
        self.list.add_item(
            vec![Self::file_header(&file.file)],
            Some(CommitRow::File(file.file.clone())),
        );

        let lines = self.styler.get(&file.file.filename).to_vec();
        let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        for (position, line) in (0u32..).zip(lines) {
            self.list.add_item(vec![line], Some(CommitRow::Line));
            for comment in file.comments_at(position) {
                self.add_comment(comment, "    ", now);
            }
        }
        // comments positioned past the end of the patch still get shown
        for comment in file.comments_from(count) {
            self.add_comment(comment, "    ", now);
        }
    }

    fn add_comment(&mut self, comment: &CommitComment, indent: &str, now: DateTime<Utc>) {
        let mut heading = vec![
            Span::raw(indent.to_string()),
            Span::styled("▌ ", Style::default().fg(Color::Blue)),
            Span::styled(
                comment.user.clone().unwrap_or_else(|| "ghost".to_string()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(line) = comment.line {
            heading.push(Span::styled(
                format!(" on line {line}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(created) = comment.created_at {
            heading.push(Span::styled(
                format!(" · {}", commit_utils::relative_date(created, now)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let mut lines = vec![Spans::from(heading)];
        lines.extend(comment_renderer::render(
            &comment.body,
            &format!("{indent}  "),
        ));
        self.list
            .add_item(lines, Some(CommitRow::Comment(comment.clone())));
    }

    pub fn selected_row(&self) -> Option<&CommitRow> {
        self.list_state
            .selected()
            .and_then(|i| self.list.item_at(i))
    }

    pub fn activate(&self) -> Option<Navigation> {
        if self.is_loading() {
            return None;
        }
        navigation::route(&self.repo, &self.base, self.selected_row())
    }

    #[cfg(test)]
    pub fn select(&mut self, position: usize) {
        if position < self.list.len() {
            self.list_state.select(Some(position));
        }
    }

    pub fn select_next(&mut self, step: usize) {
        let len = self.list.len();
        if len == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| (i + step).min(len - 1));
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self, step: usize) {
        if self.list.is_empty() {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_sub(step));
        self.list_state.select(Some(i));
    }
}
