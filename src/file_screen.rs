// src/file_screen.rs

use tui::style::{Color, Style};
use tui::text::{Span, Spans};

use crate::commit_utils;
use crate::diff_styler::{self, LineKind};
use crate::types::commit::CommitFile;
use crate::types::repo_id::RepoId;

/// Full diff of one file from a commit, with old/new line numbers.
pub struct FileScreen {
    pub repo: RepoId,
    pub base: String,
    pub file: CommitFile,
    pub lines: Vec<Spans<'static>>,
    pub scroll: u16,
}

fn gutter(num: Option<u32>) -> String {
    num.map_or_else(|| "     ".to_string(), |n| format!("{n:>5}"))
}

impl FileScreen {
    pub fn new(repo: RepoId, base: String, file: CommitFile) -> Self {
        let lines = match file.patch.as_deref() {
            Some(patch) => diff_styler::number_lines(patch)
                .into_iter()
                .map(|line| {
                    let number_style = Style::default().fg(Color::DarkGray);
                    Spans::from(vec![
                        Span::styled(gutter(line.old_num), number_style),
                        Span::styled(format!("{} ", gutter(line.new_num)), number_style),
                        Span::styled(line.text, line.kind.style()),
                    ])
                })
                .collect(),
            None => vec![Spans::from(Span::styled(
                "No textual diff available (binary or too large)",
                LineKind::Marker.style(),
            ))],
        };
        Self {
            repo,
            base,
            file,
            lines,
            scroll: 0,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "{} @ {}: {}",
            self.repo,
            commit_utils::abbreviate(&self.base),
            self.file.filename
        )
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, step: u16) {
        self.scroll = self.scroll.saturating_add(step).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, step: u16) {
        self.scroll = self.scroll.saturating_sub(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(patch: Option<&str>) -> FileScreen {
        FileScreen::new(
            RepoId::new("octo", "hello"),
            "0123456789abcdef".into(),
            CommitFile {
                filename: "src/lib.rs".into(),
                patch: patch.map(str::to_string),
                ..CommitFile::default()
            },
        )
    }

    #[test]
    fn renders_numbered_patch_lines() {
        let screen = screen(Some("@@ -3 +3 @@\n-old\n+new"));
        assert_eq!(screen.lines.len(), 3);
        assert_eq!(screen.lines[1].0[0].content, "    3");
        assert_eq!(screen.lines[2].0[1].content, "    3 ");
        assert_eq!(screen.title(), "octo/hello @ 0123456789: src/lib.rs");
    }

    #[test]
    fn missing_patch_shows_placeholder() {
        let screen = screen(None);
        assert_eq!(screen.lines.len(), 1);
    }

    #[test]
    fn scrolling_stays_in_bounds() {
        let mut screen = screen(Some("@@ -1 +1 @@\n-a\n+b"));
        screen.scroll_up(5);
        assert_eq!(screen.scroll, 0);
        screen.scroll_down(10);
        assert_eq!(screen.scroll, 2);
    }
}
