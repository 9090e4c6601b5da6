// src/diff_styler.rs

use std::collections::HashMap;

use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};

use crate::types::commit::CommitFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Added,
    Removed,
    Marker,
    Context,
}

impl LineKind {
    pub fn of(line: &str) -> Self {
        match line.as_bytes().first() {
            Some(b'+') => LineKind::Added,
            Some(b'-') => LineKind::Removed,
            Some(b'@') if line.starts_with("@@") => LineKind::Marker,
            _ => LineKind::Context,
        }
    }

    pub fn style(self) -> Style {
        match self {
            LineKind::Added => Style::default().fg(Color::Green),
            LineKind::Removed => Style::default().fg(Color::Red),
            LineKind::Marker => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::DIM),
            LineKind::Context => Style::default(),
        }
    }
}

/// Styled patch lines for every file of the current commit, keyed by filename.
#[derive(Default)]
pub struct DiffStyler {
    diffs: HashMap<String, Vec<Spans<'static>>>,
}

impl DiffStyler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_files(&mut self, files: &[CommitFile]) {
        self.diffs.clear();
        for file in files {
            let Some(patch) = file.patch.as_deref() else {
                continue;
            };
            self.diffs
                .insert(file.filename.clone(), style_patch(patch));
        }
    }

    pub fn get(&self, filename: &str) -> &[Spans<'static>] {
        self.diffs
            .get(filename)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

pub fn style_patch(patch: &str) -> Vec<Spans<'static>> {
    patch
        .lines()
        .map(|line| {
            let line = line.replace('\t', "    ");
            let style = LineKind::of(&line).style();
            Spans::from(Span::styled(line, style))
        })
        .collect()
}

/// A patch line with the old/new file line numbers it corresponds to.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberedLine {
    pub old_num: Option<u32>,
    pub new_num: Option<u32>,
    pub kind: LineKind,
    pub text: String,
}

/// Parses `@@ -a,b +c,d @@` into the starting old and new line numbers.
fn hunk_start(line: &str) -> Option<(u32, u32)> {
    let mut parts = line.strip_prefix("@@ ")?.split_whitespace();
    let old = parts.next()?.strip_prefix('-')?;
    let new = parts.next()?.strip_prefix('+')?;
    let start = |range: &str| range.split(',').next()?.parse::<u32>().ok();
    Some((start(old)?, start(new)?))
}

pub fn number_lines(patch: &str) -> Vec<NumberedLine> {
    let (mut old, mut new) = (0u32, 0u32);
    patch
        .lines()
        .map(|line| {
            let kind = LineKind::of(line);
            let (old_num, new_num) = match kind {
                LineKind::Marker => {
                    if let Some((o, n)) = hunk_start(line) {
                        old = o;
                        new = n;
                    }
                    (None, None)
                }
                LineKind::Added => {
                    new += 1;
                    (None, Some(new - 1))
                }
                LineKind::Removed => {
                    old += 1;
                    (Some(old - 1), None)
                }
                LineKind::Context => {
                    old += 1;
                    new += 1;
                    (Some(old - 1), Some(new - 1))
                }
            };
            NumberedLine {
                old_num,
                new_num,
                kind,
                text: line.replace('\t', "    "),
            }
        })
        .collect()
}
