// src/commit_utils.rs

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::types::commit::{CommitFile, RepositoryCommit};

const ABBREVIATED_LENGTH: usize = 10;

pub fn abbreviate(sha: &str) -> &str {
    match sha.char_indices().nth(ABBREVIATED_LENGTH) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

pub fn author(commit: &RepositoryCommit) -> Option<&str> {
    commit.author.as_ref().and_then(|a| a.display_name())
}

pub fn author_date(commit: &RepositoryCommit) -> Option<DateTime<Utc>> {
    commit.author.as_ref().and_then(|a| a.date)
}

pub fn committer(commit: &RepositoryCommit) -> Option<&str> {
    commit.committer.as_ref().and_then(|c| c.display_name())
}

pub fn committer_date(commit: &RepositoryCommit) -> Option<DateTime<Utc>> {
    commit.committer.as_ref().and_then(|c| c.date)
}

/// Whether the committer block should be shown next to the author block.
pub fn is_different_committer(
    author: Option<&str>,
    author_date: Option<DateTime<Utc>>,
    committer: Option<&str>,
    committer_date: Option<DateTime<Utc>>,
) -> bool {
    let Some(committer) = committer else {
        return false;
    };
    if author != Some(committer) {
        return true;
    }
    committer_date.is_some() && committer_date != author_date
}

pub fn compare_files(a: &CommitFile, b: &CommitFile) -> Ordering {
    a.filename.cmp(&b.filename)
}

pub fn sort_files(files: &mut [CommitFile]) {
    files.sort_by(compare_files);
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// One-line summary of a commit's diff, e.g. `2 changed files with 5 additions and 1 deletion`.
pub fn format_stats(files: &[CommitFile]) -> String {
    let changed = u32::try_from(files.len()).unwrap_or(u32::MAX);
    let additions: u32 = files.iter().map(|f| f.additions).sum();
    let deletions: u32 = files.iter().map(|f| f.deletions).sum();
    format!(
        "{} with {} and {}",
        plural(changed, "changed file", "changed files"),
        plural(additions, "addition", "additions"),
        plural(deletions, "deletion", "deletions"),
    )
}

pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(date).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return ago(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }
    let days = hours / 24;
    if days < 30 {
        return ago(days, "day");
    }
    date.format("%b %-d, %Y").to_string()
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(secs, 0).single()
    }

    #[test]
    fn same_identity_and_date_hides_committer() {
        assert!(!is_different_committer(Some("ann"), at(10), Some("ann"), at(10)));
        assert!(!is_different_committer(Some("ann"), None, Some("ann"), None));
        // committer without a date never counts as different
        assert!(!is_different_committer(Some("ann"), at(10), Some("ann"), None));
    }

    #[test]
    fn different_names_show_committer_regardless_of_dates() {
        assert!(is_different_committer(Some("ann"), at(10), Some("bob"), at(10)));
        assert!(is_different_committer(Some("ann"), None, Some("bob"), None));
        assert!(is_different_committer(None, None, Some("bob"), None));
    }

    #[test]
    fn same_name_later_commit_date_shows_committer() {
        assert!(is_different_committer(Some("ann"), at(10), Some("ann"), at(99)));
        assert!(is_different_committer(Some("ann"), None, Some("ann"), at(99)));
    }

    #[test]
    fn missing_committer_is_hidden() {
        assert!(!is_different_committer(Some("ann"), at(10), None, at(99)));
    }

    #[test]
    fn abbreviates_to_ten_characters() {
        assert_eq!(abbreviate("0123456789abcdef"), "0123456789");
        assert_eq!(abbreviate("abc"), "abc");
    }

    #[test]
    fn sorts_files_by_name() {
        let mut files: Vec<CommitFile> = ["src/b.rs", "README.md", "src/a.rs"]
            .iter()
            .map(|name| CommitFile {
                filename: name.to_string(),
                ..CommitFile::default()
            })
            .collect();
        sort_files(&mut files);
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["README.md", "src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn formats_stats_with_plurals() {
        let files = vec![
            CommitFile {
                filename: "a".into(),
                additions: 4,
                deletions: 1,
                ..CommitFile::default()
            },
            CommitFile {
                filename: "b".into(),
                additions: 1,
                ..CommitFile::default()
            },
        ];
        assert_eq!(
            format_stats(&files),
            "2 changed files with 5 additions and 1 deletion"
        );
        assert_eq!(
            format_stats(&files[1..]),
            "1 changed file with 1 addition and 0 deletions"
        );
    }

    #[test]
    fn relative_dates() {
        let now = at(100_000).unwrap();
        assert_eq!(relative_date(at(99_990).unwrap(), now), "just now");
        assert_eq!(relative_date(at(100_000 - 120).unwrap(), now), "2 minutes ago");
        assert_eq!(relative_date(at(100_000 - 3_600).unwrap(), now), "1 hour ago");
        assert_eq!(relative_date(at(100_000 - 86_400 * 3).unwrap(), now), "3 days ago");
        assert_eq!(relative_date(at(0).unwrap(), at(86_400 * 40).unwrap()), "Jan 1, 1970");
    }
}
