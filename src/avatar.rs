// src/avatar.rs

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tui::style::{Color, Modifier, Style};
use tui::text::Span;

use crate::types::commit::CommitIdentity;

const PALETTE: [Color; 6] = [
    Color::Blue,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Cyan,
    Color::Red,
];

/// Terminal stand-in for avatar images: a two-letter badge per identity,
/// coloured from a hash of the identity key so a user keeps one colour.
#[derive(Default)]
pub struct AvatarLoader {
    cache: HashMap<String, Span<'static>>,
}

impl AvatarLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, identity: &CommitIdentity) -> Span<'static> {
        let Some(key) = identity.avatar_key() else {
            return Span::styled("  ", Style::default());
        };
        let label = identity.display_name().unwrap_or(key);
        self.cache
            .entry(key.to_string())
            .or_insert_with(|| badge(key, label))
            .clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

fn initials(label: &str) -> String {
    let mut words = label
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '.')
        .filter(|w| !w.is_empty());
    let first = words.next().and_then(|w| w.chars().next());
    let second = words.next().and_then(|w| w.chars().next());
    let initials: String = match (first, second) {
        (Some(a), Some(b)) => [a, b].iter().collect(),
        (Some(_), None) => label.chars().filter(|c| !c.is_whitespace()).take(2).collect(),
        _ => "??".to_string(),
    };
    initials.to_uppercase()
}

fn badge(key: &str, label: &str) -> Span<'static> {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let colour = PALETTE[(hasher.finish() % PALETTE.len() as u64) as usize];
    Span::styled(
        format!("{:<2}", initials(label)),
        Style::default()
            .fg(Color::Black)
            .bg(colour)
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, login: Option<&str>) -> CommitIdentity {
        CommitIdentity {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
            login: login.map(str::to_string),
            date: None,
        }
    }

    #[test]
    fn initials_from_words() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("octocat"), "OC");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "??");
    }

    #[test]
    fn caches_by_identity_key() {
        let mut avatars = AvatarLoader::new();
        let first = avatars.bind(&identity("Ada Lovelace", Some("ada")));
        let again = avatars.bind(&identity("Ada L.", Some("ada")));
        assert_eq!(first, again);
        assert_eq!(avatars.len(), 1);

        avatars.bind(&identity("Grace Hopper", None));
        assert_eq!(avatars.len(), 2);
    }

    #[test]
    fn anonymous_identity_gets_blank_badge() {
        let mut avatars = AvatarLoader::new();
        let span = avatars.bind(&CommitIdentity::default());
        assert_eq!(span.content, "  ");
        assert_eq!(avatars.len(), 0);
    }
}
