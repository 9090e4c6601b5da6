// src/list.rs

use tui::text::Spans;
use tui::widgets::ListItem;

/// One rendered row. `data` is what activating the row refers to, if anything.
#[derive(Clone, Debug)]
pub struct Entry<T> {
    pub lines: Vec<Spans<'static>>,
    pub data: Option<T>,
}

impl<T> Entry<T> {
    pub fn new(lines: Vec<Spans<'static>>, data: Option<T>) -> Self {
        Self { lines, data }
    }
}

/// A list of items wrapped by decoration rows before (headers) and after
/// (footers). Positions run through headers, then items, then footers.
#[derive(Debug)]
pub struct HeaderFooterList<T> {
    headers: Vec<Entry<T>>,
    items: Vec<Entry<T>>,
    footers: Vec<Entry<T>>,
}

impl<T> Default for HeaderFooterList<T> {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            items: Vec::new(),
            footers: Vec::new(),
        }
    }
}

impl<T> HeaderFooterList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_header(&mut self, lines: Vec<Spans<'static>>, data: Option<T>) {
        self.headers.push(Entry::new(lines, data));
    }

    pub fn add_item(&mut self, lines: Vec<Spans<'static>>, data: Option<T>) {
        self.items.push(Entry::new(lines, data));
    }

    pub fn add_footer(&mut self, lines: Vec<Spans<'static>>) {
        self.footers.push(Entry::new(lines, None));
    }

    /// Drops every row; used before repopulating from a fresh snapshot.
    pub fn clear(&mut self) {
        self.headers.clear();
        self.items.clear();
        self.footers.clear();
    }

    #[cfg(test)]
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    #[cfg(test)]
    pub fn footer_count(&self) -> usize {
        self.footers.len()
    }

    pub fn len(&self) -> usize {
        self.headers.len() + self.items.len() + self.footers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.headers
            .iter()
            .chain(self.items.iter())
            .chain(self.footers.iter())
    }

    pub fn get(&self, position: usize) -> Option<&Entry<T>> {
        self.iter().nth(position)
    }

    pub fn item_at(&self, position: usize) -> Option<&T> {
        self.get(position).and_then(|entry| entry.data.as_ref())
    }

    #[cfg(test)]
    pub fn position_of(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter()
            .position(|entry| entry.data.as_ref().is_some_and(&mut predicate))
    }

    pub fn list_items(&self) -> Vec<ListItem<'static>> {
        self.iter()
            .map(|entry| ListItem::new(entry.lines.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Vec<Spans<'static>> {
        vec![Spans::from(text.to_string())]
    }

    #[test]
    fn positions_run_through_headers_items_footers() {
        let mut list = HeaderFooterList::new();
        list.add_item(line("item"), Some(2));
        list.add_header(line("header"), Some(1));
        list.add_footer(line("footer"));

        assert_eq!(list.len(), 3);
        assert_eq!(list.item_at(0), Some(&1));
        assert_eq!(list.item_at(1), Some(&2));
        assert_eq!(list.item_at(2), None);
        assert!(list.get(3).is_none());
        assert_eq!(list.position_of(|d| *d == 2), Some(1));
    }

    #[test]
    fn clear_drops_everything() {
        let mut list: HeaderFooterList<u8> = HeaderFooterList::new();
        list.add_header(line("h"), None);
        list.add_item(line("i"), None);
        list.add_footer(line("f"));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.list_items().len(), 0);
    }
}
