// src/comment_renderer.rs

use pulldown_cmark::{Event, Parser, Tag};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};

/// Renders comment markdown into terminal lines. Images cannot be drawn, so
/// they collapse to an `[image: alt]` placeholder.
pub fn render(body: &str, indent: &str) -> Vec<Spans<'static>> {
    let mut out = LineBuilder::new(indent);
    let mut in_image = false;
    let mut image_alt = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Image(..)) => {
                in_image = true;
                image_alt.clear();
            }
            Event::End(Tag::Image(..)) => {
                in_image = false;
                let label = if image_alt.is_empty() {
                    "[image]".to_string()
                } else {
                    format!("[image: {image_alt}]")
                };
                out.push(label, Style::default().fg(Color::Magenta));
            }
            Event::Text(text) if in_image => image_alt.push_str(&text),
            Event::Start(Tag::Emphasis) => out.modifiers.push(Modifier::ITALIC),
            Event::Start(Tag::Strong) => out.modifiers.push(Modifier::BOLD),
            Event::Start(Tag::Heading(..)) => out.modifiers.push(Modifier::BOLD),
            Event::End(Tag::Emphasis) | Event::End(Tag::Strong) => {
                out.modifiers.pop();
            }
            Event::End(Tag::Heading(..)) => {
                out.modifiers.pop();
                out.break_line();
            }
            Event::Start(Tag::Item) => out.push("• ".to_string(), Style::default()),
            Event::End(Tag::Paragraph) | Event::End(Tag::Item) => out.break_line(),
            Event::End(Tag::CodeBlock(_)) => {
                out.break_line();
                out.code = false;
            }
            Event::Start(Tag::CodeBlock(_)) => out.code = true,
            Event::Text(text) => {
                let style = out.current_style();
                let mut parts = text.split('\n').peekable();
                while let Some(part) = parts.next() {
                    if !part.is_empty() {
                        out.push(part.to_string(), style);
                    }
                    if parts.peek().is_some() {
                        out.break_line();
                    }
                }
            }
            Event::Code(code) => out.push(
                code.to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Event::SoftBreak => out.push(" ".to_string(), Style::default()),
            Event::HardBreak => out.break_line(),
            Event::Rule => {
                out.push("─".repeat(20), Style::default().fg(Color::DarkGray));
                out.break_line();
            }
            Event::Html(html) => out.push(html.trim().to_string(), Style::default()),
            _ => {}
        }
    }
    out.finish()
}

struct LineBuilder {
    indent: String,
    lines: Vec<Spans<'static>>,
    current: Vec<Span<'static>>,
    modifiers: Vec<Modifier>,
    code: bool,
}

impl LineBuilder {
    fn new(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
            lines: Vec::new(),
            current: Vec::new(),
            modifiers: Vec::new(),
            code: false,
        }
    }

    fn current_style(&self) -> Style {
        let base = if self.code {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        self.modifiers
            .iter()
            .fold(base, |style, m| style.add_modifier(*m))
    }

    fn push(&mut self, text: String, style: Style) {
        if self.current.is_empty() {
            self.current.push(Span::raw(self.indent.clone()));
        }
        self.current.push(Span::styled(text, style));
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Spans::from(std::mem::take(&mut self.current)));
        }
    }

    fn finish(mut self) -> Vec<Spans<'static>> {
        self.break_line();
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Spans<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.0.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn renders_paragraphs_as_lines() {
        let lines = render("first line\nsame paragraph\n\nsecond", "  ");
        assert_eq!(text(&lines), vec!["  first line same paragraph", "  second"]);
    }

    #[test]
    fn images_become_placeholders() {
        let lines = render("see ![screenshot](https://example.com/a.png)", "");
        assert_eq!(text(&lines), vec!["see [image: screenshot]"]);
    }

    #[test]
    fn code_blocks_keep_their_lines() {
        let lines = render("```\nlet a = 1;\nlet b = 2;\n```", "");
        assert_eq!(text(&lines), vec!["let a = 1;", "let b = 2;"]);
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert!(render("", "  ").is_empty());
    }
}
