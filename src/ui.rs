// src/ui.rs

use tui::{
    Frame,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Clear, List, Paragraph, Wrap},
};

use crate::app::{App, AppMode, Screen};
use crate::commit_screen::CommitScreen;
use crate::file_screen::FileScreen;

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.size());

    match app.screens.last_mut() {
        Some(Screen::Commit(screen)) => draw_commit_screen(f, screen, chunks[0]),
        Some(Screen::File(screen)) => draw_file_screen(f, screen, chunks[0]),
        None => {}
    }
    draw_help(f, app, chunks[1]);

    // Popups go on top of everything
    match &app.mode {
        AppMode::GotoInput => draw_goto_popup(f, app),
        AppMode::Toast(msg) => draw_toast(f, msg),
        AppMode::Normal => {}
    }
}

fn draw_commit_screen<B: Backend>(f: &mut Frame<B>, screen: &mut CommitScreen, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(screen.title())
        .border_style(Style::default().fg(Color::White));

    if screen.is_loading() {
        let loading = Paragraph::new("Loading commit…")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    let list = List::new(screen.list.list_items())
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut screen.list_state);
}

fn draw_file_screen<B: Backend>(f: &mut Frame<B>, screen: &FileScreen, area: Rect) {
    let diff = Paragraph::new(screen.lines.clone())
        .block(Block::default().borders(Borders::ALL).title(screen.title()))
        .scroll((screen.scroll, 0));
    f.render_widget(diff, area);
}

fn draw_help<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let help_text = match app.current() {
        Some(Screen::Commit(_)) => Text::from(
            "↓↑: Navigate | <Enter>: Open parent/file | r: Refresh | g: Go to commit | <Esc>: Back | q: Quit",
        ),
        _ => Text::from("↓↑/PgUp/PgDn: Scroll | g: Go to commit | <Esc>: Back | q: Quit"),
    };
    let help =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_goto_popup<B: Backend>(f: &mut Frame<B>, app: &App) {
    let area = centered_rect(60, 3, f.size());
    let input = Paragraph::new(app.goto_input.value()).style(Style::default().fg(Color::White));
    let block = Block::default()
        .title("Go to commit (Enter to open, Esc to cancel)")
        .borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(input.block(block), area);
}

fn draw_toast<B: Backend>(f: &mut Frame<B>, msg: &str) {
    let area = centered_rect(60, 4, f.size());
    let text = Paragraph::new(msg)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Error (Press Enter to close)")
                .borders(Borders::ALL),
        );
    f.render_widget(Clear, area);
    f.render_widget(text, area);
}
