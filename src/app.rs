// src/app.rs

use chrono::Utc;
use crossterm::event::{self, KeyCode, KeyEvent};
use tracing::{debug, info};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::avatar::AvatarLoader;
use crate::commit_screen::CommitScreen;
use crate::file_screen::FileScreen;
use crate::navigation::Navigation;
use crate::task::{FetchOutcome, FetchRequest};
use crate::types::repo_id::RepoId;

const PAGE: usize = 10;

pub enum Screen {
    Commit(CommitScreen),
    File(FileScreen),
}

pub enum AppMode {
    Normal,
    GotoInput,
    Toast(String),
}

pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub screens: Vec<Screen>,
    pub avatars: AvatarLoader,
    pub goto_input: Input,
    next_request_id: u64,
    pending: Vec<FetchRequest>,
}

impl App {
    pub fn new(repo: RepoId, base: String) -> Self {
        let mut app = Self {
            should_quit: false,
            mode: AppMode::Normal,
            screens: Vec::new(),
            avatars: AvatarLoader::new(),
            goto_input: Input::default(),
            next_request_id: 0,
            pending: Vec::new(),
        };
        app.open_commit(repo, base);
        app
    }

    pub fn current(&self) -> Option<&Screen> {
        self.screens.last()
    }

    /// Fetches queued since the last call; the event loop hands them to the task.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    fn request(&mut self, repo: RepoId, base: String) -> u64 {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.pending.push(FetchRequest { id, repo, base });
        id
    }

    fn open_commit(&mut self, repo: RepoId, base: String) {
        let id = self.request(repo.clone(), base.clone());
        self.screens
            .push(Screen::Commit(CommitScreen::new(repo, base, id)));
    }

    /// Restarts the current commit screen's fetch; the shown snapshot stays until it lands.
    pub fn refresh(&mut self) {
        let Some(Screen::Commit(screen)) = self.screens.last() else {
            return;
        };
        let (repo, base) = (screen.repo.clone(), screen.base.clone());
        let id = self.request(repo, base);
        if let Some(Screen::Commit(screen)) = self.screens.last_mut() {
            screen.request_id = id;
        }
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        info!(?navigation, "navigating");
        match navigation {
            Navigation::Commit { repo, sha } => self.open_commit(repo, sha),
            Navigation::File { repo, base, file } => self
                .screens
                .push(Screen::File(FileScreen::new(repo, base, file))),
        }
    }

    pub fn on_fetch_outcome(&mut self, outcome: FetchOutcome) {
        let screen = self.screens.iter_mut().find_map(|s| match s {
            Screen::Commit(c) if c.request_id == outcome.id => Some(c),
            _ => None,
        });
        let Some(screen) = screen else {
            debug!(id = outcome.id, "dropping result for a closed or refreshed screen");
            return;
        };
        match outcome.result {
            Ok(full) => screen.update_list(full, &mut self.avatars, Utc::now()),
            Err(e) => {
                if let AppMode::GotoInput = self.mode {
                    self.goto_input.reset();
                }
                self.mode = AppMode::Toast(format!("Could not load commit: {e}"));
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Normal => self.handle_normal_mode_keys(key),
            AppMode::GotoInput => self.handle_goto_input_keys(key),
            AppMode::Toast(_) => {
                if let KeyCode::Enter | KeyCode::Esc = key.code {
                    self.mode = AppMode::Normal;
                }
            }
        }
    }

    fn handle_normal_mode_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1, true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(1, false),
            KeyCode::PageDown => self.move_selection(PAGE, true),
            KeyCode::PageUp => self.move_selection(PAGE, false),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('g') => self.mode = AppMode::GotoInput,
            _ => {}
        }
    }

    fn handle_goto_input_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_goto(),
            KeyCode::Esc => {
                self.goto_input.reset();
                self.mode = AppMode::Normal;
            }
            _ => {
                self.goto_input.handle_event(&event::Event::Key(key));
            }
        }
    }

    fn submit_goto(&mut self) {
        let target = self.goto_input.value().trim().to_string();
        self.goto_input.reset();
        self.mode = AppMode::Normal;
        if target.is_empty() {
            return;
        }
        if let Some(repo) = self.current_repo() {
            self.navigate(Navigation::Commit { repo, sha: target });
        }
    }

    fn current_repo(&self) -> Option<RepoId> {
        match self.current()? {
            Screen::Commit(s) => Some(s.repo.clone()),
            Screen::File(s) => Some(s.repo.clone()),
        }
    }

    fn back(&mut self) {
        if self.screens.len() > 1 {
            self.screens.pop();
        }
    }

    fn activate(&mut self) {
        let navigation = match self.screens.last() {
            Some(Screen::Commit(screen)) => screen.activate(),
            _ => None,
        };
        if let Some(navigation) = navigation {
            self.navigate(navigation);
        }
    }

    fn move_selection(&mut self, step: usize, down: bool) {
        match self.screens.last_mut() {
            Some(Screen::Commit(screen)) if down => screen.select_next(step),
            Some(Screen::Commit(screen)) => screen.select_previous(step),
            Some(Screen::File(screen)) => {
                let step = u16::try_from(step).unwrap_or(u16::MAX);
                if down {
                    screen.scroll_down(step);
                } else {
                    screen.scroll_up(step);
                }
            }
            None => {}
        }
    }
}
