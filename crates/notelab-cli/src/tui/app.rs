//! Application state and key handling

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use notelab_core::{Command, StatusView, ViewState};

/// How often the status is re-read from the sync client
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Application state
pub struct App {
    /// The status view model
    pub view: StatusView,
    /// Sync service URL, shown in the header
    pub sync_url: String,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Command currently awaiting the sync service
    pub working: Option<Command>,
    /// Whether help overlay is visible
    pub show_help: bool,
    last_refresh: Instant,
}

impl App {
    pub fn new(view: StatusView, sync_url: String) -> Self {
        Self {
            view,
            sync_url,
            should_quit: false,
            working: None,
            show_help: false,
            last_refresh: Instant::now(),
        }
    }

    /// Re-run the reconciler if the refresh interval has passed
    pub fn tick(&mut self) {
        if self.last_refresh.elapsed() >= REFRESH_INTERVAL {
            self.refresh();
        }
    }

    pub fn refresh(&mut self) {
        self.view.refresh();
        self.last_refresh = Instant::now();
    }

    /// Handle a key press
    ///
    /// Returns the command to dispatch, if the key asked for one the view
    /// currently offers.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        // Any key dismisses help
        if self.show_help {
            self.show_help = false;
            return None;
        }

        let command = match self.view.state() {
            ViewState::LoggedOutFormOpen => self.handle_form_key(code),
            ViewState::LoggedOut | ViewState::LoggedIn => self.handle_normal_key(code),
        }?;

        self.view
            .available_commands()
            .contains(&command)
            .then_some(command)
    }

    /// Keys while the login form has focus: typing edits the email
    fn handle_form_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Enter => return Some(Command::SignIn),
            KeyCode::Esc => self.view.close_form(),
            KeyCode::Backspace => {
                self.view.email_mut().pop();
            }
            KeyCode::Char(c) => self.view.email_mut().push(c),
            _ => {}
        }
        None
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('l') => self.view.toggle_form(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('o') => return Some(Command::SignOut),
            KeyCode::Char('s') => return Some(Command::ForceSync),
            _ => {}
        }
        None
    }

    /// Key hints for the current state
    pub fn hints(&self) -> &'static str {
        match self.view.state() {
            ViewState::LoggedOut => "l:sign in  r:refresh  ?:help  q:quit",
            ViewState::LoggedOutFormOpen => "enter:send link  esc:cancel",
            ViewState::LoggedIn => "s:sync now  o:sign out  r:refresh  ?:help  q:quit",
        }
    }
}
