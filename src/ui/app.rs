//! Main TUI application state and logic

use crate::menu::OptionMenu;
use crate::nav::{Cue, Host, InputFrame, MenuState, Navigator};
use crate::ui::demo::Notice;
use crate::ui::host::{input_frame, key_code, TerminalHost};
use crate::view::{MenuView, VISIBLE_ROWS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Length of one menu tick
pub const TICK: Duration = Duration::from_millis(50);

/// The main application state
pub struct App {
    pub menu: OptionMenu,
    pub navigator: Navigator,
    pub host: TerminalHost,

    /// Messages from the pretend game and its native buttons
    pub notice: Notice,

    /// Bind-synthesized buttons held during the last tick
    pub held_mask: u32,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(menu: OptionMenu, host: TerminalHost, notice: Notice) -> Self {
        App {
            menu,
            navigator: Navigator::new(),
            host,
            notice,
            held_mask: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // one tick per poll, with or without a key
            let mut input = InputFrame::new();
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(frame) = self.handle_key_event(key) {
                            input = frame;
                        }
                    }
                }
            }
            self.step(&input);
        }

        if self.navigator.is_open() {
            self.navigator.close(&self.menu, &mut self.host);
        }
        Ok(())
    }

    /// Controller frame for a key press, `None` if the app consumed it
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<InputFrame> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        if !self.navigator.is_open() && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return None;
        }
        self.host.set_key(key_code(key.code));
        Some(input_frame(&key))
    }

    /// Advance the menu by one tick
    pub fn step(&mut self, input: &InputFrame) {
        self.host.last_cue = None;
        self.navigator.tick(&mut self.menu, &mut self.host, input);

        let host = &self.host;
        self.held_mask = if self.navigator.is_open() {
            0
        } else {
            self.menu.forest.held_button_mask(|key| host.is_key_down(key))
        };

        self.update_status();
        self.host.end_tick();
    }

    fn update_status(&mut self) {
        if let Some(notice) = self.notice.borrow_mut().take() {
            self.status_message = notice;
            return;
        }
        if self.navigator.is_binding() {
            self.status_message = "Press a key to bind".to_string();
            return;
        }
        match self.host.last_cue {
            Some(Cue::Saved) => {
                self.status_message = match self.menu.config() {
                    Some(config) => format!("Saved to {}", config.path().display()),
                    None => "Closed".to_string(),
                };
            }
            Some(Cue::Cancel) => self.status_message = "Nothing to do here".to_string(),
            _ => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        match MenuView::build(&self.menu.forest, &self.host, &self.navigator, VISIBLE_ROWS) {
            Some(view) => super::panes::render_menu_pane(
                frame,
                pane_area,
                &view,
                self.navigator.is_binding(),
            ),
            None => super::panes::render_closed_pane(frame, pane_area, self.held_mask),
        }

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.navigator.state(),
        );
    }

    pub fn state(&self) -> MenuState {
        self.navigator.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::BindPhase;
    use crate::ui::demo::{level_names, NativeSettings};
    use std::rc::Rc;

    fn app() -> (App, NativeSettings) {
        let notice: Notice = Rc::default();
        let settings = NativeSettings::new();
        let mut menu = OptionMenu::new();
        menu.convert(settings.menu(&notice));
        menu.load_source("TOGGLE t Turbo null 0\nBIND b Boost null 0x20 0x42 0xFFFF 0xFFFF\n");
        let host = TerminalHost::new(level_names());
        (App::new(menu, host, notice), settings)
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let input = app.handle_key_event(key).unwrap_or_default();
        app.step(&input);
        // release, so the stick repeat delay does not swallow the next press
        app.step(&InputFrame::new());
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = app();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_keys_drive_the_menu() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('z'));
        assert!(app.navigator.is_open());

        // q is an ordinary key while the menu is open
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.value("t"), 1);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.state(), MenuState::Closed);
    }

    #[test]
    fn test_native_settings_change_in_place() {
        let (mut app, settings) = app();
        press(&mut app, KeyCode::Char('r'));
        // Camera, Aspect Ratio
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(settings.aspect.get(), 1);
    }

    #[test]
    fn test_binding_captures_next_key() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('z'));
        press(&mut app, KeyCode::Down);
        // the idle tick after Enter counts as the release
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.state(),
            MenuState::Binding {
                phase: BindPhase::Capture,
                ..
            }
        ));
        press(&mut app, KeyCode::Char('j'));
        assert!(!app.navigator.is_binding());

        press(&mut app, KeyCode::Char('s'));
        app.host.set_key(Some('J' as u32));
        app.step(&InputFrame::new());
        assert_eq!(app.held_mask, 0x20);
    }
}
