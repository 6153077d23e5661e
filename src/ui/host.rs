//! Terminal stand-in for the game host
//!
//! A terminal only reports key presses, never held keys, so a key counts as
//! "down" for exactly the tick its press event arrives in.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::nav::{Buttons, Cue, Host, InputFrame};

/// Full stick deflection produced by an arrow key
pub const STICK_FULL: i32 = 80;

const KEY_ENTER: u32 = 0x0D;
const KEY_TAB: u32 = 0x09;
const KEY_BACKSPACE: u32 = 0x08;
const KEY_ESC: u32 = 0x1B;
const KEY_ARROWS: u32 = 0x0100;
const KEY_FUNCTION: u32 = 0x0110;

/// Host key code of a terminal key
pub fn key_code(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Char(c) => Some(c.to_ascii_uppercase() as u32),
        KeyCode::Enter => Some(KEY_ENTER),
        KeyCode::Tab => Some(KEY_TAB),
        KeyCode::Backspace => Some(KEY_BACKSPACE),
        KeyCode::Esc => Some(KEY_ESC),
        KeyCode::Up => Some(KEY_ARROWS),
        KeyCode::Down => Some(KEY_ARROWS + 1),
        KeyCode::Left => Some(KEY_ARROWS + 2),
        KeyCode::Right => Some(KEY_ARROWS + 3),
        KeyCode::F(n) => Some(KEY_FUNCTION + u32::from(n)),
        _ => None,
    }
}

/// Controller frame produced by one key press
pub fn input_frame(key: &KeyEvent) -> InputFrame {
    let frame = InputFrame::new();
    let frame = if key.modifiers.contains(KeyModifiers::SHIFT) {
        frame.hold(Buttons::A)
    } else {
        frame
    };
    match key.code {
        KeyCode::Up => frame.with_stick(0, STICK_FULL),
        KeyCode::Down => frame.with_stick(0, -STICK_FULL),
        KeyCode::Left => frame.with_stick(-STICK_FULL, 0),
        KeyCode::Right => frame.with_stick(STICK_FULL, 0),
        KeyCode::Enter | KeyCode::Char(' ') => frame.press(Buttons::A),
        KeyCode::Esc | KeyCode::Backspace => frame.press(Buttons::B),
        KeyCode::Char('z') | KeyCode::Char('Z') => frame.press(Buttons::Z),
        KeyCode::Char('r') | KeyCode::Char('R') => frame.press(Buttons::R),
        KeyCode::Char('s') | KeyCode::Char('S') => frame.press(Buttons::START),
        _ => frame,
    }
}

pub struct TerminalHost {
    /// Key pressed during the current tick
    key: Option<u32>,
    levels: Vec<String>,
    pub last_cue: Option<Cue>,
}

impl TerminalHost {
    pub fn new(levels: Vec<String>) -> Self {
        TerminalHost {
            key: None,
            levels,
            last_cue: None,
        }
    }

    pub fn set_key(&mut self, key: Option<u32>) {
        self.key = key;
    }

    /// Forget the key once its tick is over
    pub fn end_tick(&mut self) {
        self.key = None;
    }
}

impl Host for TerminalHost {
    fn first_key_down(&self) -> Option<u32> {
        self.key
    }

    fn is_key_down(&self, key: u32) -> bool {
        self.key == Some(key)
    }

    fn level_count(&self, exclude_castle: bool) -> i32 {
        let count = self.levels.len() as i32;
        if exclude_castle {
            (count - 1).max(0)
        } else {
            count
        }
    }

    fn level_name(&self, index: usize) -> String {
        self.levels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Level {}", index + 1))
    }

    fn play_cue(&mut self, cue: Cue) {
        self.last_cue = Some(cue);
    }
}
