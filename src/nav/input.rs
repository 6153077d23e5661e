//! Per-tick controller input
//!
//! The navigator consumes one [`InputFrame`] per host frame: two stick axes
//! in controller units (about ±80 full scale), the buttons that went down this
//! frame and the buttons currently held. [`StickRepeat`] turns a held stick
//! into discrete presses with auto-repeat.

use bitflags::bitflags;

/// Stick deflection that counts as a press
pub const STICK_THRESHOLD: i32 = 60;

/// Ticks suppressed after the first press of a held stick
pub const FIRST_REPEAT_DELAY: u32 = 9;

/// Ticks suppressed between later repeats
pub const REPEAT_DELAY: u32 = 2;

bitflags! {
    /// Controller buttons the menu reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// Confirm, also the fast-scroll modifier while held
        const A = 1 << 0;
        /// Back
        const B = 1 << 1;
        /// Open or close the declared menu, clears a binding slot
        const Z = 1 << 2;
        /// Open or close the converted menu
        const R = 1 << 3;
        /// Close
        const START = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub stick_x: i32,
    pub stick_y: i32,
    /// Buttons pressed this frame
    pub pressed: Buttons,
    /// Buttons held this frame
    pub held: Buttons,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stick(mut self, x: i32, y: i32) -> Self {
        self.stick_x = x;
        self.stick_y = y;
        self
    }

    pub fn press(mut self, buttons: Buttons) -> Self {
        self.pressed |= buttons;
        self.held |= buttons;
        self
    }

    pub fn hold(mut self, buttons: Buttons) -> Self {
        self.held |= buttons;
        self
    }
}

/// Direction derived from the stick after repeat filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Auto-repeat state of the stick
#[derive(Debug, Clone, Copy, Default)]
pub struct StickRepeat {
    timer: u32,
    held: bool,
}

impl StickRepeat {
    /// Filter the raw stick. Returns the axes to act on this tick, zeroed
    /// while a repeat delay is running.
    pub fn filter(&mut self, x: i32, y: i32) -> (i32, i32) {
        if x.abs() > STICK_THRESHOLD || y.abs() > STICK_THRESHOLD {
            let out = if self.timer == 0 {
                self.timer = if self.held {
                    REPEAT_DELAY
                } else {
                    FIRST_REPEAT_DELAY
                };
                (x, y)
            } else {
                self.timer -= 1;
                (0, 0)
            };
            self.held = true;
            out
        } else {
            self.timer = 0;
            self.held = false;
            (x, y)
        }
    }

    /// Direction for this tick. Vertical wins over horizontal.
    pub fn direction(&mut self, x: i32, y: i32) -> Option<Direction> {
        let (x, y) = self.filter(x, y);
        if y > STICK_THRESHOLD {
            Some(Direction::Up)
        } else if y < -STICK_THRESHOLD {
            Some(Direction::Down)
        } else if x < -STICK_THRESHOLD {
            Some(Direction::Left)
        } else if x > STICK_THRESHOLD {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_schedule() {
        let mut stick = StickRepeat::default();
        let fired: Vec<bool> = (0..20)
            .map(|_| stick.direction(0, 80).is_some())
            .collect();

        // first press, 9 suppressed, then every third tick
        let mut expected = vec![true];
        expected.extend(std::iter::repeat(false).take(9));
        expected.extend([true, false, false, true, false, false, true, false, false, true]);
        assert_eq!(fired, expected);
    }

    #[test]
    fn test_release_resets() {
        let mut stick = StickRepeat::default();
        assert_eq!(stick.direction(-80, 0), Some(Direction::Left));
        assert_eq!(stick.direction(-80, 0), None);
        assert_eq!(stick.direction(0, 0), None);
        assert_eq!(stick.direction(-80, 0), Some(Direction::Left));
    }

    #[test]
    fn test_deadzone() {
        let mut stick = StickRepeat::default();
        assert_eq!(stick.direction(60, -60), None);
        assert_eq!(stick.direction(61, 0), Some(Direction::Right));
    }

    #[test]
    fn test_frame_builders() {
        let frame = InputFrame::new().press(Buttons::B).hold(Buttons::A);
        assert_eq!(frame.pressed, Buttons::B);
        assert_eq!(frame.held, Buttons::A | Buttons::B);
    }
}
