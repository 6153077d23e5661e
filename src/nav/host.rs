//! Host collaborator interface
//!
//! Everything the navigator needs from the game besides the input frame:
//! raw key queries for binding, the level catalog for level choices, audio
//! cues and the close hook.

/// Audio feedback requested by the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Cursor moved, menu opened or a key was captured
    Select,
    /// A value changed or an action succeeded
    Confirm,
    /// An action was refused
    Cancel,
    /// The menu closed and settings were saved
    Saved,
}

pub trait Host {
    /// First key or button currently held, in host key codes
    fn first_key_down(&self) -> Option<u32>;

    fn is_key_down(&self, key: u32) -> bool;

    /// The host's own raw key reader, used to bind converted options
    fn raw_key(&mut self) -> Option<u32> {
        self.first_key_down()
    }

    /// Number of levels in the catalog, optionally leaving out the castle
    fn level_count(&self, exclude_castle: bool) -> i32;

    /// Display name of a catalog entry
    fn level_name(&self, index: usize) -> String {
        format!("Level {}", index + 1)
    }

    fn play_cue(&mut self, _cue: Cue) {}

    /// Called when the menu closes, before the settings are saved
    fn on_menu_closed(&mut self) {}
}
