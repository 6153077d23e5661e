//! Input-driven navigation
//!
//! - [`input`]: per-frame controller snapshot and stick auto-repeat
//! - [`host`]: what the navigator asks of the game
//! - [`engine`]: the [`Navigator`] state machine

pub mod engine;
pub mod host;
pub mod input;

pub use engine::{BindPhase, MenuState, Navigator};
pub use host::{Cue, Host};
pub use input::{Buttons, InputFrame};
