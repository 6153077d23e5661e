//! TUI pane rendering modules
//!
//! - [`menu`]: the open options menu, or a hint while it is closed
//! - [`status`]: status bar with keybindings and navigator state

pub mod menu;
pub mod status;

pub use menu::{render_closed_pane, render_menu_pane};
pub use status::render_status_bar;
