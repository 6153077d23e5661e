//! Terminal frontend built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! Stands in for a game so the menus can be tried from a shell:
//!
//! - **[`app`]**: event loop turning key presses into controller frames
//! - **[`host`]**: the [`Host`](crate::nav::Host) a terminal can offer
//! - **[`demo`]**: native menu, level catalog and game actions of a pretend game
//! - **[`panes`]**: stateless render functions for the menu and the status bar
//! - **[`theme`]**: centralized color palette used by all panes

pub mod app;
pub mod demo;
pub mod host;
pub mod panes;
pub mod theme;

pub use app::App;
